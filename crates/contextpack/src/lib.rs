//! Context assembly for project-aware prompts.
//!
//! Discovers and reads project files, summarizes the directory layout,
//! selects file bodies under character and file-count caps, and composes
//! the final prompt text.

pub mod budget;
pub mod builder;
pub mod discovery;
pub mod extract;
pub mod injection;
pub mod persona;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod selector;
pub mod structure;
pub mod truncation;

pub use budget::PromptBudget;
pub use builder::{AssembledPrompt, ContextPackBuilder, PromptInput};
pub use pipeline::{ContextPipeline, ProjectFiles};
pub use reader::FileBatch;
pub use report::ContextReport;
