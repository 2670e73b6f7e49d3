//! `codeprompt ask`: assemble the prompt and send it to the model.

use cp_domain::config::Config;
use cp_providers::{CompletionRequest, LlmProvider, OpenAiCompatProvider};

use super::assemble;
use super::{ProjectArgs, RequestArgs};

pub async fn run(
    config: &Config,
    project: ProjectArgs,
    request: RequestArgs,
    model: Option<String>,
    json_output: bool,
) -> anyhow::Result<()> {
    // Fail on a missing key before touching the project.
    let provider = OpenAiCompatProvider::from_config(&config.llm)?;

    let (prompt, report) = assemble::build(config, &project, &request).await?;
    tracing::info!(
        provider = provider.provider_id(),
        files = report.files_included(),
        prompt_chars = report.prompt_chars,
        "sending prompt"
    );

    let reply = provider
        .complete(&CompletionRequest {
            prompt: prompt.text,
            model,
            temperature: Some(config.llm.temperature),
            max_tokens: Some(config.llm.max_tokens),
        })
        .await?;

    if json_output {
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "reply": reply.content,
            "model": reply.model,
            "finish_reason": reply.finish_reason,
            "report": report,
        }))
        .map_err(|e| anyhow::anyhow!("serializing reply: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", reply.content);
    }
    Ok(())
}
