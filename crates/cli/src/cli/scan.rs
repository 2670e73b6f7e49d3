//! `codeprompt scan`: show what a request against this project would see.

use anyhow::Context as _;
use cp_contextpack::ContextPipeline;
use cp_domain::config::Config;

use super::ProjectArgs;

pub async fn run(config: &Config, args: ProjectArgs) -> anyhow::Result<()> {
    let pipeline = ContextPipeline::from_config(config);
    let project = args.to_project();

    let (structure, batch) = tokio::task::spawn_blocking(move || {
        let files = pipeline.load(&project)?;
        let structure = pipeline.render_structure(&files);
        Ok::<_, cp_domain::error::Error>((structure, files.batch))
    })
    .await
    .context("scan task failed")??;

    print!("{structure}");
    println!();
    println!("{}", batch.summary());
    for err in &batch.errors {
        eprintln!("  {}: {}", err.path, err.message);
    }
    println!("{}", batch.status_message());
    Ok(())
}
