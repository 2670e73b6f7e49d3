//! `codeprompt assemble`: print the prompt a request would send.

use anyhow::Context as _;
use cp_contextpack::{AssembledPrompt, ContextPipeline, ContextReport};
use cp_domain::config::Config;

use super::{ProjectArgs, RequestArgs};

/// Run the blocking pipeline off the async runtime.
pub async fn build(
    config: &Config,
    project: &ProjectArgs,
    request: &RequestArgs,
) -> anyhow::Result<(AssembledPrompt, ContextReport)> {
    let pipeline = ContextPipeline::from_config(config);
    let project = project.to_project();
    let message = request.message.clone();
    let logs = request.read_logs()?;

    let built = tokio::task::spawn_blocking(move || {
        pipeline.assemble(&project, &message, logs.as_deref())
    })
    .await
    .context("assembly task failed")??;
    Ok(built)
}

pub async fn run(
    config: &Config,
    project: ProjectArgs,
    request: RequestArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let (prompt, report) = build(config, &project, &request).await?;

    if json_output {
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "prompt": prompt,
            "report": report,
        }))
        .map_err(|e| anyhow::anyhow!("serializing report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", prompt.text);
    }
    Ok(())
}
