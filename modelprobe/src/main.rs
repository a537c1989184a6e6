use std::process::ExitCode;

use anyhow::Context;
use modelprobe::{
    build_probe_request, logging::init_logging, run_probe, ConfigError, EnvSnapshot, ProbeConfig,
    PromptOverrides,
};

const AUTH_HINT: &str = "The API rejected the credential. Check OPENAI_API_KEY.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let env = EnvSnapshot::capture();

    let config = match ProbeConfig::from_env(&env) {
        Ok(config) => config,
        Err(ConfigError::MissingCredential) => {
            eprintln!("{}", ConfigError::MissingCredential);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    init_logging(&config.logging);

    if let Some(issue) = env.dotenv_issue() {
        tracing::warn!("Skipped part of .env: {}", issue);
    }
    for name in env.skipped() {
        tracing::warn!("Ignored non-UTF-8 environment variable {}", name);
    }
    tracing::debug!(
        model = %config.model,
        base_url = ?config.client.base_url,
        insecure_tls = config.client.allow_insecure_tls,
        "configuration loaded"
    );

    let overrides = PromptOverrides::load(&config.prompts_dir).with_context(|| {
        format!("Failed to read prompt overrides from {}", config.prompts_dir.display())
    })?;

    let client = config
        .client
        .build_client()
        .context("Failed to create OpenAI client")?;

    let request = build_probe_request(&config.model, &overrides);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run_probe(&client, request, &mut stdout).await {
        if e.is_auth() {
            eprintln!("{}", AUTH_HINT);
        }
        return Err(e.into());
    }

    Ok(ExitCode::SUCCESS)
}
