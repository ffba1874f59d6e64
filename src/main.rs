mod config;
mod openapi;
mod patcher;
mod web;

use crate::config::{Config, ConfigError};
use crate::openapi::Patch;
use crate::patcher::{patch_spec, PatchError};
use crate::web::HttpClient;
use std::process::ExitCode;
use tracing::Level;

const CONFIG_FILE: &str = "openapi-patcher.toml";

#[derive(thiserror::Error, Debug)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let collector = tracing_subscriber::fmt()
        .json()
        .with_max_level(Level::INFO)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(collector) {
        eprintln!("failed to install tracing subscriber: {err}");
    }

    let result = run().await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "patching OpenAPI document failed");
    }

    exit_code(&result)
}

fn exit_code(result: &Result<(), RunError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    }
}

async fn run() -> Result<(), RunError> {
    let config = Config::load(CONFIG_FILE)?;
    let source = config.source_uri()?;
    let patch = Patch::from(&config.patch);

    let client = HttpClient::new();

    patch_spec(&client, &source, &config.output_path, &patch).await?;

    Ok(())
}
