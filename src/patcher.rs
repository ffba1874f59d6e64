use crate::openapi::{DocumentError, Patch};
use crate::web::{simple_get, HttpClient, HttpError};
use hyper::header::CONTENT_TYPE;
use hyper::Uri;
use serde_json::Value;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    #[error("failed to fetch OpenAPI document: {0}")]
    Fetch(#[from] HttpError),
    #[error("OpenAPI document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot patch OpenAPI document: {0}")]
    Document(#[from] DocumentError),
    #[error("failed to write output file: {0}")]
    Write(#[from] std::io::Error),
}

/// Fetches the document at `source`, applies `patch` and writes it to `output`.
///
/// The output is only written once every earlier step has succeeded.
pub async fn patch_spec<P: AsRef<Path>>(
    client: &HttpClient,
    source: &Uri,
    output: P,
    patch: &Patch,
) -> Result<(), PatchError> {
    tracing::info!(source = %source, "fetching OpenAPI document");

    let (headers, bytes) = simple_get(client, source).await?;
    tracing::debug!(
        content_type = ?headers.get(CONTENT_TYPE),
        bytes = bytes.len(),
        "received OpenAPI document"
    );

    let mut document: Value = serde_json::from_slice(&bytes)?;
    patch.apply(&mut document)?;
    let rendered = render(&document)?;

    tokio::fs::write(output.as_ref(), rendered.as_bytes()).await?;
    tracing::info!(
        output = %output.as_ref().display(),
        bytes = rendered.len(),
        "wrote patched OpenAPI document"
    );

    Ok(())
}

/// Two-space indented JSON without a trailing newline.
pub fn render(document: &Value) -> Result<String, PatchError> {
    Ok(serde_json::to_string_pretty(document)?)
}
