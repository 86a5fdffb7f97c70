//! Result output for the CLI

use anyhow::{Context, Result};
use iam_saml_federation_core::ReconcileResult;

/// Render a reconciliation result as JSON
pub fn render_result(result: &ReconcileResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.context("Failed to serialize reconciliation result")
}

/// Write the result to stdout; on failure the message also goes to stderr
pub fn output_result(result: &ReconcileResult, pretty: bool) -> Result<()> {
    if let Some(error) = &result.error {
        eprintln!("Error: {}", error.msg);
    }
    println!("{}", render_result(result, pretty)?);
    Ok(())
}
