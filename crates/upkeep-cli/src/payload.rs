//! JSON payload input shared by the `add`, `update` and child-record
//! subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use serde_json::Value;
use upkeep_core::UpkeepError;

/// Message for text that is not JSON at all.
pub const MALFORMED_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// Message when neither `--json` nor `--file` is given.
pub const MISSING_PAYLOAD_MESSAGE: &str = "Provide a request body with --json or --file";

#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// Request body as an inline JSON object.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,

    /// Read the request body from a JSON file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn inline(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            file: None,
        }
    }

    /// Read and parse the body. Shape checks are left to the schemas.
    pub fn read(&self) -> Result<Value> {
        let text = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read request body {}", path.display()))?,
            (None, None) => return Err(UpkeepError::validation(MISSING_PAYLOAD_MESSAGE).into()),
        };
        parse(&text)
    }
}

/// Clap value parser for enums spelled by their persisted token
/// (`active`, `on-leave`, `contractor`, ...).
pub fn parse_token<T: DeserializeOwned>(s: &str) -> std::result::Result<T, String> {
    serde_json::from_value(Value::String(s.to_string())).map_err(|_| format!("unknown value {s:?}"))
}

fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|_| UpkeepError::validation(MALFORMED_JSON_MESSAGE).into())
}
