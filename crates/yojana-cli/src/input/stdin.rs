use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a project request piped on stdin.
///
/// Returns `None` when stdin is a terminal or the pipe carried only
/// whitespace, so the caller can fall back to flags.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse piped input: {e}"))?;
    tracing::debug!(bytes = trimmed.len(), "read request from stdin");
    Ok(Some(parsed))
}
