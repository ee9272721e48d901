use crate::error::PipelineError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// A standalone JSON document.
    Json,
    /// JSON assigned to a constant, includable as a `<script>` source.
    Script { name: String },
}

impl OutputFormat {
    pub fn script(name: impl Into<String>) -> Self {
        Self::Script { name: name.into() }
    }

    fn prefix(&self) -> Option<String> {
        match self {
            OutputFormat::Json => None,
            OutputFormat::Script { name } => Some(format!("const {} = ", name)),
        }
    }
}

const STATEMENT_END: &str = ";";

/// Pretty JSON with two-space indentation; non-ASCII text is kept as-is.
pub fn render_document<T: Serialize>(
    document: &T,
    format: &OutputFormat,
) -> Result<String, PipelineError> {
    let payload = serde_json::to_string_pretty(document)?;
    Ok(match format.prefix() {
        None => payload,
        Some(prefix) => format!("{}{}{}", prefix, payload, STATEMENT_END),
    })
}

/// Strips the script wrapper, if any, and parses the JSON payload.
pub fn parse_document(
    text: &str,
    format: &OutputFormat,
) -> Result<serde_json::Value, PipelineError> {
    let payload = match format.prefix() {
        None => text,
        Some(prefix) => {
            let trimmed = text.trim();
            trimmed
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(STATEMENT_END))
                .ok_or_else(|| PipelineError::Schema {
                    grid: "script document".to_string(),
                    reason: format!(
                        "expected '{}…{}' wrapper",
                        prefix.trim_end(),
                        STATEMENT_END
                    ),
                })?
        }
    };
    Ok(serde_json::from_str(payload)?)
}
