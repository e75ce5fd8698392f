//! MCP protocol response helpers.

use rmcp::model::{CallToolResult, Content, ErrorData};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation) - 40-60% fewer tokens.
    Toon,
}

/// Single-report response that serializes as the raw inner value.
///
/// # Example
///
/// ```ignore
/// Response(lookup, None).into()                     // JSON output (default)
/// Response(lookup, Some(OutputFormat::Toon)).into() // TOON output
/// ```
pub struct Response<T>(pub T, pub Option<OutputFormat>);

impl<T> Response<T> {
    /// Create a response with default (JSON) format.
    pub fn json(data: T) -> Self {
        Response(data, None)
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: Serialize> From<Response<T>> for Result<CallToolResult, ErrorData> {
    fn from(response: Response<T>) -> Self {
        let content = match response.1.unwrap_or_default() {
            OutputFormat::Json => serde_json::to_value(&response.0)
                .map_err(|e| ErrorData::internal_error(e.to_string(), None))
                .and_then(Content::json)?,
            OutputFormat::Toon => {
                let toon = serde_toon::to_string(&response.0)
                    .map_err(|e| ErrorData::internal_error(format!("TOON serialization error: {}", e), None))?;
                Content::text(toon)
            }
        };
        Ok(CallToolResult::success(vec![content]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_response_is_raw_value() {
        let result: Result<CallToolResult, ErrorData> =
            Response::json(json!({"name": "Anders", "found_in_db1": true})).into();
        let result = result.unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_toon_response_is_text() {
        let result: Result<CallToolResult, ErrorData> =
            Response(json!({"topic": "ai", "experts_found": 0}), Some(OutputFormat::Toon)).into();
        let content = &result.unwrap().content[0];
        let text = content.as_text().map(|t| t.text.clone()).unwrap_or_default();
        assert!(text.contains("topic"));
        assert!(text.contains("ai"));
    }
}
