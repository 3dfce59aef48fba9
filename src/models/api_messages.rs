use serde::Deserialize;
use serde_json::Value;

/// Body of a successful signup/unregister response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of a rejected request. `detail` is optional: not every error status carries one,
/// and validation errors carry a list instead of a sentence.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The detail, when the backend sent a readable sentence.
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(Value::String(text)) => Some(text),
            _ => None,
        }
    }
}
