//! Response bodies that are not domain entities.

use serde::Deserialize;

/// Error payload: `{"detail": ...}`. Validation failures carry a list of
/// field errors instead of a string.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Flatten `detail` into one user-facing line.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

/// Extract a message from a raw error body, falling back to `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message())
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        assert_eq!(
            error_message(r#"{"detail": "Dossier non trouvé"}"#, "x"),
            "Dossier non trouvé"
        );
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"},
                                  {"loc": ["body", "parent_id"], "msg": "value is not a valid integer"}]}"#;
        assert_eq!(
            error_message(body, "x"),
            "field required; value is not a valid integer"
        );
    }

    #[test]
    fn test_unparseable_body_uses_fallback() {
        assert_eq!(error_message("<html>", "Bad Gateway"), "Bad Gateway");
    }
}
