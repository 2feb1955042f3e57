//! # Merge-Request Builder
//!
//! Turns a [`FlatFieldMap`] into "replace token X with text Y" operations.
//!
//! A token is exactly `{{` + dotted key + `}}`. Matching is case-sensitive, on substrings,
//! and replaces every occurrence. [`apply`] implements those semantics locally; the
//! [`wire`] and [`carbone`] modules hold the request bodies for remote document services.

pub mod carbone;
pub mod wire;

use crate::flatten::FlatFieldMap;
use serde::{Deserialize, Serialize};

pub const TOKEN_OPEN: &str = "{{";
pub const TOKEN_CLOSE: &str = "}}";

/// Builds the placeholder token for a dotted key.
pub fn placeholder(key: &str) -> String {
    format!("{TOKEN_OPEN}{key}{TOKEN_CLOSE}")
}

/// One "replace all occurrences" operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub placeholder: String,
    pub replacement: String,
}

impl MergeRequest {
    pub fn new(key: &str, replacement: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder(key),
            replacement: replacement.into(),
        }
    }
}

/// One request per map entry, in map order.
pub fn build(fields: &FlatFieldMap) -> Vec<MergeRequest> {
    fields
        .iter()
        .map(|(key, value)| MergeRequest::new(key, value))
        .collect()
}

/// Applies `requests` in order to `text`.
///
/// Returns the rendered text and the total number of occurrences replaced.
pub fn apply(text: &str, requests: &[MergeRequest]) -> (String, usize) {
    let mut rendered = text.to_string();
    let mut replaced = 0;
    for request in requests {
        let count = rendered.matches(request.placeholder.as_str()).count();
        if count > 0 {
            rendered = rendered.replace(&request.placeholder, &request.replacement);
            replaced += count;
        }
    }
    (rendered, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_produces_literal_tokens_in_order() {
        let fields: FlatFieldMap = [("name", "Acme"), ("client.email", "")].into_iter().collect();
        let requests = build(&fields);
        assert_eq!(
            requests,
            vec![
                MergeRequest {
                    placeholder: "{{name}}".into(),
                    replacement: "Acme".into()
                },
                MergeRequest {
                    placeholder: "{{client.email}}".into(),
                    replacement: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_apply_renders_template() {
        let fields: FlatFieldMap = [("name", "Acme"), ("total", "100.00")].into_iter().collect();
        let requests = build(&fields);
        assert_eq!(requests.len(), 2);

        let (text, replaced) = apply("{{name}} owes {{total}}", &requests);
        assert_eq!(text, "Acme owes 100.00");
        assert_eq!(replaced, 2);
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let requests = vec![MergeRequest::new("name", "Acme")];
        let (text, replaced) = apply("{{name}}, {{name}} and {{name}}", &requests);
        assert_eq!(text, "Acme, Acme and Acme");
        assert_eq!(replaced, 3);
    }

    #[test]
    fn test_apply_is_case_sensitive() {
        let requests = vec![MergeRequest::new("name", "Acme")];
        let (text, replaced) = apply("{{Name}} {{NAME}} x{{name}}x", &requests);
        assert_eq!(text, "{{Name}} {{NAME}} xAcmex");
        assert_eq!(replaced, 1);
    }

    #[test]
    fn test_dotted_key_does_not_match_prefix_token() {
        let requests = vec![MergeRequest::new("client", "Acme")];
        let (text, replaced) = apply("{{client.name}}", &requests);
        assert_eq!(text, "{{client.name}}");
        assert_eq!(replaced, 0);
    }
}
