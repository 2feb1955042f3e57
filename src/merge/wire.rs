//! Batch-update body for a Google-Docs style document API.
//!
//! ```json
//! { "requests": [
//!     { "replaceAllText": {
//!         "containsText": { "text": "{{name}}", "matchCase": true },
//!         "replaceText": "Acme" } }
//! ] }
//! ```

use crate::merge::MergeRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstringMatchCriteria {
    pub text: String,
    pub match_case: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllText {
    pub contains_text: SubstringMatchCriteria,
    pub replace_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub replace_all_text: ReplaceAllText,
}

impl From<&MergeRequest> for Request {
    fn from(request: &MergeRequest) -> Self {
        Self {
            replace_all_text: ReplaceAllText {
                contains_text: SubstringMatchCriteria {
                    text: request.placeholder.clone(),
                    match_case: true,
                },
                replace_text: request.replacement.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

impl BatchUpdate {
    pub fn from_requests(requests: &[MergeRequest]) -> Self {
        Self {
            requests: requests.iter().map(Request::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_update_json() {
        let body = BatchUpdate::from_requests(&[MergeRequest::new("name", "Acme")]);
        assert_eq!(
            body.to_json().unwrap(),
            r#"{"requests":[{"replaceAllText":{"containsText":{"text":"{{name}}","matchCase":true},"replaceText":"Acme"}}]}"#
        );
    }
}
