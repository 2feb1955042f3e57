//! Render envelope for a Carbone-style rendering service.
//!
//! The service receives the flattened fields as `data` next to the output format and the
//! report name, and substitutes `{{key}}` tokens itself.

use crate::flatten::FlatFieldMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_FORMAT: &str = "pdf";
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    pub convert_to: String,
    pub lang: String,
    pub report_name: String,
    pub data: FlatFieldMap,
}

impl RenderInput {
    pub fn new(report_name: impl Into<String>, data: FlatFieldMap) -> Self {
        Self {
            convert_to: DEFAULT_OUTPUT_FORMAT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            report_name: report_name.into(),
            data,
        }
    }

    /// Sets the output format. Blank values keep the PDF default.
    pub fn with_output_format(mut self, format: &str) -> Self {
        let format = format.trim();
        if !format.is_empty() {
            self.convert_to = format.to_string();
        }
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_input_json() {
        let data: FlatFieldMap = [("name", "Acme")].into_iter().collect();
        let input = RenderInput::new("SaleOrder", data).with_output_format("  ");
        assert_eq!(
            input.to_json().unwrap(),
            r#"{"convertTo":"pdf","lang":"en","reportName":"SaleOrder","data":{"name":"Acme"}}"#
        );
        assert_eq!(input.with_output_format("docx").convert_to, "docx");
    }
}
