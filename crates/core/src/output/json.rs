//! JSON output formatter

use crate::models::FileDocument;
use crate::output::FormatError;

/// Format a file document as pretty-printed JSON
pub fn format_json(document: &FileDocument) -> Result<String, FormatError> {
    serde_json::to_string_pretty(document).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_document;

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_document()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["label"], "sample.ts");
        assert_eq!(value["language"], "type_script");
        assert_eq!(value["root"]["kind"], "program");

        let class = &value["root"]["children"][0];
        assert_eq!(class["kind"], "class");
        assert_eq!(class["identifier"], "MyClass");
        assert_eq!(class["leading_comments"][0], "/* Leading Comment */");
        assert_eq!(class["children"][0]["identifier"], "method");
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let json = format_json(&sample_document()).unwrap();
        assert!(!json.contains("\"diagnostics\""));
    }
}
