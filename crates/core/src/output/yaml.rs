//! YAML output formatter

use crate::models::FileDocument;
use crate::output::FormatError;

/// Format a file document as YAML
pub fn format_yaml(document: &FileDocument) -> Result<String, FormatError> {
    serde_yaml::to_string(document).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_document;

    #[test]
    fn test_format_yaml() {
        let yaml = format_yaml(&sample_document()).unwrap();

        assert!(yaml.contains("label: sample.ts"));
        assert!(yaml.contains("identifier: MyClass"));
        assert!(yaml.contains("kind: method"));
    }
}
