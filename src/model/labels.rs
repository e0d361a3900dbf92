use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ApiError;

/// Loads an ordered label sequence from a JSON array-of-strings file.
///
/// Position is meaningful: the i-th label names the i-th output dimension
/// of the corresponding classification head.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>, ApiError> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path)
        .map_err(|_| ApiError::LabelFileNotFound(path.display().to_string()))?;

    let labels: Vec<String> =
        serde_json::from_str(&raw).map_err(|source| ApiError::MalformedLabelFile {
            path: path.display().to_string(),
            source,
        })?;

    info!(path = %path.display(), count = labels.len(), "loaded label file");

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn label_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_labels_preserves_order() {
        let file = label_file(r#"["Billing", "Technical Issue", "Account", "Other"]"#);

        let labels = load_labels(file.path()).unwrap();
        assert_eq!(labels, vec!["Billing", "Technical Issue", "Account", "Other"]);
    }

    #[test]
    fn test_load_labels_empty_array() {
        let file = label_file("[]");

        let labels = load_labels(file.path()).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_load_labels_missing_file() {
        let result = load_labels("does_not_exist.json");
        match result {
            Err(ApiError::LabelFileNotFound(_)) => {}
            other => panic!("Expected LabelFileNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_load_labels_malformed_json() {
        let file = label_file(r#"{"not": "an array"}"#);

        let result = load_labels(file.path());
        match result {
            Err(ApiError::MalformedLabelFile { .. }) => {}
            other => panic!("Expected MalformedLabelFile, got: {other:?}"),
        }
    }
}
