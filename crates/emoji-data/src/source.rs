//! Loading the dataset from disk or over HTTP

use crate::{DataError, Dataset};
use std::path::Path;
use std::time::Duration;

/// Raw emojilib data (emoji → keyword list)
pub const DEFAULT_SOURCE_URL: &str = "https://unpkg.com/emojilib@^4.0.0";

/// Load a dataset from a JSON file
pub fn load(path: &Path) -> Result<Dataset, DataError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_json(&json)?;
    tracing::info!("Loaded {} emojis from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Fetch and process a dataset (blocking)
pub fn fetch(url: &str) -> Result<Dataset, DataError> {
    tracing::info!("Fetching emoji data from {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("emoji-finder/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let body = response.text()?;
    let dataset = Dataset::from_json(&body)?;
    tracing::info!("Fetched {} emojis", dataset.len());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"😀": "grinning face", "🐱": ["cat", "face"]}}"#).unwrap();

        let data = load(file.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.keywords("🐱"), Some("cat face"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_fetch_unreachable_is_error() {
        // Port 9 (discard) on localhost refuses connections
        assert!(fetch("http://127.0.0.1:9/emoji.json").is_err());
    }
}
