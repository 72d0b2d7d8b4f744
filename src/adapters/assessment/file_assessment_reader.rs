//! File-based Assessment Reader Adapter
//!
//! Reads assessments from a directory. Each `*.json`, `*.yaml` or `*.yml`
//! file holds a list of records and becomes one source labelled by its
//! file stem.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::risk::{RecordSet, RiskRecord};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// Extensions tried, in order, when resolving a source label to a file.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Reads assessment record sets from a directory of JSON/YAML files
#[derive(Debug, Clone)]
pub struct FileAssessmentReader {
    directory: PathBuf,
}

impl FileAssessmentReader {
    /// Create a reader over a directory
    ///
    /// # Example
    /// ```ignore
    /// let reader = FileAssessmentReader::new("./assessments");
    /// ```
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// The directory being read
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn supported_extension(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        SUPPORTED_EXTENSIONS.iter().copied().find(|e| *e == ext)
    }

    /// Find the file backing a source label
    async fn resolve(&self, source: &str) -> Result<PathBuf, AssessmentReaderError> {
        for ext in SUPPORTED_EXTENSIONS {
            let path = self.directory.join(format!("{}.{}", source, ext));
            let exists = fs::try_exists(&path)
                .await
                .map_err(|e| AssessmentReaderError::Io(e.to_string()))?;
            if exists {
                return Ok(path);
            }
        }
        Err(AssessmentReaderError::NotFound(source.to_string()))
    }

    fn parse(
        source: &str,
        extension: &str,
        content: &str,
    ) -> Result<Vec<RiskRecord>, AssessmentReaderError> {
        let parsed = match extension {
            "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| AssessmentReaderError::Deserialization {
            source_label: source.to_string(),
            reason,
        })
    }
}

#[async_trait]
impl AssessmentReader for FileAssessmentReader {
    async fn list_sources(&self) -> Result<Vec<String>, AssessmentReaderError> {
        let mut entries = fs::read_dir(&self.directory).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssessmentReaderError::NotFound(self.directory.display().to_string())
            } else {
                AssessmentReaderError::Io(e.to_string())
            }
        })?;

        let mut sources = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AssessmentReaderError::Io(e.to_string()))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| AssessmentReaderError::Io(e.to_string()))?;
            if !file_type.is_file() {
                continue;
            }

            if Self::supported_extension(&path).is_none() {
                warn!(path = %path.display(), "Skipping file with unsupported extension");
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                sources.push(stem.to_string());
            }
        }

        sources.sort();
        let before = sources.len();
        sources.dedup();
        if sources.len() != before {
            warn!(
                directory = %self.directory.display(),
                "Several files share a stem; the first supported extension wins"
            );
        }

        debug!(
            directory = %self.directory.display(),
            count = sources.len(),
            "Listed assessment sources"
        );
        Ok(sources)
    }

    async fn load(&self, source: &str) -> Result<RecordSet, AssessmentReaderError> {
        let path = self.resolve(source).await?;
        let extension = Self::supported_extension(&path).unwrap_or("yaml");

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AssessmentReaderError::Io(e.to_string()))?;

        let records = Self::parse(source, extension, &content)?;

        debug!(
            source = %source,
            path = %path.display(),
            records = records.len(),
            "Loaded assessment"
        );
        Ok(RecordSet::new(source, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALICE_JSON: &str = r#"[
        {"Risk Drivers": "Process", "Sub Risk Drivers": "Cost Overruns",
         "Threshold": 100, "Unit": "%", "Status": 105, "Ranking": 3},
        {"category": "Process", "item": "IT System Failures", "threshold": 4, "status": 1}
    ]"#;

    const BOB_YAML: &str = "
- category: Upstream
  item: Supplier Delays
  threshold: 10
  status: 12
";

    async fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).await.unwrap();
    }

    #[tokio::test]
    async fn test_lists_supported_files_sorted_by_stem() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bob.yaml", BOB_YAML).await;
        write(&dir, "alice.json", ALICE_JSON).await;
        write(&dir, "notes.txt", "ignored").await;
        fs::create_dir(dir.path().join("nested.json")).await.unwrap();

        let reader = FileAssessmentReader::new(dir.path());
        let sources = reader.list_sources().await.unwrap();

        assert_eq!(sources, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[tokio::test]
    async fn test_loads_json_with_spreadsheet_headers() {
        let dir = TempDir::new().unwrap();
        write(&dir, "alice.json", ALICE_JSON).await;

        let reader = FileAssessmentReader::new(dir.path());
        let set = reader.load("alice").await.unwrap();

        assert_eq!(set.source.as_deref(), Some("alice"));
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].category.as_deref(), Some("Process"));
        assert_eq!(set.records[0].ranking, Some(3.0));
        assert_eq!(set.records[1].item.as_deref(), Some("IT System Failures"));
    }

    #[tokio::test]
    async fn test_loads_yaml() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bob.yml", BOB_YAML).await;

        let reader = FileAssessmentReader::new(dir.path());
        let set = reader.load("bob").await.unwrap();

        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].status, Some(12.0));
    }

    #[tokio::test]
    async fn test_load_all_follows_list_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bob.yaml", BOB_YAML).await;
        write(&dir, "alice.json", ALICE_JSON).await;

        let reader = FileAssessmentReader::new(dir.path());
        let sets = reader.load_all().await.unwrap();

        let labels: Vec<_> = sets.iter().map(|s| s.source.clone().unwrap()).collect();
        assert_eq!(labels, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_source_is_not_found() {
        let dir = TempDir::new().unwrap();
        let reader = FileAssessmentReader::new(dir.path());

        let result = reader.load("nobody").await;
        assert!(matches!(result, Err(AssessmentReaderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let reader = FileAssessmentReader::new(dir.path().join("absent"));

        let result = reader.list_sources().await;
        assert!(matches!(result, Err(AssessmentReaderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_names_source() {
        let dir = TempDir::new().unwrap();
        write(&dir, "carol.json", "{not json").await;

        let reader = FileAssessmentReader::new(dir.path());
        match reader.load("carol").await {
            Err(AssessmentReaderError::Deserialization { source_label, .. }) => {
                assert_eq!(source_label, "carol");
            }
            other => panic!("Expected Deserialization error, got {:?}", other),
        }
    }
}
