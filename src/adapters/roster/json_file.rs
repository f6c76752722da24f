//! JSON file roster source.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::matching::Roster;
use crate::ports::{RosterSource, RosterSourceError};

/// Reads the roster from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRosterSource {
    path: PathBuf,
}

impl JsonFileRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RosterSource for JsonFileRosterSource {
    async fn load(&self) -> Result<Roster, RosterSourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RosterSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let roster = Roster::from_json_str(&contents)?;
        tracing::info!(
            path = %self.path.display(),
            therapists = roster.len(),
            skipped = roster.skipped().len(),
            "Roster loaded"
        );
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn loads_roster_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "adam", "name": "Adam", "specialties": ["Anxiety"], "modality": "either", "photoFilename": "adam.jpg"}},
                {{"id": "", "name": "Nobody", "modality": "online"}}]"#
        )
        .unwrap();

        let roster = JsonFileRosterSource::new(file.path()).load().await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.skipped().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileRosterSource::new(dir.path().join("absent.json"));

        assert!(matches!(
            source.load().await,
            Err(RosterSourceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn non_array_file_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"therapists": []}}"#).unwrap();

        assert!(matches!(
            JsonFileRosterSource::new(file.path()).load().await,
            Err(RosterSourceError::Malformed(_))
        ));
    }
}
