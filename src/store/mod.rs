//! Config store module
//!
//! Owns the single JSON document at `<data-dir>/apps-config.json`: the
//! list of configured applications plus background appearance. The
//! document is replaced wholesale on every save; no other component
//! writes the file.

use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// Name of the persisted document inside the data directory
const CONFIG_FILE_NAME: &str = "apps-config.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config document must be a JSON object")]
    NotAnObject,

    #[error("config document is missing the \"applications\" field")]
    MissingApplications,

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Store for the application-config document
pub struct ConfigStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CONFIG_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    /// The document served before anything has been saved
    pub fn default_document() -> Value {
        json!({
            "applications": [],
            "background": {
                "mode": "wallpaper",
                "solidColor": "#202124",
                "gradientFrom": "#141e30",
                "gradientTo": "#243b55"
            }
        })
    }

    /// Validate the minimal schema: a JSON object containing `applications`.
    /// Application entries themselves are opaque pass-through JSON.
    pub fn validate(document: &Value) -> Result<(), StoreError> {
        let Some(object) = document.as_object() else {
            return Err(StoreError::NotAnObject);
        };
        if !object.contains_key("applications") {
            return Err(StoreError::MissingApplications);
        }
        Ok(())
    }

    /// Load the stored document. A missing file is not an error: the
    /// default document is served until the first save.
    pub async fn load(&self) -> Result<Value, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default_document()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse raw request bytes and persist them as the new document
    pub async fn save_bytes(&self, body: &[u8]) -> Result<(), StoreError> {
        let document: Value = serde_json::from_slice(body)?;
        self.save(&document).await
    }

    /// Persist a full replacement document.
    ///
    /// The document is validated, then written to a temporary file in
    /// the data directory and renamed over the target, so a failed save
    /// never leaves a half-written file or clobbers the previous one.
    /// Concurrent writers are serialized by the store's mutex.
    pub async fn save(&self, document: &Value) -> Result<(), StoreError> {
        Self::validate(document)?;
        let pretty = serde_json::to_string_pretty(document)?;

        let _guard = self.write_lock.lock().await;

        let dir = self.data_dir();
        fs::create_dir_all(dir).await?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(pretty.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        Ok(())
    }

    /// Path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn data_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> ConfigStore {
        ConfigStore::new(dir)
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let document = store.load().await.expect("load");
        assert_eq!(document, ConfigStore::default_document());
        assert_eq!(document["background"]["mode"], "wallpaper");
        assert_eq!(document["background"]["solidColor"], "#202124");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let document = json!({
            "applications": [{"name": "Jellyfin", "url": "http://nas:8096"}],
            "background": {"mode": "solid", "solidColor": "#000000"}
        });
        store.save(&document).await.expect("save");

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_saved_file_is_pretty_printed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        store
            .save(&json!({"applications": []}))
            .await
            .expect("save");

        let text = std::fs::read_to_string(store.path()).expect("read");
        assert!(text.contains("  \"applications\""));
    }

    #[tokio::test]
    async fn test_non_object_document_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let err = store.save(&json!([1, 2, 3])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_missing_applications_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let err = store
            .save(&json!({"background": {"mode": "solid"}}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingApplications));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_previous_document_intact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let original = json!({"applications": [{"name": "kept"}]});
        store.save(&original).await.expect("save");

        store.save(&json!({"nope": true})).await.unwrap_err();
        store.save_bytes(b"{ not json").await.unwrap_err();

        let loaded = store.load().await.expect("load");
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_save_creates_data_dir_recursively() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("state/homedock");
        let store = store_in(&nested);

        store
            .save(&json!({"applications": []}))
            .await
            .expect("save");
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_concurrent_saves_never_corrupt_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = std::sync::Arc::new(store_in(dir.path()));

        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = std::sync::Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                let document = json!({
                    "applications": [{"name": format!("app-{i}"), "slot": i}],
                    "background": {"mode": "wallpaper"}
                });
                store.save(&document).await
            }));
        }
        for task in tasks {
            task.await.expect("join").expect("save");
        }

        // Whatever write won, the file must parse and keep the schema
        let loaded = store.load().await.expect("load");
        assert!(loaded.get("applications").is_some());
    }
}
