use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::task::Task;

/// On-disk key-value store under the data directory. One file per key:
/// two scalar preference keys, the task list as a single JSON document,
/// and the newsletter subscriber log.
#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub language_path: PathBuf,
    pub theme_path: PathBuf,
    pub tasks_path: PathBuf,
    pub subscribers_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let store = Self {
            language_path: data_dir.join("language.data"),
            theme_path: data_dir.join("theme.data"),
            tasks_path: data_dir.join("tasks.data"),
            subscribers_path: data_dir.join("subscribers.data"),
            data_dir,
        };

        info!(
            data_dir = %store.data_dir.display(),
            tasks = %store.tasks_path.display(),
            "opened datastore"
        );

        Ok(store)
    }

    /// `None` when the key was never written; callers fall back to defaults.
    #[tracing::instrument(skip(self))]
    pub fn load_language(&self) -> anyhow::Result<Option<String>> {
        read_scalar(&self.language_path)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_theme(&self) -> anyhow::Result<Option<String>> {
        read_scalar(&self.theme_path)
    }

    #[tracing::instrument(skip(self))]
    pub fn save_prefs(&self, language: &str, theme: &str) -> anyhow::Result<()> {
        save_atomic(&self.language_path, language.as_bytes())
            .context("failed to save language.data")?;
        save_atomic(&self.theme_path, theme.as_bytes()).context("failed to save theme.data")?;
        Ok(())
    }

    /// `None` when no list was ever persisted, which triggers first-run
    /// seeding upstream. An existing file always holds one JSON array.
    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Option<Vec<Task>>> {
        if !self.tasks_path.exists() {
            debug!(file = %self.tasks_path.display(), "no task list persisted yet");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.tasks_path)
            .with_context(|| format!("failed reading {}", self.tasks_path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing {}", self.tasks_path.display()))?;

        debug!(count = tasks.len(), "loaded task list");
        Ok(Some(tasks))
    }

    /// Full overwrite of the whole list after every mutation.
    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        debug!(count = tasks.len(), "saving task list");
        let serialized = serde_json::to_string(tasks)?;
        save_atomic(&self.tasks_path, serialized.as_bytes()).context("failed to save tasks.data")
    }

    #[tracing::instrument(skip(self))]
    pub fn append_subscriber(&self, email: &str) -> anyhow::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.subscribers_path)
            .with_context(|| format!("failed opening {}", self.subscribers_path.display()))?;
        writeln!(file, "{email}")
            .with_context(|| format!("failed writing {}", self.subscribers_path.display()))?;
        Ok(())
    }
}

fn read_scalar(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn save_atomic(path: &Path, payload: &[u8]) -> anyhow::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(payload)?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
