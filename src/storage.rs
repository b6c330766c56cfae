use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{Clock, Config, Journal, JournalError, JournalSummary, Result, WriteMode};

/// File name prefix of every journal file.
const FILE_PREFIX: &str = "jrn_";

/// File extension of every journal file.
const FILE_EXTENSION: &str = "json";

/// Characters a journal name may not contain, since it becomes a file name.
const FORBIDDEN_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Manages the directory that holds one file per journal.
pub struct JournalStore {
    /// Directory containing the journal files
    journals_dir: PathBuf,

    /// How opened journals write their files
    write_mode: WriteMode,
}

impl JournalStore {
    /// Creates a store over the journals directory named in `config`.
    ///
    /// The directory is created lazily, on the first journal opened.
    pub fn new(config: &Config) -> Self {
        Self::with_dir(config.journals_dir.clone(), config.write_mode)
    }

    pub fn with_dir(journals_dir: PathBuf, write_mode: WriteMode) -> Self {
        Self {
            journals_dir,
            write_mode,
        }
    }

    pub fn journals_dir(&self) -> &Path {
        &self.journals_dir
    }

    /// Makes sure the journals directory exists.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.journals_dir.exists() {
            debug!(
                "Journals directory does not exist, creating: {}",
                self.journals_dir.display()
            );
            fs::create_dir_all(&self.journals_dir).map_err(|e| {
                error!("Failed to create journals directory: {}", e);
                JournalError::DirectoryError {
                    path: self.journals_dir.clone(),
                }
            })?;
        }
        Ok(())
    }

    /// Opens the named journal, creating it on first use.
    pub fn open(&self, name: &str, clock: &dyn Clock) -> Result<Journal> {
        let name = normalize_name(name)?;
        self.ensure_dir()?;
        Journal::open(&name, &self.file_path(&name), clock, self.write_mode)
    }

    /// Path of the file backing the named journal.
    pub fn journal_path(&self, name: &str) -> Result<PathBuf> {
        let name = normalize_name(name)?;
        Ok(self.file_path(&name))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.journal_path(name)?.is_file())
    }

    fn file_path(&self, normalized: &str) -> PathBuf {
        self.journals_dir
            .join(format!("{FILE_PREFIX}{normalized}.{FILE_EXTENSION}"))
    }

    /// Lists every journal in the directory, most recently modified first.
    pub fn list(&self) -> Result<Vec<JournalSummary>> {
        if !self.journals_dir.exists() {
            return Ok(Vec::new());
        }

        let mut journals = Vec::new();

        for entry in WalkDir::new(&self.journals_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(name) = name_from_path(path) else {
                debug!("Skipping non-journal file: {}", path.display());
                continue;
            };

            match entry.metadata() {
                Ok(metadata) => {
                    let modified = metadata.modified().map_err(JournalError::Io)?;
                    journals.push(JournalSummary {
                        name,
                        path: path.to_path_buf(),
                        modified: to_local(modified),
                        created: metadata.created().ok().map(to_local),
                    });
                }
                Err(e) => warn!("Failed to read metadata of {}: {}", path.display(), e),
            }
        }

        journals.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(journals)
    }

    /// Deletes the named journal's file.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.journal_path(name)?;
        if !path.is_file() {
            return Err(JournalError::JournalNotFound {
                name: name.trim().to_lowercase(),
            });
        }

        fs::remove_file(&path).map_err(|e| {
            error!("Failed to delete journal file {}: {}", path.display(), e);
            JournalError::Io(e)
        })?;

        info!("Deleted journal file: {}", path.display());
        Ok(())
    }
}

/// Normalizes a journal name: trimmed and lower-cased.
///
/// Blank names and names that can't be a file name are rejected.
pub fn normalize_name(name: &str) -> Result<String> {
    let normalized = name.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(JournalError::InvalidName {
            name: name.to_string(),
            reason: "name can't be whitespace only".to_string(),
        });
    }

    if let Some(c) = normalized.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(JournalError::InvalidName {
            name: name.to_string(),
            reason: format!("name can't contain '{c}'"),
        });
    }

    Ok(normalized)
}

/// Extracts the journal name from a `jrn_<name>.json` path.
fn name_from_path(path: &Path) -> Option<String> {
    if !path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(FILE_PREFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn to_local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}
