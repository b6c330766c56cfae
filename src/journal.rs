//! A single journal: a date-keyed log of entry records backed by one JSON file.
use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use log::{debug, error, info, trace};
use rand::{seq::SliceRandom, Rng};
use tempfile::NamedTempFile;

use crate::{codec, Clock, EntryRecord, JournalError, RenderMode, Result, WriteMode};

/// Entries of a journal, keyed by calendar date.
pub type EntryMap = BTreeMap<NaiveDate, Vec<EntryRecord>>;

/// Separator written after each record in edit rendering.
const EDIT_SEPARATOR: &str = "...\n";

/// Characters trimmed from the end of an edit rendering.
const EDIT_TRIM: usize = 5;

/// An open journal.
///
/// The whole file is held in memory. Every successful mutation rewrites the
/// backing file before returning.
#[derive(Debug, Clone)]
pub struct Journal {
    /// Normalized name, also the file name stem
    name: String,

    /// Backing file
    path: PathBuf,

    /// The date new entries are recorded under
    today: NaiveDate,

    /// Date to entries mapping
    entries: EntryMap,

    write_mode: WriteMode,
}

impl Journal {
    /// Opens the journal stored at `path`, creating an empty one if the file
    /// does not exist yet.
    ///
    /// Today's date (per `clock`) is guaranteed to be present in the loaded
    /// mapping. Opening never rewrites an existing file.
    ///
    /// # Arguments
    ///
    /// * `name` - The normalized journal name
    /// * `path` - Path of the backing JSON file
    /// * `clock` - Source of the current date
    /// * `write_mode` - How later saves write the file
    pub fn open(
        name: &str,
        path: &Path,
        clock: &dyn Clock,
        write_mode: WriteMode,
    ) -> Result<Self> {
        info!("Opening journal '{}' at {}", name, path.display());

        let mut journal = Journal {
            name: name.to_string(),
            path: path.to_path_buf(),
            today: clock.today(),
            entries: EntryMap::new(),
            write_mode,
        };

        if !path.exists() {
            debug!("Journal file does not exist, creating: {}", path.display());
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent).map_err(|e| {
                        error!("Failed to create directory {}: {}", parent.display(), e);
                        JournalError::Io(e)
                    })?;
                }
            }
            journal.save()?;
        }

        journal.entries = Self::load(path)?;
        journal.entries.entry(journal.today).or_default();

        debug!(
            "Journal '{}' loaded with {} dates",
            journal.name,
            journal.entries.len()
        );
        Ok(journal)
    }

    /// Reads and parses a journal file.
    fn load(path: &Path) -> Result<EntryMap> {
        trace!("Loading journal file: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read journal file {}: {}", path.display(), e);
            JournalError::Io(e)
        })?;

        let entries: EntryMap = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse journal file {}: {}", path.display(), e);
            JournalError::Serialization(e)
        })?;

        Ok(entries)
    }

    /// Serializes the whole mapping and writes it to the backing file.
    pub fn save(&self) -> Result<()> {
        trace!("Serializing journal '{}'", self.name);
        let json = serde_json::to_string(&self.entries).map_err(|e| {
            error!("Failed to serialize journal '{}': {}", self.name, e);
            JournalError::Serialization(e)
        })?;

        match self.write_mode {
            WriteMode::Overwrite => {
                fs::write(&self.path, json).map_err(|e| {
                    error!("Failed to write journal file {}: {}", self.path.display(), e);
                    JournalError::Io(e)
                })?;
            }
            WriteMode::Atomic => self.save_atomic(json.as_bytes())?,
        }

        debug!("Journal '{}' saved to {}", self.name, self.path.display());
        Ok(())
    }

    fn save_atomic(&self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file in {}: {}", dir.display(), e);
            JournalError::Io(e)
        })?;

        temp_file.write_all(bytes)?;
        temp_file.flush()?;

        temp_file.persist(&self.path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                self.path.display(),
                e.error
            );
            JournalError::Io(e.error)
        })?;

        Ok(())
    }

    /// Appends an entry to today's list and saves.
    ///
    /// Whitespace-only text is ignored without touching memory or disk.
    /// Returns whether an entry was recorded.
    pub fn add_entry(&mut self, text: &str, time_label: &str) -> Result<bool> {
        if codec::is_blank(text) {
            debug!("Ignoring blank entry for journal '{}'", self.name);
            return Ok(false);
        }

        self.entries
            .entry(self.today)
            .or_default()
            .push(EntryRecord::new(text, time_label));
        self.save()?;

        info!("Added entry to '{}' for {}", self.name, self.today);
        Ok(true)
    }

    /// Replaces all of today's entries with a single edited record.
    ///
    /// Blank text clears today's list. Both cases are saved.
    pub fn edit_entry(&mut self, new_text: &str, time_label: &str) -> Result<()> {
        let replacement = if codec::is_blank(new_text) {
            Vec::new()
        } else {
            vec![EntryRecord::edited(new_text, time_label)]
        };

        self.entries.insert(self.today, replacement);
        self.save()?;

        info!("Rewrote entries of '{}' for {}", self.name, self.today);
        Ok(())
    }

    /// Renders the entries recorded on `date`.
    ///
    /// In read mode each record becomes an underlined heading with its time
    /// label in `color`, followed by the encoded text. In edit mode the records
    /// are decoded and separated by `...` lines.
    pub fn get_entries(&self, date: NaiveDate, color: &str, mode: RenderMode) -> Result<String> {
        let records = self
            .entries
            .get(&date)
            .ok_or(JournalError::DateNotFound { date })?;

        let rendered: String = match mode {
            RenderMode::Read => records
                .iter()
                .map(|record| {
                    format!(
                        "<h4 style=\"text-decoration: underline; color: {}\">{}</h4>{}",
                        color, record.time_label, record.text
                    )
                })
                .collect(),
            RenderMode::Edit => {
                let combined: String = records
                    .iter()
                    .map(|record| codec::strip_markup(&record.text) + EDIT_SEPARATOR)
                    .collect();
                drop_last_chars(&combined, EDIT_TRIM).to_string()
            }
        };

        Ok(rendered)
    }

    /// Finds the closest date with a key when `requested` has none.
    ///
    /// Searches forward when `requested` is after `reference`, backward
    /// otherwise. Returns `requested` itself if it has a key.
    pub fn nearest_date(&self, requested: NaiveDate, reference: NaiveDate) -> Option<NaiveDate> {
        if requested > reference {
            self.nearest_date_after(requested)
        } else {
            self.nearest_date_before(requested)
        }
    }

    /// The first date with a key on or after `date`.
    pub fn nearest_date_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.entries.range(date..).next().map(|(date, _)| *date)
    }

    /// The last date with a key on or before `date`.
    pub fn nearest_date_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.entries.range(..=date).next_back().map(|(date, _)| *date)
    }

    /// Picks any date with a key.
    pub fn random_date<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NaiveDate> {
        let dates: Vec<NaiveDate> = self.dates().collect();
        dates.choose(rng).copied()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The date new entries are recorded under.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The complete in-memory date to entries mapping.
    pub fn entries(&self) -> &EntryMap {
        &self.entries
    }

    pub fn entries_on(&self, date: NaiveDate) -> Option<&[EntryRecord]> {
        self.entries.get(&date).map(Vec::as_slice)
    }

    /// All dates with a key, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.keys().copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next_back().copied()
    }
}

/// Drops up to `count` trailing characters.
fn drop_last_chars(s: &str, count: usize) -> &str {
    match s.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}
