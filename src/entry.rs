//! The entry record stored under each date of a journal.
use serde::{Deserialize, Serialize};

use crate::codec;

/// Suffix appended to the time label of a record produced by an edit.
pub const EDITED_SUFFIX: &str = " (Edited)";

/// One timestamped entry. Serialized as a `[text, time_label]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct EntryRecord {
    /// Encoded entry text, as produced by [`codec::encode`]
    pub text: String,
    /// Short time-of-day label, e.g. `3:45 PM`
    pub time_label: String,
}

impl EntryRecord {
    /// Encodes `raw` and pairs it with `time_label`.
    pub fn new(raw: &str, time_label: &str) -> Self {
        EntryRecord {
            text: codec::encode(raw),
            time_label: time_label.to_string(),
        }
    }

    /// Builds the record that replaces a day's entries on edit.
    pub fn edited(raw: &str, time_label: &str) -> Self {
        Self::new(raw, &format!("{time_label}{EDITED_SUFFIX}"))
    }

    /// The entry text as the user typed it.
    pub fn plain_text(&self) -> String {
        codec::decode(&self.text)
    }

    pub fn is_edited(&self) -> bool {
        self.time_label.ends_with(EDITED_SUFFIX)
    }
}

impl From<(String, String)> for EntryRecord {
    fn from((text, time_label): (String, String)) -> Self {
        EntryRecord { text, time_label }
    }
}

impl From<EntryRecord> for (String, String) {
    fn from(record: EntryRecord) -> Self {
        (record.text, record.time_label)
    }
}
