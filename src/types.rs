//! Core data structures for the daybook application.
//!
//! This module contains the shared result alias, rendering and persistence
//! modes, journal listing summaries and the CLI subcommands.
use std::{fmt, path::PathBuf};

use chrono::{DateTime, Local};
use clap::{Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::JournalError;

/// A specialized Result type for daybook operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// How a day's entries are rendered by `Journal::get_entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Styled time headings followed by the encoded entry markup
    Read,
    /// Plain text suitable for an editing buffer
    Edit,
}

// Used by clap to show the default value in `--help`
impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Read => write!(f, "read"),
            RenderMode::Edit => write!(f, "edit"),
        }
    }
}

/// How a journal file is written on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and rewrite the file in place. A crash mid-write can leave a
    /// corrupt file.
    #[default]
    Overwrite,
    /// Write a temporary sibling file and rename it over the journal.
    Atomic,
}

/// Directory listing entry for one journal file.
#[derive(Debug, Clone)]
pub struct JournalSummary {
    /// Normalized journal name
    pub name: String,
    /// Path of the backing file
    pub path: PathBuf,
    /// Last modification time of the file
    pub modified: DateTime<Local>,
    /// Creation time, when the filesystem records one
    pub created: Option<DateTime<Local>>,
}

/// Available subcommands for the daybook application
#[derive(Subcommand)]
pub enum Commands {
    /// List journals, most recently modified first
    List,

    /// Create a journal (opens it if it already exists)
    New {
        /// Name of the journal
        name: String,
    },

    /// Delete a journal and all of its entries
    Delete {
        /// Name of the journal to delete
        name: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Add an entry to today's page
    Add {
        /// Name of the journal
        name: String,

        /// Entry text; opens the editor when neither --text nor --file is given
        #[clap(short, long)]
        text: Option<String>,

        /// Path to a file containing the entry text
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Rewrite today's page as a single edited entry
    Edit {
        /// Name of the journal
        name: String,

        /// Replacement text; opens the editor when neither --text nor --file is given
        #[clap(short, long)]
        text: Option<String>,

        /// Path to a file containing the replacement text
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the entries of one day
    Read {
        /// Name of the journal
        name: String,

        /// Date to read (YYYY-MM-DD), defaults to today
        #[clap(short, long)]
        date: Option<String>,

        /// Open a randomly picked day instead
        #[clap(short, long, conflicts_with = "date")]
        random: bool,

        /// Output rendering
        #[clap(short, long, value_enum, default_value_t = RenderMode::Edit)]
        mode: RenderMode,
    },

    /// List the dates of a journal with their entry counts
    Dates {
        /// Name of the journal
        name: String,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
