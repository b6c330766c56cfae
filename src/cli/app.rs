//! CLI module for the daybook application
//!
//! This module handles the command-line interface for reading and writing
//! journals through the journal store.
use std::{
    fs::{self, read_to_string},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::NaiveDate;
use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{
    codec, parse_date, pretty_timestamp, time_label, title_case, Clock, Commands, Config,
    Journal, JournalError, JournalStore, RenderMode, Result,
};

/// CLI Application handler - processes CLI commands and interfaces with JournalStore
pub struct App {
    /// The journal directory
    store: JournalStore,

    /// Application configuration
    config: Config,

    /// Where configuration changes are written
    config_path: PathBuf,

    /// Source of "today" and entry time labels
    clock: Box<dyn Clock>,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given config and clock
    pub fn new(config: Config, config_path: PathBuf, clock: Box<dyn Clock>, verbose: bool) -> Self {
        Self {
            store: JournalStore::new(&config),
            config,
            config_path,
            clock,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List => self.list_journals()?,
            Commands::New { name } => self.create_journal(&name)?,
            Commands::Delete { name, force } => self.handle_delete(&name, force)?,
            Commands::Add { name, text, file } => self.handle_add(&name, text, file)?,
            Commands::Edit { name, text, file } => self.handle_edit(&name, text, file)?,
            Commands::Read {
                name,
                date,
                random,
                mode,
            } => self.handle_read(&name, date, random, mode)?,
            Commands::Dates { name } => self.list_dates(&name)?,
            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    fn list_journals(&self) -> Result<()> {
        let journals = self.store.list()?;

        if journals.is_empty() {
            println!(
                "No journals found in {}",
                self.store.journals_dir().display()
            );
            return Ok(());
        }

        for journal in &journals {
            println!("{}", console::style(title_case(&journal.name)).bold());
            println!("  Last Modified: {}", pretty_timestamp(&journal.modified));
            if let Some(created) = &journal.created {
                println!("  Created Date:  {}", pretty_timestamp(created));
            }
            if self.verbose {
                println!("  File:          {}", journal.path.display());
            }
        }

        println!(
            "\nFound {} journal{}",
            journals.len(),
            if journals.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn create_journal(&self, name: &str) -> Result<()> {
        let existed = self.store.exists(name)?;
        let journal = self.store.open(name, self.clock.as_ref())?;

        if existed {
            println!("Journal '{}' already exists", title_case(journal.name()));
        } else {
            println!(
                "Journal '{}' created at {}",
                title_case(journal.name()),
                journal.path().display()
            );
        }
        Ok(())
    }

    fn handle_delete(&self, name: &str, force: bool) -> Result<()> {
        if !self.store.exists(name)? {
            return Err(JournalError::JournalNotFound {
                name: name.trim().to_lowercase(),
            });
        }

        // Show what will be lost and ask for confirmation (unless force flag is set)
        if !force {
            let journal = self.store.open(name, self.clock.as_ref())?;
            let entry_count: usize = journal.entries().values().map(Vec::len).sum();

            println!(
                "Journal {} will be deleted ({} entries across {} days).",
                title_case(journal.name()),
                entry_count,
                journal.entries().len()
            );
            print!("Proceed? [y/N]: ");
            stdout().flush().map_err(JournalError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(JournalError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.store.delete(name)?;
        println!("Journal '{}' has been deleted.", title_case(name.trim()));
        Ok(())
    }

    fn handle_add(&self, name: &str, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
        let mut journal = self.store.open(name, self.clock.as_ref())?;

        // Get entry text from the provided options, or from the editor
        let entry = match resolve_text(text, file)? {
            Some(entry) => entry,
            None => self.open_editor_with_content("")?,
        };

        // Blank text is ignored by the journal itself
        let label = time_label(&self.clock.now());
        if journal.add_entry(&entry, &label)? {
            println!(
                "Entry added to {} at {}",
                title_case(journal.name()),
                label
            );
        } else {
            println!("Nothing to add: the entry is empty.");
        }
        Ok(())
    }

    fn handle_edit(&self, name: &str, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
        let mut journal = self.store.open(name, self.clock.as_ref())?;
        // Step 1: Today's entries as one editable text
        let today = journal.today();
        let current = journal.get_entries(today, &self.config.theme.color_primary, RenderMode::Edit)?;

        // Step 2: Get the replacement; an untouched editor buffer is a discard
        let new_text = match resolve_text(text, file)? {
            Some(new_text) => new_text,
            None => {
                let edited = self.open_editor_with_content(&current)?;
                if edited.trim() == current.trim() {
                    println!("No changes made; today's entries were left as they were.");
                    return Ok(());
                }
                edited
            }
        };

        // Step 3: Replace the whole day
        journal.edit_entry(&new_text, &time_label(&self.clock.now()))?;

        if codec::is_blank(&new_text) {
            println!("Cleared today's entries in {}", title_case(journal.name()));
        } else {
            println!("Today's entries in {} updated", title_case(journal.name()));
        }
        Ok(())
    }

    fn handle_read(
        &self,
        name: &str,
        date: Option<String>,
        random: bool,
        mode: RenderMode,
    ) -> Result<()> {
        let journal = self.store.open(name, self.clock.as_ref())?;

        // Step 1: Work out which day was asked for
        let requested = if random {
            journal
                .random_date(&mut rand::thread_rng())
                .unwrap_or_else(|| journal.today())
        } else {
            match date {
                Some(value) => parse_date(&value)?,
                None => journal.today(),
            }
        };

        // Step 2: Snap to a recorded day if that one has no key
        let date = resolve_read_date(&journal, requested)?;
        if date != requested {
            info!("No entries on {}, showing {}", requested, date);
        }

        // Step 3: Render and print
        let rendered = journal.get_entries(date, &self.config.theme.color_primary, mode)?;

        println!("{}", console::style(date.format("%A, %B %-d, %Y")).bold());
        if rendered.is_empty() {
            println!("(no entries)");
        } else {
            println!("{}", rendered);
        }
        Ok(())
    }

    fn list_dates(&self, name: &str) -> Result<()> {
        let journal = self.store.open(name, self.clock.as_ref())?;

        for (date, records) in journal.entries() {
            let line = format!(
                "{}  {} entr{}",
                date,
                records.len(),
                if records.len() == 1 { "y" } else { "ies" }
            );
            if *date == journal.today() {
                println!("{}", console::style(format!("{} (today)", line)).cyan());
            } else {
                println!("{}", line);
            }
        }
        Ok(())
    }

    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        let nothing_requested = !reset && set.is_none();

        if reset {
            self.config = Config::default();
            self.config.save(&self.config_path)?;
            println!("Configuration reset to defaults");
        }

        if let Some(assignment) = set {
            let (key, value) =
                assignment
                    .split_once('=')
                    .ok_or_else(|| JournalError::ConfigError {
                        message: format!("Expected key=value, got: {}", assignment),
                    })?;
            self.config.set(key, value)?;
            self.config.save(&self.config_path)?;
            println!("Updated {}", key.trim());
        }

        if show || nothing_requested {
            println!("# {}", self.config_path.display());
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }

    fn open_editor_with_content(&self, existing_content: &str) -> Result<String> {
        let temp_file = Builder::new().prefix("daybook-").suffix(".txt").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        fs::write(&temp_path, existing_content)?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor '{}' for entry text", editor_cmd);
        launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path).map_err(JournalError::Io)?;
        Ok(strip_trailing_newline(content))
    }
}

/// Finds the day to show for `requested`.
///
/// Searches away from today first (later dates forward, earlier dates
/// backward), then the opposite way.
fn resolve_read_date(journal: &Journal, requested: NaiveDate) -> Result<NaiveDate> {
    let today = journal.today();
    let (first, second) = if requested > today {
        (journal.nearest_date_after(requested), journal.nearest_date_before(requested))
    } else {
        (journal.nearest_date_before(requested), journal.nearest_date_after(requested))
    };

    first
        .or(second)
        .ok_or(JournalError::DateNotFound { date: requested })
}

/// Picks the entry text from `--text` or `--file`. `None` means neither was
/// given and the editor should be used.
fn resolve_text(text: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (text, file) {
        (Some(_), Some(_)) => Err(JournalError::ApplicationError {
            message: "Cannot specify both --text and --file options".to_string(),
        }),
        (Some(text), None) => Ok(Some(text)),
        (None, Some(path)) => read_content_from_file(&path).map(Some),
        (None, None) => Ok(None),
    }
}

fn read_content_from_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(JournalError::ApplicationError {
            message: format!("Not a file: {}", path.display()),
        });
    }

    // Text files end with a newline that isn't part of the entry
    let content = read_to_string(path).map_err(JournalError::Io)?;
    Ok(strip_trailing_newline(content))
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| JournalError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(JournalError::EditorError {
            message: "Empty editor command".to_string(),
        });
    };

    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| JournalError::EditorError {
            message: format!("Failed to execute editor command: {}", e),
        })?;

    if !status.success() {
        return Err(JournalError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Editors and text files usually end with a newline the user never typed.
fn strip_trailing_newline(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}
