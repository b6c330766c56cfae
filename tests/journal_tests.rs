use std::fs;

use chrono::NaiveDate;
use daybook::{
    codec, EntryRecord, FixedClock, JournalError, JournalStore, RenderMode, WriteMode,
};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn setup() -> (TempDir, JournalStore, FixedClock) {
    let dir = TempDir::new().unwrap();
    let store = JournalStore::with_dir(dir.path().join("Journals"), WriteMode::Overwrite);
    (dir, store, FixedClock::on(today()))
}

#[test]
fn test_add_entry_on_fresh_journal() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("Diary", &clock).unwrap();
    assert!(journal.entries_on(today()).unwrap().is_empty());

    journal.add_entry("hello", "3:00 PM").unwrap();

    assert_eq!(
        journal.entries_on(today()).unwrap(),
        &[EntryRecord {
            text: "<textarea>hello</textarea><br>".to_string(),
            time_label: "3:00 PM".to_string(),
        }]
    );
    assert_eq!(
        fs::read_to_string(journal.path()).unwrap(),
        r#"{"2024-05-01":[["<textarea>hello</textarea><br>","3:00 PM"]]}"#
    );
}

#[test]
fn test_blank_add_leaves_file_untouched() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("diary", &clock).unwrap();
    journal.add_entry("existing", "8:00 AM").unwrap();
    let before = fs::read(journal.path()).unwrap();

    assert!(!journal.add_entry("   \n ", "9:00 AM").unwrap());

    assert_eq!(journal.entries_on(today()).unwrap().len(), 1);
    assert_eq!(fs::read(journal.path()).unwrap(), before);
}

#[test]
fn test_edit_replaces_whole_day() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("diary", &clock).unwrap();
    journal.add_entry("one", "1:00 PM").unwrap();
    journal.add_entry("two", "2:00 PM").unwrap();
    journal.add_entry("three", "3:00 PM").unwrap();

    journal.edit_entry("line1\nline2", "4:00 PM").unwrap();

    assert_eq!(
        journal.entries_on(today()).unwrap(),
        &[EntryRecord {
            text: "<textarea>line1</textarea><br><textarea>line2</textarea><br>".to_string(),
            time_label: "4:00 PM (Edited)".to_string(),
        }]
    );

    let text = journal.get_entries(today(), "#ffc800", RenderMode::Edit).unwrap();
    assert_eq!(text, "line1\nline2");

    // Feeding the edit text back through the codec is stable
    assert_eq!(codec::decode(&codec::encode(&text)), text);
}

#[test]
fn test_edit_to_blank_clears_and_persists() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("diary", &clock).unwrap();
    journal.add_entry("something", "1:00 PM").unwrap();

    journal.edit_entry("   ", "2:00 PM").unwrap();
    assert!(journal.entries_on(today()).unwrap().is_empty());

    let reopened = store.open("diary", &clock).unwrap();
    assert!(reopened.entries_on(today()).unwrap().is_empty());
}

#[test]
fn test_reopen_preserves_file_bytes() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("diary", &clock).unwrap();
    journal.add_entry("first <entry>", "9:00 AM").unwrap();
    journal.add_entry("second\nentry", "9:30 AM").unwrap();
    let before = fs::read(journal.path()).unwrap();

    let reopened = store.open("DIARY ", &clock).unwrap();
    let again = store.open("diary", &clock).unwrap();

    assert_eq!(fs::read(reopened.path()).unwrap(), before);
    assert_eq!(reopened.entries(), journal.entries());
    assert_eq!(again.entries(), journal.entries());
}

#[test]
fn test_new_day_gets_empty_key_without_rewriting() {
    let (_dir, store, clock) = setup();
    let mut journal = store.open("diary", &clock).unwrap();
    journal.add_entry("yesterday's news", "11:00 PM").unwrap();
    let before = fs::read(journal.path()).unwrap();

    let tomorrow = today().succ_opt().unwrap();
    let next_day = store.open("diary", &FixedClock::on(tomorrow)).unwrap();

    assert_eq!(next_day.today(), tomorrow);
    assert!(next_day.entries_on(tomorrow).unwrap().is_empty());
    assert_eq!(next_day.entries_on(today()).unwrap().len(), 1);
    assert_eq!(fs::read(next_day.path()).unwrap(), before);
}

#[test]
fn test_reads_files_with_spaced_separators() {
    let (_dir, store, clock) = setup();
    store.ensure_dir().unwrap();
    fs::write(
        store.journal_path("legacy").unwrap(),
        r#"{"2023-12-31": [["<textarea>old</textarea><br>", "11:59 PM"]]}"#,
    )
    .unwrap();

    let journal = store.open("legacy", &clock).unwrap();
    let old = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

    assert_eq!(journal.dates().collect::<Vec<_>>(), vec![old, today()]);
    assert_eq!(
        journal.get_entries(old, "red", RenderMode::Read).unwrap(),
        "<h4 style=\"text-decoration: underline; color: red\">11:59 PM</h4>\
         <textarea>old</textarea><br>"
    );
}

#[test]
fn test_missing_date_is_an_error() {
    let (_dir, store, clock) = setup();
    let journal = store.open("diary", &clock).unwrap();

    let result = journal.get_entries(
        NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
        "red",
        RenderMode::Read,
    );
    assert!(matches!(result, Err(JournalError::DateNotFound { .. })));
}

#[test]
fn test_invalid_names_are_rejected_before_touching_disk() {
    let (_dir, store, clock) = setup();

    assert!(matches!(
        store.open("  ", &clock),
        Err(JournalError::InvalidName { .. })
    ));
    assert!(matches!(
        store.open("../escape", &clock),
        Err(JournalError::InvalidName { .. })
    ));
    assert!(!store.journals_dir().exists());
}

#[test]
fn test_unwritable_location_is_an_io_error() {
    let (dir, _store, clock) = setup();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let store = JournalStore::with_dir(blocker, WriteMode::Overwrite);
    assert!(matches!(
        store.open("diary", &clock),
        Err(JournalError::DirectoryError { .. }) | Err(JournalError::Io(_))
    ));
}
