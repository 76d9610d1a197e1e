//! Integration tests for document lifecycle, external edits, and loading

use anyhow::Result;
use std::thread;

use bibworks_editor::{
    edit_channel, load_channel, DocumentStore, EditorConfig, Entry, HeadlessView, IncomingEdit,
    LoadOutcome, DEFAULT_CONFIG_NAME,
};

fn quick_config() -> EditorConfig {
    EditorConfig {
        undo_delay_ms: 0,
        ..EditorConfig::default()
    }
}

#[test]
fn test_store_lifecycle_with_save_as() -> Result<()> {
    let mut view = HeadlessView;
    let mut store = DocumentStore::new(quick_config());

    // Fresh document, edited
    let name = {
        let doc = store.new_document();
        let id = doc.add_empty_item(&mut view)?;
        doc.edit_field(&id, "title", Some("Draft".to_string()), &mut view)?;
        doc.name().to_string()
    };
    assert!(store.get(&name).unwrap().is_dirty());
    assert!(store.get(&name).unwrap().created());

    // Save-as: rename first, then pin the save point
    store.rename(&name, "thesis.bib")?;
    assert!(store.get(&name).is_none());
    let doc = store.get_mut("thesis.bib").unwrap();
    doc.mark_saved(&mut view);
    assert!(!doc.is_dirty());
    assert!(!doc.created());

    // Undo still works across the rename, and marks the document dirty again
    assert!(doc.undo(&mut view)?);
    assert!(doc.is_dirty());

    let closed = store.close("thesis.bib")?;
    assert!(closed.is_dirty());
    assert!(store.is_empty());
    Ok(())
}

#[test]
fn test_external_edits_arrive_through_the_queue() -> Result<()> {
    let mut view = HeadlessView;
    let mut store = DocumentStore::new(quick_config());
    let doc = store.open(LoadOutcome {
        name: "library.bib".to_string(),
        entries: vec![
            Entry::new("article").with_field("ID", "a").with_field("title", "Alpha"),
            Entry::new("article").with_field("ID", "b").with_field("title", "Beta"),
        ],
    });
    let ids: Vec<_> = doc.bibliography().iter().map(|i| i.id().clone()).collect();

    let (sender, inbox) = edit_channel();

    // A background fetcher rewrites one record and re-sends another
    // unchanged; only the real change may enter history
    let worker = {
        let sender = sender.clone();
        let first = ids[0].clone();
        let second = ids[1].clone();
        thread::spawn(move || {
            sender.send(IncomingEdit {
                item: first,
                entry: Entry::new("article")
                    .with_field("ID", "a")
                    .with_field("title", "Alpha")
                    .with_field("doi", "10.1000/alpha"),
            });
            sender.send(IncomingEdit {
                item: second,
                entry: Entry::new("article").with_field("ID", "b").with_field("title", "Beta"),
            });
        })
    };
    worker.join().unwrap();

    // Drained on the owning thread, through the normal replace path
    let applied = inbox.drain(doc, &mut view)?;
    assert_eq!(applied, 1);
    assert_eq!(doc.bibliography().field(&ids[0], "doi"), Ok(Some("10.1000/alpha")));
    assert_eq!(doc.history().len(), 2);

    // The external edit is a regular undo step
    assert!(doc.undo(&mut view)?);
    assert_eq!(doc.bibliography().field(&ids[0], "doi"), Ok(None));
    Ok(())
}

#[test]
fn test_background_load_feeds_the_store() -> Result<()> {
    let mut view = HeadlessView;
    let mut store = DocumentStore::new(quick_config());
    let (notifier, signal) = load_channel();

    // Parsing happens off-thread; the owner just waits for the outcome
    thread::spawn(move || {
        let entries = vec![
            Entry::new("article").with_field("ID", "x").with_field("title", "Parsed"),
        ];
        notifier.resolve(LoadOutcome {
            name: "loaded.bib".to_string(),
            entries,
        });
    });

    let outcome = signal.wait()?;
    let doc = store.open(outcome);
    assert_eq!(doc.name(), "loaded.bib");
    assert_eq!(doc.bibliography().len(), 1);
    assert!(!doc.is_dirty());

    // The loaded document is immediately editable and undoable
    let id = doc.bibliography().iter().next().unwrap().id().clone();
    doc.edit_field(&id, "title", Some("Edited".to_string()), &mut view)?;
    assert!(doc.undo(&mut view)?);
    assert_eq!(doc.bibliography().field(&id, "title"), Ok(Some("Parsed")));
    Ok(())
}

#[test]
fn test_key_generation_avoids_collisions_in_document() -> Result<()> {
    let mut view = HeadlessView;
    let mut store = DocumentStore::new(quick_config());
    let doc = store.open(LoadOutcome {
        name: "keys.bib".to_string(),
        entries: vec![
            Entry::new("article")
                .with_field("ID", "knuth1984")
                .with_field("author", "Knuth, Donald E.")
                .with_field("year", "1984"),
            Entry::new("article")
                .with_field("author", "Knuth, Donald E.")
                .with_field("year", "1984"),
        ],
    });
    let ids: Vec<_> = doc.bibliography().iter().map(|i| i.id().clone()).collect();
    assert!(doc.bibliography().has_empty_keys());

    // The second record cannot take the key the first already holds
    assert!(doc.generate_key(&ids[1], &mut view)?);
    assert_eq!(doc.bibliography().field(&ids[1], "ID"), Ok(Some("knuth1984a")));
    assert!(!doc.bibliography().has_empty_keys());
    assert!(doc.bibliography().duplicate_keys().is_empty());

    // Key assignment is an undoable edit like any other
    assert!(doc.undo(&mut view)?);
    assert_eq!(doc.bibliography().field(&ids[1], "ID"), Ok(None));
    Ok(())
}

#[test]
fn test_delete_many_is_one_history_entry() -> Result<()> {
    let mut view = HeadlessView;
    let mut store = DocumentStore::new(quick_config());
    let doc = store.open(LoadOutcome {
        name: "bulk.bib".to_string(),
        entries: (0..5).map(|i| Entry::new("misc").with_field("ID", &format!("m{}", i))).collect(),
    });
    let ids: Vec<_> = doc.bibliography().iter().map(|i| i.id().clone()).collect();

    doc.delete_items(&ids[1..4], &mut view)?;
    assert_eq!(doc.bibliography().visible().count(), 2);
    assert_eq!(doc.history().len(), 2);

    // Restoring a hidden subset is its own recorded change
    doc.restore_items(&ids[2..3], &mut view)?;
    assert_eq!(doc.bibliography().visible().count(), 3);
    assert_eq!(doc.history().len(), 3);

    // Undo twice returns to the fully visible state
    assert!(doc.undo(&mut view)?);
    assert!(doc.undo(&mut view)?);
    assert_eq!(doc.bibliography().visible().count(), 5);
    Ok(())
}

#[test]
fn test_config_file_drives_coalescing() -> Result<()> {
    let mut view = HeadlessView;

    // A project directory with a long undo delay configured
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_NAME),
        r#"{ "undoDelayMs": 600000, "defaultKind": "techreport" }"#,
    )?;

    let config = EditorConfig::load(dir.path())?;
    let mut store = DocumentStore::new(config);
    let doc = store.new_document();

    // The configured default kind shapes fresh records
    let id = doc.add_empty_item(&mut view)?;
    assert_eq!(
        doc.bibliography().get(&id).unwrap().entry().kind(),
        Some("techreport")
    );

    // And the configured window merges this burst into one step
    doc.edit_field(&id, "title", Some("T1".to_string()), &mut view)?;
    doc.edit_field(&id, "title", Some("T12".to_string()), &mut view)?;
    assert_eq!(doc.history().len(), 3); // show + one merged edit
    assert!(doc.undo(&mut view)?);
    assert_eq!(doc.bibliography().field(&id, "title"), Ok(None));
    Ok(())
}
