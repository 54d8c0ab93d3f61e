// tests/event_classification.rs

mod common;
use crate::common::{at, init_tracing, mock_fs, root};

use std::path::PathBuf;

use notify::event::{
    AccessKind, CreateKind, DataChange, MetadataKind, ModifyKind, RemoveKind, RenameMode,
};
use notify::{Event, EventKind};

use sasstpl::engine::{PipelineEvent, coalesce_changes, merge_replaced_files};
use sasstpl::watch::{PatternSet, classify_event};

fn default_patterns() -> PatternSet {
    PatternSet::compile(
        &root(),
        &["./*.scss".to_string(), "./src/**/*.scss".to_string()],
    )
    .expect("patterns compile")
}

fn event(kind: EventKind, paths: &[PathBuf]) -> Event {
    paths
        .iter()
        .fold(Event::new(kind), |ev, p| ev.add_path(p.clone()))
}

#[test]
fn content_change_of_matched_file_is_a_change() {
    init_tracing();
    let (mock, fs) = mock_fs();
    mock.add_file(at("src/a.scss"), "");
    let patterns = default_patterns();

    let ev = event(
        EventKind::Modify(ModifyKind::Data(DataChange::Content)),
        &[at("src/a.scss")],
    );

    assert_eq!(
        classify_event(&ev, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileChanged(at("src/a.scss"))]
    );
}

#[test]
fn unmatched_paths_are_ignored() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("src/a.css"), "");
    mock.add_file(at("src/a-styles.css.js"), "");
    let patterns = default_patterns();

    for path in [at("src/a.css"), at("src/a-styles.css.js"), at("lib/x.scss")] {
        let ev = event(EventKind::Modify(ModifyKind::Any), &[path]);
        assert!(classify_event(&ev, &patterns, fs.as_ref()).is_empty());
    }
}

#[test]
fn create_and_remove_map_to_add_and_unlink() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("b.scss"), "");
    let patterns = default_patterns();

    let created = event(EventKind::Create(CreateKind::File), &[at("b.scss")]);
    assert_eq!(
        classify_event(&created, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileAdded(at("b.scss"))]
    );

    let removed = event(EventKind::Remove(RemoveKind::File), &[at("gone.scss")]);
    assert_eq!(
        classify_event(&removed, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileRemoved(at("gone.scss"))]
    );
}

#[test]
fn directory_events_request_a_rescan() {
    let (mock, fs) = mock_fs();
    mock.add_dir(at("src/components"));
    mock.add_dir(at("src/odd.scss"));
    let patterns = default_patterns();

    let created = event(EventKind::Create(CreateKind::Folder), &[at("src/components")]);
    assert_eq!(
        classify_event(&created, &patterns, fs.as_ref()),
        vec![PipelineEvent::DirectoryChanged(at("src/components"))]
    );

    // A directory named like a source is not a source.
    let any = event(EventKind::Create(CreateKind::Any), &[at("src/odd.scss")]);
    assert_eq!(
        classify_event(&any, &patterns, fs.as_ref()),
        vec![PipelineEvent::DirectoryChanged(at("src/odd.scss"))]
    );

    let removed = event(EventKind::Remove(RemoveKind::Folder), &[at("src/old")]);
    assert_eq!(
        classify_event(&removed, &patterns, fs.as_ref()),
        vec![PipelineEvent::DirectoryChanged(at("src/old"))]
    );

    // `mv components/ elsewhere/` as reported by inotify.
    let moved_out = event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), &[at("src/components")]);
    assert_eq!(
        classify_event(&moved_out, &patterns, fs.as_ref()),
        vec![PipelineEvent::DirectoryChanged(at("src/components"))]
    );

    let moved_in = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), &[at("src/components")]);
    assert_eq!(
        classify_event(&moved_in, &patterns, fs.as_ref()),
        vec![PipelineEvent::DirectoryChanged(at("src/components"))]
    );
}

#[test]
fn directories_outside_every_pattern_are_ignored() {
    let (mock, fs) = mock_fs();
    mock.add_dir(at("lib/deep"));
    let patterns = default_patterns();

    // `./*.scss` only reaches the root itself.
    let nested = event(EventKind::Create(CreateKind::Folder), &[at("lib/deep")]);
    assert!(classify_event(&nested, &patterns, fs.as_ref()).is_empty());

    // Deleting a plain file never looks like a directory.
    let file = event(EventKind::Remove(RemoveKind::File), &[at("src/a-styles.css.js")]);
    assert!(classify_event(&file, &patterns, fs.as_ref()).is_empty());
}

#[test]
fn rename_is_unlink_then_add() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("src/new.scss"), "");
    let patterns = default_patterns();

    let both = event(
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
        &[at("src/old.scss"), at("src/new.scss")],
    );
    assert_eq!(
        classify_event(&both, &patterns, fs.as_ref()),
        vec![
            PipelineEvent::FileRemoved(at("src/old.scss")),
            PipelineEvent::FileAdded(at("src/new.scss")),
        ]
    );

    // Renaming to a non-matching name only unlinks.
    let out = event(
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
        &[at("src/new.scss"), at("src/new.scss.bak")],
    );
    assert_eq!(
        classify_event(&out, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileRemoved(at("src/new.scss"))]
    );
}

#[test]
fn rename_halves_and_unknown_direction() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("here.scss"), "");
    let patterns = default_patterns();

    let from = event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), &[at("x.scss")]);
    assert_eq!(
        classify_event(&from, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileRemoved(at("x.scss"))]
    );

    let to = event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), &[at("here.scss")]);
    assert_eq!(
        classify_event(&to, &patterns, fs.as_ref()),
        vec![PipelineEvent::FileAdded(at("here.scss"))]
    );

    let any = event(
        EventKind::Modify(ModifyKind::Name(RenameMode::Any)),
        &[at("here.scss"), at("gone.scss")],
    );
    assert_eq!(
        classify_event(&any, &patterns, fs.as_ref()),
        vec![
            PipelineEvent::FileAdded(at("here.scss")),
            PipelineEvent::FileRemoved(at("gone.scss")),
        ]
    );
}

#[test]
fn access_and_permission_events_are_ignored() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("a.scss"), "");
    let patterns = default_patterns();

    let access = event(EventKind::Access(AccessKind::Any), &[at("a.scss")]);
    assert!(classify_event(&access, &patterns, fs.as_ref()).is_empty());

    let perms = event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
        &[at("a.scss")],
    );
    assert!(classify_event(&perms, &patterns, fs.as_ref()).is_empty());

    let touched = event(
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)),
        &[at("a.scss")],
    );
    assert_eq!(classify_event(&touched, &patterns, fs.as_ref()).len(), 1);
}

#[test]
fn consecutive_changes_coalesce_but_adds_and_removes_survive() {
    let batch = vec![
        PipelineEvent::FileChanged(at("a.scss")),
        PipelineEvent::FileChanged(at("b.scss")),
        PipelineEvent::FileAdded(at("c.scss")),
        PipelineEvent::FileChanged(at("c.scss")),
        PipelineEvent::FileChanged(at("a.scss")),
        PipelineEvent::FileRemoved(at("b.scss")),
        PipelineEvent::ShutdownRequested,
    ];

    assert_eq!(
        coalesce_changes(batch),
        vec![
            PipelineEvent::FileChanged(at("a.scss")),
            PipelineEvent::FileAdded(at("c.scss")),
            PipelineEvent::FileChanged(at("c.scss")),
            PipelineEvent::FileRemoved(at("b.scss")),
            PipelineEvent::ShutdownRequested,
        ]
    );
}

#[test]
fn replaced_source_becomes_a_single_change() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("a.scss"), "a{}");
    let patterns = default_patterns();

    // vim with `backupcopy=auto`: rename away, create anew, write.
    let raw = [
        event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), &[at("a.scss")]),
        event(EventKind::Create(CreateKind::File), &[at("a.scss")]),
        event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &[at("a.scss")],
        ),
    ];
    let classified: Vec<PipelineEvent> = raw
        .iter()
        .flat_map(|ev| classify_event(ev, &patterns, fs.as_ref()))
        .collect();
    assert_eq!(
        classified,
        vec![
            PipelineEvent::FileRemoved(at("a.scss")),
            PipelineEvent::FileAdded(at("a.scss")),
            PipelineEvent::FileChanged(at("a.scss")),
        ]
    );

    assert_eq!(
        coalesce_changes(merge_replaced_files(classified)),
        vec![PipelineEvent::FileChanged(at("a.scss"))]
    );
}

#[test]
fn unrelated_add_does_not_cancel_a_removal() {
    let batch = vec![
        PipelineEvent::FileRemoved(at("a.scss")),
        PipelineEvent::FileAdded(at("b.scss")),
        PipelineEvent::FileRemoved(at("c.scss")),
        PipelineEvent::FileAdded(at("c.scss")),
    ];

    assert_eq!(
        merge_replaced_files(batch),
        vec![
            PipelineEvent::FileRemoved(at("a.scss")),
            PipelineEvent::FileAdded(at("b.scss")),
            PipelineEvent::FileChanged(at("c.scss")),
        ]
    );
}
