// tests/writer_notifications.rs

mod common;
use crate::common::fakes::RecordingNotifier;
use crate::common::{at, init_tracing, mock_fs};

use std::error::Error;
use std::sync::Arc;

use sasstpl::errors::RenderError;
use sasstpl::fs::{FileSystem, RealFileSystem};
use sasstpl::output::{Notifier, OutputWriter};

type TestResult = Result<(), Box<dyn Error>>;

fn writer_with_recorder(fs: Arc<dyn FileSystem>) -> (OutputWriter, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let writer = OutputWriter::new(fs, Arc::clone(&notifier) as Arc<dyn Notifier>);
    (writer, notifier)
}

#[test]
fn write_replaces_content_and_notifies() -> TestResult {
    init_tracing();
    let (mock, fs) = mock_fs();
    mock.add_file(at("a-styles.css"), "old");
    let (writer, notifier) = writer_with_recorder(fs);

    writer.write(&at("a-styles.css"), "new", false)?;

    assert_eq!(mock.contents(at("a-styles.css")).as_deref(), Some("new"));
    assert_eq!(notifier.reloads(), vec![at("a-styles.css")]);
    Ok(())
}

#[test]
fn reload_line_can_be_suppressed() -> TestResult {
    let (mock, fs) = mock_fs();
    let (writer, notifier) = writer_with_recorder(fs);

    writer.write(&at("a-styles.css"), "body{}", true)?;

    assert_eq!(mock.contents(at("a-styles.css")).as_deref(), Some("body{}"));
    assert!(notifier.reloads().is_empty());
    Ok(())
}

#[test]
fn write_failure_is_reported_as_write_error() {
    let (mock, fs) = mock_fs();
    mock.deny_writes_under(at("ro"));
    let (writer, notifier) = writer_with_recorder(fs);

    let err = writer.write(&at("ro/a.css"), "x", false).unwrap_err();

    assert!(matches!(err, RenderError::Write { ref path, .. } if *path == at("ro/a.css")));
    assert!(notifier.reloads().is_empty());
}

#[test]
fn removing_twice_is_a_no_op() -> TestResult {
    let (mock, fs) = mock_fs();
    mock.add_file(at("gone-styles.css.js"), "x");
    let (writer, notifier) = writer_with_recorder(fs);

    writer.remove(&at("gone-styles.css.js"))?;
    writer.remove(&at("gone-styles.css.js"))?;

    assert!(mock.contents(at("gone-styles.css.js")).is_none());
    assert_eq!(notifier.removed(), vec![at("gone-styles.css.js")]);
    Ok(())
}

#[test]
fn remove_failure_is_a_delete_failure() {
    let (mock, fs) = mock_fs();
    mock.add_file(at("ro/a.css"), "x");
    mock.deny_writes_under(at("ro"));
    let (writer, _notifier) = writer_with_recorder(fs);

    let err = writer.remove(&at("ro/a.css")).unwrap_err();
    assert!(matches!(err, RenderError::DeleteFailure { .. }));
}

#[test]
fn real_filesystem_write_is_whole_file_replace() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/out/a-styles.css");
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let (writer, notifier) = writer_with_recorder(Arc::clone(&fs));

    writer.write(&path, "a{}\n", false)?;
    writer.write(&path, "b{}\n", false)?;

    assert_eq!(std::fs::read_to_string(&path)?, "b{}\n");
    assert_eq!(notifier.reloads().len(), 2);

    // No staging files are left behind.
    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);

    writer.remove(&path)?;
    writer.remove(&path)?;
    assert!(!path.exists());
    assert_eq!(notifier.removed(), vec![path]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn real_filesystem_write_keeps_file_mode() -> TestResult {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let kept = dir.path().join("kept-styles.css.js");
    let fresh = dir.path().join("fresh-styles.css.js");
    std::fs::write(&kept, "export default css``;\n")?;
    std::fs::set_permissions(&kept, std::fs::Permissions::from_mode(0o664))?;
    let (writer, _notifier) = writer_with_recorder(Arc::new(RealFileSystem));

    writer.write(&kept, "export default css`a{}`;\n", true)?;
    writer.write(&fresh, "b{}", true)?;

    let mode = |p: &std::path::Path| -> std::io::Result<u32> {
        Ok(std::fs::metadata(p)?.permissions().mode() & 0o777)
    };
    assert_eq!(mode(&kept)?, 0o664);
    assert_eq!(mode(&fresh)?, 0o644);
    Ok(())
}
