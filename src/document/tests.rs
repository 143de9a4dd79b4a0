use super::*;
use crate::draw::{InstanceCounters, ShapeFactory, ShapeKind};
use crate::export::{ExportError, ExportFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn ensure_jvd_extension_appends_once() {
    assert_eq!(ensure_jvd_extension(Path::new("house")), PathBuf::from("house.jvd"));
    assert_eq!(ensure_jvd_extension(Path::new("house.jvd")), PathBuf::from("house.jvd"));
    assert_eq!(ensure_jvd_extension(Path::new("house.txt")), PathBuf::from("house.txt.jvd"));
}

#[test]
fn load_file_reports_path_and_line() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.jvd", "LINE 0 0 1 1 0 0 0\nCIRCLE 1 2\n");

    let mut factory = ShapeFactory::new();
    let err = load_file(&mut factory, &path).unwrap_err();
    match &err {
        DocumentError::Format { line, source, .. } => {
            assert_eq!(*line, 2);
            assert!(matches!(source, FormatError::FieldCount { tag: "CIRCLE", .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("bad.jvd: line 2"));
    assert_eq!(factory.counters(), InstanceCounters::default());
}

#[test]
fn load_files_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.jvd", "LINE 0 0 1 1 0 0 0\n");
    let bad = write(&dir, "bad.jvd", "TRIANGLE 1 2 3\n");

    let mut factory = ShapeFactory::new();
    let paths = [good.as_path(), bad.as_path()];
    assert!(load_files(&mut factory, paths).is_err());
    assert_eq!(factory.counters().line, 0);

    let shapes = load_files(&mut factory, [good.as_path(), good.as_path()]).unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[1].name(), "Line 2");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut factory = ShapeFactory::new();
    let err = load_file(&mut factory, &dir.path().join("nope.jvd")).unwrap_err();
    assert!(matches!(err, DocumentError::Io { .. }));
    assert!(err.to_string().contains("nope.jvd"));
}

#[test]
fn open_replaces_drawing_and_clears_dirty_flag() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "house.jvd", "RECTANGLE 0 0 10 10 0 0 0\n\nCIRCLE 5 5 2 255 0 0\n");

    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(0, 0);
    workspace.model_mut().finish_drawing();
    workspace.open(&path).unwrap();

    let model = workspace.model();
    assert_eq!(model.len(), 2);
    assert!(!model.is_changed());
    assert_eq!(model.name(), "house.jvd");
    assert_eq!(model.get(1).map(|s| s.name()).as_deref(), Some("Circle 1"));
}

#[test]
fn failed_open_leaves_drawing_untouched() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.jvd", "LINE 1\n");

    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(3, 3);
    workspace.model_mut().finish_drawing();

    assert!(workspace.open(&bad).is_err());
    assert_eq!(workspace.model().len(), 1);
    assert!(workspace.model().is_changed());
}

#[test]
fn open_multiple_appends_and_marks_unsaved() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "a.jvd", "LINE 0 0 1 1 0 0 0\n");
    let second = write(&dir, "b.jvd", "LINE 2 2 3 3 0 0 0\nCIRCLE 1 1 1 0 0 0\n");

    let mut workspace = Workspace::default();
    workspace.open(&first).unwrap();
    workspace.open_multiple(&[first.clone(), second]).unwrap();

    let model = workspace.model();
    assert_eq!(model.len(), 4);
    assert!(model.is_changed());
    assert_eq!(model.file_path(), None);
    assert_eq!(model.get(2).map(|s| s.name()).as_deref(), Some("Line 3"));
}

#[test]
fn open_multiple_with_bad_file_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.jvd", "LINE 0 0 1 1 0 0 0\n");
    let bad = write(&dir, "bad.jvd", "LINE 0 0 1 1 0 0 300\n");

    let mut workspace = Workspace::default();
    let err = workspace.open_multiple(&[good, bad]).unwrap_err();

    assert!(err.to_string().contains("bad.jvd"));
    assert!(workspace.model().is_empty());
    assert!(!workspace.model().is_changed());
}

#[test]
fn save_requires_a_path() {
    let mut workspace = Workspace::default();
    assert!(matches!(workspace.save(), Err(DocumentError::NoPath)));
}

#[test]
fn save_as_writes_lines_and_appends_extension() {
    let dir = TempDir::new().unwrap();
    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(0, 0);
    workspace.model_mut().update_drawing(4, 2);
    workspace.model_mut().finish_drawing();

    let saved = workspace.save_as(&dir.path().join("sketch"), false).unwrap();

    assert_eq!(saved, dir.path().join("sketch.jvd"));
    assert_eq!(fs::read_to_string(&saved).unwrap(), "LINE 0 0 4 2 255 0 0\n");
    assert!(!workspace.model().is_changed());
    assert_eq!(workspace.model().name(), "sketch.jvd");
}

#[test]
fn save_as_refuses_to_overwrite_unless_asked() {
    let dir = TempDir::new().unwrap();
    let existing = write(&dir, "taken.jvd", "");
    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(0, 0);
    workspace.model_mut().finish_drawing();

    let err = workspace.save_as(&existing, false).unwrap_err();
    assert!(matches!(err, DocumentError::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "");

    workspace.save_as(&existing, true).unwrap();
    assert_eq!(fs::read_to_string(&existing).unwrap(), "LINE 0 0 0 0 255 0 0\n");
}

#[test]
fn failed_save_keeps_dirty_flag() {
    let dir = TempDir::new().unwrap();
    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(0, 0);
    workspace.model_mut().finish_drawing();
    workspace
        .model_mut()
        .set_file_path(Some(dir.path().join("missing-dir").join("a.jvd")));

    assert!(matches!(workspace.save(), Err(DocumentError::Io { .. })));
    assert!(workspace.model().is_changed());
}

#[test]
fn saved_file_opens_to_same_content() {
    let dir = TempDir::new().unwrap();
    let mut workspace = Workspace::default();
    let model = workspace.model_mut();
    for (kind, start, end) in [
        (ShapeKind::Line, (-4, 9), (12, -3)),
        (ShapeKind::Circle, (-10, -10), (-7, -6)),
        (ShapeKind::FilledCircle, (10, 10), (13, 14)),
        (ShapeKind::Rectangle, (30, 30), (20, 25)),
    ] {
        model.select_kind(kind);
        model.start_drawing(start.0, start.1);
        model.update_drawing(end.0, end.1);
        model.finish_drawing();
    }
    let saved_lines = model.serialize();
    assert_eq!(
        saved_lines,
        [
            "LINE -4 9 12 -3 255 0 0",
            "CIRCLE -10 -10 5 255 0 0",
            "FCIRCLE 10 10 5 255 0 0 0 0 255",
            "RECTANGLE 30 30 -10 -5 255 0 0",
        ]
    );

    let path = workspace.save_as(&dir.path().join("roundtrip.jvd"), false).unwrap();
    let mut reopened = Workspace::default();
    reopened.open(&path).unwrap();

    assert_eq!(reopened.model().serialize(), saved_lines);
}

#[test]
fn export_picks_format_and_extension() {
    let dir = TempDir::new().unwrap();
    let mut workspace = Workspace::default();
    workspace.model_mut().start_drawing(0, 0);
    workspace.model_mut().update_drawing(10, 10);
    workspace.model_mut().finish_drawing();

    let from_ext = workspace
        .export(&dir.path().join("a.gif"), None, ExportFormat::Png)
        .unwrap();
    assert_eq!(from_ext, dir.path().join("a.gif"));

    let defaulted = workspace
        .export(&dir.path().join("b"), None, ExportFormat::Jpeg)
        .unwrap();
    assert_eq!(defaulted, dir.path().join("b.jpg"));

    let explicit = workspace
        .export(&dir.path().join("c"), Some(ExportFormat::Png), ExportFormat::Jpeg)
        .unwrap();
    assert!(explicit.exists());
    assert_eq!(image::open(&explicit).unwrap().width(), 11);
}

#[test]
fn export_of_oversized_drawing_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let drawing = write(&dir, "huge.jvd", "CIRCLE 0 0 2000000000 0 0 0\n");
    let mut workspace = Workspace::default();
    workspace.open(&drawing).unwrap();

    let target = dir.path().join("huge.png");
    let err = workspace
        .export(&target, None, ExportFormat::Png)
        .unwrap_err();
    assert!(matches!(
        err,
        DocumentError::Export {
            source: ExportError::TooLarge { .. },
            ..
        }
    ));
    assert!(!target.exists());
}
