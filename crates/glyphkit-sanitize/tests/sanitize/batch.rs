use std::fs;

use glyphkit_sanitize::{list_icons, sanitize_directory, SanitizeError};
use glyphkit_settings::Config;
use tempfile::TempDir;

const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><rect width="24" height="24" fill="none"/><path d="M4 4L20 4L20 20Z"/></svg>"##;
const BROKEN: &str = "<svg><path d=\"M0 0\"></svg>";

#[test]
fn test_directory_is_sanitized() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("add.svg"), ICON).unwrap();
    fs::write(input.path().join("REMOVE.SVG"), ICON).unwrap();
    fs::write(input.path().join("notes.txt"), "not an icon").unwrap();

    let out_dir = output.path().join("icons");
    let report = sanitize_directory(input.path(), &out_dir, &Config::default()).unwrap();
    assert_eq!(report.sanitized, 2);
    assert!(report.is_clean());

    let written = fs::read_to_string(out_dir.join("add.svg")).unwrap();
    assert!(!written.contains("<rect"));
    assert!(written.contains(r##"fill="#000""##));
    assert!(out_dir.join("REMOVE.SVG").exists());
    assert!(!out_dir.join("notes.txt").exists());
}

#[test]
fn test_broken_icon_is_copied_through() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("good.svg"), ICON).unwrap();
    fs::write(input.path().join("broken.svg"), BROKEN).unwrap();

    let report = sanitize_directory(input.path(), output.path(), &Config::default()).unwrap();
    assert_eq!(report.sanitized, 1);
    assert_eq!(report.copied, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("broken.svg"));
    assert_eq!(
        fs::read_to_string(output.path().join("broken.svg")).unwrap(),
        BROKEN
    );
}

#[test]
fn test_broken_icon_is_skipped_without_copy() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("broken.svg"), BROKEN).unwrap();

    let mut config = Config::default();
    config.batch.copy_on_failure = false;
    let report = sanitize_directory(input.path(), output.path(), &config).unwrap();
    assert_eq!(report.copied, 0);
    assert_eq!(report.failures.len(), 1);
    assert!(!report.failures[0].copied);
    assert!(!output.path().join("broken.svg").exists());
}

#[test]
fn test_empty_directory_is_an_error() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("readme.md"), "icons go here").unwrap();

    let result = sanitize_directory(input.path(), output.path(), &Config::default());
    assert!(matches!(
        result,
        Err(SanitizeError::NoIcons { extension, .. }) if extension == "svg"
    ));
}

#[test]
fn test_list_icons_is_sorted() {
    let input = TempDir::new().unwrap();
    for name in ["b.svg", "a.svg", "c.Svg"] {
        fs::write(input.path().join(name), ICON).unwrap();
    }
    fs::create_dir(input.path().join("nested.svg")).unwrap();

    let icons = list_icons(input.path(), "svg").unwrap();
    let names: Vec<_> = icons
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.svg", "b.svg", "c.Svg"]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("add.svg"), ICON).unwrap();

    let mut config = Config::default();
    config.sanitize.canvas_size = -1.0;
    assert!(matches!(
        sanitize_directory(input.path(), output.path(), &config),
        Err(SanitizeError::Settings(_))
    ));
}

#[test]
fn test_failed_write_leaves_no_partial_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("add.svg"), ICON).unwrap();
    fs::create_dir(output.path().join("add.svg")).unwrap();

    let mut config = Config::default();
    config.batch.copy_on_failure = false;
    let report = sanitize_directory(input.path(), output.path(), &config).unwrap();
    assert_eq!(report.sanitized, 0);
    assert_eq!(report.failures.len(), 1);

    let entries: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(output.path().join("add.svg").is_dir());
}
