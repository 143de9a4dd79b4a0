use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn vecdraw_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vecdraw").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_drawing(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn vecdraw_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    vecdraw_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vector drawing tool for .jvd files"));
}

#[test]
fn check_reports_valid_and_invalid_files() {
    let temp = TempDir::new().unwrap();
    let good = write_drawing(&temp, "good.jvd", "LINE 0 0 10 10 255 0 0\nCIRCLE 5 5 3 0 0 0\n");
    let bad = write_drawing(&temp, "bad.jvd", "LINE 0 0 10 10 255 0 0\nSQUARE 1 2\n");

    vecdraw_cmd(&temp)
        .arg("check")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("good.jvd: 2 shapes"));

    vecdraw_cmd(&temp)
        .arg("check")
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.jvd: line 2"))
        .stderr(predicate::str::contains("1 of 2 files are invalid"));
}

#[test]
fn list_numbers_objects_across_files() {
    let temp = TempDir::new().unwrap();
    let first = write_drawing(&temp, "a.jvd", "CIRCLE 5 5 3 0 0 0\n");
    let second = write_drawing(&temp, "b.jvd", "FCIRCLE 1 1 1 0 0 0 255 255 255\n");

    vecdraw_cmd(&temp)
        .arg("list")
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("Circle 1: CIRCLE 5 5 3 0 0 0"))
        .stdout(predicate::str::contains(
            "Circle 2: FCIRCLE 1 1 1 0 0 0 255 255 255",
        ));
}

#[test]
fn merge_writes_combined_drawing() {
    let temp = TempDir::new().unwrap();
    let first = write_drawing(&temp, "a.jvd", "LINE 0 0 1 1 0 0 0\n");
    let second = write_drawing(&temp, "b.jvd", "RECTANGLE 2 2 -2 3 0 0 255\n");
    let output = temp.path().join("merged");

    vecdraw_cmd(&temp)
        .arg("merge")
        .arg(&first)
        .arg(&second)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2 shapes"));

    let merged = std::fs::read_to_string(temp.path().join("merged.jvd")).unwrap();
    assert_eq!(merged, "LINE 0 0 1 1 0 0 0\nRECTANGLE 2 2 -2 3 0 0 255\n");

    vecdraw_cmd(&temp)
        .arg("merge")
        .arg(&first)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn export_writes_cropped_image() {
    let temp = TempDir::new().unwrap();
    let drawing = write_drawing(
        &temp,
        "boxes.jvd",
        "RECTANGLE 0 0 10 10 0 0 0\nRECTANGLE 5 5 20 20 255 0 0\n",
    );
    let output = temp.path().join("boxes");

    vecdraw_cmd(&temp)
        .arg("export")
        .arg(&drawing)
        .arg("-o")
        .arg(&output)
        .args(["--format", "gif"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boxes.gif"));

    let image = image::open(temp.path().join("boxes.gif")).unwrap();
    assert_eq!((image.width(), image.height()), (26, 26));
}

#[test]
fn export_reports_oversized_drawing() {
    let temp = TempDir::new().unwrap();
    let drawing = write_drawing(
        &temp,
        "wide.jvd",
        "LINE -2000000000 0 2000000000 0 0 0 0\n",
    );

    vecdraw_cmd(&temp)
        .arg("export")
        .arg(&drawing)
        .arg("-o")
        .arg(temp.path().join("wide.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large to export"))
        .stderr(predicate::str::contains("panicked").not());
    assert!(!temp.path().join("wide.png").exists());
}

#[test]
fn export_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    let drawing = write_drawing(&temp, "a.jvd", "LINE 0 0 1 1 0 0 0\n");

    vecdraw_cmd(&temp)
        .arg("export")
        .arg(&drawing)
        .args(["-o", "out", "--format", "bmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'bmp'"));
}

#[test]
fn render_uses_configured_canvas_size() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("vecdraw");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[canvas]\nwidth = 50\nheight = 40\n",
    )
    .unwrap();
    let drawing = write_drawing(&temp, "dot.jvd", "FCIRCLE 20 20 10 0 0 0 0 0 255\n");
    let output = temp.path().join("canvas.png");

    vecdraw_cmd(&temp)
        .arg("render")
        .arg(&drawing)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 50x40 canvas"))
        .stdout(predicate::str::contains(
            "Foreground color: (255, 0, 0), background color: (0, 0, 255)",
        ));

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (50, 40));
    assert_eq!(image.get_pixel(20, 20).0, [0, 0, 255]);
    assert_eq!(image.get_pixel(45, 35).0, [255, 255, 255]);
}

#[test]
fn init_config_writes_default_file_once() {
    let temp = TempDir::new().unwrap();

    vecdraw_cmd(&temp)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    assert!(temp.path().join("vecdraw").join("config.toml").exists());

    vecdraw_cmd(&temp)
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file already exists"));
}
