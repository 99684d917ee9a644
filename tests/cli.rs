use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use vidscribe::draw::{
    DrawingElement, Glyph, RED, SizeTier, Stroke, StrokeTool, Symbol, Text, YELLOW,
};
use vidscribe::geometry::Point;
use vidscribe::live::{LiveSession, LiveStroke};
use vidscribe::persist::{AnnotationStore, DirectoryStore, LiveSessionRecord, StaticAnnotation};

fn vidscribe_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vidscribe").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn sample_static() -> StaticAnnotation {
    StaticAnnotation {
        elements: vec![
            DrawingElement::Symbol(Symbol {
                anchor: Point::new(40.0, 40.0),
                glyph: Glyph::Checkmark,
                size: SizeTier::Medium,
                rotation: 0.0,
                color: YELLOW,
            }),
            DrawingElement::Text(Text {
                anchor: Point::new(120.0, 60.0),
                text: "goal line".to_string(),
                font_size: 24.0,
                color: RED,
                rotation: None,
            }),
        ],
        canvas_width: 200,
        canvas_height: 100,
    }
}

fn sample_live() -> LiveSessionRecord {
    let points = (1..=9).map(|i| Point::new(i as f64 * 10.0, 50.0)).collect();
    LiveSessionRecord {
        name: "Corner kick".to_string(),
        session: LiveSession {
            strokes: vec![LiveStroke {
                element: DrawingElement::Stroke(Stroke {
                    tool: StrokeTool::Pen,
                    points,
                    color: RED,
                    width: 4.0,
                    opacity: 1.0,
                    timing: None,
                }),
                start_time: 0.0,
                end_time: 2.0,
            }],
            duration: 3.0,
            canvas_width: 100,
            canvas_height: 100,
            capture_origin: 12.0,
        },
    }
}

fn store_static(dir: &Path, compress: bool) -> PathBuf {
    let mut store = DirectoryStore::new(dir, compress);
    let annotation = sample_static();
    let id = store
        .save_static(&annotation, "goal line", b"thumbnail")
        .unwrap();
    store.payload_path(&id)
}

fn store_live(dir: &Path) -> PathBuf {
    let mut store = DirectoryStore::new(dir, false);
    let id = store.save_live(&sample_live(), "", b"thumbnail").unwrap();
    store.payload_path(&id)
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}

#[test]
fn vidscribe_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    vidscribe_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Video annotation drawing and replay engine",
        ));
}

#[test]
fn render_requires_output_flag() {
    let temp = TempDir::new().unwrap();
    vidscribe_cmd(temp.path())
        .args(["render", "payload.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn text_prints_joined_text() {
    let temp = TempDir::new().unwrap();
    let payload = store_static(temp.path(), false);

    vidscribe_cmd(temp.path())
        .arg("text")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::diff("goal line\n"));
}

#[test]
fn info_reads_compressed_payload() {
    let temp = TempDir::new().unwrap();
    let payload = store_static(temp.path(), true);

    vidscribe_cmd(temp.path())
        .arg("info")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kind: static"))
        .stdout(predicate::str::contains("Canvas: 200x100"))
        .stdout(predicate::str::contains("symbol: 1"))
        .stdout(predicate::str::contains("Colors: Red (1), Yellow (1)"));
}

#[test]
fn info_reports_live_session() {
    let temp = TempDir::new().unwrap();
    let payload = store_live(temp.path());

    vidscribe_cmd(temp.path())
        .arg("info")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kind: live"))
        .stdout(predicate::str::contains("Name: Corner kick"))
        .stdout(predicate::str::contains("Duration: 3.000s"))
        .stdout(predicate::str::contains("stroke: 1"));
}

#[test]
fn render_static_payload_scales_to_requested_size() {
    let temp = TempDir::new().unwrap();
    let payload = store_static(temp.path(), false);
    let output = temp.path().join("out.png");

    vidscribe_cmd(temp.path())
        .arg("render")
        .arg(&payload)
        .arg("-o")
        .arg(&output)
        .args(["--width", "400", "--height", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(png_dimensions(&bytes), (400, 200));
}

#[test]
fn render_live_payload_at_time_uses_canvas_size() {
    let temp = TempDir::new().unwrap();
    let payload = store_live(temp.path());
    let output = temp.path().join("frame.png");

    vidscribe_cmd(temp.path())
        .arg("render")
        .arg(&payload)
        .arg("--output")
        .arg(&output)
        .args(["--time", "1.0"])
        .assert()
        .success();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(png_dimensions(&bytes), (100, 100));
}

#[test]
fn render_missing_payload_fails() {
    let temp = TempDir::new().unwrap();
    vidscribe_cmd(temp.path())
        .arg("render")
        .arg(temp.path().join("missing.json"))
        .arg("-o")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load payload"));
}

#[test]
fn config_init_writes_default_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("vidscribe").join("config.toml");

    vidscribe_cmd(temp.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(config_path.exists());

    vidscribe_cmd(temp.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn explicit_config_sets_storage_directory() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        "[storage]\ndirectory = \"/srv/annotations\"\n\n[history]\nmax_depth = 7\n",
    )
    .unwrap();

    vidscribe_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Storage directory: /srv/annotations",
        ))
        .stdout(predicate::str::contains("History depth: 7"));
}
