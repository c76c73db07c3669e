use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated config and data directories for one CLI run
struct TestContext {
    temp_dir: TempDir,
    data_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config dir");

        let data_path = temp_dir.path().join("terms.json");
        fs::write(
            &data_path,
            r#"{
                "aggregate demand": "Total _spending_ on goods and services.",
                "aggregate supply": "Total output firms plan to sell.",
                "GDP": "Gross domestic product.",
                "tax rate": 0.2
            }"#,
        )
        .expect("Failed to write term data");

        Self {
            temp_dir,
            data_path,
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_econ-define"))
            .current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--data")
            .arg(&self.data_path)
            .args(args)
            .output()
            .expect("Failed to run econ-define")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_inline_terms() {
    let ctx = TestContext::new();
    let output = ctx.run(&["GDP", "agregate demnd"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("GDP: Gross domestic product."));
    assert!(out.contains(
        "agregate demnd -> aggregate demand: Total spending on goods and services."
    ));
}

#[test]
fn test_unknown_term_reports_closest() {
    let ctx = TestContext::new();
    let output = ctx.run(&["xyz"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("xyz: no definition found (closest match: 'aggregate supply'"));
    assert!(out.contains("did you mean aggregate supply?"));
}

#[test]
fn test_terms_from_file_with_delimiter() {
    let ctx = TestContext::new();
    let batch = ctx.path().join("chapter.txt");
    fs::write(&batch, "GDP;aggregate supply;;").expect("Failed to write batch file");

    let output = ctx.run(&[batch.to_str().expect("utf-8 path"), ";"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("GDP: Gross domestic product."));
    assert!(out.contains("aggregate supply: Total output firms plan to sell."));
}

#[test]
fn test_demo_mode() {
    let ctx = TestContext::new();
    let output = ctx.run(&[]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Here's a demo"));
    assert!(out.contains("aggregate demand: Total spending on goods and services."));
}

#[test]
fn test_missing_batch_file_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["does-not-exist.txt"]);
    assert!(!output.status.success());
}

#[test]
fn test_strict_fails_on_unknown_term() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--strict", "GDP", "xyz"]);
    assert!(!output.status.success());

    // Every term is still printed before the error
    let out = stdout(&output);
    assert!(out.contains("GDP: Gross domestic product."));
    assert!(out.contains("xyz: no definition found"));

    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("'xyz'. closest match: 'aggregate supply'"));

    let output = ctx.run(&["--strict", "GDP", "agregate suply"]);
    assert!(output.status.success());
}

#[test]
fn test_save_config() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--cutoff", "0.8", "--save-config", "GDP"]);
    assert!(output.status.success());

    let saved = ctx.path().join("config").join("econ-define").join("config.json");
    let content = fs::read_to_string(saved).expect("config was saved");
    assert!(content.contains("\"cutoff\": 0.8"));
    assert!(content.contains("\"color\": false"));
}
