//! End-to-end tests for the notechain CLI.
//!
//! Tests invoke the `notechain` binary as a subprocess and verify JSON output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn notechain() -> Command {
    Command::new(env!("CARGO_BIN_EXE_notechain"))
}

fn notechain_in(dir: &Path) -> Command {
    let mut cmd = notechain();
    cmd.current_dir(dir);
    cmd
}

fn init_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let output = notechain_in(dir.path()).arg("init").output().unwrap();
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    dir
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn run(dir: &Path, args: &[&str]) -> serde_json::Value {
    json(&notechain_in(dir).args(args).output().unwrap())
}

fn write_note(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// === Init ===

#[test]
fn e2e_init_creates_vault_structure() {
    let dir = TempDir::new().unwrap();
    let value = run(dir.path(), &["init", "."]);

    assert_eq!(value["literature_folder"], "00_Insights");
    assert_eq!(value["zettelkasten_folder"], "10_Zettels");
    assert!(dir.path().join(".notechain").join("config.toml").exists());
    assert!(dir.path().join("00_Insights").is_dir());
    assert!(dir.path().join("10_Zettels").is_dir());
}

#[test]
fn e2e_init_twice_is_harmless() {
    let dir = init_vault();
    let value = run(dir.path(), &["init"]);
    assert_eq!(value["zettelkasten_folder"], "10_Zettels");
}

// === New ===

#[test]
fn e2e_new_literature_creates_001() {
    let dir = init_vault();
    let value = run(dir.path(), &["new", "literature"]);

    assert_eq!(value["created"], true);
    assert_eq!(value["kind"], "literature");
    assert_eq!(value["basename"], "_001");
    let content = fs::read_to_string(dir.path().join("00_Insights/_001.md")).unwrap();
    assert!(content.starts_with("---\nsource:\ntags:\ncreated_at: "));
}

#[test]
fn e2e_new_literature_twice_fails_without_overwriting() {
    let dir = init_vault();
    run(dir.path(), &["new", "lit"]);
    fs::write(dir.path().join("00_Insights/_001.md"), "edited").unwrap();

    let output = notechain_in(dir.path())
        .args(["new", "literature"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("already exists"));
    let content = fs::read_to_string(dir.path().join("00_Insights/_001.md")).unwrap();
    assert_eq!(content, "edited");
}

#[test]
fn e2e_new_zettel_follows_largest_number() {
    let dir = init_vault();
    write_note(dir.path(), "10_Zettels/3_foo.md", "");
    write_note(dir.path(), "10_Zettels/7_bar.md", "");
    write_note(dir.path(), "10_Zettels/2_baz.md", "");

    let value = run(dir.path(), &["new", "zk"]);
    assert_eq!(value["basename"], "8_");
    assert!(dir.path().join("10_Zettels/8_.md").exists());
}

#[test]
fn e2e_new_dry_run_creates_nothing() {
    let dir = init_vault();
    let value = run(dir.path(), &["new", "zettelkasten", "--dry-run"]);

    assert_eq!(value["created"], false);
    assert_eq!(value["basename"], "1_");
    assert!(value["content"].as_str().unwrap().contains("parent:"));
    assert!(!dir.path().join("10_Zettels/1_.md").exists());
}

#[test]
fn e2e_vault_flag_selects_root() {
    let dir = init_vault();
    let elsewhere = TempDir::new().unwrap();
    let output = notechain_in(elsewhere.path())
        .arg("--vault")
        .arg(dir.path())
        .args(["new", "zettelkasten"])
        .output()
        .unwrap();
    let value = json(&output);
    assert_eq!(value["basename"], "1_");
    assert!(dir.path().join("10_Zettels/1_.md").exists());
}

// === Next ===

#[test]
fn e2e_next_literature_carries_source() {
    let dir = init_vault();
    write_note(
        dir.path(),
        "00_Insights/kuma_007.md",
        "---\nsource: Bear Encounters\ntags:\n---\n",
    );

    let value = run(dir.path(), &["next", "00_Insights/kuma_007.md"]);
    assert_eq!(value["basename"], "kuma_008");
    assert_eq!(value["parent"], "kuma_007");

    let content = fs::read_to_string(dir.path().join("00_Insights/kuma_008.md")).unwrap();
    assert!(content.contains("source: Bear Encounters\n"));
}

#[test]
fn e2e_next_zettel_skips_taken_children() {
    let dir = init_vault();
    write_note(dir.path(), "10_Zettels/5a1_memory.md", "");
    write_note(dir.path(), "10_Zettels/5a1a_loci.md", "");
    write_note(dir.path(), "10_Zettels/sub/5a1b2_deep.md", "");

    let value = run(dir.path(), &["next", "10_Zettels/5a1_memory"]);
    assert_eq!(value["basename"], "5a1c_");

    let content = fs::read_to_string(dir.path().join("10_Zettels/5a1c_.md")).unwrap();
    assert!(content.contains("[[5a1_memory]]"));
}

#[test]
fn e2e_next_rejects_malformed_source() {
    let dir = init_vault();
    write_note(dir.path(), "00_Insights/untitled.md", "");

    let output = notechain_in(dir.path())
        .args(["next", "00_Insights/untitled.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("untitled"));
}

#[test]
fn e2e_next_from_fresh_zettel_needs_keyword() {
    let dir = init_vault();
    run(dir.path(), &["new", "zettelkasten"]);

    let output = notechain_in(dir.path())
        .args(["next", "10_Zettels/1_.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not follow the naming rule"));
    assert!(!dir.path().join("10_Zettels/1a_.md").exists());
}

#[test]
fn e2e_next_rejects_unconfigured_folder() {
    let dir = init_vault();
    write_note(dir.path(), "inbox/5_idea.md", "");

    let output = notechain_in(dir.path())
        .args(["next", "inbox/5_idea.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not in a configured folder"));
}

#[test]
fn e2e_next_honors_custom_folders() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".notechain")).unwrap();
    fs::write(
        dir.path().join(".notechain/config.toml"),
        "zettelkasten_folder = \"zk\"\n",
    )
    .unwrap();
    run(dir.path(), &["init"]);
    write_note(dir.path(), "zk/2_seed.md", "");

    let value = run(dir.path(), &["next", "zk/2_seed.md"]);
    assert_eq!(value["folder"], "zk");
    assert_eq!(value["basename"], "2a_");
}

// === Touch ===

#[test]
fn e2e_touch_updates_timestamp() {
    let dir = init_vault();
    write_note(
        dir.path(),
        "10_Zettels/1_a.md",
        "---\ncreated_at: 2000/01/01 00:00\nupdated_at: 2000/01/01 00:00\n---\nbody\n",
    );

    let value = run(dir.path(), &["touch", "10_Zettels/1_a.md"]);
    let updated_at = value["updated_at"].as_str().unwrap().to_string();
    assert_ne!(updated_at, "2000/01/01 00:00");

    let content = fs::read_to_string(dir.path().join("10_Zettels/1_a.md")).unwrap();
    assert!(content.contains("created_at: 2000/01/01 00:00\n"));
    assert!(content.contains(&format!("updated_at: {updated_at}\n")));
    assert!(content.ends_with("---\nbody\n"));
}

// === Config and completions ===

#[test]
fn e2e_config_prints_layout() {
    let dir = init_vault();
    let value = run(dir.path(), &["config"]);
    assert_eq!(value["literature_folder"], "00_Insights");
    assert!(value["config_file"]
        .as_str()
        .unwrap()
        .ends_with("config.toml"));
}

#[test]
fn e2e_config_rejects_malformed_file() {
    let dir = init_vault();
    fs::write(dir.path().join(".notechain/config.toml"), "literature_folder = [").unwrap();

    let output = notechain_in(dir.path()).arg("config").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config error"));
}

#[test]
fn e2e_completions_for_bash() {
    let output = notechain().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("notechain"));
}
