use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const PAGES: &str = r#"
media:
  input: public/media
  output: /media
content:
  - name: posts
    path: content/posts
    fields:
      - { name: title, type: string, required: true }
      - { name: date, type: date, options: { format: '%d/%m/%Y' } }
      - { name: cover, type: image }
      - { name: draft, type: boolean }
      - { name: id, type: uuid }
  - name: settings
    type: file
    path: data/site.json
    format: json
    fields:
      - { name: name, type: string, required: true }
      - { name: launched, type: date }
      - { name: logo, type: image }
"#;

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("site");
    write_file(&repo.join(".pages.yml"), PAGES);

    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        &format!("version = 1\n[profiles.default]\nrepo_root = \"{}\"\n", repo.display()),
    );
    (tmp, repo, cfg)
}

fn pgf(cfg: &PathBuf) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pgf"));
    cmd.arg("--config").arg(cfg);
    cmd
}

#[test]
fn read_converts_stored_values() {
    let (_tmp, repo, cfg) = setup();
    write_file(
        &repo.join("content/posts/a.md"),
        "---\ntitle: Hello\ndate: 05/01/2024\ncover: /media/a.png\n---\n\nBody\n",
    );

    pgf(&cfg)
        .args(["read", "posts", "content/posts/a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-05"))
        .stdout(predicate::str::contains("cover: public/media/a.png"))
        .stdout(predicate::str::contains("title: Hello"));
}

#[test]
fn read_reports_unparseable_fields_and_keeps_them() {
    let (_tmp, repo, cfg) = setup();
    write_file(&repo.join("content/posts/b.md"), "---\ntitle: Hi\ndate: soon\n---\n");

    pgf(&cfg)
        .args(["read", "posts", "content/posts/b.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date: soon"))
        .stderr(predicate::str::contains("Warning: date: could not parse value"));
}

#[test]
fn read_json_entry() {
    let (_tmp, repo, cfg) = setup();
    write_file(
        &repo.join("data/site.json"),
        r#"{"name": "Site", "launched": "2023-03-04", "logo": "/media/logo.svg"}"#,
    );

    let assert = pgf(&cfg).args(["read", "settings", "data/site.json", "--json"]).assert().success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["logo"], "public/media/logo.svg");
    assert_eq!(out["launched"], "2023-03-04");
}

#[test]
fn write_prints_stored_entry_in_declared_order() {
    let (_tmp, repo, cfg) = setup();
    write_file(
        &repo.join("edited.md"),
        "---\ndraft: 'true'\ncover: public/media/a.png\ndate: 2024-01-05\ntitle: Hello\n---\n\nBody\n",
    );

    pgf(&cfg)
        .args(["write", "posts", "edited.md"])
        .assert()
        .success()
        .stdout("---\ntitle: Hello\ndate: 05/01/2024\ncover: /media/a.png\ndraft: true\n---\n\nBody\n");
}

#[test]
fn write_in_place_rewrites_the_file() {
    let (_tmp, repo, cfg) = setup();
    let path = repo.join("data/site.json");
    write_file(&path, r#"{"name": "Site", "logo": "public/media/logo.svg"}"#);

    pgf(&cfg)
        .args(["write", "settings", "data/site.json", "--in-place"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let stored = fs::read_to_string(&path).unwrap();
    assert_eq!(stored, "{\n  \"name\": \"Site\",\n  \"logo\": \"/media/logo.svg\"\n}\n");
}

#[test]
fn write_rejects_invalid_dates() {
    let (_tmp, repo, cfg) = setup();
    write_file(&repo.join("edited.md"), "---\ntitle: Hello\ndate: 5th of May\n---\n");

    pgf(&cfg)
        .args(["write", "posts", "edited.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse value of field 'date'"));
}

#[test]
fn defaults_for_new_entry() {
    let (_tmp, _repo, cfg) = setup();

    let assert = pgf(&cfg).args(["defaults", "posts", "--json"]).assert().success();
    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["draft"], false);
    let id = out["id"].as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert!(out.get("title").is_none());
}
