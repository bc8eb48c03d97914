use assert_cmd::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn normalize_paths(s: &str, root: &str) -> String {
    let re = Regex::new(r#"(?m)^path: .*$"#).unwrap();
    re.replace(s, "path: <CFG>").replace(root, "<ROOT>")
}

#[test]
fn doctor_snapshot_default_profile() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("site");
    write_file(
        &repo.join(".pages.yml"),
        "content:\n  - name: posts\n    fields:\n      - { name: title }\n  - name: pages\n",
    );

    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        &format!("version = 1\nprofile = \"default\"\n\n[profiles.default]\nrepo_root = \"{}\"\n", repo.display()),
    );

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("pgf"))
        .args(["doctor", "--config", cfg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   pgf doctor"));

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let norm = normalize_paths(&out, &repo.display().to_string());
    assert_eq!(
        norm,
        "OK   pgf doctor\n\
         path: <CFG>\n\
         profile: default\n\
         repo_root: <ROOT>\n\
         schema: <ROOT>/.pages.yml\n\
         entries: 2\n\
         components: 0\n\
         field types: 14\n"
    );
}
