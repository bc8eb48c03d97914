use assert_cmd::prelude::*;
use predicates::prelude::*;
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

const PAGES: &str = r#"
content:
  - name: posts
    path: content/posts
    fields:
      - { name: title, type: string, required: true }
      - { name: seo, component: seo }
components:
  seo:
    name: seo
    type: object
    fields:
      - { name: description, type: text }
"#;

#[test]
fn doctor_reads_provided_config_path() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("site");
    write_file(&repo.join(".pages.yml"), PAGES);

    let cfg = tmp.path().join("config.toml");
    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
repo_root = "{}"
"#,
        repo.display()
    );
    write_file(&cfg, &toml);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pgf"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   pgf doctor"))
        .stdout(predicate::str::contains("profile: default"))
        .stdout(predicate::str::contains(format!("repo_root: {}", repo.display())))
        .stdout(predicate::str::contains("entries: 1"))
        .stdout(predicate::str::contains("components: 1"));
}

#[test]
fn doctor_uses_xdg_default_when_present() {
    let tmp = tempdir().unwrap();
    let repo = tmp.path().join("site");
    write_file(&repo.join("cms/pages.yml"), PAGES);

    let cfg_path = tmp.path().join("pagefields").join("config.toml");
    write_file(
        &cfg_path,
        &format!(
            r#"
version = 1
profile = "work"

[profiles.work]
repo_root = "{}"
schema = "{{{{repo_root}}}}/cms/pages.yml"
"#,
            repo.display()
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pgf"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   pgf doctor"))
        .stdout(predicate::str::contains("profile: work"))
        .stdout(predicate::str::contains("cms/pages.yml"));
}
