#![cfg(not(target_arch = "wasm32"))]

use std::{io::Write, path::PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/archive.html")
}

fn folio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.env_remove("RUST_LOG").env_remove("FOLIO_CONFIG_FILE");
    cmd
}

fn html_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write html");
    file
}

#[test]
fn plan_defaults_to_first_page() {
    folio()
        .arg("plan")
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("page 1 (#!/1)"))
        .stdout(contains("controls: [1] 2 3"))
        .stdout(contains("articles-sidebar-item-fragments  Routing with fragments"));
}

#[test]
fn plan_resolves_fragment() {
    folio()
        .args(["plan", "--fragment", "#!/2"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("controls: 1 [2] 3"))
        .stdout(contains("shown last  typography"));
}

#[test]
fn plan_emits_json() {
    let assert = folio()
        .args(["plan", "--page", "3", "--format", "json"])
        .arg(fixture())
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&output).expect("json report");
    assert_eq!(report["page"], 3);
    assert_eq!(report["fragment"], "#!/3");
    assert_eq!(report["sidebar"][0]["article"], "colophon");
    assert_eq!(report["articles"][6]["visibility"]["state"], "shown");
    assert_eq!(report["articles"][6]["visibility"]["last"], true);
}

#[test]
fn plan_rejects_missing_page() {
    folio()
        .args(["plan", "--page", "4"])
        .arg(fixture())
        .assert()
        .code(2)
        .stderr(contains("page 4 is outside 1..=3"));
}

#[test]
fn empty_archive_fails_with_dedicated_status() {
    let file = html_file(r#"<div id="content"></div><div id="footer"></div>"#);
    folio()
        .arg("plan")
        .arg(file.path())
        .assert()
        .code(3);
}

#[test]
fn missing_file_is_an_io_failure() {
    folio()
        .args(["plan", "/definitely/not/here.html"])
        .assert()
        .code(4);
}

#[test]
fn route_reports_each_observation() {
    folio()
        .arg("route")
        .arg(fixture())
        .args(["", "#!/2", "#!/2", "#!/99", "#!/x", "#!/3"])
        .assert()
        .success()
        .stdout(contains("pages: 3"))
        .stdout(contains("activate 1"))
        .stdout(contains("ignore (already active)"))
        .stdout(contains("ignore (out of range)"))
        .stdout(contains("ignore (malformed)"))
        .stdout(contains("activate 3"));
}

#[test]
fn config_file_selectors_apply() {
    let html = r#"<main><section class="post"><header><h2>Only post</h2></header></section></main>
<aside id="toc"><li id="toc-end"></li></aside><footer id="end"></footer>"#;
    let archive = html_file(html);

    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    writeln!(
        config,
        r##"
[pager.selectors]
content = "main"
article = ".post"
heading = "header h2"
sidebar = "#toc"
sidebar_bottom = "#toc-end"
footer = "#end"
"##
    )
    .expect("write config");

    folio()
        .arg("--config-file")
        .arg(config.path())
        .arg("plan")
        .arg(archive.path())
        .assert()
        .success()
        .stdout(contains("articles: 1, pages: 1"))
        .stdout(contains("article-1  Only post"));
}

#[test]
fn route_accepts_flags_after_fragments() {
    let assert = folio()
        .arg("route")
        .arg(fixture())
        .args(["#!/2", "--format", "json"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&output).expect("json report");
    let steps = report["steps"].as_array().expect("steps");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["decision"]["decision"], "activate");
    assert_eq!(steps[0]["decision"]["detail"], 2);
}
