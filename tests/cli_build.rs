//! End-to-end CLI tests: run the built binary against a copy of the fixture
//! content directory.

use std::fs;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ===========================================================================
// Helpers
// ===========================================================================

fn copy_dir_recursive(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// A scratch workspace with `content/` copied from the fixtures.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, &tmp.path().join("content"));
    tmp
}

/// Run the binary in `dir` with a clean `FRONTPAGE_*` environment.
fn frontpage(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_frontpage"));
    cmd.current_dir(dir)
        .args(["--source", "content", "--output", "dist"])
        .args(args)
        .env_remove("RUST_LOG");
    for var in [
        "FRONTPAGE_REMOTE_HOST",
        "FRONTPAGE_QUERY_PATH",
        "FRONTPAGE_AUTH_TOKEN",
        "FRONTPAGE_DATA_SOURCE",
    ] {
        cmd.env_remove(var);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A URL on a port nothing listens on.
fn closed_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ===========================================================================
// build
// ===========================================================================

#[test]
fn build_writes_homepage_and_assets() {
    let tmp = workspace();
    let out = frontpage(tmp.path(), &["build"], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let html = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>One to one financial advice</title>"));
    assert!(html.contains("Make your"));
    assert!(html.contains("Advice that lasts"));
    assert!(!html.contains("data-resource-type"));
    assert!(tmp.path().join("dist/assets/images/hero.svg").exists());

    let text = stdout(&out);
    assert!(text.contains("Home → index.html"));
    assert!(text.contains("assets/images/hero.svg"));
    assert!(text.contains("Site generated at dist"));
}

#[test]
fn build_in_author_mode_marks_editable_components() {
    let tmp = workspace();
    let out = frontpage(tmp.path(), &["build", "--query", "wcmmode=edit"], &[]);
    assert!(out.status.success());

    let html = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    assert!(html.contains(r#"class="author-mode""#));
    assert!(html.contains(r#"data-resource-type="site/components/hero-banner""#));
    assert!(html.contains(r#"data-resource-type="site/components/footer""#));
}

#[test]
fn build_survives_unreachable_remote() {
    let tmp = workspace();
    let host = closed_host();
    let out = frontpage(
        tmp.path(),
        &["build"],
        &[("FRONTPAGE_REMOTE_HOST", &host)],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let html = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    assert!(html.contains("site-header"));
    assert!(html.contains("site-footer"));
    assert!(stdout(&out).contains("unavailable"));
}

#[test]
fn build_without_content_document_fails() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("content")).unwrap();
    let out = frontpage(tmp.path(), &["build"], &[]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("dist/index.html").exists());
}

#[test]
fn invalid_config_is_reported() {
    let tmp = workspace();
    fs::write(tmp.path().join("content/config.toml"), "colour = \"teal\"\n").unwrap();
    let out = frontpage(tmp.path(), &["build"], &[]);
    assert!(!out.status.success());
}

// ===========================================================================
// check
// ===========================================================================

#[test]
fn check_passes_on_complete_content() {
    let tmp = workspace();
    let out = frontpage(tmp.path(), &["check"], &[]);
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("001 navigation: resolved"));
    assert!(text.contains("==> Content is complete"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn check_fails_when_a_slot_is_missing() {
    let tmp = workspace();
    let doc_path = tmp.path().join("content/en.json");
    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&doc_path).unwrap()).unwrap();
    doc.as_object_mut().unwrap().remove("ctaBanner");
    fs::write(&doc_path, doc.to_string()).unwrap();

    let out = frontpage(tmp.path(), &["check"], &[]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("ctaBanner: missing"));
}

#[test]
fn check_fails_when_remote_is_unavailable() {
    let tmp = workspace();
    let host = closed_host();
    let out = frontpage(tmp.path(), &["check"], &[("FRONTPAGE_REMOTE_HOST", &host)]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("unavailable (network error"));
}

// ===========================================================================
// status / gen-config
// ===========================================================================

#[test]
fn status_shows_static_source() {
    let tmp = workspace();
    let out = frontpage(tmp.path(), &["status"], &[]);
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("Selected: static document"));
    assert!(text.contains("(no remote host configured)"));
    assert!(text.contains("Hero Banner → HeroBanner"));
    assert!(text.contains("site/components/latest-news → LatestNews"));
}

#[test]
fn status_masks_token_from_environment() {
    let tmp = workspace();
    let out = frontpage(
        tmp.path(),
        &["status"],
        &[
            ("FRONTPAGE_REMOTE_HOST", "https://cms.example.com"),
            ("FRONTPAGE_AUTH_TOKEN", "s3cret-token"),
        ],
    );
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("Selected: remote CMS"));
    assert!(text.contains("Auth token: s3cr****"));
    assert!(!text.contains("s3cret-token"));
    for query in ["homepage", "navigation", "feature-cards", "latest-news", "footer"] {
        let url = format!("https://cms.example.com/graphql/execute.json/frontpage/{query}");
        let line = format!("{query} → {url}");
        assert!(text.contains(&line), "{line}");
    }
    assert!(text.contains("serves latestNews.articles"));
}

#[test]
fn mock_data_source_ignores_host() {
    let tmp = workspace();
    let out = frontpage(
        tmp.path(),
        &["status"],
        &[
            ("FRONTPAGE_REMOTE_HOST", "https://cms.example.com"),
            ("FRONTPAGE_DATA_SOURCE", "mock"),
        ],
    );
    assert!(out.status.success());
    assert!(stdout(&out).contains("Selected: static document"));
}

#[test]
fn gen_config_prints_loadable_toml() {
    let tmp = workspace();
    let out = frontpage(tmp.path(), &["gen-config"], &[]);
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("[remote]"));
    let parsed: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(parsed["locale"].as_str(), Some("en"));
}
