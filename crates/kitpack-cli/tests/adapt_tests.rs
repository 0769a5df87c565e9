//! End-to-end `kitpack adapt` runs against a project on disk.
//!
//! esbuild is replaced by `sh` running a small script: the script is the
//! first entry point of the bundle options, so it receives the remaining
//! bundler flags as arguments.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_ESBUILD: &str = r#"for arg in "$@"; do
  case "$arg" in
    --outfile=*) out="${arg#--outfile=}" ;;
  esac
done
mkdir -p "$(dirname "$out")"
printf '// bundled\n' > "$out"
"#;

const OUTFILE: &str = ".vercel_build_output/functions/node/render/index.js";

fn kitpack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kitpack").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("KITPACK_FILES_DIR")
        .env("NO_COLOR", "1");
    cmd
}

/// A project whose framework build has already run.
fn built_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(root.join(".gitignore"), "node_modules\n").unwrap();
    fs::create_dir_all(root.join("static")).unwrap();
    fs::write(root.join("static/robots.txt"), "User-agent: *\n").unwrap();
    fs::create_dir_all(root.join(".svelte-kit/output/client/_app")).unwrap();
    fs::write(root.join(".svelte-kit/output/client/_app/start.js"), "start();\n").unwrap();
    fs::create_dir_all(root.join(".svelte-kit/output/prerendered")).unwrap();
    fs::write(
        root.join(".svelte-kit/output/prerendered/about.html"),
        "<h1>About</h1>",
    )
    .unwrap();

    fs::write(root.join("fake-esbuild.sh"), FAKE_ESBUILD).unwrap();
    fs::write(
        root.join("esbuild.json"),
        serde_json::json!({
            "entryPoints": ["fake-esbuild.sh"],
            "outfile": OUTFILE,
            "bundle": true,
            "platform": "node",
        })
        .to_string(),
    )
    .unwrap();

    dir
}

#[test]
fn adapt_writes_vercel_build_output() {
    let project = built_project();
    let root = project.path();

    kitpack(root)
        .args([
            "adapt",
            "--esbuild",
            "sh",
            "--bundle-options",
            "esbuild.json",
            "--output-format",
            "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build output written"));

    let out = root.join(".vercel_build_output");
    assert_eq!(fs::read_to_string(root.join(OUTFILE)).unwrap(), "// bundled\n");
    assert_eq!(
        fs::read_to_string(out.join("functions/node/render/package.json")).unwrap(),
        r#"{"type":"commonjs"}"#
    );
    assert!(out.join("static/robots.txt").is_file());
    assert!(out.join("static/_app/start.js").is_file());
    assert!(out.join("static/about.html").is_file());

    let routes: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("config/routes.json")).unwrap()).unwrap();
    assert_eq!(routes[0]["handle"], "filesystem");

    assert!(root.join(".svelte-kit/vercel/entry.js").is_file());
    assert!(root.join(".svelte-kit/vercel/shims.js").is_file());

    let gitignore = fs::read_to_string(root.join(".gitignore")).unwrap();
    assert!(gitignore.lines().any(|l| l == ".vercel_build_output"));
}

#[test]
fn adapt_removes_stale_output() {
    let project = built_project();
    let root = project.path();
    fs::create_dir_all(root.join(".vercel_build_output/static")).unwrap();
    fs::write(root.join(".vercel_build_output/static/old.html"), "stale").unwrap();

    kitpack(root)
        .args(["adapt", "--esbuild", "sh", "--bundle-options", "esbuild.json"])
        .assert()
        .success();

    assert!(!root.join(".vercel_build_output/static/old.html").exists());
}

#[test]
fn adapt_json_report_lists_bundle_options() {
    let project = built_project();

    let output = kitpack(project.path())
        .args([
            "adapt",
            "--esbuild",
            "sh",
            "--bundle-options",
            "esbuild.json",
            "--output-format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["overrideApplied"], true);
    assert_eq!(report["bundleOptions"]["entryPoints"][0], "fake-esbuild.sh");
    assert!(report["bundleOptions"].get("inject").is_none());
}

#[test]
fn failing_bundler_exits_1_and_skips_later_steps() {
    let project = built_project();
    let root = project.path();

    kitpack(root)
        .args(["adapt", "--esbuild", "./missing/esbuild"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Bundler failed"));

    // Templates were copied; nothing after the bundler ran.
    assert!(root.join(".svelte-kit/vercel/entry.js").is_file());
    assert!(!root.join(".vercel_build_output/config/routes.json").exists());
}

#[test]
fn failing_prerender_command_exits_1() {
    let project = built_project();

    kitpack(project.path())
        .args([
            "adapt",
            "--esbuild",
            "sh",
            "--bundle-options",
            "esbuild.json",
            "--prerender",
            "echo 'page /blog failed' >&2; exit 3",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Prerendering failed"));
}

#[test]
fn missing_project_exits_3() {
    let dir = TempDir::new().unwrap();
    kitpack(dir.path())
        .args(["adapt", "--project", "does-not-exist"])
        .assert()
        .code(3);
}

#[test]
fn dry_run_touches_nothing() {
    let project = built_project();
    let root = project.path();

    kitpack(root)
        .args(["adapt", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("\"entryPoints\""));

    assert!(!root.join(".vercel_build_output").exists());
    assert!(!root.join(".svelte-kit/vercel").exists());
    assert!(!root.join(".svelte-kit/kitpack").exists());
}
