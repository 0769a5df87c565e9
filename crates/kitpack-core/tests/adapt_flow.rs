//! Integration tests for the adapt run against the in-memory host.

use std::path::{Path, PathBuf};

use kitpack_adapters::{HostCall, MemoryHost, RecordingBundler, builtin_files};
use kitpack_core::prelude::*;

const ROOT: &str = ".vercel_build_output";

fn seeded_host() -> MemoryHost {
    let host = MemoryHost::new().with_prerendered_page("about/index.html", "<h1>about</h1>");
    for (name, contents) in builtin_files::all() {
        host.put_file(Path::new("files").join(name), contents);
    }
    host.put_file("static/favicon.png", "png");
    host.put_file(".svelte-kit/output/client/_app/start.js", "start");
    host
}

fn adapter(bundler: &RecordingBundler) -> Adapter {
    Adapter::builder()
        .files_dir("files")
        .bundler(Box::new(bundler.clone()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn produces_the_build_output_layout() {
    let host = seeded_host();
    let bundler = RecordingBundler::new().writing_into(host.clone());

    adapter(&bundler).adapt(&host).await.unwrap();

    let bundle = host.read_file(format!("{ROOT}/functions/node/render/index.js"));
    assert!(bundle.unwrap().contains(".svelte-kit/vercel/entry.js"));
    assert_eq!(
        host.read_file(format!("{ROOT}/functions/node/render/package.json"))
            .as_deref(),
        Some(r#"{"type":"commonjs"}"#)
    );
    assert_eq!(
        host.read_file(format!("{ROOT}/config/routes.json")).as_deref(),
        Some(builtin_files::ROUTES_JSON)
    );
    assert!(host.exists(format!("{ROOT}/static/about/index.html")));
    assert!(host.exists(format!("{ROOT}/static/favicon.png")));
    assert!(host.exists(format!("{ROOT}/static/_app/start.js")));
    assert_eq!(
        host.read_file(".svelte-kit/vercel/entry.js").as_deref(),
        Some(builtin_files::ENTRY_JS)
    );
    assert_eq!(host.ignore_patterns(), vec![ROOT.to_string()]);
}

#[tokio::test]
async fn default_bundle_options() {
    let host = seeded_host();
    let bundler = RecordingBundler::new();

    adapter(&bundler).adapt(&host).await.unwrap();

    let config = bundler.last_config().unwrap();
    assert_eq!(config.entry_points, vec![".svelte-kit/vercel/entry.js".to_string()]);
    assert_eq!(
        config.outfile,
        Some(PathBuf::from(ROOT).join("functions/node/render/index.js"))
    );
    assert!(config.bundle);
    assert_eq!(config.platform, Some(Platform::Node));
    assert_eq!(bundler.configs().len(), 1);
}

#[tokio::test]
async fn custom_output_dir_moves_every_path() {
    let host = seeded_host();
    let bundler = RecordingBundler::new().writing_into(host.clone());
    let adapter = Adapter::builder()
        .output_dir("deploy/out")
        .files_dir("files")
        .bundler(Box::new(bundler.clone()))
        .build()
        .unwrap();

    let report = adapter.adapt(&host).await.unwrap();

    assert_eq!(report.static_dir, PathBuf::from("deploy/out/static"));
    assert_eq!(
        report.bundle_file,
        PathBuf::from("deploy/out/functions/node/render/index.js")
    );
    assert_eq!(report.routes_file, PathBuf::from("deploy/out/config/routes.json"));
    assert!(host.exists("deploy/out/functions/node/render/index.js"));
    assert!(!host.exists(ROOT));
}

#[tokio::test]
async fn override_output_is_passed_through_unmerged() {
    let host = seeded_host();
    let bundler = RecordingBundler::new();
    let replacement = BundleConfig {
        entry_points: vec!["src/custom-entry.js".into()],
        ..BundleConfig::default()
    };
    let expected = replacement.clone();

    let adapter = Adapter::builder()
        .files_dir("files")
        .bundler(Box::new(bundler.clone()))
        .bundle_override(move |_: BundleConfig| replacement.clone())
        .build()
        .unwrap();
    let report = adapter.adapt(&host).await.unwrap();

    assert_eq!(bundler.last_config(), Some(expected.clone()));
    assert_eq!(report.bundle_config, expected);
    assert!(report.override_applied);
}

#[tokio::test]
async fn bundler_failure_aborts_before_later_steps() {
    let host = seeded_host();
    let bundler = RecordingBundler::new().failing("Could not resolve \"svelte\"");

    let err = adapter(&bundler).adapt(&host).await.unwrap_err();

    assert!(matches!(err, AdapterError::Bundler { .. }));
    let operations: Vec<&str> = host
        .calls()
        .iter()
        .filter(|c| !matches!(c, HostCall::Log(..)))
        .map(HostCall::operation)
        .collect();
    assert_eq!(operations, vec!["update_ignores", "rimraf", "copy", "copy"]);
    assert!(!host.exists(format!("{ROOT}/functions/node/render/package.json")));
    assert!(!host.exists(format!("{ROOT}/config/routes.json")));
    assert!(!host.exists(format!("{ROOT}/static")));
}

#[tokio::test]
async fn stale_output_removed_before_new_files() {
    let host = seeded_host();
    host.put_file(format!("{ROOT}/functions/node/render/old-chunk.js"), "stale");
    host.put_file(format!("{ROOT}/static/removed-page.html"), "stale");
    let bundler = RecordingBundler::new().writing_into(host.clone());

    adapter(&bundler).adapt(&host).await.unwrap();

    assert!(!host.exists(format!("{ROOT}/functions/node/render/old-chunk.js")));
    assert!(!host.exists(format!("{ROOT}/static/removed-page.html")));

    let calls = host.calls();
    let rimraf = calls
        .iter()
        .position(|c| matches!(c, HostCall::Rimraf(p) if p == Path::new(ROOT)))
        .unwrap();
    let first_write = calls
        .iter()
        .position(|c| match c {
            HostCall::WriteFile(p) => p.starts_with(ROOT),
            HostCall::Copy { to, .. } => to.starts_with(ROOT),
            HostCall::Prerender(_)
            | HostCall::CopyStaticFiles(_)
            | HostCall::CopyClientFiles(_) => true,
            _ => false,
        })
        .unwrap();
    assert!(rimraf < first_write);
}

#[tokio::test]
async fn missing_template_file_propagates() {
    let host = MemoryHost::new();
    let bundler = RecordingBundler::new();

    let err = adapter(&bundler).adapt(&host).await.unwrap_err();

    assert!(matches!(err, AdapterError::Filesystem { ref path, .. } if path == Path::new("files/entry.js")));
    assert!(bundler.configs().is_empty());
}

#[tokio::test]
async fn prerender_failure_propagates() {
    let host = seeded_host().fail_on("prerender");
    let bundler = RecordingBundler::new();

    let err = adapter(&bundler).adapt(&host).await.unwrap_err();

    assert!(matches!(err, AdapterError::Host { operation: "prerender", .. }));
    assert!(
        !host
            .calls()
            .iter()
            .any(|c| matches!(c, HostCall::CopyStaticFiles(_)))
    );
}

#[tokio::test]
async fn progress_is_logged_as_minor() {
    let host = seeded_host();
    let bundler = RecordingBundler::new();

    adapter(&bundler).adapt(&host).await.unwrap();

    let messages: Vec<String> = host
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            HostCall::Log(LogTier::Minor, message) => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            "Generating serverless function...",
            "Prerendering static pages...",
            "Copying assets...",
            "Writing routes...",
        ]
    );
}
