//! Translation of [`BundleConfig`] into esbuild command-line arguments.
//!
//! | option value            | flag(s)                         |
//! |-------------------------|---------------------------------|
//! | `true`                  | `--name`                        |
//! | `false`                 | `--name=false`                  |
//! | string / number         | `--name=value`                  |
//! | array                   | `--name:item` per item          |
//! | array in `JOINED_LISTS` | `--name=a,b`                    |
//! | object                  | `--name:key=value` per entry    |
//! | `null`                  | (omitted)                       |
//!
//! Option names are converted from the JS API's camelCase to the CLI's
//! kebab-case (`logLevel` → `--log-level`).

use serde_json::Value;

use kitpack_core::domain::BundleConfig;

/// List options the esbuild CLI takes as a single comma-separated value.
/// Every other list (`external`, `pure`, `drop`, ...) repeats the flag.
pub const JOINED_LISTS: &[&str] = &[
    "target",
    "mainFields",
    "resolveExtensions",
    "conditions",
    "dropLabels",
];

/// Build the esbuild argument list for `config`. Entry points come first.
pub fn to_cli_args(config: &BundleConfig) -> Vec<String> {
    let mut args: Vec<String> = config.entry_points.clone();

    if config.bundle {
        args.push("--bundle".into());
    }
    if let Some(outfile) = &config.outfile {
        args.push(format!("--outfile={}", outfile.display()));
    }
    for path in &config.inject {
        args.push(format!("--inject:{}", path.display()));
    }
    if let Some(platform) = config.platform {
        args.push(format!("--platform={platform}"));
    }

    for (name, value) in &config.extra {
        let flag = kebab_case(name);
        match value {
            Value::Array(items) if JOINED_LISTS.contains(&name.as_str()) => {
                let joined: Vec<String> = items.iter().map(scalar).collect();
                args.push(format!("--{flag}={}", joined.join(",")));
            }
            _ => push_option(&mut args, &flag, value),
        }
    }
    args
}

fn push_option(args: &mut Vec<String>, flag: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(true) => args.push(format!("--{flag}")),
        Value::Bool(false) => args.push(format!("--{flag}=false")),
        Value::Number(n) => args.push(format!("--{flag}={n}")),
        Value::String(s) => args.push(format!("--{flag}={s}")),
        Value::Array(items) => {
            for item in items {
                args.push(format!("--{flag}:{}", scalar(item)));
            }
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                args.push(format!("--{flag}:{key}={}", scalar(item)));
            }
        }
    }
}

/// Render a nested value without JSON quoting for plain strings.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
