//! Build script for buckets-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bucket.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known keys per section with their inclusive integer range.
/// A `None` range marks a boolean key.
const SCHEMA: &[(&str, &[(&str, Option<(i64, i64)>)])] = &[
    (
        "timing",
        &[
            ("debounce_ms", Some((0, 100))),
            ("click_window_ms", Some((50, 2000))),
            ("confirm_long_ms", Some((200, 10_000))),
            ("team_long_ms", Some((200, 10_000))),
            ("settle_ms", Some((0, 5000))),
            ("peer_start_delay_ms", Some((0, 60_000))),
            ("exit_notice_ms", Some((0, 5000))),
        ],
    ),
    ("display", &[("addresses", Some((0, 0x7F)))]),
    ("rgb", &[("brightness", Some((0, 255)))]),
    ("peer", &[("enabled", None), ("channel", Some((1, 14)))]),
    ("audio", &[("enabled", None), ("volume", Some((0, 30)))]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bucket.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=bucket.toml");

    let config_path = Path::new("bucket.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bucket.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds bucket.toml as its device configuration.    ║\n\
            ║  Please create one in the buckets-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bucket.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in bucket.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_sections(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in bucket.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=bucket.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every section and key against `SCHEMA`
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return vec!["top level must be a table".to_string()],
    };

    for (section, body) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let body = match body {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (key, value) in body {
            let Some((_, range)) = keys.iter().find(|(name, _)| name == key) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            match (range, value) {
                (None, toml::Value::Boolean(_)) => {}
                (None, _) => errors.push(format!("[{}] {} must be true or false", section, key)),
                (Some(range), toml::Value::Integer(n)) => {
                    check_range(&mut errors, section, key, *n, *range);
                }
                (Some(range), toml::Value::Array(items)) if key == "addresses" => {
                    if items.is_empty() || items.len() > 2 {
                        errors.push(format!("[{}] {} takes one or two entries", section, key));
                    }
                    for item in items {
                        match item.as_integer() {
                            Some(n) => check_range(&mut errors, section, key, n, *range),
                            None => errors.push(format!("[{}] {} entries must be integers", section, key)),
                        }
                    }
                }
                (Some(_), _) => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }

    errors
}

fn check_range(errors: &mut Vec<String>, section: &str, key: &str, n: i64, (lo, hi): (i64, i64)) {
    if n < lo || n > hi {
        errors.push(format!("[{}] {} must be {}-{}", section, key, lo, hi));
    }
}
