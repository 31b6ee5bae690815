use super::{normalize_backend_url, settings_from_sources, Settings, DEFAULT_BACKEND_URL};
use shared::domain::MAX_PDF_BYTES;

use std::{collections::HashMap, fs};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = settings_from_sources(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
}

#[test]
fn config_file_overrides_defaults() {
    let settings = settings_from_sources(
        Some("backend_url = \"http://qa.internal:9000\"\nmax_upload_bytes = 2048\ncommand_queue_capacity = 8\n"),
        env_from(&[]),
    );
    assert_eq!(settings.backend_url, "http://qa.internal:9000");
    assert_eq!(settings.max_upload_bytes, 2048);
    assert_eq!(settings.command_queue_capacity, 8);
}

#[test]
fn prefixed_env_wins_over_plain_env_and_file() {
    let settings = settings_from_sources(
        Some("backend_url = \"http://from-file:1\"\n"),
        env_from(&[
            ("BACKEND_URL", "http://plain-env:2"),
            ("APP__BACKEND_URL", "http://prefixed-env:3"),
        ]),
    );
    assert_eq!(settings.backend_url, "http://prefixed-env:3");
}

#[test]
fn plain_env_wins_over_file() {
    let settings = settings_from_sources(
        Some("backend_url = \"http://from-file:1\"\n"),
        env_from(&[("BACKEND_URL", "http://plain-env:2")]),
    );
    assert_eq!(settings.backend_url, "http://plain-env:2");
}

#[test]
fn unparsable_values_keep_previous_setting() {
    let settings = settings_from_sources(
        Some("this is not toml ==="),
        env_from(&[
            ("APP__MAX_UPLOAD_BYTES", "ten megabytes"),
            ("APP__COMMAND_QUEUE_CAPACITY", "0"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn upload_limit_is_capped_at_backend_maximum() {
    let from_env = settings_from_sources(
        None,
        env_from(&[("APP__MAX_UPLOAD_BYTES", "52428800")]),
    );
    assert_eq!(from_env.max_upload_bytes, MAX_PDF_BYTES);

    let from_file = settings_from_sources(Some("max_upload_bytes = 99999999\n"), env_from(&[]));
    assert_eq!(from_file.max_upload_bytes, MAX_PDF_BYTES);

    let lowered = settings_from_sources(
        None,
        env_from(&[("APP__MAX_UPLOAD_BYTES", "1048576")]),
    );
    assert_eq!(lowered.max_upload_bytes, 1024 * 1024);
}

#[test]
fn normalizes_trailing_slash_and_whitespace() {
    assert_eq!(
        normalize_backend_url("  http://localhost:8000/ ").expect("normalize"),
        "http://localhost:8000"
    );
}

#[test]
fn empty_backend_url_falls_back_to_default() {
    assert_eq!(
        normalize_backend_url("   ").expect("normalize"),
        DEFAULT_BACKEND_URL
    );
}

#[test]
fn rejects_non_http_schemes_and_garbage() {
    assert!(normalize_backend_url("ftp://example.com").is_err());
    assert!(normalize_backend_url("not a url").is_err());
}

#[test]
fn load_settings_reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pdf_qa.toml");
    fs::write(&path, "max_upload_bytes = 4096\n").expect("write");

    let settings = super::load_settings(&path);
    assert_eq!(settings.max_upload_bytes, 4096);
}
