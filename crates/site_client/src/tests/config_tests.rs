use super::*;

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("site_client_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_build_a_fallback_config() {
    let config = Settings::default().into_config().expect("config");
    assert_eq!(
        config.on_backend_unavailable,
        BackendUnavailablePolicy::FallbackToDemo
    );
    assert_eq!(
        config.endpoint(Backend::Content, "v2/projects"),
        "http://127.0.0.1:8080/api-wordpress/wp/v2/projects"
    );
    assert_eq!(
        config.endpoint(Backend::Transactional, "/contact"),
        "http://127.0.0.1:8080/api-laravel/contact"
    );
}

#[test]
fn endpoint_handles_trailing_slash_and_bare_host() {
    let config = ClientConfig::new("https://cms.example.org/", "https://hr.example.org/api/")
        .expect("config");
    assert_eq!(
        config.endpoint(Backend::Content, "v2/posts"),
        "https://cms.example.org/v2/posts"
    );
    assert_eq!(
        config.endpoint(Backend::Transactional, "donations"),
        "https://hr.example.org/api/donations"
    );
}

#[test]
fn policy_names_round_trip() {
    assert_eq!(
        "fallback-to-demo".parse::<BackendUnavailablePolicy>().expect("parse"),
        BackendUnavailablePolicy::FallbackToDemo
    );
    assert_eq!(
        " RAISE ".parse::<BackendUnavailablePolicy>().expect("parse"),
        BackendUnavailablePolicy::Raise
    );
    assert!(matches!(
        "retry".parse::<BackendUnavailablePolicy>(),
        Err(ConfigError::UnknownPolicy(_))
    ));
    assert_eq!(BackendUnavailablePolicy::Raise.to_string(), "raise");
    assert_eq!(
        serde_json::to_value(BackendUnavailablePolicy::FallbackToDemo).expect("json"),
        "fallback-to-demo"
    );
}

#[test]
fn rejects_relative_and_non_http_urls() {
    assert!(matches!(
        ClientConfig::new("/api-wordpress", "http://localhost/api"),
        Err(ConfigError::InvalidUrl { key: "content_base_url", .. })
    ));
    assert!(matches!(
        ClientConfig::new("http://localhost/wp", "mailto:ops@example.org"),
        Err(ConfigError::UnsupportedUrl { key: "transactional_base_url", .. })
    ));
}

#[test]
fn file_values_replace_defaults() {
    let path = temp_settings_file(
        r#"
content_base_url = "https://cms.example.org/wp-json"
on_backend_unavailable = "raise"
"#,
    );

    let mut settings = Settings::default();
    settings.apply_file(&path);
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.content_base_url, "https://cms.example.org/wp-json");
    assert_eq!(settings.transactional_base_url, DEFAULT_TRANSACTIONAL_BASE_URL);
    assert_eq!(settings.on_backend_unavailable, "raise");
}

#[test]
fn malformed_or_missing_file_keeps_defaults() {
    let path = temp_settings_file("content_base_url = [");
    let mut settings = Settings::default();
    settings.apply_file(&path);
    fs::remove_file(&path).expect("cleanup");
    assert_eq!(settings, Settings::default());

    settings.apply_file(&env::temp_dir().join("site_client_settings_does_not_exist.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_overrides_win_over_site_prefixed() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SITE_CONTENT_BASE_URL", "http://site.example.org/wp"),
        ("APP__CONTENT_BASE_URL", "http://app.example.org/wp"),
        ("SITE_TRANSACTIONAL_BASE_URL", "http://site.example.org/hr"),
        ("SITE_ON_BACKEND_UNAVAILABLE", "raise"),
    ]);

    let mut settings = Settings::default();
    settings.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
    let config = settings.into_config().expect("config");

    assert_eq!(config.content_base_url.as_str(), "http://app.example.org/wp");
    assert_eq!(
        config.transactional_base_url.as_str(),
        "http://site.example.org/hr"
    );
    assert_eq!(config.on_backend_unavailable, BackendUnavailablePolicy::Raise);
}
