use radcard_core::config::{
    default_config_path, load_config_from, migrate, save_config_to, RadcardConfig,
    CURRENT_VERSION, DEFAULT_TOP_MATCH_LIMIT,
};
use radcard_core::error::CoreError;
use radcard_core::models::content::Modality;

#[test]
fn v0_config_gains_top_match_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "content_dir": "/srv/cards", "default_modality": "MR" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.top_match_limit, DEFAULT_TOP_MATCH_LIMIT);
    assert_eq!(config.default_modality, Modality::Mr);
}

#[test]
fn newer_versions_are_refused() {
    let json = serde_json::json!({ "config_version": CURRENT_VERSION + 1 });
    let err = migrate(json, CURRENT_VERSION + 1).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedConfigVersion { .. }));
}

#[test]
fn zero_top_match_limit_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "content_dir": "c", "default_modality": "CT", "top_match_limit": 0 }"#,
    )
    .unwrap();

    assert!(matches!(
        load_config_from(&path),
        Err(CoreError::InvalidConfig(_))
    ));
}

#[test]
fn save_then_load_preserves_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = RadcardConfig {
        config_version: 0,
        top_match_limit: 5,
        ..RadcardConfig::default()
    };

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.top_match_limit, 5);
    assert_eq!(loaded.content_dir, config.content_dir);
}

#[test]
fn save_replaces_the_file_without_leaving_a_temp_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "stale").unwrap();

    let config = RadcardConfig {
        default_modality: Modality::Us,
        ..RadcardConfig::default()
    };
    save_config_to(&path, &config).unwrap();

    assert!(!dir.path().join("config.json.tmp").exists());
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("config.json")]);
    assert_eq!(load_config_from(&path).unwrap().default_modality, Modality::Us);
}

#[test]
fn default_path_lives_under_a_radcard_directory() {
    // Headless environments may have no config directory at all.
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("radcard/config.json"));
    }
}
