//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and TOML parsing.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use crate::PlaydeckError;
use crate::config::{AdaptiveMode, InteractionConfig, PlayerConfig, Rendition, SourceConfig};
use crate::services::player::DeviceClass;

#[test]
fn single_url_source() {
    let config = PlayerConfig::from_toml_str(r#"source = "https://cdn.example/live.m3u8""#)
        .unwrap();

    assert_eq!(
        config.source,
        SourceConfig::Url("https://cdn.example/live.m3u8".to_string())
    );
    assert_eq!(
        config.source.renditions(),
        vec![Rendition::new("https://cdn.example/live.m3u8", 0)]
    );
    assert!(!config.adaptive.is_enabled());
    assert_eq!(config.interaction, InteractionConfig::default());
}

#[test]
fn renditions_are_sorted_descending() {
    let config = PlayerConfig::from_toml_str(
        r#"
        title = "Big Buck Bunny"
        source = [
            { src = "360.mp4", quality = 360 },
            { src = "720.mp4", quality = 720 },
            { src = "480.mp4", quality = 480 },
        ]
        "#,
    )
    .unwrap();

    let qualities: Vec<u32> = config
        .source
        .renditions()
        .iter()
        .map(|r| r.quality)
        .collect();
    assert_eq!(qualities, vec![720, 480, 360]);
    assert_eq!(config.title.as_deref(), Some("Big Buck Bunny"));
}

#[test]
fn adaptive_boolean_shorthand() {
    let config = PlayerConfig::from_toml_str(
        r#"
        source = "stream.m3u8"
        adaptive = true
        "#,
    )
    .unwrap();

    assert_eq!(config.adaptive, AdaptiveMode::Enabled(true));
    assert_eq!(config.adaptive.options().unwrap().max_recovery_attempts, 3);
}

#[test]
fn adaptive_options_table_keeps_engine_options() {
    let config = PlayerConfig::from_toml_str(
        r#"
        source = "stream.m3u8"

        [adaptive]
        max_recovery_attempts = 5
        lowLatencyMode = true
        "#,
    )
    .unwrap();

    let options = config.adaptive.options().unwrap();
    assert_eq!(options.max_recovery_attempts, 5);
    assert_eq!(
        options.engine.get("lowLatencyMode"),
        Some(&serde_json::Value::Bool(true))
    );
}

#[test]
fn interaction_section_overrides_defaults() {
    let config = PlayerConfig::from_toml_str(
        r#"
        source = "movie.mp4"
        device = "touch"

        [interaction]
        hide_delay_ms = 4000
        single_tap_debounce_ms = 0
        "#,
    )
    .unwrap();

    assert_eq!(config.interaction.hide_delay_ms, 4000);
    assert_eq!(config.interaction.single_tap_debounce_ms, 0);
    assert_eq!(config.interaction.double_tap_window_ms, 300);
    assert_eq!(config.device, Some(DeviceClass::Touch));
}

#[test]
fn empty_rendition_list_is_rejected() {
    let err = PlayerConfig::from_toml_str("source = []").unwrap_err();

    match err {
        PlaydeckError::InvalidConfigField { field, .. } => assert_eq!(field, "renditions"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_quality_is_rejected() {
    let err = PlayerConfig::from_toml_str(
        r#"source = [{ src = "a.mp4", quality = 480 }, { src = "b.mp4", quality = 480 }]"#,
    )
    .unwrap_err();

    assert!(matches!(err, PlaydeckError::InvalidConfigField { .. }));
}

#[test]
fn zero_seek_step_is_rejected() {
    let mut config = PlayerConfig::new(SourceConfig::from("movie.mp4"));
    config.interaction.seek_step_secs = 0;

    assert!(config.validate().is_err());
}

#[test]
fn malformed_toml_reports_location() {
    let err = PlayerConfig::from_toml_str("source = ").unwrap_err();

    match err {
        PlaydeckError::TomlParseError { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn serialize_roundtrip() {
    let mut original = PlayerConfig::new(SourceConfig::from(vec![
        Rendition::new("720.mp4", 720),
        Rendition::new("480.mp4", 480),
    ]));
    original.title = Some("Demo".to_string());

    let toml_str = original.to_toml_string().unwrap();
    let parsed = PlayerConfig::from_toml_str(&toml_str).unwrap();

    assert_eq!(format!("{original:?}"), format!("{parsed:?}"));
}

#[test]
fn schema_mentions_sections() {
    let schema = PlayerConfig::schema_json().unwrap();

    assert!(schema.contains("interaction"));
    assert!(schema.contains("adaptive"));
}
