use super::*;

#[test]
fn defaults_force_dark_theme_and_carousel() {
    let config = BootstrapConfig::default();
    assert_eq!(config.theme, "dark");
    assert_eq!(config.theme_attribute, "data-theme");
    assert_eq!(config.theme_key, "theme");
    assert_eq!(config.obsolete_keys, vec!["autoChangeMode".to_owned()]);
    assert_eq!(config.ready_event, "swiperReady");
    assert_eq!(config.navigation_events, vec!["pjax:complete".to_owned(), "pjax:end".to_owned()]);
    assert_eq!(config.renavigation_delay(), Duration::from_millis(100));
    assert!(config.validate().is_ok());
}

#[test]
fn resource_selectors_match_by_marker() {
    let config = BootstrapConfig::default();
    assert_eq!(config.stylesheet.selector(), "link[href*=\"swiper.min.css\"]");
    assert_eq!(config.script.selector(), "script[src*=\"swiper.min.js\"]");
    assert_eq!(config.script.global.as_deref(), Some("Swiper"));
}

#[test]
fn partial_override_keeps_other_defaults() {
    let config = BootstrapConfig::from_json(r#"{"renavigation_delay_ms": 250, "ready_event": "carouselReady"}"#)
        .expect("valid override");
    assert_eq!(config.renavigation_delay_ms, 250);
    assert_eq!(config.ready_event, "carouselReady");
    assert_eq!(config.theme, "dark");
    assert_eq!(config.stylesheet, BootstrapConfig::default().stylesheet);
}

#[test]
fn resource_override_parses_lowercase_kind() {
    let raw = r#"{"script": {"kind": "script", "url": "/js/swiper.js", "marker": "swiper.js"}}"#;
    let config = BootstrapConfig::from_json(raw).expect("valid override");
    assert_eq!(config.script.url, "/js/swiper.js");
    assert_eq!(config.script.global, None);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = BootstrapConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn empty_theme_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"theme": "  "}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn unbounded_delay_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"renavigation_delay_ms": 60000}"#).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}

#[test]
fn swapped_resource_kinds_are_rejected() {
    let raw = r#"{"stylesheet": {"kind": "script", "url": "/a.js", "marker": "a.js"}}"#;
    assert!(matches!(BootstrapConfig::from_json(raw), Err(ConfigError::Invalid(_))));
}

#[test]
fn resource_without_marker_is_rejected() {
    let raw = r#"{"stylesheet": {"kind": "stylesheet", "url": "/a.css", "marker": ""}}"#;
    assert!(matches!(BootstrapConfig::from_json(raw), Err(ConfigError::Invalid(_))));
}
