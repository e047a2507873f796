use crate::StrataConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};

#[test]
fn test_defaults() {
    let config = StrataConfig::default();
    assert_eq!(config.app_name, "strata");
    assert!(config.is_development());
    assert!(!config.debug);
    assert_eq!(config.telemetry.log_level, "info");
    assert!(
        config
            .registry
            .excluded_module_prefixes
            .contains(&"strata-domain-core".to_string())
    );
}

#[test]
fn test_toml_overrides_defaults() {
    let figment = Figment::from(Serialized::defaults(StrataConfig::default())).merge(
        Toml::string(
            r#"
            app_env = "production"
            debug = true

            [telemetry]
            log_level = "debug"

            [registry]
            excluded_module_prefixes = ["std", "vendor-"]
            "#,
        ),
    );

    let config = StrataConfig::from_figment(figment).unwrap();
    assert!(config.is_production());
    assert!(config.debug);
    assert!(config.json_logs());
    assert_eq!(config.telemetry.log_level, "debug");
    assert_eq!(
        config.registry.excluded_module_prefixes,
        vec!["std".to_string(), "vendor-".to_string()]
    );
}

#[test]
fn test_explicit_json_flag_wins() {
    let figment = Figment::from(Serialized::defaults(StrataConfig::default())).merge(
        Toml::string(
            r#"
            app_env = "production"
            [telemetry]
            json = false
            "#,
        ),
    );

    let config = StrataConfig::from_figment(figment).unwrap();
    assert!(!config.json_logs());
}

#[test]
fn test_invalid_value_is_load_error() {
    let figment = Figment::new().merge(Toml::string("debug = \"maybe\""));
    assert!(StrataConfig::from_figment(figment).is_err());
}

#[test]
fn test_load_missing_dir_falls_back_to_defaults() {
    let config = StrataConfig::load("/nonexistent/strata-config").unwrap();
    assert_eq!(config.app_name, "strata");
}
