//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use atelier_config::{AtelierConfig, ConfigError};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_gantt_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gantt]
padding_days = 5
min_visible_width = 0.02
category_order = ["design", "civil", "painting"]
"#,
        )?;

        let config: AtelierConfig = Figment::from(Serialized::defaults(AtelierConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.gantt.padding_days, 5);
        assert!((config.gantt.min_visible_width - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.gantt.category_order, vec!["design", "civil", "painting"]);
        assert_eq!(config.gantt.category_rank("painting"), Some(2));
        Ok(())
    });
}

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
data_dir = "/var/lib/atelier"
"#,
        )?;

        let config: AtelierConfig = Figment::from(Serialized::defaults(AtelierConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.data_dir, "/var/lib/atelier");
        assert_eq!(config.gantt.padding_days, 2);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atelier")?;
        jail.create_file(
            ".atelier/config.toml",
            r"
[gantt]
padding_days = 7
",
        )?;

        let config = AtelierConfig::load().expect("config loads");
        assert_eq!(config.gantt.padding_days, 7);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atelier")?;
        jail.create_file(
            ".atelier/config.toml",
            r"
[gantt]
min_visible_width = 1.5
",
        )?;

        let result = AtelierConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn malformed_toml_surfaces_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atelier")?;
        jail.create_file(".atelier/config.toml", "[gantt\npadding_days = ")?;

        let result = AtelierConfig::load();
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
