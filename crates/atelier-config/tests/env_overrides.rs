use atelier_config::AtelierConfig;
use figment::Jail;

#[test]
fn env_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("ATELIER_GANTT__PADDING_DAYS", "4");
        jail.set_env("ATELIER_STORE__DATA_DIR", "/tmp/atelier");

        let config = AtelierConfig::load().expect("config loads");
        assert_eq!(config.gantt.padding_days, 4);
        assert_eq!(config.store.data_dir, "/tmp/atelier");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atelier")?;
        jail.create_file(
            ".atelier/config.toml",
            r"
[gantt]
padding_days = 9
min_visible_width = 0.05
",
        )?;
        jail.set_env("ATELIER_GANTT__PADDING_DAYS", "1");

        let config = AtelierConfig::load().expect("config loads");
        assert_eq!(config.gantt.padding_days, 1);
        assert!((config.gantt.min_visible_width - 0.05).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_category_order_parses_as_list() {
    Jail::expect_with(|jail| {
        jail.set_env("ATELIER_GANTT__CATEGORY_ORDER", r#"["civil", "design"]"#);

        let config = AtelierConfig::load().expect("config loads");
        assert_eq!(config.gantt.category_order, vec!["civil", "design"]);
        Ok(())
    });
}
