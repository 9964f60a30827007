//! Tests for TOML configuration loading and registry composition: appender
//! resolution, category hierarchy, additivity, and path-keyed sink sharing.

use std::fs;
use std::sync::Arc;
use streamlog::{Config, Error, FileMode, Level, Registry};
use tempfile::TempDir;

#[test]
fn empty_config_yields_a_bare_root() {
    let registry = Registry::from_toml("").unwrap();
    let root = registry.root();
    assert_eq!(root.name(), "");
    assert!(root.multiplexer().formatters().is_empty());
    // Any name resolves to the root when nothing is configured.
    assert_eq!(registry.category("app.db").name(), "");
}

#[test]
fn invalid_toml_is_a_parse_error() {
    assert!(matches!(
        Config::from_str("[appender"),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn unknown_appender_reference_fails() {
    let toml = r#"
        [category.app]
        appenders = ["nope"]
    "#;
    assert!(matches!(
        Registry::from_toml(toml),
        Err(Error::UnknownAppender(name)) if name == "nope"
    ));
}

#[test]
fn file_appender_without_path_fails() {
    let toml = r#"
        [appender.f]
        kind = "file"
    "#;
    assert!(matches!(
        Registry::from_toml(toml),
        Err(Error::MissingPath(name)) if name == "f"
    ));
}

#[test]
fn unknown_kind_and_mode_fail() {
    assert!(matches!(
        Registry::from_toml("[appender.x]\nkind = \"syslog\""),
        Err(Error::InvalidConfig(_))
    ));
    let toml = r#"
        [appender.x]
        kind = "file"
        path = "/tmp/x.log"
        mode = "rotate"
    "#;
    assert!(matches!(
        Registry::from_toml(toml),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn bad_threshold_fails() {
    let toml = r#"
        [appender.x]
        kind = "stderr"
        threshold = "loud"
    "#;
    assert!(matches!(
        Registry::from_toml(toml),
        Err(Error::UnknownLevel(_))
    ));
}

#[test]
fn bad_pattern_fails_at_configuration_time() {
    let dir = TempDir::new().unwrap();
    let toml = format!(
        r#"
        [appender.f]
        kind = "file"
        path = "{}"
        pattern = "%q"

        [category.app]
        appenders = ["f"]
        "#,
        dir.path().join("x.log").display()
    );
    assert!(matches!(
        Registry::from_toml(&toml),
        Err(Error::PatternSyntax(_))
    ));
}

#[test]
fn category_lookup_falls_back_to_nearest_ancestor() {
    let dir = TempDir::new().unwrap();
    let toml = format!(
        r#"
        [appender.f]
        kind = "file"
        path = "{}"

        [category."app.db"]
        appenders = ["f"]
        additive = false
        "#,
        dir.path().join("db.log").display()
    );
    let registry = Registry::from_toml(&toml).unwrap();

    assert_eq!(registry.category("app.db").name(), "app.db");
    assert_eq!(registry.category("app.db.conn.pool").name(), "app.db");
    assert_eq!(registry.category("app.web").name(), "");
}

#[test]
fn additive_category_inherits_root_appenders() {
    let dir = TempDir::new().unwrap();
    let root_path = dir.path().join("root.log");
    let app_path = dir.path().join("app.log");
    let toml = format!(
        r#"
        [appender.rootfile]
        kind = "file"
        path = "{}"
        pattern = "root: %m"

        [appender.appfile]
        kind = "file"
        path = "{}"
        pattern = "app: %m"

        [root]
        appenders = ["rootfile"]

        [category.app]
        appenders = ["appfile"]
        additive = true
        "#,
        root_path.display(),
        app_path.display()
    );
    let registry = Registry::from_toml(&toml).unwrap();

    let mut log = registry.logger("app", Level::Info).unwrap();
    log.value("hi").unwrap();
    log.finish().unwrap();

    assert_eq!(fs::read_to_string(&app_path).unwrap(), "app: hi\n");
    assert_eq!(fs::read_to_string(&root_path).unwrap(), "root: hi\n");
}

#[test]
fn non_additive_category_stops_inheritance() {
    let dir = TempDir::new().unwrap();
    let root_path = dir.path().join("root.log");
    let app_path = dir.path().join("app.log");
    let toml = format!(
        r#"
        [appender.rootfile]
        kind = "file"
        path = "{}"

        [appender.appfile]
        kind = "file"
        path = "{}"
        pattern = "%m"

        [root]
        appenders = ["rootfile"]

        [category.app]
        appenders = ["appfile"]
        additive = false
        "#,
        root_path.display(),
        app_path.display()
    );
    let registry = Registry::from_toml(&toml).unwrap();

    let mut log = registry.logger("app", Level::Info).unwrap();
    log.value("solo").unwrap();
    log.finish().unwrap();

    assert_eq!(fs::read_to_string(&app_path).unwrap(), "solo\n");
    assert_eq!(fs::read_to_string(&root_path).unwrap(), "");
}

#[test]
fn per_appender_thresholds_apply_through_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("warnings.log");
    let toml = format!(
        r#"
        [appender.warnings]
        kind = "file"
        path = "{}"
        pattern = "%p %m"
        threshold = "warn"

        [category.app]
        appenders = ["warnings"]
        additive = false
        "#,
        path.display()
    );
    let registry = Registry::from_toml(&toml).unwrap();
    let formatters = registry.category("app").multiplexer().formatters();
    assert_eq!(formatters.len(), 1);
    assert_eq!(formatters[0].threshold(), Level::Warn);

    registry.logger("app", Level::Info).unwrap().finish().unwrap();
    let mut log = registry.logger("app", Level::Warn).unwrap();
    log.value("careful").unwrap();
    log.finish().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "WARN careful\n");
}

#[test]
fn two_appenders_naming_the_same_path_share_one_sink() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.log");
    let toml = format!(
        r#"
        [appender.a]
        kind = "file"
        path = "{path}"
        pattern = "a: %m"

        [appender.b]
        kind = "file"
        path = "{path}"
        pattern = "b: %m"

        [category.one]
        appenders = ["a"]
        additive = false

        [category.two]
        appenders = ["b"]
        additive = false
        "#,
        path = path.display()
    );
    let registry = Registry::from_toml(&toml).unwrap();

    let sink_one = registry.category("one").multiplexer().formatters()[0].sink();
    let sink_two = registry.category("two").multiplexer().formatters()[0].sink();
    assert!(Arc::ptr_eq(sink_one, sink_two));

    // The registry's own sink map hands out the same instance for the path.
    let from_registry = registry.sinks().file(&path, FileMode::Append).unwrap();
    assert!(Arc::ptr_eq(sink_one, &from_registry));

    let mut log = registry.logger("one", Level::Info).unwrap();
    log.value("from one").unwrap();
    log.finish().unwrap();
    let mut log = registry.logger("two", Level::Info).unwrap();
    log.value("from two").unwrap();
    log.finish().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a: from one\nb: from two\n"
    );
}

#[test]
fn config_loads_from_a_file() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("out.log");
    let config_path = dir.path().join("streamlog.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [appender.f]
            kind = "file"
            path = "{}"
            pattern = "[%c] %m"

            [category.base]
            appenders = ["f"]
            additive = false
            "#,
            log_path.display()
        ),
    )
    .unwrap();

    let registry = Registry::from_path(&config_path).unwrap();
    let mut log = registry.logger("base", Level::Info).unwrap();
    log.value("configured").unwrap();
    log.finish().unwrap();

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "[base] configured\n"
    );
}
