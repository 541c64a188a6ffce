use std::io::Write;

use super::*;
use crate::application::settings::HashWatch;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());

    let overrides = LoggingOverrides {
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_logging_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = LoggingOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_logging_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn defaults_resolve_without_sources() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert_eq!(settings.pager, PagerSettings::default());
}

#[test]
fn invalid_log_level_is_keyed() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("level rejected");
    assert!(matches!(err, LoadError::Invalid { ref key, .. } if key == "logging.level"));
}

#[test]
fn pager_errors_are_prefixed_with_section() {
    let mut raw = RawSettings::default();
    raw.pager.poll_interval_ms = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero interval rejected");
    assert!(matches!(err, LoadError::Invalid { ref key, .. } if key == "pager.poll_interval_ms"));
}

#[test]
fn config_file_feeds_pager_section() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(
        file,
        r##"
[logging]
level = "warn"

[pager]
hash_watch = "poll"
poll_interval_ms = 750
top_zone_px = 64.0

[pager.selectors]
footer = "#site-footer"
"##
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "folio",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "plan",
        "archive.html",
    ]);
    let settings = load(&args).expect("settings load");

    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert_eq!(settings.pager.hash_watch, HashWatch::Poll);
    assert_eq!(settings.pager.poll_interval.millis(), 750);
    assert_eq!(settings.pager.thresholds.top_zone, 64.0);
    assert_eq!(settings.pager.selectors.footer, "#site-footer");
}

#[test]
fn parse_plan_arguments() {
    let args = CliArgs::parse_from([
        "folio",
        "plan",
        "archive.html",
        "--page",
        "2",
        "--format",
        "json",
    ]);

    match args.command {
        Command::Plan(plan) => {
            assert_eq!(plan.file, std::path::PathBuf::from("archive.html"));
            assert_eq!(plan.page, Some(2));
            assert_eq!(plan.fragment, None);
            assert_eq!(plan.format, OutputFormat::Json);
        }
        other => panic!("expected plan command, got {other:?}"),
    }
}

#[test]
fn plan_page_conflicts_with_fragment() {
    let result = CliArgs::try_parse_from([
        "folio",
        "plan",
        "archive.html",
        "--page",
        "2",
        "--fragment",
        "#!/3",
    ]);
    assert!(result.is_err());
}

#[test]
fn parse_route_arguments_with_global_logging() {
    let args = CliArgs::parse_from([
        "folio",
        "route",
        "archive.html",
        "#!/2",
        "#!/99",
        "--log-level",
        "trace",
        "--log-json",
    ]);

    assert_eq!(args.logging.log_level.as_deref(), Some("trace"));
    assert_eq!(args.logging.log_json, Some(true));
    match args.command {
        Command::Route(route) => {
            assert_eq!(route.fragments, vec!["#!/2", "#!/99"]);
            assert_eq!(route.format, OutputFormat::Text);
        }
        other => panic!("expected route command, got {other:?}"),
    }
}

#[test]
fn route_requires_a_fragment() {
    assert!(CliArgs::try_parse_from(["folio", "route", "archive.html"]).is_err());
}
