//! Tests for the deid configuration system.

use std::sync::Mutex;

use deid_core::config::*;
use deid_core::errors::ConfigError;

/// Serializes tests that touch `DEID_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_deid_env_vars() {
    for key in [
        "DEID_SEED",
        "DEID_JOIN_MISS",
        "DEID_SAMPLE_FRACTION",
        "DEID_LOG_LEVEL",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = DeidConfig::from_toml("").unwrap();

    assert_eq!(
        config.columns.identifiers,
        vec!["Attendance ID".to_string(), "Health Service ID".to_string()]
    );
    assert_eq!(config.columns.postcode, "Postcode");
    assert_eq!(config.columns.decile, "Index of Multiple Deprivation Decile");
    assert_eq!(config.reference.area, "Lower layer super output area");
    assert_eq!(config.reference.score, "Index of Multiple Deprivation");

    assert_eq!(config.pipeline.seed, None);
    assert_eq!(config.pipeline.join_miss, JoinMissPolicy::Drop);
    assert!(!config.pipeline.fail_on_empty_join);
    assert_eq!(config.pipeline.allowed_genders, vec!["Male", "Female"]);
    assert_eq!(config.pipeline.pseudonym.scheme, IdScheme::RandomDigits);
    assert_eq!(config.pipeline.pseudonym.digits, 6);
    assert!(config.pipeline.sample.is_none());

    assert_eq!(config.synth.pair.rho, 0.95);
    assert_eq!(config.mock.rows, 10_000);
    assert_eq!(config.mock.postcode_in_use, "No");
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[pipeline]
seed = 7
join_miss = "fail"

[pipeline.pseudonym]
scheme = "sequential"

[pipeline.sample]
fraction = 0.5
after = "attach_decile"
"#;
    let config = DeidConfig::from_toml(toml).unwrap();
    assert_eq!(config.pipeline.seed, Some(7));
    assert_eq!(config.pipeline.join_miss, JoinMissPolicy::Fail);
    assert_eq!(config.pipeline.pseudonym.scheme, IdScheme::Sequential);
    // Non-overridden fields keep defaults.
    assert_eq!(config.pipeline.pseudonym.digits, 6);
    let sample = config.pipeline.sample.unwrap();
    assert_eq!(sample.fraction, 0.5);
    assert_eq!(sample.after, StageKind::AttachDecile);
}

#[test]
fn config_serde_roundtrip() {
    let mut config = DeidConfig::default();
    config.pipeline.seed = Some(99);
    config.pipeline.sample = Some(SampleConfig::default());
    let toml_str = config.to_toml().unwrap();
    let back = DeidConfig::from_toml(&toml_str).unwrap();
    assert_eq!(back.pipeline.seed, Some(99));
    assert_eq!(back.mock.hospitals, config.mock.hospitals);
    assert_eq!(back.synth.pair, config.synth.pair);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = DeidConfig::from_toml("[pipeline\nseed = 1").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn sampling_before_the_join_is_rejected() {
    let mut config = DeidConfig::default();
    config.pipeline.sample = Some(SampleConfig {
        fraction: 0.5,
        after: StageKind::DropIdentifiers,
    });
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("pipeline.sample.after"));
}

#[test]
fn sample_fraction_out_of_range_is_rejected() {
    for fraction in [0.0, -0.1, 1.5, f64::NAN] {
        let mut config = DeidConfig::default();
        config.pipeline.sample = Some(SampleConfig {
            fraction,
            after: StageKind::GeneralizeLocation,
        });
        assert!(config.validate().is_err(), "fraction {fraction} accepted");
    }
}

#[test]
fn mismatched_mock_weights_are_rejected() {
    let mut config = DeidConfig::default();
    config.mock.gender_weights.pop();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn missing_config_file_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_deid_env_vars();
    let err = DeidConfig::load(Some(std::path::Path::new("/nonexistent/deid.toml")), None)
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn layered_resolution_cli_beats_env_beats_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_deid_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deid.toml");
    std::fs::write(
        &path,
        r#"
[pipeline]
seed = 1
join_miss = "impute"

[observability]
log_level = "warn"
"#,
    )
    .unwrap();

    let config = DeidConfig::load(Some(&path), None).unwrap();
    assert_eq!(config.pipeline.seed, Some(1));
    assert_eq!(config.pipeline.join_miss, JoinMissPolicy::Impute);

    std::env::set_var("DEID_SEED", "2");
    std::env::set_var("DEID_LOG_LEVEL", "debug");
    let config = DeidConfig::load(Some(&path), None).unwrap();
    assert_eq!(config.pipeline.seed, Some(2));
    assert_eq!(config.observability.log_level, "debug");

    let cli = CliOverrides {
        seed: Some(3),
        join_miss: Some(JoinMissPolicy::Fail),
        sample_fraction: Some(0.25),
        ..Default::default()
    };
    let config = DeidConfig::load(Some(&path), Some(&cli)).unwrap();
    assert_eq!(config.pipeline.seed, Some(3));
    assert_eq!(config.pipeline.join_miss, JoinMissPolicy::Fail);
    assert_eq!(config.pipeline.sample.as_ref().unwrap().fraction, 0.25);
    assert_eq!(
        config.pipeline.sample.as_ref().unwrap().after,
        StageKind::GeneralizeLocation
    );
    assert_eq!(config.observability.log_level, "debug");

    clear_deid_env_vars();
}

#[test]
fn bad_env_value_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_deid_env_vars();
    std::env::set_var("DEID_JOIN_MISS", "ignore");
    let err = DeidConfig::load(None, None).unwrap_err();
    clear_deid_env_vars();
    assert!(err.to_string().contains("DEID_JOIN_MISS"));
}

#[test]
fn stage_names_round_trip() {
    for kind in StageKind::ORDER {
        assert_eq!(StageKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(StageKind::from_name("sample"), None);
}
