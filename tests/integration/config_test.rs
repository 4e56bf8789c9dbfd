use epi_risk::{Error, RiskConfig, RiskPipeline, Scope, run_pipeline};

use crate::utils::two_cause_records;

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "scope": { "city": "Campo Grande" },
            "weights": { "frequency": 0.0, "lethality": 1.0, "sex_disparity": 0.0 },
            "top_n": 1,
            "malformed_rows": "reject"
        }"#,
    )
    .unwrap();

    let config = RiskConfig::from_json_file(&path).unwrap();
    assert_eq!(config.scope, Scope::city("Campo Grande"));
    assert_eq!(config.thresholds, RiskConfig::default().thresholds);

    let outcome = run_pipeline(&two_cause_records(), config).unwrap();
    assert_eq!(outcome.top().len(), 1);
    assert_eq!(outcome.top()[0].cause, "B");
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "weights": { "frequency": 0.5, "lethality": 0.5, "sex_disparity": 0.5 } }"#,
    )
    .unwrap();

    let err = RiskConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        RiskConfig::from_json_file(&path),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_pipeline_rejects_blank_patterns() {
    let config = RiskConfig::default().with_exclusion_patterns(["parto", "  "]);
    assert!(matches!(
        RiskPipeline::new(config),
        Err(Error::InvalidConfig(_))
    ));
}
