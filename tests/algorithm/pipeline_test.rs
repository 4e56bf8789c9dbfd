use epi_risk::algorithm::risk::{aggregate_by_cause, compute_indicators};
use epi_risk::{
    EventType, RiskConfig, RiskPipeline, RiskTier, Scope, ScoreWeights, TierThresholds,
    records_from_batch, run_pipeline,
};

use crate::utils::{causes, event_batch, record, sample_rows, two_cause_records};

fn sample_records() -> Vec<epi_risk::EventRecord> {
    let (records, report) = records_from_batch(
        &event_batch(&sample_rows()),
        epi_risk::MalformedRowPolicy::Reject,
        0,
    )
    .unwrap();
    assert_eq!(report.rows_dropped, 0);
    records
}

#[test]
fn test_two_cause_example() {
    let outcome = run_pipeline(&two_cause_records(), RiskConfig::default()).unwrap();

    assert_eq!(causes(outcome.top()), vec!["A", "B"]);
    let a = outcome.table.get("A").unwrap();
    let b = outcome.table.get("B").unwrap();

    assert_eq!((a.freq_norm, a.lethal_norm, a.sex_norm), (1.0, 0.0, 0.0));
    assert_eq!((b.freq_norm, b.lethal_norm, b.sex_norm), (0.0, 1.0, 0.0));
    assert_eq!(a.ire, 0.55);
    assert_eq!(b.ire, 0.35);
    assert_eq!(a.tier, RiskTier::Medium);
    assert_eq!(b.tier, RiskTier::Medium);
}

#[test]
fn test_exclusion_removes_causes() {
    let records = vec![
        record("Campo Grande", "Parto único espontâneo", EventType::Admission, 0, 500),
        record("Campo Grande", "Pneumonia", EventType::Admission, 5, 5),
        record("Campo Grande", "Asma", EventType::Admission, 2, 1),
    ];

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    assert_eq!(outcome.records_excluded, 1);
    assert!(outcome.table.get("Parto único espontâneo").is_none());
    assert_eq!(outcome.table.len(), 2);
}

#[test]
fn test_only_excluded_causes_gives_empty_table() {
    let records = vec![
        record("Campo Grande", "Parto único espontâneo", EventType::Admission, 0, 10),
        record("Campo Grande", "Anticoncepção", EventType::Admission, 0, 3),
    ];

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    assert!(outcome.table.is_empty());
    assert!(outcome.top().is_empty());
}

#[test]
fn test_aggregation_merges_rows() {
    let records = vec![
        record("Campo Grande", "X", EventType::Admission, 3, 2),
        record("Dourados", "X", EventType::Admission, 1, 0),
    ];

    let aggregates = aggregate_by_cause(&records);
    assert_eq!(aggregates.len(), 1);
    assert_eq!((aggregates[0].male_total, aggregates[0].female_total), (4, 2));
}

#[test]
fn test_death_only_cause_is_reported_not_scored() {
    let records = vec![
        record("Campo Grande", "Pneumonia", EventType::Admission, 5, 5),
        record("Campo Grande", "Infarto", EventType::Death, 3, 1),
    ];

    let joined = compute_indicators(&aggregate_by_cause(&records));
    assert_eq!(joined.dropped_death_only, vec!["Infarto".to_string()]);

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    assert!(outcome.table.get("Infarto").is_none());
    assert_eq!(outcome.dropped_death_only, vec!["Infarto".to_string()]);
}

#[test]
fn test_zero_frequency_cause_is_flagged() {
    let records = vec![
        record("Campo Grande", "Raiva", EventType::Admission, 0, 0),
        record("Campo Grande", "Pneumonia", EventType::Admission, 5, 5),
    ];

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    let raiva = outcome.table.get("Raiva").unwrap();
    assert!(raiva.insufficient_data);
    assert_eq!(raiva.lethality, 0.0);
    assert_eq!(raiva.sex_disparity, 0.0);
    assert!(raiva.ire.is_finite());
    assert!(!outcome.table.get("Pneumonia").unwrap().insufficient_data);
}

#[test]
fn test_identical_causes_score_zero() {
    let records = vec![
        record("Campo Grande", "X", EventType::Admission, 3, 3),
        record("Campo Grande", "Y", EventType::Admission, 3, 3),
    ];

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    assert!(outcome.table.records().iter().all(|r| r.ire == 0.0));
    assert!(outcome.table.records().iter().all(|r| r.tier == RiskTier::Low));
    // Equal scores fall back to cause order
    assert_eq!(causes(outcome.top()), vec!["X", "Y"]);
}

#[test]
fn test_all_cities_ranking() {
    let outcome = run_pipeline(&sample_records(), RiskConfig::default()).unwrap();

    assert_eq!(outcome.records_in_scope, 10);
    assert_eq!(outcome.records_excluded, 1);
    assert_eq!(
        causes(outcome.table.records()),
        vec!["Pneumonia", "Septicemia", "Fratura do fêmur", "Asma"]
    );
    assert_eq!(
        outcome.dropped_death_only,
        vec!["Infarto agudo do miocárdio".to_string()]
    );

    let tiers: Vec<RiskTier> = outcome.table.records().iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![RiskTier::High, RiskTier::Medium, RiskTier::Low, RiskTier::Low]
    );

    let pneumonia = outcome.table.get("Pneumonia").unwrap();
    assert_eq!(pneumonia.frequency, 326);
    assert_eq!(pneumonia.deaths_total, 33);
    assert_eq!((pneumonia.male_total, pneumonia.female_total), (160, 133));
}

#[test]
fn test_city_scope_normalises_within_city() {
    let config = RiskConfig::default().with_city("Campo Grande");
    let outcome = run_pipeline(&sample_records(), config).unwrap();

    assert_eq!(outcome.scope, Scope::city("Campo Grande"));
    assert_eq!(causes(outcome.top()), vec!["Pneumonia", "Septicemia"]);

    let pneumonia = outcome.table.get("Pneumonia").unwrap();
    assert_eq!(pneumonia.freq_norm, 1.0);
    assert_eq!(pneumonia.sex_norm, 1.0);
    assert!((pneumonia.ire - 0.65).abs() < 1e-12);
    assert_eq!(pneumonia.tier, RiskTier::High);

    let septicemia = outcome.table.get("Septicemia").unwrap();
    assert_eq!(septicemia.ire, 0.35);
    assert_eq!(septicemia.tier, RiskTier::Medium);
}

#[test]
fn test_repeated_runs_are_identical() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let records = sample_records();

    assert_eq!(pipeline.run(&records), pipeline.run(&records));
}

#[test]
fn test_top_n_limits_ranked_subset() {
    let outcome = run_pipeline(&sample_records(), RiskConfig::default().with_top_n(2)).unwrap();
    assert_eq!(causes(outcome.top()), vec!["Pneumonia", "Septicemia"]);
    assert_eq!(outcome.table.len(), 4);
}

#[test]
fn test_custom_weights_and_thresholds() {
    let config = RiskConfig::default()
        .with_weights(ScoreWeights {
            frequency: 0.0,
            lethality: 1.0,
            sex_disparity: 0.0,
        })
        .with_thresholds(TierThresholds {
            medium: 0.5,
            high: 0.9,
        });

    let outcome = run_pipeline(&two_cause_records(), config).unwrap();
    assert_eq!(causes(outcome.top()), vec!["B", "A"]);
    assert_eq!(outcome.table.get("B").unwrap().tier, RiskTier::High);
    assert_eq!(outcome.table.get("A").unwrap().tier, RiskTier::Low);
}

#[test]
fn test_custom_exclusion_patterns() {
    let config = RiskConfig::default().with_exclusion_patterns(["pneumonia"]);
    let outcome = run_pipeline(&sample_records(), config).unwrap();

    assert!(outcome.table.get("Pneumonia").is_none());
    assert!(outcome.table.get("Parto único espontâneo").is_some());
}

#[test]
fn test_score_all_scopes() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let outcomes = pipeline.score_all_scopes(&sample_records());

    let scopes: Vec<&str> = outcomes.iter().map(|o| o.scope.name()).collect();
    assert_eq!(scopes, vec!["Campo Grande", "Dourados", "Ponta Porã"]);

    let campo_grande = pipeline.run_scope(&sample_records(), &Scope::city("Campo Grande"));
    assert_eq!(outcomes[0], campo_grande);

    // A single cause has nothing to be normalised against
    let asma = outcomes[2].table.get("Asma").unwrap();
    assert_eq!(asma.ire, 0.0);
}

#[test]
fn test_huge_counts_do_not_overflow() {
    let half = u64::MAX / 2 + 1;
    let records = vec![
        record("Campo Grande", "A", EventType::Admission, half, 0),
        record("Dourados", "A", EventType::Admission, half, 0),
        record("Campo Grande", "B", EventType::Admission, 1, 1),
    ];

    let outcome = run_pipeline(&records, RiskConfig::default()).unwrap();
    let a = outcome.table.get("A").unwrap();
    assert_eq!(a.frequency, u64::MAX);
    assert_eq!(a.freq_norm, 1.0);
    assert!(a.ire.is_finite());
}
