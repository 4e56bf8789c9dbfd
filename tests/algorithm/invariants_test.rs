//! Properties that must hold for any input, checked on seeded random datasets

use epi_risk::algorithm::risk::classify;
use std::cmp::Ordering;

use epi_risk::models::rank_order;
use epi_risk::{EventRecord, EventType, ExclusionFilter, RiskConfig, RiskPipeline};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::utils::record;

const CITIES: [&str; 3] = ["Campo Grande", "Dourados", "Três Lagoas"];
const CAUSES: [&str; 8] = [
    "Pneumonia",
    "Septicemia",
    "Asma",
    "Catarata",
    "Fratura do fêmur",
    "Parto único espontâneo",
    "Anticoncepção",
    "Insuficiência cardíaca",
];

fn random_records(rng: &mut StdRng, n: usize) -> Vec<EventRecord> {
    (0..n)
        .map(|_| {
            let event_type = if rng.random_bool(0.6) {
                EventType::Admission
            } else {
                EventType::Death
            };
            record(
                CITIES[rng.random_range(0..CITIES.len())],
                CAUSES[rng.random_range(0..CAUSES.len())],
                event_type,
                rng.random_range(0..50),
                rng.random_range(0..50),
            )
        })
        .collect()
}

#[test]
fn test_scores_stay_in_unit_interval() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let thresholds = pipeline.config().thresholds;
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let size = rng.random_range(1..80);
        let records = random_records(&mut rng, size);
        let outcome = pipeline.run(&records);

        for row in outcome.table.records() {
            for value in [
                row.freq_norm,
                row.lethal_norm,
                row.sex_norm,
                row.lethality,
                row.sex_disparity,
            ] {
                assert!((0.0..=1.0).contains(&value), "{row:?}");
            }
            assert!((0.0..=1.0 + 1e-12).contains(&row.ire), "{row:?}");
            assert_eq!(row.tier, classify(row.ire, &thresholds));
            assert_eq!(row.frequency, row.admissions_total + row.deaths_total);
            assert_eq!(row.admissions_total, row.male_total + row.female_total);
        }
    }
}

#[test]
fn test_norm_columns_span_unit_interval() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50 {
        let size = rng.random_range(1..80);
        let outcome = pipeline.run(&random_records(&mut rng, size));
        let rows = outcome.table.records();

        let columns: [(Vec<f64>, Vec<f64>); 3] = [
            (
                rows.iter().map(|r| r.frequency as f64).collect(),
                rows.iter().map(|r| r.freq_norm).collect(),
            ),
            (
                rows.iter().map(|r| r.lethality).collect(),
                rows.iter().map(|r| r.lethal_norm).collect(),
            ),
            (
                rows.iter().map(|r| r.sex_disparity).collect(),
                rows.iter().map(|r| r.sex_norm).collect(),
            ),
        ];

        for (raw, norm) in columns {
            if norm.is_empty() {
                continue;
            }
            let min = norm.iter().copied().fold(f64::INFINITY, f64::min);
            let max = norm.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if raw.iter().all(|v| *v == raw[0]) {
                assert_eq!((min, max), (0.0, 0.0));
            } else {
                assert_eq!((min, max), (0.0, 1.0));
            }
        }
    }
}

#[test]
fn test_output_causes_unique_ranked_and_not_excluded() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let exclusion = ExclusionFilter::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let size = rng.random_range(0..60);
        let records = random_records(&mut rng, size);
        let outcome = pipeline.run(&records);
        let rows = outcome.table.records();

        let unique: FxHashSet<&str> = rows.iter().map(|r| r.cause.as_str()).collect();
        assert_eq!(unique.len(), rows.len());
        assert!(rows.iter().all(|r| !exclusion.is_excluded(&r.cause)));
        assert!(
            rows.windows(2)
                .all(|pair| rank_order(&pair[0], &pair[1]) != Ordering::Greater)
        );
        assert!(outcome.top().len() <= pipeline.config().top_n);

        // Every scored cause has admissions; dropped causes have none
        for cause in &outcome.dropped_death_only {
            assert!(!unique.contains(cause.as_str()));
        }
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let pipeline = RiskPipeline::new(RiskConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..20 {
        let mut records = random_records(&mut rng, 60);
        let before = pipeline.run(&records);
        records.shuffle(&mut rng);
        assert_eq!(before, pipeline.run(&records));
    }
}
