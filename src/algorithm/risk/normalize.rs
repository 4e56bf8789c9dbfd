//! Min-max normalisation of the raw indicators

use itertools::{Itertools, MinMaxResult};

use crate::models::{CauseIndicators, IndicatorNorms, NormalizedCause};

/// Rescale `values` to [0, 1] using their own minimum and maximum.
///
/// When every value is the same (including a single value) the column
/// carries no information and each output is 0.
#[must_use]
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    match values.iter().copied().minmax() {
        MinMaxResult::MinMax(min, max) if max > min => {
            let range = max - min;
            values
                .iter()
                .map(|v| ((v - min) / range).clamp(0.0, 1.0))
                .collect()
        }
        _ => vec![0.0; values.len()],
    }
}

/// Normalise frequency, lethality and sex disparity across one table
#[must_use]
pub fn normalize(indicators: Vec<CauseIndicators>) -> Vec<NormalizedCause> {
    let freq = min_max_normalize(
        &indicators
            .iter()
            .map(|i| i.frequency as f64)
            .collect::<Vec<_>>(),
    );
    let lethal = min_max_normalize(&indicators.iter().map(|i| i.lethality).collect::<Vec<_>>());
    let sex = min_max_normalize(
        &indicators
            .iter()
            .map(|i| i.sex_disparity)
            .collect::<Vec<_>>(),
    );

    indicators
        .into_iter()
        .enumerate()
        .map(|(idx, indicators)| NormalizedCause {
            indicators,
            norms: IndicatorNorms {
                freq_norm: freq[idx],
                lethal_norm: lethal[idx],
                sex_norm: sex[idx],
            },
        })
        .collect()
}
