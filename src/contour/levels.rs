use crate::error::{ContourError, Result};

/// Parse a threshold list such as `"[10, 20, 30]"` or `"10,20,30"`
///
/// Brackets are optional and whitespace is ignored. Every token must be a
/// finite number. Repeated thresholds are kept once, in first-seen order.
pub fn parse_thresholds(input: &str) -> Result<Vec<f64>> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    let mut thresholds = Vec::new();
    for token in inner.split(',') {
        let token = token.trim();
        let value: f64 = token.parse().map_err(|_| ContourError::ThresholdParse {
            token: token.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ContourError::ThresholdParse {
                token: token.to_string(),
            });
        }
        thresholds.push(value);
    }

    Ok(dedup_thresholds(&thresholds))
}

/// Drop repeated thresholds, keeping the first occurrence
pub fn dedup_thresholds(thresholds: &[f64]) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::with_capacity(thresholds.len());
    for &t in thresholds {
        if !unique.iter().any(|&u| u == t) {
            unique.push(t);
        }
    }
    unique
}

/// Thresholds at every multiple of `interval` within `[min_value, max_value]`
pub fn levels_from_interval(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(max_value >= min_value) {
        return Vec::new();
    }

    let first = (min_value / interval).ceil() as i64;
    let last = (max_value / interval).floor() as i64;

    (first..=last).map(|k| k as f64 * interval).collect()
}
