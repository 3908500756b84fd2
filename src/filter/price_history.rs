use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat};

use crate::models::{ChartPoint, PriceHistory};

/// Unix timestamp (seconds) of an RFC 3339 date, None if it does not parse
pub fn iso_date_to_unix_timestamp(iso_date: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(iso_date)
        .ok()
        .map(|dt| dt.timestamp())
}

/// Align Over and Under histories on their union of timestamps, ascending.
/// A side with no point at a timestamp reads as 0.
pub fn merge_price_history(over: &PriceHistory, under: &PriceHistory) -> Vec<ChartPoint> {
    let mut by_timestamp: BTreeMap<i64, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for point in &over.history {
        by_timestamp.entry(point.t).or_default().0 = Some(point.p);
    }
    for point in &under.history {
        by_timestamp.entry(point.t).or_default().1 = Some(point.p);
    }

    by_timestamp
        .into_iter()
        .map(|(timestamp, (over_price, under_price))| ChartPoint {
            timestamp,
            over_price: over_price.unwrap_or(0.0),
            under_price: under_price.unwrap_or(0.0),
            date: DateTime::from_timestamp(timestamp, 0)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default(),
        })
        .collect()
}

/// Whether either side has anything to chart
pub fn has_price_history(over: &PriceHistory, under: &PriceHistory) -> bool {
    !over.history.is_empty() || !under.history.is_empty()
}
