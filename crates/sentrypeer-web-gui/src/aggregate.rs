//! Grouping of telemetry events along one dimension

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::telemetry::{Dimension, GroupKey, TelemetryEvent};

/// Summary of all events sharing one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub key: GroupKey,
    pub count: u64,
    pub last_seen: DateTime<Utc>,
}

/// Group `events` by `dimension` and sort the groups.
///
/// Order: `count` descending, then `last_seen` descending, then `key`
/// ascending. The order is total over unique keys, so the output does not
/// depend on input order.
pub fn aggregate<I>(dimension: Dimension, events: I) -> Vec<AggregationResult>
where
    I: IntoIterator<Item = TelemetryEvent>,
{
    let mut groups: HashMap<GroupKey, (u64, DateTime<Utc>)> = HashMap::new();

    for event in events {
        let Some(key) = dimension.key_of(&event) else {
            continue;
        };
        groups
            .entry(key)
            .and_modify(|(count, last_seen)| {
                *count += 1;
                if event.timestamp > *last_seen {
                    *last_seen = event.timestamp;
                }
            })
            .or_insert((1, event.timestamp));
    }

    let mut results: Vec<AggregationResult> = groups
        .into_iter()
        .map(|(key, (count, last_seen))| AggregationResult {
            key,
            count,
            last_seen,
        })
        .collect();
    results.sort_by(rank);
    results
}

fn rank(a: &AggregationResult, b: &AggregationResult) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.last_seen.cmp(&a.last_seen))
        .then_with(|| a.key.cmp(&b.key))
}

/// Total number of events represented by `results`
pub fn total_count(results: &[AggregationResult]) -> u64 {
    results.iter().map(|r| r.count).sum()
}
