//! Telemetry event model
//!
//! Mirrors the event shape produced by the SentryPeer daemon and the five
//! dimensions the dashboard aggregates on.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Grouping key of an aggregation row.
///
/// Missing or unusable values share the [`GroupKey::Unknown`] bucket, which
/// never collides with a real value spelled "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Value(String),
    Unknown,
}

impl GroupKey {
    pub fn is_unknown(&self) -> bool {
        matches!(self, GroupKey::Unknown)
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            GroupKey::Value(value) => Some(value),
            GroupKey::Unknown => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Value(value) => f.write_str(value),
            GroupKey::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Value(value.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        GroupKey::Value(value)
    }
}

/// One captured SIP interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Source IP address (IPv4 dotted quad or IPv6 literal)
    #[serde(alias = "ip_address")]
    pub source_ip: String,
    /// SIP User-Agent header, if the scanner sent one
    #[serde(default)]
    pub user_agent: Option<String>,
    /// SIP request method (INVITE, REGISTER, OPTIONS, ...)
    #[serde(default, alias = "method")]
    pub sip_method: Option<String>,
    /// Number the scanner tried to call
    #[serde(default)]
    pub called_number: Option<String>,
    /// ISO 3166 alpha-2 country code geolocated from `source_ip`
    #[serde(default)]
    pub country: Option<String>,
    /// Capture time (UTC)
    #[serde(alias = "event_timestamp", with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Grouping axis of an aggregation view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    SourceIp,
    UserAgent,
    SipMethod,
    Country,
    Number,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::SourceIp,
        Dimension::UserAgent,
        Dimension::SipMethod,
        Dimension::Country,
        Dimension::Number,
    ];

    /// Selector token used in logs and URLs
    pub fn selector(&self) -> &'static str {
        match self {
            Dimension::SourceIp => "source-ip",
            Dimension::UserAgent => "user-agent",
            Dimension::SipMethod => "sip-method",
            Dimension::Country => "country",
            Dimension::Number => "number",
        }
    }

    /// Honeypot API path serving this dimension's events
    pub fn endpoint(&self) -> &'static str {
        match self {
            Dimension::SourceIp => "/ip-addresses",
            Dimension::UserAgent => "/user-agents",
            Dimension::SipMethod => "/sip-methods",
            Dimension::Country => "/countries",
            Dimension::Number => "/numbers",
        }
    }

    /// Column heading for the grouping key
    pub fn key_heading(&self) -> &'static str {
        match self {
            Dimension::SourceIp => "Source IP",
            Dimension::UserAgent => "User Agent",
            Dimension::SipMethod => "SIP Method",
            Dimension::Country => "Country",
            Dimension::Number => "Called Number",
        }
    }

    /// Plural noun used in messages ("Failed to load user agents")
    pub fn plural(&self) -> &'static str {
        match self {
            Dimension::SourceIp => "source IPs",
            Dimension::UserAgent => "user agents",
            Dimension::SipMethod => "SIP methods",
            Dimension::Country => "countries",
            Dimension::Number => "called numbers",
        }
    }

    /// Grouping key of `event` along this dimension.
    ///
    /// Returns `None` when the event carries no signal for the dimension and
    /// must be left out of the aggregation. Only [`Dimension::Number`] ever
    /// excludes; the other dimensions fold unusable values into
    /// [`GroupKey::Unknown`].
    pub fn key_of(&self, event: &TelemetryEvent) -> Option<GroupKey> {
        match self {
            Dimension::SourceIp => Some(GroupKey::from(event.source_ip.as_str())),
            Dimension::UserAgent => Some(
                non_blank(event.user_agent.as_deref())
                    .map(GroupKey::from)
                    .unwrap_or(GroupKey::Unknown),
            ),
            Dimension::SipMethod => Some(
                non_blank(event.sip_method.as_deref())
                    .map(|method| GroupKey::Value(method.to_ascii_uppercase()))
                    .unwrap_or(GroupKey::Unknown),
            ),
            Dimension::Country => Some(country_key(event.country.as_deref())),
            Dimension::Number => non_blank(event.called_number.as_deref()).map(GroupKey::from),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize a country code, folding anything that is not a two-letter
/// code into the unknown bucket
fn country_key(country: Option<&str>) -> GroupKey {
    match non_blank(country) {
        Some(code) if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) => {
            GroupKey::Value(code.to_ascii_uppercase())
        }
        _ => GroupKey::Unknown,
    }
}

/// Finite sequence of events returned by one API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBatch {
    events: Vec<TelemetryEvent>,
    total: Option<u64>,
}

impl EventBatch {
    pub fn new(events: Vec<TelemetryEvent>) -> Self {
        Self {
            events,
            total: None,
        }
    }

    /// Attach the daemon's count of all stored events
    pub fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    /// Events stored by the daemon, when the response reported it. May
    /// exceed [`len`](Self::len) once the fetch window is full.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Capture time of the most recent event
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.events.iter().map(|e| e.timestamp).max()
    }

    /// Number of events captured strictly after `instant`
    pub fn count_after(&self, instant: DateTime<Utc>) -> usize {
        self.events.iter().filter(|e| e.timestamp > instant).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TelemetryEvent> {
        self.events.iter()
    }
}

impl IntoIterator for EventBatch {
    type Item = TelemetryEvent;
    type IntoIter = std::vec::IntoIter<TelemetryEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl FromIterator<TelemetryEvent> for EventBatch {
    fn from_iter<I: IntoIterator<Item = TelemetryEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Wire decoding
// ============================================================================

/// Accepted response bodies: a bare array, or an envelope with a total
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsBody {
    Bare(Vec<TelemetryEvent>),
    Envelope {
        events: Vec<TelemetryEvent>,
        #[serde(default)]
        events_total: Option<u64>,
    },
}

/// Daemon reply for an empty data set (`{"message": "No bad actors found"}`)
#[derive(Debug, Deserialize)]
pub struct DaemonMessage {
    pub message: String,
}

/// Decode a successful telemetry response body
pub fn decode_events(body: &str) -> Result<EventBatch, serde_json::Error> {
    Ok(match serde_json::from_str::<EventsBody>(body)? {
        EventsBody::Bare(events) => EventBatch::new(events),
        EventsBody::Envelope {
            events,
            events_total,
        } => EventBatch::new(events).with_total(events_total),
    })
}

/// Decode the daemon's "nothing found" message, if `body` is one
pub fn decode_daemon_message(body: &str) -> Option<DaemonMessage> {
    serde_json::from_str(body).ok()
}

/// Parse a daemon timestamp: RFC 3339, or naive UTC `YYYY-MM-DD HH:MM:SS[.ffffff]`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
