use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// A registered response. Several rows may share a key; the highest id is current
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub id: i64,
    pub key: String,
    pub response: Vec<u8>,
    pub created_at: String,
    pub created_by_sha: String,
}

// One access to an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    pub id: i64,
    pub key: String,
    pub created_at: String,
    pub request_sha: String,
    pub metadata: String, // serialized RequestMetadata
}

// Header set captured at access time, lowercase name -> value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestMetadata(pub BTreeMap<String, String>);

impl RequestMetadata {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            map.entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        Self(map)
    }
}

// query string for the log listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub offset: u32,
    // fingerprint filter
    pub sha: Option<String>,
}

impl LogsQuery {
    // empty `sha=` means no filter
    pub fn filter(&self) -> Option<&str> {
        self.sha.as_deref().filter(|s| !s.is_empty())
    }
}

// JSON rendering of a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryView {
    pub created_at: String,
    pub request_sha: String,
    pub metadata: serde_json::Value,
}

impl TryFrom<RequestLogEntry> for LogEntryView {
    type Error = serde_json::Error;

    fn try_from(entry: RequestLogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            metadata: serde_json::from_str(&entry.metadata)?,
            created_at: entry.created_at,
            request_sha: entry.request_sha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_metadata_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_static("curl/8.0"));
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json"));

        let metadata = RequestMetadata::from_headers(&headers);
        assert_eq!(metadata.0["user-agent"], "curl/8.0");
        assert_eq!(metadata.0["accept"], "text/html, application/json");
    }

    #[test]
    fn test_metadata_serializes_as_plain_object() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:3000"));
        let json = serde_json::to_string(&RequestMetadata::from_headers(&headers)).unwrap();
        assert_eq!(json, r#"{"host":"localhost:3000"}"#);
    }

    #[test]
    fn test_empty_sha_is_no_filter() {
        let query = LogsQuery {
            offset: 0,
            sha: Some(String::new()),
        };
        assert_eq!(query.filter(), None);
        let query = LogsQuery {
            offset: 0,
            sha: Some("abc".into()),
        };
        assert_eq!(query.filter(), Some("abc"));
    }

    #[test]
    fn test_view_parses_metadata() {
        let entry = RequestLogEntry {
            id: 1,
            key: "greet".into(),
            created_at: "2026-01-01 00:00:00".into(),
            request_sha: "ff".into(),
            metadata: r#"{"host":"x"}"#.into(),
        };
        let view = LogEntryView::try_from(entry).unwrap();
        assert_eq!(view.metadata["host"], "x");
    }
}
