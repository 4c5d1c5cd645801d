use std::net::IpAddr;

use crate::db::Store;
use crate::error::Result;
use crate::fingerprint::fingerprint_addr;
use crate::models::{RequestLogEntry, RequestMetadata};

// entries per page for log listings
pub const PAGE_SIZE: u32 = 10;

// Append-only access history per key
#[derive(Clone)]
pub struct RequestLog {
    store: Store,
}

impl RequestLog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // call once per successful fetch, never on a miss
    pub fn record(
        &self,
        key: &str,
        requester: IpAddr,
        metadata: &RequestMetadata,
    ) -> Result<RequestLogEntry> {
        let metadata = serde_json::to_string(metadata)?;
        self.store
            .insert_log_entry(key, &fingerprint_addr(requester), &metadata)
    }

    // One page, newest first. Nothing matching is Ok(vec![])
    pub fn query(
        &self,
        key: &str,
        offset: u32,
        fingerprint_filter: Option<&str>,
    ) -> Result<Vec<RequestLogEntry>> {
        self.store
            .list_log_entries(key, PAGE_SIZE, offset, fingerprint_filter)
    }
}
