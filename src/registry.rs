use std::net::IpAddr;

use crate::db::Store;
use crate::error::{Error, Result};
use crate::fingerprint::fingerprint_addr;
use crate::models::Endpoint;

// key -> replayable response. Registering a key again adds a newer row, the newest is served
#[derive(Clone)]
pub struct EndpointRegistry {
    store: Store,
}

impl EndpointRegistry {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, key: &str, payload: &[u8], creator: IpAddr) -> Result<Endpoint> {
        self.store
            .insert_endpoint(key, payload, &fingerprint_addr(creator))
    }

    // pure read, logging the access is up to the caller
    pub fn fetch(&self, key: &str) -> Result<Endpoint> {
        self.store
            .current_endpoint(key)?
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }
}
