use crate::db::Store;
use crate::registry::EndpointRegistry;
use crate::request_log::RequestLog;

// app's shared state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub registry: EndpointRegistry,
    pub request_log: RequestLog,
    pub body_limit: usize, // max bytes read for a create
}

impl AppState {
    // both components share the one connection
    pub fn new(store: Store, body_limit: usize) -> Self {
        Self {
            registry: EndpointRegistry::new(store.clone()),
            request_log: RequestLog::new(store),
            body_limit,
        }
    }
}
