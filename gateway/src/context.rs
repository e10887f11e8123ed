use std::time::Instant;

use uuid::Uuid;

/// Per-request data attached to every GraphQL execution
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub start: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            start: Instant::now(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
