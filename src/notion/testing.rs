//! Test doubles for [`BlockSource`].

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{BlockSource, NotionError};

/// Canned [`BlockSource`] that records how often and with what it was called
pub(crate) struct StubSource {
    response: Result<serde_json::Value, (u16, String)>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, String, Option<u32>)>>,
}

impl StubSource {
    pub(crate) fn ok(body: serde_json::Value) -> Self {
        Self {
            response: Ok(body),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        Self {
            response: Err((status, message.to_string())),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (token, block id, page size) of the most recent call
    pub(crate) fn last_call(&self) -> Option<(String, String, Option<u32>)> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockSource for StubSource {
    async fn list_children(
        &self,
        token: &str,
        block_id: &str,
        page_size: Option<u32>,
    ) -> Result<serde_json::Value, NotionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() =
            Some((token.to_string(), block_id.to_string(), page_size));

        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err((status, message)) => Err(NotionError::ApiError {
                status: *status,
                code: "stub_error".to_string(),
                message: message.clone(),
            }),
        }
    }
}
