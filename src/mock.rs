//! Mock provider for tests.

use crate::client::Converse;
use crate::error::{DemoError, Result};
use crate::types::{ConverseReply, ConverseRequest};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted [`Converse`] implementation.
///
/// Queued replies are returned in order, one per call. The mock records how
/// many calls it received and flips a shared `closed` flag when dropped, so
/// tests can verify both that the remote call was (or was not) attempted and
/// that the client is released on every exit path.
pub struct MockConverse {
    name: String,
    replies: Mutex<Vec<Result<ConverseReply>>>,
    calls: AtomicUsize,
    closed: Arc<AtomicBool>,
}

impl MockConverse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_reply(mut self, reply: ConverseReply) -> Self {
        self.replies.get_mut().expect("mock replies lock").push(Ok(reply));
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.replies
            .get_mut()
            .expect("mock replies lock")
            .push(Err(DemoError::Model(message.into())));
        self
    }

    /// Number of `converse` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared flag set to `true` when the mock is dropped.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

impl Drop for MockConverse {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Converse for MockConverse {
    fn name(&self) -> &str {
        &self.name
    }

    async fn converse(&self, _request: ConverseRequest) -> Result<ConverseReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut replies = self.replies.lock().expect("mock replies lock");
        if replies.is_empty() {
            Err(DemoError::Model("mock has no queued reply".to_string()))
        } else {
            replies.remove(0)
        }
    }
}
