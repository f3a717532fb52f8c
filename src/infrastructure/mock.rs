use crate::domain::errors::ScrapeError;
use crate::domain::ports::SnapshotSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned response for [`MockSnapshotSource`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(Vec<u8>),
    Status(String),
    Unreachable(String),
}

impl MockResponse {
    pub fn body(text: &str) -> Self {
        MockResponse::Body(text.as_bytes().to_vec())
    }

    fn into_result(self) -> Result<Vec<u8>, ScrapeError> {
        match self {
            MockResponse::Body(body) => Ok(body),
            MockResponse::Status(status) => Err(ScrapeError::Status { status }),
            MockResponse::Unreachable(reason) => Err(ScrapeError::Fetch { reason }),
        }
    }
}

/// In-memory snapshot source.
///
/// Responses are served in order; the last one repeats once the queue is
/// down to a single entry. Tracks how many fetches overlap.
pub struct MockSnapshotSource {
    responses: Mutex<VecDeque<MockResponse>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockSnapshotSource {
    pub fn new(response: MockResponse) -> Self {
        Self::sequence(vec![response])
    }

    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> MockResponse {
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        next.unwrap_or_else(|| MockResponse::Unreachable("no mock response configured".to_string()))
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch(&self) -> Result<Vec<u8>, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let response = self.next_response();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response.into_result()
    }
}
