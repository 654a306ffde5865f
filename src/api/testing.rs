//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ApiClient, ApiConfig, ApiError, ApiRequest, MemoryStorage, RawResponse, Result, Transport};

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}

pub fn json_response(status: u16, value: serde_json::Value) -> RawResponse {
    RawResponse { status, body: value.to_string() }
}

pub fn mock_client() -> (ApiClient, Arc<MockTransport>, Arc<MemoryStorage>) {
    let mock = Arc::new(MockTransport::new());
    let storage = Arc::new(MemoryStorage::new());
    let client = ApiClient::with_parts(ApiConfig::default(), mock.clone(), storage.clone());
    (client, mock, storage)
}
