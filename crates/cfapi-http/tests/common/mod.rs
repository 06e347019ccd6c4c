#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use cfapi_http::{Transport, TransportError, TransportResponse, WireRequest};

/// Records every request and replays queued responses.
///
/// Once the queue is empty it keeps answering with the last response.
#[derive(Default)]
pub struct RecordingTransport {
    requests: RefCell<Vec<WireRequest>>,
    replies: RefCell<VecDeque<Result<TransportResponse, TransportError>>>,
    last: RefCell<Option<TransportResponse>>,
}

impl RecordingTransport {
    pub fn replying(body: &str) -> Self {
        let transport = Self::default();
        transport.push(body);
        transport
    }

    pub fn push(&self, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Ok(TransportResponse::new(200, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> WireRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(response)) => {
                *self.last.borrow_mut() = Some(response.clone());
                Ok(response)
            }
            Some(Err(error)) => Err(error),
            None => Ok(self
                .last
                .borrow()
                .clone()
                .unwrap_or_else(|| TransportResponse::new(200, r#"{"success":true}"#))),
        }
    }
}
