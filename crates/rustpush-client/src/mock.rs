//! Test doubles for the transport and log sink capabilities.

use std::sync::Arc;

use http::StatusCode;
use parking_lot::Mutex;
use rustpush_core::{PushError, PushResult};

use crate::log::LogSink;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Transport that records every request and answers with a canned response.
#[derive(Debug)]
pub(crate) struct MockTransport {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::from_u16(status).expect("valid test status code"),
            body: body.to_owned(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("at least one request was sent")
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> PushResult<HttpResponse> {
        self.requests.lock().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Transport whose every exchange fails before a response arrives.
#[derive(Debug)]
pub(crate) struct FailingTransport;

impl HttpTransport for FailingTransport {
    fn send(&self, _request: HttpRequest) -> PushResult<HttpResponse> {
        Err(PushError::Transport("connection refused".to_owned()))
    }
}

/// Log sink that keeps every line.
#[derive(Debug, Default)]
pub(crate) struct RecordingLogSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogSink {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for RecordingLogSink {
    fn log(&self, message: &str) {
        self.lines.lock().push(message.to_owned());
    }
}
