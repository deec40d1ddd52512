//! In-process executor for unit tests: replays scripted outcomes and
//! records every request it was asked to send.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Executor;

#[derive(Debug, Clone)]
pub struct Call {
    pub request: HttpRequest,
    pub timeout: Duration,
}

#[derive(Debug, Default)]
struct State {
    outcomes: VecDeque<Result<HttpResponse, TransportError>>,
    calls: Vec<Call>,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    state: Arc<Mutex<State>>,
}

impl Recorder {
    pub fn respond(&self, status: u16, body: &str) {
        self.state.lock().unwrap().outcomes.push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, err: TransportError) {
        self.state.lock().unwrap().outcomes.push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl Executor for Recorder {
    fn execute(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call { request, timeout });
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}
