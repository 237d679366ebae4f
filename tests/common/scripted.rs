//! In-process `BackendService` answering from per-method scripts.

#![allow(dead_code)]

use apidemo::service::{
    ApiResponse, BackendService, EncodeRequest, EncodedText, HelloMessage, ServiceError,
    ServiceResult,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

struct Step<T> {
    delay: Duration,
    outcome: Result<ApiResponse<T>, String>,
}

#[derive(Default)]
pub struct ScriptedService {
    hello: Mutex<VecDeque<Step<HelloMessage>>>,
    encode: Mutex<VecDeque<Step<EncodedText>>>,
    encode_requests: Mutex<Vec<EncodeRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_hello(&self, response: ApiResponse<HelloMessage>, delay_ms: u64) {
        self.hello.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            outcome: Ok(response),
        });
    }

    pub fn fail_hello(&self, message: &str, delay_ms: u64) {
        self.hello.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            outcome: Err(message.to_string()),
        });
    }

    pub fn respond_encode(&self, response: ApiResponse<EncodedText>, delay_ms: u64) {
        self.encode.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            outcome: Ok(response),
        });
    }

    pub fn fail_encode(&self, message: &str, delay_ms: u64) {
        self.encode.lock().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            outcome: Err(message.to_string()),
        });
    }

    pub fn encode_requests(&self) -> Vec<EncodeRequest> {
        self.encode_requests.lock().clone()
    }
}

pub fn hello(message: &str) -> ApiResponse<HelloMessage> {
    ApiResponse::ok(HelloMessage {
        message: message.to_string(),
    })
}

pub fn encoded(base64: &str) -> ApiResponse<EncodedText> {
    ApiResponse::ok(EncodedText {
        base64: base64.to_string(),
    })
}

async fn play<T>(step: Option<Step<T>>) -> ServiceResult<T> {
    let Some(step) = step else {
        return Err(ServiceError::other("no scripted response"));
    };
    if !step.delay.is_zero() {
        tokio::time::sleep(step.delay).await;
    }
    step.outcome.map_err(ServiceError::Other)
}

impl BackendService for ScriptedService {
    async fn get_hello(&self) -> ServiceResult<HelloMessage> {
        let step = self.hello.lock().pop_front();
        play(step).await
    }

    async fn encode_base64(&self, request: EncodeRequest) -> ServiceResult<EncodedText> {
        self.encode_requests.lock().push(request);
        let step = self.encode.lock().pop_front();
        play(step).await
    }
}
