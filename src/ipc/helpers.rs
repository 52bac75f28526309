use crate::ipc::error::err;
use crate::synth::{Dataset, SynthError};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

/// Domain errors keep their own code on the wire.
pub fn synth_err(id: &str, e: SynthError) -> serde_json::Value {
    err(id, &e.code, e.message, e.details)
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

pub fn require_dataset(dataset: Option<&Dataset>) -> Result<&Dataset, HandlerErr> {
    dataset.ok_or_else(|| HandlerErr::new("no_dataset", "call dataset.generate first"))
}
