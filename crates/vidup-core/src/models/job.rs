use serde_json::Value as JsonValue;

use crate::error::{WorkflowError, WorkflowResult};

/// The only status value that marks a conversion as finished. Compared
/// case-sensitively and without trimming.
pub const COMPLETE_STATUS: &str = "COMPLETE";

/// Response of POST /job-status.
///
/// `status` is extracted for gating; the whole payload is kept verbatim
/// so extra fields reach the display untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatus {
    pub status: String,
    pub payload: JsonValue,
}

impl JobStatus {
    pub fn from_payload(payload: JsonValue) -> WorkflowResult<Self> {
        let status = payload
            .as_object()
            .ok_or_else(|| WorkflowError::invalid_response("job status is not a JSON object"))?
            .get("status")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| WorkflowError::invalid_response("field 'status' missing or not a string"))?
            .to_string();

        Ok(Self { status, payload })
    }

    pub fn is_complete(&self) -> bool {
        self.status == COMPLETE_STATUS
    }

    /// Two-space indented JSON, as shown to the user.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|_| self.payload.to_string())
    }
}
