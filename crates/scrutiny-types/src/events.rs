use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pipeline stage reported by progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStep {
    /// Requirements extraction from the BA document
    Requirements,
    /// Vision analysis of the uploaded screens
    ScreenAnalysis,
    /// Compliance cross-check between requirements and screens
    Compliance,
    /// Final report assembly
    Report,
}

/// One parsed `data:` payload from the analysis stream.
///
/// The backend sends a loose envelope rather than a tagged union: the
/// `event_type` field selects the kind and progress events carry whatever
/// extra fields the emitting agent included. Unknown fields are preserved
/// in `extra` so a consumer sees the event exactly as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEnvelope {
    /// Event kind: `progress`, `agent_output`, `complete` or `error`.
    /// Absent on some progress events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<AgentStep>,

    /// Overall progress, 0..=100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Terminal payload, present on `complete` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Classified stream event. Each envelope maps to exactly one variant and
/// is dispatched to exactly one consumer callback.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    /// Progress update. Includes `agent_output` events and any envelope
    /// whose `event_type` is absent or unrecognized.
    Progress(StreamEnvelope),
    /// Analysis finished; carries the envelope's `data` field.
    Complete { data: Value },
    /// The server reported a failure inside the stream.
    Error { message: String },
}

impl StreamEnvelope {
    /// Classify by the `event_type` discriminator.
    ///
    /// Only `"complete"` and `"error"` are terminal kinds; everything else,
    /// including a missing discriminator, is a progress event.
    pub fn classify(self) -> AnalysisEvent {
        match self.event_type.as_deref() {
            Some("complete") => AnalysisEvent::Complete {
                data: self.data.unwrap_or(Value::Null),
            },
            Some("error") => AnalysisEvent::Error {
                message: self
                    .message
                    .unwrap_or_else(|| "analysis stream reported an error".to_string()),
            },
            _ => AnalysisEvent::Progress(self),
        }
    }
}
