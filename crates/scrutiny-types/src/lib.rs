pub mod events;
pub mod report;
pub mod request;

pub use events::{AnalysisEvent, StreamEnvelope};
pub use report::{CheckTypeInfo, ComplianceReport, VisionModel};
pub use request::{AgentStep, AnalyzeRequest, CheckKind, ScreenImage, DEFAULT_VISION_MODEL, MAX_SCREENS};
