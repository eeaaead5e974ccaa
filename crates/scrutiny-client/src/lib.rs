pub mod buffer_utils;
pub mod client;
pub mod config;
pub mod error;
pub mod streaming;

pub use client::DesignClient;
pub use config::ServiceConfig;
pub use error::{ClientError, Result};
pub use streaming::{
    dispatch_sse_stream, parse_analysis_stream, parse_sse_chunks, ParseWarning, StreamCallbacks,
    StreamItem,
};

pub use scrutiny_types::{
    AgentStep, AnalysisEvent, AnalyzeRequest, CheckKind, CheckTypeInfo, ComplianceReport,
    ScreenImage, StreamEnvelope, VisionModel,
};
