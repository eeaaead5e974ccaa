//! # Scrutiny - Design-Compliance Analysis Client
//!
//! Scrutiny is a Rust client for the design-compliance analysis service:
//! - 🔍 **Design checks** (traceability, missing features, acceptance criteria, UI text)
//! - 🚀 **Real-time streaming** (per-agent progress via SSE)
//! - 📄 **Full reports** (markdown compliance reports with every agent's output)
//! - ⚡ **Async/await** (built on Tokio and reqwest)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrutiny::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DesignClient::new("http://localhost:8000/api/v1")?;
//!
//!     let request = AnalyzeRequest::new("The login screen must offer email and password fields.")
//!         .project_name("demo")
//!         .image(ScreenImage::new("login.png", "image/png", std::fs::read("login.png")?));
//!
//!     let report = client.analyze(request).await?;
//!     println!("{}", report.full_report);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming Progress
//!
//! The streaming call never returns an error: progress, completion and every
//! failure are delivered through the callback set, so a UI flow can wire the
//! stream straight into its state without handling a second error channel.
//!
//! ```rust,no_run
//! use scrutiny::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DesignClient::new("http://localhost:8000/api/v1")?;
//!
//!     let request = AnalyzeRequest::new("The login screen must offer email and password fields.")
//!         .image(ScreenImage::new("login.png", "image/png", std::fs::read("login.png")?));
//!
//!     let callbacks = StreamCallbacks::new()
//!         .on_progress(|envelope| {
//!             println!("[{}%] {}", envelope.progress.unwrap_or(0),
//!                 envelope.message.as_deref().unwrap_or(""));
//!         })
//!         .on_complete(|data| println!("done: {}", data))
//!         .on_error(|error| eprintln!("failed: {}", error));
//!
//!     client.analyze_stream(request, callbacks).await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Scrutiny consists of two composable crates:
//!
//! - **scrutiny-types**: Wire types (stream envelope, requests, reports)
//! - **scrutiny-client**: HTTP client and the SSE stream reader

// Re-export all public APIs
pub use scrutiny_client as client;
pub use scrutiny_types as types;

// Re-export commonly used types
pub use scrutiny_client::{
    ClientError, DesignClient, ParseWarning, ServiceConfig, StreamCallbacks,
};
pub use scrutiny_types::{
    AgentStep, AnalysisEvent, AnalyzeRequest, CheckKind, CheckTypeInfo, ComplianceReport,
    ScreenImage, StreamEnvelope, VisionModel,
};

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::client::{ClientError, DesignClient, ServiceConfig, StreamCallbacks};
    pub use crate::types::{
        AnalysisEvent, AnalyzeRequest, CheckKind, ScreenImage, StreamEnvelope,
    };
    pub use anyhow::Result;
}
