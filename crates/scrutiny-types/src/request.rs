pub use crate::events::AgentStep;

/// Model the backend selects when the request does not name one.
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.0-flash-exp";

/// Upper bound on screens per analysis, enforced by the backend router.
pub const MAX_SCREENS: usize = 20;

/// Compliance checks the analysis pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Traceability,
    MissingFeatures,
    AcceptanceCriteria,
    UiText,
}

impl CheckKind {
    /// The exact string the backend expects in the `checks` form field.
    /// The backend keys its prompt table on these display strings, so they
    /// must be sent verbatim.
    pub fn wire_value(&self) -> &'static str {
        match self {
            CheckKind::Traceability => "Gereksinim ↔ Tasarım Eşleştirme (Traceability)",
            CheckKind::MissingFeatures => "Eksik/Fazla Özellik Tespiti",
            CheckKind::AcceptanceCriteria => "Acceptance Criteria Karşılaştırma",
            CheckKind::UiText => "UI Text/Label Doğrulama",
        }
    }

    /// Checks the backend runs when none are specified.
    pub fn default_set() -> Vec<CheckKind> {
        vec![CheckKind::Traceability, CheckKind::MissingFeatures]
    }
}

/// A design screen to analyze, sent as one file part of the multipart form.
#[derive(Clone)]
pub struct ScreenImage {
    pub file_name: String,
    /// MIME type; the backend rejects anything not under `image/`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ScreenImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

impl std::fmt::Debug for ScreenImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Request for both analyze endpoints (streaming and not).
///
/// Encoded as a multipart form: `ba_document`, optional `project_name` and
/// `extra_context`, `checks` (comma-joined wire values), `model`, and one
/// `images` file part per screen.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub ba_document: String,
    pub project_name: Option<String>,
    pub checks: Vec<CheckKind>,
    pub extra_context: Option<String>,
    pub model: String,
    pub images: Vec<ScreenImage>,
}

impl AnalyzeRequest {
    pub fn new(ba_document: impl Into<String>) -> Self {
        Self {
            ba_document: ba_document.into(),
            project_name: None,
            checks: CheckKind::default_set(),
            extra_context: None,
            model: DEFAULT_VISION_MODEL.to_string(),
            images: Vec::new(),
        }
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn checks(mut self, checks: Vec<CheckKind>) -> Self {
        self.checks = checks;
        self
    }

    pub fn extra_context(mut self, context: impl Into<String>) -> Self {
        self.extra_context = Some(context.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn image(mut self, image: ScreenImage) -> Self {
        self.images.push(image);
        self
    }

    /// Value of the `checks` form field.
    pub fn checks_field(&self) -> String {
        self.checks
            .iter()
            .map(CheckKind::wire_value)
            .collect::<Vec<_>>()
            .join(",")
    }
}
