//! Client flow controller for the "create post" screen.
//!
//! A sans-IO state machine: it hands out the request to send, takes the
//! response back, and builds the record to save. The UI layer owns the
//! actual HTTP calls.
//!
//! ```text
//! Idle ──submit──▶ Generating ──ok──▶ Previewing ──save──▶ Saving ──ok──▶ Idle
//!   ▲                  │                  │                  │
//!   └──────error───────┘                  └──submit (regenerate)
//! ```

use scribe_core::domain::{
    DEFAULT_TONE, DEFAULT_WORD_COUNT, GenerationRequest, NewBlogPost, PostStatus,
};

use crate::response::GenerationResult;

/// Which generation route a submit goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Ai,
    Demo,
}

impl GenerationMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            GenerationMode::Ai => "/api/generate-blog",
            GenerationMode::Demo => "/api/demo-blog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Generating(GenerationMode),
    Previewing,
    Saving(PostStatus),
}

/// Raw form state, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationForm {
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    /// One of the word-count presets, as the select's string value.
    pub word_count: String,
    /// Comma-separated.
    pub keywords: String,
}

impl Default for GenerationForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            target_audience: String::new(),
            tone: DEFAULT_TONE.to_string(),
            word_count: DEFAULT_WORD_COUNT.to_string(),
            keywords: String::new(),
        }
    }
}

impl GenerationForm {
    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }

    /// Selected preset; unparsable input falls back to the default.
    pub fn word_count_value(&self) -> u32 {
        self.word_count
            .trim()
            .parse()
            .unwrap_or(DEFAULT_WORD_COUNT)
    }

    /// Keyword field split on commas, trimmed, empties dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn to_request(&self) -> GenerationRequest {
        let request = GenerationRequest::new(self.topic.trim())
            .with_tone(self.tone.clone())
            .with_word_count(self.word_count_value())
            .with_keywords(self.keyword_list());

        if self.target_audience.trim().is_empty() {
            request
        } else {
            request.with_audience(self.target_audience.trim())
        }
    }

    fn to_post(&self, content: String, status: PostStatus) -> NewBlogPost {
        NewBlogPost {
            title: format!("Blog Post: {}", self.topic.trim()),
            content,
            status,
            topic: self.topic.trim().to_string(),
            target_audience: self.target_audience.trim().to_string(),
            tone: self.tone.clone(),
            word_count: self.word_count_value(),
            seo_keywords: self.keyword_list(),
        }
    }
}

/// Canned help shown under a generation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    CredentialSetup,
    QuotaCheck,
    RateLimitBackoff,
}

impl Remediation {
    /// Pick a panel by matching the error text.
    pub fn for_error(error: &str) -> Option<Self> {
        let error = error.to_lowercase();
        if error.contains("api key") {
            Some(Remediation::CredentialSetup)
        } else if error.contains("quota") {
            Some(Remediation::QuotaCheck)
        } else if error.contains("rate limit") {
            Some(Remediation::RateLimitBackoff)
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Remediation::CredentialSetup => "To fix this:",
            Remediation::QuotaCheck => "Quota exceeded:",
            Remediation::RateLimitBackoff => "Rate limit exceeded:",
        }
    }

    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Remediation::CredentialSetup => &[
                "Get an API key from your AI provider's console",
                "Add it to your .env file (GEMINI_API_KEY or OPENAI_API_KEY)",
                "Restart the server",
            ],
            Remediation::QuotaCheck => &[
                "Check your usage limits in your AI provider's console",
                "Or try the demo version while checking your quota",
            ],
            Remediation::RateLimitBackoff => &[
                "Wait a few minutes before trying again",
                "Or use the demo version",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("A request is already in progress")]
    Busy,

    #[error("Topic is required")]
    TopicRequired,

    #[error("Nothing to save yet; generate a post first")]
    NothingToSave,

    #[error("No request is waiting for a response")]
    NotWaiting,
}

const GENERIC_FAILURE: &str = "Failed to generate blog post";

/// State of one "create post" screen.
#[derive(Debug, Clone)]
pub struct GenerationFlow {
    form: GenerationForm,
    state: FlowState,
    content: Option<String>,
    is_demo: bool,
    error: Option<String>,
}

impl Default for GenerationFlow {
    fn default() -> Self {
        Self::new(GenerationForm::default())
    }
}

impl GenerationFlow {
    pub fn new(form: GenerationForm) -> Self {
        Self {
            form,
            state: FlowState::Idle,
            content: None,
            is_demo: false,
            error: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn form(&self) -> &GenerationForm {
        &self.form
    }

    /// The preview text, once a generation succeeded.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_demo(&self) -> bool {
        self.is_demo
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn remediation(&self) -> Option<Remediation> {
        self.error.as_deref().and_then(Remediation::for_error)
    }

    /// After any generation failure the template path stays available.
    pub fn offers_demo_fallback(&self) -> bool {
        self.error.is_some() && !self.is_busy()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FlowState::Generating(_) | FlowState::Saving(_))
    }

    /// Whether the generate buttons are enabled.
    pub fn can_generate(&self) -> bool {
        !self.is_busy() && self.form.has_topic()
    }

    /// Start a generation; returns the body to POST to `mode.endpoint()`.
    pub fn submit(&mut self, mode: GenerationMode) -> Result<GenerationRequest, FlowError> {
        if self.is_busy() {
            return Err(FlowError::Busy);
        }
        if !self.form.has_topic() {
            return Err(FlowError::TopicRequired);
        }

        self.error = None;
        self.content = None;
        self.is_demo = false;
        self.state = FlowState::Generating(mode);
        Ok(self.form.to_request())
    }

    /// Feed back the endpoint's envelope.
    pub fn receive(&mut self, result: GenerationResult) -> Result<FlowState, FlowError> {
        let FlowState::Generating(mode) = self.state else {
            return Err(FlowError::NotWaiting);
        };

        if result.success {
            self.content = Some(result.content.unwrap_or_default());
            self.is_demo = result.is_demo.unwrap_or(mode == GenerationMode::Demo);
            self.state = FlowState::Previewing;
        } else {
            self.error = Some(result.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()));
            self.state = FlowState::Idle;
        }
        Ok(self.state)
    }

    /// Report a transport-level failure (no envelope came back).
    pub fn fail(&mut self, error: impl Into<String>) -> Result<FlowState, FlowError> {
        self.receive(GenerationResult::failed(error))
    }

    /// Begin saving the preview; returns the record to create.
    pub fn save(&mut self, status: PostStatus) -> Result<NewBlogPost, FlowError> {
        match self.state {
            FlowState::Previewing => {}
            FlowState::Generating(_) | FlowState::Saving(_) => return Err(FlowError::Busy),
            FlowState::Idle => return Err(FlowError::NothingToSave),
        }
        let content = self.content.clone().ok_or(FlowError::NothingToSave)?;

        self.state = FlowState::Saving(status);
        Ok(self.form.to_post(content, status))
    }

    /// Report the outcome of the save call.
    pub fn saved(&mut self, outcome: Result<(), String>) -> Result<FlowState, FlowError> {
        if !matches!(self.state, FlowState::Saving(_)) {
            return Err(FlowError::NotWaiting);
        }

        match outcome {
            Ok(()) => {
                self.content = None;
                self.error = None;
                self.is_demo = false;
                self.state = FlowState::Idle;
            }
            Err(error) => {
                self.error = Some(error);
                self.state = FlowState::Previewing;
            }
        }
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> GenerationFlow {
        GenerationFlow::new(GenerationForm {
            topic: "Remote Work Benefits".to_string(),
            target_audience: "HR professionals".to_string(),
            tone: "casual".to_string(),
            word_count: "300".to_string(),
            keywords: " remote, productivity ,, work-life balance".to_string(),
        })
    }

    #[test]
    fn test_submit_builds_request_and_locks() {
        let mut flow = flow();

        let request = flow.submit(GenerationMode::Demo).unwrap();

        assert_eq!(request.topic, "Remote Work Benefits");
        assert_eq!(request.word_count, 300);
        assert_eq!(
            request.keywords,
            vec!["remote", "productivity", "work-life balance"]
        );
        assert_eq!(flow.state(), FlowState::Generating(GenerationMode::Demo));
        assert!(!flow.can_generate());
        assert_eq!(flow.submit(GenerationMode::Ai), Err(FlowError::Busy));
    }

    #[test]
    fn test_submit_requires_topic() {
        let mut flow = GenerationFlow::default();
        assert!(!flow.can_generate());
        assert_eq!(flow.submit(GenerationMode::Ai), Err(FlowError::TopicRequired));
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn test_success_then_save_as_draft() {
        let mut flow = flow();
        flow.submit(GenerationMode::Demo).unwrap();
        flow.receive(GenerationResult::demo("# Remote Work Benefits"))
            .unwrap();

        assert_eq!(flow.state(), FlowState::Previewing);
        assert!(flow.is_demo());

        let record = flow.save(PostStatus::Draft).unwrap();
        assert_eq!(record.title, "Blog Post: Remote Work Benefits");
        assert_eq!(record.status, PostStatus::Draft);
        assert_eq!(record.word_count, 300);
        assert_eq!(
            record.seo_keywords,
            vec!["remote", "productivity", "work-life balance"]
        );
        assert_eq!(flow.save(PostStatus::Published), Err(FlowError::Busy));

        assert_eq!(flow.saved(Ok(())), Ok(FlowState::Idle));
        assert_eq!(flow.content(), None);
    }

    #[test]
    fn test_failure_returns_to_idle_with_remediation() {
        let mut flow = flow();
        flow.submit(GenerationMode::Ai).unwrap();
        flow.receive(GenerationResult::failed(
            "Gemini API key not configured. Please add GEMINI_API_KEY to your environment variables.",
        ))
        .unwrap();

        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(flow.remediation(), Some(Remediation::CredentialSetup));
        assert!(flow.offers_demo_fallback());
        assert!(flow.can_generate());
        assert_eq!(flow.save(PostStatus::Draft), Err(FlowError::NothingToSave));
    }

    #[test]
    fn test_remediation_matching() {
        assert_eq!(
            Remediation::for_error("Gemini quota exceeded. Please check your API quota"),
            Some(Remediation::QuotaCheck)
        );
        assert_eq!(
            Remediation::for_error("Rate limit exceeded. Please wait a moment"),
            Some(Remediation::RateLimitBackoff)
        );
        assert_eq!(Remediation::for_error("Failed to generate blog post"), None);
    }

    #[test]
    fn test_resubmit_clears_previous_error() {
        let mut flow = flow();
        flow.submit(GenerationMode::Ai).unwrap();
        flow.fail("network down").unwrap();
        assert_eq!(flow.error(), Some("network down"));

        flow.submit(GenerationMode::Demo).unwrap();
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_failed_save_keeps_preview() {
        let mut flow = flow();
        flow.submit(GenerationMode::Demo).unwrap();
        flow.receive(GenerationResult::demo("text")).unwrap();
        flow.save(PostStatus::Published).unwrap();

        assert_eq!(
            flow.saved(Err("insert failed".to_string())),
            Ok(FlowState::Previewing)
        );
        assert_eq!(flow.content(), Some("text"));
    }

    #[test]
    fn test_receive_without_request_is_rejected() {
        let mut flow = flow();
        assert_eq!(
            flow.receive(GenerationResult::demo("x")),
            Err(FlowError::NotWaiting)
        );
    }
}
