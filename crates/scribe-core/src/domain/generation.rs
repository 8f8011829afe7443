use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GenerationError;

/// Word-count presets offered by the generation form.
pub const WORD_COUNT_PRESETS: [u32; 4] = [300, 500, 800, 1200];

pub const DEFAULT_WORD_COUNT: u32 = 500;

pub const DEFAULT_TONE: &str = "professional";

/// Writing style requested for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Technical,
    Friendly,
    Authoritative,
    Conversational,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Technical,
        Tone::Friendly,
        Tone::Authoritative,
        Tone::Conversational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Technical => "technical",
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
            Tone::Conversational => "conversational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone: {0}")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}

/// A request to generate one blog post. Built from form state, consumed once.
///
/// The wire format is lenient the way browser forms are: `wordCount` may be
/// a number or a numeric string, and `keywords` may be a list or a single
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_word_count", deserialize_with = "lenient_word_count")]
    pub word_count: u32,
    #[serde(default, deserialize_with = "lenient_keywords")]
    pub keywords: Vec<String>,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            target_audience: None,
            tone: default_tone(),
            word_count: DEFAULT_WORD_COUNT,
            keywords: Vec::new(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Reject requests that cannot be dispatched.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.topic.trim().is_empty() {
            return Err(GenerationError::MalformedRequest(
                "Topic is required".to_string(),
            ));
        }
        Ok(())
    }

    /// The audience, if one was given.
    pub fn audience(&self) -> Option<&str> {
        self.target_audience
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// The parsed tone; `None` for values outside [`Tone::ALL`].
    pub fn known_tone(&self) -> Option<Tone> {
        self.tone.parse().ok()
    }

    /// Keywords rendered as a comma-joined phrase, or `None` when empty.
    pub fn keyword_phrase(&self) -> Option<String> {
        let keywords: Vec<&str> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            None
        } else {
            Some(keywords.join(", "))
        }
    }
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_word_count() -> u32 {
    DEFAULT_WORD_COUNT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u32),
    Text(String),
}

fn lenient_word_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(DEFAULT_WORD_COUNT),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(DEFAULT_WORD_COUNT),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid word count: {text}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrText {
    List(Vec<String>),
    Text(String),
}

fn lenient_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<ListOrText>::deserialize(deserializer)? {
        None => return Ok(Vec::new()),
        Some(ListOrText::List(list)) => list,
        Some(ListOrText::Text(text)) => text.split(',').map(str::to_string).collect(),
    };

    Ok(raw
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect())
}
