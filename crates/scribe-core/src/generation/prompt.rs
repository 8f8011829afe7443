//! Provider-neutral prompt for blog generation.

use crate::domain::GenerationRequest;
use crate::ports::CompletionRequest;

pub const SYSTEM_PROMPT: &str = "You are a professional blog writer and content creator. Write engaging, well-structured blog posts that are informative, readable, and optimized for the target audience.";

/// Sampling temperature for every generation.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on requested output tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Output tokens requested per target word.
pub const TOKENS_PER_WORD: u32 = 2;

/// Token budget for a target length.
pub fn max_output_tokens(word_count: u32) -> u32 {
    word_count
        .saturating_mul(TOKENS_PER_WORD)
        .min(MAX_OUTPUT_TOKENS)
}

/// The instruction prompt for one request.
pub fn build_blog_prompt(request: &GenerationRequest) -> String {
    let audience = request.audience().unwrap_or("General audience");
    let keywords = request.keyword_phrase();
    let keywords = keywords.as_deref().unwrap_or("N/A");

    format!(
        "Write a comprehensive blog post with the following specifications:

**Topic:** {topic}
**Target Audience:** {audience}
**Tone:** {tone}
**Word Count:** Approximately {words} words
**SEO Keywords to include:** {keywords}

**Requirements:**
1. Create an engaging title
2. Write a compelling introduction that hooks the reader
3. Use clear headings and subheadings for better readability
4. Include practical examples, tips, or actionable advice
5. Maintain the specified tone throughout
6. Naturally incorporate the SEO keywords (if provided)
7. End with a strong conclusion that summarizes key points
8. Format the content in markdown for easy reading

**Structure:**
- Title (H1)
- Introduction
- Main content sections with appropriate headings (H2, H3)
- Conclusion
- Optional call-to-action

Please ensure the content is original, informative, and valuable to the target audience.",
        topic = request.topic.trim(),
        tone = request.tone.trim(),
        words = request.word_count,
    )
}

/// The full completion call for one request.
pub fn completion_request(request: &GenerationRequest) -> CompletionRequest {
    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt: build_blog_prompt(request),
        max_tokens: max_output_tokens(request.word_count),
        temperature: TEMPERATURE,
    }
}
