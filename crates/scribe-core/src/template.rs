//! Template engine - canned, tone-keyed blog posts for the demo path.
//!
//! Output is a pure function of the inputs. Requests below
//! [`SHORT_FORM_THRESHOLD`] words get the abbreviated layout; everything else
//! gets the full guide with its "Deep Dive Analysis" section. The engine does
//! not count words in what it produces.

use crate::domain::{GenerationRequest, Tone};

/// Word counts below this produce the abbreviated layout.
pub const SHORT_FORM_THRESHOLD: u32 = 500;

const DEFAULT_AUDIENCE: &str = "general audience";
const DEFAULT_KEYWORDS: &str = "relevant keywords";

const FULL_FOOTER: &str = "*This is a demo blog post generated for preview purposes. For AI-powered content, configure an AI provider API key with sufficient credits.*";
const SHORT_FOOTER: &str =
    "*Demo content - connect an AI provider for personalized AI-generated blogs.*";

struct ToneTemplate {
    intro: &'static str,
    body: &'static str,
    conclusion: &'static str,
}

const PROFESSIONAL: ToneTemplate = ToneTemplate {
    intro: "In today's rapidly evolving landscape, understanding {topic} has become increasingly important for {audience}. This guide walks through the key aspects and the practical applications that matter most.",
    body: "## Understanding {topic}

{topic} represents a significant opportunity for {audience} who want to stay ahead of the curve. Focusing on {keywords} gives a clearer view of the core principles.

## Key Benefits and Applications

When building a strategy around {topic}, weigh these essential factors:

1. **Strategic Planning**: Build an approach that lines up with your objectives
2. **Implementation**: Favor practical steps that deliver measurable results
3. **Optimization**: Refine continuously based on performance data

## Best Practices

To get the most out of {topic}, lean on these proven habits:

- Put user experience and engagement first
- Let data-driven insights guide decisions
- Stay consistent across every touchpoint
- Review performance metrics on a regular cadence

## Looking Forward

The future of {topic} holds real promise. By keeping up with emerging trends and holding a high bar, {audience} can position themselves for long-term success.",
    conclusion: "Understanding {topic} is essential for {audience} who want to thrive in a competitive environment. Put these strategies to work, keep improving, and you will be well placed to reach your goals.",
};

const CASUAL: ToneTemplate = ToneTemplate {
    intro: "Hey there! Let's talk about {topic}, something that keeps coming up lately and is super relevant for {audience}. I'm excited to dig into this with you!",
    body: "## What's the Deal with {topic}?

So, {topic} is actually pretty cool once you think about it. For {audience}, it's turning into one of those things you just can't ignore. The whole {keywords} scene is really taking off.

## Why Should You Care?

Here's the thing: {topic} isn't just another trend. It's changing how we think about:

- Making things easier and faster
- Getting better results with less effort
- Staying ahead of whatever comes next

## Getting Started

No need to be an expert to start with {topic}. Try these simple steps:

1. Start with the basics and build from there
2. Try things out and keep what works for you
3. Learn from people who are already doing it well
4. Keep experimenting and improving

## Real Talk

Sure, {topic} can feel like a lot at first, but once you get the hang of it, it becomes second nature. Start small and grow from there.",
    conclusion: "That's a wrap on {topic}! The best way to get good at this stuff is to just start doing it. Don't overthink it. Jump in and see what happens. You've got this!",
};

const TECHNICAL: ToneTemplate = ToneTemplate {
    intro: "This technical analysis examines {topic} from an implementation perspective, giving {audience} actionable insights and a repeatable method.",
    body: "## Technical Overview

{topic} spans several components that need careful thought during implementation. Working with {keywords} is the foundation of any robust solution.

## Architecture and Implementation

### Core Components

The reference pipeline looks like this:

```
Input → Validation → Processing → Output
  ↓          ↓            ↓          ↓
Sources → Constraints → Transforms → Delivery
```

### Technical Specifications

When designing systems around {topic}, pin down these parameters:

- **Scalability**: Handle growth in load without redesign
- **Performance**: Budget for latency and throughput
- **Security**: Enforce authentication and authorization at every boundary
- **Maintainability**: Keep modules small and their contracts explicit

## Patterns and Practices

### Design Patterns
- Keep the architecture modular so parts can change independently
- Inject dependencies so components can be tested in isolation
- Make invalid states unrepresentable in your types

### Performance
- Cache data that is read far more often than written
- Choose algorithms with predictable complexity
- Instrument the system and watch its metrics

## Implementation Roadmap

1. **Phase 1**: Core infrastructure
2. **Phase 2**: Feature development and testing
3. **Phase 3**: Optimization and scaling
4. **Phase 4**: Monitoring and maintenance",
    conclusion: "A successful rollout of {topic} takes careful planning, a sound architecture and ongoing tuning. Following these guidelines, {audience} can build robust, scalable solutions.",
};

const DEEP_DIVE: &str = "Looking more closely at {topic}, the teams that get lasting value from it treat {keywords} as an ongoing practice rather than a one-off project. For {audience}, that means setting clear goals up front, measuring outcomes honestly, and revisiting assumptions as the landscape shifts.

### Common Pitfalls

- Adopting {topic} without a clear definition of success
- Underestimating the time needed to build new habits
- Measuring activity instead of outcomes

### A Practical Checklist

1. Write down the problem {topic} is meant to solve
2. Pick two or three metrics that reflect real progress
3. Run a small pilot before committing fully
4. Review the results and adjust";

const SHORT_BODY: &str = "## Key Points

{topic} is essential for {audience}. Here are the main benefits:

- Improved efficiency and results
- A better understanding of {keywords}
- A competitive advantage in your field

## Getting Started

Start with the fundamentals and build your knowledge step by step. Focus on practical applications that deliver value right away.";

fn template_for(tone: Option<Tone>) -> &'static ToneTemplate {
    match tone {
        Some(Tone::Casual) => &CASUAL,
        Some(Tone::Technical) => &TECHNICAL,
        _ => &PROFESSIONAL,
    }
}

/// Generate a demo post from the raw inputs.
///
/// Tones without a dedicated template, and unrecognised tones, use the
/// professional template.
pub fn generate(
    topic: &str,
    audience: Option<&str>,
    tone: &str,
    word_count: u32,
    keywords: &[String],
) -> String {
    let template = template_for(tone.parse().ok());
    let audience = audience
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_AUDIENCE);
    let keyword_text = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let keyword_text = if keyword_text.is_empty() {
        DEFAULT_KEYWORDS
    } else {
        keyword_text.as_str()
    };

    let vars = [
        ("topic", topic),
        ("audience", audience),
        ("keywords", keyword_text),
    ];
    let intro = fill(template.intro, &vars);
    let conclusion = fill(template.conclusion, &vars);
    let title = capitalize(topic.trim());

    if word_count < SHORT_FORM_THRESHOLD {
        return format!(
            "# {title}\n\n{intro}\n\n{body}\n\n{conclusion}\n\n---\n\n{SHORT_FOOTER}",
            body = fill(SHORT_BODY, &vars),
        );
    }

    format!(
        "# {title}: A Comprehensive Guide\n\n{intro}\n\n{body}\n\n## Deep Dive Analysis\n\n{deep_dive}\n\n## Conclusion\n\n{conclusion}\n\n---\n\n{FULL_FOOTER}",
        body = fill(template.body, &vars),
        deep_dive = fill(DEEP_DIVE, &vars),
    )
}

/// Generate a demo post for a request.
pub fn generate_for(request: &GenerationRequest) -> String {
    generate(
        &request.topic,
        request.audience(),
        &request.tone,
        request.word_count,
        &request.keywords,
    )
}

/// Substitute `{name}` placeholders in one pass. Substituted text is never
/// scanned again, and unknown placeholders are left as written.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let value = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
