use serde::Serialize;

/// A subscription tier.
///
/// Caps are descriptive only; nothing in the generation flow checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: &'static str,
    pub name: &'static str,
    /// Monthly price in whole US dollars.
    pub monthly_price: u32,
    /// `None` means unlimited.
    pub max_generations: Option<u32>,
    /// `None` means unlimited.
    pub max_words: Option<u32>,
    pub popular: bool,
    pub features: &'static [&'static str],
}

pub const PRICING_PLANS: &[PricingPlan] = &[
    PricingPlan {
        id: "free",
        name: "Free",
        monthly_price: 0,
        max_generations: Some(3),
        max_words: Some(5_000),
        popular: false,
        features: &[
            "3 blog posts per month",
            "Up to 5,000 words",
            "Basic AI templates",
            "Standard support",
        ],
    },
    PricingPlan {
        id: "pro",
        name: "Pro",
        monthly_price: 19,
        max_generations: Some(50),
        max_words: Some(100_000),
        popular: true,
        features: &[
            "50 blog posts per month",
            "Up to 100,000 words",
            "Advanced AI templates",
            "SEO optimization",
            "Priority support",
            "Export to multiple formats",
        ],
    },
    PricingPlan {
        id: "enterprise",
        name: "Enterprise",
        monthly_price: 99,
        max_generations: None,
        max_words: None,
        popular: false,
        features: &[
            "Unlimited blog posts",
            "Unlimited words",
            "Custom AI templates",
            "Advanced SEO tools",
            "White-label options",
            "Dedicated support",
            "API access",
            "Team collaboration",
        ],
    },
];
