use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::post::{BlogPost, PostStatus};

/// Analytics summary over one owner's posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub total_words: u64,
    pub average_words: u64,
    pub by_tone: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM` of `created_at`.
    pub by_month: BTreeMap<String, usize>,
    /// Posts created in the seven days before `now`.
    pub recent: usize,
}

impl PostStats {
    pub fn from_posts(posts: &[BlogPost], now: DateTime<Utc>) -> Self {
        let week_ago = now - TimeDelta::days(7);
        let mut stats = PostStats {
            total: posts.len(),
            ..Default::default()
        };

        for post in posts {
            match post.status {
                PostStatus::Published => stats.published += 1,
                PostStatus::Draft => stats.drafts += 1,
            }
            stats.total_words += u64::from(post.word_count);
            *stats.by_tone.entry(post.tone.clone()).or_default() += 1;
            *stats
                .by_month
                .entry(post.created_at.format("%Y-%m").to_string())
                .or_default() += 1;
            if post.created_at > week_ago {
                stats.recent += 1;
            }
        }

        if stats.total > 0 {
            let total = stats.total as u64;
            stats.average_words = (stats.total_words + total / 2) / total;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBlogPost;
    use uuid::Uuid;

    fn post(status: PostStatus, tone: &str, word_count: u32, age_days: i64) -> BlogPost {
        let mut post = BlogPost::new(
            Uuid::new_v4(),
            NewBlogPost {
                title: "t".to_string(),
                content: "c".to_string(),
                status,
                topic: "topic".to_string(),
                target_audience: String::new(),
                tone: tone.to_string(),
                word_count,
                seo_keywords: vec![],
            },
        );
        post.created_at = Utc::now() - TimeDelta::days(age_days);
        post
    }

    #[test]
    fn test_empty_stats() {
        let stats = PostStats::from_posts(&[], Utc::now());
        assert_eq!(stats, PostStats::default());
    }

    #[test]
    fn test_counts_and_rounded_average() {
        let posts = vec![
            post(PostStatus::Published, "casual", 300, 1),
            post(PostStatus::Draft, "casual", 500, 2),
            post(PostStatus::Draft, "technical", 800, 30),
        ];

        let stats = PostStats::from_posts(&posts, Utc::now());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.published, 1);
        assert_eq!(stats.drafts, 2);
        assert_eq!(stats.total_words, 1600);
        assert_eq!(stats.average_words, 533);
        assert_eq!(stats.by_tone.get("casual"), Some(&2));
        assert_eq!(stats.recent, 2);
        assert_eq!(stats.by_month.values().sum::<usize>(), 3);
    }
}
