//! # Topics
//!
//! The three conversation categories Atlas knows about, and the keyword
//! table used to spot them in free text.
//!
//! Detection is plain substring matching over lowercased input. A topic is
//! detected if any of its keywords appears anywhere in the text, so short
//! keywords are kept out of the table when they show up inside common words.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TopicId {
    Sports,
    Politics,
    Health,
}

impl TopicId {
    /// Canonical order. Every topic list Atlas produces follows it.
    pub const ALL: [TopicId; 3] = [TopicId::Sports, TopicId::Politics, TopicId::Health];

    /// Human-readable chip label.
    pub fn label(self) -> &'static str {
        match self {
            TopicId::Sports => "Sports",
            TopicId::Politics => "Politics",
            TopicId::Health => "Health",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TopicId::Sports => SPORTS_KEYWORDS,
            TopicId::Politics => POLITICS_KEYWORDS,
            TopicId::Health => HEALTH_KEYWORDS,
        }
    }

    /// True if any keyword of this topic occurs in `lowered`.
    /// Callers are expected to lowercase first.
    fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|kw| lowered.contains(*kw))
    }
}

const SPORTS_KEYWORDS: &[&str] = &[
    "game",
    "match",
    "score",
    "team",
    "season",
    "playoff",
    "league",
    "coach",
    "player",
    "tournament",
    "championship",
    "football",
    "soccer",
    "basketball",
    "baseball",
    "hockey",
    "tennis",
    "golf",
    "olympic",
    "nba",
    "nfl",
    "mlb",
    "nhl",
    "world cup",
    "super bowl",
    "quarterback",
    "stadium",
];

const POLITICS_KEYWORDS: &[&str] = &[
    "election",
    "vote",
    "voting",
    "ballot",
    "policy",
    "policies",
    "politic",
    "congress",
    "senate",
    "senator",
    "president",
    "governor",
    "campaign",
    "government",
    "legislat",
    "democrat",
    "republican",
    "parliament",
    "supreme court",
    "headline",
    "taxes",
    "debate",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "health",
    "sleep",
    "diet",
    "nutrition",
    "exercise",
    "workout",
    "stress",
    "anxiety",
    "routine",
    "symptom",
    "doctor",
    "headache",
    "fever",
    "vitamin",
    "hydrat",
    "calorie",
    "meditat",
    "mental",
    "wellness",
    "tired",
    "injury",
    "feel better",
];

/// Returns every topic whose keywords appear in `text`, in canonical order.
/// Empty when nothing matches.
pub fn detect_topics(text: &str) -> Vec<TopicId> {
    let lowered = text.to_lowercase();
    TopicId::ALL
        .into_iter()
        .filter(|topic| topic.matches(&lowered))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_single_topic() {
        assert_eq!(
            detect_topics("Who do you like in the game tonight?"),
            vec![TopicId::Sports]
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_topics("ELECTION NIGHT"), vec![TopicId::Politics]);
    }

    #[test]
    fn detects_union_in_canonical_order() {
        let topics = detect_topics(
            "Did you see the election results affect the stock market and also how's my sleep routine",
        );
        assert_eq!(topics, vec![TopicId::Politics, TopicId::Health]);
    }

    #[test]
    fn canonical_order_does_not_follow_text_order() {
        let topics = detect_topics("my workout before the debate and the playoff game");
        assert_eq!(
            topics,
            vec![TopicId::Sports, TopicId::Politics, TopicId::Health]
        );
    }

    #[test]
    fn no_keywords_detects_nothing() {
        assert!(detect_topics("what do you think about that?").is_empty());
        assert!(detect_topics("").is_empty());
    }

    #[test]
    fn keywords_are_lowercase() {
        for topic in TopicId::ALL {
            for kw in topic.keywords() {
                assert_eq!(*kw, kw.to_lowercase(), "{kw} must be lowercase");
            }
        }
    }

    #[test]
    fn topic_serializes_lowercase() {
        let json = serde_json::to_string(&TopicId::Politics).unwrap();
        assert_eq!(json, "\"politics\"");
    }

    #[test]
    fn labels() {
        assert_eq!(TopicId::Sports.label(), "Sports");
        assert_eq!(TopicId::Politics.label(), "Politics");
        assert_eq!(TopicId::Health.label(), "Health");
    }
}
