//! # Reply Generator
//!
//! Turns the conversation so far plus the newest user text into Atlas's
//! answer. Pure: no I/O, no clock, no randomness. Same history and same text
//! always produce the same `AgentReply`.
//!
//! ```text
//! history + text
//!      │
//!      ├─► detect_topics(text) ──► empty? ──► sticky topics from history
//!      │
//!      ├─► reply     (single template | combined hooks | clarifying question)
//!      └─► follow_ups (round-robin over topic pools, minus the text itself)
//! ```
//!
//! The wording below is product copy. Tests only pin down structure.

use crate::core::state::{ChatTurn, Role};
use crate::core::topic::{TopicId, detect_topics};

/// Maximum number of follow-up suggestions offered after a reply.
pub const MAX_FOLLOW_UPS: usize = 3;

/// Longest quoted fragment of user text, in characters.
const FRAGMENT_MAX_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub reply: String,
    pub follow_ups: Vec<String>,
    pub detected_topics: Vec<TopicId>,
}

struct TopicCopy {
    /// Rotated by the number of user turns. `{fragment}` is replaced.
    openers: &'static [&'static str],
    body: &'static str,
    /// One-liner used when several topics come up in the same message.
    hook: &'static str,
    follow_ups: &'static [&'static str],
}

const SPORTS: TopicCopy = TopicCopy {
    openers: &[
        "Love that you're asking about \"{fragment}\". Here's my scouting report.",
        "\"{fragment}\" - now we're talking. Let me break down the tape.",
        "Okay, \"{fragment}\" is exactly the kind of question I live for.",
    ],
    body: "I'd look at three things: recent form over the last few games, how the matchup plays \
        to each side's strengths, and who's actually healthy. Tell me the teams or players you care \
        about and I'll map out what to watch for.",
    hook: "On the sports side, check recent form and the injury report before reading too much into one result.",
    follow_ups: &[
        "Catch me up on the latest game or matchup you're hyped about.",
        "Who's your pick for the championship this season?",
        "Want a quick breakdown of the key player matchups?",
        "Should we talk about which teams are trending up?",
    ],
};

const POLITICS: TopicCopy = TopicCopy {
    openers: &[
        "Good call bringing up \"{fragment}\". Let's separate the signal from the noise.",
        "\"{fragment}\" - let's unpack what's actually going on.",
        "Happy to dig into \"{fragment}\" with you, no spin.",
    ],
    body: "Start with what actually changed, who it affects, and what happens next procedurally. \
        I'll lay out the context from more than one side so you can decide where you land.",
    hook: "On the politics front, pin down what actually changed and who it affects before reacting to the headline.",
    follow_ups: &[
        "Need a sanity check on a headline or policy move?",
        "Want the quick context behind the latest election news?",
        "Should we walk through who a new policy actually affects?",
        "Curious how a bill moves through the legislative process?",
    ],
};

const HEALTH: TopicCopy = TopicCopy {
    openers: &[
        "Thanks for sharing \"{fragment}\". Let's build something you can stick with.",
        "\"{fragment}\" - let's get you feeling better.",
        "I'm glad you asked about \"{fragment}\". Small changes add up.",
    ],
    body: "Sleep, movement, and what you eat tend to move together, so we can start with whichever \
        feels easiest. If something feels off or keeps coming back, loop in a doctor; I can help you \
        prep questions for that visit too.",
    hook: "For your health, pick one small habit, like a consistent sleep window, and build from there.",
    follow_ups: &[
        "Want help tuning your routine so you feel better this week?",
        "Want a simple sleep routine to try tonight?",
        "Should we sketch a realistic weekly workout plan?",
        "Need a few quick ideas to manage stress?",
    ],
};

fn copy_for(topic: TopicId) -> &'static TopicCopy {
    match topic {
        TopicId::Sports => &SPORTS,
        TopicId::Politics => &POLITICS,
        TopicId::Health => &HEALTH,
    }
}

/// Builds Atlas's reply to `text` given everything said so far.
///
/// `history` is the transcript as role + content pairs. It may or may not
/// already include `text` as its last user turn; both give the same topics.
pub fn generate_agent_reply(history: &[ChatTurn], text: &str) -> AgentReply {
    let text = text.trim();
    let matched = detect_topics(text);

    let detected_topics = if matched.is_empty() {
        sticky_topics(history)
    } else {
        matched.clone()
    };

    let user_turns = history.iter().filter(|t| t.role == Role::User).count();

    let reply = match matched.as_slice() {
        [] => clarifying_reply(&detected_topics),
        [topic] => single_topic_reply(*topic, text, user_turns),
        topics => combined_reply(topics, text),
    };

    let follow_ups = pick_follow_ups(&detected_topics, text);

    AgentReply {
        reply,
        follow_ups,
        detected_topics,
    }
}

/// Topics of the most recent user turn that matched anything.
/// Falls back to every topic when the history never matched.
fn sticky_topics(history: &[ChatTurn]) -> Vec<TopicId> {
    history
        .iter()
        .rev()
        .filter(|t| t.role == Role::User)
        .map(|t| detect_topics(&t.content))
        .find(|topics| !topics.is_empty())
        .unwrap_or_else(|| TopicId::ALL.to_vec())
}

fn single_topic_reply(topic: TopicId, text: &str, user_turns: usize) -> String {
    let copy = copy_for(topic);
    let opener = copy.openers[user_turns % copy.openers.len()];
    format!(
        "{}\n\n{}",
        opener.replace("{fragment}", &fragment(text)),
        copy.body
    )
}

fn combined_reply(topics: &[TopicId], text: &str) -> String {
    let hooks: Vec<String> = topics
        .iter()
        .map(|t| format!("- {}", copy_for(*t).hook))
        .collect();
    format!(
        "You've got a few things going at once with \"{}\", so let's take them one at a time:\n\n{}\n\n\
         Which one do you want to dig into first?",
        fragment(text),
        hooks.join("\n")
    )
}

fn clarifying_reply(topics: &[TopicId]) -> String {
    format!(
        "I want to make sure I give you something useful. Are you thinking about this from the {} angle, \
         or something else entirely? Give me a bit more detail and I'll dig in.",
        join_labels(topics)
    )
}

/// "sports", "sports or health", "sports, politics, or health".
fn join_labels(topics: &[TopicId]) -> String {
    let labels: Vec<String> = topics.iter().map(|t| t.label().to_lowercase()).collect();
    match labels.as_slice() {
        [] => String::from("big picture"),
        [one] => one.clone(),
        [a, b] => format!("{a} or {b}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// First sentence of the user's text, bounded, without trailing punctuation.
fn fragment(text: &str) -> String {
    let first = text
        .split(['.', '?', '!', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");

    let mut frag: String = first.chars().take(FRAGMENT_MAX_CHARS).collect();
    if first.chars().count() > FRAGMENT_MAX_CHARS {
        if let Some(cut) = frag.rfind(' ') {
            frag.truncate(cut);
        }
        frag.push_str("...");
        return frag;
    }

    let trimmed = frag.trim_end_matches([',', ';', ':', ' ']);
    if trimmed.is_empty() {
        String::from("that")
    } else {
        trimmed.to_string()
    }
}

/// Round-robin across the topics' pools so a multi-topic reply offers one
/// suggestion per topic before repeating a topic. The text the user just
/// sent is never offered again.
fn pick_follow_ups(topics: &[TopicId], text: &str) -> Vec<String> {
    let pools: Vec<&[&str]> = topics.iter().map(|t| copy_for(*t).follow_ups).collect();
    let rounds = pools.iter().map(|p| p.len()).max().unwrap_or(0);

    let mut picked: Vec<String> = Vec::with_capacity(MAX_FOLLOW_UPS);
    for round in 0..rounds {
        for pool in &pools {
            let Some(candidate) = pool.get(round) else {
                continue;
            };
            if *candidate == text || picked.iter().any(|p| p == candidate) {
                continue;
            }
            picked.push(candidate.to_string());
            if picked.len() == MAX_FOLLOW_UPS {
                return picked;
            }
        }
    }
    picked
}
