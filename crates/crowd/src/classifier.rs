//! Keyword-based classification of incoming chat lines.

use serde::{Deserialize, Serialize};

const GREETING_MARKERS: &[&str] = &[
    "bonjour", "bonsoir", "salut", "coucou", "hello", "hey", "hola", "wesh", "bienvenue",
];

const QUESTION_MARKERS: &[&str] = &[
    "?",
    "quelqu'un",
    "comment",
    "pourquoi",
    "quoi",
    "quel ",
    "quels ",
    "quelle",
    "est-ce que",
    "combien",
    "vous pensez",
    "tu penses",
];

const HELP_MARKERS: &[&str] = &[
    "aide",
    "help",
    "besoin",
    "conseil",
    "galère",
    "bloqué",
    "problème",
    "svp",
    "s'il vous plaît",
];

const SHARING_MARKERS: &[&str] = &[
    "je pense",
    "à mon avis",
    "perso ",
    "perso,",
    "j'aime",
    "j'adore",
    "je déteste",
    "je viens de",
    "j'ai vu",
    "regardez",
    "trop bien",
    "génial",
];

/// Conversational urgency of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Signals extracted from one chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_greeting: bool,
    pub is_question: bool,
    pub is_help_request: bool,
    pub is_sharing: bool,
    pub priority: Priority,
}

impl Classification {
    /// Build a classification from flags, deriving the priority.
    pub fn from_flags(
        is_greeting: bool,
        is_question: bool,
        is_help_request: bool,
        is_sharing: bool,
    ) -> Self {
        let priority = if is_greeting || is_question || is_help_request {
            Priority::High
        } else if is_sharing {
            Priority::Medium
        } else {
            Priority::Low
        };

        Self {
            is_greeting,
            is_question,
            is_help_request,
            is_sharing,
            priority,
        }
    }

    /// True when the message is high priority.
    pub fn is_high(&self) -> bool {
        self.priority == Priority::High
    }
}

/// Classify a chat line.
///
/// Case-insensitive substring matching; expects non-empty text.
///
/// The text is padded with a space on both ends so markers with a trailing
/// space ("quel ", "perso ") only match whole words.
pub fn classify(text: &str) -> Classification {
    let normalized = format!(" {} ", text.to_lowercase().replace('\u{2019}', "'"));
    let matches = |markers: &[&str]| markers.iter().any(|m| normalized.contains(m));

    Classification::from_flags(
        matches(GREETING_MARKERS),
        matches(QUESTION_MARKERS),
        matches(HELP_MARKERS),
        matches(SHARING_MARKERS),
    )
}
