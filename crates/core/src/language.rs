//! Response language selection.
//!
//! Exactly two supported languages. Every fixed, user-facing sentence
//! lives here so the relay and composer never hard-code per-language
//! text themselves.

use serde::{Deserialize, Serialize};

/// The response language for the chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Amharic
    Am,
}

impl Language {
    /// The instruction sentence directing the model's response language.
    pub fn directive(&self) -> &'static str {
        match self {
            Language::En => "Respond in English.",
            Language::Am => "Respond in Amharic (አማርኛ).",
        }
    }

    /// Substituted when the model returns an empty or absent text field.
    pub fn empty_response_fallback(&self) -> &'static str {
        match self {
            Language::En => "I processed the documents but couldn't generate a text response.",
            Language::Am => "ሰነዶቹን አካሂጃለሁ ነገር ግን የጽሑፍ ምላሽ ማመንጨት አልቻልኩም።",
        }
    }

    /// Surfaced instead of the raw error text when the provider signals
    /// rate/quota limiting.
    pub fn quota_notice(&self) -> &'static str {
        match self {
            Language::En => "Quota exceeded. Please wait a moment and try again.",
            Language::Am => "የአጠቃቀም ገደብ ደርሷል። እባክዎ ጥቂት ቆይተው እንደገና ይሞክሩ።",
        }
    }

    /// Parse a selector value ("en" or "am").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "am" => Some(Language::Am),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Am => write!(f, "am"),
        }
    }
}
