use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported display languages. Any unrecognized code resolves to `En`,
/// so language handling never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Hi,
    Mr,
    Bn,
    Or,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Hi,
        Language::Mr,
        Language::Bn,
        Language::Or,
    ];

    pub fn from_code(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-in" | "english" => Self::En,
            "hi" | "hi-in" | "hindi" => Self::Hi,
            "mr" | "mr-in" | "marathi" => Self::Mr,
            "bn" | "bn-in" | "bengali" => Self::Bn,
            "or" | "or-in" | "odia" | "oriya" => Self::Or,
            _ => Self::En,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
            Self::Bn => "bn",
            Self::Or => "or",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Mr => "Marathi",
            Self::Bn => "Bengali",
            Self::Or => "Odia",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
            Self::Mr => "मराठी",
            Self::Bn => "বাংলা",
            Self::Or => "ଓଡ଼ିଆ",
        }
    }
}

/// The discrete category assigned to one user message. Exactly one per
/// message; `Default` is the always-matching tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Emergency,
    SymptomsEducation,
    Vaccination,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    User,
    Assistant,
}

/// One entry in a session's append-only log. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub origin: MessageOrigin,
    pub emergency: bool,
    pub quick_replies: Vec<String>,
    pub show_actions: bool,
    pub at: DateTime<Utc>,
}

/// Structured output of the triage engine for one user message. The UI
/// renders `body` as plain text and uses the flags to decide urgent styling
/// and the Call 102 / Find Clinic affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResponse {
    pub topic: Topic,
    pub body: String,
    pub quick_replies: Vec<String>,
    pub emergency: bool,
    pub show_actions: bool,
}

/// Keyword sets driving classification. Data, not code: deserializable from
/// JSON so the vocabulary can be extended without a rebuild. The priority
/// order Emergency > SymptomsEducation > Vaccination stays a fixed program
/// invariant in `classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRules {
    pub emergency: Vec<String>,
    pub symptoms: Vec<String>,
    pub vaccination: Vec<String>,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            emergency: strings(&[
                "chest pain",
                "breathing",
                "unconscious",
                "bleeding",
                "seizure",
                "fever high",
            ]),
            symptoms: strings(&["symptom", "fever", "cough"]),
            vaccination: strings(&["vaccine", "vaccination"]),
        }
    }
}

impl KeywordRules {
    /// Parses a rules file and lowercases every keyword, since matching
    /// happens against case-folded input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.normalized())
    }

    fn normalized(self) -> Self {
        Self {
            emergency: lowercase_all(self.emergency),
            symptoms: lowercase_all(self.symptoms),
            vaccination: lowercase_all(self.vaccination),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_lowercase())
        .collect()
}
