use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// User-chosen story parameters, as collected by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    /// Length id (`short`, `medium`, `long`). Unknown ids fall back to medium limits.
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub themes: Option<Vec<String>>,
    #[serde(default)]
    pub creativity: Option<i32>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl PreferenceSet {
    /// Explicit theme list, else the single theme, else nothing.
    pub fn normalized_themes(&self) -> Vec<String> {
        match (&self.themes, &self.theme) {
            (Some(themes), _) => themes.clone(),
            (None, Some(theme)) if !theme.is_empty() => vec![theme.clone()],
            _ => Vec::new(),
        }
    }

    /// Creativity clamped to 1..=10.
    pub fn clamped_creativity(&self) -> Option<i32> {
        self.creativity.map(|c| c.clamp(1, 10))
    }

    /// Requested count, or `default` when unset. Zero is raised to 1.
    pub fn resolved_count(&self, default: u32) -> u32 {
        self.count.unwrap_or(default).max(1)
    }
}

/// Creativity (1-10) to sampling temperature (0.1-1.0), one decimal place.
pub fn creativity_to_temperature(creativity: Option<i32>) -> Option<f64> {
    creativity.map(|c| {
        let clamped = f64::from(c.clamp(1, 10));
        (clamped / 10.0 * 10.0).round() / 10.0
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Token/word hints handed to the backend for a story length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthLimits {
    pub max_tokens: u32,
    pub max_words: u32,
    pub paragraphs: &'static str,
}

impl StoryLength {
    /// Lenient lookup: anything unrecognized (or absent) is medium.
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some("short") => Self::Short,
            Some("long") => Self::Long,
            _ => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn limits(&self) -> LengthLimits {
        match self {
            Self::Short => LengthLimits {
                max_tokens: 220,
                max_words: 180,
                paragraphs: "1-2",
            },
            Self::Medium => LengthLimits {
                max_tokens: 550,
                max_words: 450,
                paragraphs: "3-5",
            },
            Self::Long => LengthLimits {
                max_tokens: 1100,
                max_words: 900,
                paragraphs: "6-10",
            },
        }
    }
}

/// Request style: a user prompt ("search") or a surprise-me run ("generate").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Prompt,
    Random,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Random => "random",
        }
    }
}

/// Search input from the presentation layer.
#[derive(Debug, Clone, Validate)]
pub struct SearchRequest {
    #[validate(custom(function = "validate_search_prompt"))]
    pub prompt: String,
    pub preferences: PreferenceSet,
}

fn validate_search_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().chars().count() < 2 {
        let mut err = ValidationError::new("prompt_too_short");
        err.message = Some("Please enter at least two characters to search.".into());
        return Err(err);
    }
    Ok(())
}
