use serde::{Serialize, Serializer};

use crate::models::{
    preferences::creativity_to_temperature, GenerationMode, LengthLimits, PreferenceSet,
    StoryLength,
};

/// Canonical, provider-agnostic generation request.
///
/// Each value is held once. The synonym keys and nested mirrors that unknown
/// backends look for are produced only when the request is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: GenerationMode,
    pub count: u32,
    pub variations: bool,
    pub genre: Option<String>,
    pub tone: Option<String>,
    /// Raw length id as chosen by the user; `limits` is derived from it.
    pub length: Option<String>,
    pub theme: Option<String>,
    pub themes: Vec<String>,
    pub creativity: Option<i32>,
    pub temperature: Option<f64>,
    pub limits: LengthLimits,
    pub seed: Option<i64>,
}

impl GenerationRequest {
    pub fn build(
        prompt: &str,
        preferences: &PreferenceSet,
        mode: GenerationMode,
        count: u32,
        variations: bool,
    ) -> Self {
        let limits = StoryLength::from_id(preferences.length.as_deref()).limits();

        Self {
            prompt: prompt.to_string(),
            mode,
            count: count.max(1),
            variations,
            genre: preferences.genre.clone(),
            tone: preferences.tone.clone(),
            length: preferences.length.clone(),
            theme: preferences.theme.clone(),
            themes: preferences.normalized_themes(),
            creativity: preferences.clamped_creativity(),
            temperature: creativity_to_temperature(preferences.creativity),
            limits,
            seed: None,
        }
    }

    /// Clone tuned for a single fan-out call: one story, no batch, a diversity
    /// suffix on the prompt and a per-call seed.
    pub fn variation(&self, index: usize, seed: i64) -> Self {
        let mut variant = self.clone();
        variant.prompt = self.variation_prompt(index);
        variant.count = 1;
        variant.variations = false;
        variant.seed = Some(seed);
        variant
    }

    fn variation_prompt(&self, index: usize) -> String {
        let genre = or_any(self.genre.as_deref());
        let tone = or_any(self.tone.as_deref());
        let length = or_any(self.length.as_deref());
        let creativity = self
            .creativity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "any".to_string());

        match self.mode {
            GenerationMode::Prompt => format!(
                "{}\n\nConstraints: genre={}, tone={}, length={}, theme={}, creativity={}. Variation #{}.",
                self.prompt,
                genre,
                tone,
                length,
                or_any(self.theme.as_deref()),
                creativity,
                index + 1
            ),
            GenerationMode::Random => {
                let themes = if self.themes.is_empty() {
                    "any".to_string()
                } else {
                    self.themes.join(",")
                };
                format!(
                    "Random story. Constraints: genre={}, tone={}, length={}, themes={}. Creativity={}. Variation #{}.",
                    genre,
                    tone,
                    length,
                    themes,
                    creativity,
                    index + 1
                )
            }
        }
    }

    /// Single-string summary for backends that only read free text.
    pub fn instructions(&self) -> String {
        let themes = if self.themes.is_empty() {
            "the provided idea".to_string()
        } else {
            self.themes.join(", ")
        };

        format!(
            "Generate {} {}-length ({} words approx) {} {} themed around {}. Creativity: {}/10.",
            self.count,
            self.length.as_deref().unwrap_or("medium"),
            self.limits.max_words,
            self.tone.as_deref().unwrap_or("neutral"),
            self.genre.as_deref().unwrap_or("story"),
            themes,
            self.creativity.unwrap_or(7)
        )
    }

    pub fn to_payload(&self) -> serde_json::Value {
        // Serializing plain structs of strings and numbers cannot fail
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn or_any(value: Option<&str>) -> &str {
    value.unwrap_or("any")
}

// ==================== Wire rendering ====================

#[derive(Serialize)]
struct WirePayload<'a> {
    prompt: &'a str,
    inputs: &'a str,
    mode: GenerationMode,

    limit: u32,
    n: u32,
    count: u32,
    num_results: u32,
    num_outputs: u32,
    num_samples: u32,
    samples: u32,
    results: u32,
    outputs: u32,
    variations: bool,

    #[serde(flatten)]
    filters_flat: WireFilters<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
    max_tokens_hint: u32,
    max_words: u32,
    parameters: WireParameters,

    filters: WireFilters<'a>,
    #[serde(rename = "advancedSettings")]
    advanced_settings: WireMirror<'a>,
    ui: WireMirror<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,

    instructions: String,
}

#[derive(Serialize, Clone, Copy)]
struct WireFilters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<&'a str>,
    themes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    creativity: Option<i32>,
}

#[derive(Serialize)]
struct WireMirror<'a> {
    #[serde(flatten)]
    filters: WireFilters<'a>,
    limit: u32,
}

#[derive(Serialize)]
struct WireParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_new_tokens: u32,
    max_tokens: u32,
}

impl<'a> From<&'a GenerationRequest> for WirePayload<'a> {
    fn from(req: &'a GenerationRequest) -> Self {
        let filters = WireFilters {
            genre: req.genre.as_deref(),
            tone: req.tone.as_deref(),
            length: req.length.as_deref(),
            theme: req.theme.as_deref(),
            themes: &req.themes,
            creativity: req.creativity,
        };
        let count = req.count;
        let max_tokens = req.limits.max_tokens;

        Self {
            prompt: &req.prompt,
            inputs: &req.prompt,
            mode: req.mode,
            limit: count,
            n: count,
            count,
            num_results: count,
            num_outputs: count,
            num_samples: count,
            samples: count,
            results: count,
            outputs: count,
            variations: req.variations,
            filters_flat: filters,
            temperature: req.temperature,
            max_tokens,
            max_tokens_hint: max_tokens,
            max_words: req.limits.max_words,
            parameters: WireParameters {
                temperature: req.temperature,
                max_new_tokens: max_tokens,
                max_tokens,
            },
            filters,
            advanced_settings: WireMirror {
                filters,
                limit: count,
            },
            ui: WireMirror {
                filters,
                limit: count,
            },
            seed: req.seed,
            instructions: req.instructions(),
        }
    }
}

impl Serialize for GenerationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WirePayload::from(self).serialize(serializer)
    }
}
