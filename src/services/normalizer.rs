use serde_json::Value;

use crate::models::{ResultSet, StoryRecord};

/// Response layouts produced by the providers we have seen behind the
/// generation endpoint, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[ {...}, ... ]` or `{ "stories": [ ... ] }`
    StoryList,
    /// `{ "content" | "text" | "narrative": "..." }`
    SingleText,
    /// `{ "choices": [ { "message": { "content" } } | { "text" } ] }`
    ChoiceList,
    /// `{ "candidates": [ { "content": { "parts": [ { "text" } ] } } ] }`
    CandidateList,
    /// `{ "completion": "..." }`
    Completion,
}

impl ResponseShape {
    pub const PRIORITY: [ResponseShape; 5] = [
        ResponseShape::StoryList,
        ResponseShape::SingleText,
        ResponseShape::ChoiceList,
        ResponseShape::CandidateList,
        ResponseShape::Completion,
    ];

    /// Try to read `raw` as this shape. `None` means "not this shape".
    pub fn parse(&self, raw: &Value) -> Option<Vec<StoryRecord>> {
        match self {
            ResponseShape::StoryList => parse_story_list(raw),
            ResponseShape::SingleText => parse_single_text(raw),
            ResponseShape::ChoiceList => parse_choice_list(raw),
            ResponseShape::CandidateList => parse_candidate_list(raw),
            ResponseShape::Completion => parse_completion(raw),
        }
    }
}

/// Read an arbitrary backend reply into a result set. Never fails: a reply
/// matching no known shape yields an empty set.
pub fn normalize_stories(raw: &Value) -> ResultSet {
    detect(raw)
        .map(|(_, stories)| ResultSet::new(stories))
        .unwrap_or_default()
}

/// First matching shape and its stories.
pub fn detect(raw: &Value) -> Option<(ResponseShape, Vec<StoryRecord>)> {
    ResponseShape::PRIORITY
        .iter()
        .find_map(|shape| shape.parse(raw).map(|stories| (*shape, stories)))
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Present, string-typed and non-empty.
fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    str_field(value, key).filter(|s| !s.is_empty())
}

fn first_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text_field(value, key))
}

fn envelope_model(raw: &Value) -> Option<String> {
    text_field(raw, "model").map(str::to_string)
}

fn numbered(contents: Vec<String>, model: Option<String>) -> Option<Vec<StoryRecord>> {
    if contents.is_empty() {
        return None;
    }
    Some(
        contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| StoryRecord::numbered(i, content, model.clone()))
            .collect(),
    )
}

fn parse_story_list(raw: &Value) -> Option<Vec<StoryRecord>> {
    let items = raw
        .get("stories")
        .and_then(Value::as_array)
        .or_else(|| raw.as_array())?;
    let fallback_model = envelope_model(raw);

    Some(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| StoryRecord {
                title: first_text(item, &["title", "name"])
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Story {}", i + 1)),
                content: first_text(item, &["content", "text", "narrative"])
                    .unwrap_or_default()
                    .to_string(),
                model: text_field(item, "model")
                    .map(str::to_string)
                    .or_else(|| fallback_model.clone()),
            })
            .collect(),
    )
}

fn parse_single_text(raw: &Value) -> Option<Vec<StoryRecord>> {
    const KEYS: [&str; 3] = ["content", "text", "narrative"];

    if !KEYS.iter().any(|key| str_field(raw, key).is_some()) {
        return None;
    }

    Some(vec![StoryRecord {
        title: text_field(raw, "title").unwrap_or("Story 1").to_string(),
        content: first_text(raw, &KEYS).unwrap_or_default().to_string(),
        model: envelope_model(raw),
    }])
}

fn parse_choice_list(raw: &Value) -> Option<Vec<StoryRecord>> {
    let choices = raw.get("choices").and_then(Value::as_array)?;

    let contents: Vec<String> = choices
        .iter()
        .filter_map(|choice| {
            choice
                .get("message")
                .and_then(|m| str_field(m, "content"))
                .or_else(|| str_field(choice, "text"))
        })
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    numbered(contents, envelope_model(raw))
}

fn parse_candidate_list(raw: &Value) -> Option<Vec<StoryRecord>> {
    let candidates = raw.get("candidates").and_then(Value::as_array)?;

    let contents: Vec<String> = candidates
        .iter()
        .filter_map(|candidate| {
            let parts = candidate
                .get("content")
                .and_then(|c| c.get("parts"))
                .and_then(Value::as_array)?;
            let text = parts
                .iter()
                .filter_map(|part| str_field(part, "text"))
                .filter(|t| !t.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            (!text.is_empty()).then_some(text)
        })
        .collect();

    numbered(contents, envelope_model(raw))
}

fn parse_completion(raw: &Value) -> Option<Vec<StoryRecord>> {
    let completion = str_field(raw, "completion")?;
    Some(vec![StoryRecord::numbered(
        0,
        completion,
        envelope_model(raw),
    )])
}
