use serde::{Deserialize, Serialize};

/// A normalized story as handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl StoryRecord {
    pub fn numbered(index: usize, content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            title: format!("Story {}", index + 1),
            content: content.into(),
            model,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub stories: Vec<StoryRecord>,
}

impl ResultSet {
    pub fn new(stories: Vec<StoryRecord>) -> Self {
        Self { stories }
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}
