pub mod catalog;
pub mod preferences;
pub mod story;

pub use preferences::{GenerationMode, LengthLimits, PreferenceSet, SearchRequest, StoryLength};
pub use story::{ResultSet, StoryRecord};
