// Service modules
pub mod fan_out;
pub mod normalizer;
pub mod request_builder;
pub mod story_service;

pub use normalizer::normalize_stories;
pub use request_builder::GenerationRequest;
pub use story_service::StoryService;
