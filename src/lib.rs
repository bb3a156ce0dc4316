// Library exports for testing and reuse
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Result};
pub use models::{PreferenceSet, ResultSet, StoryRecord};
pub use services::StoryService;
