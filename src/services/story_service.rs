use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::{
    config::{Config, DefaultsConfig},
    error::{ApiError, Result},
    models::{GenerationMode, PreferenceSet, ResultSet, SearchRequest},
    services::{
        fan_out::fill_to_count, normalizer::normalize_stories, request_builder::GenerationRequest,
    },
    utils::truncate_body,
};

pub struct StoryService {
    http_client: reqwest::Client,
    endpoint: String,
    defaults: DefaultsConfig,
}

impl StoryService {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api.request_timeout_ms))
            .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: config.api.generate_url(),
            defaults: config.defaults.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Stories for a user prompt. The trimmed prompt must be at least two
    /// characters; this is checked before anything is sent.
    #[instrument(skip(self, prompt, preferences), fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn search(&self, prompt: &str, preferences: &PreferenceSet) -> Result<ResultSet> {
        let search = SearchRequest {
            prompt: prompt.trim().to_string(),
            preferences: preferences.clone(),
        };
        search
            .validate()
            .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

        let count = preferences.resolved_count(self.defaults.search_count);
        let request =
            GenerationRequest::build(&search.prompt, preferences, GenerationMode::Prompt, count, true);

        info!(
            "Searching stories: count={}, prompt_len={}",
            count,
            search.prompt.len()
        );

        self.run(request).await
    }

    /// "Surprise me" stories: no prompt, only preferences.
    #[instrument(skip(self, preferences), fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn generate(&self, preferences: &PreferenceSet) -> Result<ResultSet> {
        let count = preferences.resolved_count(self.defaults.generate_count);
        let request = GenerationRequest::build("", preferences, GenerationMode::Random, count, true);

        info!("Generating random stories: count={}", count);

        self.run(request).await
    }

    /// Primary call, then fan-out for any shortfall. Primary failures propagate.
    async fn run(&self, request: GenerationRequest) -> Result<ResultSet> {
        let raw = self.post_json(&request).await?;
        let primary = normalize_stories(&raw);

        info!(
            "Primary call returned {} of {} stories",
            primary.len(),
            request.count
        );

        let stories = fill_to_count(&request, primary.stories, move |variant| async move {
            self.post_json(&variant).await
        })
        .await?;

        info!("Returning {} stories", stories.len());

        Ok(ResultSet::new(stories))
    }

    /// POST a generation request and parse the JSON reply.
    ///
    /// Non-2xx replies become [`ApiError::Status`]; a 2xx reply whose body is
    /// empty or not JSON becomes [`ApiError::InvalidBody`].
    pub async fn post_json(&self, request: &GenerationRequest) -> Result<Value> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        debug!(
            status = status.as_u16(),
            body = %truncate_body(&text, 2000),
            "Generation response"
        );

        if !status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::Null)
            };
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        if text.trim().is_empty() {
            return Err(ApiError::InvalidBody("empty body".to_string()));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}
