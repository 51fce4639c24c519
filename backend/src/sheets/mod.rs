pub mod parse;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::error::AppError;
use crate::models::Course;

pub use parse::parse_courses;

pub const DEFAULT_SHEET_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/1WzPZQzqtdPMTPYj5Z7YDV1NA038-bZcoM6YiLra9Wa8/export?format=csv&gid=0";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub csv_url: String,
    pub timeout: Duration,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            csv_url: DEFAULT_SHEET_CSV_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
}

/// Fetches the published sheet on every call. No caching, no retries.
pub struct SheetHttpClient {
    client: Client,
    config: SheetConfig,
}

impl SheetHttpClient {
    pub fn new(config: SheetConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn download(&self) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(&self.config.csv_url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "{} returned {}",
                self.config.csv_url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CourseSource for SheetHttpClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        let body = self.download().await?;
        let courses = parse_courses(&body)?;
        info!("Successfully fetched {} courses from sheet source", courses.len());
        Ok(courses)
    }
}
