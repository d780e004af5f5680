//! Horoscope API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::errors::FetchError;
use crate::domain::entities::{DayToken, HoroscopeResult, ZodiacSign};
use crate::domain::traits::HoroscopeSource;

/// Public horoscope API base URL
pub const DEFAULT_BASE_URL: &str = "https://horoscope-app-api.vercel.app/api/v1/get-horoscope";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    data: DailyData,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    date: String,
    horoscope_data: String,
}

/// HTTP client for `GET <base>/daily?sign=..&day=..`
pub struct HoroscopeClient {
    client: Client,
    base_url: String,
}

impl HoroscopeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn daily_url(&self) -> String {
        format!("{}/daily", self.base_url.trim_end_matches('/'))
    }
}

/// Parse a `/daily` response body
pub fn parse_daily(body: &str) -> Result<HoroscopeResult, FetchError> {
    let response: DailyResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

    Ok(HoroscopeResult::new(response.data.date, response.data.horoscope_data))
}

#[async_trait]
impl HoroscopeSource for HoroscopeClient {
    async fn fetch(&self, sign: ZodiacSign, day: DayToken) -> Result<HoroscopeResult, FetchError> {
        let day = day.as_query();
        tracing::debug!("GET {} sign={} day={}", self.daily_url(), sign, day);

        let response = self.client
            .get(self.daily_url())
            .query(&[("sign", sign.as_str()), ("day", day.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_daily(&body)
    }
}
