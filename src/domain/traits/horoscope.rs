use async_trait::async_trait;

use crate::application::errors::FetchError;
use crate::domain::entities::{DayToken, HoroscopeResult, ZodiacSign};

/// Remote source of daily readings
#[async_trait]
pub trait HoroscopeSource: Send + Sync {
    async fn fetch(&self, sign: ZodiacSign, day: DayToken) -> Result<HoroscopeResult, FetchError>;
}
