use reqwest::StatusCode;
use shared::error::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback request could not be delivered: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("feedback response was not valid JSON with a message field: {0}")]
    MalformedResponse(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ChartRefreshError {
    #[error("sensor data request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("sensor data endpoint returned status {0}")]
    Status(StatusCode),
    #[error("sensor data was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}
