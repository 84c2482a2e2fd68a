//! HTTP access to the dashboard endpoints.

use reqwest::{Client, StatusCode};
use shared::{
    domain::FeedbackSubmission,
    protocol::{
        FeedbackFormBody, FeedbackResponse, SensorDataResponse, FEEDBACK_PATH, SENSOR_DATA_PATH,
    },
};

use crate::error::{ChartRefreshError, FeedbackError};

/// Result of a delivered feedback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Accepted { message: String },
    Rejected { status: StatusCode },
}

#[derive(Debug, Clone)]
pub struct DashboardApi {
    http: Client,
    server_url: String,
}

impl DashboardApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute URL for a server-relative path such as `/feedback?message=..`.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    pub async fn submit_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackOutcome, FeedbackError> {
        let response = self
            .http
            .post(self.resolve(FEEDBACK_PATH))
            .form(&FeedbackFormBody::from(submission))
            .send()
            .await
            .map_err(FeedbackError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FeedbackOutcome::Rejected { status });
        }

        let body: FeedbackResponse = response
            .json()
            .await
            .map_err(FeedbackError::MalformedResponse)?;
        Ok(FeedbackOutcome::Accepted {
            message: body.message,
        })
    }

    pub async fn fetch_sensor_data(&self) -> Result<SensorDataResponse, ChartRefreshError> {
        let response = self
            .http
            .get(self.resolve(SENSOR_DATA_PATH))
            .send()
            .await
            .map_err(ChartRefreshError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartRefreshError::Status(status));
        }

        response.json().await.map_err(ChartRefreshError::Decode)
    }
}
