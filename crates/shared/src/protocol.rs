use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    domain::{ChartSeries, FeedbackSubmission},
    error::PayloadError,
};

pub const FEEDBACK_PATH: &str = "/feedback";
pub const SENSOR_DATA_PATH: &str = "/data";

/// URL-encoded body of `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackFormBody {
    pub is_correct: String,
}

impl From<&FeedbackSubmission> for FeedbackFormBody {
    fn from(value: &FeedbackSubmission) -> Self {
        Self {
            is_correct: value.is_correct.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Body of `GET /data`. Fields other than `time` and `co2` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDataResponse {
    #[serde(deserialize_with = "deserialize_labels")]
    pub time: Vec<String>,
    pub co2: Vec<f64>,
}

impl SensorDataResponse {
    pub fn into_series(self) -> Result<ChartSeries, PayloadError> {
        if self.time.len() != self.co2.len() {
            return Err(PayloadError::LengthMismatch {
                labels: self.time.len(),
                values: self.co2.len(),
            });
        }
        Ok(ChartSeries {
            labels: self.time,
            values: self.co2,
        })
    }
}

// Time labels arrive as strings from most feeds, but numeric epoch labels are
// rendered verbatim rather than rejected.
fn deserialize_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(label) => label,
            other => other.to_string(),
        })
        .collect())
}

/// Page route shown after a successful feedback submission.
pub fn feedback_page_path(message: &str) -> String {
    format!("{FEEDBACK_PATH}?message={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_page_path_percent_encodes_message() {
        assert_eq!(feedback_page_path("X"), "/feedback?message=X");
        assert_eq!(
            feedback_page_path("Danke für Dein Feedback!"),
            "/feedback?message=Danke%20f%C3%BCr%20Dein%20Feedback%21"
        );
        assert_eq!(feedback_page_path("a&b=c"), "/feedback?message=a%26b%3Dc");
    }

    #[test]
    fn sensor_payload_becomes_series() {
        let payload: SensorDataResponse =
            serde_json::from_str(r#"{"time":["t1","t2"],"co2":[400,420],"humidity":[40,41]}"#)
                .expect("payload");
        let series = payload.into_series().expect("series");
        assert_eq!(series.labels, vec!["t1", "t2"]);
        assert_eq!(series.values, vec![400.0, 420.0]);
    }

    #[test]
    fn numeric_time_labels_are_kept_verbatim() {
        let payload: SensorDataResponse =
            serde_json::from_str(r#"{"time":[1700000000,1700000002],"co2":[410.5,415]}"#)
                .expect("payload");
        assert_eq!(payload.time, vec!["1700000000", "1700000002"]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let payload = SensorDataResponse {
            time: vec!["t1".into()],
            co2: vec![400.0, 420.0],
        };
        assert_eq!(
            payload.into_series(),
            Err(PayloadError::LengthMismatch {
                labels: 1,
                values: 2
            })
        );
    }
}
