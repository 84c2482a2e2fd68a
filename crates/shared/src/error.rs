use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("sensor payload length mismatch: {labels} time labels vs {values} co2 readings")]
    LengthMismatch { labels: usize, values: usize },
}
