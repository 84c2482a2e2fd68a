use serde::{Deserialize, Serialize};

/// Storage key holding the persisted theme identifier.
pub const THEME_STORAGE_KEY: &str = "theme";
pub const DEFAULT_THEME: &str = "theme-light";

/// Canvas the CO2 chart is bound to.
pub const CO2_CHART_CANVAS_ID: &str = "co2Chart";
pub const DESIGN_MODAL_ID: &str = "designModal";

/// Form input carrying the feedback verdict.
pub const IS_CORRECT_FIELD: &str = "is_correct";

/// A single feedback verdict, read from the form at submit time.
///
/// `"1"` marks the upstream prediction as correct; any other value is
/// forwarded unchanged and treated as "not correct".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub is_correct: String,
}

impl FeedbackSubmission {
    pub fn new(is_correct: impl Into<String>) -> Self {
        Self {
            is_correct: is_correct.into(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct == "1"
    }
}

/// Parallel label/value sequences backing the CO2 chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn latest(&self) -> Option<(&str, f64)> {
        let label = self.labels.last()?;
        let value = self.values.last()?;
        Some((label.as_str(), *value))
    }
}

/// Theme identifier applied as the root class. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemePreference(pub String);

impl ThemePreference {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self(DEFAULT_THEME.to_string())
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemePreference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ThemePreference {
    fn from(value: String) -> Self {
        Self(value)
    }
}
