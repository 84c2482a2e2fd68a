//! Feedback form submission.
//!
//! The native submission is always cancelled; the verdict is posted to
//! `/feedback` and the outcome is reported through a [`UserNotifier`].

use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{FeedbackSubmission, IS_CORRECT_FIELD},
    protocol::feedback_page_path,
};
use tracing::{debug, info, warn};

use crate::{
    api::{DashboardApi, FeedbackOutcome},
    error::FeedbackError,
};

/// User-facing side effects: pop-up messages and page navigation.
pub trait UserNotifier: Send + Sync {
    fn alert(&self, message: &str);
    fn navigate(&self, location: &str);
}

/// Submit event for the feedback form.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Input values of the form that raised the submit event.
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    fields: HashMap<String, String>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_is_correct(value: impl Into<String>) -> Self {
        Self::new().with_field(IS_CORRECT_FIELD, value)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn submission(&self) -> FeedbackSubmission {
        FeedbackSubmission::new(self.value(IS_CORRECT_FIELD).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessages {
    pub thank_you: String,
    pub failure: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            thank_you: "Thank you for your feedback!".to_string(),
            failure: "Error sending feedback.".to_string(),
        }
    }
}

pub struct FeedbackSubmitter {
    api: DashboardApi,
    notifier: Arc<dyn UserNotifier>,
    messages: FeedbackMessages,
    local_acknowledgement: bool,
}

impl FeedbackSubmitter {
    pub fn new(api: DashboardApi, notifier: Arc<dyn UserNotifier>) -> Self {
        Self {
            api,
            notifier,
            messages: FeedbackMessages::default(),
            local_acknowledgement: true,
        }
    }

    pub fn with_messages(mut self, messages: FeedbackMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Toggle the thank-you pop-up shown before the server answers.
    pub fn with_local_acknowledgement(mut self, enabled: bool) -> Self {
        self.local_acknowledgement = enabled;
        self
    }

    /// Handle a submit event for `form`.
    ///
    /// The event's default action is prevented before anything else happens,
    /// so the native submission never runs regardless of the outcome. A
    /// transport or decoding failure shows the same failure alert as a
    /// non-200 status and is returned to the caller.
    pub async fn submit(
        &self,
        event: &mut SubmitEvent,
        form: &FeedbackForm,
    ) -> Result<FeedbackOutcome, FeedbackError> {
        event.prevent_default();

        let submission = form.submission();
        debug!(
            is_correct = %submission.is_correct,
            correct = submission.is_correct(),
            "submitting feedback"
        );

        // Same text for either verdict.
        if self.local_acknowledgement {
            self.notifier.alert(&self.messages.thank_you);
        }

        match self.api.submit_feedback(&submission).await {
            Ok(FeedbackOutcome::Accepted { message }) => {
                info!(%message, "feedback accepted");
                self.notifier.alert(&message);
                self.notifier.navigate(&feedback_page_path(&message));
                Ok(FeedbackOutcome::Accepted { message })
            }
            Ok(FeedbackOutcome::Rejected { status }) => {
                warn!(%status, "feedback rejected by server");
                self.notifier.alert(&self.messages.failure);
                Ok(FeedbackOutcome::Rejected { status })
            }
            Err(err) => {
                warn!("feedback submission failed: {err}");
                self.notifier.alert(&self.messages.failure);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;
