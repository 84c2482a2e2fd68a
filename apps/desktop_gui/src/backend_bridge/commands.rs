//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    SubmitFeedback { is_correct: String },
    SetTheme { name: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitFeedback { .. } => "submit_feedback",
            BackendCommand::SetTheme { .. } => "set_theme",
        }
    }
}
