use super::*;

/// Moderation state of a post or a report, as reported by the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ReviewState {
  Approved,
  Pending,
  Rejected,
  Unknown(String),
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub(crate) enum SubmitStatus {
  Deny,
  Pass,
  Pending,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct SubmitOutcome {
  #[serde(default, deserialize_with = "deserialize_optional_string")]
  pub(crate) id: Option<String>,
  #[serde(default)]
  pub(crate) message: Option<String>,
  pub(crate) status: SubmitStatus,
}

impl ReviewState {
  pub(crate) fn label(&self) -> &str {
    match self {
      ReviewState::Approved => "approved",
      ReviewState::Pending => "pending review",
      ReviewState::Rejected => "rejected",
      ReviewState::Unknown(_) => "not found",
    }
  }
}

impl From<String> for ReviewState {
  fn from(status: String) -> Self {
    match status.as_str() {
      "Approved" => ReviewState::Approved,
      "Pending" => ReviewState::Pending,
      "Rejected" => ReviewState::Rejected,
      _ => ReviewState::Unknown(status),
    }
  }
}

impl SubmitOutcome {
  pub(crate) fn banned() -> Self {
    Self {
      id: None,
      message: Some("post contains banned words".to_string()),
      status: SubmitStatus::Deny,
    }
  }

  pub(crate) fn summary(&self) -> String {
    let id = self.id.as_deref().unwrap_or("?");

    let detail = self
      .message
      .as_deref()
      .filter(|message| !message.is_empty());

    match (self.status, detail) {
      (SubmitStatus::Deny, Some(message)) => format!("Post denied: {message}"),
      (SubmitStatus::Deny, None) => "Post denied: contains banned words".into(),
      (SubmitStatus::Pass, Some(message)) => {
        format!("Post published, id={id}, {message}")
      }
      (SubmitStatus::Pass, None) => format!("Post published, id={id}"),
      (SubmitStatus::Pending, Some(message)) => {
        format!("Post awaiting review, id={id}, {message}")
      }
      (SubmitStatus::Pending, None) => format!("Post awaiting review, id={id}"),
    }
  }
}
