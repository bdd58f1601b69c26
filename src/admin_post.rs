use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct AdminPost {
  #[serde(default)]
  pub(crate) content: String,
  #[serde(default)]
  pub(crate) create_time: String,
  #[serde(default)]
  pub(crate) downvotes: u64,
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) upvotes: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PostAction {
  Approve,
  Delete,
  Disapprove,
  Reaudit,
}

impl PostAction {
  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      PostAction::Approve => "/approve",
      PostAction::Delete => "/del_post",
      PostAction::Disapprove => "/disapprove",
      PostAction::Reaudit => "/reaudit",
    }
  }

  pub(crate) fn past_tense(self) -> &'static str {
    match self {
      PostAction::Approve => "Approved",
      PostAction::Delete => "Deleted",
      PostAction::Disapprove => "Rejected",
      PostAction::Reaudit => "Sent back to review",
    }
  }
}
