use super::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct NewReport {
  pub(crate) content: String,
  pub(crate) id: u64,
  pub(crate) title: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct PendingReport {
  #[serde(default)]
  pub(crate) content: String,
  #[serde(default)]
  pub(crate) created_at: String,
  #[serde(default)]
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) status: String,
  #[serde(default)]
  pub(crate) submission_id: u64,
  #[serde(default)]
  pub(crate) title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReportDecision {
  Approve,
  Reject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportReceipt {
  pub(crate) id: u64,
}

impl ReportDecision {
  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      ReportDecision::Approve => "/approve_report",
      ReportDecision::Reject => "/reject_report",
    }
  }
}
