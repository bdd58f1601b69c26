use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StateTarget {
  Post,
  Report,
}

/// Side effects requested by the state machine and carried out by the app.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  CancelComments,
  CancelTabFetch {
    category: Category,
  },
  CheckStatus,
  DecideReport {
    decision: ReportDecision,
    id: u64,
  },
  DeleteComment {
    id: u64,
    post_id: u64,
  },
  DeletePicture {
    filename: String,
  },
  DownloadBackup {
    dir: PathBuf,
  },
  FetchComments {
    post_id: u64,
    request_id: u64,
  },
  FetchTabItems {
    category: Category,
    page: u64,
    request_id: u64,
  },
  InitBackend {
    payload: InitPayload,
  },
  LoadPostForEdit {
    id: u64,
  },
  Login {
    token: String,
  },
  LookupState {
    id: u64,
    target: StateTarget,
  },
  Moderate {
    action: PostAction,
    category: Category,
    id: u64,
  },
  ModifyComment {
    patch: CommentPatch,
    post_id: u64,
  },
  ModifyPost {
    content: String,
    id: u64,
  },
  OpenUrl {
    url: String,
  },
  PostComment {
    comment: NewComment,
  },
  ReportPost {
    report: NewReport,
  },
  Restore {
    path: PathBuf,
  },
  SubmitPost {
    content: String,
  },
  ToggleAudit,
  UploadImage {
    path: PathBuf,
  },
  Vote {
    id: u64,
    vote: Vote,
  },
}

impl StateTarget {
  pub(crate) fn noun(self) -> &'static str {
    match self {
      StateTarget::Post => "Post",
      StateTarget::Report => "Report",
    }
  }
}
