use super::*;

type ApiResult<T = ()> = Result<T, ApiError>;

pub(crate) enum Event {
  AuditToggled {
    result: ApiResult<bool>,
  },
  BackupSaved {
    result: ApiResult<PathBuf>,
  },
  CommentDeleted {
    id: u64,
    post_id: u64,
    result: ApiResult,
  },
  CommentModified {
    patch: CommentPatch,
    post_id: u64,
    result: ApiResult,
  },
  CommentPosted {
    post_id: u64,
    result: ApiResult<CommentReceipt>,
  },
  Comments {
    request_id: u64,
    result: ApiResult<Vec<Comment>>,
  },
  ImageUploaded {
    result: ApiResult<String>,
  },
  Initialized {
    result: ApiResult,
  },
  LoggedIn {
    result: ApiResult<bool>,
    token: String,
  },
  Moderated {
    action: PostAction,
    category: Category,
    id: u64,
    result: ApiResult,
  },
  PictureDeleted {
    filename: String,
    result: ApiResult,
  },
  PostLoaded {
    id: u64,
    result: ApiResult<String>,
  },
  PostModified {
    content: String,
    id: u64,
    result: ApiResult,
  },
  PostSubmitted {
    content: String,
    result: ApiResult<SubmitOutcome>,
  },
  ReportDecided {
    decision: ReportDecision,
    id: u64,
    result: ApiResult,
  },
  Reported {
    post_id: u64,
    result: ApiResult<ReportReceipt>,
  },
  Restored {
    result: ApiResult,
  },
  StateLookup {
    id: u64,
    result: ApiResult<ReviewState>,
    target: StateTarget,
  },
  Status {
    statics: Option<Statics>,
    status: ApiStatus,
  },
  TabItems {
    category: Category,
    request_id: u64,
    result: ApiResult<Vec<ListEntry>>,
  },
  Voted {
    id: u64,
    result: ApiResult,
    vote: Vote,
  },
}
