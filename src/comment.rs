use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub(crate) struct Comment {
  #[serde(default)]
  pub(crate) content: String,
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) nickname: String,
  #[serde(default, deserialize_with = "deserialize_null_as_zero")]
  pub(crate) parent_comment_id: u64,
}

impl Comment {
  /// Parent reference of a top-level comment.
  pub(crate) const ROOT: u64 = 0;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct CommentPatch {
  pub(crate) content: String,
  pub(crate) id: u64,
  pub(crate) nickname: String,
  pub(crate) parent_comment_id: u64,
}

impl From<&Comment> for CommentPatch {
  fn from(comment: &Comment) -> Self {
    Self {
      content: comment.content.clone(),
      id: comment.id,
      nickname: comment.nickname.clone(),
      parent_comment_id: comment.parent_comment_id,
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentReceipt {
  pub(crate) id: u64,
  #[allow(dead_code)]
  #[serde(default)]
  pub(crate) status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct NewComment {
  pub(crate) content: String,
  pub(crate) nickname: String,
  pub(crate) parent_comment_id: u64,
  pub(crate) submission_id: u64,
}
