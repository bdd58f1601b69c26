use super::*;

/// The most recent comment snapshot for one post.
///
/// Admin edits are applied to the snapshot in place and are never reconciled
/// with the server; the next `replace` is authoritative.
#[derive(Clone, Debug)]
pub(crate) struct CommentStore {
  post_id: u64,
  snapshot: Option<Vec<Comment>>,
}

impl CommentStore {
  pub(crate) fn apply_delete(&mut self, id: u64) -> bool {
    let Some(comments) = self.snapshot.as_mut() else {
      return false;
    };

    let before = comments.len();

    comments.retain(|comment| comment.id != id);

    comments.len() != before
  }

  pub(crate) fn apply_patch(&mut self, patch: &CommentPatch) -> bool {
    let Some(comment) = self
      .snapshot
      .as_mut()
      .and_then(|comments| comments.iter_mut().find(|c| c.id == patch.id))
    else {
      return false;
    };

    comment.content.clone_from(&patch.content);
    comment.nickname.clone_from(&patch.nickname);
    comment.parent_comment_id = patch.parent_comment_id;

    true
  }

  pub(crate) fn comments(&self) -> &[Comment] {
    self.snapshot.as_deref().unwrap_or_default()
  }

  pub(crate) fn find(&self, id: u64) -> Option<&Comment> {
    self.comments().iter().find(|comment| comment.id == id)
  }

  pub(crate) fn is_loaded(&self) -> bool {
    self.snapshot.is_some()
  }

  pub(crate) fn len(&self) -> usize {
    self.comments().len()
  }

  pub(crate) fn new(post_id: u64) -> Self {
    Self {
      post_id,
      snapshot: None,
    }
  }

  pub(crate) fn post_id(&self) -> u64 {
    self.post_id
  }

  pub(crate) fn replace(&mut self, comments: Vec<Comment>) {
    self.snapshot = Some(comments);
  }
}
