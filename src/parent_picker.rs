use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParentOption {
  pub(crate) id: u64,
  pub(crate) label: String,
}

/// Parent selection for an admin comment edit.
pub(crate) struct ParentPicker {
  pub(crate) draft: CommentPatch,
  pub(crate) options: ListView<ParentOption>,
}

impl ParentPicker {
  const TOP_LEVEL_LABEL: &str = "top-level (no parent)";

  pub(crate) fn chosen(&self) -> Option<u64> {
    self.options.selected_item().map(|option| option.id)
  }

  pub(crate) fn labels(&self) -> Vec<String> {
    self
      .options
      .items()
      .iter()
      .map(|option| option.label.clone())
      .collect()
  }

  pub(crate) fn new(comments: &[Comment], draft: CommentPatch) -> Self {
    let depths = DepthResolver::resolve(comments);

    let options = iter::once(ParentOption {
      id: Comment::ROOT,
      label: Self::TOP_LEVEL_LABEL.to_string(),
    })
    .chain(
      comments
        .iter()
        .filter(|comment| comment.id != draft.id)
        .map(|comment| {
          let depth = depths.get(&comment.id).copied().unwrap_or(0);

          ParentOption {
            id: comment.id,
            label: format!(
              "{}#{} - {}",
              "  ".repeat(depth),
              comment.id,
              comment.nickname
            ),
          }
        }),
    )
    .collect::<Vec<_>>();

    let current = options
      .iter()
      .position(|option| option.id == draft.parent_comment_id)
      .unwrap_or(0);

    let mut options = ListView::new(options);

    options.select(current);

    Self { draft, options }
  }

  pub(crate) fn select_next(&mut self) {
    self.options.select_next();
  }

  pub(crate) fn select_previous(&mut self) {
    self.options.select_previous();
  }
}
