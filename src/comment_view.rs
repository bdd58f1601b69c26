use super::*;

pub(crate) struct CommentView {
  pub(crate) entries: Vec<CommentEntry>,
  pub(crate) offset: usize,
  pub(crate) picker: Option<ParentPicker>,
  pub(crate) selected: Option<usize>,
  pub(crate) store: CommentStore,
  pub(crate) title: String,
}

impl CommentView {
  pub(crate) fn apply_delete(&mut self, id: u64) {
    if self.store.apply_delete(id) {
      self.rebuild();
    }
  }

  pub(crate) fn apply_patch(&mut self, patch: &CommentPatch) {
    if self.store.apply_patch(patch) {
      self.rebuild();
    }
  }

  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && !entry.children.is_empty() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  /// Moves a hidden selection up to the outermost collapsed ancestor, which
  /// is the row standing in for it.
  pub(crate) fn ensure_selection_visible(&mut self) {
    let Some(selected) = self.selected.filter(|&idx| idx < self.entries.len())
    else {
      self.selected = self.visible_indexes().first().copied();
      return;
    };

    let mut target = selected;
    let mut current = self.entries[selected].parent;

    while let Some(idx) = current {
      let Some(entry) = self.entries.get(idx) else {
        break;
      };

      if !entry.expanded {
        target = idx;
      }

      current = entry.parent;
    }

    self.selected = Some(target);
  }

  pub(crate) fn expand_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      if entry.expanded {
        if let Some(child) = entry.children.first().copied() {
          self.selected = Some(child);
        }
      } else {
        entry.expanded = true;
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let max_index = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      let delta_usize = usize::try_from(delta).unwrap_or(usize::MAX);
      current.saturating_add(delta_usize).min(max_index)
    } else {
      let magnitude = delta
        .checked_abs()
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(usize::MAX);

      current.saturating_sub(magnitude)
    };

    self.selected = Some(visible[target]);
  }

  pub(crate) fn new(post_id: u64, title: String, comments: Vec<Comment>) -> Self {
    let mut view = Self {
      entries: Vec::new(),
      offset: 0,
      picker: None,
      selected: None,
      store: CommentStore::new(post_id),
      title,
    };

    view.replace(comments);

    view
  }

  pub(crate) fn open_picker(&mut self, draft: CommentPatch) -> &ParentPicker {
    self
      .picker
      .insert(ParentPicker::new(self.store.comments(), draft))
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(delta);
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(-delta);
  }

  pub(crate) fn post_id(&self) -> u64 {
    self.store.post_id()
  }

  fn rebuild(&mut self) {
    let collapsed = self
      .entries
      .iter()
      .filter(|entry| !entry.expanded)
      .map(|entry| entry.id)
      .collect::<HashSet<_>>();

    let previous = self.selected;
    let selected_id = self.selected_entry().map(|entry| entry.id);

    let entries = {
      let tree = CommentTree::new(self.store.comments());

      let nodes = tree.render(Comment::ROOT);

      let shown = nodes
        .iter()
        .map(CommentNode::count)
        .fold(0, usize::saturating_add);

      if shown < self.store.len() {
        debug!(
          post_id = self.post_id(),
          hidden = self.store.len() - shown,
          "comments without a reachable parent are hidden"
        );
      }

      let mut entries: Vec<CommentEntry> = Vec::with_capacity(shown);

      let mut pending = nodes
        .into_iter()
        .rev()
        .map(|node| (node, None))
        .collect::<Vec<(CommentNode, Option<usize>)>>();

      while let Some((mut node, parent)) = pending.pop() {
        let Some(comment) = tree.comment(node.index) else {
          continue;
        };

        let idx = entries.len();

        if let Some(parent) = parent
          && let Some(entry) = entries.get_mut(parent)
        {
          entry.children.push(idx);
        }

        entries.push(CommentEntry {
          children: Vec::new(),
          content: comment.content.clone(),
          depth: node.depth,
          expanded: !collapsed.contains(&comment.id),
          id: comment.id,
          nickname: comment.nickname.clone(),
          parent,
          parent_comment_id: comment.parent_comment_id,
        });

        pending.extend(
          mem::take(&mut node.children)
            .into_iter()
            .rev()
            .map(|child| (child, Some(idx))),
        );
      }

      entries
    };

    self.selected = selected_id
      .and_then(|id| entries.iter().position(|entry| entry.id == id))
      .or_else(|| {
        (!entries.is_empty())
          .then(|| previous.unwrap_or(0).min(entries.len().saturating_sub(1)))
      });

    self.entries = entries;

    self.ensure_selection_visible();
  }

  pub(crate) fn replace(&mut self, comments: Vec<Comment>) {
    self.store.replace(comments);
    self.picker = None;
    self.rebuild();
  }

  /// Number of comments that disappear along with `id` when it is deleted.
  pub(crate) fn reply_count(&self, id: u64) -> usize {
    CommentTree::new(self.store.comments()).rows(id).count()
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let (visible, _) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let index = pos.min(visible.len().saturating_sub(1));

    self.selected = Some(visible[index]);
  }

  pub(crate) fn select_next(&mut self) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let next = (current + 1).min(visible.len().saturating_sub(1));

    self.selected = Some(visible[next]);
  }

  pub(crate) fn select_previous(&mut self) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let previous = current.saturating_sub(1);

    self.selected = Some(visible[previous]);
  }

  pub(crate) fn selected_comment(&self) -> Option<&Comment> {
    self
      .selected_entry()
      .and_then(|entry| self.store.find(entry.id))
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|idx| self.entries.get(idx))
  }

  pub(crate) fn toggle_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      entry.expanded = !entry.expanded;
    }

    self.ensure_selection_visible();
  }

  /// Entries are stored in pre-order, so everything deeper than a collapsed
  /// entry up to its next sibling or uncle belongs to its hidden subtree.
  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    let mut visible = Vec::with_capacity(self.entries.len());
    let mut hidden_below: Option<usize> = None;

    for (idx, entry) in self.entries.iter().enumerate() {
      if let Some(depth) = hidden_below {
        if entry.depth > depth {
          continue;
        }

        hidden_below = None;
      }

      visible.push(idx);

      if !entry.expanded {
        hidden_below = Some(entry.depth);
      }
    }

    visible
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&idx| idx == selected));

    (visible, selected_pos)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_comment(id: u64, parent: u64) -> Comment {
    Comment {
      content: format!("comment {id}"),
      id,
      nickname: format!("user{id}"),
      parent_comment_id: parent,
    }
  }

  fn make_view() -> CommentView {
    CommentView::new(
      3,
      "Post #3".to_string(),
      vec![make_comment(1, 0), make_comment(2, 1), make_comment(3, 0)],
    )
  }

  fn entry_ids(view: &CommentView) -> Vec<(u64, usize)> {
    view
      .entries
      .iter()
      .map(|entry| (entry.id, entry.depth))
      .collect()
  }

  #[test]
  fn new_flattens_tree_in_display_order() {
    let view = make_view();

    assert_eq!(entry_ids(&view), vec![(1, 0), (2, 1), (3, 0)]);
    assert_eq!(view.entries[1].parent, Some(0));
    assert_eq!(view.entries[0].children, vec![1]);
    assert_eq!(view.selected, Some(0));
    assert_eq!(view.post_id(), 3);
  }

  #[test]
  fn toggle_selected_collapses_and_expands_comments() {
    let mut view = make_view();
    assert!(view.entries[0].expanded);

    view.toggle_selected();
    assert!(!view.entries[0].expanded);

    view.toggle_selected();
    assert!(view.entries[0].expanded);
  }

  #[test]
  fn collapse_selected_moves_to_parent_when_child_selected() {
    let mut view = make_view();
    view.select_index_at(1);
    assert_eq!(view.selected, Some(1));
    view.collapse_selected();
    assert_eq!(view.selected, Some(0));
  }

  #[test]
  fn expand_selected_moves_into_first_child() {
    let mut view = make_view();
    view.expand_selected();
    assert_eq!(view.selected, Some(1));
  }

  #[test]
  fn ensure_selection_visible_promotes_hidden_selection() {
    let mut view = make_view();
    view.select_index_at(1);
    view.entries[0].expanded = false;
    view.ensure_selection_visible();
    assert_eq!(view.selected, Some(0));
  }

  #[test]
  fn visible_indexes_respect_collapsed_ancestors() {
    let mut view = make_view();
    assert_eq!(view.visible_indexes(), vec![0, 1, 2]);
    view.entries[0].expanded = false;
    assert_eq!(view.visible_indexes(), vec![0, 2]);
  }

  #[test]
  fn nested_collapse_hides_only_that_subtree() {
    let mut view = CommentView::new(
      3,
      String::new(),
      vec![
        make_comment(1, 0),
        make_comment(2, 1),
        make_comment(4, 2),
        make_comment(5, 1),
        make_comment(3, 0),
      ],
    );

    assert_eq!(entry_ids(&view), vec![(1, 0), (2, 1), (4, 2), (5, 1), (3, 0)]);

    view.entries[1].expanded = false;
    assert_eq!(view.visible_indexes(), vec![0, 1, 3, 4]);

    view.selected = Some(2);
    view.entries[0].expanded = false;
    view.ensure_selection_visible();

    assert_eq!(view.visible_indexes(), vec![0, 4]);
    assert_eq!(view.selected, Some(0));
  }

  #[test]
  fn long_reply_chain_builds_and_collapses() {
    let comments = (1..=20_000)
      .map(|id| make_comment(id, id - 1))
      .collect::<Vec<_>>();

    let mut view = CommentView::new(3, String::new(), comments);

    assert_eq!(view.entries.len(), 20_000);
    assert_eq!(view.entries[19_999].depth, 19_999);
    assert_eq!(view.entries[19_999].parent, Some(19_998));
    assert_eq!(view.visible_indexes().len(), 20_000);

    view.selected = Some(19_999);
    view.entries[0].expanded = false;
    view.ensure_selection_visible();

    assert_eq!(view.visible_indexes(), vec![0]);
    assert_eq!(view.selected, Some(0));
    assert_eq!(view.reply_count(1), 19_999);
  }

  #[test]
  fn reparent_to_root_renders_a_sibling() {
    let mut view = make_view();

    let mut patch = CommentPatch::from(view.store.find(2).unwrap());
    patch.parent_comment_id = Comment::ROOT;

    view.apply_patch(&patch);

    assert_eq!(entry_ids(&view), vec![(1, 0), (2, 0), (3, 0)]);
  }

  #[test]
  fn deleting_a_parent_hides_its_replies() {
    let mut view = make_view();

    view.apply_delete(1);

    assert_eq!(entry_ids(&view), vec![(3, 0)]);
    assert_eq!(view.store.len(), 2);
    assert_eq!(view.selected, Some(0));
  }

  #[test]
  fn reply_count_covers_the_whole_subtree() {
    let mut view = make_view();

    view.replace(vec![
      make_comment(1, 0),
      make_comment(2, 1),
      make_comment(4, 2),
      make_comment(3, 0),
    ]);

    assert_eq!(view.reply_count(1), 2);
    assert_eq!(view.reply_count(3), 0);
  }

  #[test]
  fn rebuild_keeps_collapse_state_and_selection() {
    let mut view = make_view();

    view.toggle_selected();
    view.select_next();
    assert_eq!(view.selected_entry().map(|entry| entry.id), Some(3));

    let patch = CommentPatch {
      content: "edited".to_string(),
      id: 3,
      nickname: "mod".to_string(),
      parent_comment_id: Comment::ROOT,
    };

    view.apply_patch(&patch);

    assert!(!view.entries[0].expanded);
    assert_eq!(view.selected_entry().map(|entry| entry.id), Some(3));
    assert_eq!(view.selected_entry().unwrap().body(), "edited");
  }

  #[test]
  fn replace_discards_edits_and_closes_picker() {
    let mut view = make_view();

    view.apply_delete(3);

    let draft = CommentPatch::from(view.selected_comment().unwrap());
    view.open_picker(draft);
    assert!(view.picker.is_some());

    view.replace(vec![make_comment(1, 0), make_comment(2, 1), make_comment(3, 0)]);

    assert!(view.picker.is_none());
    assert_eq!(view.entries.len(), 3);
  }

  #[test]
  fn open_picker_excludes_selected_comment() {
    let mut view = make_view();
    view.select_index_at(1);

    let mut draft = CommentPatch::from(view.selected_comment().unwrap());
    draft.nickname = "renamed".to_string();

    let picker = view.open_picker(draft);

    assert_eq!(picker.draft.id, 2);
    assert_eq!(picker.draft.nickname, "renamed");
    assert_eq!(picker.chosen(), Some(1));
    assert!(picker.options.items().iter().all(|option| option.id != 2));
  }

  #[test]
  fn empty_snapshot_has_no_selection() {
    let view = CommentView::new(1, String::new(), Vec::new());
    assert!(view.selected.is_none());
    assert!(view.visible_indexes().is_empty());
  }
}
