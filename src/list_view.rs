/// A selectable list backing both the feed tabs and the parent picker.
pub(crate) struct ListView<T> {
  cursor: usize,
  items: Vec<T>,
  offset: usize,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl<T> ListView<T> {
  /// Appends a freshly loaded page and moves to `target` if a selection was
  /// waiting for it, falling back to the last item when the page came up
  /// short.
  pub(crate) fn append_page(&mut self, page: Vec<T>, target: Option<usize>) {
    self.items.extend(page);

    if let Some(target) = target
      && !self.items.is_empty()
    {
      self.select(target);
    }
  }

  pub(crate) fn cursor(&self) -> usize {
    self.cursor
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  fn last_index(&self) -> usize {
    self.items.len().saturating_sub(1)
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn new(items: Vec<T>) -> Self {
    Self {
      cursor: 0,
      items,
      offset: 0,
    }
  }

  pub(crate) fn offset(&self) -> usize {
    self.offset.min(self.selected_index().unwrap_or(0))
  }

  /// Drops matching items. The cursor stays on the same row, or on the new
  /// last row if the list got shorter than that.
  pub(crate) fn remove_where<F>(&mut self, predicate: F) -> usize
  where
    F: Fn(&T) -> bool,
  {
    let before = self.items.len();

    self.items.retain(|item| !predicate(item));

    self.select(self.cursor);
    self.set_offset(self.offset);

    before.saturating_sub(self.items.len())
  }

  pub(crate) fn select(&mut self, index: usize) {
    self.cursor = index.min(self.last_index());
  }

  pub(crate) fn select_next(&mut self) {
    self.select(self.cursor.saturating_add(1));
  }

  pub(crate) fn select_previous(&mut self) {
    self.select(self.cursor.saturating_sub(1));
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    (!self.items.is_empty()).then(|| self.cursor.min(self.last_index()))
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self.selected_index().and_then(|index| self.items.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = offset.min(self.last_index());
  }

  /// Applies `update` to every item matching `predicate`, returning how many
  /// were touched.
  pub(crate) fn update_where<P, U>(
    &mut self,
    predicate: P,
    mut update: U,
  ) -> usize
  where
    P: Fn(&T) -> bool,
    U: FnMut(&mut T),
  {
    let mut touched = 0usize;

    for item in self.items.iter_mut().filter(|item| predicate(item)) {
      update(item);
      touched = touched.saturating_add(1);
    }

    touched
  }
}
