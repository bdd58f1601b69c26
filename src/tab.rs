use super::*;

pub(crate) struct Tab {
  pub(crate) category: Category,
  pub(crate) has_more: bool,
  pub(crate) label: &'static str,
  pub(crate) next_page: u64,
  pub(crate) request_id: Option<u64>,
}

impl Tab {
  pub(crate) const FIRST_PAGE: u64 = 1;

  pub(crate) fn is_loading(&self) -> bool {
    self.request_id.is_some()
  }

  pub(crate) fn new(category: Category) -> Self {
    Self {
      category,
      has_more: true,
      label: category.label(),
      next_page: Self::FIRST_PAGE,
      request_id: None,
    }
  }

  pub(crate) fn reset(&mut self) {
    self.has_more = true;
    self.next_page = Self::FIRST_PAGE;
    self.request_id = None;
  }
}
