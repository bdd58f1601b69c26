#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Category {
  Images,
  Pending,
  Posts,
  Rejected,
  Reports,
}

impl Category {
  pub(crate) fn admin() -> &'static [Category] {
    &[
      Category::Pending,
      Category::Rejected,
      Category::Reports,
      Category::Images,
    ]
  }

  pub(crate) fn empty_text(self) -> &'static str {
    match self {
      Category::Images => "No uploaded images.",
      Category::Pending => "Nothing waiting for review.",
      Category::Posts => "No posts yet. Press p to write one.",
      Category::Rejected => "No rejected posts.",
      Category::Reports => "No open reports.",
    }
  }

  pub(crate) fn is_admin(self) -> bool {
    !matches!(self, Category::Posts)
  }

  /// Whether the listing is fetched page by page until an empty page.
  pub(crate) fn is_paged(self) -> bool {
    matches!(self, Category::Images | Category::Posts)
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Category::Images => "images",
      Category::Pending => "pending",
      Category::Posts => "posts",
      Category::Rejected => "rejected",
      Category::Reports => "reports",
    }
  }
}
