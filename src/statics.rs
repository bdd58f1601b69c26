use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiStatus {
  Offline,
  Online,
  Uninitialized,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct Statics {
  #[serde(default)]
  pub(crate) comments: u64,
  #[serde(default)]
  pub(crate) images: u64,
  #[serde(default)]
  pub(crate) posts: u64,
}

impl ApiStatus {
  pub(crate) fn from_status(status: StatusCode) -> Self {
    match status {
      StatusCode::OK => ApiStatus::Online,
      StatusCode::SERVICE_UNAVAILABLE => ApiStatus::Uninitialized,
      _ => ApiStatus::Offline,
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      ApiStatus::Offline => "offline",
      ApiStatus::Online => "online",
      ApiStatus::Uninitialized => "not initialized",
    }
  }
}

impl Statics {
  pub(crate) fn summary(self) -> String {
    format!(
      "{} posts • {} comments • {} images",
      self.posts, self.comments, self.images
    )
  }
}
