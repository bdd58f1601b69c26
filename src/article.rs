use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Article {
  #[serde(default)]
  pub(crate) content: String,
  #[serde(default)]
  pub(crate) downvotes: u64,
  pub(crate) id: u64,
  #[serde(default)]
  pub(crate) upvotes: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Vote {
  Down,
  Up,
}

impl Article {
  pub(crate) fn record_vote(&mut self, vote: Vote) {
    match vote {
      Vote::Down => self.downvotes = self.downvotes.saturating_add(1),
      Vote::Up => self.upvotes = self.upvotes.saturating_add(1),
    }
  }
}

impl Vote {
  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      Vote::Down => "down",
      Vote::Up => "up",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn record_vote_increments_matching_counter() {
    let mut article = Article {
      content: String::new(),
      downvotes: 1,
      id: 1,
      upvotes: 4,
    };

    article.record_vote(Vote::Up);
    article.record_vote(Vote::Down);

    assert_eq!((article.upvotes, article.downvotes), (5, 2));
  }
}
