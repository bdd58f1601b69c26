use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
  Error,
  Info,
}

/// A status line message that reverts to `original` once it expires.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  original: String,
  tone: Tone,
}

impl Tone {
  pub(crate) fn color(self) -> Color {
    match self {
      Tone::Error => Color::Red,
      Tone::Info => Color::DarkGray,
    }
  }

  fn lifetime(self) -> Duration {
    match self {
      Tone::Error => Duration::from_secs(6),
      Tone::Info => Duration::from_secs(3),
    }
  }
}

impl TransientMessage {
  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn new(current: String, original: String, tone: Tone) -> Self {
    Self {
      current,
      expires_at: Instant::now() + tone.lifetime(),
      original,
      tone,
    }
  }

  pub(crate) fn original(&self) -> &str {
    &self.original
  }

  pub(crate) fn tone(&self) -> Tone {
    self.tone
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn errors_linger_longer_than_info() {
    assert!(Tone::Error.lifetime() > Tone::Info.lifetime());
  }

  #[test]
  fn fresh_messages_are_not_expired() {
    let message =
      TransientMessage::new("saved".into(), "status".into(), Tone::Info);

    assert!(!message.is_expired());
    assert_eq!(message.current(), "saved");
    assert_eq!(message.original(), "status");
    assert_eq!(message.tone(), Tone::Info);
  }
}
