use super::*;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
struct SessionData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  admin_token: Option<String>,
  #[serde(default)]
  draft: String,
  #[serde(default)]
  nickname: String,
}

/// Client state that survives restarts: the admin token, the unsent post
/// draft, and the last nickname used for a comment.
#[derive(Debug)]
pub(crate) struct Session {
  data: SessionData,
  path: PathBuf,
}

impl Session {
  pub(crate) fn admin_token(&self) -> Option<&str> {
    self.data.admin_token.as_deref()
  }

  pub(crate) fn clear_admin_token(&mut self) -> Result {
    if self.data.admin_token.take().is_some() {
      self.persist()?;
    }

    Ok(())
  }

  pub(crate) fn clear_draft(&mut self) -> Result {
    self.set_draft(String::new())
  }

  pub(crate) fn draft(&self) -> &str {
    &self.data.draft
  }

  fn ensure_parent_dir(path: &Path) -> Result {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    Ok(())
  }

  pub(crate) fn load(path: PathBuf) -> Result<Self> {
    let data = if path.exists() {
      let bytes = fs::read(&path)?;

      if bytes.iter().all(u8::is_ascii_whitespace) {
        SessionData::default()
      } else {
        serde_json::from_slice::<SessionData>(&bytes)?
      }
    } else {
      SessionData::default()
    };

    Ok(Self { data, path })
  }

  pub(crate) fn nickname(&self) -> &str {
    &self.data.nickname
  }

  fn persist(&self) -> Result {
    Self::ensure_parent_dir(&self.path)?;

    let serialized = serde_json::to_vec_pretty(&self.data)?;

    fs::write(&self.path, serialized)?;

    debug!(path = %self.path.display(), "session saved");

    Ok(())
  }

  pub(crate) fn set_admin_token(&mut self, token: String) -> Result {
    self.data.admin_token = Some(token);
    self.persist()
  }

  pub(crate) fn set_draft(&mut self, draft: String) -> Result {
    if self.data.draft == draft {
      return Ok(());
    }

    self.data.draft = draft;
    self.persist()
  }

  pub(crate) fn set_nickname(&mut self, nickname: &str) -> Result {
    let nickname = nickname.trim();

    if self.data.nickname == nickname {
      return Ok(());
    }

    self.data.nickname = nickname.to_string();
    self.persist()
  }
}
