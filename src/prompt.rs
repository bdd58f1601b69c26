use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Confirmation {
  DeleteComment { id: u64, replies: usize },
  DeletePicture { filename: String },
  DeletePost { category: Category, id: u64 },
  Restore { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InitStep {
  AdminToken,
  AllowedExtensions,
  BannedKeywords,
  MaxFileSize,
  UploadFolder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PromptKind {
  AdminLogin,
  BackupDir,
  CommentContent { draft: CommentPatch },
  CommentNickname { draft: CommentPatch },
  Confirm(Confirmation),
  ImagePath,
  Init { payload: InitPayload, step: InitStep },
  ModifyPost { id: u64 },
  NewPost,
  PostState,
  ReplyContent { nickname: String, parent: u64 },
  ReplyNickname { parent: u64 },
  ReportContent { id: u64, title: String },
  ReportState,
  ReportTitle { id: u64 },
  RestorePath,
}

/// Text input shown in the status line, or in a popup for longer text.
pub(crate) struct Prompt {
  pub(crate) buffer: String,
  pub(crate) kind: PromptKind,
  pub(crate) message_backup: String,
}

impl Confirmation {
  pub(crate) fn question(&self) -> String {
    match self {
      Confirmation::DeleteComment { id, replies: 0 } => {
        format!("Delete comment #{id}?")
      }
      Confirmation::DeleteComment { id, replies } => {
        format!("Delete comment #{id}? Its {replies} replies will be hidden.")
      }
      Confirmation::DeletePicture { filename } => {
        format!("Delete image {}?", truncate(filename, 40))
      }
      Confirmation::DeletePost { id, .. } => format!("Delete post #{id}?"),
      Confirmation::Restore { path } => format!(
        "Restore backup from {}? This replaces all server data.",
        truncate(&path.display().to_string(), 40)
      ),
    }
  }
}

impl InitStep {
  pub(crate) fn default_value(self) -> &'static str {
    match self {
      InitStep::AdminToken | InitStep::BannedKeywords => "",
      InitStep::AllowedExtensions => "png,jpg,jpeg,gif,webp",
      InitStep::MaxFileSize => "10",
      InitStep::UploadFolder => "img",
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      InitStep::AdminToken => "Admin token",
      InitStep::AllowedExtensions => "Allowed image extensions",
      InitStep::BannedKeywords => "Banned keywords (optional)",
      InitStep::MaxFileSize => "Max upload size in MB",
      InitStep::UploadFolder => "Upload folder",
    }
  }

  pub(crate) fn next(self) -> Option<Self> {
    match self {
      InitStep::AdminToken => Some(InitStep::UploadFolder),
      InitStep::UploadFolder => Some(InitStep::AllowedExtensions),
      InitStep::AllowedExtensions => Some(InitStep::MaxFileSize),
      InitStep::MaxFileSize => Some(InitStep::BannedKeywords),
      InitStep::BannedKeywords => None,
    }
  }
}

impl Prompt {
  pub(crate) fn backspace(&mut self) {
    self.buffer.pop();
  }

  pub(crate) fn display(&self) -> String {
    match &self.kind {
      PromptKind::Confirm(confirmation) => {
        format!("{} [y/N]", confirmation.question())
      }
      _ => format!("{}: {}", self.label(), self.buffer),
    }
  }

  pub(crate) fn insert(&mut self, ch: char) {
    self.buffer.push(ch);
  }

  pub(crate) fn is_confirmation(&self) -> bool {
    matches!(self.kind, PromptKind::Confirm(_))
  }

  pub(crate) fn is_multiline(&self) -> bool {
    matches!(
      self.kind,
      PromptKind::CommentContent { .. }
        | PromptKind::ModifyPost { .. }
        | PromptKind::NewPost
        | PromptKind::ReplyContent { .. }
        | PromptKind::ReportContent { .. }
    )
  }

  pub(crate) fn label(&self) -> String {
    match &self.kind {
      PromptKind::AdminLogin => "Admin token".into(),
      PromptKind::BackupDir => "Save backup to directory".into(),
      PromptKind::CommentContent { draft } => {
        format!("Content of comment #{}", draft.id)
      }
      PromptKind::CommentNickname { draft } => {
        format!("Nickname of comment #{}", draft.id)
      }
      PromptKind::Confirm(confirmation) => confirmation.question(),
      PromptKind::ImagePath => "Image file to upload".into(),
      PromptKind::Init { step, .. } => step.label().into(),
      PromptKind::ModifyPost { id } => format!("Edit post #{id}"),
      PromptKind::NewPost => "New post (Markdown)".into(),
      PromptKind::PostState => "Look up state of post #".into(),
      PromptKind::ReplyContent { parent, nickname } => {
        if *parent == Comment::ROOT {
          format!("Comment as {nickname}")
        } else {
          format!("Reply to #{parent} as {nickname}")
        }
      }
      PromptKind::ReplyNickname { .. } => "Nickname".into(),
      PromptKind::ReportContent { id, .. } => format!("Why report post #{id}?"),
      PromptKind::ReportState => "Look up state of report #".into(),
      PromptKind::ReportTitle { id } => format!("Report title for post #{id}"),
      PromptKind::RestorePath => "Restore backup from file".into(),
    }
  }

  pub(crate) fn new(
    kind: PromptKind,
    buffer: String,
    message_backup: String,
  ) -> Self {
    Self {
      buffer,
      kind,
      message_backup,
    }
  }

  pub(crate) fn newline(&mut self) {
    if self.is_multiline() {
      self.buffer.push('\n');
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_reflects_current_buffer() {
    let mut prompt =
      Prompt::new(PromptKind::AdminLogin, String::new(), "status".into());

    assert_eq!(prompt.display(), "Admin token: ");

    prompt.insert('x');
    prompt.insert('y');
    prompt.backspace();

    assert_eq!(prompt.display(), "Admin token: x");
  }

  #[test]
  fn newline_only_applies_to_multiline_prompts() {
    let mut single =
      Prompt::new(PromptKind::ImagePath, "a".into(), String::new());
    single.newline();
    assert_eq!(single.buffer, "a");

    let mut multi = Prompt::new(PromptKind::NewPost, "a".into(), String::new());
    multi.newline();
    assert_eq!(multi.buffer, "a\n");
  }

  #[test]
  fn confirmations_ask_a_question() {
    let prompt = Prompt::new(
      PromptKind::Confirm(Confirmation::DeleteComment { id: 4, replies: 0 }),
      String::new(),
      String::new(),
    );

    assert!(prompt.is_confirmation());
    assert_eq!(prompt.display(), "Delete comment #4? [y/N]");

    let with_replies =
      Confirmation::DeleteComment { id: 4, replies: 2 }.question();

    assert_eq!(with_replies, "Delete comment #4? Its 2 replies will be hidden.");
  }

  #[test]
  fn init_steps_visit_every_field_once() {
    let mut step = Some(InitStep::AdminToken);
    let mut seen = Vec::new();

    while let Some(current) = step {
      seen.push(current);
      step = current.next();
    }

    assert_eq!(seen.len(), 5);
    assert_eq!(seen.last(), Some(&InitStep::BannedKeywords));
  }

  #[test]
  fn reply_label_distinguishes_top_level_comments() {
    let top = Prompt::new(
      PromptKind::ReplyContent {
        nickname: "ada".into(),
        parent: Comment::ROOT,
      },
      String::new(),
      String::new(),
    );

    let reply = Prompt::new(
      PromptKind::ReplyContent {
        nickname: "ada".into(),
        parent: 5,
      },
      String::new(),
      String::new(),
    );

    assert_eq!(top.label(), "Comment as ada");
    assert_eq!(reply.label(), "Reply to #5 as ada");
  }
}
