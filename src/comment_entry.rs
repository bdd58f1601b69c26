use super::*;

pub(crate) struct CommentEntry {
  pub(crate) children: Vec<usize>,
  pub(crate) content: String,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) id: u64,
  pub(crate) nickname: String,
  pub(crate) parent: Option<usize>,
  pub(crate) parent_comment_id: u64,
}

impl CommentEntry {
  pub(crate) fn admin_header(&self) -> String {
    let placement = if self.parent_comment_id == Comment::ROOT {
      "· top-level".to_string()
    } else {
      format!("↪ reply to #{}", self.parent_comment_id)
    };

    format!("{}  #{} {placement}", self.header(), self.id)
  }

  pub(crate) fn body(&self) -> &str {
    self.content.as_str()
  }

  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self) -> String {
    let nickname = self.nickname.trim();

    if nickname.is_empty() {
      "anonymous".to_string()
    } else {
      nickname.to_string()
    }
  }

  pub(crate) fn snippet(&self) -> String {
    let mut snippet = String::new();
    let mut char_count: usize = 0;

    for word in self.body().split_whitespace() {
      if !snippet.is_empty() {
        snippet.push(' ');
        char_count = char_count.saturating_add(1);
      }

      snippet.push_str(word);
      char_count = char_count.saturating_add(word.chars().count());

      if char_count >= 40 {
        break;
      }
    }

    truncate(snippet.trim(), 40)
  }
}
