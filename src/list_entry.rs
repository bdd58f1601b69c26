use super::*;

#[derive(Clone, Debug)]
pub(crate) enum Subject {
  Article(Article),
  Picture(PicLink),
  Post(AdminPost),
  Report(PendingReport),
}

/// A row in one of the list tabs, with its display text precomputed.
#[derive(Clone, Debug)]
pub(crate) struct ListEntry {
  pub(crate) body: String,
  pub(crate) detail: String,
  pub(crate) subject: Subject,
  pub(crate) title: String,
}

impl From<AdminPost> for ListEntry {
  fn from(post: AdminPost) -> Self {
    let created = if post.create_time.is_empty() {
      String::new()
    } else {
      format!(" • {}", post.create_time)
    };

    Self {
      body: render_markdown(&post.content, usize::MAX),
      detail: format!("{}{created}", format_votes(post.upvotes, post.downvotes)),
      title: format!("Post #{}", post.id),
      subject: Subject::Post(post),
    }
  }
}

impl From<Article> for ListEntry {
  fn from(article: Article) -> Self {
    Self {
      body: render_markdown(&article.content, usize::MAX),
      detail: format_votes(article.upvotes, article.downvotes),
      title: format!("#{}", article.id),
      subject: Subject::Article(article),
    }
  }
}

impl From<PendingReport> for ListEntry {
  fn from(report: PendingReport) -> Self {
    let title = if report.title.trim().is_empty() {
      format!("Report #{} on post #{}", report.id, report.submission_id)
    } else {
      format!(
        "Report #{} on post #{}: {}",
        report.id,
        report.submission_id,
        report.title.trim()
      )
    };

    let detail = [report.status.as_str(), report.created_at.as_str()]
      .into_iter()
      .filter(|part| !part.is_empty())
      .collect::<Vec<_>>()
      .join(" • ");

    Self {
      body: report.content.clone(),
      detail,
      title,
      subject: Subject::Report(report),
    }
  }
}

impl From<PicLink> for ListEntry {
  fn from(link: PicLink) -> Self {
    let detail = if link.upload_time.is_empty() {
      link.url.clone()
    } else {
      format!("{} • {}", link.upload_time, link.url)
    };

    Self {
      body: String::new(),
      detail,
      title: link.filename.clone(),
      subject: Subject::Picture(link),
    }
  }
}

impl ListEntry {
  pub(crate) fn article(&self) -> Option<&Article> {
    match &self.subject {
      Subject::Article(article) => Some(article),
      _ => None,
    }
  }

  /// Id of the underlying post or report; pictures have none.
  pub(crate) fn id(&self) -> Option<u64> {
    match &self.subject {
      Subject::Article(article) => Some(article.id),
      Subject::Picture(_) => None,
      Subject::Post(post) => Some(post.id),
      Subject::Report(report) => Some(report.id),
    }
  }

  pub(crate) fn picture(&self) -> Option<&PicLink> {
    match &self.subject {
      Subject::Picture(link) => Some(link),
      _ => None,
    }
  }

  /// Id of the post this entry is about, which for a report is the reported
  /// submission.
  pub(crate) fn post_id(&self) -> Option<u64> {
    match &self.subject {
      Subject::Article(article) => Some(article.id),
      Subject::Picture(_) => None,
      Subject::Post(post) => Some(post.id),
      Subject::Report(report) => Some(report.submission_id),
    }
  }

  pub(crate) fn record_vote(&mut self, vote: Vote) {
    if let Subject::Article(article) = &mut self.subject {
      article.record_vote(vote);
      self.detail = format_votes(article.upvotes, article.downvotes);
    }
  }

  pub(crate) fn set_content(&mut self, content: &str) {
    let rendered = render_markdown(content, usize::MAX);

    match &mut self.subject {
      Subject::Article(article) => article.content = content.to_string(),
      Subject::Post(post) => post.content = content.to_string(),
      Subject::Picture(_) | Subject::Report(_) => return,
    }

    self.body = rendered;
  }
}
