use super::*;

/// Renders Markdown post bodies to plain terminal text by going through HTML.
/// Falls back to the raw text when either step fails.
pub(crate) fn render_markdown(text: &str, width: usize) -> String {
  let Ok(html) =
    ::markdown::to_html_with_options(text, &::markdown::Options::gfm())
  else {
    debug!("markdown rendering failed, showing raw text");
    return text.trim_end().to_string();
  };

  match html2text::from_read(html.as_bytes(), width.max(1)) {
    Ok(rendered) => rendered.trim_end().to_string(),
    Err(error) => {
      debug!(%error, "html to text conversion failed");
      text.trim_end().to_string()
    }
  }
}
