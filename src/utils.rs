use super::*;

/// Resolves a link returned by the API against the configured base URL.
/// Relative links land under the base path, whether or not they start with a
/// slash.
pub(crate) fn absolute_url(base_url: &str, url: &str) -> String {
  let url = url.trim();

  if let Ok(absolute) = Url::parse(url)
    && matches!(absolute.scheme(), "http" | "https")
  {
    return absolute.into();
  }

  let Ok(mut base) = Url::parse(base_url) else {
    return url.to_string();
  };

  if !base.path().ends_with('/') {
    let path = format!("{}/", base.path());
    base.set_path(&path);
  }

  base
    .join(url.trim_start_matches('/'))
    .map_or_else(|_| url.to_string(), String::from)
}

/// Extracts the download name from a `Content-Disposition` header, preferring
/// the RFC 5987 `filename*` form.
pub(crate) fn content_disposition_filename(header: &str) -> Option<String> {
  let mut plain = None;

  for part in header.split(';').map(str::trim) {
    let Some((key, value)) = part.split_once('=') else {
      continue;
    };

    match key.trim().to_ascii_lowercase().as_str() {
      "filename*" => {
        let value = value.trim().trim_matches('"');

        let encoded = value
          .split_once("''")
          .map_or(value, |(_, encoded)| encoded);

        if let Ok(decoded) = urlencoding::decode(encoded)
          && !decoded.is_empty()
        {
          return Some(decoded.into_owned());
        }
      }
      "filename" => {
        let value = value.trim().trim_matches('"');

        if !value.is_empty() {
          plain = Some(
            urlencoding::decode(value)
              .map_or_else(|_| value.to_string(), Cow::into_owned),
          );
        }
      }
      _ => {}
    }
  }

  plain
}

pub(crate) fn deserialize_null_as_zero<'de, D>(
  deserializer: D,
) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn deserialize_optional_string<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

pub(crate) fn format_votes(upvotes: u64, downvotes: u64) -> String {
  format!("▲ {upvotes}  ▼ {downvotes}")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();

  for paragraph in text.lines() {
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
      let word_width = word.chars().count();

      if current.is_empty() {
        current.push_str(word);
        current_width = word_width;
      } else if current_width + 1 + word_width <= width {
        current.push(' ');
        current.push_str(word);
        current_width += 1 + word_width;
      } else {
        lines.push(current);
        current = word.to_string();
        current_width = word_width;
      }
    }

    lines.push(current);
  }

  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
