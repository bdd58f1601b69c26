use super::*;

/// First-run configuration sent to an uninitialized backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct InitPayload {
  #[serde(rename = "ADMIN_TOKEN")]
  pub(crate) admin_token: String,
  #[serde(rename = "ALLOWED_EXTENSIONS")]
  pub(crate) allowed_extensions: Vec<String>,
  #[serde(rename = "BANNED_KEYWORDS", skip_serializing_if = "Option::is_none")]
  pub(crate) banned_keywords: Option<Vec<String>>,
  #[serde(rename = "MAX_FILE_SIZE")]
  pub(crate) max_file_size: u64,
  #[serde(rename = "UPLOAD_FOLDER")]
  pub(crate) upload_folder: String,
}

impl InitPayload {
  pub(crate) fn parse_list(input: &str) -> Vec<String> {
    input
      .split([',', ' '])
      .map(str::trim)
      .filter(|item| !item.is_empty())
      .map(str::to_string)
      .collect()
  }
}
