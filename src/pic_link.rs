use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PicLink {
  pub(crate) filename: String,
  pub(crate) upload_time: String,
  pub(crate) url: String,
}

/// The image list endpoint returns either bare paths or objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPicLink {
  Entry {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    filename: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    upload_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    url: Option<String>,
  },
  Path(String),
}

impl PicLink {
  fn from_path(raw: &str, base_url: &str) -> Self {
    let raw = raw.trim();

    let filename = raw
      .strip_prefix("/img/")
      .unwrap_or_else(|| raw.rsplit('/').next().unwrap_or(raw));

    Self {
      filename: urlencoding::decode(filename)
        .map_or_else(|_| filename.to_string(), Cow::into_owned),
      upload_time: String::new(),
      url: absolute_url(base_url, raw),
    }
  }

  pub(crate) fn parse_list(value: Value, base_url: &str) -> Vec<Self> {
    let Value::Array(items) = value else {
      return Vec::new();
    };

    items
      .into_iter()
      .filter_map(|item| serde_json::from_value::<RawPicLink>(item).ok())
      .map(|raw| match raw {
        RawPicLink::Path(path) => Self::from_path(&path, base_url),
        RawPicLink::Entry {
          filename,
          upload_time,
          url,
        } => {
          let filename = filename.unwrap_or_default();

          let url = url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .or_else(|| {
              (!filename.is_empty())
                .then(|| format!("/img/{}", urlencoding::encode(&filename)))
            })
            .map(|url| absolute_url(base_url, &url))
            .unwrap_or_default();

          Self {
            filename,
            upload_time: upload_time.unwrap_or_default(),
            url,
          }
        }
      })
      .collect()
  }
}
