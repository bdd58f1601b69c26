use super::*;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
  #[error(
    "invalid api_base_url `{0}`: expected an http:// or https:// url"
  )]
  InvalidBaseUrl(String),
  #[error("status_refresh_secs must be greater than zero")]
  InvalidRefreshInterval,
  #[error("could not parse config file {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("could not read config file {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  api_base_url: Option<String>,
  log_file: Option<PathBuf>,
  session_file: Option<PathBuf>,
  site_title: Option<String>,
  status_refresh_secs: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
  pub(crate) api_base_url: String,
  pub(crate) log_file: PathBuf,
  pub(crate) session_file: PathBuf,
  pub(crate) site_title: String,
  pub(crate) status_refresh: Duration,
}

impl Config {
  const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
  const DEFAULT_SITE_TITLE: &str = "Sycamore_Whisper";
  const DEFAULT_STATUS_REFRESH_SECS: u64 = 30;

  fn base_dir(
    var: &impl Fn(&str) -> Option<String>,
    xdg: &str,
    fallback: &str,
  ) -> PathBuf {
    let base = if let Some(dir) = var(xdg) {
      PathBuf::from(dir)
    } else if let Some(home) = var("HOME") {
      PathBuf::from(home).join(fallback)
    } else {
      env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(fallback)
    };

    base.join("whisper")
  }

  fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let config_dir = Self::base_dir(&var, "XDG_CONFIG_HOME", ".config");

    let file = match var("WHISPER_CONFIG") {
      Some(path) => Self::read_file(PathBuf::from(path))?,
      None => {
        let path = config_dir.join("config.toml");

        if path.exists() {
          Self::read_file(path)?
        } else {
          ConfigFile::default()
        }
      }
    };

    let api_base_url = var("WHISPER_API_URL")
      .or(file.api_base_url)
      .unwrap_or_else(|| Self::DEFAULT_API_BASE_URL.to_string());

    let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();

    let lower = api_base_url.to_ascii_lowercase();

    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
      return Err(ConfigError::InvalidBaseUrl(api_base_url));
    }

    let status_refresh_secs = file
      .status_refresh_secs
      .unwrap_or(Self::DEFAULT_STATUS_REFRESH_SECS);

    if status_refresh_secs == 0 {
      return Err(ConfigError::InvalidRefreshInterval);
    }

    let session_file = var("WHISPER_SESSION_FILE")
      .map(PathBuf::from)
      .or(file.session_file)
      .unwrap_or_else(|| config_dir.join("session.json"));

    let log_file = var("WHISPER_LOG_FILE")
      .map(PathBuf::from)
      .or(file.log_file)
      .unwrap_or_else(|| {
        Self::base_dir(&var, "XDG_STATE_HOME", ".local/state").join("whisper.log")
      });

    Ok(Self {
      api_base_url,
      log_file,
      session_file,
      site_title: file
        .site_title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| Self::DEFAULT_SITE_TITLE.to_string()),
      status_refresh: Duration::from_secs(status_refresh_secs),
    })
  }

  pub(crate) fn load() -> Result<Self, ConfigError> {
    Self::from_vars(|key| env::var(key).ok())
  }

  fn read_file(path: PathBuf) -> Result<ConfigFile, ConfigError> {
    let contents = match fs::read_to_string(&path) {
      Ok(contents) => contents,
      Err(source) => return Err(ConfigError::Read { path, source }),
    };

    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
  }
}
