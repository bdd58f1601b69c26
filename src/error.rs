use super::*;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
  #[error("backend already initialized{}", reason_suffix(.0.as_deref()))]
  AlreadyInitialized(Option<String>),
  #[error("{0} contains banned words")]
  Banned(&'static str),
  #[error("could not access {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("missing {0}")]
  MissingField(&'static str),
  #[error("{operation} was not accepted by the server")]
  NotAccepted { operation: &'static str },
  #[error("not logged in as admin")]
  NotLoggedIn,
  #[error(
    "server responded with {status}{}",
    reason_suffix(.reason.as_deref())
  )]
  Status {
    reason: Option<String>,
    status: StatusCode,
  },
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("admin session expired, log in again")]
  Unauthorized,
}

impl ApiError {
  /// Builds a status error, pulling a human readable reason out of the body.
  pub(crate) async fn from_response(response: Response) -> Self {
    let status = response.status();

    let is_json = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .is_some_and(|value| value.contains("application/json"));

    let body = response.text().await.unwrap_or_default();

    ApiError::Status {
      reason: Self::reason_from_body(&body, is_json),
      status,
    }
  }

  pub(crate) fn is_unauthorized(&self) -> bool {
    matches!(self, ApiError::Unauthorized)
  }

  pub(crate) fn reason_from_body(body: &str, is_json: bool) -> Option<String> {
    let body = body.trim();

    if body.is_empty() {
      return None;
    }

    if !is_json {
      return Some(truncate(body, 200));
    }

    match serde_json::from_str::<Value>(body).ok()? {
      Value::String(reason) => Some(reason),
      Value::Object(map) => {
        let reason = ["message", "reason"]
          .iter()
          .find_map(|key| map.get(*key).and_then(Value::as_str))
          .map(str::to_string);

        reason.or_else(|| Some(Value::Object(map).to_string()))
      }
      other => Some(other.to_string()),
    }
  }
}

fn reason_suffix(reason: Option<&str>) -> String {
  reason.map(|reason| format!(": {reason}")).unwrap_or_default()
}
