use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct InitBody {
  #[serde(default)]
  reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StateBody {
  #[serde(default)]
  status: String,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
  #[serde(default)]
  status: String,
  #[serde(default)]
  url: Option<String>,
}

impl Client {
  pub(crate) fn base_url(&self) -> &str {
    &self.base_url
  }

  pub(crate) async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
      Ok(response)
    } else {
      Err(ApiError::from_response(response).await)
    }
  }

  pub(crate) async fn fetch_articles(
    &self,
    page: u64,
  ) -> Result<Vec<Article>, ApiError> {
    debug!(page, "fetching articles");

    let response = self
      .client
      .get(self.url("/get/10_info"))
      .query(&[("page", page)])
      .send()
      .await?;

    Ok(Self::check(response).await?.json::<Vec<Article>>().await?)
  }

  pub(crate) async fn fetch_comments(
    &self,
    post_id: u64,
  ) -> Result<Vec<Comment>, ApiError> {
    debug!(post_id, "fetching comments");

    let response = self
      .client
      .get(self.url("/get/comment"))
      .query(&[("id", post_id)])
      .send()
      .await?;

    Ok(Self::check(response).await?.json::<Vec<Comment>>().await?)
  }

  pub(crate) fn http(&self) -> &reqwest::Client {
    &self.client
  }

  pub(crate) async fn init_backend(
    &self,
    payload: &InitPayload,
  ) -> Result<(), ApiError> {
    info!("initializing backend");

    let response = self
      .client
      .post(self.url("/init"))
      .json(payload)
      .send()
      .await?;

    match response.status() {
      StatusCode::FORBIDDEN => {
        let body = response.json::<InitBody>().await.unwrap_or_default();
        Err(ApiError::AlreadyInitialized(body.reason))
      }
      status if status.is_success() => Ok(()),
      _ => Err(ApiError::from_response(response).await),
    }
  }

  pub(crate) fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client: reqwest::Client::new(),
    }
  }

  pub(crate) async fn post_comment(
    &self,
    comment: &NewComment,
  ) -> Result<CommentReceipt, ApiError> {
    debug!(
      post_id = comment.submission_id,
      parent = comment.parent_comment_id,
      "posting comment"
    );

    let response = self
      .client
      .post(self.url("/comment"))
      .json(comment)
      .send()
      .await?;

    if response.status() == StatusCode::FORBIDDEN {
      return Err(ApiError::Banned("comment"));
    }

    Ok(Self::check(response).await?.json::<CommentReceipt>().await?)
  }

  pub(crate) async fn post_state(&self, id: u64) -> Result<ReviewState, ApiError> {
    self.review_state("/get/post_state", id).await
  }

  pub(crate) async fn report_post(
    &self,
    report: &NewReport,
  ) -> Result<ReportReceipt, ApiError> {
    debug!(post_id = report.id, "reporting post");

    let response = self
      .client
      .post(self.url("/report"))
      .json(report)
      .send()
      .await?;

    Ok(Self::check(response).await?.json::<ReportReceipt>().await?)
  }

  pub(crate) async fn report_state(
    &self,
    id: u64,
  ) -> Result<ReviewState, ApiError> {
    self.review_state("/get/report_state", id).await
  }

  async fn review_state(
    &self,
    endpoint: &str,
    id: u64,
  ) -> Result<ReviewState, ApiError> {
    let response = self
      .client
      .get(self.url(endpoint))
      .query(&[("id", id)])
      .send()
      .await?;

    let body = Self::check(response).await?.json::<StateBody>().await?;

    Ok(ReviewState::from(body.status))
  }

  pub(crate) async fn statics(&self) -> Result<Option<Statics>, ApiError> {
    let response = self.client.get(self.url("/get/statics")).send().await?;

    if !response.status().is_success() {
      return Ok(None);
    }

    Ok(Some(response.json::<Statics>().await?))
  }

  pub(crate) async fn status(&self) -> ApiStatus {
    match self.client.get(self.url("/test")).send().await {
      Ok(response) => ApiStatus::from_status(response.status()),
      Err(error) => {
        warn!(%error, "status check failed");
        ApiStatus::Offline
      }
    }
  }

  pub(crate) async fn submit_post(
    &self,
    content: &str,
  ) -> Result<SubmitOutcome, ApiError> {
    if content.trim().is_empty() {
      return Err(ApiError::MissingField("post content"));
    }

    debug!(len = content.len(), "submitting post");

    let response = self
      .client
      .post(self.url("/post"))
      .json(&json!({ "content": content }))
      .send()
      .await?;

    if response.status() == StatusCode::FORBIDDEN {
      return Ok(SubmitOutcome::banned());
    }

    Ok(Self::check(response).await?.json::<SubmitOutcome>().await?)
  }

  pub(crate) async fn upload_image(&self, path: &Path) -> Result<String, ApiError> {
    let form = multipart_file(path).await?;

    debug!(path = %path.display(), "uploading image");

    let response = self
      .client
      .post(self.url("/upload_pic"))
      .multipart(form)
      .send()
      .await?;

    let body = Self::check(response).await?.json::<UploadBody>().await?;

    match body.url {
      Some(url) if body.status == "OK" => Ok(absolute_url(&self.base_url, &url)),
      _ => Err(ApiError::NotAccepted {
        operation: "image upload",
      }),
    }
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url)
  }

  pub(crate) async fn vote(&self, id: u64, vote: Vote) -> Result<(), ApiError> {
    debug!(id, ?vote, "voting");

    let response = self
      .client
      .post(self.url(&format!("/{}", vote.endpoint())))
      .json(&json!({ "id": id }))
      .send()
      .await?;

    let body = Self::check(response).await?.json::<StateBody>().await?;

    if body.status == "OK" {
      Ok(())
    } else {
      Err(ApiError::NotAccepted { operation: "vote" })
    }
  }
}

/// Reads `path` into a form with a single `file` part.
pub(crate) async fn multipart_file(path: &Path) -> Result<Form, ApiError> {
  let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  let filename = path
    .file_name()
    .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());

  Ok(Form::new().part("file", Part::bytes(bytes).file_name(filename)))
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    wiremock::{
      Mock, MockServer, ResponseTemplate,
      matchers::{body_json, method, path, query_param},
    },
  };

  #[tokio::test]
  async fn fetch_articles_requests_the_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/get/10_info"))
      .and(query_param("page", "2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"id": 4, "content": "# hi", "upvotes": 3, "downvotes": 1}
      ])))
      .mount(&server)
      .await;

    let articles = Client::new(&server.uri()).fetch_articles(2).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 4);
    assert_eq!(articles[0].upvotes, 3);
  }

  #[tokio::test]
  async fn fetch_comments_surfaces_status_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/get/comment"))
      .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
      .mount(&server)
      .await;

    let error = Client::new(&server.uri())
      .fetch_comments(1)
      .await
      .unwrap_err();

    match error {
      ApiError::Status { status, reason } => {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reason.as_deref(), Some("boom"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[tokio::test]
  async fn fetch_comments_parses_flat_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/get/comment"))
      .and(query_param("id", "8"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"id": 1, "nickname": "a", "content": "x", "parent_comment_id": 0},
        {"id": 2, "nickname": "b", "content": "y", "parent_comment_id": 1}
      ])))
      .mount(&server)
      .await;

    let comments = Client::new(&server.uri()).fetch_comments(8).await.unwrap();

    assert_eq!(comments[1].parent_comment_id, 1);
  }

  #[tokio::test]
  async fn vote_requires_ok_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/up"))
      .and(body_json(json!({"id": 3})))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
      .mount(&server)
      .await;

    Mock::given(method("POST"))
      .and(path("/down"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({"status": "Fail"})),
      )
      .mount(&server)
      .await;

    let client = Client::new(&server.uri());

    client.vote(3, Vote::Up).await.unwrap();

    assert!(matches!(
      client.vote(3, Vote::Down).await,
      Err(ApiError::NotAccepted { operation: "vote" })
    ));
  }

  #[tokio::test]
  async fn submit_post_maps_forbidden_to_denied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/post"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&server)
      .await;

    let outcome = Client::new(&server.uri())
      .submit_post("spam")
      .await
      .unwrap();

    assert_eq!(outcome.status, SubmitStatus::Deny);
  }

  #[tokio::test]
  async fn submit_post_rejects_blank_content_locally() {
    let client = Client::new("http://127.0.0.1:9");

    assert!(matches!(
      client.submit_post("   ").await,
      Err(ApiError::MissingField(_))
    ));
  }

  #[tokio::test]
  async fn post_comment_maps_forbidden_to_banned() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/comment"))
      .and(body_json(json!({
        "content": "hello",
        "nickname": "ada",
        "parent_comment_id": 0,
        "submission_id": 5,
      })))
      .respond_with(ResponseTemplate::new(403))
      .mount(&server)
      .await;

    let error = Client::new(&server.uri())
      .post_comment(&NewComment {
        content: "hello".into(),
        nickname: "ada".into(),
        parent_comment_id: 0,
        submission_id: 5,
      })
      .await
      .unwrap_err();

    assert!(matches!(error, ApiError::Banned("comment")));
  }

  #[tokio::test]
  async fn status_maps_service_unavailable_to_uninitialized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/test"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&server)
      .await;

    assert_eq!(
      Client::new(&server.uri()).status().await,
      ApiStatus::Uninitialized
    );
  }

  #[tokio::test]
  async fn init_backend_reports_already_initialized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/init"))
      .respond_with(ResponseTemplate::new(403).set_body_json(
        json!({"status": "Fail", "reason": "already done"}),
      ))
      .mount(&server)
      .await;

    let error = Client::new(&server.uri())
      .init_backend(&InitPayload::default())
      .await
      .unwrap_err();

    assert_eq!(error.to_string(), "backend already initialized: already done");
  }

  #[tokio::test]
  async fn post_state_parses_review_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/get/post_state"))
      .and(query_param("id", "9"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({"status": "Rejected"})),
      )
      .mount(&server)
      .await;

    assert_eq!(
      Client::new(&server.uri()).post_state(9).await.unwrap(),
      ReviewState::Rejected
    );
  }

  #[tokio::test]
  async fn upload_image_returns_absolute_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/upload_pic"))
      .respond_with(ResponseTemplate::new(200).set_body_json(
        json!({"status": "OK", "url": "/img/251012_cat.png"}),
      ))
      .mount(&server)
      .await;

    let file = env::temp_dir().join(format!(
      "whisper_upload_test_{}.png",
      std::process::id()
    ));

    fs::write(&file, b"not really a png").unwrap();

    let url = Client::new(&server.uri())
      .upload_image(&file)
      .await
      .unwrap();

    let _ = fs::remove_file(&file);

    assert_eq!(url, format!("{}/img/251012_cat.png", server.uri()));
  }

  #[tokio::test]
  async fn upload_image_reports_missing_file() {
    let error = Client::new("http://127.0.0.1:9")
      .upload_image(Path::new("/definitely/not/here.png"))
      .await
      .unwrap_err();

    assert!(matches!(error, ApiError::Io { .. }));
  }
}
