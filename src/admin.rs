use super::*;

#[derive(Clone)]
pub(crate) struct AdminClient {
  client: Client,
  token: String,
}

#[derive(Debug)]
pub(crate) struct Backup {
  pub(crate) bytes: Vec<u8>,
  pub(crate) filename: String,
}

#[derive(Debug, Deserialize)]
struct AuditBody {
  #[serde(default)]
  status: bool,
}

#[derive(Debug, Deserialize)]
struct PostInfoBody {
  #[serde(default)]
  content: String,
}

impl AdminClient {
  pub(crate) const DEFAULT_BACKUP_NAME: &str = "backup.zip";

  pub(crate) async fn audit_mode(&self) -> Result<bool, ApiError> {
    let response = self.get("/get/need_audit").await?;
    Ok(response.json::<AuditBody>().await?.status)
  }

  pub(crate) async fn backup(&self) -> Result<Backup, ApiError> {
    info!("downloading backup");

    let response = self.get("/get/backup").await?;

    let filename = response
      .headers()
      .get(CONTENT_DISPOSITION)
      .and_then(|value| value.to_str().ok())
      .and_then(content_disposition_filename)
      .unwrap_or_else(|| Self::DEFAULT_BACKUP_NAME.to_string());

    let bytes = response.bytes().await?.to_vec();

    Ok(Backup { bytes, filename })
  }

  pub(crate) async fn decide_report(
    &self,
    id: u64,
    decision: ReportDecision,
  ) -> Result<(), ApiError> {
    self
      .post_json(decision.endpoint(), &json!({ "id": id }))
      .await
      .map(drop)
  }

  pub(crate) async fn delete_comment(&self, id: u64) -> Result<(), ApiError> {
    self
      .post_json("/del_comment", &json!({ "id": id }))
      .await
      .map(drop)
  }

  pub(crate) async fn delete_pic(&self, filename: &str) -> Result<(), ApiError> {
    if filename.trim().is_empty() {
      return Err(ApiError::MissingField("filename"));
    }

    self
      .post_json("/del_pic", &json!({ "filename": filename }))
      .await
      .map(drop)
  }

  async fn get(&self, endpoint: &str) -> Result<Response, ApiError> {
    self.send(self.client.http().get(self.url(endpoint))).await
  }

  pub(crate) async fn moderate(
    &self,
    id: u64,
    action: PostAction,
  ) -> Result<(), ApiError> {
    debug!(id, ?action, "moderating post");

    self
      .post_json(action.endpoint(), &json!({ "id": id }))
      .await
      .map(drop)
  }

  pub(crate) async fn modify_comment(
    &self,
    patch: &CommentPatch,
  ) -> Result<(), ApiError> {
    if patch.content.trim().is_empty() {
      return Err(ApiError::MissingField("comment content"));
    }

    if patch.nickname.trim().is_empty() {
      return Err(ApiError::MissingField("nickname"));
    }

    debug!(
      id = patch.id,
      parent = patch.parent_comment_id,
      "modifying comment"
    );

    self.post_json("/modify_comment", patch).await.map(drop)
  }

  pub(crate) async fn modify_post(
    &self,
    id: u64,
    content: &str,
  ) -> Result<(), ApiError> {
    if content.trim().is_empty() {
      return Err(ApiError::MissingField("post content"));
    }

    self
      .post_json("/modify_post", &json!({ "id": id, "content": content }))
      .await
      .map(drop)
  }

  pub(crate) fn new(client: Client, token: String) -> Self {
    Self { client, token }
  }

  pub(crate) async fn pending_posts(&self) -> Result<Vec<AdminPost>, ApiError> {
    Ok(parse_array(self.get("/get/pending_posts").await?.json::<Value>().await?))
  }

  pub(crate) async fn pending_reports(&self) -> Result<Vec<PendingReport>, ApiError> {
    Ok(parse_array(self.get("/get/pending_reports").await?.json::<Value>().await?))
  }

  pub(crate) async fn pic_links(&self, page: u64) -> Result<Vec<PicLink>, ApiError> {
    let request = self
      .client
      .http()
      .get(self.url("/get/pic_links"))
      .query(&[("page", page)]);

    let value = self.send(request).await?.json::<Value>().await?;

    Ok(PicLink::parse_list(value, self.client.base_url()))
  }

  pub(crate) async fn post_info(&self, id: u64) -> Result<String, ApiError> {
    let request = self
      .client
      .http()
      .get(self.url("/get/post_info"))
      .query(&[("id", id)]);

    Ok(self.send(request).await?.json::<PostInfoBody>().await?.content)
  }

  async fn post_json<T: Serialize + ?Sized>(
    &self,
    endpoint: &str,
    body: &T,
  ) -> Result<Response, ApiError> {
    self
      .send(self.client.http().post(self.url(endpoint)).json(body))
      .await
  }

  pub(crate) async fn recover(&self, path: &Path) -> Result<(), ApiError> {
    let form = multipart_file(path).await?;

    info!(path = %path.display(), "restoring backup");

    self
      .send(self.client.http().post(self.url("/recover")).multipart(form))
      .await
      .map(drop)
  }

  pub(crate) async fn rejected_posts(&self) -> Result<Vec<AdminPost>, ApiError> {
    Ok(parse_array(self.get("/get/reject_posts").await?.json::<Value>().await?))
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.bearer_auth(&self.token).send().await?;

    match response.status() {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        warn!(status = %response.status(), "admin token rejected");
        Err(ApiError::Unauthorized)
      }
      status if status.is_success() => Ok(response),
      _ => Err(ApiError::from_response(response).await),
    }
  }

  pub(crate) async fn set_audit_mode(&self, need_audit: bool) -> Result<(), ApiError> {
    self
      .post_json("/need_audit", &json!({ "need_audit": need_audit }))
      .await
      .map(drop)
  }

  pub(crate) fn token(&self) -> &str {
    &self.token
  }

  fn url(&self, endpoint: &str) -> String {
    self.client.url(&format!("/admin{endpoint}"))
  }

  /// Checks a token against the admin test endpoint. A rejected token is
  /// `Ok(false)`; anything else unexpected is an error.
  pub(crate) async fn verify(client: &Client, token: &str) -> Result<bool, ApiError> {
    if token.trim().is_empty() {
      return Err(ApiError::MissingField("admin token"));
    }

    let admin = Self::new(client.clone(), token.trim().to_string());

    match admin.get("/test").await {
      Ok(_) => Ok(true),
      Err(ApiError::Unauthorized) => Ok(false),
      Err(error) => Err(error),
    }
  }
}

fn parse_array<T: DeserializeOwned>(value: Value) -> Vec<T> {
  let Value::Array(items) = value else {
    return Vec::new();
  };

  items
    .into_iter()
    .filter_map(|item| serde_json::from_value(item).ok())
    .collect()
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    wiremock::{
      Mock, MockServer, ResponseTemplate,
      matchers::{body_json, header, method, path, query_param},
    },
  };

  const TOKEN: &str = "secret";

  async fn admin(server: &MockServer) -> AdminClient {
    AdminClient::new(Client::new(&server.uri()), TOKEN.to_string())
  }

  #[tokio::test]
  async fn requests_carry_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/need_audit"))
      .and(header("authorization", "Bearer secret"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
      .mount(&server)
      .await;

    assert!(admin(&server).await.audit_mode().await.unwrap());
  }

  #[tokio::test]
  async fn rejected_token_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/admin/approve"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&server)
      .await;

    let error = admin(&server)
      .await
      .moderate(3, PostAction::Approve)
      .await
      .unwrap_err();

    assert!(error.is_unauthorized());
  }

  #[tokio::test]
  async fn verify_distinguishes_bad_tokens_from_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/test"))
      .and(header("authorization", "Bearer good"))
      .respond_with(ResponseTemplate::new(200))
      .mount(&server)
      .await;

    Mock::given(method("GET"))
      .and(path("/admin/test"))
      .and(header("authorization", "Bearer bad"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&server)
      .await;

    let client = Client::new(&server.uri());

    assert!(AdminClient::verify(&client, "good").await.unwrap());
    assert!(!AdminClient::verify(&client, "bad").await.unwrap());
    assert!(matches!(
      AdminClient::verify(&client, "  ").await,
      Err(ApiError::MissingField(_))
    ));
  }

  #[tokio::test]
  async fn backup_uses_content_disposition_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/backup"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header(
            "content-disposition",
            "attachment; filename=\"backup_20251012.zip\"",
          )
          .set_body_bytes(b"PK\x03\x04".to_vec()),
      )
      .mount(&server)
      .await;

    let backup = admin(&server).await.backup().await.unwrap();

    assert_eq!(backup.filename, "backup_20251012.zip");
    assert_eq!(backup.bytes, b"PK\x03\x04".to_vec());
  }

  #[tokio::test]
  async fn backup_defaults_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/backup"))
      .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
      .mount(&server)
      .await;

    assert_eq!(admin(&server).await.backup().await.unwrap().filename, "backup.zip");
  }

  #[tokio::test]
  async fn modify_comment_sends_full_patch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/admin/modify_comment"))
      .and(body_json(json!({
        "content": "edited",
        "id": 7,
        "nickname": "mod",
        "parent_comment_id": 0,
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
      .expect(1)
      .mount(&server)
      .await;

    admin(&server)
      .await
      .modify_comment(&CommentPatch {
        content: "edited".into(),
        id: 7,
        nickname: "mod".into(),
        parent_comment_id: 0,
      })
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn modify_comment_validates_before_sending() {
    let server = MockServer::start().await;

    let admin = admin(&server).await;

    let patch = CommentPatch {
      content: "text".into(),
      id: 1,
      nickname: " ".into(),
      parent_comment_id: 0,
    };

    assert!(matches!(
      admin.modify_comment(&patch).await,
      Err(ApiError::MissingField("nickname"))
    ));

    assert!(matches!(
      admin.delete_pic("").await,
      Err(ApiError::MissingField("filename"))
    ));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
  }

  #[tokio::test]
  async fn listings_skip_malformed_items_and_tolerate_objects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/pending_posts"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        {"id": 1, "content": "a", "create_time": "2025-10-12"},
        {"content": "no id"}
      ])))
      .mount(&server)
      .await;

    Mock::given(method("GET"))
      .and(path("/admin/get/pending_reports"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
      .mount(&server)
      .await;

    let admin = admin(&server).await;

    let posts = admin.pending_posts().await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].create_time, "2025-10-12");
    assert!(admin.pending_reports().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn pic_links_are_absolutised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/pic_links"))
      .and(query_param("page", "1"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!(["/img/251012_a.png"])),
      )
      .mount(&server)
      .await;

    let links = admin(&server).await.pic_links(1).await.unwrap();

    assert_eq!(links[0].filename, "251012_a.png");
    assert_eq!(links[0].url, format!("{}/img/251012_a.png", server.uri()));
  }

  #[tokio::test]
  async fn post_info_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/post_info"))
      .and(query_param("id", "12"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({"id": 12, "content": "body"})),
      )
      .mount(&server)
      .await;

    assert_eq!(admin(&server).await.post_info(12).await.unwrap(), "body");
  }

  #[tokio::test]
  async fn server_errors_keep_their_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/admin/del_comment"))
      .respond_with(
        ResponseTemplate::new(404)
          .set_body_json(json!({"status": "Fail", "reason": "no comment"})),
      )
      .mount(&server)
      .await;

    let error = admin(&server).await.delete_comment(9).await.unwrap_err();

    assert_eq!(
      error.to_string(),
      "server responded with 404 Not Found: no comment"
    );
  }
}
