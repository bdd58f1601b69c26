pub(crate) struct PendingComments {
  pub(crate) post_id: u64,
  pub(crate) request_id: u64,
  pub(crate) title: String,
}
