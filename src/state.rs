use super::*;

pub(crate) struct State {
  active_tab: usize,
  api_status: Option<ApiStatus>,
  help: HelpView,
  list_height: usize,
  message: String,
  mode: Mode,
  next_request_id: u64,
  pending_comments: Option<PendingComments>,
  pending_effects: Vec<Effect>,
  pending_selections: Vec<Option<usize>>,
  prompt: Option<Prompt>,
  session: Session,
  site_title: String,
  statics: Option<Statics>,
  tab_views: Vec<Option<ListView<ListEntry>>>,
  tabs: Vec<Tab>,
  transient_message: Option<TransientMessage>,
  voted: HashSet<u64>,
}

impl State {
  fn active_category(&self) -> Option<Category> {
    self.tab(self.active_tab).map(|tab| tab.category)
  }

  fn add_admin_tabs(&mut self) {
    for category in Category::admin() {
      if self.tab_index(*category).is_some() {
        continue;
      }

      self.tabs.push(Tab::new(*category));
      self.tab_views.push(Some(ListView::default()));
      self.pending_selections.push(None);

      self.start_load_for_tab(self.tabs.len().saturating_sub(1));
    }
  }

  pub(crate) fn admin_token(&self) -> Option<&str> {
    self.session.admin_token()
  }

  fn advance_init(&mut self, mut payload: InitPayload, step: InitStep, value: &str) {
    let value_or_default = if value.is_empty() {
      step.default_value()
    } else {
      value
    };

    match step {
      InitStep::AdminToken => {
        if value.is_empty() {
          self.set_transient_message("Admin token is required".into());
          return;
        }

        payload.admin_token = value.to_string();
      }
      InitStep::AllowedExtensions => {
        payload.allowed_extensions = InitPayload::parse_list(value_or_default);
      }
      InitStep::BannedKeywords => {
        let keywords = InitPayload::parse_list(value);
        payload.banned_keywords = (!keywords.is_empty()).then_some(keywords);
      }
      InitStep::MaxFileSize => match value_or_default.parse::<u64>() {
        Ok(megabytes) if megabytes > 0 => {
          payload.max_file_size = megabytes.saturating_mul(1024 * 1024);
        }
        _ => {
          self.set_transient_message(
            "Max upload size must be a whole number of MB".into(),
          );
          return;
        }
      },
      InitStep::UploadFolder => {
        payload.upload_folder = value_or_default.to_string();
      }
    }

    match step.next() {
      Some(next) => self.start_prompt(
        PromptKind::Init {
          payload,
          step: next,
        },
        next.default_value().to_string(),
      ),
      None => {
        self.message = "Initializing backend...".into();
        self.pending_effects.push(Effect::InitBackend { payload });
      }
    }
  }

  pub(crate) fn api_summary(&self) -> String {
    let status = self.api_status.map_or("checking...", ApiStatus::label);

    match self.statics {
      Some(statics) => format!("api {status} • {}", statics.summary()),
      None => format!("api {status}"),
    }
  }

  fn cancel_prompt(&mut self) -> Result {
    let Some(prompt) = self.prompt.take() else {
      return Ok(());
    };

    self.message = prompt.message_backup;

    match prompt.kind {
      PromptKind::NewPost => self.session.set_draft(prompt.buffer)?,
      PromptKind::Confirm(_) => self.set_transient_message("Cancelled".into()),
      _ => {}
    }

    Ok(())
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn close_comments(&mut self) {
    if self.pending_comments.take().is_some() {
      self.pending_effects.push(Effect::CancelComments);
    }

    self.restore_active_list_view();

    if !self.help.is_visible() {
      self.message = LIST_STATUS.into();
    }
  }

  fn comment_view(&self) -> Option<&CommentView> {
    match &self.mode {
      Mode::Comments(view) => Some(view),
      Mode::List(_) => None,
    }
  }

  fn comment_view_for(&mut self, post_id: u64) -> Option<&mut CommentView> {
    match &mut self.mode {
      Mode::Comments(view) if view.post_id() == post_id => Some(view),
      _ => None,
    }
  }

  fn confirm(&mut self, confirmation: Confirmation) {
    match confirmation {
      Confirmation::DeleteComment { id, .. } => {
        if let Some(post_id) = self.comment_view().map(CommentView::post_id) {
          self
            .pending_effects
            .push(Effect::DeleteComment { id, post_id });
        }
      }
      Confirmation::DeletePicture { filename } => {
        self.pending_effects.push(Effect::DeletePicture { filename });
      }
      Confirmation::DeletePost { category, id } => {
        self.pending_effects.push(Effect::Moderate {
          action: PostAction::Delete,
          category,
          id,
        });
      }
      Confirmation::Restore { path } => {
        self.message = "Restoring backup...".into();
        self.pending_effects.push(Effect::Restore { path });
      }
    }
  }

  fn current_entry(&self) -> Option<&ListEntry> {
    self
      .list_view(self.active_tab)
      .and_then(|view| view.selected_item())
  }

  fn delete_selected(&mut self) {
    if !self.require_admin() {
      return;
    }

    if let Some(view) = self.comment_view() {
      if let Some(id) = view.selected_entry().map(|entry| entry.id) {
        let replies = view.reply_count(id);

        self.start_prompt(
          PromptKind::Confirm(Confirmation::DeleteComment { id, replies }),
          String::new(),
        );
      }

      return;
    }

    let Some(category) = self.active_category() else {
      return;
    };

    let Some(entry) = self.current_entry() else {
      return;
    };

    let confirmation = match (category, entry.picture(), entry.id()) {
      (Category::Images, Some(picture), _) => Some(Confirmation::DeletePicture {
        filename: picture.filename.clone(),
      }),
      (Category::Pending | Category::Posts | Category::Rejected, _, Some(id)) => {
        Some(Confirmation::DeletePost { category, id })
      }
      _ => None,
    };

    let Some(confirmation) = confirmation else {
      self.set_transient_message("Nothing to delete here".into());
      return;
    };

    self.start_prompt(PromptKind::Confirm(confirmation), String::new());
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::AdminLogin => self.start_login(),
      Command::AdminLogout => self.logout()?,
      Command::Approve | Command::Reaudit | Command::Reject => {
        self.moderate_selected(command);
      }
      Command::CancelPrompt => self.cancel_prompt()?,
      Command::CloseComments => self.close_comments(),
      Command::Delete => self.delete_selected(),
      Command::DownloadBackup => {
        if self.require_admin() {
          self.start_prompt(PromptKind::BackupDir, ".".into());
        }
      }
      Command::EditComment => self.edit_comment(),
      Command::EditPost => self.edit_post(),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::InitBackend => self.start_init(),
      Command::LookupPostState => {
        let id = self
          .current_entry()
          .and_then(ListEntry::post_id)
          .map(|id| id.to_string())
          .unwrap_or_default();

        self.start_prompt(PromptKind::PostState, id);
      }
      Command::LookupReportState => {
        self.start_prompt(PromptKind::ReportState, String::new());
      }
      Command::NewComment => self.start_comment(false),
      Command::NewPost => {
        let draft = self.session.draft().to_string();
        self.start_prompt(PromptKind::NewPost, draft);
      }
      Command::None => {}
      Command::OpenComments => self.open_comments(),
      Command::OpenPicture => self.open_picture(),
      Command::PageDown => self.page_down(),
      Command::PageUp => self.page_up(),
      Command::PickerCancel => self.picker_cancel(),
      Command::PickerConfirm => self.picker_confirm(),
      Command::Quit => {
        should_exit = true;
      }
      Command::Refresh => self.refresh(),
      Command::ReplyComment => self.start_comment(true),
      Command::ReportPost => self.start_report(),
      Command::RestoreBackup => {
        if self.require_admin() {
          self.start_prompt(PromptKind::RestorePath, String::new());
        }
      }
      Command::SelectFirst => self.select_index(0),
      Command::SelectLast => self.select_last(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::SubmitPrompt => self.submit_prompt()?,
      Command::SwitchTabLeft => self.switch_tab_left(),
      Command::SwitchTabRight => self.switch_tab_right(),
      Command::ToggleAudit => {
        if self.require_admin() {
          self.message = "Switching audit mode...".into();
          self.pending_effects.push(Effect::ToggleAudit);
        }
      }
      Command::UploadImage => {
        self.start_prompt(PromptKind::ImagePath, String::new());
      }
      Command::Vote(vote) => self.vote(vote),
    }

    Ok(CommandDispatch {
      effects: mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  fn edit_comment(&mut self) {
    if !self.require_admin() {
      return;
    }

    let Some(draft) = self
      .comment_view()
      .and_then(CommentView::selected_comment)
      .map(CommentPatch::from)
    else {
      return;
    };

    let nickname = draft.nickname.clone();

    self.start_prompt(PromptKind::CommentNickname { draft }, nickname);
  }

  fn edit_post(&mut self) {
    if !self.require_admin() {
      return;
    }

    let editable = matches!(
      self.active_category(),
      Some(Category::Pending | Category::Posts | Category::Rejected)
    );

    let Some(id) = self.current_entry().and_then(ListEntry::id) else {
      return;
    };

    if !editable {
      self.set_transient_message("Only posts can be edited".into());
      return;
    }

    self.message = format!("Loading post #{id}...");
    self.pending_effects.push(Effect::LoadPostForEdit { id });
  }

  fn ensure_item(&mut self, tab_index: usize, target_index: usize) {
    let current_len = self
      .list_view(tab_index)
      .map_or(0, ListView::<ListEntry>::len);

    if target_index < current_len {
      return;
    }

    let Some(tab) = self.tabs.get(tab_index) else {
      return;
    };

    if !tab.has_more {
      return;
    }

    if let Some(slot) = self.pending_selections.get_mut(tab_index) {
      *slot = Some(target_index);
    }

    self.start_load_for_tab(tab_index);
  }

  fn handle_comments(
    &mut self,
    request_id: u64,
    result: Result<Vec<Comment>, ApiError>,
  ) {
    let Some(pending) = self.pending_comments.as_ref() else {
      return;
    };

    if pending.request_id != request_id {
      return;
    }

    let Some(pending) = self.pending_comments.take() else {
      return;
    };

    match result {
      Ok(comments) => {
        debug!(
          post_id = pending.post_id,
          count = comments.len(),
          "comments loaded"
        );

        if let Some(view) = self.comment_view_for(pending.post_id) {
          view.replace(comments);
          self.set_transient_message("Comments refreshed".into());
          return;
        }

        let view = CommentView::new(pending.post_id, pending.title, comments);

        self.store_active_list_view();

        self.mode = Mode::Comments(view);

        if !self.help.is_visible() {
          self.message = COMMENTS_STATUS.into();
        }
      }
      Err(error) => self.report_error("Could not load comments", &error),
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) -> Vec<Effect> {
    match event {
      Event::AuditToggled { result } => match result {
        Ok(enabled) => self.set_transient_message(format!(
          "Post audit is now {}",
          if enabled { "on" } else { "off" }
        )),
        Err(error) => self.report_error("Could not switch audit mode", &error),
      },
      Event::BackupSaved { result } => match result {
        Ok(path) => self
          .set_transient_message(format!("Backup saved to {}", path.display())),
        Err(error) => self.report_error("Could not download backup", &error),
      },
      Event::CommentDeleted {
        id,
        post_id,
        result,
      } => match result {
        Ok(()) => {
          if let Some(view) = self.comment_view_for(post_id) {
            view.apply_delete(id);
          }

          self.set_transient_message(format!("Deleted comment #{id}"));
        }
        Err(error) => self.report_error("Could not delete comment", &error),
      },
      Event::CommentModified {
        patch,
        post_id,
        result,
      } => match result {
        Ok(()) => {
          if let Some(view) = self.comment_view_for(post_id) {
            view.apply_patch(&patch);
          }

          self.set_transient_message(format!("Updated comment #{}", patch.id));
        }
        Err(error) => self.report_error("Could not update comment", &error),
      },
      Event::CommentPosted { post_id, result } => match result {
        Ok(receipt) => {
          self.set_transient_message(format!("Posted comment #{}", receipt.id));

          let title = self
            .comment_view_for(post_id)
            .map(|view| view.title.clone());

          if let Some(title) = title {
            self.start_comments_fetch(post_id, title);
          }
        }
        Err(error) => self.report_error("Could not post comment", &error),
      },
      Event::Comments { request_id, result } => {
        self.handle_comments(request_id, result);
      }
      Event::ImageUploaded { result } => match result {
        Ok(url) => {
          let mut draft = self.session.draft().trim_end().to_string();

          if !draft.is_empty() {
            draft.push_str("\n\n");
          }

          draft.push_str(&format!("![image]({url})"));

          if let Err(error) = self.session.set_draft(draft) {
            warn!(%error, "could not save draft");
          }

          self.set_transient_message(
            "Image uploaded, link added to your post draft (press p)".into(),
          );
        }
        Err(error) => self.report_error("Could not upload image", &error),
      },
      Event::Initialized { result } => match result {
        Ok(()) => {
          self.set_transient_message(
            "Backend initialized, log in with the admin token (press a)".into(),
          );
          self.pending_effects.push(Effect::CheckStatus);
        }
        Err(error) => self.report_error("Could not initialize backend", &error),
      },
      Event::LoggedIn { result, token } => match result {
        Ok(true) => {
          if let Err(error) = self.session.set_admin_token(token) {
            warn!(%error, "could not save admin token");
          }

          info!("logged in as admin");

          self.add_admin_tabs();
          self.set_transient_message("Logged in as admin".into());
        }
        Ok(false) => self.set_transient_message("Wrong admin token".into()),
        Err(error) => self.report_error("Could not log in", &error),
      },
      Event::Moderated {
        action,
        category,
        id,
        result,
      } => match result {
        Ok(()) => {
          self.remove_entries(category, |entry| entry.id() == Some(id));

          if action == PostAction::Delete {
            self.remove_entries(Category::Posts, |entry| entry.id() == Some(id));
          }

          self.set_transient_message(format!("{} post #{id}", action.past_tense()));
        }
        Err(error) => self.report_error("Could not update post", &error),
      },
      Event::PictureDeleted { filename, result } => match result {
        Ok(()) => {
          self.remove_entries(Category::Images, |entry| {
            entry
              .picture()
              .is_some_and(|picture| picture.filename == filename)
          });

          self.set_transient_message(format!(
            "Deleted image {}",
            truncate(&filename, 40)
          ));
        }
        Err(error) => self.report_error("Could not delete image", &error),
      },
      Event::PostLoaded { id, result } => match result {
        Ok(content) => {
          if self.prompt.is_none() {
            self.message = LIST_STATUS.into();
            self.start_prompt(PromptKind::ModifyPost { id }, content);
          }
        }
        Err(error) => self.report_error("Could not load post", &error),
      },
      Event::PostModified {
        content,
        id,
        result,
      } => match result {
        Ok(()) => {
          for view in self.list_views_mut() {
            view.update_where(
              |entry| {
                matches!(entry.subject, Subject::Article(_) | Subject::Post(_))
                  && entry.id() == Some(id)
              },
              |entry| entry.set_content(&content),
            );
          }

          self.set_transient_message(format!("Updated post #{id}"));
        }
        Err(error) => self.report_error("Could not update post", &error),
      },
      Event::PostSubmitted { content, result } => match result {
        Ok(outcome) => {
          if outcome.status == SubmitStatus::Deny {
            if let Err(error) = self.session.set_draft(content) {
              warn!(%error, "could not save draft");
            }
          } else if let Err(error) = self.session.clear_draft() {
            warn!(%error, "could not clear draft");
          }

          if outcome.status == SubmitStatus::Pass {
            self.refresh_tab(Category::Posts);
          }

          self.set_transient_message(outcome.summary());
        }
        Err(error) => self.report_error("Could not submit post", &error),
      },
      Event::ReportDecided {
        decision,
        id,
        result,
      } => match result {
        Ok(()) => {
          self.remove_entries(Category::Reports, |entry| entry.id() == Some(id));

          let verb = match decision {
            ReportDecision::Approve => "Approved",
            ReportDecision::Reject => "Dismissed",
          };

          self.set_transient_message(format!("{verb} report #{id}"));
        }
        Err(error) => self.report_error("Could not decide report", &error),
      },
      Event::Reported { post_id, result } => match result {
        Ok(receipt) => self.set_transient_message(format!(
          "Report #{} filed for post #{post_id}",
          receipt.id
        )),
        Err(error) => self.report_error("Could not report post", &error),
      },
      Event::Restored { result } => match result {
        Ok(()) => {
          let categories =
            self.tabs.iter().map(|tab| tab.category).collect::<Vec<_>>();

          for category in categories {
            self.refresh_tab(category);
          }

          self.set_transient_message("Backup restored".into());
        }
        Err(error) => self.report_error("Could not restore backup", &error),
      },
      Event::StateLookup { id, result, target } => match result {
        Ok(state) => self.set_transient_message(format!(
          "{} #{id}: {}",
          target.noun(),
          state.label()
        )),
        Err(error) => self.report_error("Could not look up state", &error),
      },
      Event::Status { statics, status } => {
        if self.api_status != Some(status) {
          info!(status = status.label(), "api status changed");
        }

        self.api_status = Some(status);

        if statics.is_some() {
          self.statics = statics;
        }
      }
      Event::TabItems {
        category,
        request_id,
        result,
      } => self.handle_tab_items(category, request_id, result),
      Event::Voted { id, result, vote } => match result {
        Ok(()) => {
          if let Some(index) = self.tab_index(Category::Posts)
            && let Some(view) = self.list_view_mut(index)
          {
            view.update_where(
              |entry| entry.id() == Some(id),
              |entry| entry.record_vote(vote),
            );
          }

          self.set_transient_message(format!("Voted on #{id}"));
        }
        Err(error) => {
          self.voted.remove(&id);
          self.report_error("Could not vote", &error);
        }
      },
    }

    mem::take(&mut self.pending_effects)
  }

  fn handle_tab_items(
    &mut self,
    category: Category,
    request_id: u64,
    result: Result<Vec<ListEntry>, ApiError>,
  ) {
    let Some(tab_index) = self.tab_index(category) else {
      return;
    };

    let Some(tab) = self.tabs.get_mut(tab_index) else {
      return;
    };

    if tab.request_id != Some(request_id) {
      return;
    }

    tab.request_id = None;

    let target = self
      .pending_selections
      .get_mut(tab_index)
      .and_then(Option::take);

    match result {
      Ok(entries) => {
        tab.has_more = category.is_paged() && !entries.is_empty();
        tab.next_page = tab.next_page.saturating_add(1);

        if let Some(list) = self.list_view_mut(tab_index) {
          list.append_page(entries, target);
        }

        if !self.help.is_visible() && self.prompt.is_none() {
          self.message = match self.mode {
            Mode::Comments(_) => COMMENTS_STATUS.into(),
            Mode::List(_) => LIST_STATUS.into(),
          };
        }
      }
      Err(error) => self.report_error(
        &format!("Could not load {}", category.label()),
        &error,
      ),
    }
  }

  fn handle_unauthorized(&mut self) {
    warn!("admin token rejected, logging out");

    if let Err(error) = self.session.clear_admin_token() {
      warn!(%error, "could not clear admin token");
    }

    self.remove_admin_tabs();

    self.show_message(ApiError::Unauthorized.to_string(), Tone::Error);
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn help_mut(&mut self) -> &mut HelpView {
    &mut self.help
  }

  pub(crate) fn is_admin(&self) -> bool {
    self.session.admin_token().is_some()
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  fn list_view(&self, index: usize) -> Option<&ListView<ListEntry>> {
    if index >= self.tabs.len() {
      return None;
    }

    if let Mode::List(view) = &self.mode
      && index == self.active_tab
    {
      return Some(view);
    }

    self.tab_views.get(index).and_then(|slot| slot.as_ref())
  }

  fn list_view_mut(
    &mut self,
    index: usize,
  ) -> Option<&mut ListView<ListEntry>> {
    if index >= self.tabs.len() {
      return None;
    }

    match &mut self.mode {
      Mode::List(view) if index == self.active_tab => Some(view),
      _ => self.tab_views.get_mut(index).and_then(|slot| slot.as_mut()),
    }
  }

  fn list_views_mut(
    &mut self,
  ) -> impl Iterator<Item = &mut ListView<ListEntry>> {
    let active = match &mut self.mode {
      Mode::List(view) => Some(view),
      Mode::Comments(_) => None,
    };

    active
      .into_iter()
      .chain(self.tab_views.iter_mut().filter_map(Option::as_mut))
  }

  fn logout(&mut self) -> Result {
    if !self.is_admin() {
      self.set_transient_message("Not logged in".into());
      return Ok(());
    }

    self.session.clear_admin_token()?;

    self.remove_admin_tabs();

    info!("logged out");

    self.set_transient_message("Logged out".into());

    Ok(())
  }

  fn lookup_state(&mut self, value: &str, target: StateTarget) {
    match value.parse::<u64>() {
      Ok(id) => self.pending_effects.push(Effect::LookupState { id, target }),
      Err(_) => self.set_transient_message("Enter a numeric id".into()),
    }
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn message_tone(&self) -> Tone {
    self
      .transient_message
      .as_ref()
      .map_or(Tone::Info, TransientMessage::tone)
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  fn moderate_selected(&mut self, command: Command) {
    if !self.require_admin() || !matches!(self.mode, Mode::List(_)) {
      return;
    }

    let Some(category) = self.active_category() else {
      return;
    };

    let Some(id) = self.current_entry().and_then(ListEntry::id) else {
      return;
    };

    let effect = match (command, category) {
      (Command::Approve, Category::Pending | Category::Rejected) => {
        Effect::Moderate {
          action: PostAction::Approve,
          category,
          id,
        }
      }
      (Command::Reject, Category::Pending) => Effect::Moderate {
        action: PostAction::Disapprove,
        category,
        id,
      },
      (Command::Reaudit, Category::Posts | Category::Rejected) => {
        Effect::Moderate {
          action: PostAction::Reaudit,
          category,
          id,
        }
      }
      (Command::Approve, Category::Reports) => Effect::DecideReport {
        decision: ReportDecision::Approve,
        id,
      },
      (Command::Reject, Category::Reports) => Effect::DecideReport {
        decision: ReportDecision::Reject,
        id,
      },
      _ => {
        self.set_transient_message(format!(
          "Not available on the {} tab",
          category.label()
        ));
        return;
      }
    };

    self.pending_effects.push(effect);
  }

  pub(crate) fn new(session: Session, site_title: String) -> Self {
    let mut categories = vec![Category::Posts];

    if session.admin_token().is_some() {
      categories.extend_from_slice(Category::admin());
    }

    let tabs = categories
      .into_iter()
      .map(Tab::new)
      .collect::<Vec<_>>();

    let tab_count = tabs.len();

    let mut tab_views = (0..tab_count)
      .map(|_| Some(ListView::default()))
      .collect::<Vec<_>>();

    let initial_view = tab_views
      .get_mut(0)
      .and_then(Option::take)
      .unwrap_or_default();

    Self {
      active_tab: 0,
      api_status: None,
      help: HelpView::new(),
      list_height: 0,
      message: LIST_STATUS.into(),
      mode: Mode::List(initial_view),
      next_request_id: 0,
      pending_comments: None,
      pending_effects: Vec::new(),
      pending_selections: vec![None; tab_count],
      prompt: None,
      session,
      site_title,
      statics: None,
      tab_views,
      tabs,
      transient_message: None,
      voted: HashSet::new(),
    }
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  fn open_comments(&mut self) {
    let Some(entry) = self.current_entry() else {
      return;
    };

    let Some(post_id) = entry.post_id() else {
      return;
    };

    let title = match entry.subject {
      Subject::Article(_) | Subject::Post(_) => entry.body.clone(),
      Subject::Picture(_) | Subject::Report(_) => entry.title.clone(),
    };

    if !self.help.is_visible() {
      self.message = LOADING_COMMENTS_STATUS.into();
    }

    self.start_comments_fetch(post_id, title);
  }

  fn open_picture(&mut self) {
    if let Some(url) = self
      .current_entry()
      .and_then(ListEntry::picture)
      .map(|picture| picture.url.clone())
    {
      self.pending_effects.push(Effect::OpenUrl { url });
    }
  }

  fn page_down(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::cursor);

    self.select_index(current.saturating_add(self.page_jump()));
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::cursor);

    self.select_index(current.saturating_sub(self.page_jump()));
  }

  fn picker_cancel(&mut self) {
    if let Mode::Comments(view) = &mut self.mode {
      view.picker = None;
    }

    self.message = COMMENTS_STATUS.into();
  }

  fn picker_confirm(&mut self) {
    let Mode::Comments(view) = &mut self.mode else {
      return;
    };

    let Some(picker) = view.picker.take() else {
      return;
    };

    let Some(parent) = picker.chosen() else {
      return;
    };

    let mut draft = picker.draft;

    if parent == draft.id {
      view.picker = Some(ParentPicker::new(view.store.comments(), draft));
      self.set_transient_message("a comment cannot be its own parent".into());
      return;
    }

    draft.parent_comment_id = parent;

    let content = draft.content.clone();

    self.message = COMMENTS_STATUS.into();

    self.start_prompt(PromptKind::CommentContent { draft }, content);
  }

  pub(crate) fn prompt(&self) -> Option<&Prompt> {
    self.prompt.as_ref()
  }

  pub(crate) fn prompt_command(&mut self, key: KeyEvent) -> Option<Command> {
    let prompt = self.prompt.as_mut()?;

    if prompt.is_confirmation() {
      return Some(match key.code {
        KeyCode::Char('y' | 'Y') => Command::SubmitPrompt,
        _ => Command::CancelPrompt,
      });
    }

    let modifiers = key.modifiers;

    let command = match key.code {
      KeyCode::Esc => Command::CancelPrompt,
      KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => {
        prompt.newline();
        Command::None
      }
      KeyCode::Enter => Command::SubmitPrompt,
      KeyCode::Backspace => {
        prompt.backspace();
        Command::None
      }
      KeyCode::Char(ch) => {
        if !(modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER))
        {
          prompt.insert(ch);
        }

        Command::None
      }
      _ => Command::None,
    };

    self.update_prompt_message();

    Some(command)
  }

  fn refresh(&mut self) {
    if let Some(view) = self.comment_view() {
      let (post_id, title) = (view.post_id(), view.title.clone());

      self.message = LOADING_COMMENTS_STATUS.into();
      self.start_comments_fetch(post_id, title);

      return;
    }

    if let Some(category) = self.active_category() {
      self.refresh_tab(category);
    }
  }

  fn refresh_tab(&mut self, category: Category) {
    let Some(tab_index) = self.tab_index(category) else {
      return;
    };

    if let Some(tab) = self.tabs.get_mut(tab_index) {
      if tab.is_loading() {
        self.pending_effects.push(Effect::CancelTabFetch { category });
      }

      tab.reset();
    }

    if let Some(list) = self.list_view_mut(tab_index) {
      *list = ListView::default();
    }

    self.start_load_for_tab(tab_index);
  }

  fn remove_admin_tabs(&mut self) {
    while let Some(index) = self.tabs.iter().position(|tab| tab.category.is_admin()) {
      self.remove_tab(index);
    }
  }

  fn remove_entries<F>(&mut self, category: Category, predicate: F)
  where
    F: Fn(&ListEntry) -> bool,
  {
    if let Some(index) = self.tab_index(category)
      && let Some(view) = self.list_view_mut(index)
    {
      view.remove_where(predicate);
    }
  }

  fn remove_tab(&mut self, index: usize) {
    let Some(tab) = self.tabs.get(index) else {
      return;
    };

    if tab.is_loading() {
      self.pending_effects.push(Effect::CancelTabFetch {
        category: tab.category,
      });
    }

    let removing_active = self.active_tab == index;

    if removing_active {
      if matches!(self.mode, Mode::Comments(_)) {
        self.close_comments();
      }

      self.mode = Mode::List(ListView::default());
    } else if self.active_tab > index {
      self.active_tab = self.active_tab.saturating_sub(1);
    }

    self.tabs.remove(index);

    if index < self.tab_views.len() {
      self.tab_views.remove(index);
    }

    if index < self.pending_selections.len() {
      self.pending_selections.remove(index);
    }

    if removing_active && !self.tabs.is_empty() {
      self.active_tab = self.active_tab.min(self.tabs.len().saturating_sub(1));
      self.restore_active_list_view();
    }
  }

  fn report_error(&mut self, context: &str, error: &ApiError) {
    warn!(%error, "{context}");

    if error.is_unauthorized() {
      self.handle_unauthorized();
    } else if !self.help.is_visible() {
      self.show_message(format!("{context}: {error}"), Tone::Error);
    }
  }

  fn require_admin(&mut self) -> bool {
    if self.is_admin() {
      true
    } else {
      self.set_transient_message("Log in as admin first (press a)".into());
      false
    }
  }

  pub(crate) fn resolved_active_tab(&self) -> Option<usize> {
    if self.tabs.is_empty() {
      None
    } else {
      Some(self.active_tab.min(self.tabs.len().saturating_sub(1)))
    }
  }

  fn restore_active_list_view(&mut self) {
    if let Some(slot) = self.tab_views.get_mut(self.active_tab) {
      if let Some(view) = slot.take() {
        self.mode = Mode::List(view);
      } else if !matches!(self.mode, Mode::List(_)) {
        self.mode = Mode::List(ListView::default());
      }
    } else if !matches!(self.mode, Mode::List(_)) {
      self.mode = Mode::List(ListView::default());
    }
  }

  fn select_index(&mut self, target: usize) {
    if self.tabs.is_empty() {
      return;
    }

    let tab_index = self.active_tab.min(self.tabs.len().saturating_sub(1));

    self.ensure_item(tab_index, target);

    if let Some(list) = self.list_view_mut(tab_index)
      && target < list.len()
    {
      list.select(target);
    }
  }

  fn select_last(&mut self) {
    let len = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::len);

    if len > 0 {
      self.select_index(len.saturating_sub(1));
    }
  }

  fn select_next(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::cursor);

    self.select_index(current.saturating_add(1));
  }

  fn select_previous(&mut self) {
    let current = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::cursor);

    self.select_index(current.saturating_sub(1));
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    self.show_message(message, Tone::Info);
  }

  fn show_message(&mut self, message: String, tone: Tone) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original, tone));

    self.message = message;
  }

  pub(crate) fn site_title(&self) -> &str {
    &self.site_title
  }

  fn start_comment(&mut self, reply: bool) {
    let Some(view) = self.comment_view() else {
      return;
    };

    let parent = if reply {
      view.selected_entry().map(|entry| entry.id)
    } else {
      Some(Comment::ROOT)
    };

    let Some(parent) = parent else {
      self.set_transient_message("Select a comment to reply to".into());
      return;
    };

    let nickname = self.session.nickname().to_string();

    self.start_prompt(PromptKind::ReplyNickname { parent }, nickname);
  }

  fn start_comments_fetch(&mut self, post_id: u64, title: String) {
    if self.pending_comments.is_some() {
      self.pending_effects.push(Effect::CancelComments);
    }

    let request_id = self.next_request_id();

    self.pending_comments = Some(PendingComments {
      post_id,
      request_id,
      title,
    });

    self.pending_effects.push(Effect::FetchComments {
      post_id,
      request_id,
    });
  }

  fn start_init(&mut self) {
    if self.api_status != Some(ApiStatus::Uninitialized) {
      self.set_transient_message(
        "The backend is not waiting for initialization".into(),
      );
      return;
    }

    self.start_prompt(
      PromptKind::Init {
        payload: InitPayload::default(),
        step: InitStep::AdminToken,
      },
      String::new(),
    );
  }

  fn start_load_for_tab(&mut self, tab_index: usize) {
    let Some(tab) = self.tabs.get(tab_index) else {
      return;
    };

    if !tab.has_more || tab.is_loading() {
      return;
    }

    let request_id = self.next_request_id();

    let Some(tab) = self.tabs.get_mut(tab_index) else {
      return;
    };

    tab.request_id = Some(request_id);

    let (category, page) = (tab.category, tab.next_page);

    if !self.help.is_visible() && self.prompt.is_none() {
      self.message = LOADING_ENTRIES_STATUS.into();
    }

    self.pending_effects.push(Effect::FetchTabItems {
      category,
      page,
      request_id,
    });
  }

  fn start_login(&mut self) {
    if self.is_admin() {
      self.set_transient_message("Already logged in as admin".into());
    } else {
      self.start_prompt(PromptKind::AdminLogin, String::new());
    }
  }

  fn start_prompt(&mut self, kind: PromptKind, buffer: String) {
    let backup = self
      .prompt
      .take()
      .map_or_else(|| self.message.clone(), |prompt| prompt.message_backup);

    self.prompt = Some(Prompt::new(kind, buffer, backup));

    self.update_prompt_message();
  }

  fn start_report(&mut self) {
    let Some(id) = self
      .current_entry()
      .and_then(ListEntry::article)
      .map(|article| article.id)
    else {
      self.set_transient_message("Select a post to report".into());
      return;
    };

    self.start_prompt(PromptKind::ReportTitle { id }, String::new());
  }

  /// Initial loads for every tab plus the first status check.
  pub(crate) fn startup(&mut self) -> Vec<Effect> {
    for index in 0..self.tabs.len() {
      self.start_load_for_tab(index);
    }

    self.pending_effects.push(Effect::CheckStatus);

    mem::take(&mut self.pending_effects)
  }

  fn store_active_list_view(&mut self) {
    if let Mode::List(view) = &mut self.mode
      && let Some(slot) = self.tab_views.get_mut(self.active_tab)
    {
      *slot = Some(mem::take(view));
    }
  }

  fn submit_prompt(&mut self) -> Result {
    let Some(prompt) = self.prompt.take() else {
      return Ok(());
    };

    let Prompt {
      buffer,
      kind,
      message_backup,
    } = prompt;

    self.message = message_backup;

    let value = buffer.trim();

    match kind {
      PromptKind::AdminLogin => {
        if value.is_empty() {
          self.set_transient_message("Admin token is required".into());
        } else {
          self.message = "Verifying admin token...".into();
          self.pending_effects.push(Effect::Login {
            token: value.to_string(),
          });
        }
      }
      PromptKind::BackupDir => {
        let dir = if value.is_empty() { "." } else { value };

        self.message = "Downloading backup...".into();
        self.pending_effects.push(Effect::DownloadBackup {
          dir: PathBuf::from(dir),
        });
      }
      PromptKind::CommentContent { mut draft } => {
        if value.is_empty() {
          self.set_transient_message("Comment content is required".into());
          return Ok(());
        }

        let Some(post_id) = self.comment_view().map(CommentView::post_id) else {
          return Ok(());
        };

        draft.content = value.to_string();

        self.pending_effects.push(Effect::ModifyComment {
          patch: draft,
          post_id,
        });
      }
      PromptKind::CommentNickname { mut draft } => {
        if value.is_empty() {
          self.set_transient_message("Nickname is required".into());
          return Ok(());
        }

        draft.nickname = value.to_string();

        if let Mode::Comments(view) = &mut self.mode {
          view.open_picker(draft);
          self.message = PICKER_STATUS.into();
        }
      }
      PromptKind::Confirm(confirmation) => self.confirm(confirmation),
      PromptKind::ImagePath => {
        if value.is_empty() {
          self.set_transient_message("Image path is required".into());
        } else {
          self.message = "Uploading image...".into();
          self.pending_effects.push(Effect::UploadImage {
            path: PathBuf::from(value),
          });
        }
      }
      PromptKind::Init { payload, step } => {
        self.advance_init(payload, step, value);
      }
      PromptKind::ModifyPost { id } => {
        if value.is_empty() {
          self.set_transient_message("Post content is required".into());
        } else {
          self.pending_effects.push(Effect::ModifyPost {
            content: value.to_string(),
            id,
          });
        }
      }
      PromptKind::NewPost => {
        self.session.set_draft(buffer.clone())?;

        if value.is_empty() {
          self.set_transient_message("Post content is required".into());
        } else {
          self.message = "Submitting post...".into();
          self.pending_effects.push(Effect::SubmitPost {
            content: value.to_string(),
          });
        }
      }
      PromptKind::PostState => self.lookup_state(value, StateTarget::Post),
      PromptKind::ReplyContent { nickname, parent } => {
        if value.is_empty() {
          self.set_transient_message("Comment content is required".into());
          return Ok(());
        }

        let Some(post_id) = self.comment_view().map(CommentView::post_id) else {
          return Ok(());
        };

        self.pending_effects.push(Effect::PostComment {
          comment: NewComment {
            content: value.to_string(),
            nickname,
            parent_comment_id: parent,
            submission_id: post_id,
          },
        });
      }
      PromptKind::ReplyNickname { parent } => {
        if value.is_empty() {
          self.set_transient_message("Nickname is required".into());
          return Ok(());
        }

        self.session.set_nickname(value)?;

        let nickname = value.to_string();

        self.start_prompt(PromptKind::ReplyContent { nickname, parent }, String::new());
      }
      PromptKind::ReportContent { id, title } => {
        if value.is_empty() {
          self.set_transient_message("Report reason is required".into());
        } else {
          self.pending_effects.push(Effect::ReportPost {
            report: NewReport {
              content: value.to_string(),
              id,
              title,
            },
          });
        }
      }
      PromptKind::ReportState => self.lookup_state(value, StateTarget::Report),
      PromptKind::ReportTitle { id } => {
        if value.is_empty() {
          self.set_transient_message("Report title is required".into());
        } else {
          let title = value.to_string();
          self.start_prompt(PromptKind::ReportContent { id, title }, String::new());
        }
      }
      PromptKind::RestorePath => {
        if value.is_empty() {
          self.set_transient_message("Backup path is required".into());
        } else {
          self.start_prompt(
            PromptKind::Confirm(Confirmation::Restore {
              path: PathBuf::from(value),
            }),
            String::new(),
          );
        }
      }
    }

    Ok(())
  }

  fn switch_tab_left(&mut self) {
    let tab_count = self.tabs.len();

    if tab_count != 0 {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  fn switch_tab_right(&mut self) {
    let tab_count = self.tabs.len();

    if tab_count != 0 {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  pub(crate) fn tab(&self, index: usize) -> Option<&Tab> {
    self.tabs.get(index)
  }

  fn tab_index(&self, category: Category) -> Option<usize> {
    self.tabs.iter().position(|tab| tab.category == category)
  }

  pub(crate) fn tabs(&self) -> &[Tab] {
    &self.tabs
  }

  fn update_prompt_message(&mut self) {
    if let Some(prompt) = &self.prompt {
      self.transient_message = None;

      self.message = if prompt.is_multiline() {
        PROMPT_STATUS.into()
      } else {
        truncate(&prompt.display(), 120)
      };
    }
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.original().to_string();
        self.transient_message = None;
      }
    }
  }

  fn vote(&mut self, vote: Vote) {
    let Some(id) = self
      .current_entry()
      .and_then(ListEntry::article)
      .map(|article| article.id)
    else {
      return;
    };

    if !self.voted.insert(id) {
      self.set_transient_message(format!("Already voted on #{id}"));
      return;
    }

    self.pending_effects.push(Effect::Vote { id, vote });
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  fn session(admin: bool) -> Session {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

    let path = env::temp_dir().join(format!(
      "whisper_state_test_{}_{unique}.json",
      process::id()
    ));

    let _ = fs::remove_file(&path);

    let mut session = Session::load(path).unwrap();

    if admin {
      session.set_admin_token("secret".into()).unwrap();
    }

    session
  }

  fn article(id: u64) -> ListEntry {
    ListEntry::from(Article {
      content: format!("post {id}"),
      downvotes: 0,
      id,
      upvotes: 1,
    })
  }

  fn comment(id: u64, parent: u64) -> Comment {
    Comment {
      content: format!("comment {id}"),
      id,
      nickname: format!("user{id}"),
      parent_comment_id: parent,
    }
  }

  fn state(admin: bool) -> State {
    let mut state = State::new(session(admin), "Board".into());
    state.mode = Mode::List(ListView::new(vec![article(42), article(43)]));
    state
  }

  fn dispatch(state: &mut State, command: Command) -> Vec<Effect> {
    state.dispatch_command(command).unwrap().effects
  }

  fn type_text(state: &mut State, text: &str) {
    for ch in text.chars() {
      assert_eq!(
        state.prompt_command(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
        Some(Command::None)
      );
    }
  }

  fn clear_prompt(state: &mut State) {
    if let Some(prompt) = state.prompt.as_mut() {
      prompt.buffer.clear();
    }
  }

  fn open_comments(state: &mut State) {
    let effects = dispatch(state, Command::OpenComments);

    let Some(Effect::FetchComments { request_id, .. }) = effects.first() else {
      panic!("expected a comments fetch");
    };

    state.handle_event(Event::Comments {
      request_id: *request_id,
      result: Ok(vec![comment(1, 0), comment(2, 1), comment(3, 0)]),
    });
  }

  #[test]
  fn open_comments_emits_fetch_effect() {
    let mut state = state(false);

    let effects = dispatch(&mut state, Command::OpenComments);

    assert_eq!(effects.len(), 1);

    match &effects[0] {
      Effect::FetchComments { post_id, .. } => assert_eq!(*post_id, 42),
      _ => panic!("unexpected effect variant"),
    }

    assert_eq!(state.message, LOADING_COMMENTS_STATUS);
  }

  #[test]
  fn stale_comment_results_are_dropped() {
    let mut state = state(false);

    dispatch(&mut state, Command::OpenComments);

    state.handle_event(Event::Comments {
      request_id: 999,
      result: Ok(vec![comment(1, 0)]),
    });

    assert!(matches!(state.mode, Mode::List(_)));
    assert!(state.pending_comments.is_some());
  }

  #[test]
  fn closing_comments_returns_to_the_list() {
    let mut state = state(false);

    open_comments(&mut state);

    assert!(matches!(state.mode, Mode::Comments(_)));

    let effects = dispatch(&mut state, Command::CloseComments);

    assert!(effects.is_empty());

    let Mode::List(view) = &state.mode else {
      panic!("expected list mode");
    };

    assert_eq!(view.len(), 2);
  }

  #[test]
  fn closing_while_loading_cancels_the_fetch() {
    let mut state = state(false);

    dispatch(&mut state, Command::OpenComments);
    state.mode = Mode::Comments(CommentView::new(42, String::new(), Vec::new()));

    let effects = dispatch(&mut state, Command::CloseComments);

    assert_eq!(effects, vec![Effect::CancelComments]);
    assert!(state.pending_comments.is_none());
  }

  #[test]
  fn votes_once_per_post_and_updates_counts_on_success() {
    let mut state = state(false);

    assert_eq!(
      dispatch(&mut state, Command::Vote(Vote::Up)),
      vec![Effect::Vote {
        id: 42,
        vote: Vote::Up
      }]
    );

    assert!(dispatch(&mut state, Command::Vote(Vote::Down)).is_empty());
    assert_eq!(state.message, "Already voted on #42");

    state.handle_event(Event::Voted {
      id: 42,
      result: Ok(()),
      vote: Vote::Up,
    });

    assert_eq!(
      state.current_entry().and_then(ListEntry::article).map(|a| a.upvotes),
      Some(2)
    );
  }

  #[test]
  fn failed_vote_can_be_retried() {
    let mut state = state(false);

    dispatch(&mut state, Command::Vote(Vote::Up));

    state.handle_event(Event::Voted {
      id: 42,
      result: Err(ApiError::NotAccepted { operation: "vote" }),
      vote: Vote::Up,
    });

    assert_eq!(dispatch(&mut state, Command::Vote(Vote::Up)).len(), 1);
  }

  #[test]
  fn startup_loads_admin_tabs_when_logged_in() {
    let mut state = State::new(session(true), "Board".into());

    let effects = state.startup();

    let fetched = effects
      .iter()
      .filter_map(|effect| match effect {
        Effect::FetchTabItems { category, .. } => Some(*category),
        _ => None,
      })
      .collect::<Vec<_>>();

    assert_eq!(
      fetched,
      vec![
        Category::Posts,
        Category::Pending,
        Category::Rejected,
        Category::Reports,
        Category::Images
      ]
    );

    assert_eq!(effects.last(), Some(&Effect::CheckStatus));
  }

  #[test]
  fn tab_items_ignore_stale_requests_and_stop_on_empty_page() {
    let mut state = State::new(session(false), "Board".into());

    let effects = state.startup();

    let Some(Effect::FetchTabItems { request_id, .. }) = effects.first() else {
      panic!("expected a tab fetch");
    };

    state.handle_event(Event::TabItems {
      category: Category::Posts,
      request_id: request_id + 100,
      result: Ok(vec![article(1)]),
    });

    assert!(state.tabs[0].is_loading());

    state.handle_event(Event::TabItems {
      category: Category::Posts,
      request_id: *request_id,
      result: Ok(vec![article(1)]),
    });

    assert!(!state.tabs[0].is_loading());
    assert!(state.tabs[0].has_more);
    assert_eq!(state.tabs[0].next_page, 2);

    let effects = dispatch(&mut state, Command::SelectNext);

    let Some(Effect::FetchTabItems { page, request_id, .. }) = effects.first()
    else {
      panic!("expected the next page");
    };

    assert_eq!(*page, 2);

    state.handle_event(Event::TabItems {
      category: Category::Posts,
      request_id: *request_id,
      result: Ok(Vec::new()),
    });

    assert!(!state.tabs[0].has_more);
    assert!(dispatch(&mut state, Command::SelectNext).is_empty());
  }

  #[test]
  fn unauthorized_admin_call_logs_out() {
    let mut state = State::new(session(true), "Board".into());

    state.startup();

    assert_eq!(state.tabs.len(), 5);

    let effects = state.handle_event(Event::Moderated {
      action: PostAction::Approve,
      category: Category::Pending,
      id: 1,
      result: Err(ApiError::Unauthorized),
    });

    assert_eq!(state.tabs.len(), 1);
    assert!(!state.is_admin());
    assert!(effects.contains(&Effect::CancelTabFetch {
      category: Category::Reports
    }));
    assert_eq!(state.message, ApiError::Unauthorized.to_string());
    assert_eq!(state.message_tone(), Tone::Error);
  }

  #[test]
  fn admin_commands_require_login() {
    let mut state = state(false);

    assert!(dispatch(&mut state, Command::ToggleAudit).is_empty());
    assert_eq!(state.message, "Log in as admin first (press a)");

    open_comments(&mut state);

    dispatch(&mut state, Command::EditComment);
    assert!(state.prompt.is_none());
  }

  #[test]
  fn admin_comment_edit_walks_nickname_parent_and_content() {
    let mut state = state(true);

    open_comments(&mut state);

    if let Mode::Comments(view) = &mut state.mode {
      view.select_index_at(2);
    }

    dispatch(&mut state, Command::EditComment);

    assert_eq!(state.prompt.as_ref().map(|p| p.buffer.as_str()), Some("user3"));

    clear_prompt(&mut state);
    type_text(&mut state, "mod");

    assert!(dispatch(&mut state, Command::SubmitPrompt).is_empty());

    let Mode::Comments(view) = &mut state.mode else {
      panic!("expected comments mode");
    };

    let picker = view.picker.as_mut().unwrap();
    assert_eq!(picker.chosen(), Some(Comment::ROOT));
    picker.select_next();
    assert_eq!(picker.chosen(), Some(1));

    dispatch(&mut state, Command::PickerConfirm);

    clear_prompt(&mut state);
    type_text(&mut state, "moved");

    let effects = dispatch(&mut state, Command::SubmitPrompt);

    let expected = CommentPatch {
      content: "moved".into(),
      id: 3,
      nickname: "mod".into(),
      parent_comment_id: 1,
    };

    assert_eq!(
      effects,
      vec![Effect::ModifyComment {
        patch: expected.clone(),
        post_id: 42
      }]
    );

    state.handle_event(Event::CommentModified {
      patch: expected,
      post_id: 42,
      result: Ok(()),
    });

    let Mode::Comments(view) = &state.mode else {
      panic!("expected comments mode");
    };

    let placed = view
      .entries
      .iter()
      .map(|entry| (entry.id, entry.depth))
      .collect::<Vec<_>>();

    assert_eq!(placed, vec![(1, 0), (2, 1), (3, 1)]);
  }

  #[test]
  fn delete_comment_requires_confirmation() {
    let mut state = state(true);

    open_comments(&mut state);

    assert!(dispatch(&mut state, Command::Delete).is_empty());
    assert!(state.prompt.as_ref().is_some_and(Prompt::is_confirmation));
    assert_eq!(
      state.message,
      "Delete comment #1? Its 1 replies will be hidden. [y/N]"
    );

    assert_eq!(
      state.prompt_command(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE)),
      Some(Command::SubmitPrompt)
    );

    assert_eq!(
      dispatch(&mut state, Command::SubmitPrompt),
      vec![Effect::DeleteComment { id: 1, post_id: 42 }]
    );

    state.handle_event(Event::CommentDeleted {
      id: 1,
      post_id: 42,
      result: Ok(()),
    });

    let Mode::Comments(view) = &state.mode else {
      panic!("expected comments mode");
    };

    assert_eq!(view.entries.len(), 1);
  }

  #[test]
  fn reply_remembers_nickname_and_posts_comment() {
    let mut state = state(false);

    open_comments(&mut state);

    dispatch(&mut state, Command::ReplyComment);
    type_text(&mut state, "ada");
    dispatch(&mut state, Command::SubmitPrompt);

    assert_eq!(state.session.nickname(), "ada");

    type_text(&mut state, "hi");

    let effects = dispatch(&mut state, Command::SubmitPrompt);

    assert_eq!(
      effects,
      vec![Effect::PostComment {
        comment: NewComment {
          content: "hi".into(),
          nickname: "ada".into(),
          parent_comment_id: 1,
          submission_id: 42,
        }
      }]
    );

    let effects = state.handle_event(Event::CommentPosted {
      post_id: 42,
      result: Ok(CommentReceipt {
        id: 9,
        status: "OK".into(),
      }),
    });

    assert!(matches!(
      effects.as_slice(),
      [Effect::FetchComments { post_id: 42, .. }]
    ));
  }

  #[test]
  fn cancelled_post_keeps_the_draft() {
    let mut state = state(false);

    dispatch(&mut state, Command::NewPost);
    type_text(&mut state, "half");

    state.prompt_command(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    type_text(&mut state, "done");

    assert_eq!(
      state.prompt_command(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
      Some(Command::CancelPrompt)
    );

    dispatch(&mut state, Command::CancelPrompt);

    assert_eq!(state.session.draft(), "half\ndone");

    dispatch(&mut state, Command::NewPost);

    assert_eq!(
      state.prompt.as_ref().map(|p| p.buffer.as_str()),
      Some("half\ndone")
    );
  }

  #[test]
  fn init_backend_collects_every_field() {
    let mut state = state(false);

    assert!(dispatch(&mut state, Command::InitBackend).is_empty());
    assert!(state.prompt.is_none());

    state.handle_event(Event::Status {
      statics: None,
      status: ApiStatus::Uninitialized,
    });

    dispatch(&mut state, Command::InitBackend);
    type_text(&mut state, "root");
    dispatch(&mut state, Command::SubmitPrompt);

    for _ in 0..3 {
      dispatch(&mut state, Command::SubmitPrompt);
    }

    type_text(&mut state, "spam, scam");

    let effects = dispatch(&mut state, Command::SubmitPrompt);

    assert_eq!(
      effects,
      vec![Effect::InitBackend {
        payload: InitPayload {
          admin_token: "root".into(),
          allowed_extensions: vec![
            "png".into(),
            "jpg".into(),
            "jpeg".into(),
            "gif".into(),
            "webp".into()
          ],
          banned_keywords: Some(vec!["spam".into(), "scam".into()]),
          max_file_size: 10 * 1024 * 1024,
          upload_folder: "img".into(),
        }
      }]
    );
  }

  #[test]
  fn moderation_removes_entries_from_the_queue() {
    let mut state = State::new(session(true), "Board".into());

    state.startup();

    let request_id = state.tabs[1].request_id.unwrap();

    state.handle_event(Event::TabItems {
      category: Category::Pending,
      request_id,
      result: Ok(vec![ListEntry::from(AdminPost {
        content: "queued".into(),
        create_time: String::new(),
        downvotes: 0,
        id: 5,
        upvotes: 0,
      })]),
    });

    dispatch(&mut state, Command::SwitchTabRight);

    assert_eq!(
      dispatch(&mut state, Command::Approve),
      vec![Effect::Moderate {
        action: PostAction::Approve,
        category: Category::Pending,
        id: 5
      }]
    );

    state.handle_event(Event::Moderated {
      action: PostAction::Approve,
      category: Category::Pending,
      id: 5,
      result: Ok(()),
    });

    assert!(state.current_entry().is_none());
    assert_eq!(state.message, "Approved post #5");
  }
}
