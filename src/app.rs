use super::*;

/// Background work that is superseded, rather than duplicated, when started
/// again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum TaskSlot {
  Comments,
  Status,
  Tab(Category),
}

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  last_status_check: Instant,
  state: State,
  status_refresh: Duration,
  tasks: HashMap<TaskSlot, AbortHandle>,
}

impl App {
  fn admin(&self) -> Option<AdminClient> {
    self
      .state
      .admin_token()
      .map(|token| AdminClient::new(self.client.clone(), token.to_string()))
  }

  fn cancel(&mut self, slot: TaskSlot) {
    if let Some(task) = self.tasks.remove(&slot) {
      debug!(?slot, "cancelling background task");
      task.abort();
    }
  }

  fn comment_list_item(
    entry: &CommentEntry,
    available_width: u16,
    admin: bool,
  ) -> ListItem {
    let indent = format!("{BASE_INDENT}{}", "  ".repeat(entry.depth));

    let mut header = vec![Span::raw(indent.clone())];

    if entry.has_children() {
      header.push(Span::raw(if entry.expanded { "[-] " } else { "[+] " }));
    }

    header.push(Span::styled(
      if admin {
        entry.admin_header()
      } else {
        entry.header()
      },
      Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    let body = if entry.expanded {
      wrap_text(entry.body(), wrap_width)
    } else {
      vec![format!(
        "{} ({} hidden)",
        entry.snippet(),
        entry.children.len()
      )]
    };

    for line in body {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(line, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.draw_tabs(frame, layout[0]);

    let admin = self.state.is_admin();

    let active_tab = self.state.resolved_active_tab().unwrap_or(0);

    let (is_loading, empty_text) =
      self.state.tab(active_tab).map_or((false, ""), |tab| {
        (tab.is_loading(), tab.category.empty_text())
      });

    let mut list_area = layout[1];

    let (list_items, selected_index, offset) = match self.state.mode_mut() {
      Mode::List(view) => {
        let list_items: Vec<ListItem> = if view.is_empty() {
          vec![ListItem::new(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::raw(if is_loading {
              LOADING_ENTRIES_STATUS
            } else {
              empty_text
            }),
          ]))]
        } else {
          view
            .items()
            .iter()
            .map(|entry| Self::list_entry_item(entry, list_area.width))
            .collect()
        };

        (list_items, view.selected_index(), view.offset())
      }
      Mode::Comments(view) => {
        let title = view.title.lines().next().unwrap_or_default();

        let header = Paragraph::new(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            format!(
              "#{} {}",
              view.post_id(),
              truncate(title, usize::from(list_area.width).saturating_sub(12))
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
          ),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));

        let split = Layout::default()
          .direction(Direction::Vertical)
          .constraints([Constraint::Length(2), Constraint::Min(0)])
          .split(list_area);

        frame.render_widget(header, split[0]);

        list_area = split[1];

        let (visible, selected_pos) = view.visible_with_selection();

        let list_items: Vec<ListItem> = if visible.is_empty() {
          vec![ListItem::new(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::raw(if view.store.is_loaded() {
              "No comments yet. Press c to write one."
            } else {
              LOADING_COMMENTS_STATUS
            }),
          ]))]
        } else {
          visible
            .iter()
            .map(|&idx| {
              Self::comment_list_item(&view.entries[idx], list_area.width, admin)
            })
            .collect()
        };

        let offset = view.offset.min(selected_pos.unwrap_or(0));

        (list_items, selected_pos, offset)
      }
    };

    let list_height = usize::from(list_area.height);

    let mut list_state = ListState::default()
      .with_selected(selected_index)
      .with_offset(offset);

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, list_area, &mut list_state);

    self.state.set_list_height(list_height);
    self.state.mode_mut().set_offset(list_state.offset());

    self.draw_status(frame, layout[2]);

    if let Mode::Comments(view) = self.state.mode_mut()
      && let Some(picker) = &view.picker
    {
      Self::draw_picker(frame, picker);
    }

    if let Some(prompt) = self.state.prompt()
      && prompt.is_multiline()
    {
      Self::draw_prompt(frame, prompt);
    }

    self.state.help().draw(frame, admin);
  }

  fn draw_picker(frame: &mut Frame, picker: &ParentPicker) {
    let labels = picker.labels();

    let longest = labels
      .iter()
      .map(|label| label.chars().count())
      .max()
      .unwrap_or(0);

    let area = popup_area(
      frame.area(),
      u16::try_from(longest.saturating_add(4)).unwrap_or(u16::MAX).max(30),
      u16::try_from(labels.len().saturating_add(2)).unwrap_or(u16::MAX),
    );

    frame.render_widget(Clear, area);

    let list = List::new(labels.into_iter().map(ListItem::new))
      .block(
        Block::default()
          .title(format!("Parent of comment #{}", picker.draft.id))
          .borders(Borders::ALL),
      )
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    let mut list_state =
      ListState::default().with_selected(picker.options.selected_index());

    frame.render_stateful_widget(list, area, &mut list_state);
  }

  fn draw_prompt(frame: &mut Frame, prompt: &Prompt) {
    let outer = frame.area();

    let area = popup_area(
      outer,
      outer.width.saturating_mul(3) / 4,
      outer.height / 2,
    );

    frame.render_widget(Clear, area);

    let mut text = prompt.buffer.clone();
    text.push('▏');

    let editor = Paragraph::new(text)
      .block(
        Block::default()
          .title(prompt.label())
          .title_bottom(PROMPT_STATUS)
          .borders(Borders::ALL),
      )
      .wrap(Wrap { trim: false });

    frame.render_widget(editor, area);
  }

  fn draw_status(&self, frame: &mut Frame, area: Rect) {
    let summary = self.state.api_summary();

    let split = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([
        Constraint::Min(0),
        Constraint::Length(
          u16::try_from(summary.chars().count().saturating_add(1))
            .unwrap_or(u16::MAX),
        ),
      ])
      .split(area);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(self.state.message_tone().color()));

    frame.render_widget(status, split[0]);

    frame.render_widget(
      Paragraph::new(summary)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray)),
      split[1],
    );
  }

  fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
    let title = self.state.site_title();

    let split = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([
        Constraint::Min(0),
        Constraint::Length(
          u16::try_from(title.chars().count()).unwrap_or(u16::MAX),
        ),
      ])
      .split(area);

    let tab_titles: Vec<Line> = self
      .state
      .tabs()
      .iter()
      .map(|tab| {
        if tab.category.is_admin() {
          Line::from(Span::styled(
            tab.label.to_uppercase(),
            Style::default().fg(Color::Yellow),
          ))
        } else {
          Line::from(tab.label.to_uppercase())
        }
      })
      .collect();

    let tabs_widget = Tabs::new(tab_titles)
      .select(self.state.resolved_active_tab().unwrap_or(0))
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs_widget, split[0]);

    frame.render_widget(
      Paragraph::new(title.to_string())
        .alignment(Alignment::Right)
        .style(Style::default().add_modifier(Modifier::BOLD)),
      split[1],
    );
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::CancelComments => self.cancel(TaskSlot::Comments),
      Effect::CancelTabFetch { category } => {
        self.cancel(TaskSlot::Tab(category));
      }
      Effect::CheckStatus => {
        let client = self.client.clone();

        let task = self.spawn(async move {
          let (status, statics) = join(client.status(), client.statics()).await;

          let statics = match (status, statics) {
            (ApiStatus::Online, Ok(statics)) => statics,
            (ApiStatus::Online, Err(error)) => {
              warn!(%error, "could not load site statistics");
              None
            }
            _ => None,
          };

          Event::Status { statics, status }
        });

        self.track(TaskSlot::Status, task);
      }
      Effect::DecideReport { decision, id } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::ReportDecided {
            decision,
            id,
            result: with_admin(admin, |admin| async move {
              admin.decide_report(id, decision).await
            })
            .await,
          }
        });
      }
      Effect::DeleteComment { id, post_id } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::CommentDeleted {
            id,
            post_id,
            result: with_admin(admin, |admin| async move {
              admin.delete_comment(id).await
            })
            .await,
          }
        });
      }
      Effect::DeletePicture { filename } => {
        let admin = self.admin();

        self.spawn(async move {
          let result = with_admin(admin, |admin| {
            let filename = filename.clone();
            async move { admin.delete_pic(&filename).await }
          })
          .await;

          Event::PictureDeleted { filename, result }
        });
      }
      Effect::DownloadBackup { dir } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::BackupSaved {
            result: with_admin(admin, |admin| save_backup(admin, dir)).await,
          }
        });
      }
      Effect::FetchComments {
        post_id,
        request_id,
      } => {
        let client = self.client.clone();

        let task = self.spawn(async move {
          Event::Comments {
            request_id,
            result: client.fetch_comments(post_id).await,
          }
        });

        self.track(TaskSlot::Comments, task);
      }
      Effect::FetchTabItems {
        category,
        page,
        request_id,
      } => {
        let (client, admin) = (self.client.clone(), self.admin());

        let task = self.spawn(async move {
          Event::TabItems {
            category,
            request_id,
            result: fetch_listing(client, admin, category, page).await,
          }
        });

        self.track(TaskSlot::Tab(category), task);
      }
      Effect::InitBackend { payload } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::Initialized {
            result: client.init_backend(&payload).await,
          }
        });
      }
      Effect::LoadPostForEdit { id } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::PostLoaded {
            id,
            result: with_admin(admin, |admin| async move {
              admin.post_info(id).await
            })
            .await,
          }
        });
      }
      Effect::Login { token } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::LoggedIn {
            result: AdminClient::verify(&client, &token).await,
            token,
          }
        });
      }
      Effect::LookupState { id, target } => {
        let client = self.client.clone();

        self.spawn(async move {
          let result = match target {
            StateTarget::Post => client.post_state(id).await,
            StateTarget::Report => client.report_state(id).await,
          };

          Event::StateLookup { id, result, target }
        });
      }
      Effect::Moderate {
        action,
        category,
        id,
      } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::Moderated {
            action,
            category,
            id,
            result: with_admin(admin, |admin| async move {
              admin.moderate(id, action).await
            })
            .await,
          }
        });
      }
      Effect::ModifyComment { patch, post_id } => {
        let admin = self.admin();

        self.spawn(async move {
          let result = with_admin(admin, |admin| {
            let patch = patch.clone();
            async move { admin.modify_comment(&patch).await }
          })
          .await;

          Event::CommentModified {
            patch,
            post_id,
            result,
          }
        });
      }
      Effect::ModifyPost { content, id } => {
        let admin = self.admin();

        self.spawn(async move {
          let result = with_admin(admin, |admin| {
            let content = content.clone();
            async move { admin.modify_post(id, &content).await }
          })
          .await;

          Event::PostModified {
            content,
            id,
            result,
          }
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
      Effect::PostComment { comment } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::CommentPosted {
            post_id: comment.submission_id,
            result: client.post_comment(&comment).await,
          }
        });
      }
      Effect::ReportPost { report } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::Reported {
            post_id: report.id,
            result: client.report_post(&report).await,
          }
        });
      }
      Effect::Restore { path } => {
        let admin = self.admin();

        self.spawn(async move {
          Event::Restored {
            result: with_admin(admin, |admin| async move {
              admin.recover(&path).await
            })
            .await,
          }
        });
      }
      Effect::SubmitPost { content } => {
        let client = self.client.clone();

        self.spawn(async move {
          let result = client.submit_post(&content).await;
          Event::PostSubmitted { content, result }
        });
      }
      Effect::ToggleAudit => {
        let admin = self.admin();

        self.spawn(async move {
          Event::AuditToggled {
            result: with_admin(admin, toggle_audit).await,
          }
        });
      }
      Effect::UploadImage { path } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::ImageUploaded {
            result: client.upload_image(&path).await,
          }
        });
      }
      Effect::Vote { id, vote } => {
        let client = self.client.clone();

        self.spawn(async move {
          Event::Voted {
            id,
            result: client.vote(id, vote).await,
            vote,
          }
        });
      }
    }
  }

  fn list_entry_item(entry: &ListEntry, available_width: u16) -> ListItem {
    let mut lines = vec![Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(entry.title.clone(), Style::default().fg(Color::White)),
      Span::raw("  "),
      Span::styled(entry.detail.clone(), Style::default().fg(Color::DarkGray)),
    ])];

    let wrap_width = usize::from(available_width)
      .saturating_sub(BASE_INDENT.len())
      .max(1);

    let body = wrap_text(&entry.body, wrap_width);

    for line in body.iter().take(PREVIEW_LINES) {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(line.clone()),
      ]));
    }

    if body.len() > PREVIEW_LINES {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled("...", Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  pub(crate) fn new(client: Client, session: Session, config: &Config) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      last_status_check: Instant::now(),
      state: State::new(session, config.site_title.clone()),
      status_refresh: config.status_refresh,
      tasks: HashMap::new(),
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      for effect in self.state.handle_event(event) {
        self.execute_effect(effect);
      }
    }

    if self.last_status_check.elapsed() >= self.status_refresh {
      self.last_status_check = Instant::now();
      self.execute_effect(Effect::CheckStatus);
    }

    self.tasks.retain(|_, task| !task.is_finished());
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    for effect in self.state.startup() {
      self.execute_effect(effect);
    }

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.help_is_visible() {
        self.state.help_mut().handle_key(key)
      } else if let Some(command) = self.state.prompt_command(key) {
        command
      } else {
        let page = self.state.list_height().max(1);
        self.state.mode_mut().handle_key(key, page)
      };

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          warn!(%error, "command failed");
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error}"));
        }
      }
    }

    for (_, task) in self.tasks.drain() {
      task.abort();
    }

    Ok(())
  }

  fn spawn<F>(&self, task: F) -> AbortHandle
  where
    F: Future<Output = Event> + Send + 'static,
  {
    let sender = self.event_tx.clone();

    self
      .handle
      .spawn(async move {
        let _ = sender.send(task.await);
      })
      .abort_handle()
  }

  fn track(&mut self, slot: TaskSlot, task: AbortHandle) {
    if let Some(previous) = self.tasks.insert(slot, task) {
      previous.abort();
    }
  }
}

async fn fetch_listing(
  client: Client,
  admin: Option<AdminClient>,
  category: Category,
  page: u64,
) -> Result<Vec<ListEntry>, ApiError> {
  debug!(?category, page, "fetching listing");

  match category {
    Category::Images => {
      with_admin(admin, |admin| async move { admin.pic_links(page).await })
        .await
        .map(into_entries)
    }
    Category::Pending => {
      with_admin(admin, |admin| async move { admin.pending_posts().await })
        .await
        .map(into_entries)
    }
    Category::Posts => client.fetch_articles(page).await.map(into_entries),
    Category::Rejected => {
      with_admin(admin, |admin| async move { admin.rejected_posts().await })
        .await
        .map(into_entries)
    }
    Category::Reports => {
      with_admin(admin, |admin| async move { admin.pending_reports().await })
        .await
        .map(into_entries)
    }
  }
}

fn into_entries<T: Into<ListEntry>>(items: Vec<T>) -> Vec<ListEntry> {
  items.into_iter().map(Into::into).collect()
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.clamp(1, area.width.saturating_sub(2).max(1));
  let height = height.clamp(1, area.height.saturating_sub(2).max(1));

  Rect::new(
    area.x + area.width.saturating_sub(width) / 2,
    area.y + area.height.saturating_sub(height) / 2,
    width,
    height,
  )
}

/// Writes the server backup into `dir`, keeping only the final component of
/// the server supplied filename.
async fn save_backup(
  admin: AdminClient,
  dir: PathBuf,
) -> Result<PathBuf, ApiError> {
  let backup = admin.backup().await?;

  let filename = Path::new(&backup.filename)
    .file_name()
    .map_or_else(|| AdminClient::DEFAULT_BACKUP_NAME.into(), PathBuf::from);

  let path = dir.join(filename);

  tokio::fs::create_dir_all(&dir)
    .await
    .map_err(|source| ApiError::Io {
      path: dir.clone(),
      source,
    })?;

  tokio::fs::write(&path, &backup.bytes)
    .await
    .map_err(|source| ApiError::Io {
      path: path.clone(),
      source,
    })?;

  info!(path = %path.display(), bytes = backup.bytes.len(), "backup saved");

  Ok(path)
}

async fn toggle_audit(admin: AdminClient) -> Result<bool, ApiError> {
  let enabled = !admin.audit_mode().await?;

  admin.set_audit_mode(enabled).await?;

  info!(enabled, "audit mode switched");

  Ok(enabled)
}

async fn with_admin<T, F, Fut>(
  admin: Option<AdminClient>,
  task: F,
) -> Result<T, ApiError>
where
  F: FnOnce(AdminClient) -> Fut,
  Fut: Future<Output = Result<T, ApiError>>,
{
  match admin {
    Some(admin) => task(admin).await,
    None => Err(ApiError::NotLoggedIn),
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    ratatui::backend::TestBackend,
    wiremock::{
      Mock, MockServer, ResponseTemplate,
      matchers::{method, path},
    },
  };

  #[test]
  fn popups_stay_inside_the_frame() {
    let area = popup_area(Rect::new(0, 0, 40, 10), 100, 100);

    assert_eq!(area, Rect::new(1, 1, 38, 8));
  }

  fn app(server: &str) -> App {
    let dir = env::temp_dir();

    let config = Config {
      api_base_url: server.into(),
      log_file: dir.join("whisper_app_test.log"),
      session_file: dir.join(format!(
        "whisper_app_test_{}_missing.json",
        process::id()
      )),
      site_title: "Board".into(),
      status_refresh: Duration::from_secs(30),
    };

    let session = Session::load(config.session_file.clone()).unwrap();

    App::new(Client::new(server), session, &config)
  }

  fn comment(id: u64, parent_comment_id: u64) -> Comment {
    Comment {
      content: format!("comment {id}"),
      id,
      nickname: "anon".into(),
      parent_comment_id,
    }
  }

  #[tokio::test]
  async fn drawing_records_the_list_height() {
    let mut app = app("http://127.0.0.1:9");

    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

    terminal.draw(|frame| app.draw(frame)).unwrap();

    assert_eq!(app.state.list_height(), 15);
  }

  #[tokio::test]
  async fn drawing_comments_leaves_room_for_the_header() {
    let mut app = app("http://127.0.0.1:9");

    *app.state.mode_mut() = Mode::Comments(CommentView::new(
      7,
      "A post".into(),
      vec![comment(1, 0), comment(2, 1)],
    ));

    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

    terminal.draw(|frame| app.draw(frame)).unwrap();

    assert_eq!(app.state.list_height(), 13);
  }

  #[tokio::test]
  async fn admin_work_without_a_token_is_refused() {
    let result = with_admin(None, |admin| async move {
      admin.audit_mode().await
    })
    .await;

    assert!(matches!(result, Err(ApiError::NotLoggedIn)));
  }

  #[tokio::test]
  async fn backups_are_written_under_the_target_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/admin/get/backup"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header(
            "content-disposition",
            "attachment; filename=\"../../escape.zip\"",
          )
          .set_body_bytes(b"zip".to_vec()),
      )
      .mount(&server)
      .await;

    let dir = env::temp_dir()
      .join(format!("whisper_backup_test_{}", process::id()));

    let admin = AdminClient::new(Client::new(&server.uri()), "secret".into());

    let saved = save_backup(admin, dir.clone()).await.unwrap();

    assert_eq!(saved, dir.join("escape.zip"));
    assert_eq!(fs::read(&saved).unwrap(), b"zip");

    let _ = fs::remove_dir_all(&dir);
  }

  #[tokio::test]
  async fn post_listing_uses_public_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/get/10_info"))
      .respond_with(ResponseTemplate::new(200).set_body_json(
        serde_json::json!([{ "id": 3, "content": "hi", "upvotes": 1, "downvotes": 0 }]),
      ))
      .mount(&server)
      .await;

    let entries =
      fetch_listing(Client::new(&server.uri()), None, Category::Posts, 1)
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id(), Some(3));
  }

  #[tokio::test]
  async fn admin_listing_without_token_fails_fast() {
    let result =
      fetch_listing(Client::new("http://127.0.0.1:9"), None, Category::Pending, 1)
        .await;

    assert!(matches!(result, Err(ApiError::NotLoggedIn)));
  }
}
