use super::*;

pub(crate) struct HelpView {
  message_backup: Option<String>,
  scroll: u16,
  visible: bool,
}

impl HelpView {
  pub(crate) fn draw(&self, frame: &mut Frame, admin: bool) {
    if !self.visible {
      return;
    }

    let text = Self::text(admin);

    let area = Self::help_area(frame.area(), &text);

    frame.render_widget(Clear, area);

    let title = if admin {
      format!("{HELP_TITLE} (admin)")
    } else {
      HELP_TITLE.to_string()
    };

    let help = Paragraph::new(text)
      .block(Block::default().title(title).borders(Borders::ALL))
      .scroll((self.scroll, 0));

    frame.render_widget(help, area);
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('?') | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('q' | 'Q') => Command::Quit,
      KeyCode::Down | KeyCode::Char('j') => {
        self.scroll = self.scroll.saturating_add(1);
        Command::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.scroll = self.scroll.saturating_sub(1);
        Command::None
      }
      _ => Command::None,
    }
  }

  fn help_area(area: Rect, text: &str) -> Rect {
    let (line_count, max_line_width) =
      text.lines().fold((0usize, 0usize), |(count, width), line| {
        (count.saturating_add(1), width.max(line.chars().count()))
      });

    let desired_width =
      u16::try_from(max_line_width.saturating_add(2)).unwrap_or(u16::MAX);

    let desired_height =
      u16::try_from(line_count.saturating_add(2)).unwrap_or(u16::MAX);

    let width = desired_width.clamp(1, area.width.saturating_sub(2).max(1));
    let height = desired_height.clamp(1, area.height.saturating_sub(2).max(1));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(x, y, width, height)
  }

  pub(crate) fn hide(&mut self, message: &mut String) {
    if !self.visible {
      return;
    }

    *message = self
      .message_backup
      .take()
      .unwrap_or_else(|| LIST_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  pub(crate) fn new() -> Self {
    Self {
      message_backup: None,
      scroll: 0,
      visible: false,
    }
  }

  pub(crate) fn show(&mut self, message: &mut String) {
    if self.visible {
      return;
    }

    self.message_backup = Some(message.clone());

    *message = HELP_STATUS.into();

    self.scroll = 0;
    self.visible = true;
  }

  /// Admin key bindings are only listed once logged in.
  fn text(admin: bool) -> String {
    if admin {
      format!("{HELP_TEXT}\n{ADMIN_HELP_TEXT}")
    } else {
      HELP_TEXT.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn show_and_hide_restore_the_status_line() {
    let mut help = HelpView::new();
    let mut message = String::from("before");

    help.show(&mut message);

    assert!(help.is_visible());
    assert_eq!(message, HELP_STATUS);

    help.hide(&mut message);

    assert!(!help.is_visible());
    assert_eq!(message, "before");
  }

  #[test]
  fn admin_section_is_only_listed_for_admins() {
    assert!(!HelpView::text(false).contains(ADMIN_HELP_TEXT));
    assert!(HelpView::text(true).contains(ADMIN_HELP_TEXT));
  }

  #[test]
  fn area_fits_inside_small_terminals() {
    let area = HelpView::help_area(Rect::new(0, 0, 20, 10), HELP_TEXT);

    assert!(area.width <= 18);
    assert!(area.height <= 8);
  }

  #[test]
  fn scrolling_stops_at_the_top() {
    let mut help = HelpView::new();

    assert_eq!(
      help.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
      Command::None
    );
    assert_eq!(help.scroll, 0);

    help.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
    assert_eq!(help.scroll, 1);
  }
}
