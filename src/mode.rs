use super::*;

pub(crate) enum Mode {
  Comments(CommentView),
  List(ListView<ListEntry>),
}

impl Mode {
  fn handle_comments_key(
    view: &mut CommentView,
    key: KeyEvent,
    page: usize,
  ) -> Command {
    let modifiers = key.modifiers;

    if let Some(picker) = view.picker.as_mut() {
      return match key.code {
        KeyCode::Esc => Command::PickerCancel,
        KeyCode::Enter => Command::PickerConfirm,
        KeyCode::Down | KeyCode::Char('j') => {
          picker.select_next();
          Command::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
          picker.select_previous();
          Command::None
        }
        _ => Command::None,
      };
    }

    match key.code {
      KeyCode::Char('q' | 'Q') => Command::Quit,
      KeyCode::Esc => Command::CloseComments,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Char('c') => Command::NewComment,
      KeyCode::Char('r') => Command::ReplyComment,
      KeyCode::Char('R') => Command::Refresh,
      KeyCode::Char('e') => Command::EditComment,
      KeyCode::Char('x') => Command::Delete,
      KeyCode::Down | KeyCode::Char('j') => {
        view.select_next();
        Command::None
      }
      KeyCode::Up | KeyCode::Char('k') => {
        view.select_previous();
        Command::None
      }
      KeyCode::PageDown => {
        view.page_down(page);
        Command::None
      }
      KeyCode::PageUp => {
        view.page_up(page);
        Command::None
      }
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        view.page_down(page);
        Command::None
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        view.page_up(page);
        Command::None
      }
      KeyCode::Left | KeyCode::Char('h') => {
        view.collapse_selected();
        Command::None
      }
      KeyCode::Right | KeyCode::Char('l') => {
        view.expand_selected();
        Command::None
      }
      KeyCode::Enter | KeyCode::Char(' ') => {
        view.toggle_selected();
        Command::None
      }
      KeyCode::Home => {
        view.select_index_at(0);
        Command::None
      }
      KeyCode::End => {
        let (visible, _) = view.visible_with_selection();

        if !visible.is_empty() {
          view.select_index_at(visible.len().saturating_sub(1));
        }

        Command::None
      }
      _ => Command::None,
    }
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Command {
    match self {
      Mode::Comments(view) => Self::handle_comments_key(view, key, page),
      Mode::List(_) => Self::handle_list_key(key),
    }
  }

  fn handle_list_key(key: KeyEvent) -> Command {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Left | KeyCode::Char('h') => Command::SwitchTabLeft,
      KeyCode::Right | KeyCode::Char('l') => Command::SwitchTabRight,
      KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
      KeyCode::PageDown => Command::PageDown,
      KeyCode::PageUp => Command::PageUp,
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        Command::PageDown
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        Command::PageUp
      }
      KeyCode::Home => Command::SelectFirst,
      KeyCode::End => Command::SelectLast,
      KeyCode::Enter => Command::OpenComments,
      KeyCode::Char('r') => Command::Refresh,
      KeyCode::Char('+') => Command::Vote(Vote::Up),
      KeyCode::Char('-') => Command::Vote(Vote::Down),
      KeyCode::Char('p') => Command::NewPost,
      KeyCode::Char('i') => Command::UploadImage,
      KeyCode::Char('!') => Command::ReportPost,
      KeyCode::Char('s') => Command::LookupPostState,
      KeyCode::Char('S') => Command::LookupReportState,
      KeyCode::Char('a') => Command::AdminLogin,
      KeyCode::Char('L') => Command::AdminLogout,
      KeyCode::Char('y') => Command::Approve,
      KeyCode::Char('n') => Command::Reject,
      KeyCode::Char('u') => Command::Reaudit,
      KeyCode::Char('m') => Command::EditPost,
      KeyCode::Char('x') => Command::Delete,
      KeyCode::Char('o') => Command::OpenPicture,
      KeyCode::Char('A') => Command::ToggleAudit,
      KeyCode::Char('B') => Command::DownloadBackup,
      KeyCode::Char('R') => Command::RestoreBackup,
      KeyCode::Char('I') => Command::InitBackend,
      _ => Command::None,
    }
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    match self {
      Mode::Comments(view) => view.offset = offset,
      Mode::List(view) => view.set_offset(offset),
    }
  }
}
