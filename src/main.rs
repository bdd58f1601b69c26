use {
  admin::AdminClient,
  admin_post::{AdminPost, PostAction},
  anyhow::{Context, anyhow},
  app::App,
  article::{Article, Vote},
  category::Category,
  client::{Client, multipart_file},
  command::Command,
  command_dispatch::CommandDispatch,
  comment::{Comment, CommentPatch, CommentReceipt, NewComment},
  comment_entry::CommentEntry,
  comment_store::CommentStore,
  comment_tree::{CommentNode, CommentTree},
  comment_view::CommentView,
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  depth_resolver::DepthResolver,
  effect::{Effect, StateTarget},
  error::ApiError,
  event::Event,
  futures::future::join,
  help_view::HelpView,
  init_payload::InitPayload,
  list_entry::{ListEntry, Subject},
  list_view::ListView,
  markup::render_markdown,
  mode::Mode,
  parent_picker::ParentPicker,
  pending_comments::PendingComments,
  pic_link::PicLink,
  prompt::{Confirmation, InitStep, Prompt, PromptKind},
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  report::{NewReport, PendingReport, ReportDecision, ReportReceipt},
  reqwest::{
    RequestBuilder, Response, StatusCode,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    multipart::{Form, Part},
  },
  review::{ReviewState, SubmitOutcome, SubmitStatus},
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::{Value, json},
  session::Session,
  state::State,
  statics::{ApiStatus, Statics},
  std::{
    backtrace::BacktraceStatus,
    borrow::Cow,
    collections::{HashMap, HashSet},
    env,
    fs::{self, OpenOptions},
    io::{self, IsTerminal, Stdout},
    iter, mem,
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  tab::Tab,
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::AbortHandle,
  },
  tracing::{debug, info, warn},
  tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
  },
  transient_message::{Tone, TransientMessage},
  url::Url,
  utils::{
    absolute_url, content_disposition_filename, deserialize_null_as_zero,
    deserialize_optional_string, format_votes, truncate, wrap_text,
  },
};

mod admin;
mod admin_post;
mod app;
mod article;
mod category;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_entry;
mod comment_store;
mod comment_tree;
mod comment_view;
mod config;
mod depth_resolver;
mod effect;
mod error;
mod event;
mod help_view;
mod init_payload;
mod list_entry;
mod list_view;
mod markup;
mod mode;
mod parent_picker;
mod pending_comments;
mod pic_link;
mod prompt;
mod report;
mod review;
mod session;
mod state;
mod statics;
mod tab;
mod transient_message;
mod utils;

const LIST_STATUS: &str = "↑/k ↓/j move • ←/h →/l tabs • enter comments • +/- vote • p post • i image • ! report • q quit • ? help";

const COMMENTS_STATUS: &str = "↑/k ↓/j move • ←/h collapse • →/l expand • c comment • r reply • R refresh • esc back • ? help";

const PICKER_STATUS: &str =
  "↑/k ↓/j choose the new parent • enter confirm • esc cancel";

const PROMPT_STATUS: &str = " enter submit • alt+enter newline • esc cancel ";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help, j/k to scroll";

const LOADING_ENTRIES_STATUS: &str = "Loading entries...";
const LOADING_COMMENTS_STATUS: &str = "Loading comments...";

const BASE_INDENT: &str = " ";

const PREVIEW_LINES: usize = 3;

const HELP_TEXT: &str = "\
Navigation:
  ← / h   previous tab
  → / l   next tab
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first item
  end     jump to last item
  scroll  keep going past the end to load older posts

Posts:
  enter   view comments for the selected post
  r       reload the current tab
  + / -   upvote or downvote (once per post)
  p       write a post (Markdown, draft is kept)
  i       upload an image and link it in the draft
  !       report the selected post
  s       look up the review state of a post
  S       look up the review state of a report
  a       log in as admin
  I       initialize a fresh backend
  q       quit
  ?       toggle this help

Comments:
  ↑ / k   move selection up
  ↓ / j   move selection down
  ← / h   collapse or go to parent
  → / l   expand or go to first child
  enter   toggle collapse or expand
  c       write a top-level comment
  r       reply to the selected comment
  R       reload comments
  esc     return to the post list

Prompts:
  enter      submit
  alt+enter  new line in longer text
  esc        cancel
";

const ADMIN_HELP_TEXT: &str = "\
Admin:
  y       approve post or report
  n       reject pending post or dismiss report
  u       send a post back to review
  m       edit the selected post
  x       delete post, image or comment
  o       open the selected image in your browser
  e       edit comment nickname, parent and content
  A       switch post audit on or off
  B       download a backup
  R       restore a backup (on a list tab)
  L       log out
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Logs go to a file since the terminal belongs to the UI. The filter is read
/// from `WHISPER_LOG`.
fn initialize_tracing(log_file: &Path) -> Result {
  if let Some(parent) = log_file.parent() {
    fs::create_dir_all(parent).with_context(|| {
      format!("could not create log directory {}", parent.display())
    })?;
  }

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| {
      format!("could not open log file {}", log_file.display())
    })?;

  let filter = EnvFilter::try_from_env("WHISPER_LOG")
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file)),
    )
    .try_init()
    .map_err(|error| anyhow!("could not initialize logging: {error}"))
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let config = Config::load().context("could not load configuration")?;

  initialize_tracing(&config.log_file)?;

  info!(api = %config.api_base_url, "starting");

  let session = Session::load(config.session_file.clone()).with_context(|| {
    format!(
      "could not load session from {}",
      config.session_file.display()
    )
  })?;

  let client = Client::new(&config.api_base_url);

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, session, &config);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  info!("exiting");

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
