mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{FeedRequest, UiEvent};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use homecourt_api::{FeedConfig, FeedSnapshot, GameFeed, HomecourtApi};
use log::{debug, error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(cli_team) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    // Before settings, so warnings about bad env values reach the log pane.
    tui_logger::init_logger(log::LevelFilter::Trace)?;

    let mut settings = AppSettings::load();
    if cli_team.is_some() {
        settings.initial_team = cli_team;
    }

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let api = HomecourtApi::with_endpoint(settings.api_url.clone()).timeout(settings.request_timeout);
    info!("schedules from {} every {:?}", api.endpoint(), settings.refresh_interval);
    let feed = GameFeed::new(api, FeedConfig { refresh_interval: settings.refresh_interval });
    let initial_team = settings.initial_team.clone();

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (feed_req_tx, feed_req_rx) = mpsc::channel::<FeedRequest>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Follow the launch team, if any
    if let Some(team) = initial_team {
        let request = app.lock().await.select_team(&team);
        if let Some(request) = request {
            let _ = feed_req_tx.send(request).await;
        }
    }
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, feed, ui_event_rx, feed_req_tx, feed_req_rx).await;

    input_handler.abort();
    cleanup_terminal();

    Ok(())
}

/// Returns `None` when the process should exit without starting the UI,
/// otherwise the optional team given on the command line.
fn handle_cli_args() -> Option<Option<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(first) = args.first() else {
        return Some(None);
    };

    match first.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            None
        }
        "-V" | "--version" => {
            println!("homecourt {}", env!("CARGO_PKG_VERSION"));
            None
        }
        flag if flag.starts_with('-') => {
            eprintln!("Unknown argument: {flag}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => Some(Some(args.join(" "))),
    }
}

fn usage_text() -> &'static str {
    "homecourt - upcoming NBA games in your terminal

Usage:
  homecourt [TEAM]
  homecourt --help
  homecourt --version

TEAM is a full name (\"Miami Heat\") or code (MIA).

Environment:
  HOMECOURT_API_URL        Schedule endpoint (default http://localhost:8080/get)
  HOMECOURT_REFRESH_SECS   Seconds between refreshes (default 60)
  HOMECOURT_TIMEOUT_SECS   Request timeout in seconds (default 10)
  HOMECOURT_LOG            Log level: error|warn|info|debug|trace (default warn)
  HOMECOURT_TEAM           Team to follow on launch"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut feed: GameFeed<HomecourtApi>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    feed_requests: mpsc::Sender<FeedRequest>,
    mut feed_commands: mpsc::Receiver<FeedRequest>,
) {
    let mut snapshots = feed.subscribe();

    loop {
        let should_redraw = tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &feed_requests).await
            }

            Some(request) = feed_commands.recv() => {
                handle_feed_request(request, &mut feed, &app).await
            }

            Ok(()) = snapshots.changed() => {
                let snapshot = snapshots.borrow_and_update().clone();
                handle_snapshot(snapshot, &app).await
            }

            else => break,
        };

        let mut guard = app.lock().await;
        if guard.state.should_quit {
            break;
        }
        if should_redraw {
            draw::draw(&mut terminal, &mut guard);
        }
    }

    feed.stop();
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    feed_requests: &mpsc::Sender<FeedRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted | UiEvent::Resize => true,
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, feed_requests).await;
            true
        }
    }
}

async fn handle_feed_request(
    request: FeedRequest,
    feed: &mut GameFeed<HomecourtApi>,
    app: &Arc<Mutex<App>>,
) -> bool {
    debug!("feed request: {request:?}");
    match request {
        FeedRequest::Select { team } => {
            if let Err(e) = feed.start(&team) {
                error!("could not follow {team:?}: {e}");
                app.lock().await.on_feed_error(e);
            }
        }
        FeedRequest::Deselect => feed.stop(),
        FeedRequest::Refresh => feed.refresh(),
    }
    true
}

async fn handle_snapshot(snapshot: FeedSnapshot, app: &Arc<Mutex<App>>) -> bool {
    let mut guard = app.lock().await;
    guard.on_feed_updated(snapshot);
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    while !ui_events.is_closed() {
        // Bounded wait so the task notices shutdown.
        if !crossterm_event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
            tokio::task::yield_now().await;
            continue;
        }
        let Ok(event) = crossterm_event::read() else {
            continue;
        };

        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
