use crate::app::App;
use crate::state::messages::FeedRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    feed_requests: &mpsc::Sender<FeedRequest>,
) {
    let mut guard = app.lock().await;

    let request = match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            guard.quit();
            None
        }

        // Team picker
        (Char('j') | KeyCode::Down, _) => {
            guard.picker_down();
            None
        }
        (Char('k') | KeyCode::Up, _) => {
            guard.picker_up();
            None
        }
        (KeyCode::Enter, _) => guard.select_highlighted(),
        (KeyCode::Backspace | KeyCode::Esc, _) => guard.deselect_team(),

        // Schedule
        (Char('J') | KeyCode::PageDown, _) => {
            guard.schedule_down();
            None
        }
        (Char('K') | KeyCode::PageUp, _) => {
            guard.schedule_up();
            None
        }
        (Char('r'), _) => guard.refresh(),

        // Global
        (Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (Char('l'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    drop(guard);
    if let Some(request) = request {
        let _ = feed_requests.send(request).await;
    }
}
