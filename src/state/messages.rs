use crossterm::event::KeyEvent;

/// Commands for the schedule feed, which is owned by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRequest {
    Select { team: String },
    Deselect,
    Refresh,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
