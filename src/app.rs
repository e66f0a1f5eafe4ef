use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::FeedRequest;
use homecourt_api::{FeedError, FeedSnapshot, teams};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        let mut state = AppState::new();
        if let Some(team) = settings.initial_team.as_deref().and_then(teams::lookup) {
            state.picker.highlight(team.full_name);
        }

        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Feed handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_feed_updated(&mut self, snapshot: FeedSnapshot) {
        self.state.schedule.apply(snapshot);
    }

    pub fn on_feed_error(&mut self, err: FeedError) {
        self.state.last_error = Some(err.to_string());
    }

    // -----------------------------------------------------------------------
    // Team selection
    // -----------------------------------------------------------------------

    /// Follow the team under the picker cursor.
    pub fn select_highlighted(&mut self) -> Option<FeedRequest> {
        let team = self.state.picker.highlighted_team().full_name;
        self.select_team(team)
    }

    /// Follow `input` (full name or code). Unknown input is kept verbatim so
    /// the schedule service can still resolve it.
    pub fn select_team(&mut self, input: &str) -> Option<FeedRequest> {
        let input = input.trim();
        let team = teams::lookup(input)
            .map(|t| t.full_name.to_owned())
            .unwrap_or_else(|| input.to_owned());

        if team.is_empty() {
            return self.deselect_team();
        }
        if self.state.selected_team.as_deref() == Some(team.as_str()) {
            return None;
        }

        self.state.picker.highlight(&team);
        self.state.last_error = None;
        self.state.selected_team = Some(team.clone());
        Some(FeedRequest::Select { team })
    }

    pub fn deselect_team(&mut self) -> Option<FeedRequest> {
        self.state.selected_team.take()?;
        Some(FeedRequest::Deselect)
    }

    pub fn refresh(&self) -> Option<FeedRequest> {
        self.state.selected_team.as_ref().map(|_| FeedRequest::Refresh)
    }

    // -----------------------------------------------------------------------
    // Navigation / toggles
    // -----------------------------------------------------------------------

    pub fn picker_down(&mut self) {
        self.state.picker.move_down();
    }

    pub fn picker_up(&mut self) {
        self.state.picker.move_up();
    }

    pub fn schedule_down(&mut self) {
        self.state.schedule.scroll_down();
    }

    pub fn schedule_up(&mut self) {
        self.state.schedule.scroll_up();
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }
}
