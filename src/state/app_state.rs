use chrono::{DateTime, Utc};
use homecourt_api::{DisplayGame, FeedSnapshot, TeamIdentity, teams};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Team picker
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PickerState {
    /// Index into `teams::all_teams()` under the cursor.
    pub highlighted: usize,
}

impl PickerState {
    pub fn teams(&self) -> &'static [TeamIdentity] {
        teams::all_teams()
    }

    pub fn highlighted_team(&self) -> &'static TeamIdentity {
        let teams = self.teams();
        &teams[self.highlighted.min(teams.len() - 1)]
    }

    pub fn move_down(&mut self) {
        self.highlighted = (self.highlighted + 1) % self.teams().len();
    }

    pub fn move_up(&mut self) {
        let len = self.teams().len();
        self.highlighted = (self.highlighted + len - 1) % len;
    }

    /// Put the cursor on `full_name` if the table knows it.
    pub fn highlight(&mut self, full_name: &str) {
        if let Some(idx) = self.teams().iter().position(|t| t.full_name == full_name) {
            self.highlighted = idx;
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule for the followed team
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub team: Option<String>,
    pub games: Arc<Vec<DisplayGame>>,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub revision: u64,
    pub scroll_offset: u16,
}

impl ScheduleState {
    /// Take a published snapshot. Older revisions are ignored.
    pub fn apply(&mut self, snapshot: FeedSnapshot) {
        if snapshot.revision < self.revision {
            return;
        }
        if snapshot.team != self.team {
            self.scroll_offset = 0;
        }
        self.team = snapshot.team;
        self.games = snapshot.games;
        self.last_refreshed = snapshot.last_refreshed;
        self.revision = snapshot.revision;
    }

    /// True once the current team has had at least one successful fetch.
    pub fn has_loaded(&self) -> bool {
        self.last_refreshed.is_some()
    }

    pub fn scroll_down(&mut self) {
        let max = self.games.len().saturating_sub(1) as u16;
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    /// Team the feed is following; `None` when nothing is selected.
    pub selected_team: Option<String>,
    pub picker: PickerState,
    pub schedule: ScheduleState,
    pub show_logs: bool,
    pub should_quit: bool,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(team: &str, revision: u64, games: usize) -> FeedSnapshot {
        let game = DisplayGame {
            opponent_name: "Boston Celtics".into(),
            home_team_name: "Boston Celtics".into(),
            away_team_name: "Miami Heat".into(),
            home_team_code: "BOS".into(),
            away_team_code: "MIA".into(),
            side: homecourt_api::TeamSide::Away,
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            venue_name: "TD Garden".into(),
            lowest_ticket_price: "45".into(),
            win_odds: None,
            home_moneyline: None,
            injured_players: None,
        };
        FeedSnapshot {
            team: Some(team.into()),
            games: Arc::new(vec![game; games]),
            revision,
            last_refreshed: Some(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    #[test]
    fn picker_wraps_in_both_directions() {
        let mut picker = PickerState::default();
        picker.move_up();
        assert_eq!(picker.highlighted_team().full_name, "Washington Wizards");
        picker.move_down();
        assert_eq!(picker.highlighted_team().full_name, "Atlanta Hawks");
    }

    #[test]
    fn picker_highlights_known_teams_only() {
        let mut picker = PickerState::default();
        picker.highlight("Miami Heat");
        assert_eq!(picker.highlighted_team().code, "MIA");
        picker.highlight("Seattle SuperSonics");
        assert_eq!(picker.highlighted_team().code, "MIA");
    }

    #[test]
    fn schedule_ignores_older_revisions() {
        let mut schedule = ScheduleState::default();
        schedule.apply(snapshot("Miami Heat", 4, 3));
        schedule.apply(snapshot("Miami Heat", 2, 1));
        assert_eq!(schedule.games.len(), 3);
        assert_eq!(schedule.revision, 4);
    }

    #[test]
    fn schedule_resets_scroll_on_team_change() {
        let mut schedule = ScheduleState::default();
        schedule.apply(snapshot("Miami Heat", 1, 5));
        schedule.scroll_down();
        schedule.scroll_down();
        assert_eq!(schedule.scroll_offset, 2);

        schedule.apply(snapshot("Miami Heat", 2, 5));
        assert_eq!(schedule.scroll_offset, 2);

        schedule.apply(snapshot("Boston Celtics", 3, 5));
        assert_eq!(schedule.scroll_offset, 0);
    }

    #[test]
    fn scrolling_stays_within_the_game_list() {
        let mut schedule = ScheduleState::default();
        schedule.apply(snapshot("Miami Heat", 1, 2));
        for _ in 0..5 {
            schedule.scroll_down();
        }
        assert_eq!(schedule.scroll_offset, 1);
        schedule.scroll_up();
        schedule.scroll_up();
        assert_eq!(schedule.scroll_offset, 0);
    }
}
