pub mod client;
pub mod feed;
pub mod teams;
pub mod wire;

use chrono::{DateTime, Utc};

pub use client::{ApiError, ApiResult, HomecourtApi};
pub use feed::{FeedConfig, FeedError, FeedSnapshot, GameFeed, ScheduleSource, SyncSession};
pub use teams::TeamIdentity;
pub use wire::RawGame;

// ---------------------------------------------------------------------------
// Domain types: what the front end renders, independent of the wire format
// ---------------------------------------------------------------------------

/// Which side of a game the followed team is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
    /// Upstream returned a game the team isn't playing in.
    #[default]
    Neither,
}

/// One upcoming game, resolved relative to the followed team.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGame {
    pub opponent_name: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_code: String,
    pub away_team_code: String,
    pub side: TeamSide,
    pub start_time: DateTime<Utc>,
    pub venue_name: String,
    pub lowest_ticket_price: String, // "$45.00", verbatim from upstream
    pub win_odds: Option<f64>,       // percent, 0-100
    pub home_moneyline: Option<String>,
    pub injured_players: Option<Vec<String>>,
}

impl DisplayGame {
    pub fn is_home(&self) -> bool {
        self.side == TeamSide::Home
    }

    /// Implied home win probability from the American moneyline, in percent.
    pub fn implied_home_win_percent(&self) -> Option<u8> {
        let line = self.home_moneyline.as_deref()?.trim();
        let price: f64 = line.strip_prefix('+').unwrap_or(line).parse().ok()?;
        let prob = if price <= -100.0 {
            -price / (-price + 100.0)
        } else if price >= 100.0 {
            100.0 / (price + 100.0)
        } else {
            return None;
        };
        Some((prob * 100.0).round().clamp(0.0, 100.0) as u8)
    }
}
