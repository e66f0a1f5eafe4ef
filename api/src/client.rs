use crate::teams;
use crate::wire::{InjuredPlayer, RawGame, ScheduleRequest, ScheduleResponse};
use crate::{DisplayGame, TeamSide};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/get";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the homecourt schedule service.
#[derive(Debug, Clone)]
pub struct HomecourtApi {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for HomecourtApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("homecourt/0.1 (terminal schedule viewer)")
                .build()
                .unwrap_or_default(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(status, url) => write!(f, "API error for {url}: {status}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::Status(..) => None,
        }
    }
}

impl HomecourtApi {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the upcoming games for `team_key`, in upstream order.
    ///
    /// `team_key` is normally a three-letter code; it is sent verbatim so
    /// selections the reference table doesn't know still reach the server.
    pub async fn fetch_schedule(&self, team_key: &str) -> ApiResult<Vec<RawGame>> {
        let raw: ScheduleResponse = self.post(&ScheduleRequest { team: team_key }).await?;
        Ok(raw.games)
    }

    async fn post<B, T>(&self, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint.as_str();
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url.to_owned()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire games → display games
// ---------------------------------------------------------------------------

/// Resolve one upstream game relative to the followed team.
///
/// `selected_key` is the key that was sent upstream. When it matches neither
/// side the away team is reported as the opponent.
pub fn normalize_game(selected_key: &str, raw: &RawGame) -> DisplayGame {
    let home_team_name = teams::code_to_name(&raw.home_team).to_owned();
    let away_team_name = teams::code_to_name(&raw.away_team).to_owned();

    let side = if raw.home_team.eq_ignore_ascii_case(selected_key) {
        TeamSide::Home
    } else if raw.away_team.eq_ignore_ascii_case(selected_key) {
        TeamSide::Away
    } else {
        TeamSide::Neither
    };

    let opponent_name = match side {
        TeamSide::Home => away_team_name.clone(),
        TeamSide::Away => home_team_name.clone(),
        TeamSide::Neither => away_team_name.clone(),
    };

    DisplayGame {
        opponent_name,
        home_team_name,
        away_team_name,
        home_team_code: raw.home_team.clone(),
        away_team_code: raw.away_team.clone(),
        side,
        start_time: raw.start_time,
        venue_name: raw.venue_name.clone(),
        lowest_ticket_price: raw.lowest_ticket_price.clone(),
        win_odds: raw.win_odds,
        home_moneyline: raw
            .home_team_odds
            .as_deref()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned),
        injured_players: raw
            .injured_players
            .as_ref()
            .map(|players| players.iter().map(InjuredPlayer::label).collect()),
    }
}

/// Normalize a whole schedule, preserving upstream order.
pub fn normalize_schedule(selected_key: &str, raw: &[RawGame]) -> Vec<DisplayGame> {
    raw.iter().map(|game| normalize_game(selected_key, game)).collect()
}
