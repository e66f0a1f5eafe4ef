/// Raw wire types for the homecourt schedule endpoint.
/// Endpoint: POST {HOMECOURT_API_URL} with `{"Team": "<code>"}`.
///
/// The upstream keeps each game as a flat string hash, so numeric fields can
/// arrive as strings and an empty schedule is serialized as `null`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ScheduleRequest<'a> {
    #[serde(rename = "Team")]
    pub team: &'a str,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    /// Required key; `null` means "no upcoming games".
    #[serde(deserialize_with = "null_as_empty")]
    pub games: Vec<RawGame>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RawGame {
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    #[serde(rename = "venueName")]
    pub venue_name: String,
    pub lowest_ticket_price: String,
    /// Percentage 0-100. Out-of-range or non-numeric values are dropped.
    #[serde(rename = "winOdds", default, deserialize_with = "lenient_percent")]
    pub win_odds: Option<f64>,
    /// American moneyline for the home side, e.g. "-115" or "+155".
    #[serde(default)]
    pub home_team_odds: Option<String>,
    #[serde(rename = "injuredPlayers", default)]
    pub injured_players: Option<Vec<InjuredPlayer>>,
}

/// Injury entries are either bare names or the upstream's report objects.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum InjuredPlayer {
    Name(String),
    Report {
        player_name: String,
        #[serde(default)]
        status: Option<String>,
    },
}

impl InjuredPlayer {
    pub fn name(&self) -> &str {
        match self {
            InjuredPlayer::Name(name) => name,
            InjuredPlayer::Report { player_name, .. } => player_name,
        }
    }

    /// Name with the reported status, e.g. "Jimmy Butler (Out)".
    pub fn label(&self) -> String {
        match self {
            InjuredPlayer::Report { player_name, status: Some(status) } if !status.trim().is_empty() => {
                format!("{player_name} ({})", status.trim())
            }
            _ => self.name().to_owned(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let pct = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(pct.filter(|p| (0.0..=100.0).contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(body: &str) -> ScheduleResponse {
        serde_json::from_str(body).expect("schedule should parse")
    }

    #[test]
    fn request_uses_capitalized_team_key() {
        let body = serde_json::to_string(&ScheduleRequest { team: "LAL" }).unwrap();
        assert_eq!(body, r#"{"Team":"LAL"}"#);
    }

    #[test]
    fn minimal_game_parses_without_optional_fields() {
        let raw = parse(
            r#"{"games":[{"home_team":"BOS","away_team":"MIA","start_time":"2024-11-07T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45"}]}"#,
        );
        let game = &raw.games[0];
        assert_eq!(game.home_team, "BOS");
        assert_eq!(game.start_time, Utc.with_ymd_and_hms(2024, 11, 7, 20, 0, 0).unwrap());
        assert_eq!(game.win_odds, None);
        assert_eq!(game.home_team_odds, None);
        assert_eq!(game.injured_players, None);
    }

    #[test]
    fn null_games_is_an_empty_schedule() {
        assert!(parse(r#"{"games":null}"#).games.is_empty());
        assert!(parse(r#"{"games":[]}"#).games.is_empty());
    }

    #[test]
    fn missing_games_key_is_rejected() {
        assert!(serde_json::from_str::<ScheduleResponse>("{}").is_err());
        assert!(serde_json::from_str::<ScheduleResponse>(r#"{"game":[]}"#).is_err());
    }

    #[test]
    fn win_odds_accepts_numbers_and_numeric_strings() {
        let raw = parse(
            r#"{"games":[
                {"home_team":"BOS","away_team":"MIA","start_time":"2024-11-07T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45","winOdds":62.5},
                {"home_team":"BOS","away_team":"MIA","start_time":"2024-11-08T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45","winOdds":"40%"},
                {"home_team":"BOS","away_team":"MIA","start_time":"2024-11-09T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45","winOdds":"n/a"},
                {"home_team":"BOS","away_team":"MIA","start_time":"2024-11-10T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45","winOdds":140},
                {"home_team":"BOS","away_team":"MIA","start_time":"2024-11-11T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45","winOdds":null}
            ]}"#,
        );
        let odds: Vec<_> = raw.games.iter().map(|g| g.win_odds).collect();
        assert_eq!(odds, vec![Some(62.5), Some(40.0), None, None, None]);
    }

    #[test]
    fn injuries_accept_names_and_report_objects() {
        let raw = parse(
            r#"{"games":[{"home_team":"BOS","away_team":"MIA","start_time":"2024-11-07T20:00:00Z","venueName":"TD Garden","lowest_ticket_price":"45",
                "injuredPlayers":["Jimmy Butler",{"team":"BOS","player_name":"Kristaps Porzingis","status":"Out"}]}]}"#,
        );
        let names: Vec<_> = raw.games[0]
            .injured_players
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(InjuredPlayer::name)
            .collect();
        assert_eq!(names, vec!["Jimmy Butler", "Kristaps Porzingis"]);
    }

    #[test]
    fn injury_label_carries_the_reported_status() {
        let out = InjuredPlayer::Report { player_name: "Kristaps Porzingis".into(), status: Some("Out".into()) };
        assert_eq!(out.label(), "Kristaps Porzingis (Out)");

        let blank = InjuredPlayer::Report { player_name: "Jrue Holiday".into(), status: Some(" ".into()) };
        assert_eq!(blank.label(), "Jrue Holiday");
        assert_eq!(InjuredPlayer::Name("Jimmy Butler".into()).label(), "Jimmy Butler");
    }

    #[test]
    fn bad_start_time_fails_the_whole_body() {
        let body = r#"{"games":[{"home_team":"BOS","away_team":"MIA","start_time":"Saturday, Nov 16, 2024 at 3:00am","venueName":"TD Garden","lowest_ticket_price":"45"}]}"#;
        assert!(serde_json::from_str::<ScheduleResponse>(body).is_err());
    }
}
