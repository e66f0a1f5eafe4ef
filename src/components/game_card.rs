use chrono::Local;
use homecourt_api::{DisplayGame, TeamSide, teams};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Rows one card occupies, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// One upcoming game for the followed team.
pub struct GameCard<'a> {
    pub game: &'a DisplayGame,
    /// Followed team as displayed in the title.
    pub team: &'a str,
}

impl Widget for GameCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", title(self.team, self.game)),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let label = Style::default().fg(Color::Gray);
        let when = self
            .game
            .start_time
            .with_timezone(&Local)
            .format("%B %-d, %Y at %I:%M %p")
            .to_string();

        let lines = vec![
            Line::from(vec![Span::styled("Date:     ", label), Span::raw(when)]),
            Line::from(vec![Span::styled("Venue:    ", label), Span::raw(self.game.venue_name.as_str())]),
            Line::from(vec![
                Span::styled("Tickets:  ", label),
                Span::styled(
                    self.game.lowest_ticket_price.as_str(),
                    Style::default().fg(Color::Green),
                ),
                Span::styled("   Odds: ", label),
                Span::raw(odds_text(self.game)),
            ]),
            Line::from(vec![Span::styled("Injuries: ", label), Span::raw(injury_text(self.game))]),
            Line::from(vec![
                Span::styled("Logo:     ", label),
                Span::styled(
                    teams::name_to_logo_id(&self.game.opponent_name),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

/// "Miami Heat @ Boston Celtics" on the road, "vs" otherwise.
fn title(team: &str, game: &DisplayGame) -> String {
    let sep = match game.side {
        TeamSide::Away => "@",
        TeamSide::Home | TeamSide::Neither => "vs",
    };
    format!("{team} {sep} {}", game.opponent_name)
}

fn odds_text(game: &DisplayGame) -> String {
    if let Some(pct) = game.win_odds {
        return format!("~{pct:.0}% to win");
    }
    match (game.home_moneyline.as_deref(), game.implied_home_win_percent()) {
        (Some(line), Some(pct)) => format!("home {line} (~{pct}% home win)"),
        (Some(line), None) => format!("home {line}"),
        _ => "odds n/a".to_string(),
    }
}

fn injury_text(game: &DisplayGame) -> String {
    match game.injured_players.as_deref() {
        Some(players) if !players.is_empty() => players.join(", "),
        _ => "no reported injuries".to_string(),
    }
}
