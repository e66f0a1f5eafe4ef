use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::game_card::{CARD_HEIGHT, GameCard};
use crate::ui::layout::LayoutAreas;

const HELP: &str = "j/k move  Enter follow  Esc clear  J/K scroll  r refresh  l logs  f full  q quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
            draw_picker(f, layout.picker, app);
        }
        draw_schedule(f, layout.schedule, app);

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    });
    if let Err(e) = result {
        log::error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let following = match app.state.selected_team.as_deref() {
        Some(team) => Line::from(vec![
            Span::raw(" Following: "),
            Span::styled(team, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        None => Line::from(" Pick a team and press Enter"),
    };
    let title = Paragraph::new(following)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .title(" homecourt "),
        )
        .style(style);
    f.render_widget(title, header[0]);

    let status = match (&app.state.selected_team, app.state.schedule.last_refreshed) {
        (None, _) => "idle".to_string(),
        (Some(_), None) => "loading…".to_string(),
        (Some(_), Some(at)) => format!("updated {}", at.with_timezone(&Local).format("%I:%M:%S %p")),
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(status, header[1]);
}

fn draw_picker(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected_team.as_deref();
    let items: Vec<ListItem> = app
        .state
        .picker
        .teams()
        .iter()
        .map(|team| {
            let marker = if Some(team.full_name) == selected { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", team.full_name))
        })
        .collect();

    let list = List::new(items)
        .block(default_border(Color::White).title(" Teams "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.state.picker.highlighted));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Upcoming Games ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let schedule = &app.state.schedule;
    let Some(team) = app.state.selected_team.as_deref() else {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("{err}\n\n{HELP}"),
            None => format!("No team selected.\n\n{HELP}"),
        };
        f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)), inner);
        return;
    };

    if schedule.team.as_deref() != Some(team) || !schedule.has_loaded() {
        f.render_widget(Paragraph::new(format!("Loading games for {team}…")), inner);
        return;
    }
    if schedule.games.is_empty() {
        f.render_widget(Paragraph::new(format!("No upcoming games for {team}.")), inner);
        return;
    }

    let mut y = inner.y;
    for game in schedule.games.iter().skip(schedule.scroll_offset as usize) {
        if y + CARD_HEIGHT > inner.bottom() {
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        f.render_widget(GameCard { game, team }, card_area);
        y += CARD_HEIGHT;
    }
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}
