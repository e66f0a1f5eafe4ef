use tui::layout::{Constraint, Layout, Rect, Size};
pub const HEADER_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 8;
pub const PICKER_WIDTH: u16 = 28;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: [Rect; 2],
    pub picker: Rect,
    pub schedule: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (body, logs) = if show_logs {
            let [body, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(area);
            (body, Some(logs))
        } else {
            (area, None)
        };

        if full_screen {
            return LayoutAreas {
                header: [Rect::ZERO, Rect::ZERO],
                picker: Rect::ZERO,
                schedule: body,
                logs,
            };
        }

        let [header, main] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)]).areas(body);
        let [picker, schedule] =
            Layout::horizontal([Constraint::Length(PICKER_WIDTH), Constraint::Fill(1)]).areas(main);

        LayoutAreas {
            header: Self::split_header(header),
            picker,
            schedule,
            logs,
        }
    }

    fn split_header(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area)
    }
}
