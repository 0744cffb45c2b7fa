use std::time::Duration;

use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};
use shift48_engine::{GameSession, Position, PowerUpKind, SessionState};

use crate::ui::widgets::{BoardDisplay, color, style};

const SIDE_PANEL_WIDTH: u16 = 30;
const NOTIFICATION_LINES: u16 = 4;

fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Renders the full in-game view: board, stats panel, power-up panel, and
/// recent notifications, with a popup when the game is over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    cursor: Option<Position>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            cursor: None,
        }
    }

    pub fn cursor(self, cursor: Option<Position>) -> Self {
        Self { cursor, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let snapshot = self.session.snapshot();
        let border_style = match snapshot.state {
            SessionState::Playing if self.cursor.is_some() => Style::new().fg(color::YELLOW),
            SessionState::GameOver => Style::new().fg(color::RED),
            _ => Style::new().fg(color::WHITE),
        };
        let panel_block = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::symmetric(1, 0))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(snapshot.board)
            .cursor(self.cursor)
            .block(panel_block("SHIFT48"));

        let stats_lines = {
            let time = match snapshot.time_remaining {
                Some(remaining) => format!("Time left: {}", format_clock(remaining)),
                None => format!("Time: {}", format_clock(self.session.elapsed())),
            };
            vec![
                Line::from(format!("Score: {}", snapshot.stats.score())),
                Line::from(format!("Best tile: {}", snapshot.stats.highest_tile())),
                Line::from(format!("Moves: {}", snapshot.stats.moves())),
                Line::from(format!("Merges: {}", snapshot.stats.merges())),
                Line::from(format!("Difficulty: {}", snapshot.difficulty)),
                Line::from(time),
            ]
        };

        let power_up_lines = {
            let mut lines = vec![Line::from(format!(
                "Undos left: {}",
                snapshot.undos_remaining
            ))];
            for kind in PowerUpKind::ALL {
                lines.push(Line::from(format!(
                    "{}: {}",
                    kind.label(),
                    snapshot.power_ups.remaining_uses(kind)
                )));
            }
            for effect in snapshot.power_ups.active_effects() {
                lines.push(Line::from(format!(
                    "x{} for {} more moves",
                    effect.factor(),
                    effect.remaining_moves()
                )));
            }
            lines
        };

        let notification_lines = snapshot
            .notifications
            .iter()
            .rev()
            .take(NOTIFICATION_LINES as usize)
            .map(|n| Line::from(n.text.clone()))
            .collect::<Vec<_>>();

        #[expect(clippy::cast_possible_truncation)]
        let stats_height = stats_lines.len() as u16 + 2;
        #[expect(clippy::cast_possible_truncation)]
        let power_up_height = power_up_lines.len() as u16 + 2;

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(SIDE_PANEL_WIDTH),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [stats_area, power_up_area, notification_area] = Layout::vertical([
            Constraint::Length(stats_height),
            Constraint::Length(power_up_height),
            Constraint::Length(NOTIFICATION_LINES + 2),
        ])
        .spacing(1)
        .areas(side_column);

        (&game_board).render(board_area, buf);
        Paragraph::new(Text::from(stats_lines))
            .block(panel_block("STATS"))
            .render(stats_area, buf);
        Paragraph::new(Text::from(power_up_lines))
            .block(panel_block("POWER-UPS"))
            .render(power_up_area, buf);
        Paragraph::new(Text::from(notification_lines))
            .block(panel_block("EVENTS"))
            .render(notification_area, buf);

        if snapshot.state.is_game_over() {
            let popup_style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(popup_style);
            let text = Text::styled("GAME OVER!!", popup_style).centered();
            let popup_area = board_area.centered(
                Constraint::Length(game_board.width()),
                Constraint::Length(3),
            );
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
