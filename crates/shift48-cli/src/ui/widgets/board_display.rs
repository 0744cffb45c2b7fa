use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block, Paragraph, Widget},
};
use shift48_engine::{Board, Position};

use crate::ui::widgets::style;

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

/// Renders the tile grid, one bordered cell per board position.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    cursor: Option<Position>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            cursor: None,
            block: None,
        }
    }

    /// Highlights one cell, used while aiming the clear-tile power-up.
    pub fn cursor(self, cursor: Option<Position>) -> Self {
        Self { cursor, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn grid_size(&self) -> u16 {
        self.board.size() as u16
    }

    pub fn width(&self) -> u16 {
        self.grid_size() * CELL_WIDTH + u16::from(self.block.is_some()) * 2
    }

    pub fn height(&self) -> u16 {
        self.grid_size() * CELL_HEIGHT + u16::from(self.block.is_some()) * 2
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for (row, cells) in self.board.rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                #[expect(clippy::cast_possible_truncation)]
                let cell_area = Rect {
                    x: inner.x + col as u16 * CELL_WIDTH,
                    y: inner.y + row as u16 * CELL_HEIGHT,
                    width: CELL_WIDTH,
                    height: CELL_HEIGHT,
                };
                if !inner.contains(cell_area.as_position()) {
                    continue;
                }

                let border_style = if self.cursor == Some(Position::new(row, col)) {
                    style::CURSOR
                } else if value == 0 {
                    style::EMPTY
                } else {
                    style::tile(value)
                };
                let cell_block = Block::bordered().border_style(border_style);
                let text_area = cell_block.inner(cell_area);
                cell_block.render(cell_area, buf);

                if value != 0 {
                    Paragraph::new(value.to_string())
                        .style(style::tile(value))
                        .centered()
                        .render(text_area, buf);
                }
            }
        }
    }
}
