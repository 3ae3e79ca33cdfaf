use crate::{TermInt, Coords};
use crate::grid::Grid;
use crate::input::KeySource;
use std::io::{Stdout, Write, stdout};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read};

const BODY_CHAR: char = '#';
const HEAD_CHAR: char = '#';
const FOOD_CHAR: char = '*';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Body,
    Head,
    Food,
}

pub trait Canvas {
    fn clear(&mut self) -> Result<()>;

    fn draw_cell(&mut self, pos: Coords, glyph: Glyph) -> Result<()>;

    fn draw_cells(&mut self, positions: &[Coords], glyph: Glyph) -> Result<()> {
        for pos in positions {
            self.draw_cell(*pos, glyph)?;
        }
        Ok(())
    }

    fn move_cursor_home(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }
}

impl Canvas for TermManager {
    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        Ok(())
    }

    fn draw_cell(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        let (col, row) = screen_cell(pos);
        let styled = match glyph {
            Glyph::Body => style::style(BODY_CHAR).with(Color::Red).on(Color::White),
            Glyph::Head => style::style(HEAD_CHAR).with(Color::White).on(Color::Red),
            Glyph::Food => style::style(FOOD_CHAR).on(Color::Yellow),
        };

        queue!(self.stdout, cursor::MoveTo(col, row), style::PrintStyledContent(styled))
            .context("Error drawing cell")?;
        Ok(())
    }

    fn move_cursor_home(&mut self) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, 0)).context("Error moving cursor")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

/// Grid positions are 1-indexed like an ANSI cursor address, where a 0
/// lands on the first row or column as well.
fn screen_cell(pos: Coords) -> (TermInt, TermInt) {
    (pos.0.saturating_sub(1), pos.1.saturating_sub(1))
}

/// Blocking key reader over crossterm's event stream. Raw mode must be on so
/// keys arrive one at a time without echo.
pub struct RawKeys;

impl KeySource for RawKeys {
    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(ev);
            }
        }
    }
}
