use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::render::{Color, Surface, BACKGROUND_COLOR};
use std::io::{Stdout, Write, stdout};
use std::ops::Range;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

// Each board cell is two columns wide so cells come out roughly square
const COLS_PER_CELL: u16 = 2;

/// Terminal-backed drawing surface. Frames are built in memory and only the
/// cells that changed since the last `present` are written out.
pub struct TermManager {
    cell_size: i32,
    cols: u16,
    rows: u16,
    stdout: Stdout,
    frame: Vec<Color>,
    shown: Vec<Option<Color>>,
    active: bool,
}

impl TermManager {
    pub fn new(grid: &Grid) -> Result<Self> {
        let (cols, rows) = board_extent(grid)?;

        let (have_cols, have_rows) = terminal::size()?;
        let (need_cols, need_rows) = (cols.saturating_mul(COLS_PER_CELL).saturating_add(2), rows.saturating_add(2));
        if have_cols < need_cols || have_rows < need_rows {
            return Err(Error::TerminalTooSmall { have_cols, have_rows, need_cols, need_rows });
        }

        let cells = cols as usize * rows as usize;
        Ok(TermManager {
            cell_size: grid.cell_size(),
            cols,
            rows,
            stdout: stdout(),
            frame: vec![BACKGROUND_COLOR; cells],
            shown: vec![None; cells],
            active: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<()> {
        let width = self.cols * COLS_PER_CELL + 2;
        let height = self.rows + 2;
        let (end_x, end_y) = (width - 1, height - 1);

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Surface for TermManager {
    fn clear(&mut self, color: Color) -> Result<()> {
        self.frame.fill(color);
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> Result<()> {
        let cols = cell_span(x, w, self.cell_size, self.cols);
        for row in cell_span(y, h, self.cell_size, self.rows) {
            for col in cols.clone() {
                self.frame[row * self.cols as usize + col] = color;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for (i, color) in self.frame.iter().enumerate() {
            if self.shown[i] == Some(*color) {
                continue;
            }

            let (col, row) = ((i % self.cols as usize) as u16, (i / self.cols as usize) as u16);
            let bg = style::Color::Rgb { r: color.r, g: color.g, b: color.b };
            queue!(
                self.stdout,
                cursor::MoveTo(1 + col * COLS_PER_CELL, 1 + row),
                style::SetBackgroundColor(bg),
                style::Print("  ")
            )?;
            self.shown[i] = Some(*color);
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        // Nowhere to report a failure this late
        let _ = self.restore();
    }
}

/// Board size in cells, as terminal coordinates.
fn board_extent(grid: &Grid) -> Result<(u16, u16)> {
    let (cells_wide, cells_high) = (grid.cells_wide(), grid.cells_high());
    match (u16::try_from(cells_wide), u16::try_from(cells_high)) {
        (Ok(cols), Ok(rows)) => Ok((cols, rows)),
        _ => Err(Error::BoardTooLarge { cells_wide, cells_high }),
    }
}

/// Pixel span `[start, start + len)` to the cell indices it touches, clipped to `0..max`.
fn cell_span(start: i32, len: i32, cell_size: i32, max: u16) -> Range<usize> {
    let first = start.max(0) / cell_size;
    let end = (start + len).max(0);
    let last = (end + cell_size - 1) / cell_size;
    first.min(max as i32) as usize..last.min(max as i32) as usize
}
