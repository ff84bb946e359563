//! Full-screen frame: text header on top, pixel field below.

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use crate::hud::{self, HEADER_ROWS, Span};
use crate::pixel::{PixelBuf, Rgb};
use crate::race::Race;
use crate::scene::{self, Overlay, PANEL, Panel, Viewport};

pub struct View {
    cols: u16,
    rows: u16,
    buf: PixelBuf,
}

impl View {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (pw, ph) = field_size(cols, rows);
        Self {
            cols,
            rows,
            buf: PixelBuf::new(pw, ph),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let (pw, ph) = field_size(cols, rows);
        self.buf.resize(pw, ph);
    }

    /// Queue one frame and flush it.
    pub fn draw(&mut self, out: &mut impl Write, race: &Race, frame: u64) -> io::Result<()> {
        scene::draw(&mut self.buf, race, frame);

        let overlay = match Overlay::for_race(race) {
            Overlay::None => None,
            Overlay::RoundWinner(winner) => Some(hud::round_overlay(
                winner,
                race.rounds(),
                race.rounds_remaining(),
            )),
            Overlay::SeriesResult(result) => Some(hud::final_overlay(result, race.tally())),
        };
        let panel = overlay.as_ref().map(|lines| {
            let widest = lines.iter().map(|l| hud::line_width(l)).max().unwrap_or(0);
            let view = Viewport::new(self.buf.width(), self.buf.height());
            let panel = Panel::centered(&view, widest + 4, lines.len() + 2);
            panel.draw(&mut self.buf);
            panel
        });

        for (row, line) in hud::header(race).iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(0, row as u16),
                style::ResetColor,
                terminal::Clear(ClearType::CurrentLine)
            )?;
            self.print_centered(out, row as u16, line, None)?;
        }

        self.buf.render(out, HEADER_ROWS)?;

        if let (Some(lines), Some(panel)) = (overlay, panel) {
            let top = HEADER_ROWS + panel.top_row() + 1;
            for (i, line) in lines.iter().enumerate() {
                self.print_centered(out, top + i as u16, line, Some(PANEL))?;
            }
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn print_centered(
        &self,
        out: &mut impl Write,
        row: u16,
        line: &[Span],
        bg: Option<Rgb>,
    ) -> io::Result<()> {
        if row >= self.rows {
            return Ok(());
        }
        let width = hud::line_width(line);
        let col = (self.cols as usize).saturating_sub(width) / 2;
        queue!(out, cursor::MoveTo(col as u16, row))?;
        if let Some(bg) = bg {
            queue!(out, style::SetBackgroundColor(bg.to_crossterm()))?;
        } else {
            queue!(out, style::SetBackgroundColor(CColor::Reset))?;
        }
        let mut budget = self.cols as usize;
        for span in line {
            if budget == 0 {
                break;
            }
            let text: String = span.text.chars().take(budget).collect();
            budget -= text.chars().count();
            queue!(
                out,
                style::SetForegroundColor(span.tint.to_crossterm()),
                style::Print(text)
            )?;
        }
        Ok(())
    }
}

/// Pixel dimensions of the field for a terminal of `cols × rows` cells.
fn field_size(cols: u16, rows: u16) -> (usize, usize) {
    let field_rows = rows.saturating_sub(HEADER_ROWS).max(1);
    (cols as usize, field_rows as usize * 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::Scripted;

    #[test]
    fn field_sits_below_header() {
        assert_eq!(field_size(80, 24), (80, 40));
        assert_eq!(field_size(80, 2), (80, 2));
    }

    #[test]
    fn frame_contains_header_and_overlay_text() {
        let mut race = Race::new();
        race.run_round(&mut Scripted::new(vec![0.0]));

        let mut view = View::new(100, 30);
        let mut out = Vec::new();
        view.draw(&mut out, &race, 0).expect("draw to vec");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("ELECTION PREDICTOR"));
        assert!(text.contains("Roll 1 of 10"));
        assert!(text.contains("RED wins roll #1!"));
        assert!(text.contains("9 more rolls needed!"));
    }

    #[test]
    fn narrow_terminal_truncates_text() {
        let race = Race::new();
        let mut view = View::new(10, 8);
        let mut out = Vec::new();
        view.draw(&mut out, &race, 0).expect("draw to vec");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("ELECTION P"));
        assert!(!text.contains("ELECTION PR"));
    }
}
