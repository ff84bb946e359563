//! Draws the race field into a [`PixelBuf`].

use crate::motion::{CANVAS_HEIGHT, CANVAS_WIDTH, CENTER_Y, END_X, Position};
use crate::pixel::{PixelBuf, Rgb};
use crate::race::{Race, RoundStatus};
use crate::tally::Side;

// ── Colors ──────────────────────────────────────────────────────────────────

pub const FIELD_TOP: Rgb = Rgb(55, 65, 81);
pub const FIELD_BOT: Rgb = Rgb(17, 24, 39);
pub const RED: Rgb = Rgb(239, 68, 68);
pub const BLUE: Rgb = Rgb(59, 130, 246);
pub const GOLD: Rgb = Rgb(250, 204, 21);
pub const BALLOT: Rgb = Rgb(252, 211, 77);
pub const BALLOT_DARK: Rgb = Rgb(180, 140, 30);
pub const PANEL: Rgb = Rgb(31, 41, 55);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const MUTED: Rgb = Rgb(156, 163, 175);

const LINE_ALPHA: f64 = 0.5;

pub fn side_color(side: Side) -> Rgb {
    match side {
        Side::Red => RED,
        Side::Blue => BLUE,
    }
}

/// Maps logical canvas units onto the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pw: usize,
    pub ph: usize,
}

impl Viewport {
    pub fn new(pw: usize, ph: usize) -> Self {
        Self { pw, ph }
    }

    fn sx(&self) -> f64 {
        self.pw as f64 / CANVAS_WIDTH
    }

    fn sy(&self) -> f64 {
        self.ph as f64 / CANVAS_HEIGHT
    }

    pub fn to_px(&self, p: Position) -> (i32, i32) {
        ((p.x * self.sx()) as i32, (p.y * self.sy()) as i32)
    }

    /// A logical length in pixels, never less than `min`.
    fn len_px(&self, units: f64, min: i32) -> i32 {
        ((units * self.sx().min(self.sy())) as i32).max(min)
    }
}

/// Which overlay, if any, covers the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    RoundWinner(Side),
    SeriesResult(Side),
}

impl Overlay {
    pub fn for_race(race: &Race) -> Overlay {
        match (race.final_result(), race.winner()) {
            (Some(result), _) => Overlay::SeriesResult(result),
            (None, Some(winner)) => Overlay::RoundWinner(winner),
            (None, None) => Overlay::None,
        }
    }
}

pub fn draw(buf: &mut PixelBuf, race: &Race, frame: u64) {
    let view = Viewport::new(buf.width(), buf.height());
    draw_field(buf, &view);
    draw_lines(buf, &view);
    draw_corners(buf, &view);
    draw_trail(buf, &view, race);
    if race.status() != RoundStatus::Waiting {
        draw_marker(buf, &view, race.position(), frame);
    }

    match Overlay::for_race(race) {
        Overlay::None => {}
        Overlay::RoundWinner(_) => buf.dim(7, 10),
        Overlay::SeriesResult(_) => buf.dim(3, 10),
    }
}

fn draw_field(buf: &mut PixelBuf, view: &Viewport) {
    for y in 0..view.ph {
        let t = (y as u32 * 256 / view.ph.max(1) as u32) as u16;
        let c = Rgb::lerp(FIELD_TOP, FIELD_BOT, t);
        for x in 0..view.pw {
            buf.set(x as i32, y as i32, c);
        }
    }
}

fn draw_lines(buf: &mut PixelBuf, view: &Viewport) {
    let (_, cy) = view.to_px(Position { x: 0.0, y: CENTER_Y });
    for x in 0..view.pw as i32 {
        buf.blend(x, cy, GOLD, LINE_ALPHA);
    }

    let (fx, _) = view.to_px(Position { x: END_X, y: 0.0 });
    for y in 0..view.ph as i32 {
        buf.blend(fx, y, GOLD, LINE_ALPHA);
    }
}

/// Side badges in the top-right and bottom-right corners.
fn draw_corners(buf: &mut PixelBuf, view: &Viewport) {
    let size = view.len_px(48.0, 2);
    let inset = view.len_px(16.0, 1);
    let x = view.pw as i32 - inset - size;
    buf.fill_rect(x, inset, size, size, RED);
    buf.fill_rect(x, view.ph as i32 - inset - size, size, size, BLUE);
}

fn draw_trail(buf: &mut PixelBuf, view: &Viewport, race: &Race) {
    let dot = view.len_px(8.0, 1);
    for (p, alpha) in race.trail().faded() {
        let (x, y) = view.to_px(p);
        let c = side_color(p.side());
        for dy in 0..dot {
            for dx in 0..dot {
                buf.blend(x - dot / 2 + dx, y - dot / 2 + dy, c, alpha);
            }
        }
    }
}

/// The ballot box, bobbing a little from frame to frame.
fn draw_marker(buf: &mut PixelBuf, view: &Viewport, at: Position, frame: u64) {
    let size = view.len_px(48.0, 3);
    let bob = ((frame as f64 * 0.25).sin().abs() * size as f64 * 0.25) as i32;
    let (cx, cy) = view.to_px(at);
    let x = cx - size / 2;
    let y = cy - size / 2 - bob;

    buf.fill_rect(x, y, size, size, BALLOT);
    if size >= 5 {
        buf.fill_rect(x + 1, y + 1, size - 2, size - 2, BALLOT_DARK);
        buf.fill_rect(x + 2, y + 2, size - 4, size - 4, BALLOT);
    }
    // slot
    buf.fill_rect(x + size / 4, y, (size / 2).max(1), 1, BALLOT_DARK);
}

/// Panel rectangle in pixels, centered on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Panel {
    /// A panel of `cols × rows` terminal cells centered in the field.
    pub fn centered(view: &Viewport, cols: usize, rows: usize) -> Panel {
        let w = cols.min(view.pw) as i32;
        let h = (rows * 2).min(view.ph) as i32;
        let x = (view.pw as i32 - w) / 2;
        // keep the top on an even pixel row so the panel fills whole cells
        let y = ((view.ph as i32 - h) / 2) & !1;
        Panel { x, y, w, h }
    }

    pub fn draw(&self, buf: &mut PixelBuf) {
        buf.fill_rect(self.x - 1, self.y, self.w + 2, self.h, GOLD);
        buf.fill_rect(self.x, self.y, self.w, self.h, PANEL);
    }

    /// Terminal cell row of the panel's top edge, relative to the field.
    pub fn top_row(&self) -> u16 {
        (self.y / 2) as u16
    }
}
