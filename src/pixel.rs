use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// `self` laid over `under` at the given opacity.
    pub fn over(self, under: Rgb, alpha: f64) -> Rgb {
        let t = (alpha.clamp(0.0, 1.0) * 256.0) as u16;
        Rgb::lerp(under, self, t)
    }

    pub const fn scale(self, num: u8, den: u8) -> Rgb {
        Rgb(
            (self.0 as u16 * num as u16 / den as u16) as u8,
            (self.1 as u16 * num as u16 / den as u16) as u8,
            (self.2 as u16 * num as u16 / den as u16) as u8,
        )
    }

    pub const fn to_crossterm(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

// ── Pixel buffer with half-block rendering ──────────────────────────────────

/// Two pixels per terminal cell, stacked vertically.
pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb(0, 0, 0));
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Blend `c` over whatever is already at `(x, y)`.
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha: f64) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let i = y as usize * self.w + x as usize;
            self.px[i] = c.over(self.px[i], alpha);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Scale every pixel toward black by `num / den`.
    pub fn dim(&mut self, num: u8, den: u8) {
        for p in &mut self.px {
            *p = p.scale(num, den);
        }
    }

    /// Queue the buffer starting at terminal row `top`. Does not flush.
    pub fn render(&self, out: &mut impl Write, top: u16) -> io::Result<()> {
        let rows = self.h / 2;

        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, top + row as u16))?;
            let mut prev_fg = None;
            let mut prev_bg = None;

            for col in 0..self.w {
                let top_px = self.get(col, row * 2);
                let bot_px = self.get(col, row * 2 + 1);

                if top_px == bot_px {
                    if prev_bg != Some(top_px) {
                        queue!(out, style::SetBackgroundColor(top_px.to_crossterm()))?;
                        prev_bg = Some(top_px);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top_px) {
                        queue!(out, style::SetForegroundColor(top_px.to_crossterm()))?;
                        prev_fg = Some(top_px);
                    }
                    if prev_bg != Some(bot_px) {
                        queue!(out, style::SetBackgroundColor(bot_px.to_crossterm()))?;
                        prev_bg = Some(bot_px);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            queue!(out, style::ResetColor)?;
        }
        Ok(())
    }
}
