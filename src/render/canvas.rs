//! RGB8 pixel buffer with the handful of primitives the plot needs.

use crate::render::font::{self, CHAR_W, GLYPH_H, GLYPH_W};
use crate::render::palette::Rgb;

/// Pixel rectangle, `x0..x1` by `y0..y1` (exclusive ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

pub struct Canvas {
    width: u32,
    height: u32,
    buf: Vec<u8>,
    clip: Rect,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let mut buf = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            buf.extend_from_slice(&background);
        }
        Self {
            width,
            height,
            buf,
            clip: Rect::new(0, 0, width as i32, height as i32),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.buf
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.buf[idx], self.buf[idx + 1], self.buf[idx + 2]])
    }

    /// Restrict drawing to `rect` (intersected with the canvas).
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = Rect::new(
            rect.x0.max(0),
            rect.y0.max(0),
            rect.x1.min(self.width as i32),
            rect.y1.min(self.height as i32),
        );
    }

    pub fn reset_clip(&mut self) {
        self.clip = Rect::new(0, 0, self.width as i32, self.height as i32);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if self.clip.contains(x, y) {
            let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
            self.buf[idx..idx + 3].copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// One-pixel outline drawn just inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.x1 <= rect.x0 || rect.y1 <= rect.y0 {
            return;
        }
        self.draw_hline(rect.x0, rect.x1, rect.y0, color);
        self.draw_hline(rect.x0, rect.x1, rect.y1 - 1, color);
        self.draw_vline(rect.x0, rect.y0, rect.y1, color);
        self.draw_vline(rect.x1 - 1, rect.y0, rect.y1, color);
    }

    pub fn draw_hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgb) {
        for x in x0..x1 {
            self.set_pixel(x, y, color);
        }
    }

    pub fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgb) {
        for y in y0..y1 {
            self.set_pixel(x, y, color);
        }
    }

    /// Horizontal text with its top-left corner at (x, y), each font pixel
    /// drawn as a `scale`x`scale` block.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Rgb) {
        let s = scale as i32;
        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = font::glyph(ch) else { continue };
            let cx = x + (i as u32 * CHAR_W) as i32 * s;
            for (row, &bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0x10 >> col) != 0 {
                        let px = cx + col as i32 * s;
                        let py = y + row as i32 * s;
                        self.fill_rect(Rect::new(px, py, px + s, py + s), color);
                    }
                }
            }
        }
    }

    /// Horizontal text centered on (cx, cy).
    pub fn draw_text_centered(&mut self, cx: i32, cy: i32, text: &str, scale: u32, color: Rgb) {
        let (w, h) = text_extent(text, scale);
        self.draw_text(cx - w / 2, cy - h / 2, text, scale, color);
    }

    /// Text rotated 90 degrees counter-clockwise (reading bottom to top),
    /// centered on (cx, cy). `bold` doubles every stroke along the baseline.
    pub fn draw_text_vertical(
        &mut self,
        cx: i32,
        cy: i32,
        text: &str,
        scale: u32,
        bold: bool,
        color: Rgb,
    ) {
        let s = scale as i32;
        let (along, across) = text_extent(text, scale);
        // Unrotated (u, v) maps to screen (left + v, bottom - u).
        let left = cx - across / 2;
        let bottom = cy + along / 2;
        let passes: &[i32] = if bold { &[0, 1] } else { &[0] };

        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = font::glyph(ch) else { continue };
            let u0 = (i as u32 * CHAR_W) as i32 * s;
            for (row, &bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0x10 >> col) == 0 {
                        continue;
                    }
                    let u = u0 + col as i32 * s;
                    let v = row as i32 * s;
                    for &shift in passes {
                        let px = left + v;
                        let py = bottom - u - shift - s;
                        self.fill_rect(Rect::new(px, py, px + s, py + s), color);
                    }
                }
            }
        }
    }
}

/// Size in pixels of unrotated `text` at `scale`: (width, height).
pub fn text_extent(text: &str, scale: u32) -> (i32, i32) {
    (
        (font::text_width(text) * scale) as i32,
        (GLYPH_H * scale) as i32,
    )
}
