//! The [`Screen`] type, a character buffer the model draws into, and
//! [`Frame`], the set of glyphs that changed between two screens.

use pathviz_core::Pos;

use crate::style::Style;

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A `width`×`height` grid of glyphs addressed by terminal (row, col).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Screen {
    /// Create a blank screen.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, p: Pos) -> Option<usize> {
        if p.row >= 0 && p.col >= 0 && p.row < self.height && p.col < self.width {
            Some((p.row * self.width + p.col) as usize)
        } else {
            None
        }
    }

    /// Read the glyph at `p`. Returns `Glyph::default()` outside bounds.
    pub fn at(&self, p: Pos) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside bounds.
    pub fn set(&mut self, p: Pos, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `text` starting at `p`, clipped at the right edge. Returns the
    /// number of glyphs written.
    pub fn print(&mut self, p: Pos, text: &str, style: Style) -> usize {
        let mut n = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(0, i as i32);
            if self.index(q).is_none() {
                break;
            }
            self.set(q, Glyph::new(ch, style));
            n += 1;
        }
        n
    }

    /// Fill every glyph with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Row-major iterator over `(Pos, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Glyph)> + '_ {
        let w = self.width.max(1);
        self.glyphs
            .iter()
            .enumerate()
            .map(move |(i, &g)| (Pos::new(i as i32 / w, i as i32 % w), g))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Pos,
}

/// A set of glyph changes (a diff frame).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
    /// The driver should clear the terminal before drawing.
    pub full: bool,
}

/// Compute the difference between two screens.
///
/// When sizes differ every glyph of `curr` is included and the frame is
/// flagged `full`.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let full = prev.width != curr.width || prev.height != curr.height;
    let cells = curr
        .iter()
        .filter(|&(p, g)| full || prev.at(p) != g)
        .map(|(pos, glyph)| FrameCell { glyph, pos })
        .collect();
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
        full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn set_and_get() {
        let mut s = Screen::new(4, 3);
        let g = Glyph::new('X', Style::default().with_bg(Color::RED));
        s.set(Pos::new(1, 2), g);
        assert_eq!(s.at(Pos::new(1, 2)), g);
        // out of bounds returns default and ignores writes
        s.set(Pos::new(3, 0), g);
        assert_eq!(s.at(Pos::new(3, 0)), Glyph::default());
    }

    #[test]
    fn print_clips() {
        let mut s = Screen::new(4, 1);
        assert_eq!(s.print(Pos::new(0, 1), "hello", Style::default()), 3);
        assert_eq!(s.at(Pos::new(0, 3)).ch, 'l');
    }

    #[test]
    fn frame_contains_only_changes() {
        let a = Screen::new(3, 2);
        let mut b = Screen::new(3, 2);
        b.set(Pos::new(0, 1), Glyph::new('A', Style::default()));
        let frame = compute_frame(&a, &b);
        assert!(!frame.full);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Pos::new(0, 1));
        assert_eq!(frame.cells[0].glyph.ch, 'A');
    }

    #[test]
    fn resized_frame_is_full() {
        let a = Screen::new(2, 2);
        let b = Screen::new(3, 2);
        let frame = compute_frame(&a, &b);
        assert!(frame.full);
        assert_eq!(frame.cells.len(), 6);
    }
}
