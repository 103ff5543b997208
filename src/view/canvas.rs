// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ConnectionColor, ConnectionStyle};

const H: char = '─';
const V: char = '│';
const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Edges(u8);

impl Edges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn has(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    fn from_char(ch: char) -> Option<Self> {
        let edges = match ch {
            H => Self::LEFT.with(Self::RIGHT),
            V => Self::UP.with(Self::DOWN),
            TOP_LEFT => Self::RIGHT.with(Self::DOWN),
            TOP_RIGHT => Self::LEFT.with(Self::DOWN),
            BOTTOM_LEFT => Self::RIGHT.with(Self::UP),
            BOTTOM_RIGHT => Self::LEFT.with(Self::UP),
            '├' => Self::UP.with(Self::DOWN).with(Self::RIGHT),
            '┤' => Self::UP.with(Self::DOWN).with(Self::LEFT),
            '┬' => Self::LEFT.with(Self::RIGHT).with(Self::DOWN),
            '┴' => Self::LEFT.with(Self::RIGHT).with(Self::UP),
            '┼' => Self::LEFT.with(Self::RIGHT).with(Self::UP).with(Self::DOWN),
            _ => return None,
        };
        Some(edges)
    }

    fn to_char(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => H,
            4 | 8 | 12 => V,
            10 => TOP_LEFT,
            9 => TOP_RIGHT,
            6 => BOTTOM_LEFT,
            5 => BOTTOM_RIGHT,
            14 => '├',
            13 => '┤',
            11 => '┬',
            7 => '┴',
            _ => '┼',
        }
    }
}

/// How a cell should be colored when drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Paint {
    #[default]
    Plain,
    Color(ConnectionColor),
    Selected,
}

/// Horizontal and vertical strokes for a connection style.
pub fn stroke_chars(style: ConnectionStyle) -> (char, char) {
    match style {
        ConnectionStyle::Solid => (H, V),
        ConnectionStyle::Dashed => ('╌', '╎'),
        ConnectionStyle::Dotted => ('┈', '┊'),
        ConnectionStyle::Double => ('═', '║'),
    }
}

/// Upper bound on canvas cells; layouts beyond it come from far-off `x`/`y` hints.
pub const MAX_CANVAS_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("diagram too large to draw: {width}x{height} (max {max} cells)",
        max = MAX_CANVAS_CELLS)]
    TooLarge { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

/// A bounds-checked character grid with a paint layer.
///
/// Solid box-drawing strokes merge into junctions where they meet; any other character
/// overwrites the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<Edges>,
    paint: Vec<Paint>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        if len > MAX_CANVAS_CELLS {
            return Err(CanvasError::TooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![' '; len],
            edges: vec![Edges::NONE; len],
            paint: vec![Paint::Plain; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.render_at(x, y, idx))
    }

    pub fn paint_at(&self, x: usize, y: usize) -> Result<Paint, CanvasError> {
        Ok(self.paint[self.index_of(x, y)?])
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        if let Some(edges) = Edges::from_char(ch) {
            self.edges[idx] = self.edges[idx].with(edges);
        } else {
            self.cells[idx] = ch;
            self.edges[idx] = Edges::NONE;
        }
        Ok(())
    }

    pub fn set_painted(
        &mut self,
        x: usize,
        y: usize,
        ch: char,
        paint: Paint,
    ) -> Result<(), CanvasError> {
        self.set(x, y, ch)?;
        self.paint(x, y, paint)
    }

    pub fn paint(&mut self, x: usize, y: usize, paint: Paint) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        if paint != Paint::Plain {
            self.paint[idx] = paint;
        }
        Ok(())
    }

    /// Writes `text` from `(x, y)`, clipping at the right edge.
    pub fn write_str(
        &mut self,
        x: usize,
        y: usize,
        text: &str,
        paint: Paint,
    ) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= self.width {
                break;
            }
            self.set_painted(cx, y, ch, paint)?;
        }
        Ok(())
    }

    /// Draws `x0..=x1` on row `y` with `ch`.
    pub fn draw_hline(
        &mut self,
        x0: usize,
        x1: usize,
        y: usize,
        ch: char,
        paint: Paint,
    ) -> Result<(), CanvasError> {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        self.index_of(hi, y)?;
        for x in lo..=hi {
            self.set_painted(x, y, ch, paint)?;
        }
        Ok(())
    }

    /// Draws `y0..=y1` in column `x` with `ch`.
    pub fn draw_vline(
        &mut self,
        x: usize,
        y0: usize,
        y1: usize,
        ch: char,
        paint: Paint,
    ) -> Result<(), CanvasError> {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        self.index_of(x, hi)?;
        for y in lo..=hi {
            self.set_painted(x, y, ch, paint)?;
        }
        Ok(())
    }

    /// Draws a single-line rectangle with corners `(x0, y0)` and `(x1, y1)`. Nothing is drawn when
    /// the rectangle leaves the canvas.
    pub fn draw_box(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        paint: Paint,
    ) -> Result<(), CanvasError> {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        self.index_of(max_x, max_y)?;

        for x in min_x + 1..max_x {
            self.set_painted(x, min_y, H, paint)?;
            self.set_painted(x, max_y, H, paint)?;
        }
        for y in min_y + 1..max_y {
            self.set_painted(min_x, y, V, paint)?;
            self.set_painted(max_x, y, V, paint)?;
        }
        self.set_painted(min_x, min_y, TOP_LEFT, paint)?;
        self.set_painted(max_x, min_y, TOP_RIGHT, paint)?;
        self.set_painted(min_x, max_y, BOTTOM_LEFT, paint)?;
        self.set_painted(max_x, max_y, BOTTOM_RIGHT, paint)?;
        Ok(())
    }

    /// Rows as `(char, paint)` runs, for the terminal renderer.
    pub fn rows(&self) -> impl Iterator<Item = Vec<(char, Paint)>> + '_ {
        (0..self.height).map(move |y| {
            (0..self.width)
                .map(|x| {
                    let idx = y * self.width + x;
                    (self.render_at(x, y, idx), self.paint[idx])
                })
                .collect()
        })
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds { x, y, width: self.width, height: self.height }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(y * self.width + x)
    }

    fn render_at(&self, x: usize, y: usize, idx: usize) -> char {
        let edges = self.edges[idx];
        if edges == Edges::NONE {
            return self.cells[idx];
        }
        let joined = self.joined_edges(x, y, edges);
        if joined == Edges::NONE {
            edges.to_char()
        } else {
            joined.to_char()
        }
    }

    /// The subset of `edges` that meets a neighbouring stroke.
    fn joined_edges(&self, x: usize, y: usize, edges: Edges) -> Edges {
        let neighbour = |nx: usize, ny: usize| self.edges[ny * self.width + nx];
        let mut joined = Edges::NONE;
        if edges.has(Edges::LEFT) && x > 0 && neighbour(x - 1, y).has(Edges::RIGHT) {
            joined = joined.with(Edges::LEFT);
        }
        if edges.has(Edges::RIGHT) && x + 1 < self.width && neighbour(x + 1, y).has(Edges::LEFT) {
            joined = joined.with(Edges::RIGHT);
        }
        if edges.has(Edges::UP) && y > 0 && neighbour(x, y - 1).has(Edges::DOWN) {
            joined = joined.with(Edges::UP);
        }
        if edges.has(Edges::DOWN) && y + 1 < self.height && neighbour(x, y + 1).has(Edges::UP) {
            joined = joined.with(Edges::DOWN);
        }
        joined
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for (ch, _) in row {
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}
