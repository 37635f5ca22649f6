//! Territory mask
//!
//! Per-pixel revealed/unrevealed field: the ground truth of claimed territory.
//! A continuous point maps to the cell containing it. Anything off the surface
//! reads as unrevealed, which keeps enemies and the player on the conservative
//! side of every query.
//!
//! Cells only ever flip from unrevealed to revealed. A new stage gets a new mask.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fill::scan_polygon;
use crate::config::CellRect;

/// Revealed/unrevealed grid, one cell per pixel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryMask {
    width: u32,
    height: u32,
    /// Row-major cells, `true` = revealed
    cells: Vec<bool>,
    /// Number of `true` cells
    revealed: u64,
}

impl TerritoryMask {
    /// Fully unrevealed mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            revealed: 0,
        }
    }

    /// Mask with `zone` already revealed (stage start)
    pub fn with_safe_zone(width: u32, height: u32, zone: CellRect) -> Self {
        let mut mask = Self::new(width, height);
        for y in zone.y0..zone.y1.min(height) {
            for x in zone.x0..zone.x1.min(width) {
                mask.reveal_cell(x, y);
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells on the surface
    pub fn cell_count(&self) -> u64 {
        self.cells.len() as u64
    }

    pub fn revealed_count(&self) -> u64 {
        self.revealed
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Whether cell `(x, y)` is revealed; off-surface cells are not
    #[inline]
    pub fn is_cell_revealed(&self, x: u32, y: u32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Whether the cell under `p` is revealed.
    ///
    /// Negative, off-surface and non-finite points read as unrevealed.
    #[inline]
    pub fn is_revealed(&self, p: Vec2) -> bool {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return false;
        }
        self.is_cell_revealed(p.x.floor() as u32, p.y.floor() as u32)
    }

    /// Reveal one cell, returning true if it was newly revealed
    fn reveal_cell(&mut self, x: u32, y: u32) -> bool {
        match self.index(x, y) {
            Some(i) if !self.cells[i] => {
                self.cells[i] = true;
                self.revealed += 1;
                true
            }
            _ => false,
        }
    }

    /// Reveal every cell whose center lies inside the closed `polygon`.
    ///
    /// Returns the number of cells that were not revealed before. Outlines with
    /// fewer than three points enclose nothing and leave the mask untouched.
    pub fn reveal_polygon(&mut self, polygon: &[Vec2]) -> usize {
        let mut spans = Vec::new();
        scan_polygon(polygon, self.width, self.height, |row, columns| {
            spans.push((row, columns));
        });

        let mut newly_revealed = 0;
        for (row, columns) in spans {
            for x in columns {
                if self.reveal_cell(x, row) {
                    newly_revealed += 1;
                }
            }
        }
        newly_revealed
    }

    /// Revealed share of the surface, 0-100
    pub fn coverage_percent(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        (self.revealed as f64 / self.cells.len() as f64 * 100.0) as f32
    }

    /// Rows top to bottom, for overlay rendering
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}
