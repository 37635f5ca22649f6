//! Scanline polygon fill
//!
//! Rasterizes a closed polygon onto the cell grid with the nonzero winding
//! rule. A cell is covered when its center `(x + 0.5, y + 0.5)` lies inside the
//! outline. Self-intersecting loops are covered once, zero-area pieces cover
//! nothing, and anything outside the grid is clipped.

use std::ops::Range;

use glam::Vec2;

/// Fewest vertices that can enclose an area
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Spans narrower than this are treated as zero-area
const MIN_SPAN_WIDTH: f32 = 1e-3;

/// An edge crossing the current scanline
#[derive(Debug, Clone, Copy)]
struct Crossing {
    x: f32,
    /// +1 for downward edges, -1 for upward ones
    winding: i32,
}

/// Visit every covered run of cells as `(row, columns)`.
///
/// The closing edge from the last vertex back to the first is implied.
pub fn scan_polygon<F>(polygon: &[Vec2], width: u32, height: u32, mut visit: F)
where
    F: FnMut(u32, Range<u32>),
{
    if polygon.len() < MIN_POLYGON_VERTICES || width == 0 || height == 0 {
        return;
    }

    let (min_y, max_y) = polygon
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    // Rows whose center line can meet the polygon
    let first_row = (min_y - 0.5).ceil().max(0.0);
    let last_row = (max_y - 0.5).floor().min(height as f32 - 1.0);
    if last_row < first_row {
        return;
    }

    let mut crossings: Vec<Crossing> = Vec::with_capacity(polygon.len());
    for row in first_row as u32..=last_row as u32 {
        let cy = row as f32 + 0.5;
        crossings.clear();

        for (i, &a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            // Half-open in y so a shared vertex is counted once
            let winding = if a.y <= cy && b.y > cy {
                1
            } else if b.y <= cy && a.y > cy {
                -1
            } else {
                continue;
            };
            // Interpolate from the upper endpoint so coincident edges agree exactly
            let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
            let t = (cy - top.y) / (bottom.y - top.y);
            crossings.push(Crossing {
                x: top.x + t * (bottom.x - top.x),
                winding,
            });
        }
        crossings.sort_by(|l, r| l.x.total_cmp(&r.x));

        let mut winding = 0;
        let mut span_start = 0.0;
        for crossing in &crossings {
            let was_inside = winding != 0;
            winding += crossing.winding;
            match (was_inside, winding != 0) {
                (false, true) => span_start = crossing.x,
                (true, false) if crossing.x - span_start >= MIN_SPAN_WIDTH => {
                    if let Some(columns) = cell_span(span_start, crossing.x, width) {
                        visit(row, columns);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Columns whose center lies in `[start, end)`, clipped to the grid
fn cell_span(start: f32, end: f32, width: u32) -> Option<Range<u32>> {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().min(width as f32);
    if last <= first {
        return None;
    }
    Some(first as u32..last as u32)
}
