//! Left-to-right placement of the digit and colon glyphs.

use super::time_string::DIGIT_POSITIONS;

/// What occupies one cell of the layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Digit position 0..6 (each backed by a pair of slots)
    Digit(usize),
    /// Colon 0..2
    Colon(usize),
}

/// HH : MM : SS
pub const CELL_ORDER: [CellKind; DIGIT_POSITIONS + 2] = [
    CellKind::Digit(0),
    CellKind::Digit(1),
    CellKind::Colon(0),
    CellKind::Digit(2),
    CellKind::Digit(3),
    CellKind::Colon(1),
    CellKind::Digit(4),
    CellKind::Digit(5),
];

/// Relative sizes of the glyph cells, in glyph units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub digit_width: f32,
    pub colon_width: f32,
    pub glyph_height: f32,
    /// Space between neighbouring cells
    pub gap: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            digit_width: 1.0,
            colon_width: 0.4,
            glyph_height: 1.6,
            gap: 0.12,
        }
    }
}

impl LayoutMetrics {
    pub fn cell_width(&self, kind: CellKind) -> f32 {
        match kind {
            CellKind::Digit(_) => self.digit_width,
            CellKind::Colon(_) => self.colon_width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    /// Center x in the unscaled root frame
    pub center_x: f32,
    pub width: f32,
}

/// Lay the cells out starting at x = 0
pub fn layout_cells(metrics: &LayoutMetrics) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(CELL_ORDER.len());
    let mut x = 0.0;
    for (i, &kind) in CELL_ORDER.iter().enumerate() {
        if i > 0 {
            x += metrics.gap;
        }
        let width = metrics.cell_width(kind);
        cells.push(Cell {
            kind,
            center_x: x + width * 0.5,
            width,
        });
        x += width;
    }
    cells
}

/// Horizontal extent (min_x, max_x) of the laid-out cells
pub fn horizontal_bounds(cells: &[Cell]) -> (f32, f32) {
    cells.iter().fold((f32::MAX, f32::MIN), |(lo, hi), cell| {
        let half = cell.width * 0.5;
        (lo.min(cell.center_x - half), hi.max(cell.center_x + half))
    })
}

/// Root x translation that centres the assembly on x = 0 at `scale`
pub fn centering_offset(cells: &[Cell], scale: f32) -> f32 {
    if cells.is_empty() {
        return 0.0;
    }
    let (lo, hi) = horizontal_bounds(cells);
    -(lo + hi) * 0.5 * scale
}

/// Clamped linear mapping from container width to root scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRule {
    /// Width at which the clock is drawn at full size
    pub reference_width: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for ScaleRule {
    fn default() -> Self {
        Self {
            reference_width: 1800.0,
            min_scale: 0.5,
            max_scale: 1.0,
        }
    }
}

impl ScaleRule {
    pub fn scale_for_width(&self, width: f32) -> f32 {
        if self.reference_width <= 0.0 {
            return self.max_scale;
        }
        (width / self.reference_width).clamp(self.min_scale, self.max_scale)
    }
}
