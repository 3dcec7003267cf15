use crate::grid::ModuleGrid;

/// Half-width of the square window used for the surround count.
pub const SURROUND_RADIUS: usize = 2;
/// Largest possible surround count (a fully dark 5x5 window).
pub const MAX_SURROUND: u8 = ((2 * SURROUND_RADIUS + 1) * (2 * SURROUND_RADIUS + 1)) as u8;

/// One dark module of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dot {
    pub x: u32,
    pub y: u32,
    /// Dark modules in the 5x5 window centred here, clipped at the edges,
    /// counting this module. Always in `1..=25`.
    pub surround_count: u8,
}

/// The dark modules of one QR symbol in row-major order.
///
/// A code is never patched: a new text produces a new `Code`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    /// Modules per side; 0 when there is nothing to render.
    pub width: u32,
    pub dots: Vec<Dot>,
}

impl Code {
    /// The "nothing to render" code produced when encoding fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Side length including the one-module quiet zone on each edge.
    pub fn bordered_width(&self) -> u32 {
        if self.is_empty() { 0 } else { self.width + 2 }
    }

    /// Scan `grid` row-major and record every dark module with its surround count.
    pub fn from_grid<G: ModuleGrid + ?Sized>(grid: &G) -> Self {
        let n = grid.width();
        let mut dots = Vec::new();
        for y in 0..n {
            for x in 0..n {
                if !grid.is_dark(x, y) {
                    continue;
                }
                let surround_count = surround_count(grid, x, y);
                debug_assert!(
                    (1..=MAX_SURROUND).contains(&surround_count),
                    "surround count {surround_count} out of range at ({x}, {y})"
                );
                dots.push(Dot {
                    x: x as u32,
                    y: y as u32,
                    surround_count,
                });
            }
        }
        Self {
            width: n as u32,
            dots,
        }
    }

    /// Look up the dot at `(x, y)`, if that module is dark.
    pub fn dot_at(&self, x: u32, y: u32) -> Option<&Dot> {
        // Dots are sorted by (y, x).
        self.dots
            .binary_search_by(|d| (d.y, d.x).cmp(&(y, x)))
            .ok()
            .map(|i| &self.dots[i])
    }
}

fn surround_count<G: ModuleGrid + ?Sized>(grid: &G, x: usize, y: usize) -> u8 {
    let n = grid.width();
    let x_range = x.saturating_sub(SURROUND_RADIUS)..=(x + SURROUND_RADIUS).min(n - 1);
    let y_range = y.saturating_sub(SURROUND_RADIUS)..=(y + SURROUND_RADIUS).min(n - 1);
    let mut count = 0u8;
    for j in y_range {
        for i in x_range.clone() {
            if grid.is_dark(i, j) {
                count += 1;
            }
        }
    }
    count
}
