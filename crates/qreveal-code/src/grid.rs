use qrcode::{Color, QrCode};

/// Read-only view of a square module matrix.
pub trait ModuleGrid {
    /// Modules per side.
    fn width(&self) -> usize;
    /// Whether the module at column `x`, row `y` is dark. Callers stay in `[0, width)`.
    fn is_dark(&self, x: usize, y: usize) -> bool;
}

impl ModuleGrid for QrCode {
    fn width(&self) -> usize {
        QrCode::width(self)
    }

    fn is_dark(&self, x: usize, y: usize) -> bool {
        self[(x, y)] == Color::Dark
    }
}

/// Owned row-major boolean matrix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl BitMatrix {
    /// An all-light matrix.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            modules: vec![false; width * width],
        }
    }

    /// Build from text rows where `#` is dark and anything else is light.
    /// Returns `None` unless every row is as long as there are rows.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.len();
        let mut matrix = Self::new(width);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                matrix.set(x, y, ch == '#');
            }
        }
        Some(matrix)
    }

    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        let idx = y * self.width + x;
        self.modules[idx] = dark;
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| **m).count()
    }
}

impl ModuleGrid for BitMatrix {
    fn width(&self) -> usize {
        self.width
    }

    fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

impl From<&QrCode> for BitMatrix {
    fn from(qr: &QrCode) -> Self {
        let width = qr.width();
        let modules = qr.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Self { width, modules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_reads_dark_modules() {
        let m = BitMatrix::from_rows(&["#.", ".#"]).unwrap();
        assert_eq!(m.width(), 2);
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(m.is_dark(1, 1));
        assert_eq!(m.dark_count(), 2);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(BitMatrix::from_rows(&["##", "#"]).is_none());
        assert!(BitMatrix::from_rows(&["###", "###"]).is_none());
    }

    #[test]
    fn qr_conversion_keeps_every_module() {
        let qr = QrCode::new(b"hello").unwrap();
        let m = BitMatrix::from(&qr);
        assert_eq!(m.width(), qr.width());
        for y in 0..qr.width() {
            for x in 0..qr.width() {
                assert_eq!(m.is_dark(x, y), ModuleGrid::is_dark(&qr, x, y));
            }
        }
    }
}
