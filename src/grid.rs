//! Module grids and the encoder capability that produces them.
//!
//! Rendering never looks at how a symbol was encoded. It walks a [`ModuleGrid`]
//! through `module_count` and `is_dark` only, so any encoder that can fill a
//! [`ModuleMatrix`] can be plugged into a [`crate::Generator`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A square grid of dark and light modules.
pub trait ModuleGrid {
    /// Number of modules per side.
    fn module_count(&self) -> usize;

    /// Whether the module at `(row, col)` is dark. Out-of-range coordinates are light.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

/// An owned, immutable-once-built module grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// A grid of `size × size` light modules.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![false; size * size],
        }
    }

    /// Builds a grid by asking `dark(row, col)` for every module.
    pub fn from_fn(size: usize, mut dark: impl FnMut(usize, usize) -> bool) -> Self {
        let mut modules = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                modules.push(dark(row, col));
            }
        }
        Self { size, modules }
    }

    /// Number of dark modules in the grid.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Renders the grid as block characters with `border` light modules around it.
    /// Each module is two characters wide so the output looks square in a terminal.
    /// Lines always end in `\n`.
    pub fn to_ascii(&self, border: usize) -> String {
        let span = self.size + 2 * border;
        let mut out = String::with_capacity(span * (span * 2 + 1) * 3);
        for y in 0..span {
            for x in 0..span {
                let dark = y >= border
                    && x >= border
                    && self.is_dark(y - border, x - border);
                let c = if dark { '█' } else { ' ' };
                out.push(c);
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl ModuleGrid for ModuleMatrix {
    fn module_count(&self) -> usize {
        self.size
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }
}

/// QR error correction level, passed through to the encoder untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    /// Recovers about 7% of codewords.
    L,
    /// Recovers about 15% of codewords.
    #[default]
    M,
    /// Recovers about 25% of codewords.
    Q,
    /// Recovers about 30% of codewords.
    H,
}

impl FromStr for EcLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(Error::InvalidInput(format!(
                "unknown error correction level '{}' (expected L, M, Q or H)",
                other
            ))),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

/// Turns text into a module grid.
pub trait QrEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<ModuleMatrix>;
}

/// [`QrEncoder`] backed by the `qrcode` crate, choosing the smallest version that fits.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrcodeEncoder;

impl QrEncoder for QrcodeEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<ModuleMatrix> {
        if text.is_empty() {
            return Err(Error::EncodingUnavailable("nothing to encode".into()));
        }
        let ec = match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        };
        let code = qrcode::QrCode::with_error_correction_level(text.as_bytes(), ec)
            .map_err(|e| Error::EncodingUnavailable(e.to_string()))?;
        let size = code.width();
        // qrcode indexes by (x, y), i.e. (col, row)
        let grid = ModuleMatrix::from_fn(size, |row, col| code[(col, row)] == qrcode::Color::Dark);
        log::debug!("encoded {} bytes at level {} into {}x{} modules", text.len(), level, size, size);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let grid = ModuleMatrix::from_fn(3, |row, col| row == 0 && col == 2);
        assert!(grid.is_dark(0, 2));
        assert!(!grid.is_dark(2, 0));
        assert_eq!(grid.dark_count(), 1);
    }

    #[test]
    fn out_of_range_is_light() {
        let grid = ModuleMatrix::from_fn(2, |_, _| true);
        assert!(!grid.is_dark(2, 0));
        assert!(!grid.is_dark(0, 5));
    }

    #[test]
    fn ascii_preview_has_border() {
        let grid = ModuleMatrix::from_fn(1, |_, _| true);
        assert_eq!(grid.to_ascii(1), "      \n  ██  \n      \n");
    }

    #[test]
    fn ec_level_parses_case_insensitively() {
        assert_eq!("h".parse::<EcLevel>().unwrap(), EcLevel::H);
        assert_eq!(" Q ".parse::<EcLevel>().unwrap(), EcLevel::Q);
        assert!("X".parse::<EcLevel>().is_err());
        assert_eq!(EcLevel::default(), EcLevel::M);
    }

    #[test]
    fn qrcode_encoder_produces_version_one() {
        let grid = QrcodeEncoder.encode("HELLO WORLD", EcLevel::L).unwrap();
        assert_eq!(grid.module_count(), 21);
        // top-left finder pattern corner is always dark
        assert!(grid.is_dark(0, 0));
        assert!(grid.is_dark(6, 6));
        assert!(!grid.is_dark(7, 7));
    }

    #[test]
    fn higher_level_needs_more_modules() {
        let text = "https://example.com/some/longer/path?with=query&and=more";
        let low = QrcodeEncoder.encode(text, EcLevel::L).unwrap();
        let high = QrcodeEncoder.encode(text, EcLevel::H).unwrap();
        assert!(high.module_count() > low.module_count());
    }

    #[test]
    fn empty_text_is_unavailable() {
        let err = QrcodeEncoder.encode("", EcLevel::M).unwrap_err();
        assert!(matches!(err, Error::EncodingUnavailable(_)));
    }
}
