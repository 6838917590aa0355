//! Encoding a string into a QR symbol.
//!
//! The module grid itself is computed by the [`qrcode`] crate. [`Symbol`] wraps
//! the result together with the text it was built from, and is the value every
//! renderer and exporter in this crate works from.

use std::path::Path;

use qrcode::{Color, EcLevel, QrCode, Version};

use crate::error::{QrError, Result};
use crate::render::{self, Format};

/// Error-correction level used for every symbol.
pub const EC_LEVEL: EcLevel = EcLevel::H;

/// A QR Code symbol: a square grid of dark and light modules plus the data it encodes.
///
/// Instances are immutable after creation.
///
/// # Example
///
/// ```rust
/// use qrexport::symbol::Symbol;
///
/// let symbol = Symbol::create("https://example.com/").unwrap();
/// assert!(symbol.version() >= 1);
/// assert_eq!(symbol.width(), symbol.version() as usize * 4 + 17);
/// ```
pub struct Symbol {
    code: QrCode,
    data: String,
}

impl Symbol {
    /// Encodes `data` at error-correction level [`EC_LEVEL`], picking the
    /// smallest version that fits.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::EmptyInput`] for an empty string and
    /// [`QrError::Encode`] when the data does not fit in version 40.
    pub fn create(data: &str) -> Result<Self> {
        if data.is_empty() {
            return Err(QrError::EmptyInput);
        }

        let code = QrCode::with_error_correction_level(data.as_bytes(), EC_LEVEL).map_err(
            |source| QrError::Encode {
                len: data.len(),
                source,
            },
        )?;

        let symbol = Symbol {
            code,
            data: data.to_owned(),
        };
        tracing::debug!(
            version = symbol.version(),
            width = symbol.width(),
            "encoded {} bytes",
            data.len()
        );
        Ok(symbol)
    }

    /// The text this symbol encodes.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Width and height in modules, between 21 and 177.
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Version number, 1 to 40.
    pub fn version(&self) -> i16 {
        match self.code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// Error-correction level, always [`EC_LEVEL`].
    pub fn ec_level(&self) -> EcLevel {
        self.code.error_correction_level()
    }

    /// Returns whether the module at (`x`, `y`) is dark.
    ///
    /// Coordinates outside the grid count as light, so callers can sample the
    /// quiet zone with negative or oversized coordinates.
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        let width = self.width() as i32;
        if !(0..width).contains(&x) || !(0..width).contains(&y) {
            return false;
        }
        self.code[(x as usize, y as usize)] == Color::Dark
    }

    /// Renders the symbol in `format` at `scale` and writes it to `path`.
    ///
    /// Missing parent directories are created and an existing file is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Fails with [`QrError::InvalidScale`] when `scale` is 0, with
    /// [`QrError::TooLarge`] when a PNG would not fit the raster size limit, and
    /// with [`QrError::Io`] or [`QrError::Image`] when the file cannot be written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use qrexport::{render::Format, symbol::Symbol};
    ///
    /// let symbol = Symbol::create("https://example.com/").unwrap();
    /// symbol.export(Format::Svg, "myqr.svg", 8).unwrap();
    /// symbol.export(Format::Png, "myqr.png", 6).unwrap();
    /// ```
    pub fn export(&self, format: Format, path: impl AsRef<Path>, scale: u32) -> Result<()> {
        render::export(self, format, path.as_ref(), scale)
    }

    /// Like [`Symbol::export`], with the format taken from the file extension.
    pub fn export_auto(&self, path: impl AsRef<Path>, scale: u32) -> Result<()> {
        let path = path.as_ref();
        let format = Format::from_path(path).ok_or_else(|| QrError::UnknownFormat {
            path: path.to_path_buf(),
        })?;
        render::export(self, format, path, scale)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol")
            .field("data", &self.data)
            .field("version", &self.version())
            .field("ec_level", &self.ec_level())
            .field("width", &self.width())
            .finish()
    }
}
