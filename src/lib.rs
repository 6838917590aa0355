//! # qrexport
//!
//! Encode a string as a QR code and export it as an SVG and a PNG.
//!
//! The module grid is computed by the [`qrcode`] crate at error-correction level
//! `H`. `qrexport` wraps the result in a [`Symbol`](symbol::Symbol) and renders
//! it itself: a scalable SVG, a grayscale PNG via [`image`], and a text preview
//! for the terminal. Every rendering carries a four-module quiet zone and an
//! independent scale factor.
//!
//! ## Example
//!
//! Write both files for a URL:
//!
//! ```rust,no_run
//! use qrexport::{render::Format, symbol::Symbol};
//!
//! fn main() -> Result<(), qrexport::QrError> {
//!     let symbol = Symbol::create("https://example.com/")?;
//!     symbol.export(Format::Svg, "myqr.svg", 8)?;
//!     symbol.export(Format::Png, "myqr.png", 6)?;
//!     Ok(())
//! }
//! ```
//!
//! Render in memory instead:
//!
//! ```rust
//! use qrexport::{render::to_image_buffer, symbol::Symbol};
//!
//! let symbol = Symbol::create("Hello, World!").unwrap();
//! let img = to_image_buffer(&symbol, 4).unwrap();
//! assert_eq!(img.width(), img.height());
//! ```
//!
//! ## Modules
//!
//! - [`symbol`]: Encoding a string into a QR symbol.
//! - [`render`]: SVG, PNG and terminal renderings, and file export.
//! - [`pipeline`]: The configured encode-then-export run used by the binary.
//! - [`error`]: The crate error type.

pub mod error;
pub mod pipeline;
pub mod render;
pub mod symbol;

pub use error::{QrError, Result};
pub use pipeline::{run, Config, ExportTarget};
pub use render::Format;
pub use symbol::Symbol;
