use std::fs;
use std::path::Path;

use image::{GrayImage, ImageBuffer, ImageFormat, Luma};

use crate::error::{QrError, Result};
use crate::symbol::Symbol;

/// Light modules drawn around the symbol on every side.
pub const QUIET_ZONE: u32 = 4;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Scalable vector graphics.
    Svg,
    /// 8-bit grayscale PNG.
    Png,
}

impl Format {
    /// Infers the format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("svg") {
            Some(Format::Svg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Format::Png)
        } else {
            None
        }
    }
}

/// Side length of a rendering in modules, quiet zone included.
fn side_modules(symbol: &Symbol, scale: u32) -> Result<u32> {
    if scale == 0 {
        return Err(QrError::InvalidScale(scale));
    }
    Ok(symbol.width() as u32 + 2 * QUIET_ZONE)
}

/// Side length of a raster rendering in pixels.
///
/// The one-byte-per-pixel buffer must stay within the `image` crate's default
/// allocation limit.
fn raster_side(symbol: &Symbol, scale: u32) -> Result<u32> {
    let modules = side_modules(symbol, scale)?;
    let size = modules
        .checked_mul(scale)
        .ok_or(QrError::TooLarge { modules, scale })?;
    let max_alloc = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    if u64::from(size) * u64::from(size) > max_alloc {
        return Err(QrError::TooLarge { modules, scale });
    }
    Ok(size)
}

/// Returns a string of SVG code for an image depicting the given symbol.
///
/// The `viewBox` is measured in modules and the `width`/`height` attributes in
/// `scale` units per module. Every dark module becomes one unit square of a
/// single path, in row-major order. The string always uses Unix newlines.
///
/// Only scale 0 is rejected; the size attributes are plain numbers and have no
/// upper bound.
///
/// # Example
///
/// ```
/// use qrexport::{render::to_svg_string, symbol::Symbol};
///
/// let symbol = Symbol::create("Hello, World!").unwrap();
/// let svg = to_svg_string(&symbol, 8).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn to_svg_string(symbol: &Symbol, scale: u32) -> Result<String> {
    let modules = side_modules(symbol, scale)?;
    let size = u64::from(modules) * u64::from(scale);
    let border = QUIET_ZONE as i32;
    let width = symbol.width() as i32;

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {modules} {modules}\" stroke=\"none\">\n"
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..width {
        for x in 0..width {
            if symbol.is_dark(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    Ok(result)
}

/// Renders the symbol into a grayscale image buffer, `scale` pixels per module.
///
/// Dark modules are 0 and light modules 255. The image is
/// `(width + 2 * QUIET_ZONE) * scale` pixels on each side.
///
/// # Errors
///
/// [`QrError::InvalidScale`] for scale 0, and [`QrError::TooLarge`] when the
/// pixel buffer would exceed the `image` crate's default allocation limit
/// (512 MiB).
///
/// # Example
///
/// ```
/// use qrexport::{render::to_image_buffer, symbol::Symbol};
///
/// let symbol = Symbol::create("Hello, World!").unwrap();
/// let img = to_image_buffer(&symbol, 6).unwrap();
/// assert_eq!(img.width(), (symbol.width() as u32 + 8) * 6);
/// ```
pub fn to_image_buffer(symbol: &Symbol, scale: u32) -> Result<GrayImage> {
    let size = raster_side(symbol, scale)?;
    let border = QUIET_ZONE as i32;

    let img = ImageBuffer::from_fn(size, size, |x, y| {
        let qr_x = (x / scale) as i32 - border;
        let qr_y = (y / scale) as i32 - border;
        if symbol.is_dark(qr_x, qr_y) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    Ok(img)
}

/// Returns a text preview of the symbol, two characters per module.
pub fn to_terminal_string(symbol: &Symbol) -> String {
    let border = QUIET_ZONE as i32;
    let width = symbol.width() as i32;
    let mut out = String::new();
    for y in -border..width + border {
        for x in -border..width + border {
            out += if symbol.is_dark(x, y) { "██" } else { "  " };
        }
        out.push('\n');
    }
    out
}

/// Writes `symbol` to `path` in `format`, creating parent directories as needed.
pub(crate) fn export(symbol: &Symbol, format: Format, path: &Path, scale: u32) -> Result<()> {
    let io_err = |source: std::io::Error| QrError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Render first so a bad scale never touches the filesystem.
    enum Rendered {
        Svg(String),
        Png(GrayImage),
    }
    let rendered = match format {
        Format::Svg => Rendered::Svg(to_svg_string(symbol, scale)?),
        Format::Png => Rendered::Png(to_image_buffer(symbol, scale)?),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    match rendered {
        Rendered::Svg(svg) => fs::write(path, svg).map_err(io_err)?,
        Rendered::Png(img) => img
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| match source {
                image::ImageError::IoError(source) => io_err(source),
                source => QrError::Image {
                    path: path.to_path_buf(),
                    source,
                },
            })?,
    }

    tracing::info!(path = %path.display(), ?format, scale, "wrote QR code");
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> Symbol {
        Symbol::create("HELLO WORLD").unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("myqr.svg")), Some(Format::Svg));
        assert_eq!(Format::from_path(Path::new("out/MYQR.PNG")), Some(Format::Png));
        assert_eq!(Format::from_path(Path::new("myqr.jpg")), None);
        assert_eq!(Format::from_path(Path::new("myqr")), None);
    }

    #[test]
    fn test_to_svg_string() {
        let symbol = hello();
        let svg = to_svg_string(&symbol, 8).unwrap();
        let modules = symbol.width() + 8;

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains(&format!("width=\"{}\"", modules * 8)));
        assert!(svg.contains(&format!("viewBox=\"0 0 {0} {0}\"", modules)));
        // Top-left finder pattern starts right after the quiet zone.
        assert!(svg.contains("<path d=\"M4,4h1v1h-1z M5,4h1v1h-1z"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(!svg.contains('\r'));
    }

    #[test]
    fn test_svg_has_one_square_per_dark_module() {
        let symbol = hello();
        let svg = to_svg_string(&symbol, 1).unwrap();
        let width = symbol.width() as i32;
        let dark = (0..width)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| symbol.is_dark(x, y))
            .count();
        assert_eq!(svg.matches("h1v1h-1z").count(), dark);
    }

    #[test]
    fn test_generate_image_buffer() {
        let symbol = Symbol::create("Hello, world!").unwrap();
        let img = to_image_buffer(&symbol, 1).unwrap();

        // Version 2 at level H is 25 modules wide, plus a border of 4.
        assert_eq!(symbol.version(), 2);
        assert_eq!(img.dimensions(), (33, 33));
    }

    #[test]
    fn test_image_scales_linearly() {
        let symbol = hello();
        let base = to_image_buffer(&symbol, 1).unwrap().width();
        for scale in [2, 6, 8] {
            let img = to_image_buffer(&symbol, scale).unwrap();
            assert_eq!(img.dimensions(), (base * scale, base * scale));
        }
    }

    #[test]
    fn test_image_pixels_follow_modules() {
        let symbol = hello();
        let scale = 6;
        let img = to_image_buffer(&symbol, scale).unwrap();
        let width = symbol.width() as i32;
        for y in -4..width + 4 {
            for x in -4..width + 4 {
                let px = (x + 4) as u32 * scale + scale / 2;
                let py = (y + 4) as u32 * scale + scale / 2;
                let expected = if symbol.is_dark(x, y) { 0 } else { 255 };
                assert_eq!(img.get_pixel(px, py)[0], expected, "module ({x}, {y})");
            }
        }
        // Quiet zone corner.
        assert_eq!(img.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let symbol = hello();
        assert!(matches!(to_svg_string(&symbol, 0), Err(QrError::InvalidScale(0))));
        assert!(matches!(to_image_buffer(&symbol, 0), Err(QrError::InvalidScale(0))));
    }

    #[test]
    fn test_raster_beyond_allocation_limit_is_rejected() {
        let symbol = Symbol::create("https://example.com/").unwrap();
        // Fits in u32 pixels per side, but not in memory.
        match to_image_buffer(&symbol, 1_000_000) {
            Err(QrError::TooLarge { modules, scale }) => {
                assert_eq!(modules, symbol.width() as u32 + 8);
                assert_eq!(scale, 1_000_000);
            }
            other => panic!("expected TooLarge, got {:?}", other.map(|img| img.dimensions())),
        }
    }

    #[test]
    fn test_svg_has_no_upper_scale_bound() {
        let symbol = hello();
        let scale = 200_000_000;
        let svg = to_svg_string(&symbol, scale).unwrap();
        let size = (symbol.width() as u64 + 8) * scale as u64;
        assert!(svg.contains(&format!("width=\"{size}\" height=\"{size}\"")));
    }

    #[test]
    fn test_overflowing_scale_is_rejected() {
        let symbol = hello();
        assert!(matches!(
            to_image_buffer(&symbol, u32::MAX),
            Err(QrError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_terminal_string() {
        let symbol = hello();
        let text = to_terminal_string(&symbol);
        let side = symbol.width() + 8;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), side);
        assert!(lines.iter().all(|l| l.chars().count() == side * 2));
        assert!(lines[0].trim().is_empty());
        assert!(lines[4].starts_with("        ██"));
    }
}
