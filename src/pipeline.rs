//! The end-to-end run: encode one string, then export it to every configured target.

use std::path::PathBuf;

use crate::error::Result;
use crate::render::Format;
use crate::symbol::Symbol;

/// Text encoded when no other data is configured.
pub const DEFAULT_DATA: &str = "https://arshiamajdi.github.io/Quantum_ECC/";

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub format: Format,
    /// Pixels (or SVG units) per module.
    pub scale: u32,
}

impl ExportTarget {
    pub fn new(path: impl Into<PathBuf>, format: Format, scale: u32) -> Self {
        ExportTarget {
            path: path.into(),
            format,
            scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The string to encode.
    pub data: String,
    /// Files to write, in order.
    pub targets: Vec<ExportTarget>,
}

impl Default for Config {
    /// `myqr.svg` at scale 8 and `myqr.png` at scale 6, in the working directory.
    fn default() -> Self {
        Config {
            data: DEFAULT_DATA.to_string(),
            targets: vec![
                ExportTarget::new("myqr.svg", Format::Svg, 8),
                ExportTarget::new("myqr.png", Format::Png, 6),
            ],
        }
    }
}

impl Config {
    /// The default targets, placed under `dir` instead of the working directory.
    pub fn in_dir(data: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut config = Config {
            data: data.into(),
            ..Config::default()
        };
        for target in &mut config.targets {
            target.path = dir.join(&target.path);
        }
        config
    }
}

/// Encodes `config.data` once and writes every target in order.
///
/// Stops at the first failure; files written before it are left in place.
///
/// # Example
///
/// ```no_run
/// use qrexport::pipeline::{run, Config};
///
/// let symbol = run(&Config::default()).unwrap();
/// println!("version {}", symbol.version());
/// ```
pub fn run(config: &Config) -> Result<Symbol> {
    let symbol = Symbol::create(&config.data)?;
    tracing::info!(
        version = symbol.version(),
        width = symbol.width(),
        targets = config.targets.len(),
        "encoded {:?}",
        config.data
    );

    for target in &config.targets {
        symbol.export(target.format, &target.path, target.scale)?;
    }

    Ok(symbol)
}
