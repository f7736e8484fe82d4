use std::path::PathBuf;
use thiserror::Error;

/// All the ways in which loading or composing sprites can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// An asset file could not be read.
    #[error("Unable to read asset `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An asset file is not a valid PNG image.
    #[error("Unable to decode PNG asset `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },
    /// An asset file decoded to an image with an unusable size.
    #[error("Invalid image size {width}x{height} in asset `{}`", path.display())]
    InvalidAsset {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    /// An image or drawing surface has an unusable size.
    #[error("Invalid image size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    /// Missiles are numbered 1 through 3.
    #[error("Unknown missile type: {0}")]
    UnknownMissileKind(u8),
}
