//! Asset loading.
//!
//! Every image the sprites need is loaded eagerly into an [`Assets`] bundle, and any missing or
//! broken file fails the whole load. The relative paths follow the layout of the existing asset
//! packs:
//!
//! * `assets/missiles/missile-{type}_fly-{0..9}.png`
//! * `assets/missiles/missile-{type}_exp-{0..8}.png`
//! * `assets/power-ups/{Color}/frame_{1..6}.png`
//! * `assets/projectile.png`
//! * `assets/gun.png`

use crate::animation::Frames;
use crate::error::Error;
use crate::missile::MissileKind;
use crate::power_up::PowerUpColor;
use crate::sprites::Image;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Frames in a missile flight animation.
pub const FLIGHT_FRAMES: usize = 10;
/// Frames in a missile explosion animation.
pub const EXPLOSION_FRAMES: usize = 9;
/// Frames in a power-up animation.
pub const POWER_UP_FRAMES: usize = 6;

/// A list of assets loaded into memory.
#[derive(Debug)]
pub struct Assets {
    flight: [Frames; 3],
    explosion: [Frames; 3],
    power_ups: [Frames; 4],
    projectile: Image,
    gun: Image,
}

impl Assets {
    /// Load all assets from PNG files below `root`.
    ///
    /// `root` is the directory that contains the `assets` directory, usually the working directory
    /// of the game.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Io`] or [`Error::Decode`] encountered.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Assets, Error> {
        let root = root.as_ref();

        Assets::load_with(|path| load_png(root.join(path)))
    }

    /// Load all assets through a custom loader.
    ///
    /// The loader receives each relative asset path, in the layout documented on this module.
    pub fn load_with<F>(mut loader: F) -> Result<Assets, Error>
    where
        F: FnMut(&Path) -> Result<Image, Error>,
    {
        let mut sequence = |paths: Vec<PathBuf>| -> Result<Frames, Error> {
            let frames = paths
                .iter()
                .map(|path| loader(path))
                .collect::<Result<Frames, Error>>()?;
            debug!("Loaded {} frames: {}", frames.len(), paths[0].display());

            Ok(frames)
        };

        let flight = [
            sequence(flight_paths(MissileKind::One))?,
            sequence(flight_paths(MissileKind::Two))?,
            sequence(flight_paths(MissileKind::Three))?,
        ];
        let explosion = [
            sequence(explosion_paths(MissileKind::One))?,
            sequence(explosion_paths(MissileKind::Two))?,
            sequence(explosion_paths(MissileKind::Three))?,
        ];
        let power_ups = [
            sequence(power_up_paths(PowerUpColor::Red))?,
            sequence(power_up_paths(PowerUpColor::Blue))?,
            sequence(power_up_paths(PowerUpColor::Yellow))?,
            sequence(power_up_paths(PowerUpColor::Green))?,
        ];
        let projectile = loader(Path::new("assets/projectile.png"))?;
        let gun = loader(Path::new("assets/gun.png"))?;

        Ok(Assets {
            flight,
            explosion,
            power_ups,
            projectile,
            gun,
        })
    }

    pub(crate) fn flight(&self, kind: MissileKind) -> &Frames {
        &self.flight[kind.index()]
    }

    pub(crate) fn explosion(&self, kind: MissileKind) -> &Frames {
        &self.explosion[kind.index()]
    }

    pub(crate) fn power_up(&self, color: PowerUpColor) -> &Frames {
        &self.power_ups[color.index()]
    }

    pub(crate) fn projectile(&self) -> &Image {
        &self.projectile
    }

    pub(crate) fn gun(&self) -> &Image {
        &self.gun
    }
}

/// Relative paths of a missile's flight frames.
pub fn flight_paths(kind: MissileKind) -> Vec<PathBuf> {
    (0..FLIGHT_FRAMES)
        .map(|i| format!("assets/missiles/missile-{}_fly-{}.png", kind.number(), i).into())
        .collect()
}

/// Relative paths of a missile's explosion frames.
pub fn explosion_paths(kind: MissileKind) -> Vec<PathBuf> {
    (0..EXPLOSION_FRAMES)
        .map(|i| format!("assets/missiles/missile-{}_exp-{}.png", kind.number(), i).into())
        .collect()
}

/// Relative paths of a power-up's frames. These are numbered from 1.
pub fn power_up_paths(color: PowerUpColor) -> Vec<PathBuf> {
    (1..=POWER_UP_FRAMES)
        .map(|i| format!("assets/power-ups/{}/frame_{}.png", color.name(), i).into())
        .collect()
}

/// Load a PNG file from disk.
pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_png(BufReader::new(file)).map_err(|err| asset_error(path, err))
}

fn asset_error(path: &Path, err: DecodeError) -> Error {
    let path = path.to_path_buf();

    match err {
        DecodeError::Png(source) => Error::Decode { path, source },
        DecodeError::Size(width, height) => Error::InvalidAsset {
            path,
            width,
            height,
        },
    }
}

enum DecodeError {
    Png(png::DecodingError),
    Size(u32, u32),
}

impl From<png::DecodingError> for DecodeError {
    fn from(err: png::DecodingError) -> Self {
        DecodeError::Png(err)
    }
}

/// Convert PNG data to premultiplied RGBA pixels
fn decode_png<R: Read>(png: R) -> Result<Image, DecodeError> {
    use png::ColorType::*;

    let mut decoder = png::Decoder::new(png);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    let rgba = match info.color_type {
        Rgba => buffer,
        Rgb => buffer
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        GrayscaleAlpha => buffer
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        Grayscale => buffer.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        // Palettes are expanded by the decoder
        Indexed => return Err(DecodeError::Size(width, height)),
    };

    Image::from_rgba(width, height, rgba).map_err(|_| DecodeError::Size(width, height))
}
