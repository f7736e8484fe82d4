//! Animated sprites for a tiny missile-defense shooter.
//!
//! Missiles rain from the sky, a gun at the bottom sweeps back and forth and fires projectiles,
//! shot-down missiles explode, and power-ups wait to be collected. This crate holds the sprites;
//! the game loop, collision handling and scoring belong to the host, which calls each sprite's
//! `update` once per tick and asks the off-screen predicates when to let go of a sprite.
//!
//! Time is passed in explicitly as the [`Duration`](core::time::Duration) since some fixed start
//! on a monotonic clock, and the display size is a [`Display`] value instead of a global, so every
//! sprite can be driven deterministically.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use turret_defense::{Assets, Display, Missile, MissileKind, Point};
//!
//! let assets = Assets::load(".")?;
//! let display = Display::from_env();
//! let start = Instant::now();
//!
//! let mut missile = Missile::new(&assets, Point::new(120, 0), MissileKind::One, start.elapsed());
//! while !missile.is_off_screen(&display) {
//!     missile.update(start.elapsed());
//! }
//! # Ok::<(), turret_defense::Error>(())
//! ```

#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub use crate::animation::{Animation, Frames, Playback, Status};
pub use crate::button::Button;
pub use crate::config::Display;
pub use crate::error::Error;
pub use crate::explosion::Explosion;
pub use crate::geo::{Point, Rect};
pub use crate::gun::Gun;
pub use crate::loader::{load_png, Assets};
pub use crate::missile::{Missile, MissileKind, Stats};
pub use crate::power_up::{Descriptor, PowerUp, PowerUpColor, PowerUpKind};
pub use crate::projectile::Projectile;
pub use crate::sprites::{blit, draw, outline, rotate, Drawable, Image, Sprite};

mod animation;
mod button;
mod config;
mod error;
mod explosion;
mod geo;
mod gun;
pub mod loader;
mod missile;
mod power_up;
mod projectile;
mod sprites;
