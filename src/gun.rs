use crate::error::Error;
use crate::geo::{Point, Rect};
use crate::loader::Assets;
use crate::projectile::Projectile;
use crate::sprites::{rotate, Drawable, Image, Sprite};

/// The gun reverses once it has turned this far (in degrees).
pub const MAX_ANGLE: i32 = 90;
/// Degrees turned per tick.
pub const ANGLE_STEP: i32 = 4;

/// The rotating gun the player fires.
///
/// It sweeps back and forth forever. Positive angles turn it counter-clockwise (left).
#[derive(Debug)]
pub struct Gun {
    base: Image,
    image: Image,
    center: Point,
    angle: i32,
    turning_left: bool,
}

impl Gun {
    /// Create a gun pointing straight up, about to turn left.
    pub fn new(assets: &Assets, center: Point) -> Gun {
        let base = assets.gun().clone();
        let image = base.clone();

        Gun {
            base,
            image,
            center,
            angle: 0,
            turning_left: true,
        }
    }

    /// Rotate the gun one step.
    ///
    /// The direction is picked before stepping, so the gun overshoots `MAX_ANGLE` by up to one
    /// step before it turns around: starting from 0 it sweeps between -92 and 92 degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if the rotated image cannot be allocated. The angle has
    /// already moved when that happens.
    pub fn update(&mut self) -> Result<(), Error> {
        if self.angle >= MAX_ANGLE {
            self.turning_left = false;
        } else if self.angle <= -MAX_ANGLE {
            self.turning_left = true;
        }

        if self.turning_left {
            self.angle += ANGLE_STEP;
        } else {
            self.angle -= ANGLE_STEP;
        }

        self.image = rotate(&self.base, self.angle)?;

        Ok(())
    }

    /// Fire a projectile from the muzzle, along the current angle.
    pub fn fire(&self, assets: &Assets) -> Projectile {
        self.fire_at(assets, 0.0)
    }

    /// Fire a projectile from the muzzle, turned `spread` degrees away from the barrel.
    pub fn fire_at(&self, assets: &Assets, spread: f64) -> Projectile {
        let muzzle = self.base.height() as f64 / 2.0;

        Projectile::new(assets, self.center, self.angle as f64 + spread, muzzle)
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn is_turning_left(&self) -> bool {
        self.turning_left
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

impl Sprite for Gun {
    fn image(&self) -> &Image {
        &self.image
    }

    /// Rotation changes the image size; the rectangle stays centered on the pivot.
    fn rect(&self) -> Rect {
        Rect::from_drawable(&self.center, &self.image)
    }
}
