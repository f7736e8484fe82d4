use crate::config::Display;
use crate::geo::{Point, Rect};
use crate::loader::Assets;
use crate::sprites::{Image, Sprite};

/// Pixels travelled per tick.
pub const SPEED: f64 = 5.0;

/// What the gun fires.
///
/// The velocity is fixed at construction, rounded to whole pixels per tick.
#[derive(Debug)]
pub struct Projectile {
    image: Image,
    center: Point,
    velocity: Point,
}

impl Projectile {
    /// Fire a projectile from `pos` at `angle` degrees.
    ///
    /// An angle of 0 points straight up, 90 points left and -90 points right, matching the
    /// counter-clockwise rotation of the gun. The projectile starts `initial_offset` pixels from
    /// `pos` along the firing direction, which lets it leave from the muzzle instead of the pivot.
    pub fn new(assets: &Assets, pos: Point, angle: f64, initial_offset: f64) -> Projectile {
        let (sin, cos) = angle.to_radians().sin_cos();
        let center = Point::new(
            pos.x - round(initial_offset * sin),
            pos.y - round(initial_offset * cos),
        );
        let velocity = Point::new(-round(SPEED * sin), -round(SPEED * cos));

        Projectile {
            image: assets.projectile().clone(),
            center,
            velocity,
        }
    }

    /// Move the projectile by one step.
    pub fn update(&mut self) {
        self.center += self.velocity;
    }

    /// Check to see if the projectile left the display on any side.
    ///
    /// The check uses the top-left corner of the bounding rectangle.
    pub fn is_off_screen(&self, display: &Display) -> bool {
        let Point { x, y } = self.rect().p1;

        x > display.width || x < 0 || y > display.height || y < 0
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

impl Sprite for Projectile {
    fn image(&self) -> &Image {
        &self.image
    }

    fn rect(&self) -> Rect {
        Rect::from_drawable(&self.center, &self.image)
    }
}

/// Round half to even, to whole pixels.
fn round(value: f64) -> i32 {
    value.round_ties_even() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::solid_assets;

    #[test]
    fn test_velocity() {
        let assets = solid_assets();
        let pos = Point::new(100, 100);

        let up = Projectile::new(&assets, pos, 0.0, 0.0);
        assert_eq!(up.velocity(), Point::new(0, -5));
        assert_eq!(up.center(), pos);

        let left = Projectile::new(&assets, pos, 90.0, 0.0);
        assert_eq!(left.velocity(), Point::new(-5, 0));

        let right = Projectile::new(&assets, pos, -90.0, 0.0);
        assert_eq!(right.velocity(), Point::new(5, 0));

        // 5 * sin(45) = 3.54
        let diagonal = Projectile::new(&assets, pos, 45.0, 0.0);
        assert_eq!(diagonal.velocity(), Point::new(-4, -4));
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round(2.5), 2);
        assert_eq!(round(3.5), 4);
        assert_eq!(round(-2.5), -2);
        assert_eq!(round(2.6), 3);
    }

    #[test]
    fn test_initial_offset() {
        let assets = solid_assets();
        let pos = Point::new(100, 100);

        let up = Projectile::new(&assets, pos, 0.0, 20.0);
        assert_eq!(up.center(), Point::new(100, 80));

        let left = Projectile::new(&assets, pos, 90.0, 20.0);
        assert_eq!(left.center(), Point::new(80, 100));
    }

    #[test]
    fn test_moves_along_velocity() {
        let assets = solid_assets();
        let mut projectile = Projectile::new(&assets, Point::new(100, 100), 90.0, 0.0);

        for _ in 0..4 {
            projectile.update();
        }
        assert_eq!(projectile.center(), Point::new(80, 100));
    }

    #[test]
    fn test_off_screen() {
        let assets = solid_assets();
        let display = Display::new(200, 200);

        // The test projectile is 4x4, so the rect corner sits 2px up and left of the center
        let mut projectile = Projectile::new(&assets, Point::new(100, 12), 0.0, 0.0);
        assert!(!projectile.is_off_screen(&display));
        projectile.update();
        projectile.update();
        assert_eq!(projectile.rect().p1, Point::new(98, 0));
        assert!(!projectile.is_off_screen(&display), "The edge is still on screen");
        projectile.update();
        assert!(projectile.is_off_screen(&display));

        let projectile = Projectile::new(&assets, Point::new(203, 100), 0.0, 0.0);
        assert!(projectile.is_off_screen(&display), "Corner at x = 201 is off screen");
    }
}
