use crate::animation::{Animation, Playback};
use crate::config::Display;
use crate::error::Error;
use crate::explosion::Explosion;
use crate::geo::{Point, Rect};
use crate::loader::Assets;
use crate::sprites::{Drawable, Image, Sprite};
use core::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// The three kinds of missiles raining from the sky.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MissileKind {
    One,
    Two,
    Three,
}

/// Combat numbers for a missile kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Stats {
    /// Pixels fallen per tick.
    pub speed: i32,
    /// Change to the player's health on impact. Always negative.
    pub damage: i32,
    /// Score for shooting the missile down.
    pub points: u32,
}

const STATS: [Stats; 3] = [
    Stats {
        speed: 3,
        damage: -5,
        points: 3,
    },
    Stats {
        speed: 4,
        damage: -3,
        points: 2,
    },
    Stats {
        speed: 6,
        damage: -1,
        points: 1,
    },
];

impl MissileKind {
    pub const ALL: [MissileKind; 3] = [MissileKind::One, MissileKind::Two, MissileKind::Three];

    /// Look up a missile kind by its asset number (1 through 3).
    pub fn from_number(number: u8) -> Result<MissileKind, Error> {
        match number {
            1 => Ok(MissileKind::One),
            2 => Ok(MissileKind::Two),
            3 => Ok(MissileKind::Three),
            n => Err(Error::UnknownMissileKind(n)),
        }
    }

    /// The number used in asset file names.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn stats(self) -> Stats {
        STATS[self.index()]
    }

    pub(crate) fn index(self) -> usize {
        match self {
            MissileKind::One => 0,
            MissileKind::Two => 1,
            MissileKind::Three => 2,
        }
    }
}

/// A missile falling straight down toward the player.
#[derive(Debug)]
pub struct Missile {
    kind: MissileKind,
    stats: Stats,
    animation: Animation,
    center: Point,
}

impl Missile {
    pub fn new(assets: &Assets, center: Point, kind: MissileKind, now: Duration) -> Missile {
        let frames = assets.flight(kind).clone();

        Missile {
            kind,
            stats: kind.stats(),
            animation: Animation::new(frames, FRAME_INTERVAL, Playback::Loop, now),
            center,
        }
    }

    /// Fall by one step and animate.
    ///
    /// The missile moves on every call; only the flight animation is rate limited.
    pub fn update(&mut self, now: Duration) {
        self.center.y += self.stats.speed;
        self.animation.tick(now);
    }

    /// Check if the missile has reached the bottom of the display.
    ///
    /// The threshold is measured against the frame on display right now, so it shifts slightly as
    /// frames of different heights cycle through.
    pub fn is_off_screen(&self, display: &Display) -> bool {
        let height = self.animation.current().height() as f64;

        self.rect().top() as f64 > display.height as f64 - height * 0.8
    }

    /// Spawn the explosion for this missile, where it currently is.
    pub fn explode(&self, assets: &Assets, now: Duration) -> Explosion {
        Explosion::new(assets, self.center, self.kind, now)
    }

    pub fn kind(&self) -> MissileKind {
        self.kind
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn frame_index(&self) -> usize {
        self.animation.index()
    }
}

impl Sprite for Missile {
    fn image(&self) -> &Image {
        self.animation.current()
    }

    fn rect(&self) -> Rect {
        Rect::from_drawable(&self.center, self.image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::solid_assets;

    const STEP: Duration = Duration::from_millis(31);

    #[test]
    fn test_stats_table() {
        let assets = solid_assets();
        let expected = [(1, 3, -5, 3), (2, 4, -3, 2), (3, 6, -1, 1)];

        for (number, speed, damage, points) in expected {
            let kind = MissileKind::from_number(number).unwrap();
            let mut missile = Missile::new(&assets, Point::new(100, 0), kind, Duration::ZERO);
            let stats = Stats {
                speed,
                damage,
                points,
            };

            assert_eq!(kind.number(), number);
            assert_eq!(missile.stats(), stats, "Missile type {number}");
            for n in 1..=25 {
                missile.update(STEP * n);
            }
            assert_eq!(missile.stats(), stats, "Stats never change");
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            MissileKind::from_number(0),
            Err(Error::UnknownMissileKind(0))
        ));
        assert!(matches!(
            MissileKind::from_number(4),
            Err(Error::UnknownMissileKind(4))
        ));
    }

    #[test]
    fn test_falls_every_tick() {
        let assets = solid_assets();
        let mut missile =
            Missile::new(&assets, Point::new(50, 10), MissileKind::Three, Duration::ZERO);

        // No time passes, so the animation holds still while the missile keeps falling
        for _ in 0..5 {
            missile.update(Duration::ZERO);
        }
        assert_eq!(missile.center(), Point::new(50, 40));
        assert_eq!(missile.frame_index(), 0);
    }

    #[test]
    fn test_flight_loops() {
        let assets = solid_assets();
        let mut missile =
            Missile::new(&assets, Point::new(50, 10), MissileKind::One, Duration::ZERO);

        for n in 1..=23 {
            missile.update(STEP * n);
            assert_eq!(missile.frame_index(), n as usize % 10);
        }
    }

    #[test]
    fn test_rect_recenters_on_frame_change() {
        let assets = solid_assets();
        let mut missile =
            Missile::new(&assets, Point::new(50, 100), MissileKind::One, Duration::ZERO);
        assert_eq!(missile.rect().height(), 20);

        // Frame 1 is one pixel taller; the center only moves by the missile speed
        missile.update(STEP);
        let rect = missile.rect();
        assert_eq!(rect.height(), 21);
        assert_eq!(rect.center(), Point::new(50, 103));
    }

    #[test]
    fn test_off_screen() {
        let assets = solid_assets();
        let display = Display::new(200, 300);
        let mut missile =
            Missile::new(&assets, Point::new(100, 0), MissileKind::One, Duration::ZERO);
        assert!(!missile.is_off_screen(&display), "Not off screen after construction");

        // Frame 0 is 20px tall: off screen once the top passes 300 - 16 = 284
        let mut ticks = 0;
        while !missile.is_off_screen(&display) {
            missile.update(Duration::ZERO);
            ticks += 1;
            assert!(ticks < 1000, "Missile never left the screen");
        }
        assert!(missile.rect().top() > 284);
        assert!(missile.rect().top() - missile.stats().speed <= 284);
    }

    #[test]
    fn test_off_screen_uses_current_frame() {
        let assets = solid_assets();
        let display = Display::new(200, 300);

        // Frame 0 is 20px tall: top 283 > 300 - 16 is false
        let missile = Missile::new(&assets, Point::new(100, 293), MissileKind::One, Duration::ZERO);
        assert_eq!(missile.rect().top(), 283);
        assert!(!missile.is_off_screen(&display));

        // Frame 9 is 29px tall at the same center: top 279 > 300 - 23.2 is true
        let mut missile =
            Missile::new(&assets, Point::new(100, 266), MissileKind::One, Duration::ZERO);
        for n in 1..=9 {
            missile.update(STEP * n);
        }
        assert_eq!(missile.frame_index(), 9);
        assert_eq!(missile.center(), Point::new(100, 293));
        assert_eq!(missile.rect().top(), 279);
        assert!(missile.is_off_screen(&display));
    }

    #[test]
    fn test_explode_in_place() {
        let assets = solid_assets();
        let missile = Missile::new(&assets, Point::new(70, 80), MissileKind::Two, Duration::ZERO);
        let explosion = missile.explode(&assets, Duration::ZERO);

        assert_eq!(explosion.kind(), MissileKind::Two);
        assert_eq!(explosion.rect().center(), Point::new(70, 80));
    }
}
