use crate::animation::{Animation, Playback};
use crate::geo::{Point, Rect};
use crate::loader::Assets;
use crate::sprites::{Image, Sprite};
use core::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// What a power-up does once collected. Interpreting it is up to the game.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum PowerUpKind {
    HigherMaxHealth,
    HigherMaxAmmo,
    PiercingRounds,
    FanOfProjectiles,
}

/// Power-up colors. Each names a directory of animation frames.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum PowerUpColor {
    Red,
    Blue,
    Yellow,
    Green,
}

/// Everything you ever wanted to know about a power-up.
///
/// There are exactly four, one per [`PowerUpKind`]. Get them with [`PowerUpKind::descriptor`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Descriptor {
    kind: PowerUpKind,
    color: PowerUpColor,
    temporary: bool,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::HigherMaxHealth,
        PowerUpKind::HigherMaxAmmo,
        PowerUpKind::PiercingRounds,
        PowerUpKind::FanOfProjectiles,
    ];

    pub const fn descriptor(self) -> Descriptor {
        use PowerUpColor::*;

        let (color, temporary) = match self {
            PowerUpKind::HigherMaxHealth => (Red, false),
            PowerUpKind::HigherMaxAmmo => (Blue, false),
            PowerUpKind::PiercingRounds => (Yellow, true),
            PowerUpKind::FanOfProjectiles => (Green, true),
        };

        Descriptor {
            kind: self,
            color,
            temporary,
        }
    }
}

impl PowerUpColor {
    /// The directory name under `assets/power-ups`.
    pub fn name(self) -> &'static str {
        match self {
            PowerUpColor::Red => "Red",
            PowerUpColor::Blue => "Blue",
            PowerUpColor::Yellow => "Yellow",
            PowerUpColor::Green => "Green",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PowerUpColor::Red => 0,
            PowerUpColor::Blue => 1,
            PowerUpColor::Yellow => 2,
            PowerUpColor::Green => 3,
        }
    }
}

impl Descriptor {
    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn color(&self) -> PowerUpColor {
        self.color
    }

    /// Temporary power-ups wear off; the others are permanent upgrades.
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl From<PowerUpKind> for Descriptor {
    fn from(kind: PowerUpKind) -> Descriptor {
        kind.descriptor()
    }
}

/// A collectible power-up. It stays where it was placed and loops its animation.
#[derive(Debug)]
pub struct PowerUp {
    descriptor: Descriptor,
    animation: Animation,
    center: Point,
}

impl PowerUp {
    pub fn new(assets: &Assets, center: Point, descriptor: Descriptor, now: Duration) -> PowerUp {
        let frames = assets.power_up(descriptor.color).clone();

        PowerUp {
            descriptor,
            animation: Animation::new(frames, FRAME_INTERVAL, Playback::Loop, now),
            center,
        }
    }

    pub fn update(&mut self, now: Duration) {
        self.animation.tick(now);
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn frame_index(&self) -> usize {
        self.animation.index()
    }
}

impl Sprite for PowerUp {
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

    #[test]
    fn test_descriptors() {
        use PowerUpColor::*;
        use PowerUpKind::*;

        let expected = [
            (HigherMaxHealth, Red, false),
            (HigherMaxAmmo, Blue, false),
            (PiercingRounds, Yellow, true),
            (FanOfProjectiles, Green, true),
        ];
        for (kind, color, temporary) in expected {
            let descriptor = Descriptor::from(kind);
            assert_eq!(descriptor.kind(), kind);
            assert_eq!(descriptor.color(), color, "{:?}", kind);
            assert_eq!(descriptor.is_temporary(), temporary, "{:?}", kind);
        }
        assert_eq!(PowerUpKind::ALL.len(), expected.len());
    }

    #[test]
    fn test_every_descriptor_is_canonical() {
        // Descriptors only come from the fixed table, so the kind picks everything else
        for kind in PowerUpKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor, Descriptor::from(descriptor.kind()));
        }

        let colors: Vec<_> = PowerUpKind::ALL
            .iter()
            .map(|kind| kind.descriptor().color())
            .collect();
        assert_eq!(
            colors,
            [
                PowerUpColor::Red,
                PowerUpColor::Blue,
                PowerUpColor::Yellow,
                PowerUpColor::Green
            ],
            "One color per kind"
        );
    }

    #[test]
    fn test_loops_in_place() {
        let assets = solid_assets();
        let center = Point::new(40, 60);
        let descriptor = PowerUpKind::PiercingRounds.descriptor();
        let mut power_up = PowerUp::new(&assets, center, descriptor, Duration::ZERO);
        let step = Duration::from_millis(31);

        for n in 1..=14 {
            power_up.update(step * n);
            assert_eq!(power_up.frame_index(), n as usize % 6);
        }
        assert_eq!(power_up.center(), center, "Power-ups do not move");
        assert_eq!(power_up.rect().center(), center);
        assert_eq!(power_up.descriptor(), descriptor);
    }
}
