use crate::animation::{Animation, Playback, Status};
use crate::geo::{Point, Rect};
use crate::loader::Assets;
use crate::missile::MissileKind;
use crate::sprites::{Image, Sprite};
use core::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(45);

/// A missile explosion. Plays once, then asks to be removed.
///
/// Explosions are spawned where a missile was shot down, so they have no off-screen check.
#[derive(Debug)]
pub struct Explosion {
    kind: MissileKind,
    animation: Animation,
    center: Point,
}

impl Explosion {
    pub fn new(assets: &Assets, center: Point, kind: MissileKind, now: Duration) -> Explosion {
        let frames = assets.explosion(kind).clone();

        Explosion {
            kind,
            animation: Animation::new(frames, FRAME_INTERVAL, Playback::Once, now),
            center,
        }
    }

    /// Animate the explosion.
    ///
    /// Returns [`Status::Finished`] once the last frame has had its full interval; the explosion
    /// must be dropped at that point.
    pub fn update(&mut self, now: Duration) -> Status {
        self.animation.tick(now)
    }

    pub fn kind(&self) -> MissileKind {
        self.kind
    }

    pub fn frame_index(&self) -> usize {
        self.animation.index()
    }

    pub fn is_finished(&self) -> bool {
        self.animation.is_finished()
    }
}

impl Sprite for Explosion {
    fn image(&self) -> &Image {
        self.animation.current()
    }

    fn rect(&self) -> Rect {
        Rect::from_drawable(&self.center, self.image())
    }
}
