//! Frame sequence animation shared by every animated sprite.

use crate::sprites::Image;
use core::time::Duration;
use log::trace;
use std::rc::Rc;

/// An ordered, non-empty sequence of frames shared between sprites.
pub type Frames = Rc<[Image]>;

/// What happens after the last frame has been shown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Playback {
    /// Start over from the first frame.
    Loop,
    /// Stop on the last frame and report [`Status::Finished`].
    Once,
}

/// Result of a tick.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Keep the sprite around.
    Playing,
    /// A one-shot animation ran out of frames; the owner should drop the sprite.
    Finished,
}

/// Steps through a frame sequence on a fixed cooldown.
///
/// Time is whatever monotonic clock the host runs on, expressed as the duration since some fixed
/// start. The frame advances when strictly more than `interval` has passed since the last advance.
#[derive(Debug)]
pub struct Animation {
    frames: Frames,
    index: usize,
    last_update: Duration,
    interval: Duration,
    playback: Playback,
    finished: bool,
}

impl Animation {
    /// Start an animation on its first frame.
    ///
    /// # Panics
    ///
    /// Panics when `frames` is empty.
    pub fn new(frames: Frames, interval: Duration, playback: Playback, now: Duration) -> Animation {
        assert!(!frames.is_empty(), "An animation needs at least one frame");

        Animation {
            frames,
            index: 0,
            last_update: now,
            interval,
            playback,
            finished: false,
        }
    }

    /// Advance the animation if the frame interval has elapsed.
    pub fn tick(&mut self, now: Duration) -> Status {
        if self.finished {
            return Status::Finished;
        }

        if now.saturating_sub(self.last_update) > self.interval {
            self.last_update = now;

            let next = self.index + 1;
            if next < self.frames.len() {
                self.index = next;
            } else {
                match self.playback {
                    Playback::Loop => self.index = 0,
                    Playback::Once => {
                        trace!("One-shot animation finished after {} frames", self.frames.len());
                        self.finished = true;
                        return Status::Finished;
                    }
                }
            }
        }

        Status::Playing
    }

    /// The frame currently on display.
    pub fn current(&self) -> &Image {
        &self.frames[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::Drawable;

    /// Frames whose widths count up from 1, so each frame is recognizable.
    fn numbered_frames(count: u32) -> Frames {
        (1..=count)
            .map(|width| Image::solid(width, 4, [255, 255, 255, 255]))
            .collect()
    }

    const INTERVAL: Duration = Duration::from_millis(30);
    const STEP: Duration = Duration::from_millis(31);

    #[test]
    fn test_loop_wraps() {
        let mut animation =
            Animation::new(numbered_frames(6), INTERVAL, Playback::Loop, Duration::ZERO);

        for n in 1..=20 {
            assert_eq!(animation.tick(STEP * n), Status::Playing);
            assert_eq!(animation.index(), n as usize % 6, "Tick {n}");
            assert_eq!(animation.current().width(), (n % 6) + 1);
        }
        assert!(!animation.is_finished());
    }

    #[test]
    fn test_once_finishes_at_frame_count() {
        let mut animation =
            Animation::new(numbered_frames(9), INTERVAL, Playback::Once, Duration::ZERO);

        for n in 1..9 {
            assert_eq!(animation.tick(STEP * n), Status::Playing, "Tick {n}");
            assert_eq!(animation.index(), n as usize);
        }
        assert_eq!(animation.tick(STEP * 9), Status::Finished);
        assert!(animation.is_finished());
        assert_eq!(animation.index(), 8, "Index stays on the last frame");

        // Terminal state
        assert_eq!(animation.tick(STEP * 10), Status::Finished);
        assert_eq!(animation.index(), 8);
    }

    #[test]
    fn test_interval_is_strict() {
        let mut animation =
            Animation::new(numbered_frames(3), INTERVAL, Playback::Loop, Duration::ZERO);

        animation.tick(INTERVAL);
        assert_eq!(animation.index(), 0, "Exactly one interval is not enough");

        animation.tick(INTERVAL + Duration::from_millis(1));
        assert_eq!(animation.index(), 1);

        // The cooldown restarts from the last advance
        animation.tick(INTERVAL * 2);
        assert_eq!(animation.index(), 1);
    }

    #[test]
    fn test_clock_going_backwards() {
        let now = Duration::from_secs(10);
        let mut animation = Animation::new(numbered_frames(3), INTERVAL, Playback::Loop, now);

        assert_eq!(animation.tick(Duration::ZERO), Status::Playing);
        assert_eq!(animation.index(), 0);
    }

    #[test]
    fn test_single_frame_loop() {
        let mut animation =
            Animation::new(numbered_frames(1), INTERVAL, Playback::Loop, Duration::ZERO);

        for n in 1..5 {
            animation.tick(STEP * n);
            assert_eq!(animation.index(), 0);
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_frames() {
        Animation::new(numbered_frames(0), INTERVAL, Playback::Loop, Duration::ZERO);
    }
}
