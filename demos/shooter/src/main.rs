#![deny(clippy::all)]
#![forbid(unsafe_code)]

use crate::world::{Controls, World};
use error_iter::ErrorIter as _;
use game_loop::{game_loop, Time, TimeTrait as _};
use log::{error, info};
use pixels::{Error, Pixels, SurfaceTexture};
use std::{env, time::Duration};
use turret_defense::{Assets, Display, Point};
use winit::{dpi::LogicalSize, event::VirtualKeyCode, event_loop::EventLoop, window::WindowBuilder};
use winit_input_helper::WinitInputHelper;

mod world;

/// Updates per second. Missiles and the gun move a fixed distance on every update.
const FPS: usize = 60;
const TIME_STEP: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

/// Uber-struct representing the entire game.
struct Game {
    /// Software renderer.
    pixels: Pixels,
    /// Shooter world.
    world: World,
    /// Player controls for the next world update.
    controls: Controls,
    /// Event manager.
    input: WinitInputHelper,
    /// Game time, advanced by one step per update.
    now: Duration,
}

impl Game {
    fn new(pixels: Pixels, world: World) -> Self {
        Self {
            pixels,
            world,
            controls: Controls::default(),
            input: WinitInputHelper::new(),
            now: Duration::ZERO,
        }
    }

    /// Collect one-shot inputs until the next update consumes them.
    fn update_controls(&mut self) {
        // Map mouse clicks into the pixel buffer
        let click = self
            .input
            .mouse()
            .filter(|_| self.input.mouse_pressed(0))
            .and_then(|pos| self.pixels.window_pos_to_pixel(pos).ok())
            .map(|(x, y)| Point::new(x as i32, y as i32));

        self.controls.fire |= self.input.key_pressed(VirtualKeyCode::Space);
        self.controls.pause |= self.input.key_pressed(VirtualKeyCode::P);
        self.controls.click = self.controls.click.or(click);
    }

    fn reset_game(&mut self) {
        self.world.reset(self.now);
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let event_loop = EventLoop::new();

    // Enable debug mode with `DEBUG=true` environment variable
    let debug = env::var("DEBUG")
        .unwrap_or_else(|_| "false".to_string())
        .parse()
        .unwrap_or(false);

    // Assets are looked up below `ASSETS_DIR`, or the working directory
    let root = env::var("ASSETS_DIR").unwrap_or_else(|_| ".".to_string());
    let assets = match Assets::load(&root) {
        Ok(assets) => assets,
        Err(err) => {
            log_error("Assets::load", err);
            return Ok(());
        }
    };

    let display = Display::from_env();
    info!("Display size: {}x{}", display.width, display.height);

    let window = {
        let size = LogicalSize::new(display.width as f64, display.height as f64);
        WindowBuilder::new()
            .with_title("turret defense")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)
            .unwrap()
    };

    let pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(display.width as u32, display.height as u32, surface_texture)?
    };

    let world = match World::new(assets, display, generate_seed(), debug) {
        Ok(world) => world,
        Err(err) => {
            log_error("World::new", err);
            return Ok(());
        }
    };
    let game = Game::new(pixels, world);

    game_loop(
        event_loop,
        window,
        game,
        FPS as u32,
        0.1,
        move |g| {
            // Update the world
            g.game.now += TIME_STEP;
            let controls = std::mem::take(&mut g.game.controls);
            if let Err(err) = g.game.world.update(g.game.now, &controls) {
                log_error("world.update", err);
                g.exit();
            }
        },
        move |g| {
            // Drawing
            g.game.world.draw(g.game.pixels.frame_mut());
            if let Err(err) = g.game.pixels.render() {
                log_error("pixels.render", err);
                g.exit();
            }

            // Sleep the main thread to limit drawing to the fixed time step.
            let dt = TIME_STEP.as_secs_f64() - Time::now().sub(&g.current_instant());
            if dt > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(dt));
            }
        },
        |g, event| {
            // Let winit_input_helper collect events to build its state.
            if g.game.input.update(event) {
                // Update controls
                g.game.update_controls();

                // Close events
                if g.game.input.key_pressed(VirtualKeyCode::Escape) || g.game.input.close_requested()
                {
                    g.exit();
                    return;
                }

                // Reset game
                if g.game.input.key_pressed(VirtualKeyCode::R) {
                    g.game.reset_game();
                }

                // Resize the window
                if let Some(size) = g.game.input.window_resized() {
                    if let Err(err) = g.game.pixels.resize_surface(size.width, size.height) {
                        log_error("pixels.resize_surface", err);
                        g.exit();
                    }
                }
            }
        },
    );
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

/// Generate a pseudorandom seed for the game's PRNG.
fn generate_seed() -> (u64, u64) {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;

    let mut seed = [0_u8; 16];

    getrandom(&mut seed).expect("failed to getrandom");

    (
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_step_adds_up_to_a_second() {
        let second = TIME_STEP * FPS as u32;

        assert!(second <= Duration::from_secs(1));
        assert!(Duration::from_secs(1) - second < Duration::from_micros(1), "{second:?}");
    }
}
