use log::{debug, info};
use randomize::PCG32;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use turret_defense::{
    draw, outline, Assets, Button, Descriptor, Display, Error, Explosion, Gun, Image, Missile,
    MissileKind, Point, PowerUp, PowerUpKind, Projectile, Rect, Sprite, Status,
};

// Time between missile launches
const MISSILE_COOLDOWN: Duration = Duration::from_millis(900);
// How long temporary power-ups last
const POWER_UP_DURATION: Duration = Duration::from_secs(10);
// Chance of a power-up appearing on any tick, 1 in N
const POWER_UP_CHANCE: u32 = 600;
// Spread between the projectiles of a fan, in degrees
const FAN_SPREAD: f64 = 15.0;

const START_HEALTH: i32 = 20;
const START_AMMO: usize = 3;

// Colors
const SKY: [u8; 4] = [0x10, 0x14, 0x2c, 0xff];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];
const BUTTON: [u8; 4] = [0x48, 0x48, 0x70, 0xff];

/// Player control inputs.
#[derive(Debug, Default)]
pub(crate) struct Controls {
    /// Shoot the gun.
    pub(crate) fire: bool,
    /// Toggle the pause button.
    pub(crate) pause: bool,
    /// Mouse click, in display coordinates.
    pub(crate) click: Option<Point>,
}

/// Upgrades picked up from power-ups.
#[derive(Debug, Default)]
struct Upgrades {
    max_health: i32,
    max_ammo: usize,
    piercing_until: Duration,
    fan_until: Duration,
}

pub(crate) struct World {
    assets: Assets,
    display: Display,
    gun: Gun,
    missiles: Vec<Missile>,
    explosions: Vec<Explosion>,
    projectiles: Vec<Projectile>,
    power_ups: Vec<PowerUp>,
    pause: Button,
    paused: Rc<Cell<bool>>,
    upgrades: Upgrades,
    health: i32,
    score: u32,
    next_missile: Duration,
    prng: PCG32,
    debug: bool,
}

impl World {
    pub(crate) fn new(
        assets: Assets,
        display: Display,
        seed: (u64, u64),
        debug: bool,
    ) -> Result<World, Error> {
        let gun = Gun::new(&assets, gun_position(&display));

        // The pause button only flips a flag; the world reads it on every update
        let paused = Rc::new(Cell::new(false));
        let pause = {
            let paused = Rc::clone(&paused);
            let label = pause_label()?;
            let rect = Rect::from_xywh(display.width - 56, 8, 48, 32);
            Button::new(&label, rect, BUTTON, move || paused.set(!paused.get()))?
        };

        Ok(World {
            assets,
            display,
            gun,
            missiles: Vec::new(),
            explosions: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            pause,
            paused,
            upgrades: Upgrades::new(),
            health: START_HEALTH,
            score: 0,
            next_missile: Duration::ZERO,
            prng: PCG32::seed(seed.0, seed.1),
            debug,
        })
    }

    /// Update the internal state.
    ///
    /// # Arguments
    ///
    /// * `now`: Time since the game started.
    /// * `controls`: The player inputs.
    pub(crate) fn update(&mut self, now: Duration, controls: &Controls) -> Result<(), Error> {
        let clicked = controls
            .click
            .is_some_and(|click| self.pause.contains(&click));
        if controls.pause || clicked {
            self.pause.hit();
        }
        if self.paused.get() {
            return Ok(());
        }

        self.gun.update()?;
        if controls.fire {
            self.fire(now);
        }
        self.spawn(now);

        for missile in &mut self.missiles {
            missile.update(now);
        }
        for projectile in &mut self.projectiles {
            projectile.update();
        }
        for power_up in &mut self.power_ups {
            power_up.update(now);
        }
        self.explosions
            .retain_mut(|explosion| explosion.update(now) == Status::Playing);

        self.collide(now);

        // Missiles reaching the ground hurt
        let display = self.display;
        let mut damage = 0;
        self.missiles.retain(|missile| {
            let landed = missile.is_off_screen(&display);
            if landed {
                damage += missile.stats().damage;
            }
            !landed
        });
        self.projectiles
            .retain(|projectile| !projectile.is_off_screen(&display));

        if damage != 0 {
            self.health += damage;
            debug!("Health: {}", self.health);
            if self.health <= 0 {
                info!("Game over! Score: {}", self.score);
                self.reset(now);
            }
        }

        Ok(())
    }

    /// Draw the internal state to the screen.
    pub(crate) fn draw(&self, screen: &mut [u8]) {
        // Clear the screen
        for pixel in screen.chunks_exact_mut(4) {
            pixel.copy_from_slice(&SKY);
        }

        let sprites = self
            .power_ups
            .iter()
            .map(|s| s as &dyn Sprite)
            .chain(self.missiles.iter().map(|s| s as &dyn Sprite))
            .chain(self.explosions.iter().map(|s| s as &dyn Sprite))
            .chain(self.projectiles.iter().map(|s| s as &dyn Sprite))
            .chain([&self.gun as &dyn Sprite, &self.pause as &dyn Sprite]);

        for sprite in sprites {
            draw(screen, &self.display, sprite);

            // Draw debug information
            if self.debug {
                outline(screen, &self.display, &sprite.rect(), GREEN);
            }
        }

        // Health bar along the bottom edge
        let width = self.health.clamp(0, self.upgrades.max_health) * self.display.width
            / self.upgrades.max_health;
        let bar = Rect::from_xywh(0, self.display.height - 3, width.max(1) as u32, 3);
        outline(screen, &self.display, &bar, YELLOW);
    }

    pub(crate) fn reset(&mut self, now: Duration) {
        self.missiles.clear();
        self.explosions.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.gun = Gun::new(&self.assets, gun_position(&self.display));
        self.upgrades = Upgrades::new();
        self.health = START_HEALTH;
        self.score = 0;
        self.next_missile = now + MISSILE_COOLDOWN;
        self.paused.set(false);
    }

    fn fire(&mut self, now: Duration) {
        if self.projectiles.len() >= self.upgrades.max_ammo {
            return;
        }

        self.projectiles.push(self.gun.fire(&self.assets));
        if now < self.upgrades.fan_until {
            for spread in [-FAN_SPREAD, FAN_SPREAD] {
                self.projectiles.push(self.gun.fire_at(&self.assets, spread));
            }
        }
    }

    fn spawn(&mut self, now: Duration) {
        if now >= self.next_missile {
            self.next_missile = now + MISSILE_COOLDOWN;

            let r = self.prng.next_u32();
            let kind = MissileKind::ALL[r as usize % MissileKind::ALL.len()];
            let x = (r / 3) as i32 % (self.display.width - 32).max(1) + 16;
            let missile = Missile::new(&self.assets, Point::new(x, 0), kind, now);
            self.missiles.push(missile);
        }

        let r = self.prng.next_u32();
        if self.power_ups.is_empty() && r % POWER_UP_CHANCE == 0 {
            let r = r / POWER_UP_CHANCE;
            let kind = PowerUpKind::ALL[r as usize % PowerUpKind::ALL.len()];
            let x = (r / 4) as i32 % (self.display.width - 64).max(1) + 32;
            let y = (r / 7) as i32 % (self.display.height / 2).max(1) + 32;
            debug!("Spawning {:?} at {}, {}", kind, x, y);

            let power_up = PowerUp::new(&self.assets, Point::new(x, y), kind.descriptor(), now);
            self.power_ups.push(power_up);
        }
    }

    /// Projectiles take out missiles and collect power-ups.
    ///
    /// Unless piercing rounds are active, a projectile is spent on the first thing it hits.
    fn collide(&mut self, now: Duration) {
        let piercing = now < self.upgrades.piercing_until;
        let mut spent = vec![false; self.projectiles.len()];

        let mut i = 0;
        while i < self.missiles.len() {
            let rect = self.missiles[i].rect();
            let hit = self
                .projectiles
                .iter()
                .enumerate()
                .position(|(j, projectile)| !spent[j] && projectile.rect().intersects(&rect));

            if let Some(p) = hit {
                let missile = self.missiles.swap_remove(i);
                self.score += missile.stats().points;
                self.explosions.push(missile.explode(&self.assets, now));
                spent[p] = !piercing;
            } else {
                i += 1;
            }
        }

        let mut collected = Vec::new();
        self.power_ups.retain(|power_up| {
            let rect = power_up.rect();
            let hit = self
                .projectiles
                .iter()
                .enumerate()
                .position(|(j, projectile)| !spent[j] && projectile.rect().intersects(&rect));

            match hit {
                Some(p) => {
                    collected.push(power_up.descriptor());
                    spent[p] = !piercing;
                    false
                }
                None => true,
            }
        });
        for descriptor in collected {
            self.upgrades.apply(descriptor, now);
        }

        let mut spent = spent.into_iter();
        self.projectiles
            .retain(|_| !spent.next().unwrap_or(false));
    }
}

impl Upgrades {
    fn new() -> Self {
        Upgrades {
            max_health: START_HEALTH,
            max_ammo: START_AMMO,
            ..Default::default()
        }
    }

    fn apply(&mut self, descriptor: Descriptor, now: Duration) {
        info!("Power-up: {:?}", descriptor.kind());

        match descriptor.kind() {
            PowerUpKind::HigherMaxHealth => self.max_health += 5,
            PowerUpKind::HigherMaxAmmo => self.max_ammo += 2,
            PowerUpKind::PiercingRounds => self.piercing_until = now + POWER_UP_DURATION,
            PowerUpKind::FanOfProjectiles => self.fan_until = now + POWER_UP_DURATION,
        }
    }
}

fn gun_position(display: &Display) -> Point {
    Point::new(display.width / 2, display.height - 24)
}

/// Two bars, drawn without a font.
fn pause_label() -> Result<Image, Error> {
    let mut rgba = vec![0; 14 * 16 * 4];
    for (i, pixel) in rgba.chunks_exact_mut(4).enumerate() {
        let x = i % 14;
        if !(5..9).contains(&x) {
            pixel.copy_from_slice(&[255, 255, 255, 255]);
        }
    }

    Image::from_rgba(14, 16, rgba)
}
