// Falling letters: spawning, the fall step, and the upward scan that keeps
// every letter out of the dark parts of the obstacle mask.
// Visual: blue letters rain from above the frame; when one lands on something
// dark it jumps up onto the first clear pixel above and turns purple.
use std::time::{Duration, Instant};

use rand::Rng;

use crate::coords::{row_to_scene_y, scene_to_pixel};
use crate::corpus::TextCorpus;
use crate::error::Error;
use crate::settings::Settings;
use crate::types::{GlyphHandle, PixelBuffer};
use crate::vision::{FramePipeline, OBSTACLE};

pub const MAX_PARTICLES: usize = 120;
pub const SPAWN_COOLDOWN: Duration = Duration::from_millis(300);
/// Scene units per second, downward.
pub const FALL_SPEED: f32 = 0.25;
/// Letters are born just above the visible top edge...
pub const SPAWN_Y: f32 = 1.1;
/// ...and recycled once they sink below this.
pub const DESPAWN_Y: f32 = -1.1;
/// Written into `y` of a letter scanned off the top. Cleanup marker, never drawn.
pub const REMOVED_Y: f32 = -1.2;

pub const FALLING_COLOR: u32 = 0x00_33_66_FF; // blue
pub const BLOCKED_COLOR: u32 = 0x00_99_33_CC; // purple

/// What the simulation needs from whoever draws the letters.
pub trait RenderLayer {
    fn create_particle(&mut self, glyph: char, color: u32) -> GlyphHandle;
    fn set_position(&mut self, handle: GlyphHandle, x: f32, y: f32);
    fn set_color(&mut self, handle: GlyphHandle, color: u32);
    fn destroy(&mut self, handle: GlyphHandle);
    fn set_background(&mut self, buffer: &PixelBuffer);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropState {
    Falling,
    Blocked,
}

impl DropState {
    pub fn color(self) -> u32 {
        match self {
            DropState::Falling => FALLING_COLOR,
            DropState::Blocked => BLOCKED_COLOR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub handle: GlyphHandle,
    pub x: f32,
    pub y: f32,
    pub state: DropState,
    pub glyph: char,
}

/// Outcome of [`scan_upward`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scan {
    /// Mapped outside the mask; nothing to test against.
    OffField,
    /// Already on a clear pixel.
    Clear,
    /// Lifted `steps` rows up onto a clear pixel.
    Lifted { steps: usize },
    /// Ran out of rows above; the particle must be removed.
    PushedOffTop { steps: usize },
}

/// Move `p` up one mask row at a time until it sits on a clear pixel.
/// `row` strictly decreases, so this ends after at most `mask.height()` steps.
pub fn scan_upward(p: &mut Particle, mask: &PixelBuffer) -> Scan {
    let (w, h) = mask.dimensions();
    let Some((col, mut row)) = scene_to_pixel(p.x, p.y, w, h) else {
        return Scan::OffField;
    };

    let mut steps = 0;
    while mask.red(col, row) == OBSTACLE {
        steps += 1;
        let Some(above) = row.checked_sub(1) else {
            p.y = REMOVED_Y;
            return Scan::PushedOffTop { steps };
        };
        row = above;
        p.y = row_to_scene_y(row as i32, h);
        p.state = DropState::Blocked;
    }

    if steps == 0 { Scan::Clear } else { Scan::Lifted { steps } }
}

/// Pool + spawner + per-frame update, driven once per rendered frame.
pub struct RainSim<R: Rng> {
    corpus: TextCorpus,
    rng: R,
    particles: Vec<Particle>,
    last_spawn: Option<Instant>,
    pipeline: FramePipeline,
}

impl<R: Rng> RainSim<R> {
    pub fn new(corpus: TextCorpus, rng: R) -> Self {
        Self {
            corpus,
            rng,
            particles: Vec::with_capacity(MAX_PARTICLES),
            last_spawn: None,
            pipeline: FramePipeline::new(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    /// One frame. `frame == None` means the source had nothing new: no state changes.
    /// `now` is the wall clock used for spawn throttling; `dt` is seconds since last frame.
    pub fn update<L: RenderLayer>(
        &mut self,
        frame: Option<&PixelBuffer>,
        settings: &Settings,
        dt: f32,
        now: Instant,
        layer: &mut L,
    ) -> Result<(), Error> {
        let Some(frame) = frame else {
            return Ok(());
        };

        self.pipeline.process(frame, settings.threshold())?;
        if let Some(visible) = self.pipeline.visible(settings.debugging()) {
            layer.set_background(visible);
        }

        self.maybe_spawn(now, layer);

        // Borrow the mask out so the particle pass can mutate `self`.
        let pipeline = std::mem::take(&mut self.pipeline);
        if let Some(mask) = pipeline.obstacle() {
            self.step(dt, mask, layer);
        }
        self.pipeline = pipeline;
        Ok(())
    }

    /// Spawn one unit of text if the cooldown has elapsed and the pool has room.
    /// Returns how many letters were created.
    pub fn maybe_spawn<L: RenderLayer>(&mut self, now: Instant, layer: &mut L) -> usize {
        if self.particles.len() >= MAX_PARTICLES {
            return 0;
        }
        if let Some(last) = self.last_spawn {
            if now.saturating_duration_since(last) < SPAWN_COOLDOWN {
                return 0;
            }
        }
        self.last_spawn = Some(now);

        let unit = self.corpus.choose(&mut self.rng).to_owned();
        let mut created = 0;
        for glyph in unit.chars() {
            if self.particles.len() >= MAX_PARTICLES {
                log::trace!("pool full, dropping rest of {unit:?}");
                break;
            }
            let x = self.rng.random_range(-1.0f32..=1.0);
            let state = DropState::Falling;
            let handle = layer.create_particle(glyph, state.color());
            layer.set_position(handle, x, SPAWN_Y);
            self.particles.push(Particle { handle, x, y: SPAWN_Y, state, glyph });
            created += 1;
        }
        log::trace!("spawned {created} letters from {unit:?}, {} live", self.particles.len());
        created
    }

    /// Fall, recycle, collide. Removed letters are tombstoned during the pass
    /// and compacted afterwards so no entry is skipped or seen twice.
    pub fn step<L: RenderLayer>(&mut self, dt: f32, mask: &PixelBuffer, layer: &mut L) {
        let mut removed = vec![false; self.particles.len()];

        for (p, gone) in self.particles.iter_mut().zip(removed.iter_mut()) {
            p.y -= FALL_SPEED * dt;
            if p.y < DESPAWN_Y {
                layer.destroy(p.handle);
                *gone = true;
                continue;
            }

            let before = p.state;
            match scan_upward(p, mask) {
                Scan::PushedOffTop { steps } => {
                    log::trace!("{:?} pushed off the top after {steps} rows", p.glyph);
                    layer.destroy(p.handle);
                    *gone = true;
                    continue;
                }
                Scan::OffField | Scan::Clear | Scan::Lifted { .. } => {}
            }

            layer.set_position(p.handle, p.x, p.y);
            if p.state != before {
                layer.set_color(p.handle, p.state.color());
            }
        }

        let mut flags = removed.into_iter();
        self.particles.retain(|_| !flags.next().unwrap_or(false));
    }
}
