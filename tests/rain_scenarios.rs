//! End-to-end runs of the filter pipeline and the rain simulation.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use text_rain::camera::{FrameProvider, PatternSource};
use text_rain::coords::{row_to_scene_y, scene_to_pixel};
use text_rain::corpus::{TextCorpus, Units};
use text_rain::rain::{
    DropState, MAX_PARTICLES, Particle, REMOVED_Y, SPAWN_COOLDOWN, Scan, scan_upward,
};
use text_rain::render::Scene;
use text_rain::vision::{CLEAR, OBSTACLE};
use text_rain::{GlyphHandle, PixelBuffer, RainSim, RenderLayer, Settings};

fn solid(w: usize, h: usize, v: u8) -> PixelBuffer {
    PixelBuffer::filled(w, h, [v, v, v, 255]).unwrap()
}

fn drop_at(x: f32, y: f32) -> Particle {
    Particle { handle: GlyphHandle(0), x, y, state: DropState::Falling, glyph: 'r' }
}

#[test]
fn all_black_mask_walks_off_the_top() {
    let mask = solid(4, 4, OBSTACLE);
    // maps to (col=1,row=1)
    let mut p = drop_at(-0.5, 0.5);
    let scan = scan_upward(&mut p, &mask);
    assert_eq!(scan, Scan::PushedOffTop { steps: 2 });
    assert_eq!(p.y, REMOVED_Y);
}

#[test]
fn lands_on_the_only_white_row() {
    let mut mask = solid(4, 4, OBSTACLE);
    for col in 0..4 {
        mask.set_rgba(col, 0, [CLEAR, CLEAR, CLEAR, 255]);
    }
    // maps to row 3
    let mut p = drop_at(0.25, -0.5);
    assert_eq!(scan_upward(&mut p, &mask), Scan::Lifted { steps: 3 });
    assert_eq!(p.y, row_to_scene_y(0, 4));
    assert_eq!(p.y, 1.0);
    assert_eq!(p.state, DropState::Blocked);
}

/// Render layer that remembers every call per handle.
#[derive(Default)]
struct CallLog {
    next: u64,
    positions: HashMap<GlyphHandle, usize>,
    recolors: HashMap<GlyphHandle, usize>,
    destroys: HashMap<GlyphHandle, usize>,
}

impl RenderLayer for CallLog {
    fn create_particle(&mut self, _glyph: char, _color: u32) -> GlyphHandle {
        self.next += 1;
        GlyphHandle(self.next)
    }
    fn set_position(&mut self, handle: GlyphHandle, _x: f32, _y: f32) {
        *self.positions.entry(handle).or_default() += 1;
    }
    fn set_color(&mut self, handle: GlyphHandle, _color: u32) {
        *self.recolors.entry(handle).or_default() += 1;
    }
    fn destroy(&mut self, handle: GlyphHandle) {
        *self.destroys.entry(handle).or_default() += 1;
    }
    fn set_background(&mut self, _buffer: &PixelBuffer) {}
}

#[test]
fn letter_below_the_frame_is_removed_before_any_lookup() {
    let corpus = TextCorpus::parse("z", Units::Lines).unwrap();
    let mut sim = RainSim::new(corpus, StdRng::seed_from_u64(5));
    let mut layer = CallLog::default();
    assert_eq!(sim.maybe_spawn(Instant::now(), &mut layer), 1);
    let handle = sim.particles()[0].handle;

    // 1.1 - 0.25 * 9.2 = -1.2, over a mask that would block anything it touched
    sim.step(9.2, &solid(4, 4, OBSTACLE), &mut layer);
    assert_eq!(sim.live_count(), 0);
    assert_eq!(layer.destroys.get(&handle), Some(&1));
    assert_eq!(layer.recolors.get(&handle), None);
    // only the spawn placement, no update after the fall
    assert_eq!(layer.positions.get(&handle), Some(&1));
}

#[test]
fn pattern_feed_keeps_every_invariant() {
    let mut source = PatternSource::new(96, 72).unwrap();
    let corpus = TextCorpus::default();
    let mut sim = RainSim::new(corpus, StdRng::seed_from_u64(2024));
    let mut scene = Scene::new();
    let settings = Settings::default();

    let t0 = Instant::now();
    let dt = 1.0 / 60.0;
    let mut spawn_times = Vec::new();

    for frame_no in 0..1200u64 {
        let now = t0 + Duration::from_millis(frame_no * 1000 / 60);
        let frame = source.next_frame().unwrap();
        let before: HashSet<GlyphHandle> = sim.particles().iter().map(|p| p.handle).collect();
        sim.update(frame.as_ref(), &settings, dt, now, &mut scene).unwrap();

        assert!(sim.live_count() <= MAX_PARTICLES);
        assert_eq!(scene.sprite_count(), sim.live_count());

        if sim.particles().iter().any(|p| !before.contains(&p.handle)) {
            spawn_times.push(now);
        }

        // nothing ends a frame sitting on an obstacle pixel
        let mask = sim.pipeline().obstacle().unwrap();
        for p in sim.particles() {
            if let Some((col, row)) = scene_to_pixel(p.x, p.y, mask.width(), mask.height()) {
                assert_eq!(mask.red(col, row), CLEAR, "letter {:?} inside an obstacle", p.glyph);
            }
        }
    }

    assert!(!spawn_times.is_empty());
    for pair in spawn_times.windows(2) {
        assert!(pair[1] - pair[0] >= SPAWN_COOLDOWN);
    }
}

#[test]
fn missing_frames_freeze_the_simulation() {
    let corpus = TextCorpus::default();
    let mut sim = RainSim::new(corpus, StdRng::seed_from_u64(9));
    let mut scene = Scene::new();
    let t0 = Instant::now();
    let frame = solid(32, 32, 255);
    sim.update(Some(&frame), &Settings::default(), 0.1, t0, &mut scene).unwrap();
    let ys: Vec<f32> = sim.particles().iter().map(|p| p.y).collect();

    for i in 1..10 {
        let now = t0 + Duration::from_secs(i);
        sim.update(None, &Settings::default(), 1.0, now, &mut scene).unwrap();
    }
    let after: Vec<f32> = sim.particles().iter().map(|p| p.y).collect();
    assert_eq!(ys, after);
}
