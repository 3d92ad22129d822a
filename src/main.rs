// What you SEE:
// • Your mirrored camera image in gray, with letters raining down over it.
// • Letters that hit something dark (hair, sleeves, a raised arm) climb on top of it.
// • D toggles the obstacle mask view (debug). Up/Down change the threshold. ESC quits.

use std::time::{Duration, Instant};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use text_rain::camera::{CameraCapture, FrameProvider, PatternSource};
use text_rain::config::{Cli, Source};
use text_rain::corpus::TextCorpus;
use text_rain::draw::{Drawer, draw_text_5x7};
use text_rain::render::Scene;
use text_rain::settings::THRESHOLD_STEP;
use text_rain::{Error, FrameBuffer, RainSim, Settings};

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    cli.logger().init();

    /* --- Frame source + window setup --- */
    let mut source: Box<dyn FrameProvider> = match cli.source {
        Source::Camera => Box::new(CameraCapture::new(cli.camera, cli.width, cli.height)?),
        Source::Pattern => Box::new(PatternSource::new(cli.width as usize, cli.height as usize)?),
    };
    let (w, h) = source.resolution();
    let mut drawer = Drawer::new("Text Rain", w, h)?;
    let mut screen = FrameBuffer::new(w, h);

    /* --- Text + simulation --- */
    let corpus = match &cli.corpus {
        Some(path) => TextCorpus::from_file(path, cli.units)?,
        None => TextCorpus::default(),
    };
    log::info!("raining {} text units", corpus.len());
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut sim = RainSim::new(corpus, rng);
    let mut scene = Scene::new();
    let mut settings = Settings::new(cli.debug, cli.threshold);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        /* 1) Inputs */
        if drawer.d_pressed_once() {
            settings.toggle_debugging();
            log::info!("debug view {}", if settings.debugging() { "on" } else { "off" });
        }
        if drawer.up_pressed() {
            settings.nudge_threshold(THRESHOLD_STEP);
        }
        if drawer.down_pressed() {
            settings.nudge_threshold(-THRESHOLD_STEP);
        }

        /* 2) Latest frame -> mask -> rain. No frame means nothing moves this tick. */
        let frame = source.next_frame()?;
        sim.update(frame.as_ref(), &settings, dt, now, &mut scene)?;

        /* 3) Compose background + letters, then the HUD on top */
        scene.compose(&mut screen);
        let status = if settings.debugging() { "MASK" } else { "LIVE" };
        let hud = format!(
            "{} | T: {:.2} | N: {} | {}",
            status,
            settings.threshold(),
            sim.live_count(),
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 4) Present to the window */
        drawer.present(&screen)?;

        /* 5) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::info!("FPS: {:.1}, {} letters live", fps, sim.live_count());
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
