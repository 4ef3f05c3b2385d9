//! Starfield entry point
//!
//! On the web, mounts the animation on `#starfield`. Natively, runs the
//! headless host for a few seconds of simulated frames and logs what it drew.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use starfield::StarfieldConfig;
    use starfield::platform::web::{StarfieldHandle, init_logging, mount};

    thread_local! {
        /// Keeps the page's starfield alive for the lifetime of the page
        static ACTIVE: RefCell<Option<StarfieldHandle>> = const { RefCell::new(None) };
    }

    pub fn run() {
        init_logging();
        log::info!("Starfield starting...");

        match mount("starfield", StarfieldConfig::default()) {
            Ok(handle) => {
                ACTIVE.with(|active| *active.borrow_mut() = Some(handle));
                log::info!("Starfield running!");
            }
            Err(e) => log::warn!("Starfield disabled: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use starfield::platform::HeadlessHost;
    use starfield::{InputEvent, PointerInput, Starfield, StarfieldConfig, Viewport};

    env_logger::init();
    log::info!("Starfield (native, headless) starting...");
    log::info!("Browser build: mount with `mountStarfield(canvasId, configJson)`");

    let config = match std::env::args().nth(1) {
        Some(path) => StarfieldConfig::from_file(&path).unwrap_or_else(|e| {
            log::warn!("{}: {}, using default config", path, e);
            StarfieldConfig::default()
        }),
        None => StarfieldConfig::default(),
    };

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 600;

    let mut starfield = Starfield::new(HeadlessHost::new(Viewport::new(800.0, 600.0)), config);
    if let Err(e) = starfield.mount() {
        log::error!("Mount failed: {}", e);
        return;
    }

    for frame in 0..FRAMES {
        let t = frame as f64 * FRAME_MS;

        // Sweep the pointer in a slow circle around the center
        let angle = frame as f32 * 0.02;
        let pointer = Vec2::new(400.0, 300.0) + starfield::unit_vector(angle) * 200.0;
        starfield.emit(InputEvent::Move(PointerInput::Mouse(pointer)));

        if frame % 45 == 0 {
            starfield.emit(InputEvent::Press(PointerInput::Mouse(pointer)));
        }
        if frame == FRAMES / 2 {
            starfield.emit(InputEvent::Resize(Viewport::new(400.0, 300.0)));
        }

        starfield.advance(t);

        if frame % 120 == 0 {
            if let (Some(sim), Some(surface)) = (starfield.simulation(), starfield.surface()) {
                log::info!(
                    "frame {:>3}: {} stars, {} bursts, {} glows painted",
                    frame,
                    sim.stars.len(),
                    sim.bursts.len(),
                    surface.glows().count()
                );
            }
        }
    }

    starfield.unmount();
    println!("✓ Ran {} headless frames", FRAMES);
}
