//! Event printer demo
//!
//! Opens a session window, prints every event and the frame delta, and quits
//! on Escape. An optional `.toml` or `.ron` session config can be passed as
//! the only argument.

use quickwindow::foundation::logging;
use quickwindow::prelude::*;

fn load_config() -> SessionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SessionConfig::default();
    };
    match SessionConfig::load_from_file(&path) {
        Ok(config) => {
            log::info!("Loaded session config from {path}");
            config
        }
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    logging::init_with_default("info");

    let mut config = load_config();
    config.quit_key.get_or_insert(Key::Escape);

    let glfw = match Glfw::load() {
        Ok(glfw) => glfw,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut session = SessionBuilder::new(&glfw).config(config).open_or_exit();
    let result = session.run(|_, frame| {
        for event in &frame.events {
            println!("{event:?}");
        }
        println!("\u{394}time: {}", frame.dt);
    });

    if let Err(e) = result {
        log::error!("Session failed: {e}");
        std::process::exit(1);
    }
}
