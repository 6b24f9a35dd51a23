//! # Arrowfield Demo Entry Point
//!
//! Opens a window, follows the mouse with the local player's arrow, and
//! lets a handful of opponents wander around it.

use arrowfield::config::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, TARGET_FPS};
use arrowfield::{ArrowfieldResult, MacroquadDisplay, Renderer, RendererConfig};
use clap::Parser;
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::info;

/// Command line arguments for the Arrowfield demo.
#[derive(Parser, Debug)]
#[command(name = "arrowfield")]
#[command(about = "Draws player and opponent sprites in a window")]
#[command(version)]
struct Args {
    /// JSON file overriding sprite paths and size
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of wandering opponents
    #[arg(short, long, default_value_t = 6)]
    others: usize,

    /// Random seed for opponent motion
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// An opponent drifting across the window.
struct Wanderer {
    position: Vec2,
    heading: f32,
    speed: f32,
}

impl Wanderer {
    fn spawn(rng: &mut StdRng, width: f32, height: f32) -> Self {
        Self {
            position: vec2(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            heading: rng.gen_range(0.0..360.0),
            speed: rng.gen_range(40.0..120.0),
        }
    }

    fn step(&mut self, rng: &mut StdRng, dt: f32, width: f32, height: f32) {
        self.heading = (self.heading + rng.gen_range(-90.0_f32..90.0) * dt).rem_euclid(360.0);
        let direction = Vec2::from_angle(self.heading.to_radians());
        self.position += direction * self.speed * dt;
        self.position.x = self.position.x.rem_euclid(width.max(1.0));
        self.position.y = self.position.y.rem_euclid(height.max(1.0));
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Arrowfield".to_string(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> ArrowfieldResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Arrowfield v{}", arrowfield::VERSION);

    let config = match &args.config {
        Some(path) => RendererConfig::load(path)?,
        None => RendererConfig::default(),
    };

    run_demo(&args, &config).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

/// Main render loop.
async fn run_demo(args: &Args, config: &RendererConfig) -> ArrowfieldResult<()> {
    let seed = args.seed.unwrap_or(12345);
    info!("Spawning {} opponents with seed {}", args.others, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut others: Vec<Wanderer> = (0..args.others)
        .map(|_| Wanderer::spawn(&mut rng, screen_width(), screen_height()))
        .collect();

    let mut display = MacroquadDisplay::new();
    let mut renderer = Renderer::with_config(&mut display, config);

    let frame_budget = 1.0 / TARGET_FPS as f32;
    let mut player = vec2(screen_width() / 2.0, screen_height() / 2.0);
    let mut orientation = 0.0_f32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("Player quit the demo");
            break;
        }

        let dt = get_frame_time().min(frame_budget * 4.0);
        let (width, height) = (screen_width(), screen_height());

        let target = Vec2::from(mouse_position());
        let travel = target - player;
        if travel.length() > 1.0 {
            orientation = travel.y.atan2(travel.x).to_degrees();
            player += travel * (8.0 * dt).min(1.0);
        }

        for other in &mut others {
            other.step(&mut rng, dt, width, height);
        }

        renderer.clear();
        for other in &others {
            renderer.draw_other(other.position.x, other.position.y, other.heading, 16.0);
        }
        renderer.draw_self(player.x, player.y, orientation, 16.0);

        next_frame().await;
    }

    info!("Demo loop ended");
    Ok(())
}
