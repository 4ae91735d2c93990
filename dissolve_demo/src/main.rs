//! Dissolve demo application
//!
//! Headless driver for the dissolve effect. Builds the sphere/box scene,
//! applies the control events given on the command line and steps the reveal
//! cycle with a fixed-rate frame timer, logging the uniform values and how
//! much of the surface each frame leaves visible.
//!
//! Example:
//!   cargo run -p dissolve_demo -- --pattern noise --noise-scale 2 --frames 300

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use dissolve_fx::effect::shading::visible_fraction;
use dissolve_fx::foundation::logging;
use dissolve_fx::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive the dissolve effect headlessly", long_about = None)]
struct Args {
    /// Settings file (.toml or .ron); defaults apply when it does not exist
    #[arg(long, default_value = "resources/dissolve.toml")]
    config: PathBuf,

    /// Override the asset directory from the settings file
    #[arg(long)]
    assets_dir: Option<String>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Noise pattern button to press: h, v or n
    #[arg(long)]
    pattern: Option<NoisePattern>,

    /// Threshold slider value; only used with --no-reveal, since the cycle starts at 1.0
    #[arg(long)]
    threshold: Option<f32>,

    /// Noise scale slider value
    #[arg(long)]
    noise_scale: Option<f32>,

    /// Keep the primary texture on the diffuse channel
    #[arg(long)]
    keep_distinct: bool,

    /// Skip the reveal cycle and only apply the slider values
    #[arg(long)]
    no_reveal: bool,

    /// Log every Nth frame
    #[arg(long, default_value_t = 15)]
    log_every: u32,

    /// Grid resolution used to measure visible coverage
    #[arg(long, default_value_t = 32)]
    sample_resolution: u32,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

type AssetChain = Fallback<AssetDirectory, ProceduralAssets>;

struct DissolveDemo {
    setup: DissolveSetup,
    textures: TextureLibrary<AssetChain>,
    timer: Timer,
    reveal_duration: f32,
    sample_resolution: u32,
}

impl DissolveDemo {
    fn new(config: &DissolveConfig, sample_resolution: u32) -> Result<Self, AppError> {
        log::info!("Creating dissolve demo from assets in '{}'...", config.assets.assets_dir);
        let assets = Fallback::new(
            AssetDirectory::new(&config.assets.assets_dir),
            ProceduralAssets::default(),
        );
        let mut textures = TextureLibrary::new(assets.clone());
        let setup = DissolveSetup::build(config, &mut textures, &assets, &assets)?;

        Ok(Self {
            setup,
            textures,
            timer: Timer::fixed_rate(config.engine.target_fps),
            reveal_duration: config.effect.reveal_duration,
            sample_resolution,
        })
    }

    fn apply_controls(&mut self, args: &Args) -> Result<(), AppError> {
        let controller = &mut self.setup.controller;

        if let Some(value) = args.threshold {
            if args.no_reveal {
                controller.set_threshold(value);
            } else {
                log::warn!("Ignoring --threshold {} while the reveal cycle runs; pass --no-reveal to hold it", value);
            }
        }
        if let Some(value) = args.noise_scale {
            controller.set_noise_scale(value);
        }
        if args.keep_distinct {
            controller.set_keep_distinct_diffuse_texture(true);
        }
        if let Some(pattern) = args.pattern {
            let texture = controller.select_noise_pattern(pattern, &mut self.textures)?;
            log::info!("Pattern '{}' installed as '{}'", pattern, texture.name());
        }
        if !args.no_reveal {
            controller.trigger_reveal(self.reveal_duration);
        }
        Ok(())
    }

    fn coverage(&self) -> Option<f32> {
        let controller = &self.setup.controller;
        let noise = self.textures.registry().image(controller.last_noise_texture())?;
        Some(visible_fraction(noise, &controller.uniform_block(), self.sample_resolution))
    }

    fn run(&mut self, frames: u32, log_every: u32) {
        let log_every = log_every.max(1);
        log::info!("Running {} frames", frames);

        for _ in 0..frames {
            let delta = self.timer.update();
            let pushed = self.setup.controller.update(delta);

            if self.timer.frame_count() % u64::from(log_every) == 0 {
                let controller = &self.setup.controller;
                log::info!(
                    "t={:.2}s {:?} dissolveStage={:.3} noiseScale={:.2} visible={:.1}%{}",
                    self.timer.total_time(),
                    controller.reveal_phase(),
                    controller.threshold(),
                    controller.noise_scale(),
                    self.coverage().unwrap_or(0.0) * 100.0,
                    if pushed.is_some() { "" } else { " (idle)" }
                );
            }
        }
    }

    fn report(&self) {
        let controller = &self.setup.controller;
        let state = controller.state();
        log::info!(
            "Finished after {} frames: threshold={:.3} scale={:.2} diffuse={:?} noise='{}' legs={}",
            self.timer.frame_count(),
            state.threshold,
            state.noise_scale,
            state.diffuse_source,
            controller.last_noise_texture().name(),
            controller.reveal().legs_completed()
        );
        for surface in self.setup.binding.surfaces() {
            log::info!(
                "Surface '{}' bound: {}",
                surface,
                self.setup.binding.is_bound_in(&self.setup.scene, surface)
            );
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = DissolveConfig::load_or_default(&args.config)?;
    if let Some(dir) = &args.assets_dir {
        config.assets.assets_dir = dir.clone();
    }
    if let Some(fps) = args.fps {
        config.engine.target_fps = fps;
    }

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting dissolve demo...");

    let mut demo = match DissolveDemo::new(&config, args.sample_resolution) {
        Ok(demo) => demo,
        Err(e) => {
            log::error!("Failed to set up dissolve effect: {}", e);
            return Err(e);
        }
    };

    demo.apply_controls(&args)?;
    demo.run(args.frames, args.log_every);
    demo.report();

    log::info!("Dissolve demo completed");
    Ok(())
}
