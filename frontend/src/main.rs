use std::process::ExitCode;

use clap::Parser;
use kobra_core::core::{self as platform, Engine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod fbdev;
mod fbdev_platform;
mod hidraw;
#[cfg_attr(not(feature = "sdl"), allow(dead_code))]
mod input;
mod screenshot;
#[cfg(feature = "sdl")]
mod sdl_platform;
mod testcard;
#[cfg(feature = "sdl")]
mod video;

use config::{BackendArg, Cli, Settings};
use fbdev_platform::FbdevPlatform;
use testcard::TestCard;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = config::load_file(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, file);
    let mut engine = TestCard::new();
    info!(backend = ?settings.backend, "starting");

    match settings.backend {
        BackendArg::Fbdev => {
            let mut backend = FbdevPlatform::init(&settings, engine.resolution())?;
            platform::run(&mut engine, &mut backend);
            if let Some(path) = &settings.screenshot {
                backend.save_screenshot(path)?;
                info!(path = %path.display(), "screenshot saved");
            }
        }
        BackendArg::Sdl => run_sdl(&settings, &mut engine)?,
    }
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_sdl(settings: &Settings, engine: &mut TestCard) -> anyhow::Result<()> {
    let mut backend = sdl_platform::SdlPlatform::init(settings, engine.resolution())?;
    platform::run(engine, &mut backend);
    if let Some(path) = &settings.screenshot {
        backend.save_screenshot(path)?;
        info!(path = %path.display(), "screenshot saved");
    }
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_sdl(_settings: &Settings, _engine: &mut TestCard) -> anyhow::Result<()> {
    anyhow::bail!("this build has no SDL backend; rebuild with `--features sdl`")
}
