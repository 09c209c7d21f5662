//! Runtime settings: command line, environment and an optional TOML file.
//!
//! Precedence is command line / environment first, then the config file,
//! then built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use kobra_core::input::Layout;
use kobra_core::video::Strategy;
use serde::Deserialize;

pub const DEFAULT_FBDEV: &str = "/dev/fb0";
pub const DEFAULT_KBDEV: &str = "/dev/hidraw0";
pub const DEFAULT_SCALE: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "kobra", version, about = "Framebuffer and HID keyboard frontend")]
pub struct Cli {
    /// Framebuffer device to draw on.
    #[arg(long, env = "DOOM_FBDEV")]
    pub fbdev: Option<PathBuf>,

    /// hidraw device delivering boot keyboard reports.
    #[arg(long, env = "DOOM_KBDEV")]
    pub kbdev: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub keymap: Option<KeymapArg>,

    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Window scale factor (sdl backend only).
    #[arg(long)]
    pub scale: Option<u32>,

    /// Write the last presented frame to this PNG on exit.
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Config file (default: <config dir>/kobra/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapArg {
    Standard,
    Wasd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyArg {
    Auto,
    Scalar,
    Lanes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendArg {
    Fbdev,
    Sdl,
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub fbdev: Option<PathBuf>,
    pub kbdev: Option<PathBuf>,
    pub keymap: Option<KeymapArg>,
    pub strategy: Option<StrategyArg>,
    pub backend: Option<BackendArg>,
    pub scale: Option<u32>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fbdev: PathBuf,
    pub kbdev: PathBuf,
    pub layout: Layout,
    pub strategy: Strategy,
    pub backend: BackendArg,
    pub scale: u32,
    pub screenshot: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let layout = match cli.keymap.or(file.keymap) {
            Some(KeymapArg::Wasd) => Layout::Wasd,
            Some(KeymapArg::Standard) | None => Layout::Standard,
        };
        let strategy = match cli.strategy.or(file.strategy) {
            Some(StrategyArg::Scalar) => Strategy::Scalar,
            Some(StrategyArg::Lanes) => Strategy::Lanes,
            Some(StrategyArg::Auto) | None => Strategy::detect(),
        };

        Self {
            fbdev: cli
                .fbdev
                .clone()
                .or(file.fbdev)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FBDEV)),
            kbdev: cli
                .kbdev
                .clone()
                .or(file.kbdev)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KBDEV)),
            layout,
            strategy,
            backend: cli.backend.or(file.backend).unwrap_or(BackendArg::Fbdev),
            scale: cli.scale.or(file.scale).unwrap_or(DEFAULT_SCALE).max(1),
            screenshot: cli.screenshot.clone(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kobra").join("config.toml"))
}

/// Load the config file. An explicitly named file must exist; the default
/// location is allowed to be absent.
pub fn load_file(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(FileConfig::default()),
        },
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    parse_file(&text).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_file(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}
