//! Pulse icons CLI - inspect device and platform icon resolution

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use pulse_icons::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulse-icons")]
#[command(author, version, about = "Resolve device and platform icons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to <config dir>/pulse-icons/icons.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the device image directory
    #[arg(long, global = true)]
    images_dir: Option<PathBuf>,

    /// Override the platform icon directory
    #[arg(long, global = true)]
    icons_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log catalog and matching decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a device name to an icon
    Resolve {
        /// Device name as reported by discovery
        name: String,
    },

    /// Resolve a platform identifier to an icon
    Platform {
        /// Platform identifier, e.g. "windows"
        id: String,
    },

    /// Show how a device name is parsed and matched
    Inspect {
        /// Device name as reported by discovery
        name: String,
    },

    /// List a catalog
    Catalog {
        /// List platform icons instead of device images
        #[arg(long)]
        platform: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = load_config(&cli)?;
    let service = IconService::from_config(&config).context("Invalid icon configuration")?;

    match &cli.command {
        Commands::Resolve { name } => resolve(&service, name, cli.json),
        Commands::Platform { id } => platform(&service, id, cli.json),
        Commands::Inspect { name } => inspect(&service, name, cli.json),
        Commands::Catalog { platform } => {
            if *platform {
                platform_catalog(&service, cli.json)
            } else {
                device_catalog(&service, cli.json)
            }
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("pulse_icons={default_level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pulse-icons").map(|dirs| dirs.config_dir().join("icons.toml"))
}

fn load_config(cli: &Cli) -> Result<IconConfig> {
    let mut config = match &cli.config {
        Some(path) => IconConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Using config {}", path.display());
                IconConfig::load(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            }
            None => IconConfig::default(),
        },
    };

    if let Some(dir) = &cli.images_dir {
        config.images_dir = dir.clone();
    }
    if let Some(dir) = &cli.icons_dir {
        config.icons_dir = dir.clone();
    }
    Ok(config)
}

fn kind_label(icon: &IconReference) -> &'static str {
    match icon {
        IconReference::Raster(_) => "raster",
        IconReference::Vector(_) => "vector",
        IconReference::Default(_) => "default",
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve(service: &IconService, name: &str, as_json: bool) -> Result<()> {
    let icon = service.device_icon(name);
    let raster = service.is_raster_image(&icon);

    if as_json {
        return print_json(&json!({
            "name": name,
            "icon": icon,
            "raster": raster,
        }));
    }

    println!("{} ({})", icon, kind_label(&icon));
    Ok(())
}

fn platform(service: &IconService, id: &str, as_json: bool) -> Result<()> {
    let icon = service.platform_icon(id);

    if as_json {
        return print_json(&json!({
            "platform": id,
            "icon": icon,
        }));
    }

    match icon {
        Some(icon) => println!("{} ({})", icon, kind_label(&icon)),
        None => println!("No icon for platform '{}'", id),
    }
    Ok(())
}

fn inspect(service: &IconService, name: &str, as_json: bool) -> Result<()> {
    let resolution = service.device().resolve_detailed(name);

    if as_json {
        return print_json(&json!({
            "name": name,
            "resolution": resolution,
        }));
    }

    println!("Name:       {}", name);
    match &resolution.descriptor {
        Some(descriptor) => {
            println!("Brand:      {}", descriptor.brand);
            println!("Model:      {}", descriptor.model);
            println!("Full model: {}", descriptor.full_model);
        }
        None => println!("Brand:      (none)"),
    }
    let pass = match resolution.pass {
        Some(MatchPass::Strong) => "strong",
        Some(MatchPass::Loose) => "loose",
        None => "none",
    };
    println!("Match:      {}", pass);
    println!("Icon:       {} ({})", resolution.icon, kind_label(&resolution.icon));
    Ok(())
}

fn device_catalog(service: &IconService, as_json: bool) -> Result<()> {
    let catalog = service
        .device()
        .catalog()
        .context("Failed to build device catalog")?;

    if as_json {
        let entries: Vec<_> = catalog
            .iter()
            .map(|entry| json!({ "stem": entry.stem(), "asset": entry.asset() }))
            .collect();
        return print_json(&serde_json::Value::Array(entries));
    }

    for entry in catalog.iter() {
        println!("{}\t{}", entry.stem(), entry.asset());
    }
    println!("{} entries", catalog.len());
    Ok(())
}

fn platform_catalog(service: &IconService, as_json: bool) -> Result<()> {
    let catalog = service
        .platform()
        .catalog()
        .context("Failed to build platform catalog")?;

    if as_json {
        let entries: Vec<_> = catalog
            .platforms()
            .into_iter()
            .map(|id| json!({ "platform": id, "asset": catalog.get(id) }))
            .collect();
        return print_json(&serde_json::Value::Array(entries));
    }

    for id in catalog.platforms() {
        if let Some(asset) = catalog.get(id) {
            println!("{}\t{}", id, asset);
        }
    }
    println!("{} entries", catalog.len());
    Ok(())
}
