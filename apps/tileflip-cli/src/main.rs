use anyhow::Context;
use clap::{Parser, Subcommand};
use tileflip_render::{DebugTextRenderer, RenderView, Renderer};
use tileflip_layout::GridLayout;
use tileflip_scene::{Choreography, Scene, SceneConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tileflip-cli", about = "Inspect the tileflip grid and its flip animation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print every tile's position and outline color
    Layout {
        /// Emit the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the start delay of every row
    Delays,
    /// Print the scene as it looks at a point in time
    Sample {
        /// Seconds since the animation started
        #[arg(long, default_value = "0")]
        at: f64,
    },
}

fn build_scene(config: &SceneConfig) -> anyhow::Result<(GridLayout, Scene, Choreography)> {
    let (layout, scene, choreography) = config
        .build()
        .context("scene configuration is invalid")?;
    tracing::debug!(
        tiles = layout.len(),
        rows = scene.row_count(),
        tweens = choreography.timeline().len(),
        "scene built"
    );
    Ok((layout, scene, choreography))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = SceneConfig::default();
    let (layout, mut scene, mut choreography) = build_scene(&config)?;

    match cli.command {
        Commands::Info => {
            println!("tileflip-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tileflip_common::crate_info());
            println!("layout: {}", tileflip_layout::crate_info());
            println!("timeline: {}", tileflip_timeline::crate_info());
            println!("scene: {}", tileflip_scene::crate_info());
            println!("render: {}", tileflip_render::crate_info());
            println!("input: {}", tileflip_input::crate_info());
            let extent = config.grid.extent();
            println!(
                "grid: {}x{} tiles, extent ({:.2}, {:.2}, {:.2}), palette of {}",
                config.grid.rows,
                config.grid.columns,
                extent.x,
                extent.y,
                extent.z,
                config.palette.len()
            );
            let center = layout.center();
            println!(
                "grid center: ({:.2}, {:.2}, {:.2}), peak row delay {:.2}s",
                center.x,
                center.y,
                center.z,
                choreography.delays().peak()
            );
        }
        Commands::Layout { json } => {
            if json {
                let out = serde_json::to_string_pretty(&layout)
                    .context("failed to serialize layout")?;
                println!("{out}");
            } else {
                for tile in layout.iter() {
                    let p = tile.position;
                    println!(
                        "{} pos=({:.2}, {:.2}, {:.2}) color={}",
                        tile.coord, p.x, p.y, p.z, tile.color
                    );
                }
            }
        }
        Commands::Delays => {
            for (row, delay) in choreography.delays().delays().iter().enumerate() {
                println!("row {row:>3}: {delay:.3}s");
            }
        }
        Commands::Sample { at } => {
            anyhow::ensure!(at.is_finite() && at >= 0.0, "--at must be a non-negative time, got {at}");
            choreography.seek(&mut scene, at);
            let view = RenderView::from(&config.camera);
            print!("{}", DebugTextRenderer::new().render(&scene, &view));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_full_scene() {
        let (layout, scene, choreography) = build_scene(&SceneConfig::default()).unwrap();
        assert_eq!(layout.len(), 225);
        assert_eq!(scene.row_count(), 15);
        assert_eq!(choreography.delays().rows(), 15);
    }

    #[test]
    fn invalid_config_is_reported_with_context() {
        let mut config = SceneConfig::default();
        config.grid.rows = 0;
        let err = build_scene(&config).unwrap_err();
        assert!(format!("{err:#}").starts_with("scene configuration is invalid"));
    }
}
