use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use sandbox_common::TileType;
use sandbox_game::{GameConfig, Session};
use sandbox_input::Action;
use sandbox_persist::{read_save, write_save};
use sandbox_render::TextCanvas;
use sandbox_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sandbox-cli", about = "CLI tool for sandbox tile worlds")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML game config; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and write it to a save file
    Generate {
        /// Output save file
        out: PathBuf,
        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Override the configured width in tiles
        #[arg(long)]
        cols: Option<usize>,
        /// Override the configured height in tiles
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Print a summary of a save file
    Inspect {
        save: PathBuf,
        /// Also describe the cell under this world-space point, as `x,y`
        #[arg(long, value_parser = parse_point)]
        at: Option<Vec2>,
    },
    /// Run frames with a scripted player and report where it ends up
    Simulate {
        /// Save file to start from; a fresh world is generated otherwise
        #[arg(long)]
        from: Option<PathBuf>,
        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Held walking direction
        #[arg(long, value_enum, default_value = "none")]
        walk: Walk,
        /// Jump every N frames (0 disables)
        #[arg(long, default_value = "0")]
        jump_every: u64,
        /// Break the tile under this screen point on the first frame, as `x,y`
        #[arg(long, value_parser = parse_point)]
        dig: Option<Vec2>,
        /// Write the resulting game to this save file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Draw the viewport around the player as text
    Render {
        /// Save file to render; a fresh world is generated otherwise
        #[arg(long)]
        from: Option<PathBuf>,
        /// Frames to run first so the player lands and the camera settles
        #[arg(long, default_value = "240")]
        settle: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Walk {
    None,
    Left,
    Right,
}

fn parse_point(text: &str) -> Result<Vec2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {text:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    Ok(match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    })
}

fn open_session(from: Option<&Path>, config: &GameConfig) -> anyhow::Result<Session> {
    Ok(match from {
        Some(path) => Session::from_save(&read_save(path)?, config, "cli")?,
        None => Session::new(config, "cli")?,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            out,
            seed,
            cols,
            rows,
        } => {
            if let Some(seed) = seed {
                config.world.seed = seed;
            }
            if let Some(cols) = cols {
                config.world.cols = cols;
            }
            if let Some(rows) = rows {
                config.world.rows = rows;
            }
            let session = Session::new(&config, "cli")?;
            write_save(&out, &session.capture())?;
            tracing::info!(path = %out.display(), "world written");
            println!(
                "Generated {}x{} world (seed={}) -> {}",
                config.world.cols,
                config.world.rows,
                config.world.seed,
                out.display()
            );
            println!("{}", WorldInspector::summary(session.world()));
        }
        Commands::Inspect { save, at } => {
            let file = read_save(&save)?;
            let (world, player) = file.restore()?;
            println!("{}", WorldInspector::summary(&world));
            match player {
                Some(p) => println!(
                    "Player: ({:.1}, {:.1}) facing {}",
                    p.x,
                    p.y,
                    if p.facing_right { "right" } else { "left" }
                ),
                None => println!("Player: none"),
            }
            if let Some(point) = at {
                println!("{}", WorldInspector::inspect_point(&world, point.x, point.y));
            }
        }
        Commands::Simulate {
            from,
            frames,
            walk,
            jump_every,
            dig,
            save,
        } => {
            let mut session = open_session(from.as_deref(), &config)?;
            let start = session.player().position();
            let walk_action = match walk {
                Walk::None => Action::Stop,
                Walk::Left => Action::MoveLeft,
                Walk::Right => Action::MoveRight,
            };

            let mut redraws = 0u64;
            let mut edits = 0usize;
            let mut blocked = 0u64;
            let mut respawns = 0u64;
            for frame in 0..frames {
                let mut actions = vec![walk_action];
                if jump_every > 0 && frame % jump_every == 0 {
                    actions.push(Action::Jump);
                }
                if let (0, Some(screen)) = (frame, dig) {
                    actions.push(Action::Break { screen });
                }
                let report = session.frame(&actions);
                redraws += u64::from(report.needs_redraw);
                edits += report.edits;
                blocked += u64::from(report.step.blocked_x);
                respawns += u64::from(report.step.respawned);
            }

            let end = session.player().position();
            tracing::info!(frames, redraws, edits, respawns, "simulation finished");
            println!("Simulated {frames} frames");
            println!("  start: ({:.1}, {:.1})", start.x, start.y);
            println!(
                "  end:   ({:.1}, {:.1}) on_ground={} anim={:?}",
                end.x,
                end.y,
                session.player().body().on_ground,
                session.player().anim()
            );
            println!("  redraw frames={redraws} edits={edits} blocked={blocked} respawns={respawns}");
            println!("  world hash={:#018x}", session.world().state_hash());

            if let Some(path) = save {
                write_save(&path, &session.capture())?;
                tracing::info!(path = %path.display(), "simulation saved");
                println!("Saved -> {}", path.display());
            }
        }
        Commands::Render { from, settle } => {
            let mut session = open_session(from.as_deref(), &config)?;
            for _ in 0..settle {
                if !session.frame(&[]).needs_redraw {
                    break;
                }
            }
            let viewport = config.viewport.size();
            let mut canvas = TextCanvas::new(
                viewport.x,
                viewport.y,
                session.world().tile_size() as f32,
            );
            let stats = session.render(&mut canvas);
            print!("{}", canvas.to_text());
            let camera = session.camera().position();
            println!(
                "camera=({:.1}, {:.1}) tiles_drawn={} visible_cells={} legend: {}=grass {}=dirt {}=stone {}=barrier @=player",
                camera.x,
                camera.y,
                stats.tiles_drawn,
                stats.visible_cells,
                TileType::Grass.glyph(),
                TileType::Dirt.glyph(),
                TileType::Stone.glyph(),
                TileType::Barrier.glyph(),
            );
        }
    }

    Ok(())
}
