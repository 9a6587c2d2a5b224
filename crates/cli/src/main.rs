#![deny(unsafe_code)]
//! CLI binary for the flowfield particle renderer.
//!
//! Subcommands:
//! - `render <effect>`: run an effect N frames, write a PNG
//! - `replay <recipe>`: re-render a saved recipe file
//! - `list`: print available effects, color sets, and oracles

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{ColorSet, OracleKind, Recipe};
use flowfield_effects::{EffectKind, Player};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Particle-field renderer CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an effect for N frames and write a PNG snapshot.
    Render {
        /// Effect name (e.g. "flow" or "drift").
        effect: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of animation frames to run.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Color set name (mono, indigo, ember, aurora).
        #[arg(short, long)]
        color_set: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Effect parameters as a JSON object string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Also write the run's recipe JSON to this path.
        #[arg(long)]
        emit_recipe: Option<PathBuf>,
    },
    /// Re-render a saved recipe file.
    Replay {
        /// Path to a recipe JSON file.
        recipe: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available effects, color sets, and oracles.
    List,
}

fn render(recipe: &Recipe, output: &PathBuf) -> Result<usize, CliError> {
    let mut player = Player::from_recipe(recipe)?;
    let rendered = player.run(recipe.frames)?;
    flowfield_effects::snapshot::write_png(player.surface(), output)?;
    Ok(rendered)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            let color_sets = ColorSet::list_names();
            let oracles = OracleKind::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "effects": effects,
                    "color_sets": color_sets,
                    "oracles": oracles,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
                println!("Color sets:");
                println!("  {}", color_sets.join(", "));
                println!("Oracles:");
                println!("  {}", oracles.join(", "));
            }
        }
        Command::Render {
            effect,
            width,
            height,
            frames,
            seed,
            color_set,
            output,
            params,
            emit_recipe,
        } => {
            let mut params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let Some(map) = params.as_object_mut() else {
                return Err(CliError::Input("--params must be a JSON object".into()));
            };
            if let Some(name) = color_set {
                map.insert("color_set".into(), serde_json::Value::String(name));
            }

            let recipe = Recipe {
                effect: effect.clone(),
                width,
                height,
                params,
                seed,
                frames,
            };
            let rendered = render(&recipe, &output)?;

            if let Some(path) = emit_recipe {
                fs::write(&path, serde_json::to_string_pretty(&recipe)?)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            }

            if cli.json {
                let info = serde_json::json!({
                    "effect": effect,
                    "width": width,
                    "height": height,
                    "frames": rendered,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {effect} ({width}x{height}, {rendered} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Replay { recipe, output } => {
            let text = fs::read_to_string(&recipe)
                .map_err(|e| CliError::Io(format!("{}: {e}", recipe.display())))?;
            let recipe: Recipe = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid recipe file: {e}")))?;
            let rendered = render(&recipe, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "effect": recipe.effect,
                    "width": recipe.width,
                    "height": recipe.height,
                    "frames": rendered,
                    "seed": recipe.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "replayed {} ({}x{}, {rendered} frames, seed {}) -> {}",
                    recipe.effect,
                    recipe.width,
                    recipe.height,
                    recipe.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
