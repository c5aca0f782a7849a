use std::path::PathBuf;

use eyre::{Context, Result};
use matchcube_core::{CubeSnapshot, Game, Palette, RotationRequest, Score, TurnOutcome};
use matchcube_prefs::{Difficulty, Preferences};
use serde::Serialize;

use crate::bridge::LoggingBridge;

/// Rotating match-three cube puzzle
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Play a sequence of rotations and print the result as JSON.
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// Number of random quarter turns to apply before playing.
        #[arg(long)]
        scramble: Option<usize>,

        /// Rotations to apply, such as `x2:+90`, `y0:-90`, or `z1:180`.
        moves: Vec<RotationRequest>,
    },
    /// Print a freshly built cube as JSON.
    Show {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Preferences file to layer over the defaults.
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct SessionArgs {
    /// Preferences file to layer over the defaults.
    #[arg(long)]
    prefs: Option<PathBuf>,
    /// Side length of the cube.
    #[arg(long)]
    size: Option<usize>,
    /// RNG seed, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    /// Difficulty: easy, normal, hard, or expert.
    #[arg(long)]
    difficulty: Option<Difficulty>,
}
impl SessionArgs {
    fn preferences(&self) -> Result<Preferences> {
        let mut prefs = load_prefs(self.prefs.as_ref());
        if let Some(size) = self.size {
            prefs.cube_size = size;
        }
        if self.seed.is_some() {
            prefs.seed = self.seed;
        }
        if let Some(difficulty) = self.difficulty {
            prefs.difficulty = difficulty;
        }
        prefs.validate()?;
        Ok(prefs)
    }

    fn new_game(&self) -> Result<(Game<LoggingBridge>, Palette)> {
        let prefs = self.preferences()?;
        let palette = prefs.palette()?;
        let bridge = LoggingBridge::new(palette.clone(), prefs.resolve_delay_ms);
        let game = Game::new(prefs.game_params()?, bridge).context("error starting game")?;
        Ok((game, palette))
    }
}

#[derive(Serialize, Debug)]
struct PlayOutput {
    seed: u64,
    scramble: Vec<RotationRequest>,
    turns: Vec<TurnOutcome>,
    score: Score,
    cube: CubeSnapshot,
}

#[derive(Serialize, Debug)]
struct ShowOutput {
    seed: u64,
    palette: String,
    cube: CubeSnapshot,
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Play {
            session,
            scramble,
            moves,
        } => {
            let (mut game, palette) = session.new_game()?;
            let scramble = match scramble {
                Some(turns) => game.scramble(turns)?,
                None => vec![],
            };
            let turns = moves
                .into_iter()
                .map(|m| {
                    game.play_turn(m)
                        .wrap_err_with(|| format!("error applying {m}"))
                })
                .collect::<Result<Vec<_>>>()?;
            log::info!("final score: {}", game.score());
            write_json_output(&PlayOutput {
                seed: game.seed(),
                scramble,
                turns,
                score: game.score(),
                cube: game.cube().snapshot(&palette),
            })
        }

        Subcommand::Show { session } => {
            let (game, palette) = session.new_game()?;
            write_json_output(&ShowOutput {
                seed: game.seed(),
                palette: palette.name.clone(),
                cube: game.cube().snapshot(&palette),
            })
        }

        Subcommand::Prefs { prefs } => {
            print!("{}", load_prefs(prefs.as_ref()).to_yaml()?);
            Ok(())
        }
    }
}

fn load_prefs(path: Option<&PathBuf>) -> Preferences {
    Preferences::load(path.map(PathBuf::as_path))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
