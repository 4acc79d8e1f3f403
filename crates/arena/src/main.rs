//! Bot-versus-bot arena for the UCT searcher.
//!
//! Plays independent games between two configured bots, a red one and a
//! blue one, alternating which of them moves first, and reports wins, ties
//! and the average score margin.

mod bots;

use anyhow::{bail, Context, Result};
use bots::{BotsFile, Preset};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use uct_core::{GameState, Outcome, Player};
use uct_mcts::games::{DotsAndBoxes, TicTacToe};
use uct_mcts::{decide, Uct, UctConfig};

/// Levels of the dumped tree below the root.
const DUMP_HORIZON: usize = 100;

/// UCT arena: pit search configurations against each other.
#[derive(Parser)]
#[command(name = "uct-arena")]
#[command(about = "Play UCT bots against each other")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games between the red and the blue bot.
    Play(PlayArgs),
}

#[derive(clap::Args, Clone, Debug)]
struct PlayArgs {
    /// Game to play.
    #[arg(long, value_enum, default_value = "boxes")]
    game: GameKind,

    /// Number of games to play.
    #[arg(short, long, default_value = "10")]
    games: usize,

    /// Search preset for the red bot.
    #[arg(long, value_enum, default_value = "modified")]
    red: Preset,

    /// Search preset for the blue bot.
    #[arg(long, value_enum, default_value = "vanilla")]
    blue: Preset,

    /// Override both bots with a fixed number of iterations per move.
    #[arg(long, conflicts_with = "time")]
    iterations: Option<usize>,

    /// Override both bots with a deadline in seconds per move.
    #[arg(long)]
    time: Option<f64>,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Dots-and-boxes board size in boxes, as WIDTHxHEIGHT.
    #[arg(long, default_value = "3x3", value_parser = parse_size)]
    size: (usize, usize),

    /// TOML file whose [red] and [blue] tables replace the presets.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append every searched tree to this file.
    #[arg(long)]
    dump_tree: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Tictactoe,
    Boxes,
}

/// One of the two bots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seat {
    Red,
    Blue,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Red => write!(f, "red"),
            Seat::Blue => write!(f, "blue"),
        }
    }
}

/// Result of one finished game, from the bots' point of view.
#[derive(Debug)]
struct GameRecord {
    /// Winning bot, `None` for a tie.
    winner: Option<Seat>,

    /// Red's score minus blue's score.
    margin: f32,

    /// Moves played.
    moves: usize,

    /// Rendered search trees, one per searched move, if requested.
    dumps: Vec<String>,
}

/// Aggregate over all games of a match.
#[derive(Debug, Default, PartialEq)]
struct MatchSummary {
    red_wins: usize,
    blue_wins: usize,
    ties: usize,
    total_margin: f32,
    games: usize,
}

impl MatchSummary {
    fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.winner {
                Some(Seat::Red) => summary.red_wins += 1,
                Some(Seat::Blue) => summary.blue_wins += 1,
                None => summary.ties += 1,
            }
            summary.total_margin += record.margin;
            summary.games += 1;
        }
        summary
    }

    fn average_margin(&self) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.total_margin / self.games as f32
        }
    }
}

fn parse_size(text: &str) -> Result<(usize, usize), String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", text))?;
    let w: usize = w.trim().parse().map_err(|e| format!("bad width {:?}: {}", w, e))?;
    let h: usize = h.trim().parse().map_err(|e| format!("bad height {:?}: {}", h, e))?;
    if w == 0 || h == 0 {
        return Err("board must have at least one box".to_string());
    }
    Ok((w, h))
}

/// Resolve the red and blue configurations from presets, the bot file and
/// the budget overrides, in that order.
fn resolve_configs(args: &PlayArgs) -> Result<(UctConfig, UctConfig)> {
    let mut red = args.red.config();
    let mut blue = args.blue.config();

    if let Some(path) = &args.config {
        let file = BotsFile::load(path)?;
        if let Some(config) = file.red {
            red = config;
        }
        if let Some(config) = file.blue {
            blue = config;
        }
    }

    if let Some(iterations) = args.iterations {
        red = red.iterations(iterations);
        blue = blue.iterations(iterations);
    }
    if let Some(seconds) = args.time {
        if seconds.is_nan() || seconds < 0.0 {
            bail!("--time must be a non-negative number of seconds, got {}", seconds);
        }
        red = red.time_seconds(seconds);
        blue = blue.time_seconds(seconds);
    }

    Ok((red, blue))
}

/// Play one game from `initial`. Red moves first when `red_first` is set.
fn play_game<G>(
    initial: &G,
    red_config: &UctConfig,
    blue_config: &UctConfig,
    red_first: bool,
    seed: u64,
    dump: bool,
) -> Result<GameRecord>
where
    G: GameState + fmt::Display,
{
    let mut red = Uct::new(red_config.clone(), ChaCha8Rng::seed_from_u64(seed));
    let mut blue = Uct::new(
        blue_config.clone(),
        ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
    );

    let first = initial.player_turn();
    let red_player = if red_first { first } else { first.opponent() };
    let seat_of = |player: G::Player| {
        if player == red_player {
            Seat::Red
        } else {
            Seat::Blue
        }
    };

    let mut state = initial.clone();
    let mut moves = 0;
    let mut dumps = Vec::new();

    while !state.is_terminal() {
        let seat = seat_of(state.player_turn());
        let uct = match seat {
            Seat::Red => &mut red,
            Seat::Blue => &mut blue,
        };

        let mv = if dump {
            let tree = uct.build_tree(&state)?;
            dumps.push(format!(
                "# game seed {}, move {}, {} to play\n{}",
                seed,
                moves,
                seat,
                tree.render(DUMP_HORIZON, 1)
            ));
            decide(&tree, &state, uct.config())?
        } else {
            uct.think(&state)?
        };

        debug!(seed, moves, %seat, mv = ?mv, "Move played");
        state.apply_move(mv);
        moves += 1;
    }

    let winner = match state.outcome() {
        Some(Outcome::Winner(player)) => Some(seat_of(player)),
        Some(Outcome::Tie) | None => None,
    };
    let margin = state.score(red_player) - state.score(red_player.opponent());
    debug!(seed, moves, ?winner, margin, "Game over\n{}", state);

    Ok(GameRecord {
        winner,
        margin,
        moves,
        dumps,
    })
}

/// Play `args.games` games from `initial` in parallel.
fn play_match<G>(initial: &G, args: &PlayArgs, red: &UctConfig, blue: &UctConfig) -> Result<Vec<GameRecord>>
where
    G: GameState + fmt::Display + Send + Sync,
{
    let dump = args.dump_tree.is_some();
    (0..args.games)
        .into_par_iter()
        .map(|i| {
            let game_seed = args.seed.wrapping_add(i as u64 * 1000);
            play_game(initial, red, blue, i % 2 == 0, game_seed, dump)
                .with_context(|| format!("Game {} (seed {}) failed", i, game_seed))
        })
        .collect()
}

fn write_dumps(path: &Path, records: &[GameRecord]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open tree dump {:?}", path))?;
    for dump in records.iter().flat_map(|r| &r.dumps) {
        writeln!(file, "{}", dump).with_context(|| format!("Failed to write tree dump {:?}", path))?;
    }
    Ok(())
}

/// Run the play command.
fn cmd_play(args: PlayArgs) -> Result<()> {
    let (red, blue) = resolve_configs(&args)?;
    info!(game = ?args.game, games = args.games, seed = args.seed, "Starting match");
    info!(?red, "Red bot");
    info!(?blue, "Blue bot");

    let start = Instant::now();
    let records = match args.game {
        GameKind::Tictactoe => play_match(&TicTacToe::new(), &args, &red, &blue)?,
        GameKind::Boxes => {
            let (width, height) = args.size;
            play_match(&DotsAndBoxes::new(width, height), &args, &red, &blue)?
        }
    };
    let elapsed = start.elapsed();

    if let Some(path) = &args.dump_tree {
        write_dumps(path, &records)?;
        info!(path = ?path, "Search trees written");
    }

    let summary = MatchSummary::from_records(&records);
    let total_moves: usize = records.iter().map(|r| r.moves).sum();
    let pct = |n: usize| {
        if summary.games == 0 {
            0.0
        } else {
            n as f32 / summary.games as f32 * 100.0
        }
    };

    println!("\n================================================");
    println!("FINAL RESULTS ({} games in {:.2}s)", summary.games, elapsed.as_secs_f64());
    println!("================================================");
    println!("Red ({:?}) wins:  {} ({:.1}%)", args.red, summary.red_wins, pct(summary.red_wins));
    println!("Blue ({:?}) wins: {} ({:.1}%)", args.blue, summary.blue_wins, pct(summary.blue_wins));
    println!("Ties:             {} ({:.1}%)", summary.ties, pct(summary.ties));
    println!("------------------------------------------------");
    println!("Average margin (red - blue): {:+.2}", summary.average_margin());
    println!("Total moves: {}", total_moves);

    Ok(())
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play(args) => cmd_play(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uct_mcts::Budget;

    fn args(game: GameKind) -> PlayArgs {
        PlayArgs {
            game,
            games: 2,
            red: Preset::Modified,
            blue: Preset::Vanilla,
            iterations: Some(50),
            time: None,
            seed: 7,
            size: (2, 2),
            config: None,
            dump_tree: None,
        }
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("3x2"), Ok((3, 2)));
        assert_eq!(parse_size("4X4"), Ok((4, 4)));
        assert!(parse_size("0x3").is_err());
        assert!(parse_size("3").is_err());
        assert!(parse_size("ax3").is_err());
    }

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from([
            "uct-arena", "play", "--game", "tictactoe", "--games", "4", "--red", "vanilla",
            "--time", "0.5", "--size", "2x3",
        ])
        .unwrap();

        let Commands::Play(args) = cli.command;
        assert_eq!(args.game, GameKind::Tictactoe);
        assert_eq!(args.games, 4);
        assert_eq!(args.red, Preset::Vanilla);
        assert_eq!(args.blue, Preset::Vanilla);
        assert_eq!(args.time, Some(0.5));
        assert_eq!(args.size, (2, 3));
    }

    #[test]
    fn test_cli_rejects_two_budgets() {
        let result = Cli::try_parse_from(["uct-arena", "play", "--iterations", "10", "--time", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_budget_override() {
        let (red, blue) = resolve_configs(&args(GameKind::Boxes)).unwrap();
        assert_eq!(red.budget, Budget::Iterations(50));
        assert_eq!(blue.budget, Budget::Iterations(50));
        assert_eq!(red.heuristic, UctConfig::modified().heuristic);

        let mut timed = args(GameKind::Boxes);
        timed.iterations = None;
        timed.time = Some(-1.0);
        assert!(resolve_configs(&timed).is_err());
    }

    #[test]
    fn test_play_boxes_game() {
        let args = args(GameKind::Boxes);
        let (red, blue) = resolve_configs(&args).unwrap();
        let record = play_game(&DotsAndBoxes::new(2, 2), &red, &blue, true, 3, false).unwrap();

        // Every one of the 12 lines is drawn exactly once.
        assert_eq!(record.moves, 12);
        assert!(record.margin.abs() <= 4.0);
        match record.winner {
            Some(Seat::Red) => assert!(record.margin > 0.0),
            Some(Seat::Blue) => assert!(record.margin < 0.0),
            None => assert_eq!(record.margin, 0.0),
        }
        assert!(record.dumps.is_empty());
    }

    #[test]
    fn test_play_with_dumps() {
        let config = UctConfig::with_iterations(20);
        let record = play_game(&TicTacToe::new(), &config, &config, false, 5, true).unwrap();

        assert_eq!(record.dumps.len(), record.moves);
        assert!(record.dumps[0].contains("blue to play"));
        assert!(record.dumps[0].contains("[root, "));
    }

    #[test]
    fn test_match_alternates_and_summarizes() {
        let mut args = args(GameKind::Tictactoe);
        args.games = 4;
        let (red, blue) = resolve_configs(&args).unwrap();

        let records = play_match(&TicTacToe::new(), &args, &red, &blue).unwrap();
        let summary = MatchSummary::from_records(&records);

        assert_eq!(summary.games, 4);
        assert_eq!(summary.red_wins + summary.blue_wins + summary.ties, 4);
    }

    #[test]
    fn test_summary_average_margin() {
        let record = |winner, margin| GameRecord {
            winner,
            margin,
            moves: 0,
            dumps: Vec::new(),
        };
        let summary = MatchSummary::from_records(&[
            record(Some(Seat::Red), 3.0),
            record(None, 0.0),
            record(Some(Seat::Blue), -1.0),
        ]);

        assert_eq!(summary.red_wins, 1);
        assert_eq!(summary.blue_wins, 1);
        assert_eq!(summary.ties, 1);
        assert!((summary.average_margin() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(MatchSummary::default().average_margin(), 0.0);
    }
}
