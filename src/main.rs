use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use connect_four::config::GameConfig;
use connect_four::game::{GameEngine, Player, Snapshot};

/// Play Connect Four in the terminal.
///
/// Enter a column number to drop a piece, `r` to start over, `q` to quit.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override number of pieces in a row needed to win
    #[arg(long)]
    win_length: Option<usize>,

    /// Print every snapshot as a JSON line instead of drawing the board
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(win_length) = cli.win_length {
        config.board.win_length = win_length;
    }

    let mut engine = GameEngine::from_config(&config).context("creating game")?;
    let players = engine.players().to_vec();
    let json = cli.json;
    engine.subscribe(move |snapshot| {
        if let Err(e) = render(snapshot, &players, json) {
            debug!(error = %e, "failed to render snapshot");
        }
    });

    print_board(&engine, json)?;
    run(&mut engine)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read commands from stdin until EOF or `q`.
fn run(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "r" | "reset" => engine.reset(),
            input => match input.parse::<usize>() {
                // Rejected moves leave the game untouched, so just report them.
                Ok(column) => {
                    if let Err(e) = engine.apply_move(column) {
                        println!("{e}");
                    }
                }
                Err(_) => println!("unrecognised input '{input}' (column number, r, or q)"),
            },
        }
    }
    Ok(())
}

fn print_board(engine: &GameEngine, json: bool) -> Result<()> {
    render(&engine.snapshot(), engine.players(), json)
}

fn render(snapshot: &Snapshot, players: &[Player], json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut out, snapshot)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", snapshot.board)?;
    writeln!(out, "{}", snapshot.status_message(players))?;
    out.flush()?;
    Ok(())
}
