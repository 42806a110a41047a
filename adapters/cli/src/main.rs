#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Radioactive Froggies in a terminal.

mod board;
mod config;
mod input;
mod session;
mod share_code;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use froggies_core::{Seed, WELCOME_BANNER};
use froggies_system_achievements::{Achievement, Achievements};
use froggies_system_daily_challenge::{seed_for_date, DailyLedger};
use froggies_world::{self as world, query, World};
use log::info;

use crate::{
    session::{Flow, Session},
    share_code::ShareCode,
};

/// Hunt radioactive frogs on a seeded board before your moves run out.
#[derive(Debug, Parser)]
#[command(name = "radioactive-froggies", version)]
struct Args {
    /// Seed for the board; a fresh one is drawn when omitted.
    #[arg(long)]
    seed: Option<i64>,
    /// Play today's daily challenge board.
    #[arg(long, conflicts_with = "seed")]
    daily: bool,
    /// Rebuild the board described by a share code.
    #[arg(long, conflicts_with_all = ["seed", "daily"])]
    code: Option<String>,
    /// TOML file overriding the engine tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read actions from a file instead of standard input.
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Entry point for the Radioactive Froggies command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut engine = config::load(args.config.as_deref())?;
    let today = chrono::Local::now().date_naive();
    let seed = if let Some(code) = &args.code {
        let code = ShareCode::decode(code).context("failed to read share code")?;
        engine = code.apply_to(engine);
        code.seed
    } else if args.daily {
        seed_for_date(today)
    } else {
        args.seed.map_or_else(world::fresh_seed, Seed::new)
    };

    let world = World::with_config(engine, seed).context("cannot build a board from these settings")?;
    info!("starting session with seed {seed}");
    let daily = args.daily.then_some(today);
    let mut session = Session::new(world, Achievements::new(), DailyLedger::new(), daily);

    println!("{WELCOME_BANNER}");
    println!("{}", session.describe());

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script at {}", path.display()))?;
            run(&mut session, BufReader::new(file), false)?;
        }
        None => run(&mut session, io::stdin().lock(), true)?,
    }

    println!("{}", farewell(&session));
    Ok(())
}

fn run(session: &mut Session, reader: impl BufRead, interactive: bool) -> Result<()> {
    if interactive {
        prompt(session)?;
    }
    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        match input::parse(&line) {
            Ok(Some(action)) => match session.perform(action) {
                Flow::Continue(text) => println!("{text}"),
                Flow::Quit => break,
            },
            Ok(None) => {}
            Err(error) => println!("{error:#}"),
        }
        if interactive {
            prompt(session)?;
        }
    }
    Ok(())
}

fn prompt(session: &Session) -> Result<()> {
    let snapshot = query::snapshot(session.world());
    let marker = if session.is_mega_armed() { "mega" } else { "probe" };
    print!("[{} left] {marker}> ", snapshot.moves_remaining);
    io::stdout().flush().context("failed to flush prompt")
}

fn farewell(session: &Session) -> String {
    let achievements = session.achievements();
    let stats = achievements.stats();
    let mut text = format!(
        "Games finished: {}  won: {}  achievements: {}/{}",
        stats.total_games,
        stats.total_wins,
        achievements.unlocked().count(),
        Achievement::ALL.len()
    );
    let completed = session.ledger().total_days_completed();
    if completed > 0 {
        text.push_str(&format!("\nDaily challenges completed: {completed}"));
    }
    text
}
