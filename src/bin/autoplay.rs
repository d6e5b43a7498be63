//! Play heuristic-vs-heuristic matches and print the results.
//!
//! ```text
//! autoplay [--games N] [--seed S] [--max-rounds R] [CATALOG.json]
//! ```
//!
//! Uses the built-in roster when no catalog file is given. Set `RUST_LOG` to
//! control log output (default `info`).

use anyhow::{bail, Context};
use tracing::{info, warn};

use guardian_battles::cards::{CardCatalog, CatalogProvider, JsonFileProvider, RosterProvider};
use guardian_battles::core::{Controller, GameRng, MatchConfig, Side};
use guardian_battles::game::{Match, MatchOutcome};

struct Args {
    games: u32,
    seed: Option<u64>,
    max_rounds: u32,
    catalog: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        games: 1,
        seed: None,
        max_rounds: 10_000,
        catalog: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--games" => {
                let v = it.next().context("--games needs a value")?;
                args.games = v.parse().with_context(|| format!("bad --games: {v}"))?;
            }
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                args.seed = Some(v.parse().with_context(|| format!("bad --seed: {v}"))?);
            }
            "--max-rounds" => {
                let v = it.next().context("--max-rounds needs a value")?;
                args.max_rounds = v.parse().with_context(|| format!("bad --max-rounds: {v}"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            path => args.catalog = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn load_catalog(path: Option<&str>) -> anyhow::Result<CardCatalog> {
    let catalog = match path {
        Some(p) => JsonFileProvider::new(p)
            .fetch()
            .with_context(|| format!("loading catalog {p}"))?,
        None => RosterProvider.fetch()?,
    };
    Ok(catalog)
}

/// Drive one match to completion. `None` if it hit the round cap.
fn play(game: &mut Match, max_rounds: u32) -> anyhow::Result<Option<MatchOutcome>> {
    game.start()?;
    while !game.is_over() {
        if game.round() >= max_rounds {
            warn!(rounds = game.round(), "round cap reached");
            return Ok(None);
        }
        game.submit_automated_choice()?;
        game.continue_round()?;
    }
    Ok(game.outcome())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args()?;
    let catalog = load_catalog(args.catalog.as_deref())?;
    info!(cards = catalog.len(), "catalog loaded");

    let config = MatchConfig::default().with_controller(Side::Player, Controller::Heuristic);
    let rng = GameRng::from_seed_or_entropy(args.seed);
    let mut game = Match::with_shuffler(&catalog, config, rng);

    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    let mut unfinished = 0u32;
    for n in 1..=args.games {
        if n > 1 {
            game.new_game(&catalog);
        }
        let result = play(&mut game, args.max_rounds)?;
        match result {
            Some(MatchOutcome::Winner(side)) => wins[side.index()] += 1,
            Some(MatchOutcome::Draw) => draws += 1,
            None => unfinished += 1,
        }
        println!(
            "game {n}: {} after {} rounds ({:?})",
            result.map_or_else(|| "unfinished".to_string(), |o| format!("{o:?}")),
            game.round(),
            game.game_over_reason(),
        );
    }

    println!(
        "player {} / opponent {} / draws {} / unfinished {}",
        wins[Side::Player.index()],
        wins[Side::Opponent.index()],
        draws,
        unfinished
    );
    Ok(())
}
