//! Console battle client.
//!
//! Composition root: reads configuration, installs file logging, loads
//! content, stages the configured encounter and runs it with a console
//! provider. The party carries over between rematches, so rewards and level
//! ups accumulate.
//!
//! ```bash
//! BATTLE_PARTY=hero,archer BATTLE_ENCOUNTER=merchant_caravan cargo run -p battle-client
//! BATTLE_AUTOPILOT=1 BATTLE_SEED=7 cargo run -p battle-client
//! ```

mod config;
mod console;
mod logging;
mod presentation;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use battle_content::{Content, ContentFactory};
use battle_core::{Battle, Combatant, Outcome, PcgRng, mix_seed};

use config::ClientConfig;
use console::ConsoleProvider;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        encounter = %config.encounter,
        party = ?config.party,
        autopilot = config.autopilot,
        "starting battle client"
    );

    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    };
    let content = factory.load_all().context("Failed to load battle content")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = if config.autopilot {
        ConsoleProvider::autopilot(stdin.lock(), stdout.lock())
    } else {
        ConsoleProvider::new(stdin.lock(), stdout.lock())
    };

    console.say(&format!("Seed: {}", seed));
    play(&config, &content, seed, &mut console)?;

    tracing::info!("client shutdown complete");
    Ok(())
}

/// Fights the configured encounter until the player declines a rematch.
fn play<R: BufRead, W: Write>(
    config: &ClientConfig,
    content: &Content,
    seed: u64,
    console: &mut ConsoleProvider<R, W>,
) -> Result<()> {
    let mut party = content.party(config.party.as_slice())?;

    for attempt in 0u64.. {
        // one independent stream per battle keeps each rematch reproducible
        let mut rng = PcgRng::new(mix_seed(seed, attempt));
        let staged = content.stage(&config.encounter, &mut rng)?;
        let mut enemies = staged.enemies;

        let report = Battle::new(&mut party, &mut enemies, &mut rng, &content.config)
            .context("Failed to set up battle")?
            .with_preamble(staged.preamble)
            .run(console);

        tracing::info!(
            attempt,
            outcome = %report.outcome,
            rounds = report.rounds,
            autopilot = console.is_autopilot(),
            "battle finished"
        );

        if report.outcome == Outcome::Lost {
            recover(&mut party);
            console.say("\nYou collapse... and wake up back at the hideout, patched up.");
        }
        console.say(&presentation::render_report(&report, &party));

        if !console.confirm("\nFight again?") {
            break;
        }
    }

    Ok(())
}

/// Defeat is not permanent: the party is nursed back to full strength.
fn recover(party: &mut [Combatant]) {
    for member in party.iter_mut() {
        member.restore_full();
    }
}
