use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod data;
mod engine;

use config::Config;
use data::{DataSet, Team};
use engine::clock::MatchClock;
use engine::rating::team_strength;
use engine::sim::{MatchContext, MatchEngine, SideContext};
use engine::state::{EventKind, MatchState, Side};
use engine::tactics::{TacticPreset, TacticSet};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let dataset = DataSet::load(&config.teams_file, &config.players_file)?;
    let context = build_context(&config, &dataset)?;

    if config.matches > 1 {
        run_batch(&config, context);
        return Ok(());
    }

    if config.fast {
        let mut engine = MatchEngine::new(context, config.seed);
        engine.kick_off();
        engine.run_to_completion();
        print_feed(engine.state(), 0);
        print_full_time(engine.state(), engine.context());
        return Ok(());
    }

    run_live(&config, context).await
}

/// Assemble the validated fixture: both squads picked and checked, the
/// user's tactics from the chosen preset, the opponent's from the AI
/// heuristic. Nothing reaches the engine before passing squad validation.
fn build_context(config: &Config, dataset: &DataSet) -> Result<MatchContext> {
    let home_team = lookup_team(dataset, &config.home_team)?;
    let away_team = lookup_team(dataset, &config.away_team)?;

    let home_squad = data::auto_select(&dataset.players_of(&home_team.id))?;
    let away_squad = data::auto_select(&dataset.players_of(&away_team.id))?;
    data::validate_squad(&home_squad)?;
    data::validate_squad(&away_squad)?;

    let preset: TacticPreset = config.preset.parse().map_err(anyhow::Error::msg)?;
    let user_tactics = TacticSet::preset(preset);

    // The AI derives its tactics from the raw (pre-tactic) strength gap.
    let home_strength = team_strength(&home_squad, None);
    let away_strength = team_strength(&away_squad, None);
    let (home_tactics, away_tactics) = if config.side == "home" {
        (
            user_tactics,
            TacticSet::auto_for_opponent(away_strength, home_strength),
        )
    } else {
        (
            TacticSet::auto_for_opponent(home_strength, away_strength),
            user_tactics,
        )
    };

    info!(
        "Fixture set: {} ({:.1}) vs {} ({:.1}), user manages the {} side with the {} preset",
        home_team.name, home_strength, away_team.name, away_strength, config.side, config.preset
    );

    Ok(MatchContext {
        home: SideContext {
            team: home_team,
            roster: home_squad,
            tactics: home_tactics,
        },
        away: SideContext {
            team: away_team,
            roster: away_squad,
            tactics: away_tactics,
        },
    })
}

fn lookup_team(dataset: &DataSet, id: &str) -> Result<Team> {
    dataset.team(id).cloned().ok_or_else(|| {
        let known: Vec<&str> = dataset.teams().iter().map(|t| t.id.as_str()).collect();
        anyhow!("unknown team id '{}' (known: {})", id, known.join(", "))
    })
}

/// Run the fixture on the real-time clock, printing events as they land.
/// Ctrl-C abandons the match view, which obliges us to dispose the clock
/// rather than leave a detached timer ticking.
async fn run_live(config: &Config, context: MatchContext) -> Result<()> {
    let mut clock = MatchClock::new(Duration::from_millis(config.tick_ms), config.seed);
    clock.set_context(context);
    let mut snapshots = clock.start()?;

    let mut printed = 0usize;
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = snapshots.borrow().clone();
                printed = print_feed(&state, printed);
                if state.ended {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted — disposing match clock");
                break;
            }
        }
    }

    if let Some(final_state) = clock.dispose().await {
        if final_state.ended {
            let state = final_state;
            // Events may have landed between the last print and shutdown.
            print_feed(&state, printed);
            println!(
                "\nFT  {} - {}",
                state.score.home, state.score.away
            );
        } else {
            info!(
                "Match abandoned at {}' with the score {}-{}",
                final_state.minute, final_state.score.home, final_state.score.away
            );
        }
    }
    Ok(())
}

/// Print any events not yet shown; returns the new printed count.
fn print_feed(state: &MatchState, already_printed: usize) -> usize {
    for event in &state.events[already_printed..] {
        match event.kind {
            EventKind::Goal => println!("{:>2}'  ⚽ {}", event.minute, event.text),
            EventKind::Commentary => println!("{:>2}'  {}", event.minute, event.text),
        }
    }
    state.events.len()
}

fn print_full_time(state: &MatchState, context: &MatchContext) {
    println!(
        "\nFT  {} {} - {} {}",
        context.home.team.name, state.score.home, state.score.away, context.away.team.name
    );
    let scorers: Vec<String> = state
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Goal)
        .map(|e| {
            let team = match e.side {
                Side::Home => &context.home.team.name,
                Side::Away => &context.away.team.name,
            };
            match &e.scorer {
                Some(name) => format!("{}' {} ({})", e.minute, name, team),
                None => format!("{}' ({})", e.minute, team),
            }
        })
        .collect();
    if !scorers.is_empty() {
        println!("Scorers: {}", scorers.join(", "));
    }
}

/// Headless batch: simulate N fixtures through the pure engine and print
/// an aggregate report.
fn run_batch(config: &Config, context: MatchContext) {
    let mut home_goals = 0u64;
    let mut away_goals = 0u64;
    let mut home_wins = 0u32;
    let mut away_wins = 0u32;
    let mut draws = 0u32;

    for i in 0..config.matches {
        // Offset the seed per match so a seeded batch is reproducible
        // without every fixture being identical.
        let seed = config.seed.map(|s| s + u64::from(i));
        let mut engine = MatchEngine::new(context.clone(), seed);
        engine.run_to_completion();
        let score = engine.state().score;
        home_goals += u64::from(score.home);
        away_goals += u64::from(score.away);
        match score.home.cmp(&score.away) {
            std::cmp::Ordering::Greater => home_wins += 1,
            std::cmp::Ordering::Less => away_wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
        }
    }

    let n = f64::from(config.matches);
    println!(
        "{} matches: {} {}W {}D {}L {} | mean goals {:.2} - {:.2}",
        config.matches,
        context.home.team.name,
        home_wins,
        draws,
        away_wins,
        context.away.team.name,
        home_goals as f64 / n,
        away_goals as f64 / n
    );
}
