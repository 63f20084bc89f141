//! # Retrovision
//!
//! Command-line front end for the channel scheduler.
//!
//! ## Usage
//!
//! ```bash
//! # Which channels exist
//! retrovision channels
//!
//! # Next 20 videos on the 90s channel
//! retrovision --data-dir public/data lineup MTV90 -n 20
//!
//! # How the 80s catalog splits into tiers
//! retrovision inspect MTV80
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use retrovision::catalog::{Catalog, CHANNELS};
use retrovision::cli::{self, Command};
use retrovision::completion;
use retrovision::config::RuntimeConfig;
use retrovision::partition::{self, Tier};
use retrovision::popularity::Weighted;
use retrovision::scheduler::{Scheduler, SchedulerConfig};
use retrovision::session::{ChannelSession, NowPlaying};

/// Main entry point.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug retrovision lineup MTV90` - Scheduler decisions
/// - `RUST_LOG=retrovision::catalog=debug retrovision inspect MTV00` - Skipped catalog files
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        Command::Channels => {
            for channel in &CHANNELS {
                println!(
                    "{:<6} {:<7} {}-{}",
                    channel.key,
                    channel.name,
                    channel.years.start(),
                    channel.years.end()
                );
            }
        }
        Command::Lineup {
            channel,
            count,
            mode,
            loop_on_exhaust,
            window,
            high_slots,
            json,
        } => {
            let mut config = RuntimeConfig::resolve(args.data_dir.as_deref())?;
            config.mode = mode.into();
            config.quota = SchedulerConfig { window, high_slots };
            config.loop_on_exhaust = loop_on_exhaust;
            config.validate()?;

            let lineup = run_lineup(&config, &channel, count)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&lineup).context("Failed to serialize lineup")?
                );
            } else {
                print_lineup(&lineup, count);
            }
        }
        Command::Inspect { channel, top } => {
            let config = RuntimeConfig::resolve(args.data_dir.as_deref())?;
            let catalog = Catalog::load(&config.data_dir, &channel)?;
            print_inspection(&catalog, top);
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        Command::CompleteChannels => {
            completion::print_channel_completions();
        }
    }

    Ok(())
}

fn run_lineup(config: &RuntimeConfig, channel: &str, count: usize) -> Result<Vec<NowPlaying>> {
    let catalog = Catalog::load(&config.data_dir, channel)?;
    info!("Scheduling {count} videos from {} in {} mode", catalog.label(), config.mode);

    let scheduler = Scheduler::new(config.mode).with_config(config.quota);
    let mut session = ChannelSession::with_scheduler(catalog, scheduler).loop_on_exhaust(config.loop_on_exhaust);

    let mut lineup = Vec::with_capacity(count.min(session.catalog().len()));
    for _ in 0..count {
        match session.advance() {
            Some(now) => lineup.push(now.clone()),
            None => {
                debug!("Lineup stopped after {} videos", lineup.len());
                break;
            }
        }
    }
    Ok(lineup)
}

fn print_lineup(lineup: &[NowPlaying], requested: usize) {
    for now in lineup {
        let tier = now.tier.map_or_else(|| "-".to_string(), |tier| tier.to_string());
        println!(
            "{:>4}. [{:<4}] {}  {}",
            now.sequence,
            tier,
            now.item,
            now.item.watch_url()
        );
    }

    if requested == 0 {
        return;
    }
    if lineup.is_empty() {
        println!("Nothing to play: the channel catalog is empty.");
    } else if lineup.len() < requested {
        println!(
            "Catalog exhausted after {} videos (pass --loop to start over).",
            lineup.len()
        );
    }
}

fn print_inspection(catalog: &Catalog, top: usize) {
    let tiers = partition::partition(catalog.iter());
    let unweighted = catalog.iter().filter(|item| item.weight() <= 0.0).count();

    println!("{}: {} videos", catalog.label(), catalog.len());
    println!("  high tier: {}", tiers.high.len());
    println!("  rest tier: {}", tiers.rest.len());
    println!("  without view count: {unweighted}");

    if top == 0 || tiers.is_empty() {
        return;
    }

    println!();
    println!("Most viewed:");
    let ranked = tiers
        .high
        .iter()
        .map(|item| (Tier::High, *item))
        .chain(tiers.rest.iter().map(|item| (Tier::Rest, *item)));
    for (rank, (tier, item)) in ranked.take(top).enumerate() {
        println!("{:>4}. [{tier:<4}] {:>15.0}  {item}", rank + 1, item.weight());
    }
}
