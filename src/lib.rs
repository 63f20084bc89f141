//! Retro music-video channels that keep playing without repeating themselves.
//!
//! Core modules:
//! - [`scheduler`] - What plays next: history, quota window, modes
//! - [`partition`] - Popularity tiers ("high" and "rest")
//! - [`sampler`] - Weighted random draw
//! - [`popularity`] - View-count parsing and the [`popularity::Weighted`] trait
//! - [`item`] - Catalog entries
//!
//! ### Supporting Modules
//!
//! - [`catalog`] - Channel definitions and yearly JSON catalog loading
//! - [`session`] - Per-channel playback state for front ends
//! - [`config`] - Data directory and runtime settings
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use retrovision::catalog::Catalog;
//! use retrovision::scheduler::SelectionMode;
//! use retrovision::session::ChannelSession;
//!
//! let data_dir = retrovision::config::get_data_dir()?;
//! let catalog = Catalog::load(&data_dir, "MTV90")?;
//!
//! let mut session = ChannelSession::new(catalog, SelectionMode::Quota);
//! while let Some(now) = session.advance() {
//!     println!("{}: {}", now.sequence, now.item.watch_url());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Selection Details
//!
//! Each request filters out everything already played, ranks the remainder by
//! view count and splits it in half. Within every run of 10 picks, the first 7
//! come from the popular half and the last 3 from the rest; inside a half,
//! more views means a proportionally better chance. When a half runs dry the
//! other one supplies the pick, so the channel only goes quiet once every
//! video has played.
//!
//! ## Error Handling
//!
//! The selection core never fails: an exhausted catalog is reported as `None`
//! and unreadable view counts weigh zero. Loading and configuration return
//! `anyhow::Result`.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod item;
pub mod partition;
pub mod popularity;
pub mod sampler;
pub mod scheduler;
pub mod session;
