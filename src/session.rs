//! Channel sessions: a loaded catalog, its scheduler and what is on air.
//!
//! A player front end owns one session per active channel and calls
//! [`ChannelSession::advance`] whenever the current video ends or fails to
//! play. Switching channels means building a new session.

use crate::catalog::Catalog;
use crate::item::Item;
use crate::partition::Tier;
use crate::scheduler::{Scheduler, SchedulerConfig, SelectionMode};
use log::{info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::Serialize;

/// The item currently on air.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    /// 1-based count of successful selections in this session.
    pub sequence: u64,
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

#[derive(Debug)]
pub struct ChannelSession<R = ThreadRng> {
    catalog: Catalog,
    scheduler: Scheduler<R>,
    current: Option<NowPlaying>,
    sequence: u64,
    loop_on_exhaust: bool,
}

impl ChannelSession<ThreadRng> {
    pub fn new(catalog: Catalog, mode: SelectionMode) -> Self {
        Self::with_scheduler(catalog, Scheduler::new(mode))
    }
}

impl<R: Rng> ChannelSession<R> {
    pub fn with_scheduler(catalog: Catalog, scheduler: Scheduler<R>) -> Self {
        Self {
            catalog,
            scheduler,
            current: None,
            sequence: 0,
            loop_on_exhaust: false,
        }
    }

    /// When quota mode runs out of unplayed items, reset and keep going
    /// instead of going off air.
    #[must_use]
    pub fn loop_on_exhaust(mut self, enabled: bool) -> Self {
        self.loop_on_exhaust = enabled;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.scheduler = self.scheduler.with_config(config);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scheduler(&self) -> &Scheduler<R> {
        &self.scheduler
    }

    pub fn current(&self) -> Option<&NowPlaying> {
        self.current.as_ref()
    }

    /// Move on to the next video.
    ///
    /// Returns `None` and clears the current item when nothing is left, which
    /// only happens for an empty catalog or an exhausted quota session without
    /// looping.
    pub fn advance(&mut self) -> Option<&NowPlaying> {
        let mut picked = self
            .scheduler
            .select_next(&self.catalog)
            .map(|selection| (selection.item.clone(), selection.tier));

        if picked.is_none() && self.loop_on_exhaust && !self.catalog.is_empty() {
            info!(
                "{}: all {} videos played, starting over",
                self.catalog.label(),
                self.catalog.len()
            );
            self.scheduler.reset();
            picked = self
                .scheduler
                .select_next(&self.catalog)
                .map(|selection| (selection.item.clone(), selection.tier));
        }

        match picked {
            Some((item, tier)) => {
                self.sequence += 1;
                info!("{} #{}: now playing {item}", self.catalog.label(), self.sequence);
                self.current = Some(NowPlaying {
                    sequence: self.sequence,
                    item,
                    tier,
                });
            }
            None => {
                warn!("{}: nothing left to play", self.catalog.label());
                self.current = None;
            }
        }

        self.current.as_ref()
    }

    /// Skip a video that failed to play. Identical to [`Self::advance`]; the
    /// failed id stays in the history.
    pub fn skip_failed(&mut self) -> Option<&NowPlaying> {
        if let Some(failed) = &self.current {
            warn!("Could not play {}, skipping", failed.item);
        }
        self.advance()
    }

    /// Allow every video to play again.
    pub fn reset_history(&mut self) {
        self.scheduler.reset();
    }
}
