//! # Selection Scheduler
//!
//! Decides what plays next. The scheduler owns the session's play history and
//! the tier-quota counters; the catalog stays with the caller.
//!
//! ## Modes
//!
//! - [`SelectionMode::Quota`]: never repeats an id until [`Scheduler::reset`].
//!   Within every window of 10 picks, slots 0-6 prefer the high-popularity tier
//!   and slots 7-9 prefer the rest. An empty preferred tier falls back to the
//!   other one, so the ratio is a target and never a block.
//! - [`SelectionMode::AvoidRepeats`]: no tiers, just a weighted draw over the
//!   unplayed items. Once everything has played, history clears itself and the
//!   draw covers the whole catalog again.
//! - [`SelectionMode::Shuffle`]: a weighted draw over the whole catalog with no
//!   memory at all.
//!
//! ## State
//!
//! [`SessionState`] is a plain value with pure transitions that consume the old
//! state and return the new one alongside the pick. [`Scheduler`] wraps a state
//! together with a random source for everyday use.
//!
//! ```
//! use retrovision::item::Item;
//! use retrovision::scheduler::{Scheduler, SelectionMode};
//!
//! let catalog = vec![
//!     Item::new("a", "Popular").with_popularity("1.000.000"),
//!     Item::new("b", "Obscure").with_popularity("12"),
//! ];
//!
//! let mut scheduler = Scheduler::new(SelectionMode::Quota);
//! let first = scheduler.select_next(&catalog).expect("two items available");
//! let second = scheduler.select_next(&catalog).expect("one item left");
//! assert_ne!(first.item.id(), second.item.id());
//! assert!(scheduler.select_next(&catalog).is_none());
//! ```

use crate::item::Item;
use crate::partition::{self, Tier};
use crate::sampler;
use anyhow::Result;
use log::{debug, trace};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How [`Scheduler::select_next`] treats history and tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// No repeats before an explicit reset, 70/30 tier quota.
    #[default]
    Quota,
    /// No repeats until the catalog runs out, then start over silently.
    AvoidRepeats,
    /// Weighted draw over the whole catalog, repeats allowed.
    Shuffle,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quota => f.write_str("quota"),
            Self::AvoidRepeats => f.write_str("avoid-repeats"),
            Self::Shuffle => f.write_str("shuffle"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quota" => Ok(Self::Quota),
            "avoid-repeats" | "avoid_repeats" => Ok(Self::AvoidRepeats),
            "shuffle" => Ok(Self::Shuffle),
            other => anyhow::bail!("Unknown selection mode: {other}. Use 'quota', 'avoid-repeats' or 'shuffle'"),
        }
    }
}

/// Quota window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Length of the repeating window.
    pub window: u32,
    /// Leading slots of each window that prefer the high tier.
    pub high_slots: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window: 10,
            high_slots: 7,
        }
    }
}

impl SchedulerConfig {
    /// # Errors
    ///
    /// Fails when the window is empty or has more high slots than slots.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            anyhow::bail!("Quota window must hold at least one selection");
        }
        if self.high_slots > self.window {
            anyhow::bail!(
                "High-tier slots ({}) cannot exceed the quota window ({})",
                self.high_slots,
                self.window
            );
        }
        Ok(())
    }
}

/// A pick, borrowed from the caller's catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub item: &'a Item,
    /// Tier that actually supplied the item. Only quota mode splits tiers.
    pub tier: Option<Tier>,
}

/// History and quota counters of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    history: HashSet<String>,
    played: Vec<String>,
    high_count: u64,
    rest_count: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_played(&self, id: &str) -> bool {
        self.history.contains(id)
    }

    /// Played ids in the order they were picked.
    pub fn played(&self) -> &[String] {
        &self.played
    }

    pub fn high_count(&self) -> u64 {
        self.high_count
    }

    pub fn rest_count(&self) -> u64 {
        self.rest_count
    }

    /// Slot of the next pick inside the quota window.
    pub fn position(&self, config: &SchedulerConfig) -> u64 {
        (self.high_count + self.rest_count) % u64::from(config.window.max(1))
    }

    /// Tier the quota asks for at the current position.
    pub fn preferred_tier(&self, config: &SchedulerConfig) -> Tier {
        if self.position(config) < u64::from(config.high_slots) {
            Tier::High
        } else {
            Tier::Rest
        }
    }

    /// Quota-mode transition.
    ///
    /// Excludes played ids, splits the remainder into tiers, draws from the
    /// preferred tier (or the other one when it is empty) and records the pick.
    /// Returns the unchanged state and `None` once every id has played.
    #[must_use]
    pub fn advance_quota<'a>(
        mut self,
        catalog: &'a [Item],
        config: &SchedulerConfig,
        draw: f64,
    ) -> (Self, Option<Selection<'a>>) {
        let available: Vec<&'a Item> = catalog
            .iter()
            .filter(|item| !self.history.contains(item.id()))
            .collect();

        if available.is_empty() {
            debug!("No unplayed items left ({} in catalog)", catalog.len());
            return (self, None);
        }

        let tiers = partition::partition(available.iter().copied());

        let preferred = self.preferred_tier(config);
        let tier = if tiers.get(preferred).is_empty() {
            debug!(
                "Slot {} wants the {preferred} tier but it is exhausted, falling back to {}",
                self.position(config),
                preferred.other()
            );
            preferred.other()
        } else {
            preferred
        };

        let pool = tiers.get(tier);
        debug_assert!(
            !pool.is_empty(),
            "a non-empty candidate set must leave at least one tier populated"
        );

        let Some(item) = sampler::choose_with(pool, draw).copied() else {
            return (self, None);
        };

        match tier {
            Tier::High => self.high_count += 1,
            Tier::Rest => self.rest_count += 1,
        }
        self.record(item);

        trace!(
            "Picked {item} from {tier} tier ({} high / {} rest so far)",
            self.high_count,
            self.rest_count
        );

        (
            self,
            Some(Selection {
                item,
                tier: Some(tier),
            }),
        )
    }

    /// Avoid-repeats transition.
    ///
    /// Draws by weight over the unplayed items. When nothing is left the history
    /// is cleared first, so only an empty catalog yields `None`. Quota counters
    /// are left alone.
    #[must_use]
    pub fn advance_avoiding_repeats<'a>(
        mut self,
        catalog: &'a [Item],
        draw: f64,
    ) -> (Self, Option<Selection<'a>>) {
        if catalog.is_empty() {
            return (self, None);
        }

        let mut available: Vec<&'a Item> = catalog
            .iter()
            .filter(|item| !self.history.contains(item.id()))
            .collect();

        if available.is_empty() {
            debug!("Every item has played once, clearing {} history entries", self.history.len());
            self.history.clear();
            self.played.clear();
            available = catalog.iter().collect();
        }

        let Some(item) = sampler::choose_with(&available, draw).copied() else {
            return (self, None);
        };
        self.record(item);

        (self, Some(Selection { item, tier: None }))
    }

    /// Shuffle transition: state is untouched.
    #[must_use]
    pub fn advance_shuffle<'a>(self, catalog: &'a [Item], draw: f64) -> (Self, Option<Selection<'a>>) {
        let selection = sampler::choose_with(catalog, draw).map(|item| Selection { item, tier: None });
        (self, selection)
    }

    fn record(&mut self, item: &Item) {
        if self.history.insert(item.id().to_owned()) {
            self.played.push(item.id().to_owned());
        }
    }
}

/// Stateful front end over [`SessionState`].
///
/// Calls take `&mut self`, so a scheduler can only be driven by one caller at
/// a time. Give each channel session its own instance.
#[derive(Debug)]
pub struct Scheduler<R = ThreadRng> {
    mode: SelectionMode,
    config: SchedulerConfig,
    state: SessionState,
    rng: R,
}

impl Scheduler<ThreadRng> {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_rng(mode, rand::thread_rng())
    }
}

impl<R: Rng> Scheduler<R> {
    /// Use a specific random source, e.g. a seeded `StdRng` in tests.
    pub fn with_rng(mode: SelectionMode, rng: R) -> Self {
        Self {
            mode,
            config: SchedulerConfig::default(),
            state: SessionState::new(),
            rng,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Pick the next item, or `None` when this mode has nothing left to offer.
    ///
    /// `None` is an ordinary outcome: quota mode returns it once the catalog is
    /// exhausted and leaves the decision to reset or stop with the caller.
    pub fn select_next<'a>(&mut self, catalog: &'a [Item]) -> Option<Selection<'a>> {
        let draw = self.rng.gen::<f64>();
        let state = std::mem::take(&mut self.state);

        let (state, selection) = match self.mode {
            SelectionMode::Quota => state.advance_quota(catalog, &self.config, draw),
            SelectionMode::AvoidRepeats => state.advance_avoiding_repeats(catalog, draw),
            SelectionMode::Shuffle => state.advance_shuffle(catalog, draw),
        };
        self.state = state;

        selection
    }

    /// Forget the history and zero both quota counters.
    pub fn reset(&mut self) {
        debug!("Resetting scheduler history ({} played)", self.state.played.len());
        self.state = SessionState::new();
    }
}
