//! Deferred reactive reward engine.
//!
//! The engine watches a host's gift triggers, decides probabilistically
//! whether the actor sends something back, waits for the host's blocking
//! dialogue to close plus a short grace delay, then grants an item drawn
//! from a value-weighted catalog. At most one reaction per actor per day,
//! and at most one reaction in flight at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────┐  triggers / ticks / day starts  ┌─────────────┐
//! │ host │ ──────────────────────────────▶ │ reward-core │
//! └──────┘ ◀────────────────────────────── └─────────────┘
//!            grants / notifications / sounds
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Value-weighted draw pool over the host catalog
//! - [`policy`]: Taste eligibility and relationship-scaled arm chance
//! - [`scheduler`]: The deferred-payout state machine
//! - [`ledger`]: One-reaction-per-actor-per-day bookkeeping
//! - [`config`]: TOML configuration loading
//! - [`host`]: The trait a game adapter implements

pub mod catalog;
pub mod config;
pub mod host;
pub mod ledger;
pub mod policy;
pub mod scheduler;

// Re-export catalog types
pub use catalog::{build_pool, WeightedCatalog, WeightedEntry, WeightedPool};

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, EngineConfig, GeneralConfig, PolicyConfig, RewardConfig,
    TimingConfig, TomlSerializeError,
};

// Re-export host types
pub use host::{GameHost, HostError, NotificationKind};

// Re-export ledger types
pub use ledger::DailyLedger;

// Re-export policy types
pub use policy::{is_eligible, should_arm, trigger_chance, ScalingDirection};

// Re-export scheduler types
pub use scheduler::{ReactionScheduler, ReactionState, TickOutcome};

use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use reward_events::TriggerEvent;

/// Monotone counters describing everything the engine has seen and done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Triggers observed while enabled
    pub triggers_seen: u64,
    /// Triggers that armed a reaction
    pub reactions_armed: u64,
    /// Triggers dropped because a reaction was already in flight
    pub triggers_dropped: u64,
    /// Triggers ignored because the actor already reacted today
    pub ledger_blocked: u64,
    /// Armed reactions abandoned because no dialogue appeared
    pub timeouts: u64,
    /// Successful payouts
    pub payouts_granted: u64,
    /// Payouts aborted by a host grant failure
    pub payouts_failed: u64,
    /// Payouts aborted because the reward pool was empty
    pub empty_draws: u64,
}

/// The reaction engine facade.
///
/// Owns the policy, scheduler, ledger, weighted catalog and RNG, and
/// drives them from the three host signals: triggers, ticks and day
/// starts. All game effects go back out through the [`GameHost`] the
/// engine was built with.
#[derive(Debug)]
pub struct ReactionEngine<H: GameHost> {
    /// Configuration settings
    config: EngineConfig,
    /// The game adapter all effects go through
    host: H,
    /// Cached value-weighted draw pool
    catalog: WeightedCatalog,
    /// Deferred-payout state machine
    scheduler: ReactionScheduler,
    /// One-reaction-per-actor-per-day record
    ledger: DailyLedger,
    /// RNG for chance rolls and pool draws
    rng: SmallRng,
    /// Counters for everything seen and done
    stats: EngineStats,
    /// Days started since construction
    current_day: u64,
}

impl<H: GameHost> ReactionEngine<H> {
    /// Creates an engine with an entropy-seeded RNG.
    pub fn new(config: EngineConfig, host: H) -> Self {
        Self::with_rng(config, host, SmallRng::from_entropy())
    }

    /// Creates an engine with a fixed seed, for reproducible runs.
    pub fn with_seed(config: EngineConfig, host: H, seed: u64) -> Self {
        Self::with_rng(config, host, SmallRng::seed_from_u64(seed))
    }

    /// Creates an engine from a configuration file.
    pub fn from_config_file(path: &Path, host: H) -> Result<Self, ConfigError> {
        let config = EngineConfig::from_file(path)?;
        Ok(Self::new(config, host))
    }

    fn with_rng(config: EngineConfig, host: H, rng: SmallRng) -> Self {
        Self {
            config: config.normalized(),
            host,
            catalog: WeightedCatalog::new(),
            scheduler: ReactionScheduler::new(),
            ledger: DailyLedger::new(),
            rng,
            stats: EngineStats::default(),
            current_day: 0,
        }
    }

    /// Feed one observed gift into the engine.
    ///
    /// At most one reaction is in flight at a time: triggers arriving
    /// while one is pending are dropped, never queued. The drop happens
    /// before the chance roll so doomed triggers leave seeded RNG streams
    /// untouched.
    pub fn on_trigger(&mut self, trigger: &TriggerEvent) {
        if !self.config.general.enabled {
            return;
        }
        self.stats.triggers_seen += 1;

        if !self.scheduler.is_idle() {
            tracing::debug!(
                "Dropping trigger for {}: a reaction is already in flight",
                trigger.actor_id
            );
            self.stats.triggers_dropped += 1;
            return;
        }

        if self.ledger.has_reacted_today(&trigger.actor_id) {
            tracing::debug!("{} already reacted today; ignoring trigger", trigger.actor_id);
            self.stats.ledger_blocked += 1;
            return;
        }

        let level = self.host.relationship_level(&trigger.actor_id);
        if policy::should_arm(trigger, level, &self.config.policy, &mut self.rng) {
            self.scheduler.arm(trigger.actor_id.as_str());
            self.stats.reactions_armed += 1;
            tracing::debug!(
                "Armed reaction for {} (relationship level {})",
                trigger.actor_id,
                level
            );
        }
    }

    /// Advance the engine by one host tick of `elapsed_seconds`.
    ///
    /// The host's dialogue visibility is only polled while a reaction is
    /// pending. A disabled engine cancels any pending reaction instead.
    pub fn on_tick(&mut self, elapsed_seconds: f64) {
        if !self.config.general.enabled {
            if let Some(actor_id) = self.scheduler.cancel() {
                tracing::debug!("Engine disabled; cancelled pending reaction for {}", actor_id);
            }
            return;
        }
        if self.scheduler.is_idle() {
            return;
        }

        let dialogue_visible = self.host.is_blocking_dialogue_visible();
        let outcome = self
            .scheduler
            .advance(elapsed_seconds, dialogue_visible, &self.config.timing);

        match outcome {
            TickOutcome::None => {}
            TickOutcome::PayoutDue { actor_id } => self.execute_payout(&actor_id),
            TickOutcome::TimedOut { actor_id } => {
                self.stats.timeouts += 1;
                tracing::debug!("No dialogue appeared for {}; reaction abandoned", actor_id);
            }
        }
    }

    /// Start a new in-game day.
    ///
    /// Clears the daily ledger, discards any reaction still pending from
    /// yesterday, and rebuilds the reward pool if it went stale or was
    /// never built. The housekeeping runs even while disabled, so
    /// re-enabling never sees yesterday's ledger; only the host-facing
    /// rebuild is skipped.
    pub fn on_day_start(&mut self) {
        self.current_day += 1;
        tracing::info!(
            "Day {} starting: {} reaction(s) delivered yesterday",
            self.current_day,
            self.ledger.len()
        );
        self.ledger.reset_for_new_day();

        if let Some(actor_id) = self.scheduler.cancel() {
            tracing::debug!("Day rollover cancelled pending reaction for {}", actor_id);
        }

        if self.config.general.enabled
            && (self.catalog.needs_rebuild() || self.catalog.pool().is_empty())
        {
            let rows = self.host.catalog();
            self.catalog.rebuild(&rows, &self.config.rewards);
        }
    }

    /// Swap in a new configuration.
    ///
    /// The reward pool is marked stale so the next day start rebuilds it
    /// under the new filters. Disabling the engine cancels any pending
    /// reaction immediately.
    pub fn reload(&mut self, config: EngineConfig) {
        self.config = config.normalized();
        self.catalog.mark_stale();
        if !self.config.general.enabled {
            if let Some(actor_id) = self.scheduler.cancel() {
                tracing::debug!(
                    "Engine disabled by reload; cancelled pending reaction for {}",
                    actor_id
                );
            }
        }
    }

    /// Runs the payout for an actor whose grace delay elapsed.
    ///
    /// The ledger is marked only after a successful grant, so empty pools
    /// and failed grants leave the actor's daily chance intact.
    fn execute_payout(&mut self, actor_id: &str) {
        if self.catalog.pool().is_empty() {
            let rows = self.host.catalog();
            self.catalog.rebuild(&rows, &self.config.rewards);
        }

        let item_id = match self.catalog.draw(&mut self.rng) {
            Some(id) => id.to_string(),
            None => {
                self.stats.empty_draws += 1;
                tracing::info!("No poolable item for {}'s reaction; nothing granted", actor_id);
                return;
            }
        };

        match self.host.grant_item(actor_id, &item_id) {
            Ok(()) => {
                self.host.play_sound(&self.config.rewards.payout_sound);
                self.host.notify(
                    &format!("{} sent something back: {}", actor_id, item_id),
                    NotificationKind::ItemGranted,
                );
                self.ledger.mark_reacted(actor_id);
                self.stats.payouts_granted += 1;
                tracing::info!("Granted {} on behalf of {}", item_id, actor_id);
            }
            Err(e) => {
                self.stats.payouts_failed += 1;
                tracing::warn!("Payout for {} failed: {}", actor_id, e);
            }
        }
    }

    /// Returns the current reaction state.
    pub fn state(&self) -> &ReactionState {
        self.scheduler.state()
    }

    /// Returns the engine counters.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Days started since construction.
    pub fn current_day(&self) -> u64 {
        self.current_day
    }

    /// Number of actors that already reacted today.
    pub fn reactions_today(&self) -> usize {
        self.ledger.len()
    }

    /// Returns a reference to the host adapter.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns a mutable reference to the host adapter.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
