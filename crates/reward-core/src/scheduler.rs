//! Reaction Scheduler
//!
//! The state machine that defers a payout until the host's blocking
//! dialogue has closed and a grace delay has passed. One reaction is in
//! flight at a time; the scheduler performs no side effects and reports
//! verdicts for the engine to execute.

use crate::config::TimingConfig;

/// Timing constants.
pub mod scheduler_constants {
    /// Slack for comparing accumulated tick durations against configured
    /// delays, so a delay that is an exact multiple of the tick length
    /// elapses on the expected tick despite float drift.
    pub const TIMER_EPSILON_SECONDS: f64 = 1e-9;
}

use scheduler_constants::TIMER_EPSILON_SECONDS;

/// Where the current reaction sits.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReactionState {
    /// Nothing pending.
    #[default]
    Idle,
    /// A trigger armed; waiting for the blocking dialogue to appear.
    Armed {
        actor_id: String,
        /// Seconds spent waiting so far, for the escape hatch.
        waited_seconds: f64,
    },
    /// The dialogue is up; waiting for it to close.
    WaitingForDialogueClose { actor_id: String },
    /// The dialogue closed; counting down the grace delay.
    WaitingGraceDelay {
        actor_id: String,
        remaining_seconds: f64,
    },
}

impl ReactionState {
    /// The actor this state is tracking, if any.
    pub fn pending_actor(&self) -> Option<&str> {
        match self {
            ReactionState::Idle => None,
            ReactionState::Armed { actor_id, .. }
            | ReactionState::WaitingForDialogueClose { actor_id }
            | ReactionState::WaitingGraceDelay { actor_id, .. } => Some(actor_id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ReactionState::Idle)
    }
}

/// What one scheduler tick concluded.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to do this tick.
    None,
    /// The grace delay elapsed; the reaction should pay out now.
    PayoutDue { actor_id: String },
    /// The dialogue never appeared; the reaction was abandoned.
    TimedOut { actor_id: String },
}

/// Drives [`ReactionState`] from host ticks.
#[derive(Debug, Clone, Default)]
pub struct ReactionScheduler {
    state: ReactionState,
}

impl ReactionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ReactionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn pending_actor(&self) -> Option<&str> {
        self.state.pending_actor()
    }

    /// Arm a reaction for the actor.
    ///
    /// Returns false and changes nothing if another reaction is already in
    /// flight; the in-flight reaction is never preempted.
    pub fn arm(&mut self, actor_id: impl Into<String>) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        self.state = ReactionState::Armed {
            actor_id: actor_id.into(),
            waited_seconds: 0.0,
        };
        true
    }

    /// Discard any pending reaction, returning the actor that was pending.
    pub fn cancel(&mut self) -> Option<String> {
        let pending = self.state.pending_actor().map(str::to_string);
        self.state = ReactionState::Idle;
        pending
    }

    /// Advance the state machine by one host tick.
    ///
    /// The tick that first sees the dialogue closed starts the grace
    /// countdown but does not decrement it; counting begins on the next
    /// tick. A dialogue re-opening mid-grace holds the countdown with its
    /// remaining time preserved.
    pub fn advance(
        &mut self,
        elapsed_seconds: f64,
        dialogue_visible: bool,
        timing: &TimingConfig,
    ) -> TickOutcome {
        let current = std::mem::take(&mut self.state);
        let (next, outcome) = match current {
            ReactionState::Idle => (ReactionState::Idle, TickOutcome::None),

            ReactionState::Armed {
                actor_id,
                waited_seconds,
            } => {
                if dialogue_visible {
                    (
                        ReactionState::WaitingForDialogueClose { actor_id },
                        TickOutcome::None,
                    )
                } else {
                    let waited_seconds = waited_seconds + elapsed_seconds;
                    if waited_seconds + TIMER_EPSILON_SECONDS >= timing.max_armed_wait_seconds {
                        (ReactionState::Idle, TickOutcome::TimedOut { actor_id })
                    } else {
                        (
                            ReactionState::Armed {
                                actor_id,
                                waited_seconds,
                            },
                            TickOutcome::None,
                        )
                    }
                }
            }

            ReactionState::WaitingForDialogueClose { actor_id } => {
                if dialogue_visible {
                    (
                        ReactionState::WaitingForDialogueClose { actor_id },
                        TickOutcome::None,
                    )
                } else {
                    (
                        ReactionState::WaitingGraceDelay {
                            actor_id,
                            remaining_seconds: timing.grace_seconds,
                        },
                        TickOutcome::None,
                    )
                }
            }

            ReactionState::WaitingGraceDelay {
                actor_id,
                remaining_seconds,
            } => {
                if dialogue_visible {
                    // A dialogue reopened mid-grace; hold the countdown.
                    (
                        ReactionState::WaitingGraceDelay {
                            actor_id,
                            remaining_seconds,
                        },
                        TickOutcome::None,
                    )
                } else {
                    let remaining_seconds = remaining_seconds - elapsed_seconds;
                    if remaining_seconds <= TIMER_EPSILON_SECONDS {
                        (ReactionState::Idle, TickOutcome::PayoutDue { actor_id })
                    } else {
                        (
                            ReactionState::WaitingGraceDelay {
                                actor_id,
                                remaining_seconds,
                            },
                            TickOutcome::None,
                        )
                    }
                }
            }
        };

        self.state = next;
        outcome
    }
}
