//! Reward Policy
//!
//! Decides whether an observed gift arms a deferred reaction: taste
//! eligibility first, then a relationship-scaled chance roll.

use rand::Rng;
use serde::{Deserialize, Serialize};

use reward_events::TriggerEvent;

use crate::config::PolicyConfig;

/// Whether relationship levels raise or lower the arm chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalingDirection {
    /// Levels raise the chance; every gift is eligible.
    #[default]
    Bonus,
    /// Levels lower the chance; only disliked and hated gifts are eligible.
    Penalty,
}

/// Arm chance for a relationship level, clamped to [0, 1].
pub fn trigger_chance(policy: &PolicyConfig, relationship_level: i32) -> f32 {
    let scaled = relationship_level as f32 * policy.per_level_delta;
    let chance = match policy.direction {
        ScalingDirection::Bonus => policy.base_chance + scaled,
        ScalingDirection::Penalty => policy.base_chance - scaled,
    };
    chance.clamp(0.0, 1.0)
}

/// Whether a trigger can arm a reaction at all under this policy.
///
/// Bonus reacts to any gift. Penalty reacts only to gifts the actor
/// dislikes or hates; an unclassified taste never qualifies.
pub fn is_eligible(trigger: &TriggerEvent, policy: &PolicyConfig) -> bool {
    match policy.direction {
        ScalingDirection::Bonus => true,
        ScalingDirection::Penalty => trigger.taste.map_or(false, |taste| taste.is_negative()),
    }
}

/// Roll whether this trigger arms a reaction.
///
/// Eligibility short-circuits before the RNG is consumed, so ineligible
/// triggers leave seeded streams untouched. The roll samples [0, 1), so a
/// chance of 0 can never pass and a chance of 1 always does.
pub fn should_arm<R: Rng>(
    trigger: &TriggerEvent,
    relationship_level: i32,
    policy: &PolicyConfig,
    rng: &mut R,
) -> bool {
    if !is_eligible(trigger, policy) {
        return false;
    }
    let chance = trigger_chance(policy, relationship_level);
    rng.gen::<f32>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use reward_events::GiftTaste;

    fn policy(base_chance: f32, per_level_delta: f32, direction: ScalingDirection) -> PolicyConfig {
        PolicyConfig {
            base_chance,
            per_level_delta,
            direction,
        }
    }

    #[test]
    fn test_bonus_chance_scales_with_level() {
        let policy = policy(0.01, 0.005, ScalingDirection::Bonus);

        let chance = trigger_chance(&policy, 10);
        assert!((chance - 0.06).abs() < 1e-6, "chance {}", chance);
        assert!(trigger_chance(&policy, 0) < trigger_chance(&policy, 8));
    }

    #[test]
    fn test_penalty_chance_floors_at_zero() {
        let policy = policy(0.01, 0.005, ScalingDirection::Penalty);

        // 0.01 - 10 * 0.005 would be negative.
        assert_eq!(trigger_chance(&policy, 10), 0.0);
        assert!(trigger_chance(&policy, 1) > 0.0);
    }

    #[test]
    fn test_chance_caps_at_one() {
        let policy = policy(0.9, 0.05, ScalingDirection::Bonus);

        assert_eq!(trigger_chance(&policy, 10), 1.0);
    }

    #[test]
    fn test_negative_level_lowers_bonus_chance() {
        let policy = policy(0.01, 0.005, ScalingDirection::Bonus);

        assert_eq!(trigger_chance(&policy, -10), 0.0);
    }

    #[test]
    fn test_zero_chance_never_arms() {
        let policy = policy(0.0, 0.0, ScalingDirection::Bonus);
        let trigger = TriggerEvent::new("ingrid", "wild_posy");
        let mut rng = SmallRng::seed_from_u64(99);

        for _ in 0..1000 {
            assert!(!should_arm(&trigger, 5, &policy, &mut rng));
        }
    }

    #[test]
    fn test_certain_chance_always_arms() {
        let policy = policy(1.0, 0.0, ScalingDirection::Bonus);
        let trigger = TriggerEvent::new("ingrid", "wild_posy");
        let mut rng = SmallRng::seed_from_u64(99);

        for _ in 0..1000 {
            assert!(should_arm(&trigger, 5, &policy, &mut rng));
        }
    }

    #[test]
    fn test_penalty_requires_negative_taste() {
        let policy = policy(1.0, 0.0, ScalingDirection::Penalty);

        for taste in GiftTaste::all() {
            let trigger = TriggerEvent::new("olaf", "rusty_cog").with_taste(*taste);
            assert_eq!(is_eligible(&trigger, &policy), taste.is_negative());
        }
    }

    #[test]
    fn test_unclassified_taste_is_ineligible_under_penalty() {
        let policy = policy(1.0, 0.0, ScalingDirection::Penalty);
        let trigger = TriggerEvent::new("olaf", "mystery_box");

        assert!(!is_eligible(&trigger, &policy));

        let mut rng = SmallRng::seed_from_u64(1);
        assert!(!should_arm(&trigger, 0, &policy, &mut rng));
    }

    #[test]
    fn test_bonus_accepts_any_taste() {
        let policy = policy(0.5, 0.0, ScalingDirection::Bonus);

        assert!(is_eligible(&TriggerEvent::new("olaf", "mystery_box"), &policy));
        let hated = TriggerEvent::new("olaf", "rusty_cog").with_taste(GiftTaste::Hate);
        assert!(is_eligible(&hated, &policy));
    }

    #[test]
    fn test_ineligible_trigger_consumes_no_rng() {
        let policy = policy(1.0, 0.0, ScalingDirection::Penalty);
        let trigger = TriggerEvent::new("olaf", "wild_posy").with_taste(GiftTaste::Love);

        let mut rolled = SmallRng::seed_from_u64(4242);
        let mut untouched = SmallRng::seed_from_u64(4242);

        assert!(!should_arm(&trigger, 0, &policy, &mut rolled));

        // The streams stay aligned afterwards.
        for _ in 0..8 {
            assert_eq!(rolled.gen::<u64>(), untouched.gen::<u64>());
        }
    }
}
