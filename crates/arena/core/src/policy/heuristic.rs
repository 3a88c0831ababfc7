use tracing::debug;

use super::{ChosenAction, DecisionPolicy, PolicyError};
use crate::actor::ActorId;
use crate::battle::BattleView;
use crate::config::HeuristicConfig;

/// Survival first, then setup, then damage.
///
/// 1. Heal if a heal skill is available and the neediest ally is below
///    `heal_threshold` of its health.
/// 2. Buff while the battle is younger than `buff_turns` turns.
/// 3. Otherwise use the available attack with the highest power (first one
///    on ties).
/// 4. Otherwise the first available skill.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy {
    config: HeuristicConfig,
}

impl HeuristicPolicy {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }
}

impl DecisionPolicy for HeuristicPolicy {
    fn choose_action(
        &self,
        actor: ActorId,
        view: &mut BattleView<'_>,
    ) -> Result<ChosenAction, PolicyError> {
        let combatant = view.actor(actor).ok_or(PolicyError::UnknownActor(actor))?;
        let available = combatant.available_skills();
        let Some(&(fallback, _)) = available.first() else {
            return Err(PolicyError::NoActionAvailable {
                actor: combatant.name().to_owned(),
            });
        };
        let choose = |skill: usize, reason: &'static str| -> Result<ChosenAction, PolicyError> {
            debug!(target: "arena::policy", actor = %actor, skill, reason, "chose action");
            Ok(ChosenAction { actor, skill })
        };

        if let Some(&(heal, _)) = available.iter().find(|(_, skill)| skill.is_heal()) {
            let needs_heal = view
                .pick_ally_to_heal(actor)
                .and_then(|ally| view.actor(ally))
                .is_some_and(|ally| ally.health_fraction() < self.config.heal_threshold);
            if needs_heal {
                return choose(heal, "heal");
            }
        }

        if view.turn_number() < self.config.buff_turns {
            if let Some(&(buff, _)) = available.iter().find(|(_, skill)| skill.is_buff()) {
                return choose(buff, "buff");
            }
        }

        let strongest = available
            .iter()
            .filter_map(|(index, skill)| skill.power().map(|power| (*index, power)))
            .fold(None, |best: Option<(usize, f64)>, (index, power)| match best {
                Some((_, best_power)) if best_power >= power => best,
                _ => Some((index, power)),
            });
        if let Some((attack, _)) = strongest {
            return choose(attack, "attack");
        }

        choose(fallback, "fallback")
    }
}
