//! Event identifiers and payload keys emitted by the engine.

pub const ON_ENTER_BATTLE: &str = "on_enter_battle";
pub const ON_EXIT_BATTLE: &str = "on_exit_battle";
pub const ON_TURN_START: &str = "on_turn_start";
pub const ON_TURN_END: &str = "on_turn_end";
pub const ON_USE_SKILL: &str = "on_use_skill";
pub const ON_ATTACK: &str = "on_attack";
pub const ON_RECEIVE_DAMAGE: &str = "on_receive_damage";
pub const ON_HEALED: &str = "on_healed";
pub const ON_APPLY_EFFECT: &str = "on_apply_effect";
pub const ON_REMOVE_EFFECT: &str = "on_remove_effect";
pub const ON_ALLY_DEATH: &str = "on_ally_death";
/// Broadcast after a team A actor finishes its turn.
pub const ON_ALLY_ACTION: &str = "on_ally_action";
/// Broadcast after a team B actor finishes its turn.
pub const ON_ENEMY_ACTION: &str = "on_enemy_action";
pub const ON_FIELD_APPLY: &str = "on_field_apply";
pub const ON_FIELD_TICK: &str = "on_field_tick";
pub const ON_FIELD_EXPIRE: &str = "on_field_expire";
pub const BATTLE_END: &str = "battle_end";

/// Payload keys.
pub mod keys {
    pub const AMOUNT: &str = "amount";
    pub const DAMAGE_TYPE: &str = "damage_type";
    pub const IS_CRITICAL: &str = "is_critical";
    pub const ATTACKER: &str = "attacker";
    pub const HEALER: &str = "healer";
    pub const SKILL: &str = "skill";
    pub const EFFECT: &str = "effect";
    pub const STACKS: &str = "stacks";
    pub const TURNS: &str = "turns";
}
