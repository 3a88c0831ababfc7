use std::sync::{Arc, Mutex};

use arena_core::event::{keys, names};
use arena_core::{
    Actor, ActorId, BaseStats, Battle, BattleConfig, EffectHook, EffectInstance, EventBus,
    EventContext, FieldEffect, ListenerHandle, Reaction, Resource, Side, Skill, Stat, TeamSpec,
};

type Recorded = Arc<Mutex<Vec<EventContext>>>;

fn record(bus: &mut EventBus, event_names: &[&str]) -> Recorded {
    let recorded: Recorded = Arc::default();
    for name in event_names {
        let sink = Arc::clone(&recorded);
        let listener: ListenerHandle =
            Arc::new(move |ctx: &EventContext, _: &mut Vec<Reaction>| {
                sink.lock().expect("recorder lock").push(ctx.clone());
            });
        bus.register(*name, listener, 0);
    }
    recorded
}

fn names_of(recorded: &Recorded) -> Vec<String> {
    recorded
        .lock()
        .expect("recorder lock")
        .iter()
        .map(|ctx| ctx.name().to_owned())
        .collect()
}

fn brawler(name: &str, hp: f64, atk: f64, speed: f64) -> Actor {
    Actor::new(
        name,
        BaseStats::default()
            .with(Stat::Hp, hp)
            .with(Stat::Atk, atk)
            .with(Stat::Speed, speed),
        [Skill::attack("Strike", 1.0, "physical")],
    )
}

// ============================================================================
// Termination
// ============================================================================

#[test]
fn test_one_hp_defender_falls_before_turn_cap() {
    let mut bus = EventBus::new();
    let ends = record(&mut bus, &[names::BATTLE_END]);

    let mut battle = Battle::with_bus(
        TeamSpec::new("Heroes", [brawler("Hero", 100.0, 40.0, 120.0)]),
        TeamSpec::new("Villains", [brawler("Weakling", 1.0, 40.0, 80.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.run(100).expect("battle runs");

    assert_eq!(battle.winner(), Some(Side::A));
    assert_eq!(battle.turn_number(), 1);

    let ends = ends.lock().expect("recorder lock");
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].number(keys::TURNS), Some(1.0));
}

#[test]
fn test_turn_cap_is_respected() {
    let mut battle = Battle::new(
        TeamSpec::new("A", [brawler("Wall", 10_000.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("Other Wall", 10_000.0, 1.0, 100.0)]),
        BattleConfig::default().with_max_turns(12),
    )
    .expect("valid teams");
    battle.run_default().expect("battle runs");

    assert_eq!(battle.turn_number(), 12);
    assert!(!battle.is_finished());
    assert_eq!(battle.summary().winner, None);
}

// ============================================================================
// Determinism
// ============================================================================

fn squad(prefix: &str) -> Vec<Actor> {
    (0..3u32)
        .map(|i| {
            let step = f64::from(i);
            brawler(&format!("{prefix}{i}"), 150.0, 30.0 + step * 5.0, 90.0 + step)
                .with_tags(["squad"])
        })
        .collect()
}

fn skirmish(seed: u64) -> Battle {
    Battle::new(
        TeamSpec::new("Red", squad("Red")),
        TeamSpec::new("Blue", squad("Blue")),
        BattleConfig::default().with_seed(seed),
    )
    .expect("valid teams")
}

#[test]
fn test_same_seed_same_battle() {
    let mut first = skirmish(7);
    let mut second = skirmish(7);
    first.run(200).expect("battle runs");
    second.run(200).expect("battle runs");

    assert_eq!(first.log().lines(), second.log().lines());
    assert_eq!(first.summary(), second.summary());
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_damage_fills_fury_meter() {
    let fury = Resource::new("fury", 100.0, 0.0).with_gain_on(names::ON_RECEIVE_DAMAGE, 10.0);
    let knight = brawler("Knight", 1_000.0, 10.0, 1.0).with_resources([fury]);
    let mut battle = Battle::new(
        TeamSpec::new("A", [knight]),
        TeamSpec::new("B", [brawler("Raider", 1_000.0, 20.0, 100.0)]),
        BattleConfig::default(),
    )
    .expect("valid teams");
    battle.run(2).expect("battle runs");

    let fury = battle
        .actor(ActorId(0))
        .and_then(|knight| knight.resources().value("fury"));
    assert_eq!(fury, Some(20.0));
}

#[test]
fn test_enter_battle_respects_listener_priority() {
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let mut bus = EventBus::new();
    for (label, priority) in [("low", 1), ("high", 10), ("mid", 5)] {
        let sink = Arc::clone(&order);
        let listener: ListenerHandle =
            Arc::new(move |_: &EventContext, _: &mut Vec<Reaction>| {
                sink.lock().expect("order lock").push(label);
            });
        bus.register(names::ON_ENTER_BATTLE, listener, priority);
    }

    let battle = Battle::with_bus(
        TeamSpec::new("A", [brawler("First", 10.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("Second", 10.0, 1.0, 100.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");

    assert_eq!(battle.turn_number(), 0);
    assert_eq!(
        *order.lock().expect("order lock"),
        ["high", "mid", "low", "high", "mid", "low"]
    );
}

#[test]
fn test_narration_reactions_reach_the_log() {
    let mut bus = EventBus::new();
    let listener: ListenerHandle = Arc::new(|ctx: &EventContext, reactions: &mut Vec<Reaction>| {
        if let Some(skill) = ctx.text(keys::SKILL) {
            reactions.push(Reaction::Narrate(format!("The crowd roars at {skill}")));
        }
    });
    bus.register(names::ON_USE_SKILL, listener, 0);

    let mut battle = Battle::with_bus(
        TeamSpec::new("A", [brawler("Star", 500.0, 10.0, 100.0)]),
        TeamSpec::new("B", [brawler("Dummy", 500.0, 10.0, 1.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.run(1).expect("battle runs");

    let lines = battle.log().lines();
    assert_eq!(lines[0], "Star uses Strike");
    assert_eq!(lines[1], "The crowd roars at Strike");
}

#[test]
fn test_ally_death_reaches_each_survivor() {
    let mut bus = EventBus::new();
    let deaths = record(&mut bus, &[names::ON_ALLY_DEATH, names::ON_EXIT_BATTLE]);

    let mut battle = Battle::with_bus(
        TeamSpec::new(
            "A",
            [
                brawler("Fragile", 1.0, 1.0, 1.0),
                brawler("Sturdy", 1_000.0, 1.0, 1.0),
                brawler("Stout", 1_000.0, 1.0, 1.0),
            ],
        ),
        TeamSpec::new("B", [brawler("Assassin", 1_000.0, 50.0, 100.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.defeat(ActorId(0));
    battle.defeat(ActorId(0));

    let recorded = deaths.lock().expect("recorder lock");
    let summary: Vec<(&str, Option<ActorId>, Vec<ActorId>)> = recorded
        .iter()
        .map(|ctx| (ctx.name(), ctx.source(), ctx.targets().to_vec()))
        .collect();
    assert_eq!(
        summary,
        [
            (names::ON_EXIT_BATTLE, Some(ActorId(0)), vec![]),
            (names::ON_ALLY_DEATH, Some(ActorId(0)), vec![ActorId(1)]),
            (names::ON_ALLY_DEATH, Some(ActorId(0)), vec![ActorId(2)]),
        ]
    );
}

#[test]
fn test_damage_after_defeat_is_ignored() {
    let mut bus = EventBus::new();
    let recorded = record(&mut bus, &[names::ON_RECEIVE_DAMAGE, names::ON_EXIT_BATTLE]);
    let mut battle = Battle::with_bus(
        TeamSpec::new("A", [brawler("Victim", 10.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("Brute", 1_000.0, 1.0, 100.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");

    let first = battle.apply_damage(ActorId(0), 50.0, "true", Some(ActorId(1)), false);
    let second = battle.apply_damage(ActorId(0), 50.0, "true", Some(ActorId(1)), true);
    let third = battle.apply_damage(ActorId(0), 5.0, "fire", None, false);

    assert!(first > 0.0);
    assert_eq!(second, 0.0);
    assert_eq!(third, 0.0);
    assert_eq!(
        names_of(&recorded),
        [names::ON_RECEIVE_DAMAGE, names::ON_EXIT_BATTLE]
    );
    assert_eq!(
        battle
            .log()
            .lines()
            .iter()
            .filter(|line| *line == "Victim is defeated")
            .count(),
        1
    );
}

#[test]
fn test_depleted_actor_never_takes_a_turn() {
    let mut bus = EventBus::new();
    let entered = record(&mut bus, &[names::ON_ENTER_BATTLE]);
    let mut battle = Battle::with_bus(
        TeamSpec::new(
            "A",
            [
                brawler("Ghost", 100.0, 50.0, 500.0).with_health(0.0),
                brawler("Hero", 100.0, 1.0, 100.0),
            ],
        ),
        TeamSpec::new("B", [brawler("Dummy", 1_000.0, 1.0, 100.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.run(4).expect("battle runs");

    let sources: Vec<Option<ActorId>> = entered
        .lock()
        .expect("recorder lock")
        .iter()
        .map(EventContext::source)
        .collect();
    assert_eq!(sources, [Some(ActorId(1)), Some(ActorId(2))]);
    assert!(!battle.log().lines().iter().any(|line| line.starts_with("Ghost")));
    assert_eq!(battle.turn_number(), 4);
}

#[test]
fn test_team_of_depleted_actors_has_already_lost() {
    let mut battle = Battle::new(
        TeamSpec::new("A", [brawler("Hero", 100.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("Husk", 100.0, 1.0, 100.0).with_health(-5.0)]),
        BattleConfig::default(),
    )
    .expect("valid teams");

    assert!(battle.is_finished());
    battle.run(10).expect("battle runs");
    assert_eq!(battle.turn_number(), 0);
    assert_eq!(battle.winner(), Some(Side::A));
}

// ============================================================================
// Effects and battlefield
// ============================================================================

#[test]
fn test_merged_buffs_of_different_strength_reverse_exactly() {
    let mut bus = EventBus::new();
    let applied = record(&mut bus, &[names::ON_APPLY_EFFECT, names::ON_REMOVE_EFFECT]);
    let guardian = Actor::new(
        "Guardian",
        BaseStats::default()
            .with(Stat::Hp, 1_000.0)
            .with(Stat::Defense, 100.0)
            .with(Stat::Speed, 100.0),
        [
            Skill::buff("Guard", Stat::Defense, 40.0, 3),
            Skill::buff("Brace", Stat::Defense, 20.0, 2),
        ],
    );
    let mut battle = Battle::with_bus(
        TeamSpec::new("A", [guardian]),
        TeamSpec::new("B", [brawler("Dummy", 1_000.0, 1.0, 1.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");

    let buffs: Vec<EffectInstance> = battle
        .actor(ActorId(0))
        .expect("guardian exists")
        .skills()
        .iter()
        .filter_map(|slot| slot.skill.buff_effect())
        .collect();
    for buff in buffs {
        battle.apply_effect(ActorId(0), buff);
    }
    let defense = |battle: &Battle| {
        battle
            .actor(ActorId(0))
            .map(|actor| actor.stat(Stat::Defense))
    };
    assert_eq!(defense(&battle), Some(160.0));

    battle.remove_effect(ActorId(0), "buff_defense");
    assert_eq!(defense(&battle), Some(100.0));
    assert_eq!(
        battle
            .actor(ActorId(0))
            .map(|actor| actor.stats().bonus(Stat::Defense)),
        Some(0.0)
    );

    let recorded = applied.lock().expect("recorder lock");
    let stacks: Vec<Option<f64>> = recorded.iter().map(|ctx| ctx.number(keys::STACKS)).collect();
    assert_eq!(stacks, [Some(1.0), Some(2.0), None]);
}

#[test]
fn test_expiry_hook_runs_before_bonus_is_removed() {
    let mut bus = EventBus::new();
    let recorded = record(&mut bus, &[names::ON_HEALED, names::ON_REMOVE_EFFECT]);
    let mut battle = Battle::with_bus(
        TeamSpec::new("A", [brawler("Hero", 100.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("Dummy", 1_000.0, 0.0, 1.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.apply_effect(
        ActorId(0),
        EffectInstance::new("vigor", 1)
            .with_modifier(Stat::Hp, 50.0)
            .on_expire(EffectHook::Heal { amount: 50.0 }),
    );
    battle.run(1).expect("battle runs");

    let hero = battle.actor(ActorId(0)).expect("hero exists");
    assert_eq!(hero.hp(), 150.0);
    assert_eq!(hero.max_hp(), 100.0);
    assert!(!hero.effects().contains("vigor"));
    assert_eq!(
        names_of(&recorded),
        [names::ON_HEALED, names::ON_REMOVE_EFFECT]
    );
}

#[test]
fn test_poison_ticks_until_the_holder_falls() {
    let mut battle = Battle::new(
        TeamSpec::new("A", [brawler("Victim", 30.0, 0.0, 100.0)]),
        TeamSpec::new("B", [brawler("Witch", 500.0, 0.0, 1.0)]),
        BattleConfig::default(),
    )
    .expect("valid teams");
    battle.apply_effect(
        ActorId(0),
        EffectInstance::new("poison", 3).on_tick(EffectHook::Damage {
            amount: 10.0,
            damage_type: "true".to_owned(),
        }),
    );
    battle.run(10).expect("battle runs");

    assert_eq!(battle.turn_number(), 3);
    assert_eq!(battle.winner(), Some(Side::B));
    assert!(battle.log().lines().iter().any(|line| line == "Victim is defeated"));
}

#[test]
fn test_field_effect_lifecycle_is_broadcast() {
    let mut bus = EventBus::new();
    let field_events = record(
        &mut bus,
        &[names::ON_FIELD_APPLY, names::ON_FIELD_TICK, names::ON_FIELD_EXPIRE],
    );
    let mut battle = Battle::with_bus(
        TeamSpec::new("A", [brawler("A1", 1_000.0, 1.0, 100.0)]),
        TeamSpec::new("B", [brawler("B1", 1_000.0, 1.0, 100.0)]),
        BattleConfig::default(),
        bus,
    )
    .expect("valid teams");
    battle.add_field_effect(FieldEffect::new("Heatwave", 2).with_modifier("fire", 0.5));
    battle.run(3).expect("battle runs");

    assert_eq!(
        names_of(&field_events),
        [
            names::ON_FIELD_APPLY,
            names::ON_FIELD_TICK,
            names::ON_FIELD_TICK,
            names::ON_FIELD_EXPIRE,
        ]
    );
    assert!(battle.battlefield().is_empty());
    assert!(
        field_events
            .lock()
            .expect("recorder lock")
            .iter()
            .all(|ctx| ctx.text(keys::EFFECT) == Some("Heatwave"))
    );
}

#[test]
fn test_buff_skill_raises_stat_for_its_duration() {
    let guardian = Actor::new(
        "Guardian",
        BaseStats::default()
            .with(Stat::Hp, 1_000.0)
            .with(Stat::Defense, 30.0)
            .with(Stat::Speed, 100.0),
        [Skill::buff("Shield Wall", Stat::Defense, 30.0, 2).with_cooldown(5)],
    );
    let mut battle = Battle::new(
        TeamSpec::new("A", [guardian]),
        TeamSpec::new("B", [brawler("Dummy", 1_000.0, 1.0, 1.0)]),
        BattleConfig::default(),
    )
    .expect("valid teams");

    battle.run(1).expect("battle runs");
    let defense = |battle: &Battle| {
        battle
            .actor(ActorId(0))
            .map(|actor| actor.stat(Stat::Defense))
    };
    assert_eq!(defense(&battle), Some(60.0));
    assert!(
        battle
            .log()
            .lines()
            .iter()
            .any(|line| line == "Guardian boosts defense of Guardian")
    );
}
