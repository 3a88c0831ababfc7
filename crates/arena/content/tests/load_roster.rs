use std::io::Write;

use arena_content::{ConfigLoader, DEMO_ROSTER, RosterLoader, demo_roster, demo_teams};
use arena_core::{Battle, BattleConfig, SkillKind, Stat};

#[test]
fn test_demo_roster_parses() {
    let roster = demo_roster().expect("bundled roster parses");

    assert_eq!(roster.team_a.name, "Order of Light");
    assert_eq!(roster.team_b.name, "Conclave");
    assert_eq!(roster.member_count(), 4);

    let knight = &roster.templates["knight"];
    assert_eq!(knight.stats.hp, 1200.0);
    assert_eq!(knight.stats.resistances.get("physical"), Some(&0.15));
    assert!(matches!(
        knight.skills[1].kind,
        SkillKind::Buff {
            stat: Stat::Defense,
            duration: 3,
            ..
        }
    ));

    let mage = &roster.templates["mage"];
    assert_eq!(mage.skills[1].costs.get("mana"), Some(&40.0));
    assert_eq!(mage.resources[0].regen_per_turn, 20.0);
}

#[test]
fn test_demo_teams_are_battle_ready() {
    let (team_a, team_b) = demo_teams().expect("demo teams build");
    let lancer = &team_b.members[0];
    assert_eq!(lancer.name(), "Black Lancer");
    assert!(lancer.has_tag("paladin"));
    assert_eq!(lancer.resources().value("fury"), Some(30.0));

    let mut battle =
        Battle::new(team_a, team_b, BattleConfig::default().with_seed(3)).expect("valid teams");
    battle.run(20).expect("demo battle runs");

    assert!(battle.turn_number() > 0);
    assert!(battle.turn_number() <= 20);
    assert!(!battle.log().is_empty());
}

#[test]
fn test_roster_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(DEMO_ROSTER.as_bytes()).expect("write roster");

    let (team_a, team_b) = RosterLoader::load_teams(file.path()).expect("roster loads");
    assert_eq!(team_a.members.len(), 2);
    assert_eq!(team_b.members[1].name(), "Selene");
}

#[test]
fn test_missing_roster_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.ron");

    let err = RosterLoader::load(&path).expect_err("file is missing");
    assert!(err.to_string().contains("absent.ron"));
}

#[test]
fn test_unknown_template_fails_to_build() {
    let source = DEMO_ROSTER.replace("template: \"mage\"", "template: \"lich\"");
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(source.as_bytes()).expect("write roster");

    let err = RosterLoader::load_teams(file.path()).expect_err("template is unknown");
    assert!(err.to_string().contains("lich"));
}

#[test]
fn test_config_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "max_turns = 20\nseed = 9").expect("write config");

    let config = ConfigLoader::load(file.path()).expect("config loads");
    assert_eq!(config.max_turns, 20);
    assert_eq!(config.seed, 9);
}
