use std::collections::BTreeMap;
use std::str::FromStr;

use super::StatError;
use super::kind::{DEFAULT_DAMAGE_TYPES, Stat};

// ============================================================================
// Base Stats
// ============================================================================

/// Attributes an actor is built with. Never mutated once a [`StatModel`] owns it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BaseStats {
    pub hp: f64,
    pub atk: f64,
    pub mag: f64,
    pub defense: f64,
    pub resistance: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub speed: f64,
    pub accuracy: f64,
    pub evasion: f64,
    /// Fraction of incoming damage ignored, per damage type.
    pub resistances: BTreeMap<String, f64>,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Mag => self.mag,
            Stat::Defense => self.defense,
            Stat::Resistance => self.resistance,
            Stat::CritChance => self.crit_chance,
            Stat::CritDamage => self.crit_damage,
            Stat::Speed => self.speed,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    #[must_use]
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        let slot = match stat {
            Stat::Hp => &mut self.hp,
            Stat::Atk => &mut self.atk,
            Stat::Mag => &mut self.mag,
            Stat::Defense => &mut self.defense,
            Stat::Resistance => &mut self.resistance,
            Stat::CritChance => &mut self.crit_chance,
            Stat::CritDamage => &mut self.crit_damage,
            Stat::Speed => &mut self.speed,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        };
        *slot = value;
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, damage_type: impl Into<String>, value: f64) -> Self {
        self.resistances.insert(damage_type.into(), value);
        self
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: 0.0,
            atk: 0.0,
            mag: 0.0,
            defense: 0.0,
            resistance: 0.0,
            crit_chance: 0.0,
            crit_damage: 1.5,
            speed: 100.0,
            accuracy: 1.0,
            evasion: 0.05,
            resistances: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Stat Model
// ============================================================================

/// Base stats plus the derived view every formula reads.
///
/// Invariant: `get(stat) == base + bonus` unless an override was set since
/// the last [`refresh`](Self::refresh) (or since the last bonus change to
/// that stat, which recomputes it).
#[derive(Clone, Debug, PartialEq)]
pub struct StatModel {
    base: BaseStats,
    current: [f64; Stat::COUNT],
    bonus: [f64; Stat::COUNT],
    resistance_bonus: BTreeMap<String, f64>,
    damage_types: Vec<String>,
}

impl StatModel {
    pub fn new(base: BaseStats) -> Self {
        let mut damage_types: Vec<String> =
            DEFAULT_DAMAGE_TYPES.iter().map(|name| (*name).to_owned()).collect();
        for damage_type in base.resistances.keys() {
            if !damage_types.contains(damage_type) {
                damage_types.push(damage_type.clone());
            }
        }

        Self {
            current: Stat::ALL.map(|stat| base.get(stat)),
            bonus: [0.0; Stat::COUNT],
            resistance_bonus: BTreeMap::new(),
            damage_types,
            base,
        }
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    // ===== additive layer =====

    /// Accumulate `delta` into the bonus of a named stat and recompute it.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidStat`] if `name` is not a recognised stat; nothing
    /// is applied in that case.
    pub fn apply_modifier(&mut self, name: &str, delta: f64) -> Result<(), StatError> {
        let stat = parse_stat(name)?;
        self.add_bonus(stat, delta);
        Ok(())
    }

    pub fn add_bonus(&mut self, stat: Stat, delta: f64) {
        self.bonus[stat.index()] += delta;
        self.recalculate(stat);
    }

    pub fn bonus(&self, stat: Stat) -> f64 {
        self.bonus[stat.index()]
    }

    /// Accumulate a resistance bonus, widening the known damage types if needed.
    pub fn apply_resistance_modifier(&mut self, damage_type: &str, delta: f64) {
        if !self.knows_damage_type(damage_type) {
            self.damage_types.push(damage_type.to_owned());
        }
        *self
            .resistance_bonus
            .entry(damage_type.to_owned())
            .or_insert(0.0) += delta;
    }

    // ===== override layer =====

    /// Force the derived value of a named stat until the next refresh.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidStat`] if `name` is not a recognised stat.
    pub fn set_override(&mut self, name: &str, value: f64) -> Result<(), StatError> {
        let stat = parse_stat(name)?;
        self.override_stat(stat, value);
        Ok(())
    }

    pub fn override_stat(&mut self, stat: Stat, value: f64) {
        self.current[stat.index()] = value;
    }

    /// Override every recognised name in `values`. Unknown names are skipped.
    pub fn update_from<'a>(&mut self, values: impl IntoIterator<Item = (&'a str, f64)>) {
        for (name, value) in values {
            if let Ok(stat) = Stat::from_str(name) {
                self.override_stat(stat, value);
            }
        }
    }

    /// Override every recognised stat with its current value times `factor`.
    pub fn scale<'a>(&mut self, factors: impl IntoIterator<Item = (&'a str, f64)>) {
        for (name, factor) in factors {
            if let Ok(stat) = Stat::from_str(name) {
                let scaled = self.get(stat) * factor;
                self.override_stat(stat, scaled);
            }
        }
    }

    /// Recompute every stat as base + bonus, dropping overrides.
    pub fn refresh(&mut self) {
        for stat in Stat::ALL {
            self.recalculate(stat);
        }
    }

    // ===== queries =====

    pub fn get(&self, stat: Stat) -> f64 {
        self.current[stat.index()]
    }

    /// # Errors
    ///
    /// [`StatError::InvalidStat`] if `name` is not a recognised stat.
    pub fn get_named(&self, name: &str) -> Result<f64, StatError> {
        parse_stat(name).map(|stat| self.get(stat))
    }

    /// Base resistance plus bonus; zero for damage types never mentioned.
    pub fn get_resistance(&self, damage_type: &str) -> f64 {
        self.base.resistances.get(damage_type).copied().unwrap_or(0.0)
            + self
                .resistance_bonus
                .get(damage_type)
                .copied()
                .unwrap_or(0.0)
    }

    pub fn damage_types(&self) -> &[String] {
        &self.damage_types
    }

    pub fn knows_damage_type(&self, damage_type: &str) -> bool {
        self.damage_types.iter().any(|known| known == damage_type)
    }

    /// Every stat followed by `res_<type>` for every known damage type.
    pub fn as_map(&self) -> Vec<(String, f64)> {
        Stat::ALL
            .iter()
            .map(|stat| (stat.to_string(), self.get(*stat)))
            .chain(
                self.damage_types
                    .iter()
                    .map(|damage_type| {
                        (format!("res_{damage_type}"), self.get_resistance(damage_type))
                    }),
            )
            .collect()
    }

    fn recalculate(&mut self, stat: Stat) {
        self.current[stat.index()] = self.base.get(stat) + self.bonus[stat.index()];
    }
}

fn parse_stat(name: &str) -> Result<Stat, StatError> {
    Stat::from_str(name).map_err(|_| StatError::InvalidStat(name.to_owned()))
}

/// Merge resistance maps by adding values of the same damage type.
pub fn combine_resistances<'a>(
    maps: impl IntoIterator<Item = &'a BTreeMap<String, f64>>,
) -> BTreeMap<String, f64> {
    let mut merged = BTreeMap::new();
    for map in maps {
        for (damage_type, value) in map {
            *merged.entry(damage_type.clone()).or_insert(0.0) += value;
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> StatModel {
        StatModel::new(
            BaseStats::default()
                .with(Stat::Hp, 1200.0)
                .with(Stat::Atk, 180.0)
                .with(Stat::Defense, 120.0)
                .with_resistance("physical", 0.15),
        )
    }

    #[test]
    fn modifiers_accumulate_on_top_of_base() {
        let mut stats = knight();
        stats.apply_modifier("atk", 40.0).unwrap();
        stats.apply_modifier("atk", 40.0).unwrap();
        assert_eq!(stats.get(Stat::Atk), 260.0);
        assert_eq!(stats.bonus(Stat::Atk), 80.0);

        stats.apply_modifier("atk", -80.0).unwrap();
        assert_eq!(stats.get(Stat::Atk), 180.0);
    }

    #[test]
    fn unknown_stat_is_rejected_without_side_effects() {
        let mut stats = knight();
        let before = stats.clone();

        assert_eq!(
            stats.apply_modifier("luck", 5.0),
            Err(StatError::InvalidStat("luck".to_owned()))
        );
        assert!(stats.set_override("luck", 5.0).is_err());
        assert!(stats.get_named("luck").is_err());
        assert_eq!(stats, before);
    }

    #[test]
    fn override_holds_until_refresh() {
        let mut stats = knight();
        stats.apply_modifier("defense", 10.0).unwrap();
        stats.set_override("defense", 1.0).unwrap();
        assert_eq!(stats.get(Stat::Defense), 1.0);

        stats.refresh();
        assert_eq!(stats.get(Stat::Defense), 130.0);
    }

    #[test]
    fn bonus_change_recomputes_overridden_stat() {
        let mut stats = knight();
        stats.set_override("atk", 999.0).unwrap();
        stats.add_bonus(Stat::Atk, 5.0);
        assert_eq!(stats.get(Stat::Atk), 185.0);
    }

    #[test]
    fn scale_and_update_from_skip_unknown_names() {
        let mut stats = knight();
        stats.scale([("atk", 2.0), ("luck", 3.0)]);
        assert_eq!(stats.get(Stat::Atk), 360.0);

        stats.update_from([("speed", 50.0), ("charm", 1.0)]);
        assert_eq!(stats.get(Stat::Speed), 50.0);
    }

    #[test]
    fn resistance_vocabulary_widens_per_instance() {
        let mut stats = knight();
        let other = knight();
        assert!(!stats.knows_damage_type("poison"));

        stats.apply_resistance_modifier("poison", 0.3);
        stats.apply_resistance_modifier("physical", 0.05);

        assert!(stats.knows_damage_type("poison"));
        assert!(!other.knows_damage_type("poison"));
        assert!((stats.get_resistance("poison") - 0.3).abs() < 1e-9);
        assert!((stats.get_resistance("physical") - 0.2).abs() < 1e-9);
        assert_eq!(stats.get_resistance("unheard_of"), 0.0);

        let map = stats.as_map();
        assert_eq!(map[0], ("hp".to_owned(), 1200.0));
        assert!(map.iter().any(|(key, _)| key == "res_poison"));
        assert_eq!(map.len(), Stat::COUNT + DEFAULT_DAMAGE_TYPES.len() + 1);
    }

    #[test]
    fn combine_resistances_adds_matching_types() {
        let a = BTreeMap::from([("fire".to_owned(), 0.2), ("ice".to_owned(), -0.1)]);
        let b = BTreeMap::from([("fire".to_owned(), -0.05)]);

        let merged = combine_resistances([&a, &b]);

        assert!((merged["fire"] - 0.15).abs() < 1e-9);
        assert!((merged["ice"] + 0.1).abs() < 1e-9);
    }
}
