use super::team::{Side, Team, TeamSpec};
use super::{Actor, ActorId};
use crate::error::{ArenaError, ErrorSeverity};

/// Rejected battle construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{actor} has no skills")]
    NoSkills { actor: String },

    #[error("skill `{skill}` of {actor} costs unknown resource `{resource}`")]
    UnknownResource {
        actor: String,
        skill: String,
        resource: String,
    },

    #[error("{actor} already fights for side {side}")]
    AlreadyEnlisted { actor: String, side: Side },
}

impl ArenaError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSkills { .. } => "setup_no_skills",
            Self::UnknownResource { .. } => "setup_unknown_resource",
            Self::AlreadyEnlisted { .. } => "setup_already_enlisted",
        }
    }
}

/// Owner of every actor in a battle, indexed by [`ActorId`].
///
/// Ids are assigned in roster order: team A members first, then team B.
#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    actors: Vec<Actor>,
    teams: [Team; 2],
}

impl Roster {
    /// Enlist both teams, validating every actor. Actors that start with no
    /// health are enlisted already defeated.
    ///
    /// # Errors
    ///
    /// [`SetupError`] if an actor has no skills, a skill costs a resource the
    /// actor does not have, or an actor already belongs to a team.
    pub fn new(team_a: TeamSpec, team_b: TeamSpec) -> Result<Self, SetupError> {
        let mut actors = Vec::with_capacity(team_a.members.len() + team_b.members.len());
        let team_a = Self::enlist(team_a, Side::A, &mut actors)?;
        let team_b = Self::enlist(team_b, Side::B, &mut actors)?;
        Ok(Self {
            actors,
            teams: [team_a, team_b],
        })
    }

    fn enlist(spec: TeamSpec, side: Side, actors: &mut Vec<Actor>) -> Result<Team, SetupError> {
        let mut members = Vec::with_capacity(spec.members.len());
        for mut actor in spec.members {
            validate(&actor)?;
            actor.enlist(side);
            if actor.is_depleted() {
                actor.mark_defeated();
            }
            let id = ActorId(actors.len() as u32);
            actors.push(actor);
            members.push(id);
        }
        Ok(Team {
            name: spec.name,
            side,
            members,
        })
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    /// Every actor with its id, in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (ActorId(index as u32), actor))
    }

    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.actors.len()).map(|index| ActorId(index as u32))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub fn side_of(&self, id: ActorId) -> Option<Side> {
        self.actor(id).and_then(Actor::side)
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actor(id).is_some_and(Actor::is_alive)
    }

    pub fn alive_members(&self, side: Side) -> Vec<ActorId> {
        self.team(side)
            .members
            .iter()
            .copied()
            .filter(|id| self.is_alive(*id))
            .collect()
    }

    /// A team is defeated when none of its members is alive.
    pub fn is_defeated(&self, side: Side) -> bool {
        !self.team(side).members.iter().any(|id| self.is_alive(*id))
    }

    /// Living teammates of `id` (including itself while alive). A teamless
    /// actor is its only ally.
    pub fn allies_of(&self, id: ActorId) -> Vec<ActorId> {
        match self.side_of(id) {
            Some(side) => self.alive_members(side),
            None => vec![id],
        }
    }

    /// Living members of the other team. A teamless actor opposes every
    /// actor that has a team.
    pub fn enemies_of(&self, id: ActorId) -> Vec<ActorId> {
        match self.side_of(id) {
            Some(side) => self.alive_members(side.opponent()),
            None => self
                .iter()
                .filter(|(_, actor)| actor.side().is_some())
                .map(|(other, _)| other)
                .collect(),
        }
    }

    pub fn snapshot(&self) -> Vec<super::ActorSnapshot> {
        self.iter().map(|(id, actor)| actor.snapshot(id)).collect()
    }
}

fn validate(actor: &Actor) -> Result<(), SetupError> {
    if let Some(side) = actor.side() {
        return Err(SetupError::AlreadyEnlisted {
            actor: actor.name().to_owned(),
            side,
        });
    }
    if actor.skills().is_empty() {
        return Err(SetupError::NoSkills {
            actor: actor.name().to_owned(),
        });
    }
    for slot in actor.skills() {
        if let Some(resource) = actor.resources().first_missing(&slot.skill.costs) {
            return Err(SetupError::UnknownResource {
                actor: actor.name().to_owned(),
                skill: slot.skill.name.clone(),
                resource: resource.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use crate::skill::Skill;
    use crate::stats::{BaseStats, Stat};

    fn fighter(name: &str) -> Actor {
        Actor::new(
            name,
            BaseStats::default().with(Stat::Hp, 100.0),
            [Skill::attack("Hit", 1.0, "physical")],
        )
    }

    fn roster() -> Roster {
        Roster::new(
            TeamSpec::new("Light", [fighter("a1"), fighter("a2")]),
            TeamSpec::new("Dark", [fighter("b1")]),
        )
        .unwrap()
    }

    fn solo(actor: Actor) -> Result<Roster, SetupError> {
        Roster::new(TeamSpec::new("A", [actor]), TeamSpec::new("B", Vec::<Actor>::new()))
    }

    #[test]
    fn ids_follow_roster_order() {
        let roster = roster();
        let names: Vec<_> = roster.iter().map(|(_, actor)| actor.name()).collect();
        assert_eq!(names, ["a1", "a2", "b1"]);
        assert_eq!(roster.team(Side::B).members, vec![ActorId(2)]);
        assert_eq!(roster.side_of(ActorId(1)), Some(Side::A));
        assert_eq!(roster.actor(ActorId(9)), None);
    }

    #[test]
    fn allies_and_enemies_only_list_the_living() {
        let mut roster = roster();
        assert_eq!(roster.allies_of(ActorId(0)), vec![ActorId(0), ActorId(1)]);
        assert_eq!(roster.enemies_of(ActorId(2)), vec![ActorId(0), ActorId(1)]);

        roster.actor_mut(ActorId(1)).unwrap().mark_defeated();

        assert_eq!(roster.allies_of(ActorId(0)), vec![ActorId(0)]);
        assert_eq!(roster.enemies_of(ActorId(2)), vec![ActorId(0)]);
        assert!(!roster.is_defeated(Side::A));

        roster.actor_mut(ActorId(0)).unwrap().mark_defeated();
        assert!(roster.is_defeated(Side::A));
        assert!(!roster.is_defeated(Side::B));
    }

    #[test]
    fn actor_without_skills_is_rejected() {
        let mute = Actor::new("mute", BaseStats::default(), Vec::<Skill>::new());
        let err = solo(mute).unwrap_err();
        assert_eq!(
            err,
            SetupError::NoSkills {
                actor: "mute".to_owned()
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn cost_must_name_an_owned_resource() {
        let caster = Actor::new(
            "caster",
            BaseStats::default(),
            [Skill::heal("Mend", 10.0).with_cost("mana", 5.0)],
        )
        .with_resources([Resource::new("fury", 100.0, 0.0)]);

        let err = solo(caster).unwrap_err();
        assert_eq!(err.error_code(), "setup_unknown_resource");
    }

    #[test]
    fn depleted_actor_enlists_defeated() {
        let fallen = fighter("fallen").with_health(0.0);
        let roster = Roster::new(
            TeamSpec::new("Light", [fallen, fighter("a2")]),
            TeamSpec::new("Dark", [fighter("b1")]),
        )
        .unwrap();

        assert!(!roster.is_alive(ActorId(0)));
        assert_eq!(roster.side_of(ActorId(0)), Some(Side::A));
        assert_eq!(roster.alive_members(Side::A), vec![ActorId(1)]);
        assert_eq!(roster.enemies_of(ActorId(2)), vec![ActorId(1)]);
    }

    #[test]
    fn enlisted_actor_cannot_join_again() {
        let roster = roster();
        let veteran = roster.actor(ActorId(0)).unwrap().clone();
        let err = solo(veteran).unwrap_err();
        assert!(matches!(err, SetupError::AlreadyEnlisted { side: Side::A, .. }));
    }
}
