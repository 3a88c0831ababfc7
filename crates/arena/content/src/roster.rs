//! Roster definitions: reusable actor templates and the two teams built from
//! them.

use std::collections::BTreeMap;

use arena_core::{Actor, BaseStats, Resource, Skill, TeamSpec};

/// Errors raised while turning a [`RosterFile`] into battle-ready teams.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("member '{member}' of team '{team}' uses unknown template '{template}'")]
    UnknownTemplate {
        team: String,
        member: String,
        template: String,
    },
}

/// Everything needed to build one actor except its display name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActorTemplate {
    pub stats: BaseStats,
    pub skills: Vec<Skill>,
    pub tags: Vec<String>,
    pub resources: Vec<Resource>,
}

impl ActorTemplate {
    /// A fresh actor at full health named `name`. Resource values are
    /// clamped to their bounds.
    pub fn instantiate(&self, name: impl Into<String>) -> Actor {
        let resources = self.resources.iter().cloned().map(|mut resource| {
            resource.clamp();
            resource
        });
        Actor::new(name, self.stats.clone(), self.skills.iter().cloned())
            .with_tags(self.tags.iter().cloned())
            .with_resources(resources)
    }
}

/// One roster slot: a name, the template it is built from and any extra tags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberSpec {
    pub name: String,
    pub template: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamFile {
    pub name: String,
    pub members: Vec<MemberSpec>,
}

/// Top-level roster document.
///
/// ```ron
/// RosterFile(
///     templates: { "knight": ActorTemplate(stats: BaseStats(hp: 1200.0), skills: [..]) },
///     team_a: TeamFile(name: "Order", members: [MemberSpec(name: "Galahad", template: "knight")]),
///     team_b: TeamFile(name: "Conclave", members: [..]),
/// )
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterFile {
    #[cfg_attr(feature = "serde", serde(default))]
    pub templates: BTreeMap<String, ActorTemplate>,
    pub team_a: TeamFile,
    pub team_b: TeamFile,
}

impl RosterFile {
    /// Instantiate both teams in file order.
    ///
    /// # Errors
    ///
    /// [`RosterError::UnknownTemplate`] if a member names a template the file
    /// does not define.
    pub fn build_teams(&self) -> Result<(TeamSpec, TeamSpec), RosterError> {
        Ok((self.build_team(&self.team_a)?, self.build_team(&self.team_b)?))
    }

    fn build_team(&self, team: &TeamFile) -> Result<TeamSpec, RosterError> {
        let members = team
            .members
            .iter()
            .map(|member| {
                let template = self.templates.get(&member.template).ok_or_else(|| {
                    RosterError::UnknownTemplate {
                        team: team.name.clone(),
                        member: member.name.clone(),
                        template: member.template.clone(),
                    }
                })?;
                Ok(template
                    .instantiate(&member.name)
                    .with_tags(member.tags.iter().cloned()))
            })
            .collect::<Result<Vec<Actor>, RosterError>>()?;
        Ok(TeamSpec::new(team.name.clone(), members))
    }

    pub fn member_count(&self) -> usize {
        self.team_a.members.len() + self.team_b.members.len()
    }
}
