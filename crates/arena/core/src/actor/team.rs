use super::{Actor, ActorId};

/// Which of the two teams an actor fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// A named group of actors handed to [`crate::Battle::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct TeamSpec {
    pub name: String,
    pub members: Vec<Actor>,
}

impl TeamSpec {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = Actor>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }
}

/// A team inside a battle: its name and member ids in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub name: String,
    pub side: Side,
    pub members: Vec<ActorId>,
}
