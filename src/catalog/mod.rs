//! Static data describing every action available at the Bone Market.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{BoneMarketError, Result};

/// Declares a fieldless catalog enum with `ALL`, `title`, `ident` and `FromStr`.
macro_rules! catalog_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Member name as written in Rust, e.g. `VakeSkull`.
            pub fn title(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Member name as written on the command line, e.g. `VAKE_SKULL`.
            pub fn ident(self) -> String {
                $crate::catalog::screaming_snake(self.title())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::BoneMarketError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $crate::catalog::parse_member(s, $name::ALL.iter().map(|m| (m.ident(), *m)))
            }
        }
    };
}

pub mod action;
pub mod adjustments;
pub mod appendages;
pub mod buyers;
pub mod character;
pub mod costs;
pub mod declarations;
pub mod embellishments;
pub mod skulls;
pub mod torsos;
pub mod world;

pub use action::Action;
pub use adjustments::Adjustment;
pub use appendages::Appendage;
pub use buyers::Buyer;
pub use character::Character;
pub use declarations::Declaration;
pub use embellishments::Embellishment;
pub use skulls::Skull;
pub use torsos::Torso;
pub use world::{DiplomatFascination, Fluctuation, OccasionalBuyer};

catalog_enum! {
    /// Every enumeration the command line can list.
    Category {
        Torso,
        Skull,
        Appendage,
        Adjustment,
        Declaration,
        Embellishment,
        Buyer,
        Fluctuation,
        OccasionalBuyer,
        DiplomatFascination,
    }
}

impl Category {
    /// `(ident, description)` for each member of this enumeration.
    pub fn members(self) -> Vec<(String, String)> {
        fn described<T: Copy>(
            all: &[T],
            ident: impl Fn(T) -> String,
            describe: impl Fn(T) -> String,
        ) -> Vec<(String, String)> {
            all.iter().map(|m| (ident(*m), describe(*m))).collect()
        }

        match self {
            Category::Torso => described(Torso::ALL, Torso::ident, |m| m.to_string()),
            Category::Skull => described(Skull::ALL, Skull::ident, |m| m.to_string()),
            Category::Appendage => described(Appendage::ALL, Appendage::ident, |m| m.to_string()),
            Category::Adjustment => {
                described(Adjustment::ALL, Adjustment::ident, |m| m.to_string())
            }
            Category::Declaration => {
                described(Declaration::ALL, Declaration::ident, |m| m.to_string())
            }
            Category::Embellishment => {
                described(Embellishment::ALL, Embellishment::ident, |m| m.to_string())
            }
            Category::Buyer => described(Buyer::ALL, Buyer::ident, |m| m.to_string()),
            Category::Fluctuation => {
                described(Fluctuation::ALL, Fluctuation::ident, |m| m.to_string())
            }
            Category::OccasionalBuyer => {
                described(OccasionalBuyer::ALL, OccasionalBuyer::ident, |m| m.to_string())
            }
            Category::DiplomatFascination => described(
                DiplomatFascination::ALL,
                DiplomatFascination::ident,
                |m| m.to_string(),
            ),
        }
    }
}

/// Any action that can be bound into the model.
///
/// Written as `Category.MEMBER`, e.g. `Skull.VAKE_SKULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ActionKey {
    Torso(Torso),
    Skull(Skull),
    Appendage(Appendage),
    Adjustment(Adjustment),
    Declaration(Declaration),
    Embellishment(Embellishment),
    Buyer(Buyer),
}

impl ActionKey {
    /// Every action, in binding order.
    pub fn all() -> Vec<ActionKey> {
        Torso::ALL
            .iter()
            .copied()
            .map(ActionKey::Torso)
            .chain(Skull::ALL.iter().copied().map(ActionKey::Skull))
            .chain(Appendage::ALL.iter().copied().map(ActionKey::Appendage))
            .chain(Adjustment::ALL.iter().copied().map(ActionKey::Adjustment))
            .chain(Declaration::ALL.iter().copied().map(ActionKey::Declaration))
            .chain(Embellishment::ALL.iter().copied().map(ActionKey::Embellishment))
            .chain(Buyer::ALL.iter().copied().map(ActionKey::Buyer))
            .collect()
    }

    pub fn category(self) -> Category {
        match self {
            ActionKey::Torso(_) => Category::Torso,
            ActionKey::Skull(_) => Category::Skull,
            ActionKey::Appendage(_) => Category::Appendage,
            ActionKey::Adjustment(_) => Category::Adjustment,
            ActionKey::Declaration(_) => Category::Declaration,
            ActionKey::Embellishment(_) => Category::Embellishment,
            ActionKey::Buyer(_) => Category::Buyer,
        }
    }

    pub fn ident(self) -> String {
        match self {
            ActionKey::Torso(m) => m.ident(),
            ActionKey::Skull(m) => m.ident(),
            ActionKey::Appendage(m) => m.ident(),
            ActionKey::Adjustment(m) => m.ident(),
            ActionKey::Declaration(m) => m.ident(),
            ActionKey::Embellishment(m) => m.ident(),
            ActionKey::Buyer(m) => m.ident(),
        }
    }

    /// The catalog entry, with adjustments priced for `character`.
    pub fn action(self, character: &Character) -> Action {
        match self {
            ActionKey::Torso(m) => m.action(),
            ActionKey::Skull(m) => m.action(),
            ActionKey::Appendage(m) => m.action(),
            ActionKey::Adjustment(m) => m.action_for(character),
            ActionKey::Declaration(m) => m.action(),
            ActionKey::Embellishment(m) => m.action(),
            ActionKey::Buyer(m) => m.action(),
        }
    }

    /// Whether the action is taken at most once.
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            ActionKey::Torso(_)
                | ActionKey::Declaration(_)
                | ActionKey::Buyer(_)
                | ActionKey::Appendage(Appendage::SkipTails)
        )
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category().title(), self.ident())
    }
}

impl FromStr for ActionKey {
    type Err = BoneMarketError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || BoneMarketError::UnknownAction {
            name: s.to_string(),
            suggestion: closest(s, ActionKey::all().into_iter().map(|k| k.to_string())),
        };

        let (category, member) = s.trim().split_once('.').ok_or_else(unknown)?;
        let category: Category = category.parse().map_err(|_| unknown())?;

        let key = match category {
            Category::Torso => member.parse().map(ActionKey::Torso),
            Category::Skull => member.parse().map(ActionKey::Skull),
            Category::Appendage => member.parse().map(ActionKey::Appendage),
            Category::Adjustment => member.parse().map(ActionKey::Adjustment),
            Category::Declaration => member.parse().map(ActionKey::Declaration),
            Category::Embellishment => member.parse().map(ActionKey::Embellishment),
            Category::Buyer => member.parse().map(ActionKey::Buyer),
            _ => return Err(unknown()),
        };

        key.map_err(|_| unknown())
    }
}

impl From<ActionKey> for String {
    fn from(key: ActionKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ActionKey {
    type Error = BoneMarketError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// `VakeSkull` -> `VAKE_SKULL`.
pub(crate) fn screaming_snake(title: &str) -> String {
    let mut out = String::with_capacity(title.len() + 4);
    for (i, c) in title.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_uppercase());
    }
    out
}

/// Uppercase with separators removed, so `vake-skull`, `VakeSkull` and
/// `VAKE_SKULL` compare equal.
fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Best fuzzy match for `input` among `candidates`, if any is close enough.
pub(crate) fn closest(input: &str, candidates: impl Iterator<Item = String>) -> Option<String> {
    let wanted = squash(input);
    candidates
        .map(|c| {
            let score = jaro_winkler(&squash(&c), &wanted);
            (c, score)
        })
        .filter(|(_, score)| *score > 0.7)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c)
}

pub(crate) fn parse_member<T: Copy>(
    input: &str,
    members: impl Iterator<Item = (String, T)>,
) -> Result<T> {
    let wanted = squash(input);
    let members: Vec<(String, T)> = members.collect();

    if let Some((_, member)) = members.iter().find(|(ident, _)| squash(ident) == wanted) {
        return Ok(*member);
    }

    Err(BoneMarketError::UnknownAction {
        name: input.to_string(),
        suggestion: closest(input, members.into_iter().map(|(ident, _)| ident)),
    })
}
