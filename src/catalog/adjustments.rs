use std::fmt;

use super::action::Action;
use super::character::{self, Character};
use super::costs;

catalog_enum! {
    /// An action that is taken after all parts have been added to a skeleton.
    Adjustment {
        CarveAwayAge,
        DisguiseAmalgamy,
        MakeLessDreadful,
    }
}

impl Adjustment {
    /// The adjustment as performed by a fully skilled character.
    pub fn action(self) -> Action {
        self.action_for(&Character::default())
    }

    /// The adjustment priced for the skills of `character`.
    ///
    /// Failed attempts cost another action each and make the skeleton less
    /// plausible, so both scale with the odds of the narrow challenge.
    pub fn action_for(self, character: &Character) -> Action {
        let stat = match self {
            Adjustment::CarveAwayAge => character.mithridacy,
            Adjustment::DisguiseAmalgamy | Adjustment::MakeLessDreadful => {
                character.kataleptic_toxicology
            }
        };
        let attempts = costs::ACTION / character::narrow_challenge(stat);
        let implausibility = character::failure_implausibility(stat);

        match self {
            Adjustment::CarveAwayAge => Action {
                antiquity: -2,
                implausibility,
                ..Action::new("Carve away some evidence of age", attempts)
            },
            Adjustment::DisguiseAmalgamy => Action {
                amalgamy: -2,
                implausibility,
                ..Action::new(
                    "Disguise the amalgamy of this piece",
                    25.0 * costs::JADE_FRAGMENT + attempts,
                )
            },
            Adjustment::MakeLessDreadful => Action {
                menace: -2,
                implausibility,
                ..Action::new("Make your skeleton less dreadful", attempts)
            },
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}
