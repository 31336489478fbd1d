use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action that is taken after all adjustments have been made to a skeleton.
    Declaration {
        Amphibian,
        Ape,
        Bird,
        Chimera,
        Curator,
        Fish,
        Humanoid,
        Insect,
        Monkey,
        Reptile,
        Spider,
    }
}

impl Declaration {
    pub fn action(self) -> Action {
        let name = match self {
            Declaration::Amphibian => "Declare your (Skeleton Type) a completed Amphibian",
            Declaration::Ape => "Declare your (Skeleton Type) a completed Ape",
            Declaration::Bird => "Declare your (Skeleton Type) a completed Bird",
            Declaration::Chimera => "Declare your (Skeleton Type) a completed Chimera",
            Declaration::Curator => "Declare your (Skeleton Type) a completed Curator",
            Declaration::Fish => "Declare your (Skeleton Type) a completed Fish",
            Declaration::Humanoid => "Declare your (Skeleton Type) a completed Humanoid",
            Declaration::Insect => "Declare your (Skeleton Type) a completed Insect",
            Declaration::Monkey => "Declare your (Skeleton Type) a completed Monkey",
            Declaration::Reptile => "Declare your (Skeleton Type) a completed Reptile",
            Declaration::Spider => "Declare your (Skeleton Type) a completed Spider",
        };

        match self {
            Declaration::Chimera => Action {
                implausibility: 3,
                ..Action::new(name, costs::ACTION)
            },
            _ => Action::new(name, costs::ACTION),
        }
    }

    /// Percentage added to value while Zoological Mania favours this declaration.
    pub fn mania_multiplier(self) -> i64 {
        match self {
            Declaration::Fish | Declaration::Insect | Declaration::Spider => 15,
            _ => 10,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}
