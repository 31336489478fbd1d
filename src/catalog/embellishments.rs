use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action is taken after a declaration has been made for a skeleton.
    Embellishment {
        MorePlausible,
        ConvincingHistory,
    }
}

impl Embellishment {
    pub fn action(self) -> Action {
        match self {
            Embellishment::MorePlausible => Action {
                implausibility: -1,
                ..Action::new(
                    "Make it seem just a bit more plausible",
                    costs::ACTION + costs::REVISIONIST_NARRATIVE,
                )
            },
            Embellishment::ConvincingHistory => Action {
                implausibility: -5,
                ..Action::new(
                    "Invest great time and skill in coming up with a convincing history",
                    costs::ACTION + 3.0 * costs::REVISIONIST_NARRATIVE,
                )
            },
        }
    }
}

impl fmt::Display for Embellishment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}
