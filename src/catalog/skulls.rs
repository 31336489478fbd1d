use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action that is taken immediately after starting a skeleton.
    Skull {
        BaptistSkull,
        BrassSkull,
        CoralSkull,
        DoubledSkull,
        EngravedSkull,
        EyelessSkull,
        HornedSkull,
        OwnSkull,
        PentagrammicSkull,
        PlatedSkull,
        RubberySkull,
        SabreToothedSkull,
        StygianIvory,
        VakeSkull,
        VictimSkull,
    }
}

impl Skull {
    pub fn action(self) -> Action {
        let skull = |name, cost| Action {
            skulls_needed: -1,
            skulls: 1,
            ..Action::new(name, cost)
        };

        match self {
            Skull::BaptistSkull => Action {
                value: 1250,
                counter_church: 1,
                ..skull(
                    "Duplicate the skull of John the Baptist, if you can call that a skull",
                    costs::ACTION + 500.0 * costs::BONE_FRAGMENT + 10.0 * costs::PEPPERCAPS,
                )
            },
            Skull::BrassSkull => Action {
                value: 6500,
                implausibility: 2,
                ..skull(
                    "Affix a Bright Brass Skull to your (Skeleton Type)",
                    costs::ACTION + costs::BRASS_SKULL + 200.0 * costs::NEVERCOLD_BRASS,
                )
            },
            Skull::CoralSkull => Action {
                value: 1750,
                amalgamy: 2,
                ..skull(
                    "Affix a Skull in Coral to your (Skeleton Type)",
                    costs::ACTION + costs::CORAL_SKULL + costs::SCINTILLACK,
                )
            },
            Skull::DoubledSkull => Action {
                value: 6250,
                skulls: 2,
                amalgamy: 1,
                antiquity: 2,
                ..skull(
                    "Affix a Doubled Skull to your (Skeleton Type)",
                    costs::ACTION + costs::DOUBLED_SKULL,
                )
            },
            Skull::EngravedSkull => Action {
                value: 10000,
                exhaustion: 2,
                ..skull(
                    "Affix a Custom-Engraved Skull to your (Skeleton Type)",
                    costs::ACTION + costs::ENGRAVED_SKULL,
                )
            },
            Skull::EyelessSkull => Action {
                value: 3000,
                menace: 2,
                ..skull(
                    "Affix an Eyeless Skull to your (Skeleton Type)",
                    costs::ACTION + costs::EYELESS_SKULL,
                )
            },
            Skull::HornedSkull => Action {
                value: 1250,
                antiquity: 1,
                menace: 2,
                ..skull(
                    "Affix a Horned Skull to your (Skeleton Type)",
                    costs::ACTION + costs::HORNED_SKULL,
                )
            },
            // Seeking the Name of Mr. Eaten
            Skull::OwnSkull => Action {
                value: -250,
                ..skull(
                    "Duplicate your own skull and affix it here",
                    costs::ACTION + 1000.0 * costs::BONE_FRAGMENT,
                )
            },
            Skull::PentagrammicSkull => Action {
                value: 1250,
                amalgamy: 2,
                menace: 1,
                ..skull(
                    "Affix a Pentagrammic Skull to your (Skeleton Type)",
                    costs::ACTION + costs::PENTAGRAMMIC_SKULL,
                )
            },
            Skull::PlatedSkull => Action {
                value: 2500,
                menace: 2,
                ..skull(
                    "Affix a Plated Skull to your (Skeleton Type)",
                    costs::ACTION + costs::PLATED_SKULL,
                )
            },
            Skull::RubberySkull => Action {
                value: 600,
                amalgamy: 1,
                ..skull(
                    "Affix a Rubbery Skull to your (Skeleton Type)",
                    costs::ACTION + costs::RUBBERY_SKULL,
                )
            },
            Skull::SabreToothedSkull => Action {
                value: 6250,
                antiquity: 1,
                menace: 1,
                ..skull(
                    "Affix a Sabre-toothed Skull to your (Skeleton Type)",
                    costs::ACTION + costs::SABRE_TOOTHED_SKULL,
                )
            },
            // Caps the neck without adding a skull.
            Skull::StygianIvory => Action {
                value: 250,
                skulls_needed: -1,
                ..Action::new(
                    "Use a Carved Ball of Stygian Ivory to cap off your (Skeleton Type)",
                    costs::ACTION + costs::STYGIAN_IVORY,
                )
            },
            // Value and implausibility scale with repetition and are aggregated separately.
            Skull::VakeSkull => Action {
                menace: 3,
                ..skull(
                    "Duplicate the Vake's skull and use it to decorate your (Skeleton Type)",
                    costs::ACTION + 6000.0 * costs::BONE_FRAGMENT,
                )
            },
            // Licentiate
            Skull::VictimSkull => Action {
                value: 250,
                ..skull("Cap this with a victim’s skull", costs::ACTION)
            },
        }
    }
}

impl fmt::Display for Skull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_skull_fills_one_slot() {
        for skull in Skull::ALL {
            assert_eq!(skull.action().skulls_needed, -1, "{skull:?}");
        }
    }

    #[test]
    fn test_vake_skull_has_no_flat_value() {
        assert_eq!(Skull::VakeSkull.action().value, 0);
        assert_eq!(Skull::VakeSkull.action().implausibility, 0);
    }
}
