use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action that is taken once all skulls are added to a skeleton.
    Appendage {
        AddJoints,
        AlbatrossWing,
        AmberFin,
        BatWing,
        BlackStinger,
        CrustaceanPincer,
        DeerFemur,
        FiacreThigh,
        FinBones,
        FossilisedForelimb,
        HelicalThigh,
        HumanArm,
        IvoryFemur,
        IvoryHumerus,
        JurassicThigh,
        KnottedHumerus,
        ObsidianTail,
        PlasterTailBones,
        TerrorBirdWing,
        TombLionTail,
        UnidentifiedThigh,
        WitheredTail,
        WitheredTentacle,
        RemoveTail,
        SkipTails,
    }
}

impl Appendage {
    pub fn action(self) -> Action {
        let limb = |name, cost| Action {
            limbs_needed: -1,
            ..Action::new(name, cost)
        };
        let tail = |name, cost| Action {
            tails_needed: -1,
            tails: 1,
            ..Action::new(name, cost)
        };

        match self {
            // The amber cost grows with every repetition and is aggregated separately.
            Appendage::AddJoints => Action {
                limbs_needed: 4,
                amalgamy: 2,
                ..Action::new(
                    "Add four more joints to your skeleton",
                    costs::ACTION + costs::TREMBLING_AMBER,
                )
            },
            Appendage::AlbatrossWing => Action {
                value: 1250,
                wings: 1,
                amalgamy: 1,
                ..limb(
                    "Put an Albatross Wing on your (Skeleton Type)",
                    costs::ACTION + costs::ALBATROSS_WING,
                )
            },
            Appendage::AmberFin => Action {
                value: 1500,
                fins: 1,
                amalgamy: 1,
                menace: 1,
                ..limb(
                    "Attach the Amber-Crusted Fin to your (Skeleton Type)",
                    costs::ACTION + costs::AMBER_FIN,
                )
            },
            Appendage::BatWing => Action {
                value: 1,
                wings: 1,
                menace: -1,
                ..limb(
                    "Add a Bat Wing to your (Skeleton Type)",
                    costs::ACTION + costs::BAT_WING,
                )
            },
            Appendage::BlackStinger => Action {
                value: 50,
                menace: 2,
                ..tail(
                    "Apply a Jet Black Stinger to your (Skeleton Type)",
                    costs::ACTION + costs::BLACK_STINGER,
                )
            },
            Appendage::CrustaceanPincer => Action {
                arms: 1,
                menace: 1,
                ..limb(
                    "Apply a Crustacean Pincer to your (Skeleton Type)",
                    costs::ACTION + costs::CRUSTACEAN_PINCER,
                )
            },
            Appendage::DeerFemur => Action {
                value: 10,
                legs: 1,
                menace: -1,
                ..limb(
                    "Apply the Femur of a Surface Deer to your (Skeleton Type)",
                    costs::ACTION + costs::DEER_FEMUR,
                )
            },
            // Counter-church scales with torso style and is aggregated separately.
            Appendage::FiacreThigh => Action {
                value: 1250,
                legs: 1,
                ..limb(
                    "Affix Saint Fiacre's Thigh Relic to your (Skeleton Type)",
                    costs::ACTION + costs::FIACRE_THIGH,
                )
            },
            Appendage::FinBones => Action {
                value: 50,
                fins: 1,
                ..limb(
                    "Put Fins on your (Skeleton Type)",
                    costs::ACTION + costs::FIN_BONES,
                )
            },
            Appendage::FossilisedForelimb => Action {
                value: 2750,
                arms: 1,
                antiquity: 2,
                ..limb(
                    "Apply a Fossilised Forelimb to your (Skeleton Type)",
                    costs::ACTION + costs::FOSSILISED_FORELIMB,
                )
            },
            Appendage::HelicalThigh => Action {
                value: 300,
                legs: 1,
                amalgamy: 2,
                ..limb(
                    "Affix the Helical Thighbone to your (Skeleton Type)",
                    costs::ACTION + costs::HELICAL_THIGH,
                )
            },
            Appendage::HumanArm => Action {
                value: 250,
                arms: 1,
                menace: -1,
                ..limb(
                    "Join a Human Arm to your (Skeleton Type)",
                    costs::ACTION + costs::HUMAN_ARM,
                )
            },
            Appendage::IvoryFemur => Action {
                value: 6500,
                legs: 1,
                ..limb(
                    "Apply an Ivory Femur to your (Skeleton Type)",
                    costs::ACTION + costs::IVORY_FEMUR,
                )
            },
            Appendage::IvoryHumerus => Action {
                value: 1500,
                arms: 1,
                ..limb(
                    "Apply an Ivory Humerus to your (Skeleton Type)",
                    costs::ACTION + costs::IVORY_HUMERUS,
                )
            },
            Appendage::JurassicThigh => Action {
                value: 300,
                legs: 1,
                antiquity: 1,
                ..limb(
                    "Apply a Jurassic Thigh Bone to your (Skeleton Type)",
                    costs::ACTION + costs::JURASSIC_FEMUR,
                )
            },
            Appendage::KnottedHumerus => Action {
                value: 300,
                arms: 1,
                amalgamy: 1,
                ..limb(
                    "Apply a Knotted Humerus to your (Skeleton Type)",
                    costs::ACTION + costs::KNOTTED_HUMERUS,
                )
            },
            Appendage::ObsidianTail => Action {
                value: 500,
                amalgamy: 1,
                ..tail(
                    "Apply an Obsidian Chitin Tail to your (Skeleton Type)",
                    costs::ACTION + costs::OBSIDIAN_TAIL,
                )
            },
            Appendage::PlasterTailBones => Action {
                value: 250,
                implausibility: 1,
                ..tail(
                    "Apply Plaster Tail Bones to your (Skeleton Type)",
                    costs::ACTION + costs::PLASTER_TAIL_BONES,
                )
            },
            Appendage::TerrorBirdWing => Action {
                value: 250,
                wings: 1,
                antiquity: 1,
                menace: 1,
                ..limb(
                    "Add the Wing of a Young Terror Bird to your (Skeleton Type)",
                    costs::ACTION + costs::TERROR_BIRD_WING,
                )
            },
            Appendage::TombLionTail => Action {
                value: 250,
                antiquity: 1,
                ..tail(
                    "Apply a Tomb-Lion's Tail to your (Skeleton Type)",
                    costs::ACTION + costs::TOMB_LION_TAIL,
                )
            },
            Appendage::UnidentifiedThigh => Action {
                value: 100,
                legs: 1,
                ..limb(
                    "Apply an Unidentified Thigh Bone to your (Skeleton Type)",
                    costs::ACTION + costs::UNIDENTIFIED_THIGH,
                )
            },
            Appendage::WitheredTail => Action {
                value: 250,
                antiquity: -1,
                ..tail(
                    "Apply a Withered Tentacle as a tail on your (Skeleton Type)",
                    costs::ACTION + costs::WITHERED_TENTACLE,
                )
            },
            Appendage::WitheredTentacle => Action {
                value: 250,
                tentacles: 1,
                antiquity: -1,
                ..limb(
                    "Put a Withered Tentacle on your (Skeleton Type)",
                    costs::ACTION + costs::WITHERED_TENTACLE,
                )
            },
            Appendage::RemoveTail => Action {
                tails: -1,
                ..Action::new("Remove the tail from your (Skeleton Type)", costs::ACTION)
            },
            // Sets Skeleton: Tails Needed to 0; handled by the need-closure rules.
            Appendage::SkipTails => {
                Action::new("Decide your Tailless Animal needs no tail", costs::ACTION)
            }
        }
    }
}

impl fmt::Display for Appendage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limbs_fill_one_slot_and_add_one_part() {
        for appendage in Appendage::ALL {
            let action = appendage.action();
            if action.limbs_needed == -1 {
                let parts = action.arms + action.legs + action.wings + action.fins + action.tentacles;
                assert_eq!(parts, 1, "{appendage:?}");
            }
        }
    }

    #[test]
    fn test_add_joints_opens_four_limbs() {
        assert_eq!(Appendage::AddJoints.action().limbs_needed, 4);
    }
}
