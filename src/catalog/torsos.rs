use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action that initiates a skeleton.
    Torso {
        HeadlessHumanoid,
        VictimSkeleton,
        HumanRibcage,
        ThornedRibcage,
        SkeletonWithSevenNecks,
        FlourishingRibcage,
        MammothRibcage,
        RibcageWithABouquetOfEightSpines,
        LeviathanFrame,
        PrismaticFrame,
        FivePointedFrame,
    }
}

impl Torso {
    pub fn action(self) -> Action {
        match self {
            Torso::HeadlessHumanoid => Action {
                torso_style: Some(10),
                value: 250,
                skulls_needed: 1,
                arms: 2,
                legs: 2,
                ..Action::new(
                    "Reassemble your Headless Humanoid",
                    costs::ACTION + costs::HEADLESS_SKELETON,
                )
            },
            // Licentiate
            Torso::VictimSkeleton => Action {
                torso_style: Some(10),
                value: 250,
                skulls_needed: 1,
                arms: 2,
                legs: 2,
                ..Action::new("Supply a skeleton of your own", costs::ACTION)
            },
            Torso::HumanRibcage => Action {
                torso_style: Some(15),
                value: 1250,
                skulls_needed: 1,
                limbs_needed: 4,
                ..Action::new(
                    "Build on the Human Ribcage",
                    costs::ACTION + costs::HUMAN_RIBCAGE,
                )
            },
            Torso::ThornedRibcage => Action {
                torso_style: Some(20),
                value: 1250,
                skulls_needed: 1,
                limbs_needed: 4,
                tails_needed: 1,
                amalgamy: 1,
                menace: 1,
                ..Action::new(
                    "Make something of your Thorned Ribcage",
                    costs::ACTION + costs::THORNED_RIBCAGE,
                )
            },
            Torso::SkeletonWithSevenNecks => Action {
                torso_style: Some(30),
                value: 6250,
                skulls_needed: 7,
                limbs_needed: 2,
                legs: 2,
                amalgamy: 2,
                menace: 1,
                ..Action::new(
                    "Build on the Skeleton with Seven Necks",
                    costs::ACTION + costs::SKELETON_WITH_SEVEN_NECKS,
                )
            },
            Torso::FlourishingRibcage => Action {
                torso_style: Some(40),
                value: 1250,
                skulls_needed: 2,
                limbs_needed: 6,
                tails_needed: 1,
                amalgamy: 2,
                ..Action::new(
                    "Build on the Flourishing Ribcage",
                    costs::ACTION + costs::FLOURISHING_RIBCAGE,
                )
            },
            Torso::MammothRibcage => Action {
                torso_style: Some(50),
                value: 6250,
                skulls_needed: 1,
                limbs_needed: 4,
                tails_needed: 1,
                antiquity: 2,
                ..Action::new(
                    "Build on the Mammoth Ribcage",
                    costs::ACTION + costs::MAMMOTH_RIBCAGE,
                )
            },
            Torso::RibcageWithABouquetOfEightSpines => Action {
                torso_style: Some(60),
                value: 31250,
                skulls_needed: 8,
                limbs_needed: 4,
                tails_needed: 1,
                amalgamy: 1,
                menace: 2,
                ..Action::new(
                    "Build on the Ribcage with the Eight Spines",
                    costs::ACTION + costs::RIBCAGE_WITH_EIGHT_SPINES,
                )
            },
            Torso::LeviathanFrame => Action {
                torso_style: Some(70),
                value: 31250,
                skulls_needed: 1,
                limbs_needed: 2,
                tails: 1,
                antiquity: 1,
                menace: 1,
                ..Action::new(
                    "Build on the Leviathan Frame",
                    costs::ACTION + costs::LEVIATHAN_FRAME,
                )
            },
            Torso::PrismaticFrame => Action {
                torso_style: Some(80),
                value: 31250,
                skulls_needed: 3,
                limbs_needed: 3,
                tails_needed: 3,
                amalgamy: 2,
                antiquity: 2,
                ..Action::new(
                    "Build on the Prismatic Frame",
                    costs::ACTION + costs::PRISMATIC_FRAME,
                )
            },
            Torso::FivePointedFrame => Action {
                torso_style: Some(100),
                value: 31250,
                skulls_needed: 5,
                limbs_needed: 5,
                amalgamy: 2,
                menace: 1,
                ..Action::new(
                    "Build on the Five-Pointed Frame",
                    costs::ACTION + costs::FIVE_POINTED_RIBCAGE,
                )
            },
        }
    }

    /// Skeleton: Torso Style of this torso.
    pub fn style(self) -> i64 {
        self.action().torso_style.unwrap_or_default()
    }
}

impl fmt::Display for Torso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_torso_has_a_style() {
        for torso in Torso::ALL {
            assert!(torso.action().torso_style.is_some(), "{torso:?}");
        }
    }

    #[test]
    fn test_styles_are_distinct() {
        let mut styles: Vec<i64> = Torso::ALL.iter().map(|t| t.style()).collect();
        styles.sort();
        styles.dedup();
        // Both humanoid torsos share style 10.
        assert_eq!(styles.len(), Torso::ALL.len() - 1);
    }

    #[test]
    fn test_base_joints() {
        assert_eq!(Torso::VictimSkeleton.action().base_joints(), 4);
        assert_eq!(Torso::FlourishingRibcage.action().base_joints(), 6);
        assert_eq!(Torso::SkeletonWithSevenNecks.action().base_joints(), 4);
    }
}
