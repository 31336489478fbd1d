//! The number of pennies needed to produce each quality.
//!
//! Costs are expressed in terms of [`ACTION`], the pennies a generic grind
//! earns per action. Fractional values are kept until an action is bound into
//! the model, where they truncate to whole pennies.

/// Baseline EPA: pennies generated by one action of a generic grind.
pub const ACTION: f64 = 400.0;

pub const ANTIQUE_MYSTERY: f64 = 1250.0;

/// Various opportunity cards.
pub const BOHEMIAN_FAVOURS: f64 = ACTION;

pub const BONE_FRAGMENT: f64 = 1.0;

pub const CARTOGRAPHERS_HOARD: f64 = 31250.0;

/// Various opportunity cards.
pub const CHURCH_FAVOURS: f64 = ACTION;

/// Station VIII Lab.
pub const COLLECTION_NOTE: f64 = ACTION;

/// Spear-fishing at the bottom of the Evenlode, 7 at a time, difficult check,
/// available a fourth of the time.
pub const DEEP_ZEE_CATCH: f64 = 4.0 * (ACTION / 7.0);

/// Ealing Gardens Butcher, 2 at a time.
pub const CRUSTACEAN_PINCER: f64 = (ACTION + DEEP_ZEE_CATCH) / 2.0;

/// Dumbwaiter of Balmoral, 25 at a time.
pub const DEER_FEMUR: f64 = ACTION / 25.0;

/// Various opportunity cards.
pub const DOCK_FAVOURS: f64 = ACTION;

pub const EXTRAORDINARY_IMPLICATION: f64 = 250.0;

/// No consistent source.
pub const EYELESS_SKULL: f64 = UNOBTAINABLE;

/// Jericho Locks statue, 2 at a time.
pub const FIACRE_THIGH: f64 = (ACTION + 4.0 * CHURCH_FAVOURS) / 2.0;

/// Hunt and dissect a Pinewood Shark, 40 at a time.
pub const FIN_BONES: f64 = (11.0 * ACTION) / 40.0;

/// Helicon House.
pub const AMBER_FIN: f64 = ACTION + 10.0 * FIN_BONES;

/// Upwards.
pub const FIVE_POINTED_RIBCAGE: f64 = 9.0 * ACTION + CARTOGRAPHERS_HOARD;

/// Jericho Parade, 2 at a time.
pub const GUILD_ESTEEM: f64 = (ACTION + 5.0 * DOCK_FAVOURS) / 2.0;

/// Persephone, 1-2 at a time.
pub const CORAL_SKULL: f64 = 1.5 * (2.0 * ACTION + 3.0 * GUILD_ESTEEM);

/// Accumulated while acquiring other qualities.
pub const HEADLESS_SKELETON: f64 = 0.0;

/// Various opportunity cards.
pub const HELL_FAVOURS: f64 = ACTION;

/// Khan's Heart, 10 at a time.
pub const INFILTRATING: f64 = ACTION / 10.0;

/// Khan's Heart, tap a telegraph cable, 50 at a time.
pub const INTERCEPTED_CABLEGRAM: f64 = (2.0 * ACTION + 130.0 * INFILTRATING) / 50.0;

/// Hurlers statue, 10 at a time.
pub const COLLATED_RESEARCH: f64 = (ACTION + 4.0 * HELL_FAVOURS) / 10.0;

pub const HINTERLAND_SCRIP: f64 = 50.0;

/// Anning and Daughters.
pub const FOSSILISED_FORELIMB: f64 = 55.0 * HINTERLAND_SCRIP;

/// Handsome Townhouse, 3cp at a time.
pub const HEDONIST_CP: f64 = ACTION / 3.0;

/// Accumulated while acquiring other qualities.
pub const HUMAN_ARM: f64 = 0.0;

pub const INCISIVE_OBSERVATION: f64 = 50.0;

pub const INCORRUPTIBLE_BISCUITS: f64 = 250.0;

pub const INKLING_OF_IDENTITY: f64 = 10.0;

/// Feast of the Exceptional Rose, sent by one player and accepted by another.
pub const ENGRAVED_SKULL: f64 = 2.0 * ACTION + 200.0 * INKLING_OF_IDENTITY;

/// Ealing Gardens statue, 2 at a time.
pub const IVORY_HUMERUS: f64 = (ACTION + 4.0 * BOHEMIAN_FAVOURS) / 2.0;

pub const JADE_FRAGMENT: f64 = 1.0;

/// Brawling for yourself, large Bone Market crate, 12 at a time.
pub const JURASSIC_FEMUR: f64 = (10.0 * ACTION) / 12.0;

/// Accumulated while acquiring other qualities.
pub const KNOTTED_HUMERUS: f64 = 0.0;

pub const NEVERCOLD_BRASS: f64 = 1.0;

/// No consistent source.
pub const OBSIDIAN_TAIL: f64 = UNOBTAINABLE;

/// Parabolan Base-camp, electricity and hedonism, 2 at a time.
pub const ORANGE_APPLE: f64 = (2.0 * ACTION + 100.0 * BONE_FRAGMENT + 21.0 * HEDONIST_CP) / 2.0;

/// Bohemian Sculptress.
pub const IVORY_FEMUR: f64 = ACTION + 750.0 * BONE_FRAGMENT + 3.0 * ORANGE_APPLE;

pub const PENNY: f64 = 1.0;

/// Merrigans Exchange.
pub const BRASS_SKULL: f64 = 6250.0 * PENNY;

/// Upwards.
pub const PENTAGRAMMIC_SKULL: f64 = 9.0 * ACTION;

pub const PEPPERCAPS: f64 = HINTERLAND_SCRIP;

/// Waswood.
pub const REVISIONIST_NARRATIVE: f64 =
    ACTION + 4.0 * EXTRAORDINARY_IMPLICATION + INCISIVE_OBSERVATION;

pub const SCINTILLACK: f64 = 250.0;

/// Khan's Heart, disgruntled academic.
pub const SEARING_ENIGMA: f64 = 2.0 * ACTION + 130.0 * INFILTRATING + 2.0 * INTERCEPTED_CABLEGRAM;

pub const STYGIAN_IVORY: f64 = 250.0;

pub const SURFACE_BLOOMS: f64 = 250.0;

/// Laboratory Manufacturing.
pub const SCINTILLACK_SNUFF: f64 = (ACTION + 8.0 * SCINTILLACK + SURFACE_BLOOMS) / 2.0;

/// Pinnock.
pub const ELATION_AT_FELINE_ORATION: f64 =
    ACTION + 2.0 * ANTIQUE_MYSTERY + COLLECTION_NOTE + 2.0 * SCINTILLACK_SNUFF;

/// Station VIII Lab.
pub const OIL_OF_COMPANIONSHIP: f64 = ACTION + ELATION_AT_FELINE_ORATION;

/// Laboratory Research.
pub const SURVEY: f64 = 6.0 * ACTION / 25.0;

/// Carpenter's Granddaughter, 2 at a time.
pub const PLASTER_TAIL_BONES: f64 = (ACTION + 10.0 * SURVEY) / 2.0;

/// Ealing Gardens.
pub const HUMAN_RIBCAGE: f64 = ACTION + 15.0 * SURVEY;

/// Plain of Thirsty Grasses.
pub const PALAEONTOLOGICAL_DISCOVERY: f64 = (ACTION + 140.0 * SURVEY) / 6.0;

/// Results of Excavation, 6 at a time.
pub const HELICAL_THIGH: f64 = (2.0 * PALAEONTOLOGICAL_DISCOVERY) / 6.0;

/// Results of Excavation.
pub const LEVIATHAN_FRAME: f64 = 25.0 * PALAEONTOLOGICAL_DISCOVERY;

/// Iron-Toothed Terror Bird.
pub const THORNED_RIBCAGE: f64 = 6.0 * ACTION;

/// Helicon House.
pub const FLOURISHING_RIBCAGE: f64 = ACTION + HUMAN_RIBCAGE + THORNED_RIBCAGE;

/// Compel Ghillie, 7 at a time.
pub const TIME_REMAINING_IN_THE_WOODS: f64 = (ACTION + 4.0 * COLLATED_RESEARCH) / 7.0;

/// Balmoral Woods, with Time Remaining rounded up to a multiple of 7.
pub const DEER_OBSERVATION: f64 = 13.0 * ACTION + 14.0 * TIME_REMAINING_IN_THE_WOODS;

/// Keeper of the Marigold Menagerie.
pub const MAMMOTH_RIBCAGE: f64 = ACTION + DEER_OBSERVATION;

/// Balmoral Woods, with Time Remaining rounded up to a multiple of 7.
pub const FOX_OBSERVATION: f64 = 10.0 * ACTION + 14.0 * TIME_REMAINING_IN_THE_WOODS;

/// Keeper of the Marigold Menagerie.
pub const DOUBLED_SKULL: f64 = ACTION + FOX_OBSERVATION;

/// Balmoral Woods, with Time Remaining rounded up to a multiple of 7.
pub const GROUSE_OBSERVATION: f64 = 9.0 * ACTION + 14.0 * TIME_REMAINING_IN_THE_WOODS;

/// Keeper of the Marigold Menagerie.
pub const SKELETON_WITH_SEVEN_NECKS: f64 = ACTION + GROUSE_OBSERVATION;

/// Flute Street, including travel due to the quality cap.
pub const RUBBERY_SKULL: f64 = 25.0 * ACTION;

pub const RUMOUR_OF_THE_UPPER_RIVER: f64 = 250.0;

/// Hunting with Sophia's, 5 at a time.
pub const BLACK_STINGER: f64 = (ACTION + 5.0 * RUMOUR_OF_THE_UPPER_RIVER) / 5.0;

/// Expedition at Station VIII.
pub const PRISMATIC_FRAME: f64 = ACTION + OIL_OF_COMPANIONSHIP + 98.0 * RUMOUR_OF_THE_UPPER_RIVER;

/// Accumulated while acquiring other qualities.
pub const UNIDENTIFIED_THIGH: f64 = 0.0;

pub const WARM_AMBER: f64 = 10.0;

/// Ealing Gardens Butcher, 2 at a time.
pub const ALBATROSS_WING: f64 = (ACTION + 2000.0 * BONE_FRAGMENT + 25.0 * WARM_AMBER) / 2.0;

/// Ealing Gardens Butcher, 2 at a time.
pub const BAT_WING: f64 = (ACTION + 100.0 * BONE_FRAGMENT + 2.0 * WARM_AMBER) / 2.0;

/// Ealing Gardens Butcher.
pub const HORNED_SKULL: f64 = ACTION + 1000.0 * BONE_FRAGMENT + 5.0 * WARM_AMBER;

/// Ealing Gardens Butcher.
pub const PLATED_SKULL: f64 =
    ACTION + 1750.0 * BONE_FRAGMENT + INCORRUPTIBLE_BISCUITS + 25.0 * WARM_AMBER;

/// Ealing Gardens Butcher.
pub const SABRE_TOOTHED_SKULL: f64 = ACTION + 4900.0 * BONE_FRAGMENT + 125.0 * WARM_AMBER;

/// Ealing Gardens Butcher, 2 at a time.
pub const TERROR_BIRD_WING: f64 = (ACTION + 100.0 * BONE_FRAGMENT + 25.0 * WARM_AMBER) / 2.0;

/// Ealing Gardens Butcher.
pub const TOMB_LION_TAIL: f64 = ACTION + 200.0 * BONE_FRAGMENT + 2.0 * WARM_AMBER;

/// Slime and Amber: the Rubbery Men, minus one action for the Favour.
pub const TREMBLING_AMBER: f64 = 100.0 * WARM_AMBER;

/// Helicon House.
pub const RIBCAGE_WITH_EIGHT_SPINES: f64 = ACTION
    + 3.0 * SEARING_ENIGMA
    + SKELETON_WITH_SEVEN_NECKS
    + THORNED_RIBCAGE
    + 3.0 * TREMBLING_AMBER;

/// Adulterine Castle, miscounting the Second Circle by 4, 4 at a time.
pub const WITHERED_TENTACLE: f64 = ACTION / 4.0;

/// Cost given to qualities with no consistent source, large enough that the
/// solver only uses them when nothing else fits.
pub const UNOBTAINABLE: f64 = i32::MAX as f64 / 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_costs() {
        assert_eq!(DEER_FEMUR, 16.0);
        assert_eq!(HORNED_SKULL, 1450.0);
        assert_eq!(TREMBLING_AMBER, 1000.0);
        assert_eq!(FIACRE_THIGH, 1000.0);
        assert_eq!(REVISIONIST_NARRATIVE, 1450.0);
    }

    #[test]
    fn test_unobtainable_truncates_to_int32_half() {
        assert_eq!(UNOBTAINABLE as i64, 1_073_741_823);
    }
}
