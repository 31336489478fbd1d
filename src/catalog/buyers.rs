use std::fmt;

use super::action::Action;
use super::costs;

catalog_enum! {
    /// An action that converts a skeleton into revenue.
    Buyer {
        APalaeontologistWithHoardingPropensities,
        ANaiveCollector,
        AFamiliarBohemianSculptress,
        APedagogicallyInclinedGrandmother,
        ATheologianOfTheOldSchool,
        AnEnthusiastOfTheAncientWorld,
        MrsPlenty,
        ATentacledServant,
        AnInvestmentMindedAmbassador,
        ATellerOfTerrors,
        ATentacledEntrepreneur,
        AnAuthorOfGothicTales,
        AZailorWithParticularInterests,
        ARubberyCollector,
        AConstable,
        AnEnthusiastInSkulls,
        ADrearyMidnighter,
        AColourfulPhantasistBazaarine,
        AColourfulPhantasistNocturnal,
        AColourfulPhantasistCelestial,
        AnIngenuousMalacologist,
        AnEnterprisingBootSalesman,
        TheDumbwaiterOfBalmoral,
        TheCarpentersGranddaughter,
        TheTriflingDiplomatAmalgamy,
        TheTriflingDiplomatAntiquity,
        TheTriflingDiplomatMenace,
        TheTriflingDiplomatBird,
        TheTriflingDiplomatFish,
        TheTriflingDiplomatInsect,
        TheTriflingDiplomatReptile,
        TheTriflingDiplomatSkulls,
    }
}

impl Buyer {
    pub fn action(self) -> Action {
        let name = match self {
            Buyer::APalaeontologistWithHoardingPropensities => {
                "Sell a complete skeleton to the Bone Hoarder"
            }
            Buyer::ANaiveCollector => "Sell your Skeleton to a Naive Collector",
            Buyer::AFamiliarBohemianSculptress => "Sell your Skeleton to the Sculptress",
            Buyer::APedagogicallyInclinedGrandmother => {
                "Sell your skeleton to a Pedagogically Inclined Grandmother"
            }
            Buyer::ATheologianOfTheOldSchool => {
                "Sell your Skeleton to the Theologian of the Old School"
            }
            Buyer::AnEnthusiastOfTheAncientWorld => {
                "Sell your skeleton to an Enthusiast of the Ancient World"
            }
            Buyer::MrsPlenty => "Sell a complete skeleton to Mrs Plenty",
            Buyer::ATentacledServant => "Sell him your amalgamous skeleton",
            Buyer::AnInvestmentMindedAmbassador => "Sell your skeleton to the Ambassador",
            Buyer::ATellerOfTerrors => "Sell your skeleton to the Teller of Terrors",
            Buyer::ATentacledEntrepreneur => "Sell to the Tentacled Entrepreneur",
            Buyer::AnAuthorOfGothicTales => "Sell to an Author of Gothic Tales",
            Buyer::AZailorWithParticularInterests => "Sell your skeleton to a Zailor",
            Buyer::ARubberyCollector => "Sell to an Enthusiast of a Rubbery Menace",
            Buyer::AConstable => "Sell to a Constable",
            Buyer::AnEnthusiastInSkulls => "Sell to the Cranial Enthusiast",
            Buyer::ADrearyMidnighter => "Sell to the Dreary Midnighter",
            Buyer::AColourfulPhantasistBazaarine => {
                "Sell an amalgamous skeleton as a work of Bazaarine art"
            }
            Buyer::AColourfulPhantasistNocturnal => {
                "Sell a menacing skeleton as a work of Nocturnal art"
            }
            Buyer::AColourfulPhantasistCelestial => {
                "Sell an antique skeleton as a work of Celestial art"
            }
            Buyer::AnIngenuousMalacologist => "Sell him a tentacle-laden skeleton",
            Buyer::AnEnterprisingBootSalesman => "Sell to the Enterprising Boot Salesman",
            Buyer::TheDumbwaiterOfBalmoral => "Export the Skeleton of a Neathy Bird",
            Buyer::TheCarpentersGranddaughter => "Impress her with your own constructions",
            Buyer::TheTriflingDiplomatAmalgamy => "Sell the Diplomat an amalgamous skeleton",
            Buyer::TheTriflingDiplomatAntiquity => "Sell the Diplomat an antique skeleton",
            Buyer::TheTriflingDiplomatMenace => "Sell the Diplomat a menacing skeleton",
            Buyer::TheTriflingDiplomatBird => "Sell the Diplomat a fossil bird",
            Buyer::TheTriflingDiplomatFish => "Sell the Diplomat a fossil fish",
            Buyer::TheTriflingDiplomatInsect => "Sell the Diplomat a fossil insect",
            Buyer::TheTriflingDiplomatReptile => "Sell the Diplomat a fossil reptile",
            Buyer::TheTriflingDiplomatSkulls => "Sell the Diplomat a many-headed skeleton",
        };

        Action::new(name, costs::ACTION)
    }
}

impl fmt::Display for Buyer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().name)
    }
}
