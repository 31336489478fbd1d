//! World qualities that change which buyers are around and what they pay.

use std::fmt;

use super::buyers::Buyer;

catalog_enum! {
    /// Which skeleton attribute is currently boosted.
    Fluctuation {
        Antiquity,
        Amalgamy,
        Menace,
    }
}

impl fmt::Display for Fluctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

catalog_enum! {
    /// Which of several unusual buyers are available.
    OccasionalBuyer {
        AnEnthusiastInSkulls,
        ADrearyMidnighter,
        AColourfulPhantasist,
        AnIngenuousMalacologist,
        AnEnterprisingBootSalesman,
    }
}

impl OccasionalBuyer {
    /// The buyers this occasional visitor makes available.
    pub fn buyers(self) -> &'static [Buyer] {
        match self {
            OccasionalBuyer::AnEnthusiastInSkulls => &[Buyer::AnEnthusiastInSkulls],
            OccasionalBuyer::ADrearyMidnighter => &[Buyer::ADrearyMidnighter],
            OccasionalBuyer::AColourfulPhantasist => &[
                Buyer::AColourfulPhantasistBazaarine,
                Buyer::AColourfulPhantasistNocturnal,
                Buyer::AColourfulPhantasistCelestial,
            ],
            OccasionalBuyer::AnIngenuousMalacologist => &[Buyer::AnIngenuousMalacologist],
            OccasionalBuyer::AnEnterprisingBootSalesman => &[Buyer::AnEnterprisingBootSalesman],
        }
    }
}

impl fmt::Display for OccasionalBuyer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.buyers().iter().map(|b| b.action().name).collect();
        f.write_str(&names.join(" / "))
    }
}

catalog_enum! {
    /// The current fascination of the Trifling Diplomat.
    DiplomatFascination {
        Amalgamy,
        Antiquity,
        Menace,
        Bird,
        Fish,
        Insect,
        Reptile,
        Skulls,
    }
}

impl DiplomatFascination {
    pub fn buyer(self) -> Buyer {
        match self {
            DiplomatFascination::Amalgamy => Buyer::TheTriflingDiplomatAmalgamy,
            DiplomatFascination::Antiquity => Buyer::TheTriflingDiplomatAntiquity,
            DiplomatFascination::Menace => Buyer::TheTriflingDiplomatMenace,
            DiplomatFascination::Bird => Buyer::TheTriflingDiplomatBird,
            DiplomatFascination::Fish => Buyer::TheTriflingDiplomatFish,
            DiplomatFascination::Insect => Buyer::TheTriflingDiplomatInsect,
            DiplomatFascination::Reptile => Buyer::TheTriflingDiplomatReptile,
            DiplomatFascination::Skulls => Buyer::TheTriflingDiplomatSkulls,
        }
    }
}

impl fmt::Display for DiplomatFascination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.buyer(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fascination_has_a_distinct_buyer() {
        let mut buyers: Vec<Buyer> = DiplomatFascination::ALL.iter().map(|f| f.buyer()).collect();
        buyers.sort();
        buyers.dedup();
        assert_eq!(buyers.len(), DiplomatFascination::ALL.len());
    }

    #[test]
    fn test_phantasist_unlocks_three_buyers() {
        assert_eq!(OccasionalBuyer::AColourfulPhantasist.buyers().len(), 3);
    }

    #[test]
    fn test_fluctuation_parses() {
        assert_eq!("menace".parse::<Fluctuation>().unwrap(), Fluctuation::Menace);
    }
}
