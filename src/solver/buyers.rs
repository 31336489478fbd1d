//! What each buyer pays for a skeleton, and what the sale takes out of the market.
//!
//! Every buyer sets four shared variables: primary revenue, secondary revenue,
//! the difficulty level of the sale and any exhaustion it adds. Each buyer's
//! rules are one switched group, so a buyer that is not chosen leaves no trace.

use log::debug;

use crate::catalog::{ActionKey, Buyer, Fluctuation};
use crate::conditions;
use crate::model::{
    BoneMarketModel, BoundedExpr, Compare, ConstraintId, Item, LinearExpr, VarId, deferred,
};
use crate::solver::attributes::Attributes;
use crate::solver::bindings::Bindings;
use crate::solver::constants::{
    COLLECTOR_DIFFICULTY, CONNOISSEUR_DIFFICULTY, DISCERNING_DIFFICULTY, DUMBWAITER_DIFFICULTY,
    EXACTING_DIFFICULTY, FLAT_DIFFICULTY, MAXIMUM_ATTRIBUTE, MODEST_DIFFICULTY,
    SPECIALIST_DIFFICULTY,
};

/// Add the rules of every buyer, each switched on by that buyer's action.
pub fn add_buyers(
    model: &mut BoneMarketModel,
    bindings: &Bindings,
    attributes: &Attributes,
    skeleton_in_progress: VarId,
    fluctuation: Option<Fluctuation>,
) {
    for buyer in Buyer::ALL {
        let sold = bindings.literal(ActionKey::Buyer(*buyer));
        let rules = rules(*buyer, *attributes, skeleton_in_progress, fluctuation);
        model.add_if(sold, rules);
    }

    debug!(
        "buyers added: {} variables, {} constraints",
        model.num_variables(),
        model.num_constraints()
    );
}

/// `target == (num // step)·step`.
fn rounded_down(target: LinearExpr, num: VarId, step: i64) -> Item {
    deferred(move |m: &mut BoneMarketModel| {
        m.add_division_multiplication_equality(target, num, step, None)
    })
}

/// `added exhaustion == num // divisor`.
fn exhausts(a: Attributes, num: VarId, divisor: i64) -> Item {
    deferred(move |m: &mut BoneMarketModel| {
        m.add_division_equality(a.added_exhaustion, num, divisor)
    })
}

/// Half the attribute the current fluctuation favours, or nothing.
fn fluctuation_bonus(
    m: &mut BoneMarketModel,
    fluctuation: Option<Fluctuation>,
    favoured: &[(Fluctuation, VarId)],
    links: &mut Vec<ConstraintId>,
) -> LinearExpr {
    match favoured.iter().find(|(f, _)| Some(*f) == fluctuation) {
        Some((f, attribute)) => {
            let (half, l) = m.new_quotient(*attribute, 2, format!("{f} fluctuation bonus"));
            links.extend(l);
            half.into()
        }
        None => LinearExpr::default(),
    }
}

/// `x² · 4`, or `round(x^2.1) · 4` while the market favours it.
fn boosted_square(
    m: &mut BoneMarketModel,
    x: VarId,
    boosted: bool,
    name: &str,
    links: &mut Vec<ConstraintId>,
) -> VarId {
    let (result, l) = if boosted {
        let (power, mut l) = m.new_power(x, 1, 2.1, MAXIMUM_ATTRIBUTE, format!("boosted {name}"));
        let (scaled, l2) = m.new_product(
            vec![power.into(), LinearExpr::constant(4)],
            format!("boosted {name} times four"),
        );
        l.extend(l2);
        (scaled, l)
    } else {
        m.new_product(
            vec![x.into(), x.into(), LinearExpr::constant(4)],
            format!("{name} squared times four"),
        )
    };
    links.extend(l);
    result
}

/// `total value` rounded down to `step`, as a fresh expression.
fn round_total_value(
    m: &mut BoneMarketModel,
    a: &Attributes,
    step: i64,
    links: &mut Vec<ConstraintId>,
) -> LinearExpr {
    let (remainder, l) = m.new_remainder(a.total_value, step, format!("total value modulo {step}"));
    links.extend(l);
    a.total_value - remainder
}

/// The product of two attributes, and the exhaustion and bonus that come with it.
fn paired_attributes(
    a: Attributes,
    first: VarId,
    second: VarId,
    favoured: [(Fluctuation, VarId); 2],
    fluctuation: Option<Fluctuation>,
    step: i64,
) -> Item {
    deferred(move |m: &mut BoneMarketModel| {
        let mut links = Vec::new();
        let (product, l) = m.new_product(vec![first.into(), second.into()], "paired attributes");
        links.extend(l);
        let bonus = fluctuation_bonus(m, fluctuation, &favoured, &mut links);
        let rounded = round_total_value(m, &a, step, &mut links);
        let (exhaustion, l) = m.new_quotient(product, 20, "paired attributes exhaustion");
        links.extend(l);

        conditions![
            links,
            a.primary_revenue.equals(rounded + 250),
            a.secondary_revenue.equals(250 * product + 250 * bonus),
            a.added_exhaustion.equals(exhaustion),
        ]
    })
}

fn rules(
    buyer: Buyer,
    a: Attributes,
    skeleton_in_progress: VarId,
    fluctuation: Option<Fluctuation>,
) -> Vec<Item> {
    let complete = skeleton_in_progress.at_least(100);
    let difficulty = |multiplier: i64| a.difficulty_level.equals(multiplier * a.implausibility);
    let no_exhaustion = a.added_exhaustion.equals(0);
    let tv = a.total_value;

    match buyer {
        Buyer::APalaeontologistWithHoardingPropensities => conditions![
            complete,
            a.primary_revenue.equals(tv + 5),
            a.secondary_revenue.equals(500),
            difficulty(MODEST_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::ANaiveCollector => conditions![
            complete,
            rounded_down(a.primary_revenue.into(), tv, 250),
            a.secondary_revenue.equals(0),
            difficulty(FLAT_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::AFamiliarBohemianSculptress => conditions![
            complete,
            a.antiquity.equals(0),
            rounded_down(a.primary_revenue - 1000, tv, 250),
            a.secondary_revenue.equals(250 * a.counter_church),
            difficulty(DISCERNING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::APedagogicallyInclinedGrandmother => conditions![
            complete,
            a.menace.equals(0),
            rounded_down(a.primary_revenue - 1000, tv, 50),
            a.secondary_revenue.equals(0),
            difficulty(DISCERNING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::ATheologianOfTheOldSchool => conditions![
            complete,
            a.amalgamy.equals(0),
            rounded_down(a.primary_revenue - 1000, tv, 250),
            a.secondary_revenue.equals(0),
            difficulty(DISCERNING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::AnEnthusiastOfTheAncientWorld => {
            let boost = i64::from(fluctuation == Some(Fluctuation::Antiquity));
            conditions![
                complete,
                a.antiquity.greater_than(0),
                rounded_down(a.primary_revenue.into(), tv, 50),
                a.secondary_revenue.equals(250 * (a.antiquity + boost)),
                difficulty(COLLECTOR_DIFFICULTY),
                no_exhaustion,
            ]
        }

        Buyer::MrsPlenty => conditions![
            complete,
            a.menace.greater_than(0),
            rounded_down(a.primary_revenue.into(), tv, 50),
            a.secondary_revenue.equals(250 * a.menace),
            difficulty(COLLECTOR_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::ATentacledServant => {
            let boost = i64::from(fluctuation == Some(Fluctuation::Amalgamy));
            conditions![
                complete,
                a.amalgamy.greater_than(0),
                rounded_down(a.primary_revenue - 250, tv, 50),
                a.secondary_revenue.equals(250 * (a.amalgamy + boost)),
                difficulty(COLLECTOR_DIFFICULTY),
                no_exhaustion,
            ]
        }

        Buyer::AnInvestmentMindedAmbassador => conditions![
            complete,
            a.antiquity.greater_than(0),
            a.primary_revenue.equals(tv + 300),
            difficulty(CONNOISSEUR_DIFFICULTY),
            deferred(move |m: &mut BoneMarketModel| {
                let mut links = Vec::new();
                let (squared, l) = m.new_product(
                    vec![a.antiquity.into(), a.antiquity.into(), LinearExpr::constant(4)],
                    "antiquity squared times four",
                );
                links.extend(l);
                let (four_fifths, l) = m.new_quotient(squared, 5, "antiquity squared times four-fifths");
                links.extend(l);

                let tailfeathers = if fluctuation == Some(Fluctuation::Antiquity) {
                    let boosted = boosted_square(m, a.antiquity, true, "antiquity", &mut links);
                    let (boosted_fifths, l) = m.new_quotient(boosted, 5, "tailfeathers");
                    links.extend(l);
                    boosted_fifths
                } else {
                    four_fifths
                };

                let (exhaustion, l) = m.new_quotient(four_fifths, 20, "ambassador exhaustion");
                links.extend(l);

                conditions![
                    links,
                    a.secondary_revenue.equals(250 * tailfeathers),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::ATellerOfTerrors => conditions![
            complete,
            a.menace.greater_than(0),
            difficulty(CONNOISSEUR_DIFFICULTY),
            deferred(move |m: &mut BoneMarketModel| {
                let mut links = Vec::new();
                let boosted = fluctuation == Some(Fluctuation::Menace);
                let feathers = boosted_square(m, a.menace, boosted, "menace", &mut links);
                let (squared, l) = m.new_product(vec![a.menace.into(), a.menace.into()], "menace squared");
                links.extend(l);
                let (exhaustion, l) = m.new_quotient(squared, 25, "teller exhaustion");
                links.extend(l);
                let (remainder, l) = m.new_remainder(tv, 10, "total value modulo 10");
                links.extend(l);

                conditions![
                    links,
                    a.primary_revenue.equals(tv - remainder + 50),
                    a.secondary_revenue.equals(50 * feathers),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::ATentacledEntrepreneur => conditions![
            complete,
            a.amalgamy.greater_than(0),
            difficulty(CONNOISSEUR_DIFFICULTY),
            deferred(move |m: &mut BoneMarketModel| {
                let mut links = Vec::new();
                let boosted = fluctuation == Some(Fluctuation::Amalgamy);
                let breaths = boosted_square(m, a.amalgamy, boosted, "amalgamy", &mut links);
                let (squared, l) =
                    m.new_product(vec![a.amalgamy.into(), a.amalgamy.into()], "amalgamy squared");
                links.extend(l);
                let (exhaustion, l) = m.new_quotient(squared, 25, "entrepreneur exhaustion");
                links.extend(l);
                let rounded = round_total_value(m, &a, 50, &mut links);

                conditions![
                    links,
                    a.primary_revenue.equals(rounded + 250),
                    a.secondary_revenue.equals(50 * breaths),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::AnAuthorOfGothicTales => conditions![
            complete,
            a.antiquity.greater_than(0),
            a.menace.greater_than(0),
            difficulty(CONNOISSEUR_DIFFICULTY),
            paired_attributes(
                a,
                a.antiquity,
                a.menace,
                [(Fluctuation::Antiquity, a.antiquity), (Fluctuation::Menace, a.menace)],
                fluctuation,
                50,
            ),
        ],

        Buyer::AZailorWithParticularInterests => conditions![
            complete,
            a.antiquity.greater_than(0),
            a.amalgamy.greater_than(0),
            difficulty(CONNOISSEUR_DIFFICULTY),
            paired_attributes(
                a,
                a.amalgamy,
                a.antiquity,
                [(Fluctuation::Amalgamy, a.amalgamy), (Fluctuation::Antiquity, a.antiquity)],
                fluctuation,
                10,
            ),
        ],

        Buyer::ARubberyCollector => conditions![
            complete,
            a.amalgamy.greater_than(0),
            a.menace.greater_than(0),
            difficulty(CONNOISSEUR_DIFFICULTY),
            paired_attributes(
                a,
                a.amalgamy,
                a.menace,
                [(Fluctuation::Amalgamy, a.amalgamy), (Fluctuation::Menace, a.menace)],
                fluctuation,
                50,
            ),
        ],

        Buyer::AConstable => conditions![
            skeleton_in_progress.within(110, 119),
            rounded_down(a.primary_revenue - 1000, a.value, 50),
            a.secondary_revenue.equals(0),
            difficulty(DISCERNING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::AnEnthusiastInSkulls => conditions![
            complete,
            a.skulls.at_least(2),
            a.primary_revenue.equals(tv),
            difficulty(SPECIALIST_DIFFICULTY),
            deferred(move |m: &mut BoneMarketModel| {
                let (vital, mut links) =
                    m.new_power(a.skulls - 1, 1, 1.8, MAXIMUM_ATTRIBUTE, "vital intelligence");
                let (exhaustion, l) = m.new_quotient(vital, 4, "skulls exhaustion");
                links.extend(l);
                conditions![
                    links,
                    a.secondary_revenue.equals(1250 * vital),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::ADrearyMidnighter => conditions![
            skeleton_in_progress.within(110, 299),
            a.amalgamy.equals(0),
            a.counter_church.equals(0),
            rounded_down(a.primary_revenue - 300, tv, 3),
            a.secondary_revenue.equals(250),
            difficulty(EXACTING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::AColourfulPhantasistBazaarine => phantasist(a, a.amalgamy, complete),
        Buyer::AColourfulPhantasistNocturnal => phantasist(a, a.menace, complete),
        Buyer::AColourfulPhantasistCelestial => phantasist(a, a.antiquity, complete),

        Buyer::AnIngenuousMalacologist => conditions![
            complete,
            a.tentacles.at_least(4),
            difficulty(SPECIALIST_DIFFICULTY),
            deferred(move |m: &mut BoneMarketModel| {
                let (tentacles, mut links) =
                    m.new_power(a.tentacles, 1, 2.2, MAXIMUM_ATTRIBUTE, "exponentiated tentacles");
                let (research, l) = m.new_quotient(tentacles, 5, "collated research");
                links.extend(l);
                let (exhaustion, l) = m.new_quotient(tentacles, 100, "malacologist exhaustion");
                links.extend(l);
                let (remainder, l) = m.new_remainder(a.value, 250, "value modulo 250");
                links.extend(l);

                conditions![
                    links,
                    a.primary_revenue.equals(a.value - remainder + 250),
                    a.secondary_revenue.equals(250 * research),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::AnEnterprisingBootSalesman => conditions![
            complete,
            a.menace.equals(0),
            a.amalgamy.equals(0),
            a.legs.at_least(4),
            a.difficulty_level.equals(0),
            deferred(move |m: &mut BoneMarketModel| {
                let (diamonds, mut links) = m.new_power(a.legs, 1, 2.2, MAXIMUM_ATTRIBUTE, "diamonds");
                let (exhaustion, l) = m.new_quotient(diamonds, 100, "boot salesman exhaustion");
                links.extend(l);
                let rounded = round_total_value(m, &a, 50, &mut links);

                conditions![
                    links,
                    a.primary_revenue.equals(rounded),
                    a.secondary_revenue.equals(50 * diamonds),
                    a.added_exhaustion.equals(exhaustion),
                ]
            }),
        ],

        Buyer::TheDumbwaiterOfBalmoral => conditions![
            skeleton_in_progress.within(180, 189),
            a.value.at_least(250),
            rounded_down(a.primary_revenue.into(), a.value, 250),
            a.secondary_revenue.equals(0),
            a.difficulty_level.equals(DUMBWAITER_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::TheCarpentersGranddaughter => conditions![
            complete,
            tv.at_least(30000),
            a.primary_revenue.equals(31250),
            a.secondary_revenue.equals(0),
            difficulty(EXACTING_DIFFICULTY),
            no_exhaustion,
        ],

        Buyer::TheTriflingDiplomatAmalgamy => diplomat_attribute(a, a.amalgamy, complete),
        Buyer::TheTriflingDiplomatAntiquity => diplomat_attribute(a, a.antiquity, complete),
        Buyer::TheTriflingDiplomatMenace => diplomat_attribute(a, a.menace, complete),

        Buyer::TheTriflingDiplomatBird => {
            diplomat_fossil(a, conditions![skeleton_in_progress.within(180, 189)])
        }
        Buyer::TheTriflingDiplomatFish => {
            diplomat_fossil(a, conditions![skeleton_in_progress.within(190, 199)])
        }
        Buyer::TheTriflingDiplomatInsect => {
            diplomat_fossil(a, conditions![skeleton_in_progress.within(210, 219)])
        }
        Buyer::TheTriflingDiplomatReptile => {
            diplomat_fossil(a, conditions![skeleton_in_progress.within(160, 169)])
        }
        Buyer::TheTriflingDiplomatSkulls => {
            diplomat_fossil(a, conditions![complete, a.skulls.at_least(5)])
        }
    }
}

fn phantasist(a: Attributes, attribute: VarId, complete: BoundedExpr) -> Vec<Item> {
    conditions![
        complete,
        a.implausibility.at_least(2),
        attribute.at_least(4),
        rounded_down(a.primary_revenue - 100, a.total_value, 50),
        deferred(move |m: &mut BoneMarketModel| {
            m.add_multiplication_equality(
                a.secondary_revenue - 250,
                vec![
                    LinearExpr::constant(250),
                    attribute.into(),
                    a.implausibility.into(),
                ],
            )
        }),
        a.difficulty_level.equals(0),
        exhausts(a, a.secondary_revenue, 5000),
    ]
}

fn diplomat_attribute(
    a: Attributes,
    attribute: VarId,
    complete: BoundedExpr,
) -> Vec<Item> {
    conditions![
        complete,
        attribute.at_least(5),
        rounded_down(a.primary_revenue - 50, a.value, 50),
        deferred(move |m: &mut BoneMarketModel| {
            m.add_multiplication_equality(
                a.secondary_revenue,
                vec![LinearExpr::constant(50), attribute.into(), attribute.into()],
            )
        }),
        a.difficulty_level.equals(0),
        exhausts(a, a.secondary_revenue, 5000),
    ]
}

fn diplomat_fossil(a: Attributes, criteria: Vec<Item>) -> Vec<Item> {
    conditions![
        criteria,
        rounded_down(a.primary_revenue - 50, a.value, 50),
        deferred(move |m: &mut BoneMarketModel| {
            let (documents, links) = m.new_power(
                a.amalgamy + a.antiquity + a.menace,
                3,
                2.2,
                3 * MAXIMUM_ATTRIBUTE,
                "compromising documents",
            );
            conditions![links, a.secondary_revenue.equals(50 * documents)]
        }),
        a.difficulty_level.equals(0),
        exhausts(a, a.secondary_revenue, 5000),
    ]
}
