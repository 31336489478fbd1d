//! What makes a skeleton complete, and what it may be declared as.

use log::debug;

use crate::catalog::{Action, ActionKey, Appendage, Declaration};
use crate::conditions;
use crate::model::{BoneMarketModel, BoundedExpr, Compare, Item, VarId};
use crate::solver::attributes::Attributes;
use crate::solver::bindings::Bindings;

/// The antiquity a classification applies to.
#[derive(Debug, Clone, Copy)]
enum Antiquity {
    Any,
    AtMost(i64),
    Between(i64, i64),
    AtLeast(i64),
}

/// Skeleton-in-progress codes by declaration and antiquity.
const CLASSIFICATIONS: &[(Declaration, i64, Antiquity)] = &[
    (Declaration::Chimera, 100, Antiquity::Any),
    (Declaration::Humanoid, 110, Antiquity::AtMost(0)),
    (Declaration::Humanoid, 111, Antiquity::Between(1, 5)),
    (Declaration::Humanoid, 112, Antiquity::AtLeast(6)),
    (Declaration::Ape, 120, Antiquity::AtMost(1)),
    (Declaration::Ape, 121, Antiquity::AtLeast(2)),
    (Declaration::Monkey, 125, Antiquity::AtMost(0)),
    (Declaration::Monkey, 126, Antiquity::Between(1, 8)),
    (Declaration::Monkey, 128, Antiquity::AtLeast(9)),
    (Declaration::Reptile, 160, Antiquity::AtMost(1)),
    (Declaration::Reptile, 161, Antiquity::Between(2, 4)),
    (Declaration::Reptile, 162, Antiquity::AtLeast(5)),
    (Declaration::Amphibian, 170, Antiquity::AtMost(1)),
    (Declaration::Amphibian, 171, Antiquity::Between(2, 4)),
    (Declaration::Amphibian, 172, Antiquity::AtLeast(5)),
    (Declaration::Bird, 180, Antiquity::AtMost(1)),
    (Declaration::Bird, 181, Antiquity::Between(2, 4)),
    (Declaration::Bird, 182, Antiquity::AtLeast(5)),
    (Declaration::Fish, 190, Antiquity::AtMost(0)),
    (Declaration::Fish, 191, Antiquity::AtLeast(1)),
    (Declaration::Spider, 200, Antiquity::AtMost(1)),
    (Declaration::Spider, 201, Antiquity::Between(2, 7)),
    (Declaration::Spider, 203, Antiquity::AtLeast(8)),
    (Declaration::Insect, 210, Antiquity::AtMost(1)),
    (Declaration::Insect, 211, Antiquity::Between(2, 6)),
    (Declaration::Insect, 212, Antiquity::AtLeast(7)),
    (Declaration::Curator, 300, Antiquity::Any),
];

/// Require every opened slot to be filled and the declaration to fit the
/// skeleton. Returns the skeleton-in-progress code.
pub fn require_structure(
    model: &mut BoneMarketModel,
    bindings: &Bindings,
    attributes: &Attributes,
) -> VarId {
    close_needs(model, bindings);
    for declaration in Declaration::ALL {
        let declared = bindings.literal(ActionKey::Declaration(*declaration));
        model.add_if(declared, requirements(*declaration, attributes));
    }
    let code = skeleton_in_progress(model, bindings, attributes);

    debug!(
        "structure added: {} variables, {} constraints",
        model.num_variables(),
        model.num_constraints()
    );
    code
}

fn close_needs(model: &mut BoneMarketModel, bindings: &Bindings) {
    model.add(bindings.weighted(|a| a.skulls_needed).equals(0));
    model.add(bindings.weighted(|a| a.limbs_needed).equals(0));

    // Skipping tails is only allowed while some are still needed.
    let tails_needed = bindings.weighted(|a: &Action| a.tails_needed);
    let skipped = bindings.literal(ActionKey::Appendage(Appendage::SkipTails));
    model.add_if(!skipped, conditions![tails_needed.clone().equals(0)]);
    model.add_if(skipped, conditions![tails_needed.greater_than(0)]);
}

fn none(parts: &[VarId]) -> Vec<BoundedExpr> {
    parts.iter().map(|part| part.equals(0)).collect()
}

fn exactly(count: i64, parts: &[VarId]) -> Vec<BoundedExpr> {
    parts.iter().map(|part| part.equals(count)).collect()
}

fn requirements(declaration: Declaration, a: &Attributes) -> Vec<Item> {
    match declaration {
        Declaration::Humanoid => conditions![
            none(&[a.tails, a.fins, a.wings]),
            a.skulls.equals(1),
            exactly(2, &[a.legs, a.arms]),
            a.torso_style.within(10, 20),
        ],
        Declaration::Ape => conditions![
            none(&[a.legs, a.tails, a.fins, a.wings]),
            a.skulls.equals(1),
            a.arms.equals(4),
            a.torso_style.within(10, 20),
        ],
        Declaration::Monkey => conditions![
            none(&[a.legs, a.fins, a.wings]),
            exactly(1, &[a.skulls, a.tails]),
            a.arms.equals(4),
            a.torso_style.within(10, 20),
        ],
        Declaration::Bird => conditions![
            none(&[a.arms, a.fins]),
            a.tails.less_than(2),
            exactly(2, &[a.legs, a.wings]),
            a.torso_style.at_least(20),
        ],
        Declaration::Curator => conditions![
            none(&[a.fins, a.tails]),
            a.skulls.equals(1),
            exactly(2, &[a.arms, a.legs, a.wings]),
        ],
        Declaration::Reptile => conditions![
            none(&[a.fins, a.wings, a.arms]),
            exactly(1, &[a.tails, a.skulls]),
            a.legs.less_than(5),
            a.torso_style.at_least(20),
        ],
        Declaration::Amphibian => conditions![
            none(&[a.tails, a.fins, a.wings, a.arms]),
            a.skulls.equals(1),
            a.legs.equals(4),
            a.torso_style.at_least(20),
        ],
        Declaration::Fish => conditions![
            none(&[a.arms, a.legs, a.wings]),
            a.tails.at_most(1),
            a.skulls.equals(1),
            a.fins.at_least(2),
            a.torso_style.at_least(20),
        ],
        Declaration::Insect => conditions![
            none(&[a.arms, a.fins, a.tails]),
            a.skulls.equals(1),
            a.wings.less_than(5),
            a.legs.equals(6),
            a.torso_style.at_least(20),
        ],
        Declaration::Spider => conditions![
            none(&[a.skulls, a.arms, a.wings, a.fins]),
            a.tails.at_most(1),
            a.legs.equals(8),
            a.torso_style.at_least(20),
        ],
        Declaration::Chimera => Vec::new(),
    }
}

fn skeleton_in_progress(
    model: &mut BoneMarketModel,
    bindings: &Bindings,
    attributes: &Attributes,
) -> VarId {
    let code = model.new_int_var("skeleton in progress", 100, 300);
    let antiquity = attributes.antiquity;

    for (declaration, value, band) in CLASSIFICATIONS {
        let mut when = vec![bindings.literal(ActionKey::Declaration(*declaration))];
        let bucket = match *band {
            Antiquity::Any => None,
            Antiquity::AtMost(max) => Some(antiquity.at_most(max)),
            Antiquity::Between(min, max) => Some(antiquity.within(min, max)),
            Antiquity::AtLeast(min) => Some(antiquity.at_least(min)),
        };
        if let Some(bucket) = bucket {
            when.push(model.bool_expression(bucket));
        }
        model.add_enforced(code.equals(*value), &when);
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Buyer, Skull, Torso};
    use crate::model::{LinearExpr, Outcome};
    use crate::solver::attributes::aggregate;
    use crate::solver::params::SolveParameters;

    fn build(allowed: &[ActionKey]) -> (BoneMarketModel, Bindings, Attributes, VarId) {
        let mut keys = allowed.to_vec();
        keys.push(ActionKey::Buyer(Buyer::ANaiveCollector));
        let params = SolveParameters::default().restricted_to(&keys);

        let mut model = BoneMarketModel::new();
        let bindings = Bindings::bind(&mut model, &params, None);
        let attributes = aggregate(&mut model, &bindings, &params);
        let code = require_structure(&mut model, &bindings, &attributes);
        (model, bindings, attributes, code)
    }

    #[test]
    fn test_victim_skeleton_is_a_humanoid() {
        let (model, bindings, attributes, code) = build(&[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Skull(Skull::VictimSkull),
            ActionKey::Declaration(Declaration::Humanoid),
        ]);

        match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(assignment)) => {
                assert_eq!(assignment.value(bindings.var(ActionKey::Skull(Skull::VictimSkull))), 1);
                assert_eq!(assignment.value(attributes.skulls), 1);
                assert_eq!(assignment.value(code), 110);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test]
    fn test_open_skull_slot_is_infeasible() {
        let (model, ..) = build(&[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Declaration(Declaration::Humanoid),
        ]);
        assert_eq!(model.maximise(&LinearExpr::default()).ok(), Some(Outcome::Infeasible));
    }

    #[test]
    fn test_declaration_must_fit_parts() {
        let (model, ..) = build(&[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Skull(Skull::VictimSkull),
            ActionKey::Declaration(Declaration::Bird),
        ]);
        assert_eq!(model.maximise(&LinearExpr::default()).ok(), Some(Outcome::Infeasible));
    }

    #[test]
    fn test_chimera_accepts_anything() {
        let (model, _, _, code) = build(&[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Skull(Skull::VictimSkull),
            ActionKey::Declaration(Declaration::Chimera),
        ]);
        match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(assignment)) => assert_eq!(assignment.value(code), 100),
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    /// Part counts and torso style, free of any catalog action.
    #[derive(Debug, Clone, Copy, Default)]
    struct Shape {
        skulls: i64,
        arms: i64,
        legs: i64,
        tails: i64,
        wings: i64,
        fins: i64,
        style: i64,
    }

    /// Whether `declaration` accepts a skeleton of exactly this shape.
    fn accepts(declaration: Declaration, shape: Shape) -> bool {
        let mut model = BoneMarketModel::new();
        let mut fixed = |value: i64| model.new_int_var("attribute", value, value);
        let attributes = Attributes {
            value: fixed(0),
            zoological_mania_bonus: fixed(0),
            total_value: fixed(0),
            torso_style: fixed(shape.style),
            skulls: fixed(shape.skulls),
            arms: fixed(shape.arms),
            legs: fixed(shape.legs),
            tails: fixed(shape.tails),
            wings: fixed(shape.wings),
            fins: fixed(shape.fins),
            tentacles: fixed(0),
            amalgamy: fixed(0),
            antiquity: fixed(0),
            menace: fixed(0),
            implausibility: fixed(0),
            counter_church: fixed(0),
            exhaustion: fixed(0),
            added_exhaustion: fixed(0),
            primary_revenue: fixed(0),
            secondary_revenue: fixed(0),
            total_revenue: fixed(0),
            difficulty_level: fixed(0),
            sale_cost: fixed(0),
            joints_cost: fixed(0),
            cost: fixed(0),
        };
        let declared = model.new_bool_var("declared");
        model.fix(declared, 1);
        model.add_if(declared.literal(), requirements(declaration, &attributes));

        match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(_)) => true,
            Ok(Outcome::Infeasible) => false,
            Err(e) => panic!("{declaration:?}: solve failed: {e}"),
        }
    }

    #[test]
    fn test_each_declaration_accepts_its_shape_and_rejects_a_near_miss() {
        let shape = Shape::default();
        // (declaration, a fitting shape, the same shape with one bound broken)
        let cases = [
            (
                Declaration::Humanoid,
                Shape { skulls: 1, arms: 2, legs: 2, style: 10, ..shape },
                Shape { skulls: 1, arms: 3, legs: 2, style: 10, ..shape },
            ),
            (
                Declaration::Ape,
                Shape { skulls: 1, arms: 4, style: 20, ..shape },
                Shape { skulls: 1, arms: 4, legs: 1, style: 20, ..shape },
            ),
            (
                Declaration::Monkey,
                Shape { skulls: 1, arms: 4, tails: 1, style: 15, ..shape },
                Shape { skulls: 1, arms: 4, tails: 1, style: 21, ..shape },
            ),
            (
                Declaration::Bird,
                Shape { skulls: 1, legs: 2, wings: 2, tails: 1, style: 20, ..shape },
                Shape { skulls: 1, legs: 2, wings: 2, tails: 2, style: 20, ..shape },
            ),
            (
                Declaration::Curator,
                Shape { skulls: 1, arms: 2, legs: 2, wings: 2, style: 10, ..shape },
                Shape { skulls: 1, arms: 2, legs: 2, wings: 2, fins: 1, style: 10, ..shape },
            ),
            (
                Declaration::Reptile,
                Shape { skulls: 1, legs: 4, tails: 1, style: 20, ..shape },
                Shape { skulls: 1, legs: 5, tails: 1, style: 20, ..shape },
            ),
            (
                Declaration::Amphibian,
                Shape { skulls: 1, legs: 4, style: 20, ..shape },
                Shape { skulls: 1, legs: 4, style: 19, ..shape },
            ),
            (
                Declaration::Fish,
                Shape { skulls: 1, fins: 2, tails: 1, style: 20, ..shape },
                Shape { skulls: 1, fins: 1, tails: 1, style: 20, ..shape },
            ),
            (
                Declaration::Insect,
                Shape { skulls: 1, legs: 6, wings: 4, style: 20, ..shape },
                Shape { skulls: 1, legs: 6, wings: 5, style: 20, ..shape },
            ),
            (
                Declaration::Spider,
                Shape { legs: 8, tails: 1, style: 20, ..shape },
                Shape { skulls: 1, legs: 8, tails: 1, style: 20, ..shape },
            ),
        ];

        for (declaration, fitting, near_miss) in cases {
            assert!(accepts(declaration, fitting), "{declaration:?} should accept {fitting:?}");
            assert!(
                !accepts(declaration, near_miss),
                "{declaration:?} should reject {near_miss:?}"
            );
        }

        let covered: Vec<Declaration> = cases.iter().map(|(d, ..)| *d).collect();
        for declaration in Declaration::ALL {
            assert!(
                *declaration == Declaration::Chimera || covered.contains(declaration),
                "{declaration:?} has no case"
            );
        }
    }

    #[test]
    fn test_chimera_has_no_shape_requirements() {
        let odd = Shape {
            skulls: 7,
            arms: 3,
            legs: 5,
            tails: 2,
            wings: 1,
            fins: 4,
            style: 0,
        };
        assert!(accepts(Declaration::Chimera, odd));
    }

    #[test]
    fn test_every_declaration_is_classified() {
        for declaration in Declaration::ALL {
            assert!(
                CLASSIFICATIONS.iter().any(|(d, ..)| d == declaration),
                "{declaration:?}"
            );
        }
    }
}
