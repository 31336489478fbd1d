//! Skeleton attributes summed over every chosen action.

use log::debug;

use crate::catalog::{Action, ActionKey, Appendage, Category, Skull, costs};
use crate::conditions;
use crate::model::{BoneMarketModel, Compare, LinearExpr, VarId};
use crate::solver::bindings::Bindings;
use crate::solver::constants::{
    DIFFICULTY_SCALER, DUMBWAITER_DIFFICULTY, MAX_DIFFICULTY_MULTIPLIER, REVENUE_LIMIT,
};
use crate::solver::params::SolveParameters;

/// Derived skeleton attributes and the shared revenue and cost variables.
///
/// Buyer branches write `primary_revenue`, `secondary_revenue`,
/// `difficulty_level` and `added_exhaustion`; everything else is fixed by the
/// actions taken.
#[derive(Debug, Clone, Copy)]
pub struct Attributes {
    pub value: VarId,
    pub zoological_mania_bonus: VarId,
    pub total_value: VarId,
    pub torso_style: VarId,

    pub skulls: VarId,
    pub arms: VarId,
    pub legs: VarId,
    pub tails: VarId,
    pub wings: VarId,
    pub fins: VarId,
    pub tentacles: VarId,

    pub amalgamy: VarId,
    pub antiquity: VarId,
    pub menace: VarId,
    pub implausibility: VarId,
    pub counter_church: VarId,

    pub exhaustion: VarId,
    pub added_exhaustion: VarId,

    pub primary_revenue: VarId,
    pub secondary_revenue: VarId,
    pub total_revenue: VarId,

    pub difficulty_level: VarId,
    pub sale_cost: VarId,
    pub joints_cost: VarId,
    pub cost: VarId,
}

impl Attributes {
    pub fn net_profit(&self) -> LinearExpr {
        self.total_revenue - self.cost
    }
}

/// `max(expr, 0)` as a fresh variable.
fn at_least_zero(model: &mut BoneMarketModel, expr: LinearExpr, name: &str) -> VarId {
    let (_, hi) = model.expr_bounds(&expr);
    let var = model.new_int_var(name, 0, hi.max(0));
    model.add_max_equality(var, vec![expr, LinearExpr::constant(0)]);
    var
}

fn tally(
    model: &mut BoneMarketModel,
    bindings: &Bindings,
    name: &str,
    field: impl Fn(&Action) -> i64,
) -> VarId {
    model
        .new_intermediate(bindings.weighted(field), name, Some(0), None)
        .0
}

/// Amber spent on `count` repetitions of an action whose k-th use costs
/// `scale·(base + step·k)²`.
///
/// This is the closed form of `Σ_{k<count} scale·(base + step·k)²`:
///
/// ```text
/// scale·base²·count
///   + scale·step·base·(count² − count)
///   + scale·step²·(2·count³ − 3·count² + count) / 6
/// ```
///
/// The last numerator is `count·(count − 1)·(2·count − 1)`, so the division is exact.
pub fn partial_sum_cost(
    model: &mut BoneMarketModel,
    base: LinearExpr,
    count: VarId,
    scale: i64,
    step: i64,
    name: &str,
) -> VarId {
    let n = LinearExpr::from(count);

    let (base_squared_count, _) = model.new_product(
        vec![base.clone(), base.clone(), n.clone()],
        format!("{name}: base squared times count"),
    );
    let (base_count_squared, _) = model.new_product(
        vec![base.clone(), n.clone(), n.clone()],
        format!("{name}: base times count squared"),
    );
    let (base_count, _) = model.new_product(vec![base, n.clone()], format!("{name}: base times count"));
    let (count_squared, _) = model.new_product(vec![n.clone(), n.clone()], format!("{name}: count squared"));
    let (count_cubed, _) = model.new_product(
        vec![n.clone(), n.clone(), n.clone()],
        format!("{name}: count cubed"),
    );

    let (square_sum, _) = model.new_quotient(
        scale * step * step * (2 * count_cubed - 3 * count_squared + count),
        6,
        format!("{name}: sum of squared steps"),
    );

    model
        .new_intermediate(
            scale * base_squared_count
                + scale * step * (base_count_squared - base_count)
                + square_sum,
            name,
            Some(0),
            None,
        )
        .0
}

/// Build every derived attribute over the bound actions.
pub fn aggregate(
    model: &mut BoneMarketModel,
    bindings: &Bindings,
    params: &SolveParameters,
) -> Attributes {
    let vake = bindings.var(ActionKey::Skull(Skull::VakeSkull));
    let (vake_squared, _) = model.new_product(vec![vake.into(), vake.into()], "vake skulls squared");

    // ── Value ──────────────────────────────────────────────────────────────

    // Each further Vake skull is worth 500 less than the one before.
    let value = model
        .new_intermediate(
            bindings.weighted(|a| a.value) - 250 * vake_squared + 6750 * vake,
            "value",
            Some(0),
            None,
        )
        .0;

    let zoological_mania_bonus = match params.zoological_mania {
        Some(declaration) => {
            let (potential, _) = model.new_quotient(
                declaration.mania_multiplier() * value,
                100,
                "potential zoological mania bonus",
            );
            let (_, potential_hi) = model.bounds(potential);
            let bonus = model.new_int_var("zoological mania bonus", 0, potential_hi);
            let declared = bindings.literal(ActionKey::Declaration(declaration));
            model.add_if(declared, conditions![bonus.equals(potential)]);
            model.add_if(!declared, conditions![bonus.equals(0)]);
            bonus
        }
        None => model.new_int_var("zoological mania bonus", 0, 0),
    };

    let total_value = model
        .new_intermediate(value + zoological_mania_bonus, "total value", Some(0), None)
        .0;

    let torso_style = model
        .new_intermediate(
            bindings.weighted_in(Category::Torso, |a| a.torso_style.unwrap_or(0)),
            "torso style",
            None,
            None,
        )
        .0;

    // ── Parts ──────────────────────────────────────────────────────────────

    let skulls = tally(model, bindings, "skulls", |a| a.skulls);
    let arms = tally(model, bindings, "arms", |a| a.arms);
    let legs = tally(model, bindings, "legs", |a| a.legs);
    let tails = tally(model, bindings, "tails", |a| a.tails);
    let wings = tally(model, bindings, "wings", |a| a.wings);
    let fins = tally(model, bindings, "fins", |a| a.fins);
    let tentacles = tally(model, bindings, "tentacles", |a| a.tentacles);

    // ── Qualities ──────────────────────────────────────────────────────────

    let amalgamy = at_least_zero(model, bindings.weighted(|a| a.amalgamy), "amalgamy");
    let antiquity = at_least_zero(model, bindings.weighted(|a| a.antiquity), "antiquity");

    // The first Vake skull adds 2 menace and the second 1 more.
    let vake_menace = model.new_int_var("vake skull bonus menace", 0, 3);
    model.add_min_equality(vake_menace, vec![2 * vake, LinearExpr::constant(3)]);
    let menace = at_least_zero(model, bindings.weighted(|a| a.menace) + vake_menace, "menace");

    // n Vake skulls add (n² − 2n + n mod 2) / 4 implausibility.
    let (vake_parity, _) = model.new_remainder(vake, 2, "vake skulls parity");
    let (vake_implausibility, _) = model.new_quotient(
        vake_squared - 2 * vake + vake_parity,
        4,
        "vake skull implausibility",
    );
    let implausibility = model
        .new_intermediate(
            bindings.weighted(|a| a.implausibility) + vake_implausibility,
            "implausibility",
            None,
            None,
        )
        .0;

    // A Holy Relic of the Thigh of Saint Fiacre is worth more on a grander torso.
    let fiacre = bindings.var(ActionKey::Appendage(Appendage::FiacreThigh));
    let (style_tens, _) = model.new_quotient(torso_style, 10, "torso style divided by ten");
    let (relic_counter_church, _) = model.new_product(
        vec![fiacre.into(), style_tens.into()],
        "holy relic counter-church",
    );
    let counter_church = model
        .new_intermediate(
            bindings.weighted(|a| a.counter_church) + relic_counter_church,
            "counter-church",
            Some(0),
            None,
        )
        .0;

    // ── Exhaustion and revenue ─────────────────────────────────────────────

    let added_exhaustion = model.new_int_var("added exhaustion", 0, params.maximum_exhaustion);
    let exhaustion = model
        .new_intermediate(
            bindings.weighted(|a| a.exhaustion) + added_exhaustion,
            "exhaustion",
            Some(0),
            Some(params.maximum_exhaustion),
        )
        .0;

    let primary_revenue = model.new_int_var("primary revenue", 0, REVENUE_LIMIT);
    let secondary_revenue = model.new_int_var("secondary revenue", 0, REVENUE_LIMIT);
    let total_revenue = model
        .new_intermediate(primary_revenue + secondary_revenue, "total revenue", None, None)
        .0;

    // ── Cost ───────────────────────────────────────────────────────────────

    let (implausibility_lo, implausibility_hi) = model.bounds(implausibility);
    let difficulty_level = model.new_int_var(
        "difficulty level",
        (MAX_DIFFICULTY_MULTIPLIER * implausibility_lo).min(0),
        (MAX_DIFFICULTY_MULTIPLIER * implausibility_hi).max(DUMBWAITER_DIFFICULTY),
    );
    let (_, difficulty_hi) = model.bounds(difficulty_level);
    let non_zero_difficulty_level = model.new_int_var("non-zero difficulty level", 1, difficulty_hi);
    model.add_max_equality(
        non_zero_difficulty_level,
        vec![difficulty_level.into(), LinearExpr::constant(1)],
    );

    let action_value = costs::ACTION as i64;
    let scaled_shadowy =
        (DIFFICULTY_SCALER * params.shadowy_level as f64 * costs::ACTION).round() as i64;
    let sale_actions = model.new_int_var("sale actions times action value", 0, scaled_shadowy);
    model.add_division_equality(sale_actions, scaled_shadowy, non_zero_difficulty_level);
    let abstract_sale_cost =
        model.new_int_var("abstract sale cost", 0, action_value * action_value);
    model.add_division_equality(abstract_sale_cost, action_value * action_value, sale_actions);
    let sale_cost = model.new_int_var("sale cost", action_value, action_value * action_value);
    model.add_max_equality(
        sale_cost,
        vec![abstract_sale_cost.into(), LinearExpr::constant(action_value)],
    );

    // Each added joint costs more amber the more limbs the torso started with.
    // For b base joints and n additions this is
    // 25b²n + 100bn² − 100bn + (400n³ + 200n)/3 − 200n².
    let add_joints = bindings.var(ActionKey::Appendage(Appendage::AddJoints));
    let base_joints = bindings.weighted_in(Category::Torso, Action::base_joints);
    let joints_amber = partial_sum_cost(model, base_joints, add_joints, 25, 4, "add joints amber");
    let joints_cost = model
        .new_intermediate(
            (costs::WARM_AMBER as i64) * joints_amber,
            "add joints cost",
            None,
            None,
        )
        .0;

    let cost = model
        .new_intermediate(
            bindings.weighted(Action::whole_cost) + joints_cost + sale_cost,
            "cost",
            Some(0),
            Some(params.maximum_cost),
        )
        .0;

    debug!(
        "aggregated attributes: {} variables, {} constraints",
        model.num_variables(),
        model.num_constraints()
    );

    Attributes {
        value,
        zoological_mania_bonus,
        total_value,
        torso_style,
        skulls,
        arms,
        legs,
        tails,
        wings,
        fins,
        tentacles,
        amalgamy,
        antiquity,
        menace,
        implausibility,
        counter_church,
        exhaustion,
        added_exhaustion,
        primary_revenue,
        secondary_revenue,
        total_revenue,
        difficulty_level,
        sale_cost,
        joints_cost,
        cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    #[test]
    fn test_partial_sum_matches_summation() {
        for (base, count) in [(4, 0), (4, 1), (4, 3), (6, 5), (2, 7)] {
            let mut model = BoneMarketModel::new();
            let b = model.new_int_var("base", 0, 10);
            let n = model.new_int_var("count", 0, 10);
            let amber = partial_sum_cost(&mut model, b.into(), n, 25, 4, "amber");
            model.fix(b, base);
            model.fix(n, count);

            let expected: i64 = (0..count).map(|k| 25 * (base + 4 * k).pow(2)).sum();
            match model.maximise(&LinearExpr::default()) {
                Ok(Outcome::Solved(assignment)) => {
                    assert_eq!(assignment.value(amber), expected, "base {base}, count {count}");
                }
                other => panic!("expected a solution, got {other:?}"),
            }
        }
    }

    fn joints_amber(b: i64, n: i64) -> i64 {
        25 * b * b * n + 100 * b * n * n - 100 * b * n + (400 * n.pow(3) + 200 * n) / 3
            - 200 * n * n
    }

    #[test]
    fn test_partial_sum_matches_hand_expanded_joint_formula() {
        for (b, n) in [(4i64, 2i64), (6, 4), (8, 1)] {
            let summed: i64 = (0..n).map(|k| 25 * (b + 4 * k).pow(2)).sum();
            assert_eq!(joints_amber(b, n), summed);
        }
    }

    #[test]
    fn test_model_joint_amber_equals_hand_expanded_formula() {
        for (b, n) in [(0, 3), (2, 1), (4, 5), (6, 2), (8, 7)] {
            let mut model = BoneMarketModel::new();
            let base = model.new_int_var("base", 0, 10);
            let count = model.new_int_var("count", 0, 10);
            let amber = partial_sum_cost(&mut model, base.into(), count, 25, 4, "amber");
            model.fix(base, b);
            model.fix(count, n);

            match model.maximise(&LinearExpr::default()) {
                Ok(Outcome::Solved(assignment)) => {
                    assert_eq!(assignment.value(amber), joints_amber(b, n), "b {b}, n {n}");
                }
                other => panic!("expected a solution, got {other:?}"),
            }
        }
    }
}
