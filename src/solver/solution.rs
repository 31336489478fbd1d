use serde::{Deserialize, Serialize};

use crate::catalog::{ActionKey, Buyer, Category, Character, Declaration};
use crate::error::{BoneMarketError, Result};
use crate::model::Assignment;
use crate::solver::attributes::Attributes;
use crate::solver::bindings::Bindings;
use crate::solver::constants::PROFIT_MARGIN_MULTIPLIER;

/// One action of the finished plan and how many times it is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub action: ActionKey,
    pub name: String,
    pub count: i64,
}

/// A skeleton and its sale, with every quantity in whole pennies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub steps: Vec<Step>,
    pub declaration: Declaration,
    pub buyer: Buyer,

    pub net_profit: i64,
    /// Net profit over total revenue, scaled by [`PROFIT_MARGIN_MULTIPLIER`].
    pub profit_margin: i64,

    pub total_revenue: i64,
    pub primary_revenue: i64,
    pub secondary_revenue: i64,
    pub cost: i64,

    pub value: i64,
    pub amalgamy: i64,
    pub antiquity: i64,
    pub menace: i64,
    pub counter_church: i64,
    pub implausibility: i64,
    pub exhaustion: i64,
}

/// Whether the best solution found is known to be the best there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    Feasible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub solution: Solution,
    pub status: SolveStatus,
}

/// `net · 10000 / revenue`, truncated toward zero.
///
/// Revenue must be positive.
pub fn profit_margin(net_profit: i64, total_revenue: i64) -> i64 {
    let magnitude = (net_profit.unsigned_abs() as i128 * PROFIT_MARGIN_MULTIPLIER as i128)
        / total_revenue.max(1) as i128;
    (net_profit.signum() as i128 * magnitude) as i64
}

impl Solution {
    /// Read a solution back out of a solved model.
    pub fn read(
        assignment: &Assignment,
        bindings: &Bindings,
        attributes: &Attributes,
        character: &Character,
    ) -> Result<Solution> {
        let steps: Vec<Step> = bindings
            .iter()
            .filter_map(|b| {
                let count = assignment.value(b.var);
                (count > 0).then(|| Step {
                    action: b.key,
                    name: b.key.action(character).name.to_string(),
                    count,
                })
            })
            .collect();

        let chosen = |category: Category| steps.iter().find(|s| s.action.category() == category);
        let declaration = match chosen(Category::Declaration).map(|s| s.action) {
            Some(ActionKey::Declaration(d)) => d,
            _ => {
                return Err(BoneMarketError::UnexpectedStatus(
                    "solution declares nothing".to_string(),
                ));
            }
        };
        let buyer = match chosen(Category::Buyer).map(|s| s.action) {
            Some(ActionKey::Buyer(b)) => b,
            _ => {
                return Err(BoneMarketError::UnexpectedStatus(
                    "solution sells to nobody".to_string(),
                ));
            }
        };

        let value = |var| assignment.value(var);
        let total_revenue = value(attributes.total_revenue);
        let cost = value(attributes.cost);
        let net_profit = total_revenue - cost;

        Ok(Solution {
            steps,
            declaration,
            buyer,
            net_profit,
            profit_margin: profit_margin(net_profit, total_revenue),
            total_revenue,
            primary_revenue: value(attributes.primary_revenue),
            secondary_revenue: value(attributes.secondary_revenue),
            cost,
            value: value(attributes.value),
            amalgamy: value(attributes.amalgamy),
            antiquity: value(attributes.antiquity),
            menace: value(attributes.menace),
            counter_church: value(attributes.counter_church),
            implausibility: value(attributes.implausibility),
            exhaustion: value(attributes.exhaustion),
        })
    }

    /// Whether this solution's margin is strictly higher than `other`'s,
    /// compared exactly rather than through the truncated margin.
    pub fn beats(&self, other: &Solution) -> bool {
        let ours = self.net_profit as i128 * other.total_revenue.max(1) as i128;
        let theirs = other.net_profit as i128 * self.total_revenue.max(1) as i128;
        ours > theirs
    }

    /// Profit margin as a fraction, e.g. `-3.0` for a 300% loss.
    pub fn margin_fraction(&self) -> f64 {
        self.profit_margin as f64 / PROFIT_MARGIN_MULTIPLIER as f64
    }

    pub fn count(&self, action: ActionKey) -> i64 {
        self.steps
            .iter()
            .find(|s| s.action == action)
            .map_or(0, |s| s.count)
    }

    /// Action names in plan order, each repeated once per use.
    pub fn action_lines(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|s| std::iter::repeat_n(s.name.as_str(), s.count as usize))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{Skull, Torso};
    use assert_float_eq::assert_float_absolute_eq;

    pub(crate) fn sample(net_profit: i64, total_revenue: i64) -> Solution {
        Solution {
            steps: vec![
                Step {
                    action: ActionKey::Torso(Torso::VictimSkeleton),
                    name: "Supply a skeleton of your own".to_string(),
                    count: 1,
                },
                Step {
                    action: ActionKey::Skull(Skull::HornedSkull),
                    name: "Affix a Horned Skull to your (Skeleton Type)".to_string(),
                    count: 2,
                },
            ],
            declaration: Declaration::Chimera,
            buyer: Buyer::ANaiveCollector,
            net_profit,
            profit_margin: profit_margin(net_profit, total_revenue),
            total_revenue,
            primary_revenue: total_revenue,
            secondary_revenue: 0,
            cost: total_revenue - net_profit,
            value: 500,
            amalgamy: 0,
            antiquity: 0,
            menace: 4,
            counter_church: 0,
            implausibility: 3,
            exhaustion: 0,
        }
    }

    #[test]
    fn test_profit_margin_truncates_toward_zero() {
        assert_eq!(profit_margin(-1500, 500), -30000);
        assert_eq!(profit_margin(1, 3), 3333);
        assert_eq!(profit_margin(-1, 3), -3333);
        assert_eq!(profit_margin(0, 250), 0);
    }

    #[test]
    fn test_margin_fraction() {
        assert_float_absolute_eq!(sample(-1500, 500).margin_fraction(), -3.0, 1e-9);
        assert_float_absolute_eq!(sample(250, 1000).margin_fraction(), 0.25, 1e-9);
    }

    #[test]
    fn test_beats_compares_exact_ratios() {
        // 1/3 and 3333/10000 truncate to the same margin
        let third = sample(1, 3);
        let nearly = sample(3333, 10000);
        assert_eq!(third.profit_margin, nearly.profit_margin);
        assert!(third.beats(&nearly));
        assert!(!nearly.beats(&third));
        assert!(!third.beats(&third));
    }

    #[test]
    fn test_action_lines_repeat_counts() {
        let solution = sample(0, 500);
        let lines: Vec<&str> = solution.action_lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], lines[2]);
        assert_eq!(solution.count(ActionKey::Skull(Skull::HornedSkull)), 2);
        assert_eq!(solution.count(ActionKey::Skull(Skull::VakeSkull)), 0);
    }

    #[test]
    fn test_solution_json_roundtrip_keeps_action_keys() {
        let solution = sample(100, 500);
        let json = serde_json::to_string(&solution).unwrap();
        assert!(json.contains("\"Skull.HORNED_SKULL\""));
        let back: Solution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, solution);
    }
}
