//! One decision variable per catalog action.

use std::collections::HashMap;

use log::debug;

use crate::catalog::{Action, ActionKey, Buyer, Category};
use crate::model::{BoneMarketModel, Compare, LinearExpr, Literal, VarId};
use crate::solver::params::SolveParameters;

/// An action bound into the model.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub key: ActionKey,
    pub var: VarId,
    pub action: Action,
}

/// Every catalog action and the variable counting how often it is taken.
#[derive(Debug, Clone)]
pub struct Bindings {
    entries: Vec<Binding>,
    index: HashMap<ActionKey, usize>,
}

impl Bindings {
    /// Bind every action in catalog order and add the choice constraints:
    /// one torso, one declaration, one buyer, nothing blacklisted, and only
    /// buyers who are around.
    ///
    /// With `buyer` set, that buyer is chosen outright and every other is ruled out.
    pub fn bind(
        model: &mut BoneMarketModel,
        params: &SolveParameters,
        buyer: Option<Buyer>,
    ) -> Bindings {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for key in ActionKey::all() {
            let action = key.action(&params.character);
            let var = if key.is_exclusive() {
                model.new_bool_var(action.name)
            } else {
                model.new_int_var(action.name, 0, params.max_repetitions)
            };
            index.insert(key, entries.len());
            entries.push(Binding { key, var, action });
        }

        let bindings = Bindings { entries, index };

        let candidates = params.candidate_buyers();
        for binding in bindings.group(Category::Buyer) {
            let ActionKey::Buyer(b) = binding.key else {
                continue;
            };
            match buyer {
                Some(chosen) if chosen == b && candidates.contains(&b) => {
                    model.fix(binding.var, 1)
                }
                None if candidates.contains(&b) => {}
                _ => model.fix(binding.var, 0),
            }
        }

        for forbidden in &params.blacklist {
            model.fix(bindings.var(*forbidden), 0);
        }

        for category in [Category::Torso, Category::Declaration, Category::Buyer] {
            let chosen: LinearExpr = bindings.group(category).map(|b| b.var).sum();
            model.add(chosen.equals(1));
        }

        debug!(
            "bound {} actions, {} candidate buyers",
            bindings.entries.len(),
            candidates.len()
        );

        bindings
    }

    pub fn var(&self, key: ActionKey) -> VarId {
        self.entries[self.index[&key]].var
    }

    /// The action read as a boolean. Only meaningful for exclusive actions.
    pub fn literal(&self, key: ActionKey) -> Literal {
        self.var(key).literal()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    pub fn group(&self, category: Category) -> impl Iterator<Item = &Binding> {
        self.entries
            .iter()
            .filter(move |b| b.key.category() == category)
    }

    /// `Σ field(action)·count` over every action.
    pub fn weighted(&self, field: impl Fn(&Action) -> i64) -> LinearExpr {
        LinearExpr::weighted_sum(self.entries.iter().map(|b| (b.var, field(&b.action))))
    }

    /// Like [`Bindings::weighted`], restricted to one category.
    pub fn weighted_in(&self, category: Category, field: impl Fn(&Action) -> i64) -> LinearExpr {
        LinearExpr::weighted_sum(self.group(category).map(|b| (b.var, field(&b.action))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Skull, Torso};

    #[test]
    fn test_binds_every_action_once() {
        let mut model = BoneMarketModel::new();
        let bindings = Bindings::bind(&mut model, &SolveParameters::default(), None);
        assert_eq!(bindings.iter().count(), ActionKey::all().len());
    }

    #[test]
    fn test_exclusive_actions_are_boolean() {
        let mut model = BoneMarketModel::new();
        let params = SolveParameters {
            max_repetitions: 12,
            ..Default::default()
        };
        let bindings = Bindings::bind(&mut model, &params, None);

        let torso = bindings.var(ActionKey::Torso(Torso::HumanRibcage));
        assert_eq!(model.bounds(torso), (0, 1));
        let skull = bindings.var(ActionKey::Skull(Skull::HornedSkull));
        assert_eq!(model.bounds(skull), (0, 12));
    }

    #[test]
    fn test_blacklist_and_chosen_buyer_are_fixed() {
        let mut model = BoneMarketModel::new();
        let params = SolveParameters {
            blacklist: vec![ActionKey::Skull(Skull::VakeSkull)],
            ..Default::default()
        };
        let bindings = Bindings::bind(&mut model, &params, Some(Buyer::MrsPlenty));

        assert_eq!(model.bounds(bindings.var(ActionKey::Skull(Skull::VakeSkull))), (0, 0));
        assert_eq!(
            model.fixed_literal(bindings.literal(ActionKey::Buyer(Buyer::ANaiveCollector))),
            Some(false)
        );
        assert_eq!(
            model.fixed_literal(bindings.literal(ActionKey::Buyer(Buyer::MrsPlenty))),
            Some(true)
        );
    }

    #[test]
    fn test_absent_buyers_are_ruled_out() {
        let mut model = BoneMarketModel::new();
        let bindings = Bindings::bind(&mut model, &SolveParameters::default(), None);
        let skulls = bindings.literal(ActionKey::Buyer(Buyer::AnEnthusiastInSkulls));
        assert_eq!(model.fixed_literal(skulls), Some(false));
    }

    #[test]
    fn test_weighted_sums_coefficients() {
        let mut model = BoneMarketModel::new();
        let bindings = Bindings::bind(&mut model, &SolveParameters::default(), None);
        let styles = bindings.weighted_in(Category::Torso, |a| a.torso_style.unwrap_or(0));
        let ribcage = bindings.var(ActionKey::Torso(Torso::HumanRibcage));
        assert_eq!(styles.terms().find(|(v, _)| *v == ribcage), Some((ribcage, 15)));
    }
}
