//! Applying a whole group of constraints under one switch.

use super::{BoneMarketModel, BoundedExpr, ConstraintId, Literal};

/// Builds constraints when invoked against the model.
pub type Builder = Box<dyn FnOnce(&mut BoneMarketModel) -> Item>;

/// Something [`BoneMarketModel::add_if`] can enforce.
pub enum Item {
    /// Added as a constraint, then enforced.
    Bounded(BoundedExpr),
    /// Enforced as is.
    Constraint(ConstraintId),
    /// Invoked, and whatever it returns is enforced.
    Deferred(Builder),
    /// Each element is enforced in turn.
    Seq(Vec<Item>),
}

/// Wraps a builder so it only runs when its switch can be true.
pub fn deferred<F, I>(build: F) -> Item
where
    F: FnOnce(&mut BoneMarketModel) -> I + 'static,
    I: Into<Item>,
{
    Item::Deferred(Box::new(move |model: &mut BoneMarketModel| -> Item {
        build(model).into()
    }))
}

impl From<BoundedExpr> for Item {
    fn from(bounded: BoundedExpr) -> Self {
        Item::Bounded(bounded)
    }
}

impl From<ConstraintId> for Item {
    fn from(constraint: ConstraintId) -> Self {
        Item::Constraint(constraint)
    }
}

impl From<Vec<ConstraintId>> for Item {
    fn from(constraints: Vec<ConstraintId>) -> Self {
        Item::Seq(constraints.into_iter().map(Item::Constraint).collect())
    }
}

impl From<Vec<BoundedExpr>> for Item {
    fn from(bounded: Vec<BoundedExpr>) -> Self {
        Item::Seq(bounded.into_iter().map(Item::Bounded).collect())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::Seq(items)
    }
}

/// A `Vec<Item>` from anything convertible into an [`Item`].
#[macro_export]
macro_rules! conditions {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::model::Item::from($item)),*]
    };
}

impl BoneMarketModel {
    /// Add every item, enforced only while `switch` is true.
    ///
    /// Returns every constraint the switch was attached to. If the switch is
    /// already known to be false, deferred builders are not run at all.
    pub fn add_if(&mut self, switch: Literal, items: Vec<Item>) -> Vec<ConstraintId> {
        let skip_builders = self.fixed_literal(switch) == Some(false);
        let mut enforced = Vec::new();
        let mut pending = items;
        pending.reverse();

        while let Some(item) = pending.pop() {
            match item {
                Item::Bounded(bounded) => {
                    let id = self.add(bounded);
                    enforced.push(self.only_enforce_if(id, switch));
                }
                Item::Constraint(id) => {
                    enforced.push(self.only_enforce_if(id, switch));
                }
                Item::Deferred(build) => {
                    if !skip_builders {
                        pending.push(build(self));
                    }
                }
                Item::Seq(items) => pending.extend(items.into_iter().rev()),
            }
        }

        enforced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions;
    use crate::model::{Compare, LinearExpr, Outcome};

    #[test]
    fn test_every_item_kind_is_enforced() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let y = model.new_int_var("y", 0, 10);
        let switch = model.new_bool_var("switch").literal();
        let prebuilt = model.add(y.equals(4));

        let enforced = model.add_if(
            switch,
            conditions![
                x.at_least(2),
                prebuilt,
                vec![x.at_most(8), y.at_least(1)],
                deferred(move |m: &mut BoneMarketModel| m.add_division_equality(y, x, 2)),
            ],
        );

        // three bounded, one prebuilt, and the division's target link
        assert_eq!(enforced.len(), 5);
    }

    #[test]
    fn test_builders_skipped_behind_false_switch() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let switch = model.new_bool_var("switch");
        model.fix(switch, 0);
        let before = model.num_variables();

        model.add_if(
            switch.literal(),
            conditions![deferred(move |m: &mut BoneMarketModel| {
                m.add_multiplication_equality(x, [LinearExpr::from(x), LinearExpr::from(x)])
            })],
        );

        assert_eq!(model.num_variables(), before);
    }

    #[test]
    fn test_switch_gates_branch() {
        let mut model = BoneMarketModel::new();
        let x = model.new_int_var("x", 0, 10);
        let switch = model.new_bool_var("switch");
        model.add_if(switch.literal(), conditions![x.equals(7)]);
        model.add_if(!switch, conditions![x.equals(2)]);
        model.fix(switch, 0);

        match model.maximise(&LinearExpr::default()) {
            Ok(Outcome::Solved(assignment)) => assert_eq!(assignment.value(x), 2),
            other => panic!("expected a solution, got {other:?}"),
        }
    }
}
