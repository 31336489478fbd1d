use serde::Serialize;

/// An action that affects a skeleton's qualities.
///
/// Every numeric field is zero unless a catalog entry says otherwise.
/// "Needed" counters go negative for actions that fill a slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Action {
    pub name: &'static str,

    /// Cost in pennies of using this action, including the value of the actions spent.
    pub cost: f64,

    /// Skeleton: Torso Style. Only torsos carry one.
    pub torso_style: Option<i64>,

    /// Approximate Value of Your Skeleton in Pennies.
    pub value: i64,

    pub skulls_needed: i64,
    pub limbs_needed: i64,
    pub tails_needed: i64,

    pub skulls: i64,
    pub arms: i64,
    pub legs: i64,
    pub tails: i64,
    pub wings: i64,
    pub fins: i64,
    pub tentacles: i64,

    pub amalgamy: i64,
    pub antiquity: i64,
    pub menace: i64,

    /// Skeleton: Self-Evident Implausibility.
    pub implausibility: i64,

    /// Skeleton: Support for a Counter-church Theology.
    pub counter_church: i64,

    /// Bone Market Exhaustion.
    pub exhaustion: i64,
}

impl Action {
    /// An action with the given name and cost and no other effect.
    pub const fn new(name: &'static str, cost: f64) -> Self {
        Action {
            name,
            cost,
            torso_style: None,
            value: 0,
            skulls_needed: 0,
            limbs_needed: 0,
            tails_needed: 0,
            skulls: 0,
            arms: 0,
            legs: 0,
            tails: 0,
            wings: 0,
            fins: 0,
            tentacles: 0,
            amalgamy: 0,
            antiquity: 0,
            menace: 0,
            implausibility: 0,
            counter_church: 0,
            exhaustion: 0,
        }
    }

    /// Cost truncated to whole pennies.
    pub fn whole_cost(&self) -> i64 {
        self.cost as i64
    }

    /// Limb slots a torso starts with, filled or not.
    ///
    /// Each "add joints" repetition is priced from this count.
    pub fn base_joints(&self) -> i64 {
        self.limbs_needed + self.arms + self.legs + self.wings + self.fins + self.tentacles
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_zero() {
        let action = Action::new("Carve", 400.0);
        assert_eq!(action.value, 0);
        assert_eq!(action.torso_style, None);
        assert_eq!(action.exhaustion, 0);
        assert_eq!(action.base_joints(), 0);
    }

    #[test]
    fn test_whole_cost_truncates() {
        let action = Action::new("Pincer", 314.99);
        assert_eq!(action.whole_cost(), 314);
    }

    #[test]
    fn test_base_joints_counts_filled_and_open_limbs() {
        let action = Action {
            limbs_needed: 2,
            legs: 2,
            ..Action::new("Necks", 0.0)
        };
        assert_eq!(action.base_joints(), 4);
    }
}
