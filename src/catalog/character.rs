use serde::{Deserialize, Serialize};

/// Skill levels that change how reliably adjustments succeed.
///
/// Narrow challenges against these skills cost extra actions on failure, and
/// each failure leaves the skeleton a little less plausible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub mithridacy: i64,
    pub kataleptic_toxicology: i64,
}

impl Default for Character {
    fn default() -> Self {
        Character {
            mithridacy: 10,
            kataleptic_toxicology: 10,
        }
    }
}

/// Success chance of a narrow challenge at difficulty 6.
pub fn narrow_challenge(stat: i64) -> f64 {
    (stat as f64 / 10.0).clamp(0.1, 1.0)
}

/// Expected implausibility added by failed attempts before a success.
pub fn failure_implausibility(stat: i64) -> i64 {
    let chance = narrow_challenge(stat);
    let failures = 1.0 / chance - 1.0;
    (2.0 * failures).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_narrow_challenge_clamps() {
        assert_float_absolute_eq!(narrow_challenge(0), 0.1, 1e-9);
        assert_float_absolute_eq!(narrow_challenge(7), 0.7, 1e-9);
        assert_float_absolute_eq!(narrow_challenge(15), 1.0, 1e-9);
    }

    #[test]
    fn test_failure_implausibility() {
        assert_eq!(failure_implausibility(10), 0);
        assert_eq!(failure_implausibility(7), 1);
        assert_eq!(failure_implausibility(5), 2);
        assert_eq!(failure_implausibility(1), 18);
    }
}
