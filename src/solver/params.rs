use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    ActionKey, Buyer, Character, Declaration, DiplomatFascination, Fluctuation, OccasionalBuyer,
};
use crate::error::{BoneMarketError, Result};
use crate::solver::constants::{DEFAULT_MAX_REPETITIONS, DEFAULT_SHADOWY_LEVEL};

/// Everything a solve depends on apart from the catalog itself.
///
/// Missing fields take their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveParameters {
    pub shadowy_level: i64,
    pub bone_market_fluctuations: Option<Fluctuation>,
    pub zoological_mania: Option<Declaration>,
    pub occasional_buyer: Option<OccasionalBuyer>,
    pub diplomat_fascination: Option<DiplomatFascination>,
    pub desired_buyers: Vec<Buyer>,
    pub maximum_cost: i64,
    pub maximum_exhaustion: i64,

    /// Wall-clock limit for the whole solve, in seconds.
    pub time_limit: Option<f64>,
    pub workers: Option<usize>,
    pub blacklist: Vec<ActionKey>,

    /// Most times any repeatable action may be taken.
    pub max_repetitions: i64,
    pub character: Character,
}

impl Default for SolveParameters {
    fn default() -> Self {
        SolveParameters {
            shadowy_level: DEFAULT_SHADOWY_LEVEL,
            bone_market_fluctuations: None,
            zoological_mania: None,
            occasional_buyer: None,
            diplomat_fascination: None,
            desired_buyers: Vec::new(),
            maximum_cost: i32::MAX as i64,
            maximum_exhaustion: i32::MAX as i64,
            time_limit: None,
            workers: None,
            blacklist: Vec::new(),
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            character: Character::default(),
        }
    }
}

impl SolveParameters {
    pub fn validate(&self) -> Result<()> {
        if self.shadowy_level <= 0 {
            return Err(BoneMarketError::InvalidInput(format!(
                "Shadowy level must be positive, got {}",
                self.shadowy_level
            )));
        }
        if self.maximum_cost < 0 {
            return Err(BoneMarketError::InvalidInput(format!(
                "maximum cost must not be negative, got {}",
                self.maximum_cost
            )));
        }
        if self.maximum_exhaustion < 0 {
            return Err(BoneMarketError::InvalidInput(format!(
                "maximum exhaustion must not be negative, got {}",
                self.maximum_exhaustion
            )));
        }
        if self.workers == Some(0) {
            return Err(BoneMarketError::InvalidInput(
                "at least one worker is required".to_string(),
            ));
        }
        if self.max_repetitions <= 0 {
            return Err(BoneMarketError::InvalidInput(format!(
                "max repetitions must be positive, got {}",
                self.max_repetitions
            )));
        }
        if let Some(limit) = self.time_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(BoneMarketError::InvalidInput(format!(
                    "time limit must be a positive number of seconds, got {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Blacklist every action outside `allowed`.
    pub fn restricted_to(mut self, allowed: &[ActionKey]) -> Self {
        self.blacklist = ActionKey::all()
            .into_iter()
            .filter(|key| !allowed.contains(key))
            .collect();
        self
    }

    pub fn is_blacklisted(&self, key: ActionKey) -> bool {
        self.blacklist.contains(&key)
    }

    /// Buyers a skeleton could be sold to, in catalog order.
    ///
    /// Occasional buyers and the Diplomat only visit when the world says so,
    /// unless asked for by name. Naming buyers restricts the sale to them.
    pub fn candidate_buyers(&self) -> Vec<Buyer> {
        let desired = |buyer: &Buyer| self.desired_buyers.contains(buyer);

        let absent: Vec<Buyer> = OccasionalBuyer::ALL
            .iter()
            .filter(|o| Some(**o) != self.occasional_buyer)
            .flat_map(|o| o.buyers().iter().copied())
            .chain(
                DiplomatFascination::ALL
                    .iter()
                    .filter(|f| Some(**f) != self.diplomat_fascination)
                    .map(|f| f.buyer()),
            )
            .filter(|b| !desired(b))
            .collect();

        Buyer::ALL
            .iter()
            .copied()
            .filter(|b| !absent.contains(b))
            .filter(|b| self.desired_buyers.is_empty() || desired(b))
            .filter(|b| !self.is_blacklisted(ActionKey::Buyer(*b)))
            .collect()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(Duration::from_secs_f64)
    }

    /// Threads to solve on: the configured count, or one per available core.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
