/// Applied to the profit margin so integer division keeps four decimal places.
pub const PROFIT_MARGIN_MULTIPLIER: i64 = 10_000;

/// Highest attribute value that fractional exponents are tabulated for.
pub const MAXIMUM_ATTRIBUTE: i64 = 100;

/// Scales Shadowy when working out how many actions a sale takes.
pub const DIFFICULTY_SCALER: f64 = 0.6;

/// Default cap on how many times a repeatable action is taken.
pub const DEFAULT_MAX_REPETITIONS: i64 = 30;

/// Default Shadowy level.
pub const DEFAULT_SHADOWY_LEVEL: i64 = 300;

/// Upper bound on primary and secondary revenue, in pennies.
pub const REVENUE_LIMIT: i64 = 100_000_000;

/// Safety net for the fractional-programming loop.
pub const MAX_MARGIN_ITERATIONS: usize = 50;

// ─────────────────────────────────────────────────────────────────────────────
// Sale difficulty multipliers, applied to implausibility
// ─────────────────────────────────────────────────────────────────────────────

pub const FLAT_DIFFICULTY: i64 = 25;
pub const MODEST_DIFFICULTY: i64 = 40;
pub const COLLECTOR_DIFFICULTY: i64 = 45;
pub const DISCERNING_DIFFICULTY: i64 = 50;
pub const SPECIALIST_DIFFICULTY: i64 = 60;
pub const CONNOISSEUR_DIFFICULTY: i64 = 75;
pub const EXACTING_DIFFICULTY: i64 = 100;

/// Fixed difficulty of the Dumbwaiter of Balmoral, regardless of implausibility.
pub const DUMBWAITER_DIFFICULTY: i64 = 200;

/// Largest multiplier any buyer applies to implausibility.
pub const MAX_DIFFICULTY_MULTIPLIER: i64 = 200;
