//! Building one model per buyer and searching them in parallel for the best margin.
//!
//! Each buyer gets its own model with that buyer fixed, which keeps every
//! other buyer's rules out of it entirely. A model is first solved for the
//! largest net profit; the margin is then raised by repeatedly maximising
//! `r·net − n·revenue` for the best `n/r` found so far, until no skeleton
//! does strictly better.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::unbounded;
use log::{debug, info, warn};

use crate::catalog::Buyer;
use crate::error::{BoneMarketError, Result};
use crate::model::{BoneMarketModel, Compare, LinearExpr, Outcome, VarId};
use crate::solver::attributes::{Attributes, aggregate};
use crate::solver::bindings::Bindings;
use crate::solver::buyers::add_buyers;
use crate::solver::constants::MAX_MARGIN_ITERATIONS;
use crate::solver::params::SolveParameters;
use crate::solver::solution::{Solution, SolveOutcome, SolveStatus};
use crate::solver::structure::require_structure;

/// The complete model for selling to one buyer.
#[derive(Debug, Clone)]
pub struct SubModel {
    pub buyer: Buyer,
    pub model: BoneMarketModel,
    pub bindings: Bindings,
    pub attributes: Attributes,
    pub skeleton_in_progress: VarId,
}

/// How the search for one buyer ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BuyerOutcome {
    /// No skeleton can be sold to this buyer.
    Infeasible,
    /// The best skeleton found, and whether it is known to be the best.
    Solved { solution: Solution, proven: bool },
    /// Stopped before anything was found.
    Skipped,
}

pub fn build_model(params: &SolveParameters, buyer: Buyer) -> SubModel {
    let mut model = BoneMarketModel::new();
    let bindings = Bindings::bind(&mut model, params, Some(buyer));
    let attributes = aggregate(&mut model, &bindings, params);
    let skeleton_in_progress = require_structure(&mut model, &bindings, &attributes);
    add_buyers(
        &mut model,
        &bindings,
        &attributes,
        skeleton_in_progress,
        params.bone_market_fluctuations,
    );

    // The margin is undefined without revenue.
    model.add(attributes.total_revenue.at_least(1));

    debug!(
        "model for {}: {} variables, {} constraints",
        buyer.ident(),
        model.num_variables(),
        model.num_constraints()
    );

    SubModel {
        buyer,
        model,
        bindings,
        attributes,
        skeleton_in_progress,
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1) as i64
}

/// Find the highest-margin skeleton for one buyer.
///
/// `stop` is polled between solves; `found` sees every improvement.
pub fn solve_buyer(
    params: &SolveParameters,
    buyer: Buyer,
    stop: &dyn Fn() -> bool,
    found: &mut dyn FnMut(&Solution),
) -> Result<BuyerOutcome> {
    if stop() {
        return Ok(BuyerOutcome::Skipped);
    }

    let sub = build_model(params, buyer);
    let read = |outcome: Outcome| -> Result<Option<Solution>> {
        match outcome {
            Outcome::Infeasible => Ok(None),
            Outcome::Solved(assignment) => Solution::read(
                &assignment,
                &sub.bindings,
                &sub.attributes,
                &params.character,
            )
            .map(Some),
        }
    };

    let Some(mut best) = read(sub.model.maximise(&sub.attributes.net_profit())?)? else {
        debug!("{}: infeasible", buyer.ident());
        return Ok(BuyerOutcome::Infeasible);
    };
    found(&best);

    for iteration in 0..MAX_MARGIN_ITERATIONS {
        if stop() {
            return Ok(BuyerOutcome::Solved {
                solution: best,
                proven: false,
            });
        }

        let divisor = gcd(best.net_profit, best.total_revenue);
        let (n, r) = (best.net_profit / divisor, best.total_revenue / divisor);
        let objective =
            r * sub.attributes.net_profit() - n * LinearExpr::from(sub.attributes.total_revenue);

        let Some(candidate) = read(sub.model.maximise(&objective)?)? else {
            return Err(BoneMarketError::UnexpectedStatus(format!(
                "INFEASIBLE after a skeleton was found for {}",
                buyer.ident()
            )));
        };

        if !candidate.beats(&best) {
            debug!(
                "{}: margin {} proven after {} iterations",
                buyer.ident(),
                best.profit_margin,
                iteration + 1
            );
            return Ok(BuyerOutcome::Solved {
                solution: best,
                proven: true,
            });
        }
        best = candidate;
        found(&best);
    }

    warn!(
        "{}: margin still improving after {} iterations",
        buyer.ident(),
        MAX_MARGIN_ITERATIONS
    );
    Ok(BuyerOutcome::Solved {
        solution: best,
        proven: false,
    })
}

enum Message {
    Found(Solution),
    Finished(Buyer, Result<BuyerOutcome>),
}

/// The best skeleton received so far, across every buyer.
struct Incumbent<'a> {
    best: Option<Solution>,
    incomplete: bool,
    progress: Option<&'a mut dyn FnMut(&Solution)>,
}

impl Incumbent<'_> {
    fn consider(&mut self, solution: Solution) {
        if self.best.as_ref().is_none_or(|b| solution.beats(b)) {
            if let Some(report) = self.progress.as_deref_mut() {
                report(&solution);
            }
            self.best = Some(solution);
        }
    }

    /// Take in one worker message. Returns whether it finished a buyer.
    fn receive(&mut self, message: Message) -> Result<bool> {
        match message {
            Message::Found(solution) => {
                self.consider(solution);
                Ok(false)
            }
            Message::Finished(buyer, result) => {
                match result {
                    Ok(BuyerOutcome::Infeasible) => {}
                    Ok(BuyerOutcome::Solved { solution, proven }) => {
                        self.incomplete |= !proven;
                        self.consider(solution);
                    }
                    Ok(BuyerOutcome::Skipped) => self.incomplete = true,
                    Err(e) => {
                        warn!("{}: {}", buyer.ident(), e);
                        return Err(e);
                    }
                }
                Ok(true)
            }
        }
    }
}

/// Find the skeleton with the highest profit margin.
///
/// `progress` is called from this thread with each new best skeleton. Workers
/// are joined before returning, so a solve already running when the time
/// limit passes is allowed to finish and its result is still considered.
pub fn solve(
    params: &SolveParameters,
    progress: Option<&mut dyn FnMut(&Solution)>,
) -> Result<SolveOutcome> {
    params.validate()?;

    let buyers = params.candidate_buyers();
    if buyers.is_empty() {
        warn!("no buyer is available");
        return Err(BoneMarketError::NoSatisfactorySkeleton);
    }

    let started = Instant::now();
    let deadline = params.time_limit().map(|limit| started + limit);
    let workers = params.worker_count().min(buyers.len());
    info!(
        "searching {} buyers on {} workers{}",
        buyers.len(),
        workers,
        match params.time_limit {
            Some(limit) => format!(" for up to {limit}s"),
            None => String::new(),
        }
    );

    let (job_tx, job_rx) = unbounded();
    for buyer in &buyers {
        job_tx
            .send(*buyer)
            .map_err(|e| BoneMarketError::UnexpectedStatus(e.to_string()))?;
    }
    drop(job_tx);

    let cancel = AtomicBool::new(false);
    let (message_tx, message_rx) = unbounded();
    let mut incumbent = Incumbent {
        best: None,
        incomplete: false,
        progress,
    };

    thread::scope(|scope| -> Result<()> {
        for i in 0..workers {
            let jobs = job_rx.clone();
            let messages = message_tx.clone();
            let cancel = &cancel;

            thread::Builder::new()
                .name(format!("solver-{i}"))
                .spawn_scoped(scope, move || {
                    let stop = || {
                        cancel.load(Ordering::Relaxed)
                            || deadline.is_some_and(|d| Instant::now() >= d)
                    };
                    while let Ok(buyer) = jobs.recv() {
                        let mut found = |s: &Solution| {
                            if messages.send(Message::Found(s.clone())).is_err() {
                                cancel.store(true, Ordering::Relaxed);
                            }
                        };
                        let result = solve_buyer(params, buyer, &stop, &mut found);
                        if messages.send(Message::Finished(buyer, result)).is_err() {
                            cancel.store(true, Ordering::Relaxed);
                            break;
                        }
                    }
                })?;
        }
        drop(message_tx);

        let mut pending = buyers.len();
        let result = loop {
            if pending == 0 {
                break Ok(());
            }
            let received = match deadline {
                Some(d) => message_rx.recv_deadline(d).ok(),
                None => message_rx.recv().ok(),
            };
            let Some(message) = received else {
                info!("time limit reached with {pending} buyers unfinished");
                incumbent.incomplete = true;
                break Ok(());
            };
            match incumbent.receive(message) {
                Ok(true) => pending -= 1,
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        cancel.store(true, Ordering::Relaxed);
        result
    })?;

    // Whatever the workers sent while finishing after the deadline.
    for message in message_rx.try_iter() {
        incumbent.receive(message)?;
    }

    let elapsed = started.elapsed();
    match incumbent.best {
        Some(solution) => {
            let status = if incumbent.incomplete {
                warn!("skeleton may be suboptimal");
                SolveStatus::Feasible
            } else {
                SolveStatus::Optimal
            };
            info!(
                "best margin {} selling to {} ({:?}, {:.1?})",
                solution.profit_margin,
                solution.buyer.ident(),
                status,
                elapsed
            );
            Ok(SolveOutcome { solution, status })
        }
        None if incumbent.incomplete => Err(BoneMarketError::UnexpectedStatus(
            "UNKNOWN: no skeleton found before the time limit".to_string(),
        )),
        None => Err(BoneMarketError::NoSatisfactorySkeleton),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::catalog::{ActionKey, Declaration, Skull, Torso};

    fn victim_humanoid() -> SolveParameters {
        SolveParameters::default().restricted_to(&[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Skull(Skull::VictimSkull),
            ActionKey::Declaration(Declaration::Humanoid),
            ActionKey::Buyer(Buyer::ANaiveCollector),
        ])
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(-1500, 500), 500);
        assert_eq!(gcd(7, 3), 1);
        assert_eq!(gcd(0, 0), 1);
    }

    #[test]
    fn test_build_model_fixes_the_buyer() {
        let sub = build_model(&SolveParameters::default(), Buyer::MrsPlenty);
        let chosen = sub.bindings.literal(ActionKey::Buyer(Buyer::MrsPlenty));
        let other = sub.bindings.literal(ActionKey::Buyer(Buyer::ANaiveCollector));
        assert_eq!(sub.model.fixed_literal(chosen), Some(true));
        assert_eq!(sub.model.fixed_literal(other), Some(false));
    }

    #[test]
    fn test_solve_buyer_reports_each_improvement() {
        let mut seen = Vec::new();
        let outcome = solve_buyer(&victim_humanoid(), Buyer::ANaiveCollector, &|| false, &mut |s: &Solution| {
            seen.push(s.profit_margin)
        })
        .unwrap();

        match outcome {
            BuyerOutcome::Solved { solution, proven } => {
                assert!(proven);
                assert_eq!(solution.net_profit, -1500);
                assert_eq!(solution.profit_margin, -30000);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
        assert_eq!(seen, vec![-30000]);
    }

    #[test]
    fn test_solve_buyer_skips_when_stopped() {
        let outcome =
            solve_buyer(&victim_humanoid(), Buyer::ANaiveCollector, &|| true, &mut |_: &Solution| {}).unwrap();
        assert_eq!(outcome, BuyerOutcome::Skipped);
    }

    #[test]
    fn test_solve_buyer_stops_between_margin_iterations() {
        let polls = Cell::new(0);
        let stop = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };
        let outcome =
            solve_buyer(&victim_humanoid(), Buyer::ANaiveCollector, &stop, &mut |_: &Solution| {})
                .unwrap();

        match outcome {
            BuyerOutcome::Solved { solution, proven } => {
                assert!(!proven);
                assert_eq!(solution.net_profit, -1500);
            }
            other => panic!("expected a solution, got {other:?}"),
        }
        assert_eq!(polls.get(), 2);
    }

    #[test]
    fn test_time_limit_never_claims_optimal() {
        let params = SolveParameters {
            time_limit: Some(0.000_001),
            workers: Some(1),
            ..victim_humanoid()
        };
        match solve(&params, None) {
            Ok(outcome) => assert_eq!(outcome.status, SolveStatus::Feasible),
            Err(BoneMarketError::UnexpectedStatus(message)) => {
                assert!(message.starts_with("UNKNOWN"), "{message}")
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_solve_reports_progress() {
        let mut reports = 0;
        let mut progress = |_: &Solution| reports += 1;
        let outcome = solve(&victim_humanoid(), Some(&mut progress)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.solution.buyer, Buyer::ANaiveCollector);
        assert_eq!(reports, 1);
    }
}
