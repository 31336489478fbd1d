use bone_market_solver::catalog::{
    Action, ActionKey, Appendage, Buyer, Category, Declaration, Fluctuation, Skull, Torso,
};
use bone_market_solver::persistence::{load_parameters, save_parameters};
use bone_market_solver::solver::{Solution, SolveParameters, SolveStatus, solve};
use bone_market_solver::BoneMarketError;
use tempfile::NamedTempFile;

/// Every declaration except Chimera, which fits any skeleton.
fn real_declarations() -> Vec<ActionKey> {
    Declaration::ALL
        .iter()
        .filter(|d| **d != Declaration::Chimera)
        .map(|d| ActionKey::Declaration(*d))
        .collect()
}

fn allowing(params: SolveParameters, parts: &[ActionKey], buyers: &[Buyer]) -> SolveParameters {
    let mut allowed = parts.to_vec();
    allowed.extend(real_declarations());
    allowed.extend(buyers.iter().map(|b| ActionKey::Buyer(*b)));
    SolveParameters {
        desired_buyers: buyers.to_vec(),
        ..params
    }
    .restricted_to(&allowed)
}

fn victim_parts() -> Vec<ActionKey> {
    vec![
        ActionKey::Torso(Torso::VictimSkeleton),
        ActionKey::Skull(Skull::VictimSkull),
    ]
}

fn horned_parts() -> Vec<ActionKey> {
    vec![
        ActionKey::Torso(Torso::VictimSkeleton),
        ActionKey::Skull(Skull::HornedSkull),
    ]
}

fn solved(params: &SolveParameters) -> Solution {
    let outcome = solve(params, None).expect("a skeleton should exist");
    assert_eq!(outcome.status, SolveStatus::Optimal);
    outcome.solution
}

fn count_in(solution: &Solution, category: Category) -> i64 {
    solution
        .steps
        .iter()
        .filter(|s| s.action.category() == category)
        .map(|s| s.count)
        .sum()
}

fn assert_well_formed(solution: &Solution, params: &SolveParameters) {
    for category in [Category::Torso, Category::Declaration, Category::Buyer] {
        assert_eq!(count_in(solution, category), 1, "{category:?}");
    }

    let needed = |field: fn(&Action) -> i64| -> i64 {
        solution
            .steps
            .iter()
            .map(|s| field(&s.action.action(&params.character)) * s.count)
            .sum()
    };
    assert_eq!(needed(|a: &Action| a.skulls_needed), 0);
    assert_eq!(needed(|a: &Action| a.limbs_needed), 0);
    assert_eq!(needed(|a: &Action| a.tails_needed), 0);

    assert!(solution.cost <= params.maximum_cost);
    assert!(solution.exhaustion <= params.maximum_exhaustion);
    assert_eq!(solution.net_profit, solution.total_revenue - solution.cost);
    assert_eq!(
        solution.total_revenue,
        solution.primary_revenue + solution.secondary_revenue
    );
    assert_eq!(solution.profit_margin < 0, solution.net_profit < 0);
}

#[test]
fn test_cheapest_skeleton_for_a_flat_rate_buyer() {
    let params = allowing(
        SolveParameters::default(),
        &victim_parts(),
        &[Buyer::ANaiveCollector],
    );
    let solution = solved(&params);

    assert_well_formed(&solution, &params);
    assert_eq!(solution.declaration, Declaration::Humanoid);
    assert_eq!(solution.buyer, Buyer::ANaiveCollector);
    assert_eq!(solution.value, 500);
    assert_eq!(solution.primary_revenue, 500);
    assert_eq!(solution.secondary_revenue, 0);
    assert_eq!(solution.cost, 2000);
    assert_eq!(solution.net_profit, -1500);
    assert_eq!(solution.profit_margin, -30000);
}

/// A Skeleton with Seven Necks capped with victim skulls, whose only freedom
/// is the buyer.
fn seven_necks_parts() -> Vec<ActionKey> {
    vec![
        ActionKey::Torso(Torso::SkeletonWithSevenNecks),
        ActionKey::Skull(Skull::VictimSkull),
        ActionKey::Appendage(Appendage::HumanArm),
        ActionKey::Declaration(Declaration::Chimera),
    ]
}

#[test]
fn test_exhaustion_cap_turns_away_an_exhausting_buyer() {
    let buyers = [Buyer::ANaiveCollector, Buyer::AnEnthusiastInSkulls];

    let uncapped = allowing(SolveParameters::default(), &seven_necks_parts(), &buyers);
    let solution = solved(&uncapped);
    assert_well_formed(&solution, &uncapped);
    assert_eq!(solution.buyer, Buyer::AnEnthusiastInSkulls);
    // Seven skulls: round(6^1.8) = 25 vital intelligence, a quarter of it exhaustion.
    assert_eq!(solution.secondary_revenue, 1250 * 25);
    assert_eq!(solution.exhaustion, 6);

    let capped = allowing(
        SolveParameters {
            maximum_exhaustion: 5,
            ..Default::default()
        },
        &seven_necks_parts(),
        &buyers,
    );
    let solution = solved(&capped);
    assert_well_formed(&solution, &capped);
    assert_eq!(solution.buyer, Buyer::ANaiveCollector);
    assert_eq!(solution.exhaustion, 0);

    let only_exhausting = allowing(
        SolveParameters {
            maximum_exhaustion: 5,
            ..Default::default()
        },
        &seven_necks_parts(),
        &[Buyer::AnEnthusiastInSkulls],
    );
    assert!(matches!(
        solve(&only_exhausting, None),
        Err(BoneMarketError::NoSatisfactorySkeleton)
    ));
}

#[test]
fn test_exhaustion_cap_turns_away_an_exhausting_part() {
    let parts = vec![
        ActionKey::Torso(Torso::VictimSkeleton),
        ActionKey::Skull(Skull::VictimSkull),
        ActionKey::Skull(Skull::EngravedSkull),
    ];
    let buyers = [Buyer::ANaiveCollector];

    let uncapped = allowing(SolveParameters::default(), &parts, &buyers);
    let solution = solved(&uncapped);
    assert_well_formed(&solution, &uncapped);
    assert!(solution.steps.iter().any(|s| s.action == ActionKey::Skull(Skull::EngravedSkull)));
    assert_eq!(solution.exhaustion, 2);

    let capped_params = SolveParameters {
        maximum_exhaustion: 1,
        ..Default::default()
    };
    let capped = allowing(capped_params.clone(), &parts, &buyers);
    let solution = solved(&capped);
    assert_well_formed(&solution, &capped);
    assert!(solution.steps.iter().any(|s| s.action == ActionKey::Skull(Skull::VictimSkull)));
    assert_eq!(solution.exhaustion, 0);
    assert_eq!(solution.profit_margin, -30000);

    let engraved_only = allowing(
        capped_params,
        &[
            ActionKey::Torso(Torso::VictimSkeleton),
            ActionKey::Skull(Skull::EngravedSkull),
        ],
        &buyers,
    );
    assert!(matches!(
        solve(&engraved_only, None),
        Err(BoneMarketError::NoSatisfactorySkeleton)
    ));
}

#[test]
fn test_blacklisting_every_buyer_finds_nothing() {
    let params = SolveParameters {
        blacklist: Buyer::ALL.iter().map(|b| ActionKey::Buyer(*b)).collect(),
        ..Default::default()
    };

    let err = solve(&params, None).unwrap_err();
    assert!(matches!(err, BoneMarketError::NoSatisfactorySkeleton), "{err}");
}

#[test]
fn test_antiquity_fluctuation_raises_secondary_revenue() {
    let run = |fluctuation: Option<Fluctuation>| {
        let params = allowing(
            SolveParameters {
                bone_market_fluctuations: fluctuation,
                ..Default::default()
            },
            &horned_parts(),
            &[Buyer::AnEnthusiastOfTheAncientWorld],
        );
        let solution = solved(&params);
        assert_well_formed(&solution, &params);
        solution
    };

    let calm = run(None);
    let boosted = run(Some(Fluctuation::Antiquity));

    assert_eq!(calm.value, boosted.value);
    assert_eq!(calm.antiquity, 1);
    assert_eq!(calm.secondary_revenue, 250);
    assert_eq!(boosted.secondary_revenue, calm.secondary_revenue + 250);
    assert!(boosted.beats(&calm));
}

#[test]
fn test_cost_cap_is_respected() {
    let base = allowing(
        SolveParameters::default(),
        &victim_parts(),
        &[Buyer::ANaiveCollector],
    );

    let exact = SolveParameters {
        maximum_cost: 2000,
        ..base.clone()
    };
    assert_eq!(solved(&exact).cost, 2000);

    let short = SolveParameters {
        maximum_cost: 1999,
        ..base
    };
    assert!(matches!(
        solve(&short, None),
        Err(BoneMarketError::NoSatisfactorySkeleton)
    ));
}

#[test]
fn test_buyer_choice_picks_the_better_margin() {
    let params = allowing(
        SolveParameters::default(),
        &horned_parts(),
        &[Buyer::ANaiveCollector, Buyer::AnEnthusiastOfTheAncientWorld],
    );
    let solution = solved(&params);

    assert_well_formed(&solution, &params);
    assert_eq!(solution.buyer, Buyer::AnEnthusiastOfTheAncientWorld);
}

#[test]
fn test_invalid_parameters_are_rejected_before_solving() {
    let params = SolveParameters {
        shadowy_level: -5,
        ..Default::default()
    };
    assert!(matches!(
        solve(&params, None),
        Err(BoneMarketError::InvalidInput(_))
    ));
}

#[test]
fn test_parameter_file_drives_a_solve() {
    let params = allowing(
        SolveParameters {
            workers: Some(1),
            ..Default::default()
        },
        &victim_parts(),
        &[Buyer::ANaiveCollector],
    );

    let file = NamedTempFile::new().unwrap();
    save_parameters(file.path(), &params).unwrap();
    let loaded = load_parameters(file.path()).unwrap();

    assert_eq!(loaded, params);
    assert_eq!(solved(&loaded), solved(&params));
}

#[test]
fn test_full_catalog_for_one_buyer() {
    let params = SolveParameters {
        desired_buyers: vec![Buyer::ANaiveCollector],
        time_limit: Some(300.0),
        workers: Some(1),
        ..Default::default()
    };
    let outcome = solve(&params, None).expect("a skeleton should exist");

    assert!(matches!(
        outcome.status,
        SolveStatus::Optimal | SolveStatus::Feasible
    ));
    assert_well_formed(&outcome.solution, &params);
    assert_eq!(outcome.solution.buyer, Buyer::ANaiveCollector);
    assert!(outcome.solution.net_profit > 0);

    if outcome.status == SolveStatus::Optimal {
        let narrow = allowing(
            SolveParameters::default(),
            &[
                ActionKey::Torso(Torso::VictimSkeleton),
                ActionKey::Skull(Skull::VictimSkull),
                ActionKey::Skull(Skull::EngravedSkull),
            ],
            &[Buyer::ANaiveCollector],
        );
        assert!(!solved(&narrow).beats(&outcome.solution));
    }
}

#[test]
fn test_tiny_time_limit_is_not_reported_as_optimal() {
    let params = SolveParameters {
        desired_buyers: vec![Buyer::ANaiveCollector],
        time_limit: Some(0.001),
        workers: Some(1),
        ..Default::default()
    };

    match solve(&params, None) {
        Ok(outcome) => {
            assert_eq!(outcome.status, SolveStatus::Feasible);
            assert_well_formed(&outcome.solution, &params);
        }
        Err(BoneMarketError::UnexpectedStatus(message)) => {
            assert!(message.starts_with("UNKNOWN"), "{message}");
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
}
