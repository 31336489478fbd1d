use clap::Parser;
use log::LevelFilter;

use bone_market_solver::catalog::Category;
use bone_market_solver::cli::{Cli, Command, SolveArgs};
use bone_market_solver::error::Result;
use bone_market_solver::interface::{
    collect_parameters, display_categories, display_outcome, display_progress, prompt_path,
    prompt_yes_no,
};
use bone_market_solver::persistence::{save_solution, write_actions_csv};
use bone_market_solver::solver::{Solution, SolveOutcome, SolveParameters, solve};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.solve.verbose);

    let command = cli.command.unwrap_or_default();

    match command {
        Command::Solve => cmd_solve(&cli.solve),
        Command::List { categories } => cmd_list(&categories),
        Command::Interactive => cmd_interactive(&cli.solve),
    }
}

/// `RUST_LOG` wins; otherwise warnings, or everything from this crate when verbose.
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    if verbose {
        builder.filter_module("bone_market_solver", LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.parse_default_env();
    builder.init();
}

/// Solve, streaming improvements to the terminal unless logging instead.
fn solve_and_show(params: &SolveParameters, verbose: bool) -> Result<SolveOutcome> {
    let mut count = 0;
    let mut show = |solution: &Solution| {
        count += 1;
        display_progress(count, solution);
    };

    let outcome = if verbose {
        solve(params, None)?
    } else {
        solve(params, Some(&mut show))?
    };

    display_outcome(&outcome);
    Ok(outcome)
}

fn save_outputs(args: &SolveArgs, outcome: &SolveOutcome) -> Result<()> {
    if let Some(path) = &args.json {
        save_solution(path, &outcome.solution)?;
        println!("Skeleton saved to {}.", path.display());
    }
    if let Some(path) = &args.csv {
        write_actions_csv(path, &outcome.solution)?;
        println!("Actions saved to {}.", path.display());
    }
    Ok(())
}

/// Find and print the most profitable skeleton.
fn cmd_solve(args: &SolveArgs) -> Result<()> {
    let params = args.parameters()?;
    let outcome = solve_and_show(&params, args.verbose)?;
    save_outputs(args, &outcome)
}

/// List enumeration members, or all enumerations when none are named.
fn cmd_list(categories: &[Category]) -> Result<()> {
    if categories.is_empty() {
        display_categories(Category::ALL);
    } else {
        display_categories(categories);
    }
    Ok(())
}

/// Ask for the world qualities, solve, and offer to save the result.
fn cmd_interactive(args: &SolveArgs) -> Result<()> {
    let params = collect_parameters(args.parameters()?)?;

    println!();
    println!(
        "Solving for Shadowy {}{}...",
        params.shadowy_level,
        match params.time_limit {
            Some(limit) => format!(" for up to {limit} seconds"),
            None => String::new(),
        }
    );

    let outcome = solve_and_show(&params, args.verbose)?;
    save_outputs(args, &outcome)?;

    if args.json.is_none() && prompt_yes_no("Save this skeleton?", false)? {
        let path = prompt_path("Save to", "skeleton.json")?;
        save_solution(&path, &outcome.solution)?;
        println!("Skeleton saved to {}.", path);
    }

    Ok(())
}
