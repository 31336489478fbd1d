use crate::catalog::Category;
use crate::solver::{Solution, SolveOutcome, SolveStatus};

/// `1234567` -> `1,234,567`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `units` hundredths with two decimals, e.g. `-123456` -> `-1,234.56`.
fn hundredths(units: i64) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let magnitude = units.unsigned_abs();
    format!("{}{}.{:02}", sign, group_thousands(magnitude / 100), magnitude % 100)
}

/// Pennies as pounds, e.g. `-150000` -> `-1,500.00`.
pub fn format_pounds(pennies: i64) -> String {
    hundredths(pennies)
}

/// A scaled profit margin as a signed percentage, e.g. `-30000` -> `-300.00%`.
pub fn format_margin(profit_margin: i64) -> String {
    let sign = if profit_margin >= 0 { "+" } else { "" };
    format!("{}{}%", sign, hundredths(profit_margin))
}

/// The full report for a skeleton: its actions, then its profit and attributes.
pub fn render_solution(solution: &Solution) -> String {
    let mut lines: Vec<String> = solution.action_lines().map(str::to_string).collect();

    lines.push(String::new());
    lines.push(format!("Profit: {}", format_pounds(solution.net_profit)));
    lines.push(format!("Profit Margin: {}", format_margin(solution.profit_margin)));

    lines.push(String::new());
    lines.push(format!("Total Revenue: {}", format_pounds(solution.total_revenue)));
    lines.push(format!("Primary Revenue: {}", format_pounds(solution.primary_revenue)));
    lines.push(format!("Secondary Revenue: {}", format_pounds(solution.secondary_revenue)));

    lines.push(String::new());
    lines.push(format!("Cost: {}", format_pounds(solution.cost)));

    lines.push(String::new());
    lines.push(format!("Value: {}", format_pounds(solution.value)));
    lines.push(format!("Amalgamy: {}", solution.amalgamy));
    lines.push(format!("Antiquity: {}", solution.antiquity));
    lines.push(format!("Menace: {}", solution.menace));
    lines.push(format!("Counter-Church: {}", solution.counter_church));
    lines.push(format!("Implausibility: {}", solution.implausibility));

    lines.push(String::new());
    lines.push(format!("Exhaustion: {}", solution.exhaustion));

    lines.join("\n")
}

/// Print the final skeleton, warning if it may not be the best.
pub fn display_outcome(outcome: &SolveOutcome) {
    println!();
    println!("=== Skeleton ===");
    println!();
    println!("{}", render_solution(&outcome.solution));
    println!();

    if outcome.status == SolveStatus::Feasible {
        println!("WARNING: skeleton may be suboptimal.");
        println!();
    }
}

/// Print an improved skeleton while the search is still running.
pub fn display_progress(count: usize, solution: &Solution) {
    println!();
    println!("{}", render_solution(solution));
    println!();
    println!(
        "Skeleton #{} ({} to {})",
        count,
        format_margin(solution.profit_margin),
        solution.buyer
    );
}

/// Print every member of each category with the identifier used to name it.
pub fn display_categories(categories: &[Category]) {
    for category in categories {
        let members = category.members();

        println!();
        println!("=== {} ({} members) ===", category.title(), members.len());
        println!();

        let width = members.iter().map(|(ident, _)| ident.len()).max().unwrap_or(10);
        for (ident, description) in members {
            println!("  {:<width$}  {}", ident, description, width = width);
        }
    }
    println!();
}
