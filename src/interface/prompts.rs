use std::fmt::Display;

use dialoguer::{Confirm, Input, Select};

use crate::catalog::{ActionKey, Declaration, DiplomatFascination, Fluctuation, OccasionalBuyer};
use crate::error::{BoneMarketError, Result};
use crate::solver::SolveParameters;

/// Prompt for the Shadowy skill level.
pub fn prompt_shadowy_level(default: i64) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt("What is your Shadowy level?")
        .default(default.to_string())
        .interact_text()?;

    let level: i64 = input
        .trim()
        .parse()
        .map_err(|_| BoneMarketError::InvalidInput("Invalid number".to_string()))?;

    if level <= 0 {
        return Err(BoneMarketError::InvalidInput(
            "Shadowy level must be positive".to_string(),
        ));
    }

    Ok(level)
}

/// Offer "None" followed by every member; returns the chosen member, if any.
fn select_optional<T: Copy + Display + PartialEq>(
    prompt: &str,
    members: &[T],
    current: Option<T>,
) -> Result<Option<T>> {
    let mut options = vec!["None".to_string()];
    options.extend(members.iter().map(|m| m.to_string()));

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&options)
        .default(
            current
                .and_then(|c| members.iter().position(|m| *m == c))
                .map_or(0, |i| i + 1),
        )
        .interact()?;

    Ok(selection.checked_sub(1).map(|i| members[i]))
}

pub fn prompt_fluctuation(current: Option<Fluctuation>) -> Result<Option<Fluctuation>> {
    select_optional(
        "Which Bone Market fluctuation is active?",
        Fluctuation::ALL,
        current,
    )
}

pub fn prompt_zoological_mania(current: Option<Declaration>) -> Result<Option<Declaration>> {
    select_optional(
        "Which Zoological Mania is in effect?",
        Declaration::ALL,
        current,
    )
}

pub fn prompt_occasional_buyer(
    current: Option<OccasionalBuyer>,
) -> Result<Option<OccasionalBuyer>> {
    select_optional(
        "Which occasional buyer is visiting?",
        OccasionalBuyer::ALL,
        current,
    )
}

pub fn prompt_diplomat_fascination(
    current: Option<DiplomatFascination>,
) -> Result<Option<DiplomatFascination>> {
    select_optional(
        "What is the Trifling Diplomat interested in?",
        DiplomatFascination::ALL,
        current,
    )
}

/// Prompt for actions to forbid, correcting near-misses.
pub fn prompt_blacklist() -> Result<Vec<ActionKey>> {
    let mut blacklist = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Blacklist an action, e.g. Skull.VAKE_SKULL (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        match input.parse::<ActionKey>() {
            Ok(key) => {
                blacklist.push(key);
                println!("Blacklisted: {}", key);
            }
            Err(BoneMarketError::UnknownAction {
                suggestion: Some(suggestion),
                ..
            }) => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", suggestion))
                    .default(true)
                    .interact()?;

                if confirm {
                    let key: ActionKey = suggestion.parse()?;
                    blacklist.push(key);
                    println!("Blacklisted: {}", key);
                }
            }
            Err(_) => println!("No matching action found for '{}'", input),
        }
    }

    Ok(blacklist)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn prompt_path(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

/// Ask for the world qualities, starting from `params`.
pub fn collect_parameters(params: SolveParameters) -> Result<SolveParameters> {
    let shadowy_level = prompt_shadowy_level(params.shadowy_level)?;
    let bone_market_fluctuations = prompt_fluctuation(params.bone_market_fluctuations)?;
    let zoological_mania = prompt_zoological_mania(params.zoological_mania)?;
    let occasional_buyer = prompt_occasional_buyer(params.occasional_buyer)?;
    let diplomat_fascination = prompt_diplomat_fascination(params.diplomat_fascination)?;

    let mut blacklist = params.blacklist;
    blacklist.extend(prompt_blacklist()?);

    Ok(SolveParameters {
        shadowy_level,
        bone_market_fluctuations,
        zoological_mania,
        occasional_buyer,
        diplomat_fascination,
        blacklist,
        ..params
    })
}
