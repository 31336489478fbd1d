use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::{
    ActionKey, Buyer, Category, Declaration, DiplomatFascination, Fluctuation, OccasionalBuyer,
};
use crate::error::Result;
use crate::persistence::load_parameters;
use crate::solver::SolveParameters;

/// Bone Market Solver: designs the skeleton with the best profit margin for the current market.
#[derive(Parser, Debug)]
#[command(name = "bone_market_solver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub solve: SolveArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub struct SolveArgs {
    /// Current Bone Market Fluctuations, which grant bonuses to certain buyers.
    #[arg(short = 'f', long, global = true, help_heading = "World qualities")]
    pub bone_market_fluctuations: Option<Fluctuation>,

    /// Current Zoological Mania, which adds a percentage to the value of one declaration.
    #[arg(short = 'm', long, global = true, help_heading = "World qualities")]
    pub zoological_mania: Option<Declaration>,

    /// Current Occasional Buyer, who is not otherwise available.
    #[arg(short = 'o', long, global = true, help_heading = "World qualities")]
    pub occasional_buyer: Option<OccasionalBuyer>,

    /// What the Trifling Diplomat is currently interested in.
    #[arg(short = 'd', long, global = true, help_heading = "World qualities")]
    pub diplomat_fascination: Option<DiplomatFascination>,

    /// Effective level of Shadowy used for selling to buyers.
    #[arg(short = 's', long = "shadowy", global = true, help_heading = "Skeleton parameters")]
    pub shadowy_level: Option<i64>,

    /// Buyer the skeleton should be designed for; repeat to choose among several.
    #[arg(
        short = 'b',
        long = "buyer",
        alias = "desired-buyer",
        num_args = 1..,
        global = true,
        help_heading = "Skeleton parameters"
    )]
    pub desired_buyers: Vec<Buyer>,

    /// Most pennies to invest in the skeleton.
    #[arg(short = 'c', long, alias = "cost", global = true, help_heading = "Skeleton parameters")]
    pub maximum_cost: Option<i64>,

    /// Most exhaustion the skeleton may generate.
    #[arg(short = 'e', long, alias = "exhaustion", global = true, help_heading = "Skeleton parameters")]
    pub maximum_exhaustion: Option<i64>,

    /// Actions the solver must not use.
    #[arg(
        long,
        value_name = "Category.MEMBER",
        num_args = 1..,
        global = true,
        help_heading = "Skeleton parameters"
    )]
    pub blacklist: Vec<ActionKey>,

    /// Log search progress instead of showing intermediate skeletons.
    #[arg(short = 'v', long, global = true, help_heading = "Solver options")]
    pub verbose: bool,

    /// Most seconds the solver runs for.
    #[arg(short = 't', long, global = true, help_heading = "Solver options")]
    pub time_limit: Option<f64>,

    /// Worker threads to search with (default: one per available CPU thread).
    #[arg(short = 'w', long, global = true, help_heading = "Solver options")]
    pub workers: Option<usize>,

    /// JSON file of parameters; flags given on the command line take precedence.
    #[arg(long, global = true, help_heading = "Files")]
    pub config: Option<PathBuf>,

    /// Save the skeleton as JSON.
    #[arg(long, global = true, help_heading = "Files")]
    pub json: Option<PathBuf>,

    /// Save the skeleton's actions as CSV.
    #[arg(long, global = true, help_heading = "Files")]
    pub csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the skeleton with the highest profit margin.
    Solve,

    /// List enumerations and the names of their members.
    List {
        /// Enumerations to list (default: all of them).
        categories: Vec<Category>,
    },

    /// Ask for the world qualities, then solve.
    Interactive,
}

impl Default for Command {
    fn default() -> Self {
        Command::Solve
    }
}

impl SolveArgs {
    /// Parameters from the config file, if any, overridden by these flags.
    pub fn parameters(&self) -> Result<SolveParameters> {
        let base = match &self.config {
            Some(path) => load_parameters(path)?,
            None => SolveParameters::default(),
        };
        Ok(self.apply(base))
    }

    /// Override `params` with every flag that was given.
    pub fn apply(&self, params: SolveParameters) -> SolveParameters {
        let mut blacklist = params.blacklist;
        for key in &self.blacklist {
            if !blacklist.contains(key) {
                blacklist.push(*key);
            }
        }

        SolveParameters {
            shadowy_level: self.shadowy_level.unwrap_or(params.shadowy_level),
            bone_market_fluctuations: self
                .bone_market_fluctuations
                .or(params.bone_market_fluctuations),
            zoological_mania: self.zoological_mania.or(params.zoological_mania),
            occasional_buyer: self.occasional_buyer.or(params.occasional_buyer),
            diplomat_fascination: self.diplomat_fascination.or(params.diplomat_fascination),
            desired_buyers: if self.desired_buyers.is_empty() {
                params.desired_buyers
            } else {
                self.desired_buyers.clone()
            },
            maximum_cost: self.maximum_cost.unwrap_or(params.maximum_cost),
            maximum_exhaustion: self.maximum_exhaustion.unwrap_or(params.maximum_exhaustion),
            time_limit: self.time_limit.or(params.time_limit),
            workers: self.workers.or(params.workers),
            blacklist,
            ..params
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Skull;
    use crate::persistence::save_parameters;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_subcommand_solves() {
        let cli = Cli::try_parse_from(["bone_market_solver", "-s", "200"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Solve));
        assert_eq!(cli.solve.shadowy_level, Some(200));
    }

    #[test]
    fn test_parse_world_and_skeleton_flags() {
        let cli = Cli::try_parse_from([
            "bone_market_solver",
            "solve",
            "-f",
            "ANTIQUITY",
            "-m",
            "fish",
            "-b",
            "A_NAIVE_COLLECTOR",
            "MRS_PLENTY",
            "--blacklist",
            "Skull.VAKE_SKULL",
            "Torso.HUMAN_RIBCAGE",
            "-t",
            "1.5",
            "-w",
            "2",
        ])
        .unwrap();

        let params = cli.solve.apply(SolveParameters::default());
        assert_eq!(params.bone_market_fluctuations, Some(Fluctuation::Antiquity));
        assert_eq!(params.zoological_mania, Some(Declaration::Fish));
        assert_eq!(params.desired_buyers, vec![Buyer::ANaiveCollector, Buyer::MrsPlenty]);
        assert_eq!(params.blacklist.len(), 2);
        assert_eq!(params.time_limit, Some(1.5));
        assert_eq!(params.workers, Some(2));
    }

    #[test]
    fn test_unknown_blacklist_entry_is_rejected() {
        let result = Cli::try_parse_from(["bone_market_solver", "--blacklist", "Skull.NOPE"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_categories() {
        let cli = Cli::try_parse_from(["bone_market_solver", "list", "Torso", "Buyer"]).unwrap();
        match cli.command {
            Some(Command::List { categories }) => {
                assert_eq!(categories, vec![Category::Torso, Category::Buyer])
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let stored = SolveParameters {
            shadowy_level: 120,
            maximum_cost: 5000,
            blacklist: vec![ActionKey::Skull(Skull::VakeSkull)],
            ..Default::default()
        };
        let file = NamedTempFile::new().unwrap();
        save_parameters(file.path(), &stored).unwrap();

        let args = SolveArgs {
            config: Some(file.path().to_path_buf()),
            maximum_cost: Some(9000),
            blacklist: vec![
                ActionKey::Skull(Skull::VakeSkull),
                ActionKey::Skull(Skull::HornedSkull),
            ],
            ..Default::default()
        };

        let params = args.parameters().unwrap();
        assert_eq!(params.shadowy_level, 120);
        assert_eq!(params.maximum_cost, 9000);
        assert_eq!(params.blacklist.len(), 2);
    }
}
