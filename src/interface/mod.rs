pub mod prompts;
pub mod render;

pub use prompts::{
    collect_parameters, prompt_blacklist, prompt_diplomat_fascination, prompt_fluctuation,
    prompt_occasional_buyer, prompt_path, prompt_shadowy_level, prompt_yes_no,
    prompt_zoological_mania,
};
pub use render::{
    display_categories, display_outcome, display_progress, format_margin, format_pounds,
    render_solution,
};
