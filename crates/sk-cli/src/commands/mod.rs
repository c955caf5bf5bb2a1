pub mod combat;
pub mod encounter;
pub mod rules;
pub mod xp;

use colored::{ColoredString, Colorize};
use sk_mechanics::Difficulty;

/// Difficulty label in upper case, colored by severity.
fn difficulty_label(difficulty: Difficulty) -> ColoredString {
    let label = difficulty.to_string().to_uppercase();
    match difficulty {
        Difficulty::Trivial => label.dimmed(),
        Difficulty::Low => label.green(),
        Difficulty::Moderate => label.yellow(),
        Difficulty::Severe => label.red(),
        Difficulty::Extreme => label.red().bold(),
    }
}
