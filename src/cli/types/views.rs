//! Selector enums for the `recalculate` and `stats` commands.
//!
//! [`Category`] belongs to the engine; the CLI only teaches clap to parse it.

use std::fmt;

pub use crate::engine::types::Category;

impl clap::ValueEnum for Category {
    fn value_variants<'a>() -> &'a [Self] {
        Category::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let help = match self {
            Category::All => "Everything",
            Category::Batting => "Batting lines, dismissal histogram and conversion rates",
            Category::Bowling => "Bowling lines",
            Category::Fielding => "Fielding lines",
            Category::Career => "The career-wide summary only",
        };
        Some(clap::builder::PossibleValue::new(self.as_str()).help(help))
    }
}

/// Which dashboard view the `stats` command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatsView {
    Career,
    Formats,
    Years,
    Opponents,
    Venues,
    HomeAway,
    Dismissals,
    Conversions,
}

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatsView::Career => "career",
            StatsView::Formats => "formats",
            StatsView::Years => "years",
            StatsView::Opponents => "opponents",
            StatsView::Venues => "venues",
            StatsView::HomeAway => "home-away",
            StatsView::Dismissals => "dismissals",
            StatsView::Conversions => "conversions",
        };
        write!(f, "{}", s)
    }
}
