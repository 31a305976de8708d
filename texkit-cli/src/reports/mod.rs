//! Report data structures for commands.
//!
//! Operations build reports, commands render them to an `Output`.

mod bake;
mod check;
mod output;

pub use bake::BakeReport;
pub use check::{CheckReport, UnitEntry};
pub use output::{Report, TerminalOutput};
