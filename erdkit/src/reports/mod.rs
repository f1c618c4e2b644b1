//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an Output target.

mod check;
mod graph;
mod inspect;
mod list;
mod output;

pub use check::{CheckReport, UnresolvedInfo};
pub use graph::GraphReport;
pub use inspect::{FieldInfoRow, InspectReport};
pub use list::{ClassInfo, ListReport};
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub(crate) use output::tests::RecordingOutput;
