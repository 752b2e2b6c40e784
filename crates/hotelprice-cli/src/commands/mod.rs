//! Command implementations for the CLI.

mod init;
mod inspect;
mod stats;

pub use init::cmd_init;
pub use inspect::{CHEAPEST_PER_CITY_LIMIT, InspectOutcome, RECENT_RECORDS_LIMIT, cmd_inspect};
pub use stats::cmd_stats;
