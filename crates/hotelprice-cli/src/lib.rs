//! Command-line interface for the hotel price store.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Create the `hotel_prices` table if it is missing |
//! | `inspect` | Survey every table and rank the cheapest prices per city |
//! | `stats` | Min, max and average price per city |
//! | `completions` | Generate shell completions |
//!
//! Every command works on the store selected with `--db`, which defaults to
//! `hotel_pricing.db` in the working directory.
//!
//! # Examples
//!
//! ```bash
//! hotelprice init
//! hotelprice --db data/prices.db inspect
//! hotelprice stats --city Paris --format json
//! ```

pub mod cli;
pub mod commands;
pub mod format;
