//! Init command - create the schema.

use std::io::Write;

use anyhow::Result;
use hotelprice_store::{Store, StoreConfig};
use tracing::error;

/// Execute the init command.
///
/// Store failures are printed rather than returned; only a failed write to
/// `out` is an error.
pub fn cmd_init(config: &StoreConfig, out: &mut impl Write) -> Result<()> {
    let path = &config.db_path;

    match Store::open(path) {
        Ok(_store) => {
            writeln!(out, "✅ Initialized schema in {}", path.display())?;
        }
        Err(e) => {
            let e = anyhow::Error::from(e);
            error!("Schema initialization failed: {:#}", e);
            writeln!(
                out,
                "❌ Failed to initialize schema in {}: {:#}",
                path.display(),
                e
            )?;
        }
    }

    Ok(())
}
