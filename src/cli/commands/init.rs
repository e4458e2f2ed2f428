//! Init Command
//!
//! Create the store file and its tables at the configured location.

use std::path::Path;

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::storage::get_session_headers;
use crate::types::Result;

pub fn run(config_file: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let output = Output::new();

    let location = ctx
        .db
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    output.success(&format!("Store ready at {}", location));

    for (key, table) in ctx.config.tables.entries() {
        println!("  {:<16} {}", key, table);
    }
    tracing::debug!("Session columns: {:?}", get_session_headers(&ctx.db)?);

    Ok(())
}
