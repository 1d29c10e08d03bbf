//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Dump the effective configuration as TOML.
pub fn dump<W: Write>(config: &ClientConfig, source: &Path, out: &mut W) -> ClientResult<()> {
    writeln!(out, "# config.toml ({})", source.display())?;
    write!(out, "{}", config.to_toml()?)?;
    Ok(())
}

/// Show the configuration file path.
pub fn path<W: Write>(source: &Path, out: &mut W) -> ClientResult<()> {
    writeln!(out, "config: {}", source.display())?;
    Ok(())
}
