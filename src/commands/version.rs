//! `tvo-installer version`

use anyhow::Result;

/// Print the version line.
///
/// # Errors
///
/// Never fails; the `Result` keeps the handler signature uniform.
pub fn run() -> Result<()> {
    println!("tvo-installer {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
