//! `dbup version` — show version information.

use anyhow::Result;

/// Run `dbup version`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "name": "dbup",
                "version": version,
            }))?
        );
    } else {
        println!("dbup {version}");
    }
    Ok(())
}
