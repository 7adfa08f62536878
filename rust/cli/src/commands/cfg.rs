//! Configuration command handler.
//!
//! Prints every setting with the layer it came from:
//!
//! ```json
//! {
//!   "max_attempts": {
//!     "value": 5,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let json_str =
        serde_json::to_string_pretty(&to_json(&resolved)).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

fn to_json(resolved: &ConfigResolved) -> serde_json::Value {
    let ConfigResolved { config, sources } = resolved;
    serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "offline": { "value": config.offline, "source": sources.offline },
        "catalog_url": { "value": config.catalog_url, "source": sources.catalog_url },
        "max_attempts": { "value": config.max_attempts, "source": sources.max_attempts },
        "backoff_ms": { "value": config.backoff_ms, "source": sources.backoff_ms },
        "request_timeout_secs": {
            "value": config.request_timeout_secs,
            "source": sources.request_timeout_secs,
        },
        "pace_ms": { "value": config.pace_ms, "source": sources.pace_ms },
    })
}
