//! Environment diagnostics.
//!
//! Reports, as JSON, whether the configured card catalog answers and whether
//! the built-in fallback table can stand in for it.

use duelist_catalog::fallback::{FALLBACK_MONSTERS, FALLBACK_TABLE_VERSION, fallback_cards};
use duelist_catalog::source::{HttpCatalog, RemoteCatalog};

use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Represents a single diagnostic check result.
struct DoctorCheck {
    name: &'static str,
    ok: bool,
    detail: String,
    error: Option<String>,
}

impl DoctorCheck {
    fn ok(name: &'static str, detail: impl Into<String>) -> Self {
        DoctorCheck {
            name,
            ok: true,
            detail: detail.into(),
            error: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, error: impl Into<String>) -> Self {
        DoctorCheck {
            name,
            ok: false,
            detail: detail.into(),
            error: Some(error.into()),
        }
    }

    fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "status".into(),
            serde_json::Value::String(if self.ok { "ok" } else { "fail" }.into()),
        );
        map.insert(
            "detail".into(),
            serde_json::Value::String(self.detail.clone()),
        );
        if let Some(err) = &self.error {
            map.insert("error".into(), serde_json::Value::String(err.clone()));
        }
        serde_json::Value::Object(map)
    }
}

fn check_catalog(catalog: &mut dyn RemoteCatalog, url: &str, offline: bool) -> DoctorCheck {
    if offline {
        return DoctorCheck::ok("catalog", "skipped: offline mode");
    }
    if catalog.probe() {
        DoctorCheck::ok("catalog", format!("{} is reachable", url))
    } else {
        DoctorCheck::fail(
            "catalog",
            format!("probed {}", url),
            format!(
                "Catalog check failed: {} did not answer; duels will use fallback cards",
                url
            ),
        )
    }
}

fn check_fallback_table() -> DoctorCheck {
    let cards = fallback_cards();
    let broken: Vec<&str> = cards
        .iter()
        .filter(|c| !c.is_valid_monster() || !c.has_artwork())
        .map(|c| c.name())
        .collect();
    if broken.is_empty() {
        DoctorCheck::ok(
            "fallback_table",
            format!(
                "version {} with {} cards",
                FALLBACK_TABLE_VERSION,
                FALLBACK_MONSTERS.len()
            ),
        )
    } else {
        DoctorCheck::fail(
            "fallback_table",
            format!("version {}", FALLBACK_TABLE_VERSION),
            format!("Fallback check failed: unusable cards {:?}", broken),
        )
    }
}

pub fn handle_doctor_command(
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut catalog = HttpCatalog::new(cfg.catalog_url.clone(), cfg.request_timeout());
    run_checks(&mut catalog, cfg, out, err)
}

fn run_checks(
    catalog: &mut dyn RemoteCatalog,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let checks = vec![
        check_catalog(catalog, &cfg.catalog_url, cfg.offline),
        check_fallback_table(),
    ];

    let mut checks_map = serde_json::Map::new();
    let mut ok_all = true;
    for check in checks {
        if !check.ok {
            ok_all = false;
            if let Some(msg) = &check.error {
                ui::write_error(err, msg)?;
            }
        }
        checks_map.insert(check.name.to_string(), check.to_value());
    }

    let output = serde_json::json!({
        "checks": serde_json::Value::Object(checks_map)
    });
    let json_output = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize doctor report: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if ok_all {
        Ok(())
    } else {
        Err(CliError::Config(
            "Environment diagnostics failed".to_string(),
        ))
    }
}
