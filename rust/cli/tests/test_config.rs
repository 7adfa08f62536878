use duelist_cli::config::{self, ValueSource};
use duelist_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "DUELIST_CONFIG",
    "DUELIST_SEED",
    "DUELIST_OFFLINE",
    "DUELIST_CATALOG_URL",
    "DUELIST_MAX_ATTEMPTS",
    "DUELIST_BACKOFF_MS",
    "DUELIST_PACE_MS",
];

/// Clears every config variable, applies `pairs`, and restores on drop.
struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

fn config_file(body: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f
}

fn cfg_json() -> (i32, Value, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["duelist", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    let _env = EnvGuard::apply(&[]);
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["max_attempts"]["value"], 5);
    assert_eq!(json["max_attempts"]["source"], "default");
    assert_eq!(json["backoff_ms"]["value"], 800);
    assert_eq!(json["pace_ms"]["value"], 500);
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn file_values_are_tagged_file() {
    let file = config_file("seed = 9\noffline = true\nmax_attempts = 2\n");
    let _env = EnvGuard::apply(&[("DUELIST_CONFIG", file.path().to_str().unwrap())]);
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(9));
    assert!(resolved.config.offline);
    assert_eq!(resolved.config.max_attempts, 2);
    assert_eq!(resolved.sources.seed, ValueSource::File);
    assert_eq!(resolved.sources.offline, ValueSource::File);
    assert_eq!(resolved.sources.pace_ms, ValueSource::Default);
}

#[test]
#[serial]
fn env_overrides_file() {
    let file = config_file("seed = 9\npace_ms = 100\n");
    let _env = EnvGuard::apply(&[
        ("DUELIST_CONFIG", file.path().to_str().unwrap()),
        ("DUELIST_SEED", "77"),
        ("DUELIST_OFFLINE", "yes"),
    ]);
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"], 77);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["offline"]["value"], true);
    assert_eq!(json["pace_ms"]["value"], 100);
    assert_eq!(json["pace_ms"]["source"], "file");
}

#[test]
#[serial]
fn invalid_env_value_fails_cfg() {
    let _env = EnvGuard::apply(&[("DUELIST_MAX_ATTEMPTS", "0")]);
    let (code, _, err) = cfg_json();
    assert_eq!(code, 2);
    assert!(err.contains("max_attempts must be >=1"));
}

#[test]
#[serial]
fn unparsable_bool_is_rejected() {
    let _env = EnvGuard::apply(&[("DUELIST_OFFLINE", "sometimes")]);
    assert!(matches!(
        config::load(),
        Err(config::ConfigError::Invalid(ref m)) if m == "Invalid offline"
    ));
}

#[test]
#[serial]
fn unknown_file_key_is_a_parse_error() {
    let file = config_file("level = 3\n");
    let _env = EnvGuard::apply(&[("DUELIST_CONFIG", file.path().to_str().unwrap())]);
    assert!(matches!(
        config::load(),
        Err(config::ConfigError::Parse(_))
    ));
}

#[test]
#[serial]
fn env_seed_drives_sim() {
    let _env = EnvGuard::apply(&[("DUELIST_SEED", "5")]);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["duelist", "sim", "--duels", "2"], &mut out, &mut err);
    assert_eq!(code, 0);
    assert!(String::from_utf8_lossy(&out).contains("(seed=5)"));
}

#[test]
#[serial]
fn bad_config_does_not_block_rules() {
    let _env = EnvGuard::apply(&[("DUELIST_SEED", "not-a-number")]);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(run(["duelist", "rules"], &mut out, &mut err), 0);
    assert_eq!(run(["duelist", "sim", "--duels", "1"], &mut out, &mut err), 2);
    assert!(String::from_utf8_lossy(&err).contains("Invalid seed"));
}
