//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed options, the resolved [`Config`] where it
//! needs one, and the output streams, and returns `Result<(), CliError>`.

pub mod cards;
pub mod cfg;
pub mod doctor;
pub mod play;
pub mod rules;
pub mod sim;

pub use cards::handle_cards_command;
pub use cfg::handle_cfg_command;
pub use doctor::handle_doctor_command;
pub use play::{PlayOptions, handle_play_command};
pub use rules::handle_rules_command;
pub use sim::handle_sim_command;

use duelist_catalog::client::CardFetcher;
use duelist_catalog::source::HttpCatalog;

use crate::config::Config;

/// Card fetcher talking to the configured catalog. Fallback draws use `seed`.
pub(crate) fn http_fetcher(cfg: &Config, seed: u64) -> CardFetcher<HttpCatalog> {
    let source = HttpCatalog::new(cfg.catalog_url.clone(), cfg.request_timeout());
    CardFetcher::with_seed(source, cfg.retry_policy(), seed)
}
