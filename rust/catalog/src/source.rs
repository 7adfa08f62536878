use std::time::Duration;

use duelist_engine::cards::{is_absolute_http_url, is_monster_category, Card};
use serde_json::Value;
use tracing::debug;

use crate::errors::FetchError;

pub const DEFAULT_CATALOG_URL: &str = "https://db.ygoprodeck.com/api/v7/randomcard.php";
pub const IMAGE_HOST: &str = "https://images.ygoprodeck.com/images/cards/";
pub const USER_AGENT: &str = concat!("duelist/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Monster(Card),
    /// The catalog answered with something that cannot be played.
    Discarded { name: String, category: String },
}

/// A remote source of random cards.
pub trait RemoteCatalog {
    fn fetch_random(&mut self) -> Result<Fetched, FetchError>;

    /// Cheap reachability check.
    fn probe(&mut self) -> bool;
}

pub struct HttpCatalog {
    agent: ureq::Agent,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteCatalog for HttpCatalog {
    fn fetch_random(&mut self) -> Result<Fetched, FetchError> {
        let resp = self
            .agent
            .get(&self.url)
            .set("Accept", "application/json")
            .call()
            .map_err(classify)?;
        let body = resp
            .into_string()
            .map_err(|e| FetchError::Payload(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(FetchError::Payload("empty response".into()));
        }
        let json: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))?;
        Ok(parse_card(&json))
    }

    fn probe(&mut self) -> bool {
        match self.agent.head(&self.url).timeout(PROBE_TIMEOUT).call() {
            Ok(resp) => resp.status() == 200,
            Err(e) => {
                debug!(error = %e, "catalog probe failed");
                false
            }
        }
    }
}

fn classify(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(status, _) => FetchError::Http { status },
        ureq::Error::Transport(t) => {
            let msg = t.to_string();
            match t.kind() {
                ureq::ErrorKind::Io if msg.contains("timed out") => FetchError::Timeout(msg),
                ureq::ErrorKind::Io
                | ureq::ErrorKind::Dns
                | ureq::ErrorKind::ConnectionFailed => FetchError::Connect(msg),
                _ => FetchError::Payload(msg),
            }
        }
    }
}

/// Build a card from a catalog payload, or explain why it was discarded.
pub fn parse_card(json: &Value) -> Fetched {
    let name = text(json, "name");
    let category = text(json, "type");
    if !is_monster_category(&category) {
        return Fetched::Discarded { name, category };
    }
    let offense = parse_stat(json.get("atk"));
    let defense = parse_stat(json.get("def"));
    let artwork = parse_artwork(json);
    Fetched::Monster(Card::new(name, offense, defense, artwork, category))
}

fn text(json: &Value, field: &str) -> String {
    json.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Integers pass through; numeric strings are parsed; `"?"`, missing and
/// anything else count as 0.
pub fn parse_stat(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

const IMAGE_FIELDS: [&str; 3] = ["image_url", "image_url_cropped", "image_url_small"];
const DIRECT_IMAGE_FIELDS: [&str; 3] = ["card_image", "image_url", "image_url_cropped"];

/// First usable image reference, in catalog preference order.
pub fn parse_artwork(json: &Value) -> String {
    let first_image = json
        .get("card_images")
        .and_then(Value::as_array)
        .and_then(|imgs| imgs.first());
    if let Some(img) = first_image {
        if let Some(url) = first_nonempty(img, &IMAGE_FIELDS) {
            return fix_artwork_url(url);
        }
    }
    if let Some(url) = first_nonempty(json, &DIRECT_IMAGE_FIELDS) {
        return fix_artwork_url(url);
    }
    let id = match json.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    if id.is_empty() {
        debug!("no artwork in catalog payload");
        return String::new();
    }
    format!("{}{}.jpg", IMAGE_HOST, id)
}

fn first_nonempty<'a>(json: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| json.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Protocol-relative references get `https:`; bare image file names are
/// rooted at the image host.
pub fn fix_artwork_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if !is_absolute_http_url(url) && (url.ends_with(".jpg") || url.ends_with(".png")) {
        return format!("{}{}", IMAGE_HOST, url);
    }
    url.to_string()
}
