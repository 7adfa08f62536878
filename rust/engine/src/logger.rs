use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::duel::Duel;
use crate::rules::RoundReport;
use crate::side::Side;

/// Complete record of a concluded duel.
/// Serialized to JSONL format for duel history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DuelRecord {
    /// Unique identifier for this duel (format: YYYYMMDD-NNNNNN)
    pub duel_id: String,
    /// Seed the duel's random source was built from, when known
    pub seed: Option<u64>,
    pub player_cards: Vec<Card>,
    pub machine_cards: Vec<Card>,
    /// Resolved rounds in order
    pub rounds: Vec<RoundReport>,
    pub player_score: u8,
    pub machine_score: u8,
    /// `None` for a drawn duel
    pub winner: Option<Side>,
    /// Timestamp when the duel was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl DuelRecord {
    /// Snapshot a duel. Returns `None` until the duel has concluded.
    pub fn from_duel(duel_id: String, seed: Option<u64>, duel: &Duel) -> Option<Self> {
        let result = duel.result()?;
        Some(Self {
            duel_id,
            seed,
            player_cards: duel.cards(Side::Player).to_vec(),
            machine_cards: duel.cards(Side::Machine).to_vec(),
            rounds: duel.history().to_vec(),
            player_score: result.player_score,
            machine_score: result.machine_score,
            winner: result.winner,
            ts: None,
        })
    }
}

pub fn format_duel_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct DuelLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl DuelLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_duel_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &DuelRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
