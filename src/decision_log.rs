//! Append-only CSV log of every decision the bot makes
//!
//! One row per decision tick. The header is written only when the target
//! file is empty, so restarts keep appending to the same dataset.

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    agent::FeatureVector,
    bot::{RoundStart, RoundSummary},
    error::{Error, Result},
    game_observer::GameObserver,
    protocol::PlayerId,
};

pub const HEADER: &str = "round_id,timestamp,diff,player_health,opponent_health,timer,\
player_attacking,opponent_attacking,has_round_started,is_round_over,action_idx,character_id";

/// A single decision, as written to the log
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRecord {
    pub round_id: u32,
    /// Unix seconds
    pub timestamp: f64,
    pub features: FeatureVector,
    pub action_idx: usize,
    pub character_id: String,
}

impl DecisionRecord {
    pub fn now(
        round_id: u32,
        features: FeatureVector,
        action_idx: usize,
        character_id: String,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        let timestamp = now.unix_timestamp() as f64 + now.nanosecond() as f64 / 1e9;
        Self {
            round_id,
            timestamp,
            features,
            action_idx,
            character_id,
        }
    }
}

/// Observer that appends decisions to a CSV file
pub struct CsvDecisionLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvDecisionLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(format!("open {}", path.display()), e))?;
        let empty = file
            .metadata()
            .map_err(|e| Error::io(format!("stat {}", path.display()), e))?
            .len()
            == 0;

        let mut writer = BufWriter::new(file);
        if empty {
            write_header(&mut writer)?;
            writer
                .flush()
                .map_err(|e| Error::io("flush decision log", e))?;
        }

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &DecisionRecord) -> Result<()> {
        write_record(&mut self.writer, record)?;
        self.writer
            .flush()
            .map_err(|e| Error::io("flush decision log", e))
    }
}

pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{HEADER}").map_err(|e| Error::io("write decision log header", e))
}

pub fn write_record<W: Write>(writer: &mut W, record: &DecisionRecord) -> Result<()> {
    let f = &record.features;
    writeln!(
        writer,
        "{},{:.6},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{},{}",
        record.round_id,
        record.timestamp,
        f[0],
        f[1],
        f[2],
        f[3],
        f[4],
        f[5],
        f[6],
        f[7],
        record.action_idx,
        record.character_id
    )
    .map_err(|e| Error::io("write decision log row", e))
}

impl GameObserver for CsvDecisionLog {
    fn on_game_start(&mut self, _player: PlayerId, _peer: &str) {
        info!("Logging decisions to {}", self.path.display());
    }

    fn on_round_start(&mut self, _start: &RoundStart) {}

    fn on_decision(&mut self, record: &DecisionRecord) {
        if let Err(e) = self.append(record) {
            warn!("Dropped decision row: {}", e);
        }
    }

    fn on_round_over(&mut self, _summary: &RoundSummary) {}

    fn on_game_finished(&mut self, _ticks: u64) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(action_idx: usize) -> DecisionRecord {
        DecisionRecord {
            round_id: 2,
            timestamp: 1_700_000_000.25,
            features: [0.5, 1.0, 0.75, 0.99, 1.0, 0.0, 1.0, 0.0],
            action_idx,
            character_id: "char_4".to_string(),
        }
    }

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fightbot-{}-{}.csv",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_record_format() {
        let mut out = Vec::new();
        write_record(&mut out, &record(3)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2,1700000000.250000,0.5,1.0,0.75,0.99,1.0,0.0,1.0,0.0,3,char_4\n"
        );
    }

    #[test]
    fn test_header_written_once() {
        let path = temp_log("header");

        let mut log = CsvDecisionLog::open(&path).unwrap();
        log.append(&record(0)).unwrap();
        drop(log);

        let mut log = CsvDecisionLog::open(&path).unwrap();
        log.on_decision(&record(4));
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].ends_with(",0,char_4"));
        assert!(lines[2].ends_with(",4,char_4"));
        assert_eq!(contents.matches("round_id").count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_timestamp_is_recent() {
        let record = DecisionRecord::now(0, [0.0; 8], 1, "char_0".to_string());
        // 2020-01-01
        assert!(record.timestamp > 1_577_836_800.0);
    }
}
