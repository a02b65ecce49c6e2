//! JSON-lines event log.
//!
//! Every [`BoardEvent`] drained from the controller becomes one line:
//!
//! ```text
//! {"seq":0,"tick":3,"event":"spawned","from":[1,1],"to":[1,2],"color":"red","durationMs":120}
//! ```
//!
//! The log is best effort. If the file cannot be opened the log is disabled
//! with a warning; a failed write disables it silently.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::types::{BoardEvent, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub seq: u64,
    pub tick: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<[i16; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<[i16; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<[i16; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
}

impl EventRecord {
    pub fn new(seq: u64, tick: u64, event: &BoardEvent) -> Self {
        let mut record = Self {
            seq,
            tick,
            event: event.as_str(),
            from: None,
            to: None,
            at: None,
            color: None,
            duration_ms: None,
        };
        match *event {
            BoardEvent::Spawned {
                from,
                to,
                color,
                duration_ms,
            }
            | BoardEvent::Moved {
                from,
                to,
                color,
                duration_ms,
            } => {
                record.from = Some(pair(from));
                record.to = Some(pair(to));
                record.color = Some(color.as_str());
                record.duration_ms = Some(duration_ms);
            }
            BoardEvent::Removed { at, color } => {
                record.at = Some(pair(at));
                record.color = Some(color.as_str());
            }
            BoardEvent::Swapped { a, b, duration_ms } => {
                record.from = Some(pair(a));
                record.to = Some(pair(b));
                record.duration_ms = Some(duration_ms);
            }
            BoardEvent::ResolutionRequested | BoardEvent::Settled => {}
        }
        record
    }
}

fn pair(c: Coord) -> [i16; 2] {
    [c.x, c.y]
}

/// Appends event records to a writer, one JSON object per line.
pub struct EventLog<W: Write> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, or a disabled log if that fails.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("[EventLog] Cannot open {}: {}; logging disabled", path.display(), e);
                Self::disabled()
            }
        }
    }

    /// [`EventLog::open`] when a path is configured.
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            Some(path) => Self::open(path),
            None => Self::disabled(),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far.
    pub fn written(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, tick: u64, event: &BoardEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &EventRecord::new(self.seq, tick, event)).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
            return;
        }
        self.seq += 1;
    }

    pub fn record_all(&mut self, tick: u64, events: &[BoardEvent]) {
        for event in events {
            self.record(tick, event);
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }

    /// Give back the writer, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn writes_one_line_per_event() {
        let mut log = EventLog::new(Vec::new());
        log.record_all(
            7,
            &[
                BoardEvent::Removed {
                    at: Coord::new(2, 3),
                    color: Color::Red,
                },
                BoardEvent::Settled,
            ],
        );
        assert_eq!(log.written(), 2);

        let bytes = log.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#"{"seq":0,"tick":7,"event":"removed","at":[2,3],"color":"red"}"#
        );
        assert_eq!(lines[1], r#"{"seq":1,"tick":7,"event":"settled"}"#);
    }

    #[test]
    fn moves_carry_duration() {
        let record = EventRecord::new(
            4,
            1,
            &BoardEvent::Moved {
                from: Coord::new(0, 1),
                to: Coord::new(0, 2),
                color: Color::Blue,
                duration_ms: 120,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["durationMs"], 120);
        assert_eq!(value["from"], serde_json::json!([0, 1]));
        assert_eq!(value["color"], "blue");
    }

    #[test]
    fn disabled_log_ignores_events() {
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        log.record(0, &BoardEvent::Settled);
        assert!(!log.is_enabled());
        assert_eq!(log.written(), 0);
    }
}
