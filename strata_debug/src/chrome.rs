// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::scheduler::PaceDecision;
use strata_core::trace::{Lifecycle, QueueOp};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Pacing sleeps become complete (`"X"`) events spanning the sleep; all other
/// events are instants. Queue operations, teardown, and errors carry no
/// timestamp of their own and are placed at the most recent timestamp seen
/// in the recording.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_us = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::QueueOp(e) => {
                let (name, position) = match e.op {
                    QueueOp::Appended => ("Append", None),
                    QueueOp::Removed => ("Remove", None),
                    QueueOp::Moved { position } => ("Move", Some(position)),
                    QueueOp::Cleared => ("Clear", None),
                };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Queue",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "entry": e.entry.map(|id| id.index()),
                        "position": position,
                        "len": e.len,
                    }
                }));
            }
            RecordedEvent::EntryFreed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Freed",
                    "cat": "Queue",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "index": e.index,
                        "total": e.total,
                        "kind": format!("{:?}", e.kind),
                    }
                }));
            }
            RecordedEvent::Pace(e) => {
                let ts = nanos_to_us(e.now.nanos());
                last_us = ts;
                match e.decision {
                    PaceDecision::Sleep(d) => {
                        events.push(json!({
                            "ph": "X",
                            "name": "Sleep",
                            "cat": "Pacer",
                            "ts": ts,
                            "dur": nanos_to_us(d.nanos()),
                            "pid": 0,
                            "tid": 0,
                            "args": {
                                "frame_index": e.frame_index,
                            }
                        }));
                        last_us = ts + nanos_to_us(d.nanos());
                    }
                    decision => {
                        let elapsed_us = match decision {
                            PaceDecision::Overrun { elapsed } => Some(nanos_to_us(elapsed.nanos())),
                            _ => None,
                        };
                        events.push(json!({
                            "ph": "i",
                            "name": "Pace",
                            "cat": "Pacer",
                            "ts": ts,
                            "pid": 0,
                            "tid": 0,
                            "s": "t",
                            "args": {
                                "frame_index": e.frame_index,
                                "decision": decision_name(decision),
                                "elapsed_us": elapsed_us,
                            }
                        }));
                    }
                }
            }
            RecordedEvent::Present(e) => {
                let ts = nanos_to_us(e.timestamp.nanos());
                last_us = ts;
                events.push(json!({
                    "ph": "i",
                    "name": "Present",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "draw_calls": e.draw_calls,
                    }
                }));
            }
            RecordedEvent::Error(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Error",
                    "cat": "Error",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "kind": format!("{:?}", e.error),
                        "message": e.error.to_string(),
                    }
                }));
            }
            RecordedEvent::Lifecycle(e) => {
                let ts = nanos_to_us(e.timestamp.nanos());
                last_us = ts;
                events.push(json!({
                    "ph": "i",
                    "name": match e.phase {
                        Lifecycle::Started => "Started",
                        Lifecycle::ShutDown => "ShutDown",
                    },
                    "cat": "Lifecycle",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {}
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn decision_name(decision: PaceDecision) -> &'static str {
    match decision {
        PaceDecision::Uncapped => "Uncapped",
        PaceDecision::AlreadyPaced => "AlreadyPaced",
        PaceDecision::Sleep(_) => "Sleep",
        PaceDecision::Overrun { .. } => "Overrun",
    }
}

fn nanos_to_us(nanos: u64) -> f64 {
    nanos as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use strata_core::Error;
    use strata_core::queue::EntryId;
    use strata_core::time::{Duration, HostTime};
    use strata_core::trace::{
        ErrorEvent, LifecycleEvent, PaceEvent, PresentEvent, QueueOpEvent, TraceSink,
    };

    fn exported(rec: &RecorderSink) -> Vec<Value> {
        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json = String::from_utf8(out).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_lifecycle(&LifecycleEvent {
            phase: Lifecycle::Started,
            timestamp: HostTime(0),
        });
        rec.on_pace(&PaceEvent {
            frame_index: 0,
            now: HostTime(1_000_000),
            decision: PaceDecision::Sleep(Duration(15_000_000)),
        });
        rec.on_present(&PresentEvent {
            frame_index: 0,
            timestamp: HostTime(17_000_000),
            draw_calls: 2,
        });

        let arr = exported(&rec);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["name"], "Started");
        assert_eq!(arr[1]["ph"], "X");
        assert_eq!(arr[1]["ts"], 1000.0);
        assert_eq!(arr[1]["dur"], 15000.0);
        assert_eq!(arr[2]["name"], "Present");
        assert_eq!(arr[2]["args"]["draw_calls"], 2);
    }

    #[test]
    fn untimed_events_use_latest_timestamp() {
        let mut rec = RecorderSink::new();
        rec.on_present(&PresentEvent {
            frame_index: 4,
            timestamp: HostTime(2_000_000),
            draw_calls: 0,
        });
        rec.on_queue_op(&QueueOpEvent {
            frame_index: 5,
            op: QueueOp::Moved { position: 1 },
            entry: Some(EntryId::from_raw(2, 0)),
            len: 3,
        });
        rec.on_error(&ErrorEvent {
            frame_index: 5,
            error: Error::EntryNotFound,
        });

        let arr = exported(&rec);
        assert_eq!(arr[1]["name"], "Move");
        assert_eq!(arr[1]["ts"], 2000.0);
        assert_eq!(arr[1]["args"]["position"], 1);
        assert_eq!(arr[1]["args"]["entry"], 2);
        assert_eq!(arr[2]["cat"], "Error");
        assert_eq!(arr[2]["ts"], 2000.0);
        assert_eq!(arr[2]["args"]["kind"], "EntryNotFound");
    }

    #[test]
    fn overrun_is_an_instant() {
        let mut rec = RecorderSink::new();
        rec.on_pace(&PaceEvent {
            frame_index: 1,
            now: HostTime(3_000),
            decision: PaceDecision::Overrun {
                elapsed: Duration(20_000_000),
            },
        });
        let arr = exported(&rec);
        assert_eq!(arr[0]["ph"], "i");
        assert_eq!(arr[0]["args"]["decision"], "Overrun");
        assert_eq!(arr[0]["args"]["elapsed_us"], 20000.0);
    }

    #[test]
    fn empty_recording_exports_empty_array() {
        let rec = RecorderSink::new();
        assert!(exported(&rec).is_empty(), "no events");
    }
}
