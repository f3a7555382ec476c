//! Writers for the event table and the run summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::counter::{CountEvent, CountReport, LaneId, TrackId};
use crate::error::ExportError;

/// Row layout of the event table.
#[derive(Debug, Serialize)]
struct EventRow {
    #[serde(rename = "VehicleID")]
    vehicle_id: TrackId,
    #[serde(rename = "LaneNumber")]
    lane_number: LaneId,
    #[serde(rename = "Frame")]
    frame: u64,
    #[serde(rename = "Timestamp")]
    timestamp: f64,
}

impl From<&CountEvent> for EventRow {
    fn from(event: &CountEvent) -> Self {
        Self {
            vehicle_id: event.track_id,
            lane_number: event.lane_id,
            frame: event.frame_index,
            timestamp: event.timestamp_seconds,
        }
    }
}

/// Write one row per event, in log order, under the header
/// `VehicleID,LaneNumber,Frame,Timestamp`.
pub fn write_events_csv<W: Write>(events: &[CountEvent], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["VehicleID", "LaneNumber", "Frame", "Timestamp"])?;
    for event in events {
        wtr.serialize(EventRow::from(event))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_events_csv(events: &[CountEvent], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_events_csv(events, BufWriter::new(file))
}

/// Pretty-printed JSON of the per-lane totals and the event log.
pub fn write_summary_json<W: Write>(report: &CountReport, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn save_summary_json(report: &CountReport, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_summary_json(report, BufWriter::new(file))
}
