//! Feeding recorded tracker output through a counting engine.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::counter::{LaneCountingEngine, TrackId, TrackedFrame, TrackedObject};
use crate::error::CountingError;

/// Anything that yields tracked frames in order until it runs dry.
pub trait TrackSource {
    type Error;

    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, Self::Error>;
}

impl TrackSource for std::vec::IntoIter<TrackedFrame> {
    type Error = std::convert::Infallible;

    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, Self::Error> {
        Ok(self.next())
    }
}

/// One line of a tracker-output CSV: `frame,track_id,x1,y1,x2,y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    pub frame: u64,
    pub track_id: TrackId,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl TrackRow {
    pub fn to_object(&self) -> TrackedObject {
        TrackedObject::from_tlbr(self.track_id, self.x1, self.y1, self.x2, self.y2)
    }
}

/// Reads tracker output from CSV, grouping consecutive rows of the same frame.
///
/// Frames without any row never appear; they carry no objects anyway.
pub struct CsvTrackReader<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, TrackRow>,
    pending: Option<TrackRow>,
}

impl CsvTrackReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvTrackReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize();
        Self {
            rows,
            pending: None,
        }
    }
}

impl<R: Read> TrackSource for CsvTrackReader<R> {
    type Error = csv::Error;

    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, Self::Error> {
        let first = match self.pending.take() {
            Some(row) => row,
            None => match self.rows.next() {
                Some(row) => row?,
                None => return Ok(None),
            },
        };

        let frame_index = first.frame;
        let mut objects = vec![first.to_object()];

        for row in self.rows.by_ref() {
            let row = row?;
            if row.frame != frame_index {
                self.pending = Some(row);
                break;
            }
            objects.push(row.to_object());
        }

        Ok(Some(TrackedFrame::new(frame_index, objects)))
    }
}

#[derive(Debug, Error)]
pub enum ReplayError<E> {
    #[error("track source failed")]
    Source(#[source] E),

    #[error(transparent)]
    Counting(CountingError),
}

/// Drive `source` through `engine` until it is exhausted.
///
/// Returns the number of frames processed by this call. On error the engine
/// holds exactly the frames processed before the failing one.
pub fn replay<S: TrackSource>(
    engine: &mut LaneCountingEngine,
    source: &mut S,
) -> Result<u64, ReplayError<S::Error>> {
    let mut frames = 0;

    while let Some(frame) = source.next_frame().map_err(ReplayError::Source)? {
        engine
            .process_frame(frame.frame_index, &frame.objects)
            .map_err(|err| {
                warn!("Replay stopped at frame {}: {}", frame.frame_index, err);
                ReplayError::Counting(err)
            })?;
        frames += 1;
    }

    debug!("Replayed {} frames", frames);
    Ok(frames)
}
