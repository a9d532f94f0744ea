use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::format::layout;
use crate::format::parser::{RecordOutcome, read_profile_header, read_record, record_fits};
use crate::source::{ByteReader, ReadError, SourceError, open_save_file};
use crate::{DiscardedSlot, ExtractionSummary, InputInfo, Profile, Report, make_stub_report};

mod slot;

use slot::within_slot;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Why a slot produced no profile.
#[derive(Debug, Error)]
pub enum SlotDiscard {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("empty profile: missing name or birth date")]
    EmptyProfile,
}

/// Result of processing one slot.
#[derive(Debug)]
pub struct SlotOutcome {
    /// Zero-based slot index.
    pub index: u64,
    /// Absolute byte offset of the slot start.
    pub offset: u64,
    pub result: Result<Profile, SlotDiscard>,
}

/// Walks a save file slot by slot.
///
/// Each slot yields one [`SlotOutcome`]. A slot that fails to decode is
/// reported and skipped; iteration stops once the source is exhausted or
/// the reader can no longer reach the next slot boundary.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use wiifit_core::{ProfileExtractor, SLOT_SIZE};
///
/// let mut extractor = ProfileExtractor::new(Cursor::new(vec![0u8; 2 * SLOT_SIZE]));
/// let first = extractor.next().unwrap();
/// assert!(first.result.is_err());
/// assert_eq!(extractor.position(), SLOT_SIZE as u64);
/// ```
pub struct ProfileExtractor<R> {
    reader: ByteReader<R>,
    next_index: u64,
    finished: bool,
}

impl<R: Read> ProfileExtractor<R> {
    pub fn new(source: R) -> Self {
        Self::from_reader(ByteReader::new(source))
    }

    pub fn from_reader(reader: ByteReader<R>) -> Self {
        Self {
            reader,
            next_index: 0,
            finished: false,
        }
    }

    /// Absolute number of bytes consumed from the source.
    pub fn position(&self) -> u64 {
        self.reader.total_bytes()
    }

    /// Collect the valid profiles of the remaining slots.
    pub fn profiles(self) -> Vec<Profile> {
        self.filter_map(|outcome| outcome.result.ok()).collect()
    }
}

impl<R: Read> Iterator for ProfileExtractor<R> {
    type Item = SlotOutcome;

    fn next(&mut self) -> Option<SlotOutcome> {
        if self.finished {
            return None;
        }
        match self.reader.has_bytes_available() {
            Ok(true) => {}
            Ok(false) => {
                self.finished = true;
                return None;
            }
            Err(err) => {
                warn!(error = %err, "save file unreadable; stopping extraction");
                self.finished = true;
                return None;
            }
        }

        let index = self.next_index;
        let offset = self.reader.total_bytes();
        self.next_index += 1;

        let (result, realigned) = within_slot(&mut self.reader, layout::SLOT_SIZE, decode_slot);
        if let Err(reason) = &result {
            debug!(slot = index, offset, %reason, "discarding slot");
        }
        if let Err(err) = realigned {
            debug!(slot = index, error = %err, "cannot reach next slot; stopping extraction");
            self.finished = true;
        }

        Some(SlotOutcome {
            index,
            offset,
            result,
        })
    }
}

fn decode_slot<R: Read>(reader: &mut ByteReader<R>) -> Result<Profile, SlotDiscard> {
    let header = read_profile_header(reader)?;
    let mut profile = Profile::new(header.name, header.height_cm, header.birth_date);

    while record_fits(reader.slot_bytes()) {
        match read_record(reader)? {
            RecordOutcome::Record(record) => profile.records.push(record),
            RecordOutcome::EndOfSlot => break,
        }
    }

    if !profile.is_valid() {
        return Err(SlotDiscard::EmptyProfile);
    }
    Ok(profile)
}

/// Extract every valid profile from a byte source.
///
/// Decode failures only ever discard the slot they occur in.
pub fn extract_profiles<R: Read>(source: R) -> Vec<Profile> {
    ProfileExtractor::new(source).profiles()
}

/// Extract every valid profile from a save file on disk.
///
/// # Errors
/// Only failing to open the file is an error.
pub fn extract_profiles_file(path: &Path) -> Result<Vec<Profile>, ExtractError> {
    let reader = open_save_file(path)?;
    Ok(ProfileExtractor::from_reader(reader).profiles())
}

/// Extract a save file into a versioned report, including discarded slots.
pub fn analyze_save_file(path: &Path) -> Result<Report, ExtractError> {
    let reader = open_save_file(path)?;
    let bytes = fs::metadata(path)?.len();
    let input = InputInfo {
        path: path.display().to_string(),
        bytes,
    };
    Ok(analyze_source(input, reader))
}

/// Build a report from an already opened source.
///
/// Slots that decode to an empty profile are unused save slots: they are
/// counted in `slots_empty` and never listed as discarded. Only slots whose
/// bytes failed to decode land in `discarded`.
pub fn analyze_source<R: Read>(input: InputInfo, reader: ByteReader<R>) -> Report {
    let mut report = make_stub_report(&input.path, input.bytes);
    let mut summary = ExtractionSummary::default();

    for outcome in ProfileExtractor::from_reader(reader) {
        summary.slots_total += 1;
        match outcome.result {
            Ok(profile) => {
                summary.profiles_total += 1;
                summary.records_total += profile.records.len() as u64;
                report.profiles.push(profile);
            }
            Err(SlotDiscard::EmptyProfile) => summary.slots_empty += 1,
            Err(reason) => {
                summary.slots_discarded += 1;
                report.discarded.push(DiscardedSlot {
                    slot: outcome.index,
                    offset: outcome.offset,
                    reason: reason.to_string(),
                });
            }
        }
    }

    report.summary = summary;
    report
}
