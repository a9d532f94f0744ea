//! Wii Fit save file decoding.
//!
//! The save file is a sequence of fixed 37505-byte slots, one per user
//! profile. Each slot starts with a profile header (name, height, birth date)
//! followed by fixed-size body test records. No field stores the record
//! count: records are read until a timestamp decodes to an implausible date.
//!
//! Decoding is layered the same way everywhere in this crate: `source` owns
//! the byte stream and primitive decodes, `format` knows the layout, and
//! `extract` applies the slot policy. A slot that fails to decode is skipped
//! after realigning to the next slot boundary, so one damaged profile never
//! hides the others.
//!
//! Invariants:
//! - Returned profiles have a non-empty name and a non-zero birth date.
//! - Every record timestamp is a real date with a year of at least 1900.
//! - Measurements stay in integer fixed point (tenths, hundredths).
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use wiifit_core::extract_profiles_file;
//!
//! let profiles = extract_profiles_file(Path::new("FitPlus0.dat"))?;
//! for profile in &profiles {
//!     println!("{}: {} records", profile.name, profile.records.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

mod extract;
pub mod format;
mod measure;
mod source;

pub use extract::{
    ExtractError, ProfileExtractor, SlotDiscard, SlotOutcome, analyze_save_file, analyze_source,
    extract_profiles, extract_profiles_file,
};
pub use format::builder::SlotBuilder;
pub use format::layout::SLOT_SIZE;
pub use format::packed::PackedDateTime;
pub use measure::{Fixed, Hundredths, Tenths};
pub use source::{ByteReader, ReadError, SourceError, open_save_file};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

time::serde::format_description!(
    record_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

/// One user profile and its body test history.
///
/// # Examples
/// ```
/// use wiifit_core::{BirthDate, Profile};
///
/// let profile = Profile::new(
///     "Tristan".to_string(),
///     178,
///     BirthDate { year: 1990, month: 6, day: 15 },
/// );
/// assert!(profile.is_valid());
/// assert!(profile.records.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Mii name with NUL padding removed.
    pub name: String,
    /// Height in centimeters.
    pub height_cm: u8,
    /// Birth date as stored; month and day are not range checked.
    pub birth_date: BirthDate,
    /// Body test records in stored order.
    pub records: Vec<Record>,
}

impl Profile {
    pub fn new(name: String, height_cm: u8, birth_date: BirthDate) -> Self {
        Self {
            name,
            height_cm,
            birth_date,
            records: Vec::new(),
        }
    }

    /// A profile is kept only with a name and a fully non-zero birth date.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.birth_date.has_zero_field()
    }
}

/// Birth date decoded from the profile header.
///
/// # Examples
/// ```
/// use wiifit_core::BirthDate;
///
/// let date = BirthDate { year: 1990, month: 6, day: 5 };
/// assert_eq!(date.to_string(), "1990-06-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl BirthDate {
    pub fn has_zero_field(&self) -> bool {
        self.year == 0 || self.month == 0 || self.day == 0
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Single body test measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Local time of the test, minute precision.
    #[serde(with = "record_timestamp")]
    pub timestamp: PrimitiveDateTime,
    /// Weight in kilograms.
    pub weight_kg: Tenths,
    pub bmi: Hundredths,
    /// Balance as a percentage.
    pub balance_pct: Tenths,
}

/// Extraction report with profiles and discarded slots in slot order.
///
/// # Examples
/// ```
/// use wiifit_core::make_stub_report;
///
/// let report = make_stub_report("FitPlus0.dat", 0);
/// assert_eq!(report.report_version, wiifit_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub summary: ExtractionSummary,
    /// Valid profiles in slot order.
    pub profiles: Vec<Profile>,
    /// Slots that failed to decode; unused slots are only counted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<DiscardedSlot>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the extractor.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Slot counts for one extraction.
///
/// # Examples
/// ```
/// use wiifit_core::ExtractionSummary;
///
/// let summary = ExtractionSummary::default();
/// assert_eq!(summary.slots_total, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub slots_total: u64,
    pub profiles_total: u64,
    pub records_total: u64,
    /// Unused slots: no name or no birth date.
    #[serde(default)]
    pub slots_empty: u64,
    /// Slots whose bytes failed to decode.
    pub slots_discarded: u64,
}

/// A slot whose bytes failed to decode, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedSlot {
    /// Zero-based slot index.
    pub slot: u64,
    /// Absolute byte offset of the slot.
    pub offset: u64,
    pub reason: String,
}

/// Build an empty report with base fields filled.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "wiifit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: ExtractionSummary::default(),
        profiles: vec![],
        discarded: vec![],
    }
}
