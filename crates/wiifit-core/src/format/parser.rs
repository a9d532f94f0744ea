use std::io::Read;

use tracing::trace;

use super::layout;
use crate::measure::{Hundredths, Tenths};
use crate::source::{ByteReader, ReadError};
use crate::{BirthDate, Record};

/// Identity fields decoded from the start of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHeader {
    pub name: String,
    pub height_cm: u8,
    pub birth_date: BirthDate,
}

/// Result of one record decode that did not hit a hard error.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Record(Record),
    /// The timestamp was implausible: the slot holds no further records.
    EndOfSlot,
}

/// Decode a profile header and skip the reserved region after it.
///
/// # Errors
/// Propagates every `ReadError`; an undecodable name is `InvalidString`.
pub fn read_profile_header<R: Read>(
    reader: &mut ByteReader<R>,
) -> Result<ProfileHeader, ReadError> {
    let signature = reader.read_bytes(layout::HEADER_SIGNATURE_LEN)?;
    if signature.as_slice() != layout::HEADER_SIGNATURE {
        trace!(?signature, "unexpected profile header signature");
    }
    let name = reader.read_fixed_string(layout::NAME_LEN)?;
    reader.skip(layout::HEADER_UNKNOWN_LEN)?;
    let height_cm = reader.read_byte()?;
    let birth_date = reader.read_packed_year_month_day()?;
    reader.skip(layout::HEADER_RESERVED_LEN)?;

    Ok(ProfileHeader {
        name: strip_nul(&name),
        height_cm,
        birth_date,
    })
}

/// Decode one measurement record.
///
/// `InvalidDate` on the timestamp is returned as `RecordOutcome::EndOfSlot`;
/// every other failure is a hard error.
pub fn read_record<R: Read>(reader: &mut ByteReader<R>) -> Result<RecordOutcome, ReadError> {
    let timestamp = match reader.read_packed_date_time() {
        Ok(timestamp) => timestamp,
        Err(ReadError::InvalidDate { raw }) => {
            trace!(raw, "record timestamp ends slot");
            return Ok(RecordOutcome::EndOfSlot);
        }
        Err(err) => return Err(err),
    };
    let weight_kg = Tenths::from_raw(reader.read_u16_be()?);
    let bmi = Hundredths::from_raw(reader.read_u16_be()?);
    let balance_pct = Tenths::from_raw(reader.read_u16_be()?);
    reader.skip(layout::RECORD_TRAILER_LEN)?;

    Ok(RecordOutcome::Record(Record {
        timestamp,
        weight_kg,
        bmi,
        balance_pct,
    }))
}

/// Whether a whole record still fits before the end of the slot.
pub fn record_fits(slot_bytes: usize) -> bool {
    slot_bytes + layout::RECORD_LEN <= layout::SLOT_SIZE
}

// Names are NUL padded, and UTF-16BE names carry a NUL before every ASCII char.
fn strip_nul(name: &str) -> String {
    name.chars().filter(|c| *c != '\0').collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{RecordOutcome, read_profile_header, read_record, record_fits};
    use crate::BirthDate;
    use crate::format::builder::SlotBuilder;
    use crate::format::layout;
    use crate::format::packed::PackedDateTime;
    use crate::source::{ByteReader, ReadError};
    use time::macros::datetime;

    const MORNING: PackedDateTime = PackedDateTime {
        year: 2015,
        month: 6,
        day: 15,
        hour: 9,
        minute: 30,
    };

    fn birth() -> BirthDate {
        BirthDate {
            year: 1990,
            month: 6,
            day: 15,
        }
    }

    #[test]
    fn header_consumes_fixed_length() {
        let bytes = SlotBuilder::profile("Tristan", 178, birth()).into_bytes();
        let mut reader = ByteReader::new(Cursor::new(bytes));
        let header = read_profile_header(&mut reader).unwrap();
        assert_eq!(header.name, "Tristan");
        assert_eq!(header.height_cm, 178);
        assert_eq!(header.birth_date, birth());
        assert_eq!(reader.slot_bytes(), layout::HEADER_LEN);
    }

    #[test]
    fn utf16_name_loses_interior_nul() {
        let mut name = [0u8; layout::NAME_LEN];
        name[..6].copy_from_slice(&[0x00, b'A', 0x00, b'n', 0x00, b'a']);
        let bytes = SlotBuilder::new(&name, 160, birth()).into_bytes();
        let mut reader = ByteReader::new(Cursor::new(bytes));
        assert_eq!(read_profile_header(&mut reader).unwrap().name, "Ana");
    }

    #[test]
    fn invalid_name_is_invalid_string() {
        let bytes = SlotBuilder::new(&[0xff; layout::NAME_LEN], 160, birth()).into_bytes();
        let mut reader = ByteReader::new(Cursor::new(bytes));
        let err = read_profile_header(&mut reader).unwrap_err();
        assert!(matches!(err, ReadError::InvalidString { len: 22 }));
    }

    #[test]
    fn record_decodes_fixed_point_fields() {
        let bytes = SlotBuilder::profile("Tristan", 178, birth())
            .record(MORNING, 1523, 2145, 501)
            .into_bytes();
        let mut reader = ByteReader::new(Cursor::new(bytes));
        read_profile_header(&mut reader).unwrap();

        let record = match read_record(&mut reader).unwrap() {
            RecordOutcome::Record(record) => record,
            other => panic!("expected a record, got {other:?}"),
        };
        assert_eq!(record.timestamp, datetime!(2015-06-15 09:30));
        assert_eq!(record.weight_kg.to_string(), "152.3");
        assert_eq!(record.bmi.to_string(), "21.45");
        assert_eq!(record.balance_pct.to_string(), "50.1");
        assert_eq!(reader.slot_bytes(), layout::HEADER_LEN + layout::RECORD_LEN);
    }

    #[test]
    fn implausible_timestamp_ends_slot() {
        let mut reader = ByteReader::new(Cursor::new(vec![0u8; layout::RECORD_LEN]));
        assert_eq!(read_record(&mut reader).unwrap(), RecordOutcome::EndOfSlot);
    }

    #[test]
    fn truncated_record_is_hard_error() {
        let mut bytes = MORNING.pack().to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0x02, 0xd3]);
        let mut reader = ByteReader::new(Cursor::new(bytes));
        let err = read_record(&mut reader).unwrap_err();
        assert!(matches!(err, ReadError::EndOfStream { needed: 2 }));
    }

    #[test]
    fn last_record_must_fit_in_slot() {
        assert!(record_fits(layout::HEADER_LEN));
        assert!(record_fits(layout::SLOT_SIZE - layout::RECORD_LEN));
        assert!(!record_fits(layout::SLOT_SIZE - layout::RECORD_LEN + 1));
    }
}
