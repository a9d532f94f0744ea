use super::layout;
use super::packed::{PackedDateTime, pack_year_digits};
use crate::BirthDate;

/// Builds the bytes of one synthetic profile slot.
///
/// Used by the fixture generator and tests; the unknown regions are zero.
///
/// # Examples
/// ```
/// use wiifit_core::{BirthDate, PackedDateTime, SlotBuilder, extract_profiles};
///
/// let birth = BirthDate { year: 1990, month: 6, day: 15 };
/// let ts = PackedDateTime { year: 2015, month: 6, day: 15, hour: 9, minute: 30 };
/// let slot = SlotBuilder::profile("Tristan", 178, birth)
///     .record(ts, 723, 2145, 501)
///     .finish();
///
/// let profiles = extract_profiles(std::io::Cursor::new(slot));
/// assert_eq!(profiles[0].records.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SlotBuilder {
    bytes: Vec<u8>,
}

impl SlotBuilder {
    /// Header with raw name bytes, zero padded or cut to the name width.
    pub fn new(name: &[u8], height_cm: u8, birth_date: BirthDate) -> Self {
        let mut bytes = Vec::with_capacity(layout::SLOT_SIZE);
        bytes.extend_from_slice(layout::HEADER_SIGNATURE);

        let mut name_field = [0u8; layout::NAME_LEN];
        let len = name.len().min(layout::NAME_LEN);
        name_field[..len].copy_from_slice(&name[..len]);
        bytes.extend_from_slice(&name_field);

        bytes.extend_from_slice(&[0u8; layout::HEADER_UNKNOWN_LEN]);
        bytes.push(height_cm);
        bytes.extend_from_slice(&pack_year_digits(birth_date.year).to_be_bytes());
        bytes.push(birth_date.month);
        bytes.push(birth_date.day);
        bytes.resize(layout::HEADER_LEN, 0);
        Self { bytes }
    }

    /// Header with a UTF-8 name.
    pub fn profile(name: &str, height_cm: u8, birth_date: BirthDate) -> Self {
        Self::new(name.as_bytes(), height_cm, birth_date)
    }

    /// Append one measurement record with raw fixed-point fields.
    pub fn record(
        mut self,
        timestamp: PackedDateTime,
        weight: u16,
        bmi: u16,
        balance: u16,
    ) -> Self {
        self.bytes.extend_from_slice(&timestamp.pack().to_be_bytes());
        self.bytes.extend_from_slice(&weight.to_be_bytes());
        self.bytes.extend_from_slice(&bmi.to_be_bytes());
        self.bytes.extend_from_slice(&balance.to_be_bytes());
        self.bytes.extend_from_slice(&[0u8; layout::RECORD_TRAILER_LEN]);
        self
    }

    /// Bytes written so far, without padding to the slot size.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Bytes padded with zeros (or cut) to exactly one slot.
    pub fn finish(self) -> Vec<u8> {
        let mut bytes = self.bytes;
        bytes.resize(layout::SLOT_SIZE, 0);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::SlotBuilder;
    use crate::BirthDate;
    use crate::format::layout;

    #[test]
    fn finished_slot_has_fixed_size() {
        let birth = BirthDate {
            year: 2001,
            month: 12,
            day: 3,
        };
        let slot = SlotBuilder::profile("Ana", 160, birth).finish();
        assert_eq!(slot.len(), layout::SLOT_SIZE);
        assert_eq!(&slot[..8], layout::HEADER_SIGNATURE);
        assert_eq!(&slot[8..11], b"Ana");
        assert_eq!(slot[31], 160);
        assert_eq!(&slot[32..36], &[0x20, 0x01, 12, 3]);
    }
}
