use time::{Date, Month, PrimitiveDateTime, Time};

use super::layout;

/// Raw components of a packed 32-bit date-time field, before calendar checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl PackedDateTime {
    /// Split a raw field into its bit ranges. The stored month is zero-based.
    ///
    /// # Examples
    /// ```
    /// use wiifit_core::format::packed::PackedDateTime;
    ///
    /// let fields = PackedDateTime::unpack(0x7df5_7a5e);
    /// assert_eq!(fields.year, 2015);
    /// assert_eq!(fields.month, 6);
    /// ```
    pub fn unpack(raw: u32) -> Self {
        Self {
            year: ((raw >> layout::PACKED_YEAR_SHIFT) & layout::PACKED_YEAR_MASK) as u16,
            month: (((raw >> layout::PACKED_MONTH_SHIFT) & layout::PACKED_MONTH_MASK) + 1) as u8,
            day: ((raw >> layout::PACKED_DAY_SHIFT) & layout::PACKED_DAY_MASK) as u8,
            hour: ((raw >> layout::PACKED_HOUR_SHIFT) & layout::PACKED_HOUR_MASK) as u8,
            minute: (raw & layout::PACKED_MINUTE_MASK) as u8,
        }
    }

    /// Inverse of [`PackedDateTime::unpack`]; out-of-range components are masked.
    pub fn pack(&self) -> u32 {
        ((self.year as u32 & layout::PACKED_YEAR_MASK) << layout::PACKED_YEAR_SHIFT)
            | ((self.month.saturating_sub(1) as u32 & layout::PACKED_MONTH_MASK)
                << layout::PACKED_MONTH_SHIFT)
            | ((self.day as u32 & layout::PACKED_DAY_MASK) << layout::PACKED_DAY_SHIFT)
            | ((self.hour as u32 & layout::PACKED_HOUR_MASK) << layout::PACKED_HOUR_SHIFT)
            | (self.minute as u32 & layout::PACKED_MINUTE_MASK)
    }

    /// Calendar timestamp, or `None` when the year is below the record minimum
    /// or the components do not name a real date and time.
    pub fn to_timestamp(&self) -> Option<PrimitiveDateTime> {
        if self.year < layout::MIN_RECORD_YEAR {
            return None;
        }
        let month = Month::try_from(self.month).ok()?;
        let date = Date::from_calendar_date(self.year as i32, month, self.day).ok()?;
        let time = Time::from_hms(self.hour, self.minute, 0).ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }
}

/// Combine the four nibbles of a packed year as decimal digit weights.
///
/// Nibbles above 9 are weighted as-is rather than rejected.
pub fn unpack_year_digits(raw: u16) -> u16 {
    let thousands = (raw >> 12) & 0x0f;
    let hundreds = (raw >> 8) & 0x0f;
    let tens = (raw >> 4) & 0x0f;
    let ones = raw & 0x0f;
    thousands * 1000 + hundreds * 100 + tens * 10 + ones
}

/// Encode a year below 10000 as four decimal digit nibbles.
pub fn pack_year_digits(year: u16) -> u16 {
    let year = year % 10000;
    ((year / 1000) << 12) | (((year / 100) % 10) << 8) | (((year / 10) % 10) << 4) | (year % 10)
}
