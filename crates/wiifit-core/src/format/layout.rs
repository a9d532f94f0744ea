/// Fixed size of one profile slot in the save file.
pub const SLOT_SIZE: usize = 37505;

pub const HEADER_SIGNATURE: &[u8; 8] = b"RPHE0000";
pub const HEADER_SIGNATURE_LEN: usize = 8;
pub const NAME_LEN: usize = 22;
pub const HEADER_UNKNOWN_LEN: usize = 1;
pub const HEIGHT_LEN: usize = 1;
/// Packed year (2 bytes) followed by raw month and day bytes.
pub const BIRTH_DATE_LEN: usize = 4;
pub const HEADER_RESERVED_LEN: usize = 14461;

pub const HEADER_LEN: usize = HEADER_SIGNATURE_LEN
    + NAME_LEN
    + HEADER_UNKNOWN_LEN
    + HEIGHT_LEN
    + BIRTH_DATE_LEN
    + HEADER_RESERVED_LEN;

pub const RECORD_TIMESTAMP_LEN: usize = 4;
pub const RECORD_WEIGHT_LEN: usize = 2;
pub const RECORD_BMI_LEN: usize = 2;
pub const RECORD_BALANCE_LEN: usize = 2;
pub const RECORD_TRAILER_LEN: usize = 11;

pub const RECORD_LEN: usize = RECORD_TIMESTAMP_LEN
    + RECORD_WEIGHT_LEN
    + RECORD_BMI_LEN
    + RECORD_BALANCE_LEN
    + RECORD_TRAILER_LEN;

/// Records with a year below this are the end-of-slot sentinel.
pub const MIN_RECORD_YEAR: u16 = 1900;

pub const PACKED_YEAR_SHIFT: u32 = 20;
pub const PACKED_YEAR_MASK: u32 = 0x7ff;
pub const PACKED_MONTH_SHIFT: u32 = 16;
pub const PACKED_MONTH_MASK: u32 = 0x0f;
pub const PACKED_DAY_SHIFT: u32 = 11;
pub const PACKED_DAY_MASK: u32 = 0x1f;
pub const PACKED_HOUR_SHIFT: u32 = 6;
pub const PACKED_HOUR_MASK: u32 = 0x1f;
pub const PACKED_MINUTE_MASK: u32 = 0x3f;
