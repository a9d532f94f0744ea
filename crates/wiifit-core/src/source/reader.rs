use std::io::{self, BufRead, BufReader, Read};

use time::PrimitiveDateTime;

use super::error::ReadError;
use crate::BirthDate;
use crate::format::packed::{PackedDateTime, unpack_year_digits};

/// Sequential, forward-only decoder over a byte source.
///
/// Two counters track progress: the lifetime number of bytes consumed, and
/// the bytes consumed since [`ByteReader::reset_slot_counter`] was last
/// called. Both advance only when the underlying bytes were actually taken
/// from the source, so a value that fails to decode after being read
/// (an implausible date, a bad string) still counts toward the position.
/// Failed I/O leaves the counters unchanged and is never retried.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use wiifit_core::ByteReader;
///
/// let mut reader = ByteReader::new(Cursor::new([0x12, 0x34, 0xff]));
/// assert_eq!(reader.read_u16_be()?, 0x1234);
/// assert_eq!(reader.total_bytes(), 2);
/// # Ok::<(), wiifit_core::ReadError>(())
/// ```
pub struct ByteReader<R> {
    inner: BufReader<R>,
    total_bytes: u64,
    slot_bytes: usize,
}

impl<R: Read> ByteReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            inner: BufReader::new(source),
            total_bytes: 0,
            slot_bytes: 0,
        }
    }

    /// Bytes consumed since the reader was created.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Bytes consumed since the last slot counter reset.
    pub fn slot_bytes(&self) -> usize {
        self.slot_bytes
    }

    pub fn reset_slot_counter(&mut self) {
        self.slot_bytes = 0;
    }

    /// Whether at least one more byte can be read.
    ///
    /// # Errors
    /// Returns `ReadError::ReadFailure` when the source cannot be polled.
    pub fn has_bytes_available(&mut self) -> Result<bool, ReadError> {
        Ok(!self.inner.fill_buf()?.is_empty())
    }

    #[doc(alias = "read_int8")]
    pub fn read_byte(&mut self) -> Result<u8, ReadError> {
        let mut byte = [0u8; 1];
        self.fill(&mut byte)?;
        Ok(byte[0])
    }

    /// Read exactly `len` bytes; a short source is `EndOfStream`.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ReadError> {
        let mut bytes = vec![0u8; len];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Discard exactly `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), ReadError> {
        let copied = io::copy(&mut (&mut self.inner).take(len as u64), &mut io::sink())?;
        if copied < len as u64 {
            return Err(ReadError::EndOfStream { needed: len });
        }
        self.advance(len);
        Ok(())
    }

    pub fn read_u16_be(&mut self) -> Result<u16, ReadError> {
        let mut bytes = [0u8; 2];
        self.fill(&mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, ReadError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn read_u64_be(&mut self) -> Result<u64, ReadError> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;
        Ok(u64::from_be_bytes(bytes))
    }

    /// Decode `len` bytes as UTF-8.
    ///
    /// # Errors
    /// `ReadError::InvalidString` when the bytes are not UTF-8 or decode to
    /// an empty string.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String, ReadError> {
        let bytes = self.read_bytes(len)?;
        match String::from_utf8(bytes) {
            Ok(text) if !text.is_empty() => Ok(text),
            _ => Err(ReadError::InvalidString { len }),
        }
    }

    /// Decode a packed 32-bit date-time field.
    ///
    /// # Errors
    /// `ReadError::InvalidDate` when the year is below 1900 or the fields do
    /// not form a real calendar date and time. Inside a slot this marks the
    /// end of the stored records.
    pub fn read_packed_date_time(&mut self) -> Result<PrimitiveDateTime, ReadError> {
        let raw = self.read_u32_be()?;
        PackedDateTime::unpack(raw)
            .to_timestamp()
            .ok_or(ReadError::InvalidDate { raw })
    }

    /// Decode a nibble-weighted year followed by raw month and day bytes.
    /// Nothing is validated here.
    pub fn read_packed_year_month_day(&mut self) -> Result<BirthDate, ReadError> {
        let year = unpack_year_digits(self.read_u16_be()?);
        let month = self.read_byte()?;
        let day = self.read_byte()?;
        Ok(BirthDate { year, month, day })
    }

    /// Skip forward to the end of a `slot_size` slot and reset the slot counter.
    ///
    /// # Errors
    /// `ReadError::InvalidLength` when more than `slot_size` bytes were already
    /// consumed in this slot; otherwise the errors of [`ByteReader::skip`].
    pub fn realign_to_slot(&mut self, slot_size: usize) -> Result<(), ReadError> {
        let remaining = slot_size
            .checked_sub(self.slot_bytes)
            .ok_or(ReadError::InvalidLength {
                consumed: self.slot_bytes,
                limit: slot_size,
            })?;
        self.skip(remaining)?;
        self.reset_slot_counter();
        Ok(())
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let needed = buf.len();
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => ReadError::EndOfStream { needed },
            _ => ReadError::ReadFailure(err),
        })?;
        self.advance(needed);
        Ok(())
    }

    fn advance(&mut self, len: usize) {
        self.total_bytes += len as u64;
        self.slot_bytes += len;
    }
}
