use std::io::Read;

use crate::source::{ByteReader, ReadError};

/// Run `decode` inside one slot, then realign to the slot boundary.
///
/// The realignment runs whatever `decode` returned, so every slot ends
/// exactly `slot_size` bytes after it started unless the source ran out.
/// The second tuple element reports whether that realignment succeeded.
pub(crate) fn within_slot<R, T, F>(
    reader: &mut ByteReader<R>,
    slot_size: usize,
    decode: F,
) -> (T, Result<(), ReadError>)
where
    R: Read,
    F: FnOnce(&mut ByteReader<R>) -> T,
{
    reader.reset_slot_counter();
    let outcome = decode(reader);
    let realigned = reader.realign_to_slot(slot_size);
    reader.reset_slot_counter();
    (outcome, realigned)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::within_slot;
    use crate::source::{ByteReader, ReadError};

    #[test]
    fn realigns_after_success() {
        let mut reader = ByteReader::new(Cursor::new(vec![0u8; 20]));
        let (value, realigned) = within_slot(&mut reader, 8, |r| r.read_u16_be());
        assert_eq!(value.unwrap(), 0);
        assert!(realigned.is_ok());
        assert_eq!(reader.total_bytes(), 8);
        assert_eq!(reader.slot_bytes(), 0);
    }

    #[test]
    fn realigns_after_decode_failure() {
        let mut bytes = vec![0u8; 16];
        bytes[0] = 0xff;
        let mut reader = ByteReader::new(Cursor::new(bytes));
        let (value, realigned) = within_slot(&mut reader, 8, |r| r.read_fixed_string(3));
        assert!(matches!(value, Err(ReadError::InvalidString { len: 3 })));
        assert!(realigned.is_ok());
        assert_eq!(reader.total_bytes(), 8);
    }

    #[test]
    fn reports_exhausted_source() {
        let mut reader = ByteReader::new(Cursor::new(vec![0u8; 5]));
        let (_, realigned) = within_slot(&mut reader, 8, |r| r.read_byte());
        assert!(matches!(
            realigned,
            Err(ReadError::EndOfStream { needed: 7 })
        ));
    }
}
