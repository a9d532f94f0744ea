use std::fs;
use std::path::{Path, PathBuf};

use wiifit_core::format::layout::{NAME_LEN, RECORD_TRAILER_LEN};
use wiifit_core::{BirthDate, PackedDateTime, SLOT_SIZE, SlotBuilder};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(&root.join("two_slots"), &two_slots())?;
    write_fixture(&root.join("corrupt_header"), &corrupt_header())?;
    write_fixture(&root.join("truncated"), &truncated())?;
    Ok(())
}

fn birth(year: u16, month: u8, day: u8) -> BirthDate {
    BirthDate { year, month, day }
}

fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> PackedDateTime {
    PackedDateTime {
        year,
        month,
        day,
        hour,
        minute,
    }
}

/// Three records then an implausible date, followed by an all-zero slot.
fn two_slots() -> Vec<u8> {
    let first = SlotBuilder::profile("Tristan", 178, birth(1990, 6, 15))
        .record(at(2015, 6, 15, 9, 30), 723, 2145, 501)
        .record(at(2015, 6, 16, 8, 5), 720, 2136, 498)
        .record(at(2015, 7, 1, 21, 45), 715, 2120, 503)
        .finish();
    [first, vec![0u8; SLOT_SIZE]].concat()
}

/// A name that is not UTF-8, followed by a profile without records.
fn corrupt_header() -> Vec<u8> {
    let first = SlotBuilder::new(&[0xff; NAME_LEN], 170, birth(1985, 3, 2)).finish();
    let second = SlotBuilder::profile("Ana", 160, birth(2001, 12, 3)).finish();
    [first, second].concat()
}

/// A complete slot, then a slot cut off inside its second record trailer.
fn truncated() -> Vec<u8> {
    let first = SlotBuilder::profile("Ana", 160, birth(2001, 12, 3))
        .record(at(2016, 1, 10, 7, 0), 550, 2048, 495)
        .record(at(2016, 1, 11, 7, 15), 548, 2040, 500)
        .finish();
    let mut second = SlotBuilder::profile("Tristan", 178, birth(1990, 6, 15))
        .record(at(2015, 6, 15, 9, 30), 723, 2145, 501)
        .record(at(2015, 6, 16, 8, 5), 720, 2136, 498)
        .into_bytes();
    second.truncate(second.len() - RECORD_TRAILER_LEN);
    [first, second].concat()
}

fn write_fixture(dir: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.dat");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    Ok(())
}
