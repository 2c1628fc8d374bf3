#![no_main]
use libfuzzer_sys::fuzz_target;

use tiff_schema::tags::Type;
use tiff_schema::{RawEntry, TagSchemaTable, Validator, Value};

// Turn an arbitrary byte soup into an entry list. Malformed directories must
// come back as reports, never as panics.
fn entries_from(data: &[u8]) -> Vec<RawEntry> {
    let mut entries = Vec::new();

    for chunk in data.chunks_exact(6) {
        let tag = u16::from_le_bytes([chunk[0], chunk[1]]);
        let raw_type = u16::from_le_bytes([chunk[2], chunk[3]]);
        let payload = u16::from_le_bytes([chunk[4], chunk[5]]);

        let Some(type_) = Type::from_u16(raw_type % 14) else {
            continue;
        };

        let value = match payload % 5 {
            0 => Value::Short(payload),
            1 => Value::Unsigned(u32::from(payload)),
            2 => Value::Ascii("x".repeat(usize::from(payload % 64))),
            3 => Value::List(vec![Value::Short(payload); usize::from(payload % 16)]),
            _ => Value::Undefined(chunk[4]),
        };

        entries.push(RawEntry::new(tag, type_, value));
    }

    entries
}

fuzz_target!(|data: &[u8]| {
    let table = TagSchemaTable::baseline();
    let validator = match Validator::new(&table) {
        Ok(v) => v,
        Err(_) => return,
    };

    let entries = entries_from(data);
    let report = validator.validate(&entries, None);

    // The pass is total: every entry is either resolved or diagnosed.
    let _ = report.diagnostics().len();
});
