extern crate criterion;
extern crate tiff_schema;

use criterion::{black_box, Criterion};

use tiff_schema::tags::{Tag, Type};
use tiff_schema::{ImageClass, RawEntry, TagSchemaTable, Validator, Value};

fn entry(tag: Tag, value: u16) -> RawEntry {
    RawEntry::new(tag.to_u16(), Type::SHORT, Value::Short(value))
}

fn rgb_entries() -> Vec<RawEntry> {
    vec![
        entry(Tag::ImageWidth, 640),
        entry(Tag::ImageLength, 480),
        RawEntry::new(
            Tag::BitsPerSample.to_u16(),
            Type::SHORT,
            Value::List(vec![Value::Short(8), Value::Short(8), Value::Short(8)]),
        ),
        entry(Tag::Compression, 1),
        entry(Tag::PhotometricInterpretation, 2),
        RawEntry::new(Tag::StripOffsets.to_u16(), Type::LONG, Value::Unsigned(8)),
        entry(Tag::SamplesPerPixel, 3),
        entry(Tag::RowsPerStrip, 480),
        RawEntry::new(
            Tag::StripByteCounts.to_u16(),
            Type::LONG,
            Value::Unsigned(921_600),
        ),
        RawEntry::new(
            Tag::XResolution.to_u16(),
            Type::RATIONAL,
            Value::Rational(72, 1),
        ),
        RawEntry::new(
            Tag::YResolution.to_u16(),
            Type::RATIONAL,
            Value::Rational(72, 1),
        ),
        entry(Tag::ResolutionUnit, 2),
    ]
}

fn main() {
    let mut c = Criterion::default().configure_from_args();
    let mut group = c.benchmark_group("tiff-schema");

    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();
    let entries = rgb_entries();

    group.bench_function("build-baseline-table", |b| {
        b.iter(|| black_box(TagSchemaTable::baseline()))
    });

    group.bench_function("validate-rgb", |b| {
        b.iter(|| validator.validate(black_box(&entries), Some(ImageClass::Rgb)))
    });

    group.bench_function("validate-detect", |b| {
        b.iter(|| validator.validate(black_box(&entries), None))
    });
}
