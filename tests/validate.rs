use tiff_schema::tags::{Tag, Type};
use tiff_schema::{Diagnostic, ImageClass, RawEntry, TagSchemaTable, Validator, Value};

fn short(tag: Tag, value: u16) -> RawEntry {
    RawEntry::new(tag.to_u16(), Type::SHORT, Value::Short(value))
}

fn long_list(tag: Tag, values: &[u32]) -> RawEntry {
    RawEntry::new(
        tag.to_u16(),
        Type::LONG,
        Value::List(values.iter().copied().map(Value::Unsigned).collect()),
    )
}

fn rational(tag: Tag, n: u32, d: u32) -> RawEntry {
    RawEntry::new(tag.to_u16(), Type::RATIONAL, Value::Rational(n, d))
}

/// The exact mandatory tag set of a bilevel image.
fn bilevel_entries() -> Vec<RawEntry> {
    vec![
        short(Tag::ImageWidth, 1_728),
        short(Tag::ImageLength, 2_376),
        short(Tag::Compression, 1),
        short(Tag::PhotometricInterpretation, 0),
        long_list(Tag::StripOffsets, &[8, 29_708]),
        short(Tag::RowsPerStrip, 1_188),
        long_list(Tag::StripByteCounts, &[29_700, 29_700]),
        rational(Tag::XResolution, 204, 1),
        rational(Tag::YResolution, 196, 1),
        short(Tag::ResolutionUnit, 2),
    ]
}

fn rgb_entries() -> Vec<RawEntry> {
    vec![
        short(Tag::ImageWidth, 640),
        short(Tag::ImageLength, 480),
        RawEntry::new(
            Tag::BitsPerSample.to_u16(),
            Type::SHORT,
            Value::List(vec![Value::Short(8), Value::Short(8), Value::Short(8)]),
        ),
        short(Tag::Compression, 1),
        short(Tag::PhotometricInterpretation, 2),
        long_list(Tag::StripOffsets, &[8]),
        short(Tag::SamplesPerPixel, 3),
        short(Tag::RowsPerStrip, 480),
        long_list(Tag::StripByteCounts, &[921_600]),
        rational(Tag::XResolution, 72, 1),
        rational(Tag::YResolution, 72, 1),
        short(Tag::ResolutionUnit, 2),
    ]
}

#[test]
fn complete_bilevel_directory_passes_clean() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    let report = validator.validate(&bilevel_entries(), Some(ImageClass::Bilevel));

    assert!(report.passed());
    assert_eq!(report.profile(), Some(ImageClass::Bilevel));
    assert!(report.diagnostics().is_empty());
    assert_eq!(report.ifd().len(), 10);
    assert!(report.ifd().iter().all(|(_, e)| !e.is_synthesized()));
}

#[test]
fn missing_strip_offsets_is_the_single_violation() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    let entries: Vec<RawEntry> = bilevel_entries()
        .into_iter()
        .filter(|e| e.tag != Tag::StripOffsets.to_u16())
        .collect();

    let report = validator.validate(&entries, Some(ImageClass::Bilevel));

    assert!(!report.passed());
    let violations: Vec<_> = report.violations().collect();
    assert_eq!(
        violations,
        vec![&Diagnostic::MissingRequiredTag {
            tag: Tag::StripOffsets.to_u16()
        }]
    );
}

#[test]
fn type_mismatch_does_not_abort_the_pass() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    let mut entries = vec![RawEntry::new(
        Tag::BitsPerSample.to_u16(),
        Type::ASCII,
        Value::Ascii("8".into()),
    )];
    entries.extend(bilevel_entries());
    entries.push(RawEntry::new(60_000, Type::SHORT, Value::Short(7)));

    let report = validator.validate(&entries, Some(ImageClass::Grayscale));

    assert!(!report.passed());
    assert_eq!(
        report.violations().collect::<Vec<_>>(),
        vec![&Diagnostic::TypeMismatch {
            tag: Tag::BitsPerSample.to_u16(),
            expected: vec![Type::SHORT],
            actual: Type::ASCII,
        }]
    );
    // The entries after the mismatch were still processed.
    assert!(report
        .diagnostics()
        .contains(&Diagnostic::UnknownTag { tag: 60_000 }));
    assert!(report.ifd().contains(Tag::ResolutionUnit.to_u16()));
}

#[test]
fn count_mismatch_uses_the_dependent_count() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    // A 4-bit palette image needs 3 * 2 * 4 = 24 color map entries.
    let mut entries = bilevel_entries();
    entries.push(short(Tag::BitsPerSample, 4));
    entries.push(RawEntry::new(
        Tag::ColorMap.to_u16(),
        Type::SHORT,
        Value::List(vec![Value::Short(0); 10]),
    ));

    let report = validator.validate(&entries, Some(ImageClass::PaletteColor));

    assert!(!report.passed());
    assert_eq!(
        report.violations().collect::<Vec<_>>(),
        vec![&Diagnostic::CountMismatch {
            tag: Tag::ColorMap.to_u16(),
            expected: 24,
            actual: 10,
        }]
    );
}

#[test]
fn dependent_count_sees_tags_later_in_the_input() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    // BitsPerSample precedes SamplesPerPixel, as tag order prescribes; its
    // count of 3 must resolve against the later entry, not the default.
    let report = validator.validate(&rgb_entries(), Some(ImageClass::Rgb));

    assert!(report.passed(), "{:?}", report.diagnostics());
    assert!(report.diagnostics().is_empty());
}

#[test]
fn detection_prefers_the_most_specific_class() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    // Satisfies the grayscale requirements and the RGB ones.
    let report = validator.validate(&rgb_entries(), None);

    assert_eq!(report.profile(), Some(ImageClass::Rgb));
    assert!(report.passed());
}

#[test]
fn defaults_fill_in_for_required_tags() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    let entries: Vec<RawEntry> = bilevel_entries()
        .into_iter()
        .filter(|e| e.tag != Tag::Compression.to_u16())
        .collect();

    let report = validator.validate(&entries, Some(ImageClass::Bilevel));

    assert!(report.passed());
    assert_eq!(
        report.diagnostics(),
        &[Diagnostic::DefaultApplied {
            tag: Tag::Compression.to_u16(),
            value: Value::Short(1),
        }]
    );

    let entry = report.ifd().get(Tag::Compression.to_u16()).unwrap();
    assert!(entry.is_synthesized());
}

#[test]
fn reports_are_idempotent() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    let mut entries = bilevel_entries();
    entries.remove(3); // drop PhotometricInterpretation: one violation
    entries.push(RawEntry::new(60_000, Type::UNDEFINED, Value::Undefined(0)));

    let first = validator.validate(&entries, None);
    let second = validator.validate(&entries, None);

    assert_eq!(first, second);
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn validation_is_a_complete_single_pass() {
    let table = TagSchemaTable::baseline();
    let validator = Validator::new(&table).unwrap();

    // Several independent problems; all of them must be reported at once.
    let entries = vec![
        RawEntry::new(
            Tag::ImageWidth.to_u16(),
            Type::ASCII,
            Value::Ascii("640".into()),
        ),
        short(Tag::ImageLength, 480),
        RawEntry::new(
            Tag::DateTime.to_u16(),
            Type::ASCII,
            Value::Ascii("2024".into()),
        ),
    ];

    let report = validator.validate(&entries, Some(ImageClass::Bilevel));

    assert!(!report.passed());
    // One type violation, one count violation, and the rest of the bilevel
    // set missing or defaulted.
    assert!(report.violations().count() > 2);
    assert!(report
        .diagnostics()
        .iter()
        .any(|d| matches!(d, Diagnostic::CountMismatch { tag, expected: 20, actual: 4 }
            if *tag == Tag::DateTime.to_u16())));
}
