//! The tag schema table: which encodings, counts and defaults each tag has.

use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::ifd::Value;
use crate::tags::{Tag, Type};

/// A pure function from a dependency tag's resolved value to a count or
/// default. Returns `None` when the result is not representable as a
/// non-negative integer (overflow included).
pub type DependentFn = fn(u64) -> Option<u64>;

/// How many elements a tag's value must contain.
#[derive(Clone, Copy, Debug)]
pub enum CountSpec {
    /// No declared constraint; variable-length tags such as `StripOffsets`.
    Any,
    /// Exactly this many elements.
    Fixed(u64),
    /// Computed from another tag's resolved value.
    DependsOn(Tag, DependentFn),
}

/// The value substituted for an absent tag, where one is permitted.
#[derive(Clone, Debug)]
pub enum DefaultSpec {
    Fixed(Value),
    /// Computed from another tag's resolved value, materialized in the
    /// descriptor's first accepted type.
    DependsOn(Tag, DependentFn),
}

/// Everything the registry knows about one tag.
#[derive(Clone, Debug)]
pub struct TagDescriptor {
    tag: Tag,
    types: Vec<Type>,
    count: CountSpec,
    default: Option<DefaultSpec>,
}

impl TagDescriptor {
    /// A descriptor accepting the given encodings, with no count constraint
    /// and no default (i.e. mandatory wherever it is required).
    pub fn new(tag: Tag, types: &[Type]) -> Self {
        TagDescriptor {
            tag,
            types: types.to_vec(),
            count: CountSpec::Any,
            default: None,
        }
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = CountSpec::Fixed(count);
        self
    }

    pub fn with_count_from(mut self, dependency: Tag, f: DependentFn) -> Self {
        self.count = CountSpec::DependsOn(dependency, f);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(DefaultSpec::Fixed(value));
        self
    }

    pub fn with_default_from(mut self, dependency: Tag, f: DependentFn) -> Self {
        self.default = Some(DefaultSpec::DependsOn(dependency, f));
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn id(&self) -> u16 {
        self.tag.to_u16()
    }

    /// The accepted on-disk encodings, never empty in a built table.
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn accepts(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }

    /// The encoding a synthesized numeric default is materialized in.
    pub(crate) fn primary_type(&self) -> Type {
        self.types[0]
    }

    pub fn count(&self) -> &CountSpec {
        &self.count
    }

    pub fn default(&self) -> Option<&DefaultSpec> {
        self.default.as_ref()
    }

    /// Has any default, fixed or dependent.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The tag ids this descriptor's count and default depend on.
    fn dependencies(&self) -> impl Iterator<Item = u16> + '_ {
        let count_dep = match self.count {
            CountSpec::DependsOn(dep, _) => Some(dep.to_u16()),
            _ => None,
        };
        let default_dep = match &self.default {
            Some(DefaultSpec::DependsOn(dep, _)) => Some(dep.to_u16()),
            _ => None,
        };
        count_dep.into_iter().chain(default_dep)
    }
}

/// The process-wide registry of tag descriptors.
///
/// Built once, validated while building, immutable afterwards. Lookups are
/// side-effect-free and the table contains no interior mutability, so a
/// single instance may serve any number of concurrent validations.
#[derive(Debug)]
pub struct TagSchemaTable {
    descriptors: BTreeMap<u16, TagDescriptor>,
}

impl TagSchemaTable {
    /// Build a table, rejecting schemas that could misbehave at resolution
    /// time: duplicate ids, empty type sets, dependencies on tags the table
    /// does not define, and dependency cycles.
    pub fn new(descriptors: Vec<TagDescriptor>) -> Result<Self, SchemaError> {
        let mut map = BTreeMap::new();

        for desc in descriptors {
            if desc.types.is_empty() {
                return Err(SchemaError::EmptyTypeSet(desc.id()));
            }
            let id = desc.id();
            if map.insert(id, desc).is_some() {
                return Err(SchemaError::DuplicateTag(id));
            }
        }

        for desc in map.values() {
            for dep in desc.dependencies() {
                if !map.contains_key(&dep) {
                    return Err(SchemaError::MissingDependency(desc.id(), dep));
                }
            }
        }

        check_cycles(&map)?;

        Ok(TagSchemaTable { descriptors: map })
    }

    /// Look up the descriptor for a tag id.
    pub fn lookup(&self, tag: u16) -> Option<&TagDescriptor> {
        self.descriptors.get(&tag)
    }

    /// Iterate over all descriptors in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = &TagDescriptor> + '_ {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The canonical baseline TIFF table.
    pub fn baseline() -> Self {
        Self::new(baseline_descriptors()).expect("the baseline table is statically well formed")
    }
}

fn check_cycles(map: &BTreeMap<u16, TagDescriptor>) -> Result<(), SchemaError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit(
        id: u16,
        map: &BTreeMap<u16, TagDescriptor>,
        marks: &mut BTreeMap<u16, Mark>,
        path: &mut Vec<u16>,
    ) -> Result<(), SchemaError> {
        match marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Active) => {
                let start = path.iter().position(|&t| t == id).unwrap_or(0);
                let mut chain = path[start..].to_vec();
                chain.push(id);
                return Err(SchemaError::DependencyCycle(chain));
            }
            None => {}
        }

        marks.insert(id, Mark::Active);
        path.push(id);
        if let Some(desc) = map.get(&id) {
            for dep in desc.dependencies() {
                visit(dep, map, marks, path)?;
            }
        }
        path.pop();
        marks.insert(id, Mark::Done);
        Ok(())
    }

    let mut marks = BTreeMap::new();
    let mut path = Vec::new();
    for &id in map.keys() {
        visit(id, map, &mut marks, &mut path)?;
    }
    Ok(())
}

fn identity(value: u64) -> Option<u64> {
    Some(value)
}

fn two_to_the(bits: u64) -> Option<u64> {
    1u64.checked_shl(u32::try_from(bits).ok()?)
}

/// `2^bits - 1`, the largest representable sample value.
fn full_scale(bits: u64) -> Option<u64> {
    two_to_the(bits).map(|v| v - 1)
}

/// Red, green and blue sub-curves of `3 * 2 * BitsPerSample` entries total.
fn color_map_len(bits: u64) -> Option<u64> {
    bits.checked_mul(3 * 2)
}

fn gray_response_len(bits: u64) -> Option<u64> {
    two_to_the(bits)
}

/// The baseline descriptor set, in ascending tag order.
fn baseline_descriptors() -> Vec<TagDescriptor> {
    use Tag::*;
    use Type::*;

    vec![
        // A set of 32 flag bits distinguishing reduced-resolution pages,
        // multi-page subfiles and transparency masks.
        TagDescriptor::new(NewSubfileType, &[LONG])
            .with_count(1)
            .with_default(Value::Unsigned(0)),
        TagDescriptor::new(ImageWidth, &[SHORT, LONG]),
        TagDescriptor::new(ImageLength, &[SHORT, LONG]),
        // One entry per component; RGB data carries e.g. [8, 8, 8].
        TagDescriptor::new(BitsPerSample, &[SHORT])
            .with_count_from(SamplesPerPixel, identity)
            .with_default(Value::Short(1)),
        TagDescriptor::new(Compression, &[SHORT]).with_default(Value::Short(1)),
        // Required, and deliberately without a default.
        TagDescriptor::new(PhotometricInterpretation, &[SHORT]).with_count(1),
        TagDescriptor::new(CellWidth, &[SHORT]).with_count(1),
        TagDescriptor::new(CellLength, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(1)),
        TagDescriptor::new(FillOrder, &[SHORT]).with_count(1),
        TagDescriptor::new(ImageDescription, &[ASCII]),
        TagDescriptor::new(Make, &[ASCII]),
        TagDescriptor::new(Model, &[ASCII]),
        TagDescriptor::new(StripOffsets, &[SHORT, LONG]),
        TagDescriptor::new(Orientation, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(1)),
        TagDescriptor::new(SamplesPerPixel, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(1)),
        // The default of 2^32 - 1 is effectively infinity: one single strip.
        TagDescriptor::new(RowsPerStrip, &[SHORT, LONG])
            .with_count(1)
            .with_default(Value::Unsigned(u32::MAX)),
        TagDescriptor::new(StripByteCounts, &[SHORT, LONG]),
        TagDescriptor::new(MinSampleValue, &[SHORT])
            .with_count_from(SamplesPerPixel, identity)
            .with_default(Value::Short(0)),
        // Statistical only; never affects the visual appearance.
        TagDescriptor::new(MaxSampleValue, &[SHORT])
            .with_count_from(SamplesPerPixel, identity)
            .with_default_from(BitsPerSample, full_scale),
        TagDescriptor::new(XResolution, &[RATIONAL]).with_count(1),
        TagDescriptor::new(YResolution, &[RATIONAL]).with_count(1),
        TagDescriptor::new(PlanarConfiguration, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(1)),
        TagDescriptor::new(FreeOffsets, &[LONG]),
        TagDescriptor::new(FreeByteCounts, &[LONG]),
        // Tenths through hundred-thousandths of an optical density unit.
        TagDescriptor::new(GrayResponseUnit, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(2)),
        TagDescriptor::new(GrayResponseCurve, &[SHORT])
            .with_count_from(BitsPerSample, gray_response_len),
        TagDescriptor::new(ResolutionUnit, &[SHORT])
            .with_count(1)
            .with_default(Value::Short(2)),
        TagDescriptor::new(Software, &[ASCII]),
        // "YYYY:MM:DD HH:MM:SS" plus the terminating NUL.
        TagDescriptor::new(DateTime, &[ASCII]).with_count(20),
        TagDescriptor::new(Artist, &[ASCII]),
        TagDescriptor::new(HostComputer, &[ASCII]),
        TagDescriptor::new(ColorMap, &[SHORT]).with_count_from(BitsPerSample, color_map_len),
        TagDescriptor::new(SubIfd, &[LONG, IFD]),
        TagDescriptor::new(ExtraSamples, &[SHORT]),
        TagDescriptor::new(Xmp, &[BYTE]),
        TagDescriptor::new(Copyright, &[ASCII]),
    ]
}
