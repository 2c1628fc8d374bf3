//! The four baseline image classes and their required tag sets.

use std::fmt;

use crate::error::SchemaError;
use crate::ifd::ResolvedIfd;
use crate::schema::TagSchemaTable;
use crate::tags::Tag;

/// A baseline TIFF image class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageClass {
    /// Two colors, black and white.
    Bilevel,
    /// Bilevel generalized to shades of gray.
    Grayscale,
    /// One component per pixel, used as an index into a color map.
    PaletteColor,
    /// Three components per pixel: red, green and blue. No color map.
    Rgb,
}

impl ImageClass {
    pub const ALL: [ImageClass; 4] = [
        ImageClass::Bilevel,
        ImageClass::Grayscale,
        ImageClass::PaletteColor,
        ImageClass::Rgb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImageClass::Bilevel => "bilevel",
            ImageClass::Grayscale => "grayscale",
            ImageClass::PaletteColor => "palette-color",
            ImageClass::Rgb => "RGB",
        }
    }

    /// Specificity used to break ties when several classes match; the
    /// requirement sets grow strictly from bilevel up.
    fn rank(&self) -> u8 {
        match self {
            ImageClass::Bilevel => 0,
            ImageClass::Grayscale => 1,
            ImageClass::PaletteColor => 2,
            ImageClass::Rgb => 3,
        }
    }

    fn required(&self) -> &'static [Tag] {
        use Tag::*;

        match self {
            ImageClass::Bilevel => &[
                ImageWidth,
                ImageLength,
                Compression,
                PhotometricInterpretation,
                StripOffsets,
                RowsPerStrip,
                StripByteCounts,
                XResolution,
                YResolution,
                ResolutionUnit,
            ],
            ImageClass::Grayscale => &[
                ImageWidth,
                ImageLength,
                BitsPerSample,
                Compression,
                PhotometricInterpretation,
                StripOffsets,
                RowsPerStrip,
                StripByteCounts,
                XResolution,
                YResolution,
                ResolutionUnit,
            ],
            ImageClass::PaletteColor => &[
                ImageWidth,
                ImageLength,
                BitsPerSample,
                Compression,
                PhotometricInterpretation,
                StripOffsets,
                RowsPerStrip,
                StripByteCounts,
                XResolution,
                YResolution,
                ResolutionUnit,
                ColorMap,
            ],
            ImageClass::Rgb => &[
                ImageWidth,
                ImageLength,
                BitsPerSample,
                Compression,
                PhotometricInterpretation,
                StripOffsets,
                SamplesPerPixel,
                RowsPerStrip,
                StripByteCounts,
                XResolution,
                YResolution,
                ResolutionUnit,
            ],
        }
    }
}

impl fmt::Display for ImageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of profile detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMatch {
    /// Exactly one most specific class matched.
    Match(ImageClass),
    /// Several classes of equal specificity matched.
    Ambiguous(Vec<ImageClass>),
    /// No class had all its required tags present.
    NoMatch,
}

/// The required-tag sets of all four classes, projected once from a schema
/// table and immutable afterwards.
#[derive(Debug)]
pub struct ProfileSet {
    // Indexed by ImageClass::rank, each sorted ascending by tag id.
    required: [Vec<Tag>; 4],
}

impl ProfileSet {
    /// Project the profiles from a table, verifying that every required tag
    /// is actually defined there.
    pub fn new(table: &TagSchemaTable) -> Result<Self, SchemaError> {
        let mut required: [Vec<Tag>; 4] = Default::default();

        for class in ImageClass::ALL {
            let mut tags = class.required().to_vec();
            for tag in &tags {
                if table.lookup(tag.to_u16()).is_none() {
                    return Err(SchemaError::UnknownProfileTag(class.name(), tag.to_u16()));
                }
            }
            tags.sort_by_key(|tag| tag.to_u16());
            required[usize::from(class.rank())] = tags;
        }

        Ok(ProfileSet { required })
    }

    /// The tags an image of this class must carry, in ascending id order.
    pub fn required_tags(&self, class: ImageClass) -> &[Tag] {
        &self.required[usize::from(class.rank())]
    }

    /// Find the class this directory belongs to, judged by tag presence.
    ///
    /// A class matches when every one of its required tags is present in the
    /// directory as given; among several matches the most specific wins.
    pub fn detect(&self, ifd: &ResolvedIfd) -> ProfileMatch {
        let candidates: Vec<ImageClass> = ImageClass::ALL
            .into_iter()
            .filter(|class| {
                self.required_tags(*class)
                    .iter()
                    .all(|tag| ifd.contains(tag.to_u16()))
            })
            .collect();

        let Some(best) = candidates.iter().map(ImageClass::rank).max() else {
            return ProfileMatch::NoMatch;
        };

        let top: Vec<ImageClass> = candidates
            .into_iter()
            .filter(|class| class.rank() == best)
            .collect();

        if let [class] = top.as_slice() {
            ProfileMatch::Match(*class)
        } else {
            ProfileMatch::Ambiguous(top)
        }
    }
}
