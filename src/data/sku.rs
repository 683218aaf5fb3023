//! Parsing of TF2 item variant keys ("skus")
//!
//! A sku encodes an item as `<defindex>;<quality>` followed by any number of
//! `;`-separated attributes, e.g. `5021;6`, `30;11;kt-3` or `378;5;u13;p4`.
//! The first segment groups all variants of the same underlying item.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the segments of a sku
pub const SKU_DELIMITER: char = ';';

/// Errors that can occur when parsing a sku
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkuError {
    /// The sku has no quality segment
    #[error("sku '{0}' is missing the quality segment")]
    MissingQuality(String),

    /// The defindex segment is not a number
    #[error("sku '{sku}' has an invalid defindex '{segment}'")]
    InvalidDefindex { sku: String, segment: String },

    /// The quality segment is not a number
    #[error("sku '{sku}' has an invalid quality '{segment}'")]
    InvalidQuality { sku: String, segment: String },
}

/// A single modifier segment of a sku
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuAttribute {
    Uncraftable,
    Untradable,
    Australium,
    Festive,
    /// Strange as an elevated quality on a non-strange item
    Strange,
    /// Killstreak tier (1 = basic, 2 = specialized, 3 = professional)
    Killstreak(u8),
    /// Unusual particle effect id
    Effect(u32),
    Paint(u32),
    /// Wear tier (1 = factory new .. 5 = battle scarred)
    Wear(u8),
    PaintKit(u32),
    Target(u32),
    CraftNumber(u32),
    CrateSeries(u32),
    OutputDefindex(u32),
    OutputQuality(u32),
    /// Anything not recognised, kept verbatim
    Other(String),
}

impl SkuAttribute {
    fn parse(segment: &str) -> Self {
        match segment {
            "uncraftable" => return Self::Uncraftable,
            "untradable" | "untradeable" => return Self::Untradable,
            "australium" => return Self::Australium,
            "festive" => return Self::Festive,
            "strange" => return Self::Strange,
            _ => {}
        }

        // Longer prefixes first: "pk" before "p", "od-"/"oq-" before others
        let numbered: [(&str, fn(u32) -> Option<SkuAttribute>); 10] = [
            ("kt-", |n| u8::try_from(n).ok().map(SkuAttribute::Killstreak)),
            ("td-", |n| Some(SkuAttribute::Target(n))),
            ("od-", |n| Some(SkuAttribute::OutputDefindex(n))),
            ("oq-", |n| Some(SkuAttribute::OutputQuality(n))),
            ("pk", |n| Some(SkuAttribute::PaintKit(n))),
            ("u", |n| Some(SkuAttribute::Effect(n))),
            ("p", |n| Some(SkuAttribute::Paint(n))),
            ("w", |n| u8::try_from(n).ok().map(SkuAttribute::Wear)),
            ("n", |n| Some(SkuAttribute::CraftNumber(n))),
            ("c", |n| Some(SkuAttribute::CrateSeries(n))),
        ];

        for (prefix, build) in numbered {
            if let Some(value) = segment
                .strip_prefix(prefix)
                .and_then(|rest| rest.parse::<u32>().ok())
                .and_then(build)
            {
                return value;
            }
        }

        Self::Other(segment.to_string())
    }
}

impl fmt::Display for SkuAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncraftable => write!(f, "uncraftable"),
            Self::Untradable => write!(f, "untradable"),
            Self::Australium => write!(f, "australium"),
            Self::Festive => write!(f, "festive"),
            Self::Strange => write!(f, "strange"),
            Self::Killstreak(tier) => write!(f, "kt-{}", tier),
            Self::Effect(id) => write!(f, "u{}", id),
            Self::Paint(id) => write!(f, "p{}", id),
            Self::Wear(tier) => write!(f, "w{}", tier),
            Self::PaintKit(id) => write!(f, "pk{}", id),
            Self::Target(id) => write!(f, "td-{}", id),
            Self::CraftNumber(n) => write!(f, "n{}", n),
            Self::CrateSeries(n) => write!(f, "c{}", n),
            Self::OutputDefindex(id) => write!(f, "od-{}", id),
            Self::OutputQuality(id) => write!(f, "oq-{}", id),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// A fully parsed sku
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sku {
    /// Base item identifier
    pub defindex: u32,
    /// Item quality (6 = unique, 11 = strange, ...)
    pub quality: u32,
    /// Remaining modifier segments, in their original order
    pub attributes: Vec<SkuAttribute>,
}

impl Sku {
    /// Returns true if the sku carries the given attribute
    pub fn has(&self, attribute: &SkuAttribute) -> bool {
        self.attributes.contains(attribute)
    }

    pub fn is_australium(&self) -> bool {
        self.has(&SkuAttribute::Australium)
    }
}

/// Returns the base item identifier segment of a sku without parsing the rest
///
/// Every sku yields a segment, even a malformed one; an empty sku yields "".
pub fn base_segment(sku: &str) -> &str {
    sku.split(SKU_DELIMITER).next().unwrap_or(sku)
}

impl FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(SKU_DELIMITER);

        let defindex_segment = segments.next().unwrap_or_default();
        let defindex = defindex_segment
            .parse::<u32>()
            .map_err(|_| SkuError::InvalidDefindex {
                sku: s.to_string(),
                segment: defindex_segment.to_string(),
            })?;

        let quality_segment = segments
            .next()
            .ok_or_else(|| SkuError::MissingQuality(s.to_string()))?;
        let quality = quality_segment
            .parse::<u32>()
            .map_err(|_| SkuError::InvalidQuality {
                sku: s.to_string(),
                segment: quality_segment.to_string(),
            })?;

        let attributes = segments
            .filter(|segment| !segment.is_empty())
            .map(SkuAttribute::parse)
            .collect();

        Ok(Sku {
            defindex,
            quality,
            attributes,
        })
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.defindex, SKU_DELIMITER, self.quality)?;
        for attribute in &self.attributes {
            write!(f, "{}{}", SKU_DELIMITER, attribute)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_sku() {
        let sku: Sku = "5021;6".parse().unwrap();
        assert_eq!(sku.defindex, 5021);
        assert_eq!(sku.quality, 6);
        assert!(sku.attributes.is_empty());
    }

    #[test]
    fn test_parse_sku_with_attributes() {
        let sku: Sku = "200;11;australium;kt-3;festive".parse().unwrap();
        assert_eq!(sku.defindex, 200);
        assert_eq!(sku.quality, 11);
        assert_eq!(
            sku.attributes,
            vec![
                SkuAttribute::Australium,
                SkuAttribute::Killstreak(3),
                SkuAttribute::Festive,
            ]
        );
        assert!(sku.is_australium());
    }

    #[test]
    fn test_parse_numbered_attributes() {
        let sku: Sku = "15013;15;u703;p1;w3;pk214;td-5;n100;c30;od-6522;oq-6"
            .parse()
            .unwrap();
        assert_eq!(
            sku.attributes,
            vec![
                SkuAttribute::Effect(703),
                SkuAttribute::Paint(1),
                SkuAttribute::Wear(3),
                SkuAttribute::PaintKit(214),
                SkuAttribute::Target(5),
                SkuAttribute::CraftNumber(100),
                SkuAttribute::CrateSeries(30),
                SkuAttribute::OutputDefindex(6522),
                SkuAttribute::OutputQuality(6),
            ]
        );
    }

    #[test]
    fn test_unknown_attribute_is_kept() {
        let sku: Sku = "30;6;mystery".parse().unwrap();
        assert_eq!(sku.attributes, vec![SkuAttribute::Other("mystery".to_string())]);
    }

    #[test]
    fn test_display_reproduces_sku() {
        for raw in ["5021;6", "30;11;kt-3", "378;5;u13;p4;uncraftable", "1;6;mystery"] {
            let sku: Sku = raw.parse().unwrap();
            assert_eq!(sku.to_string(), raw);
        }
    }

    #[test]
    fn test_untradeable_spelling_normalises() {
        let sku: Sku = "5021;6;untradeable".parse().unwrap();
        assert!(sku.has(&SkuAttribute::Untradable));
        assert_eq!(sku.to_string(), "5021;6;untradable");
    }

    #[test]
    fn test_missing_quality_is_error() {
        let err = "5021".parse::<Sku>().unwrap_err();
        assert_eq!(err, SkuError::MissingQuality("5021".to_string()));
    }

    #[test]
    fn test_invalid_defindex_is_error() {
        let err = "abc;6".parse::<Sku>().unwrap_err();
        assert!(matches!(err, SkuError::InvalidDefindex { .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_invalid_quality_is_error() {
        let err = "5021;unique".parse::<Sku>().unwrap_err();
        assert!(matches!(err, SkuError::InvalidQuality { .. }));
    }

    #[test]
    fn test_base_segment() {
        assert_eq!(base_segment("5021;6"), "5021");
        assert_eq!(base_segment("30;11;kt-3"), "30");
        assert_eq!(base_segment("5021"), "5021");
        assert_eq!(base_segment(""), "");
    }
}
