//! Per-class background colors for hardware-blend rendering.
//!
//! The palette is configured from a compact string of `:`-separated groups,
//! each `classId,r,g,b,a`, e.g. `0,0.0,1.0,0.0,0.3:1,0.0,1.0,1.0,0.3`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::overlay::color::Color;

/// Number of classes the hardware blender can color.
pub const MAX_BG_CLR: usize = 20;

/// Palette used when none is configured.
pub const DEFAULT_PALETTE: &str =
    "0,0.0,1.0,0.0,0.3:1,0.0,1.0,1.0,0.3:2,0.0,0.0,1.0,0.3:3,1.0,1.0,0.0,0.3";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEntry {
    pub class_id: u32,
    pub color: Color,
}

/// Bounded, ordered set of class colors with unique class ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    entries: Vec<ColorEntry>,
    bound: usize,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(MAX_BG_CLR)
    }
}

impl ColorPalette {
    /// Empty palette accepting class ids below `bound`.
    pub fn new(bound: usize) -> Self {
        Self {
            entries: Vec::with_capacity(bound),
            bound,
        }
    }

    /// The palette built from [`DEFAULT_PALETTE`].
    pub fn builtin() -> Self {
        // The builtin string is always within bounds.
        Self::parse(DEFAULT_PALETTE).unwrap_or_default()
    }

    /// Parse the `classId,r,g,b,a:...` format with the default bound.
    pub fn parse(attr: &str) -> Result<Self, ConfigError> {
        Self::parse_bounded(attr, MAX_BG_CLR)
    }

    /// Parse with an explicit class-id / entry-count bound.
    pub fn parse_bounded(attr: &str, bound: usize) -> Result<Self, ConfigError> {
        let mut palette = Self::new(bound);
        let groups = attr.split(':').map(str::trim).filter(|g| !g.is_empty());
        for (group, text) in groups.enumerate() {
            if group >= bound {
                return Err(ConfigError::TooManyPaletteEntries { bound });
            }
            let entry = parse_group(group, text, bound)?;
            palette.insert(group, entry)?;
        }
        Ok(palette)
    }

    fn insert(&mut self, group: usize, entry: ColorEntry) -> Result<(), ConfigError> {
        if self.entries.iter().any(|e| e.class_id == entry.class_id) {
            return Err(ConfigError::DuplicateClassId {
                group,
                class_id: entry.class_id,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Find the entry for `class_id`, returning its index and color.
    ///
    /// Linear scan; class ids are unique so the first match is the only one.
    pub fn lookup(&self, class_id: i32) -> Option<(usize, Color)> {
        let class_id = u32::try_from(class_id).ok()?;
        self.entries
            .iter()
            .position(|e| e.class_id == class_id)
            .map(|idx| (idx, self.entries[idx].color))
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bound(&self) -> usize {
        self.bound
    }
}

fn parse_group(group: usize, text: &str, bound: usize) -> Result<ColorEntry, ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedPalette { group, reason };

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(malformed(format!(
            "expected classId,r,g,b,a but found {} fields",
            fields.len()
        )));
    }

    let class_id: u32 = fields[0]
        .parse()
        .map_err(|_| malformed(format!("invalid class id {:?}", fields[0])))?;
    if class_id as usize >= bound {
        return Err(ConfigError::ClassIdOutOfRange {
            group,
            class_id,
            bound,
        });
    }

    let mut channels = [0.0f32; 4];
    for (slot, field) in channels.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse()
            .map_err(|_| malformed(format!("invalid color channel {:?}", field)))?;
    }
    let color = Color::new(channels[0], channels[1], channels[2], channels[3]);
    if !color.is_normalized() {
        return Err(malformed(format!(
            "color channels {:?} outside [0, 1]",
            channels
        )));
    }

    Ok(ColorEntry { class_id, color })
}

impl FromStr for ColorPalette {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(":")?;
            }
            let c = entry.color;
            write!(
                f,
                "{},{:.6},{:.6},{:.6},{:.6}",
                entry.class_id, c.red, c.green, c.blue, c.alpha
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_entries() {
        let palette = ColorPalette::parse("0,0.0,1.0,0.0,0.3:1,0.0,1.0,1.0,0.3").unwrap();
        assert_eq!(
            palette.entries(),
            &[
                ColorEntry {
                    class_id: 0,
                    color: Color::new(0.0, 1.0, 0.0, 0.3),
                },
                ColorEntry {
                    class_id: 1,
                    color: Color::new(0.0, 1.0, 1.0, 0.3),
                },
            ]
        );
    }

    #[test]
    fn test_class_id_out_of_range_is_rejected() {
        let err = ColorPalette::parse("0,0.0,1.0,0.0,0.3:20,0.0,1.0,1.0,0.3").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ClassIdOutOfRange {
                group: 1,
                class_id: 20,
                bound: MAX_BG_CLR
            }
        ));
    }

    #[test]
    fn test_too_many_groups_is_rejected() {
        let attr = (0..3)
            .map(|id| format!("{id},0.1,0.2,0.3,0.4"))
            .collect::<Vec<_>>()
            .join(":");
        let err = ColorPalette::parse_bounded(&attr, 2).unwrap_err();
        assert!(matches!(err, ConfigError::TooManyPaletteEntries { bound: 2 }));
    }

    #[test]
    fn test_malformed_groups() {
        assert!(matches!(
            ColorPalette::parse("0,1.0,1.0"),
            Err(ConfigError::MalformedPalette { group: 0, .. })
        ));
        assert!(matches!(
            ColorPalette::parse("x,1.0,1.0,1.0,1.0"),
            Err(ConfigError::MalformedPalette { .. })
        ));
        assert!(matches!(
            ColorPalette::parse("-1,1.0,1.0,1.0,1.0"),
            Err(ConfigError::MalformedPalette { .. })
        ));
        assert!(matches!(
            ColorPalette::parse("0,2.0,1.0,1.0,1.0"),
            Err(ConfigError::MalformedPalette { .. })
        ));
    }

    #[test]
    fn test_duplicate_class_id() {
        let err = ColorPalette::parse("3,0,0,0,1:3,1,1,1,1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateClassId {
                group: 1,
                class_id: 3
            }
        ));
    }

    #[test]
    fn test_trailing_separator_and_whitespace() {
        let palette = ColorPalette::parse(" 2, 0.5, 0.5, 0.5, 1.0 :").unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.lookup(2), Some((0, Color::new(0.5, 0.5, 0.5, 1.0))));
    }

    #[test]
    fn test_lookup() {
        let palette = ColorPalette::builtin();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.lookup(3).map(|(idx, _)| idx), Some(3));
        assert_eq!(palette.lookup(7), None);
        assert_eq!(palette.lookup(-1), None);
    }

    #[test]
    fn test_display_round_trips_format() {
        let palette = ColorPalette::parse("0,0.0,1.0,0.0,0.3:1,0.0,1.0,1.0,0.3").unwrap();
        assert_eq!(
            palette.to_string(),
            "0,0.000000,1.000000,0.000000,0.300000:1,0.000000,1.000000,1.000000,0.300000"
        );
        assert_eq!(palette.to_string().parse::<ColorPalette>().unwrap(), palette);
    }
}
