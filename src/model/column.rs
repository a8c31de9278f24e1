//! Header occurrences, header groups, and column ranges.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Word;

/// One matched header keyword on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderOccurrence {
    /// The keyword text
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Line top
    pub y: f32,
    /// Word width
    pub width: f32,
    /// Word height
    pub height: f32,
    /// Font name
    pub font: String,
    /// Font size
    pub size: f32,
    /// Color as a `rgb(r,g,b)` string
    pub color: String,
}

impl HeaderOccurrence {
    /// Build an occurrence from a matched header word.
    pub fn from_word(word: &Word) -> Self {
        Self {
            text: word.text.clone(),
            x: word.left,
            y: word.top,
            width: word.width,
            height: word.height,
            font: word.font.clone(),
            size: word.size,
            color: word.color.css(),
        }
    }
}

/// Header-group map: label to occurrence list, keys in first-seen order.
///
/// Serialized as a JSON object. Merging keeps the original key order but
/// lets a later page's group replace an earlier one with the same label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderGroups {
    entries: Vec<(String, Vec<HeaderOccurrence>)>,
}

impl HeaderGroups {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the map holds no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Occurrences recorded for `label`.
    pub fn get(&self, label: &str) -> Option<&[HeaderOccurrence]> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, occs)| occs.as_slice())
    }

    /// Append an occurrence to `label`'s group, creating the group at the
    /// end of the map if it does not exist yet.
    pub fn push(&mut self, label: &str, occurrence: HeaderOccurrence) {
        if let Some((_, occs)) = self.entries.iter_mut().find(|(key, _)| key == label) {
            occs.push(occurrence);
        } else {
            self.entries.push((label.to_string(), vec![occurrence]));
        }
    }

    /// Replace `label`'s group entirely, appending it if absent.
    pub fn replace(&mut self, label: &str, occurrences: Vec<HeaderOccurrence>) {
        if let Some((_, occs)) = self.entries.iter_mut().find(|(key, _)| key == label) {
            *occs = occurrences;
        } else {
            self.entries.push((label.to_string(), occurrences));
        }
    }

    /// Merge another map into this one; groups from `other` win on key
    /// collision.
    pub fn merge_from(&mut self, other: &HeaderGroups) {
        for (label, occs) in &other.entries {
            self.replace(label, occs.clone());
        }
    }

    /// Iterate groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderOccurrence])> {
        self.entries
            .iter()
            .map(|(key, occs)| (key.as_str(), occs.as_slice()))
    }
}

impl Serialize for HeaderGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, occs) in &self.entries {
            map.serialize_entry(label, occs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = HeaderGroups;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of header labels to occurrence lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = HeaderGroups::new();
                while let Some((label, occs)) =
                    access.next_entry::<String, Vec<HeaderOccurrence>>()?
                {
                    groups.replace(&label, occs);
                }
                Ok(groups)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// A half-open horizontal interval `[start_x, end_x)` mapping position to
/// a logical column label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    /// Column label
    pub header: String,
    /// Inclusive left boundary
    pub start_x: f32,
    /// Exclusive right boundary
    pub end_x: f32,
}

impl ColumnRange {
    /// Create a column range.
    pub fn new(header: impl Into<String>, start_x: f32, end_x: f32) -> Self {
        Self {
            header: header.into(),
            start_x,
            end_x,
        }
    }

    /// Whether `x` falls inside the interval.
    pub fn contains(&self, x: f32) -> bool {
        self.start_x <= x && x < self.end_x
    }
}
