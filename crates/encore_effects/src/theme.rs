//! Theme documents.
//!
//! A theme is a TOML document of nested tables. Elements are addressed by a
//! `/`-separated path, e.g. `"ScreenSong/ParticleEffects"` plus an element
//! name, and store their fields under the theme's PascalCase keys.

use crate::error::{ThemeError, ThemeResult};
use crate::kind::ParticleKind;
use serde::Serialize;
use std::str::FromStr;
use toml::{Table, Value};

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// A parsed theme file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeDocument {
    root: Table,
}

impl ThemeDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level table.
    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Table at `path`, if every segment exists and is a table.
    #[must_use]
    pub fn section(&self, path: &str) -> Option<&Table> {
        segments(path).try_fold(&self.root, |table, segment| table.get(segment)?.as_table())
    }

    /// Table at `path`, creating missing segments.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NotATable`] when a segment holds a plain value.
    pub fn section_mut(&mut self, path: &str) -> ThemeResult<&mut Table> {
        let mut table = &mut self.root;
        for segment in segments(path) {
            table = table
                .entry(segment)
                .or_insert_with(|| Value::Table(Table::new()))
                .as_table_mut()
                .ok_or_else(|| ThemeError::NotATable {
                    segment: segment.to_owned(),
                })?;
        }
        Ok(table)
    }

    /// Serializes `record` and stores it as `<path>/<element>`, replacing any
    /// previous table of that name.
    ///
    /// # Errors
    ///
    /// Fails when the record cannot be represented in TOML or a path segment
    /// is not a table.
    pub fn write_element<T: Serialize>(&mut self, path: &str, element: &str, record: &T) -> ThemeResult<()> {
        let value = Value::try_from(record)?;
        self.section_mut(path)?.insert(element.to_owned(), value);
        Ok(())
    }

    /// Renders the document as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Serialize`] if the document cannot be rendered.
    pub fn to_toml_string(&self) -> ThemeResult<String> {
        Ok(toml::to_string(&self.root)?)
    }
}

impl FromStr for ThemeDocument {
    type Err = ThemeError;

    fn from_str(text: &str) -> ThemeResult<Self> {
        Ok(Self {
            root: toml::from_str(text)?,
        })
    }
}

/// Reads the fields of one element table, remembering every key that was
/// missing or had the wrong type.
#[derive(Debug)]
pub struct ElementReader<'a> {
    table: &'a Table,
    failed: Vec<String>,
}

impl<'a> ElementReader<'a> {
    /// Starts reading `table`.
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            failed: Vec::new(),
        }
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    fn read<T>(&mut self, key: &str, parse: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let value = self.table.get(key).and_then(parse);
        if value.is_none() {
            self.failed.push(key.to_owned());
        }
        value
    }

    /// A string field.
    pub fn string(&mut self, key: &str) -> Option<String> {
        self.read(key, |value| value.as_str().map(str::to_owned))
    }

    /// A number; integers, floats and numeric strings are accepted.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn number(&mut self, key: &str) -> Option<f32> {
        self.read(key, |value| match value {
            Value::Integer(i) => Some(*i as f32),
            Value::Float(f) => Some(*f as f32),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// A non-negative integer.
    pub fn count(&mut self, key: &str) -> Option<usize> {
        self.read(key, |value| match value {
            Value::Integer(i) => usize::try_from(*i).ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// A particle kind by name.
    pub fn kind(&mut self, key: &str) -> Option<ParticleKind> {
        self.read(key, |value| value.as_str()?.parse().ok())
    }

    /// Keys that failed so far.
    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Ends reading.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Incomplete`] naming every failed key.
    pub fn finish(self, element: &str) -> ThemeResult<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(ThemeError::Incomplete {
                element: element.to_owned(),
                fields: self.failed,
            })
        }
    }
}

/// Rounds to two decimals, the precision themes store fractional values at.
#[must_use]
pub fn round2(value: f32) -> f64 {
    (f64::from(value) * 100.0).round() / 100.0
}

/// On-disk layout of a particle effect element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EffectRecord {
    /// Texture name.
    pub skin: String,
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Depth.
    pub z: f64,
    /// Width.
    pub w: i64,
    /// Height.
    pub h: i64,
    /// Palette color name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Red, when no color name is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    /// Green, when no color name is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,
    /// Blue, when no color name is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    /// Alpha, when no color name is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    /// Particle kind.
    #[serde(rename = "Type")]
    pub kind: ParticleKind,
    /// Base particle size.
    pub size: f64,
    /// Capacity.
    pub max_number: i64,
}
