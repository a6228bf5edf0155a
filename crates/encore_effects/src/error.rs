//! Error types for theme I/O.

use thiserror::Error;

/// Theme load and save errors.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No table at the requested theme path.
    #[error("theme section not found: {0}")]
    MissingSection(String),

    /// One or more fields were missing or malformed.
    #[error("theme element '{element}' is incomplete: {}", .fields.join(", "))]
    Incomplete {
        /// Element name.
        element: String,
        /// Keys that could not be read.
        fields: Vec<String>,
    },

    /// The named color is not in the palette of the skin.
    #[error("unknown color '{name}' in skin {skin_index}")]
    UnknownColor {
        /// Palette color name.
        name: String,
        /// Skin searched.
        skin_index: usize,
    },

    /// Save requested for an element whose theme never loaded.
    #[error("theme was not loaded")]
    NotLoaded,

    /// A path segment exists but is not a table.
    #[error("theme path segment '{segment}' is not a table")]
    NotATable {
        /// Offending segment.
        segment: String,
    },

    /// Theme text is not valid TOML.
    #[error("theme parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Theme could not be written back as TOML.
    #[error("theme serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_lists_fields() {
        let error = ThemeError::Incomplete {
            element: "SnowEffect".to_owned(),
            fields: vec!["X".to_owned(), "Type".to_owned()],
        };
        assert_eq!(
            error.to_string(),
            "theme element 'SnowEffect' is incomplete: X, Type"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse: Result<toml::Table, _> = toml::from_str("X = ");
        let error: ThemeError = parse.unwrap_err().into();
        assert!(matches!(error, ThemeError::Parse(_)));
    }
}
