//! Level layouts
//!
//! A level is a rectangular grid of brick thicknesses, one row per line with
//! `;` separated cells. An empty cell means no brick. Every level in a
//! [`LevelSet`] is validated when the set is built, so switching levels
//! mid-game cannot fail.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cell separator in level files
pub const CELL_SEPARATOR: char = ';';

/// Built-in levels embedded at compile time
const BUILTIN_LEVELS: [&str; 3] = [
    include_str!("../levels/level1.csv"),
    include_str!("../levels/level2.csv"),
    include_str!("../levels/level3.csv"),
];

/// Raised when a level source violates the grid format
#[derive(Debug, Error)]
pub enum LevelFormatError {
    #[error("level is in wrong format: line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error(
        "level is in wrong format: line {line}, column {column}: `{token}` is not a brick thickness"
    )]
    InvalidCell {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("level is in wrong format: at least one line of bricks is required")]
    NoRows,
    #[error("level is in wrong format: no bricks to destroy")]
    NoBricks,
    #[error("level set is empty")]
    EmptySet,
    #[error("no level files found in {0}")]
    NoLevels(String),
    #[error("failed to read level: {0}")]
    Io(#[from] std::io::Error),
}

/// Validated brick thickness grid (0 = empty cell)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct LevelLayout {
    rows: Vec<Vec<u32>>,
}

#[derive(Deserialize)]
struct RawLayout {
    rows: Vec<Vec<u32>>,
}

impl TryFrom<RawLayout> for LevelLayout {
    type Error = LevelFormatError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Self::new(raw.rows)
    }
}

impl LevelLayout {
    /// Validate a thickness grid: rectangular, at least one row and one brick
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, LevelFormatError> {
        let Some(expected) = rows.first().map(Vec::len) else {
            return Err(LevelFormatError::NoRows);
        };
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(LevelFormatError::RaggedRow {
                line: index + 1,
                expected,
                found: row.len(),
            });
        }
        let layout = Self { rows };
        if layout.brick_count() == 0 {
            return Err(LevelFormatError::NoBricks);
        }
        Ok(layout)
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of cells holding a brick
    pub fn brick_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&t| t > 0).count()
    }
}

/// Parse one level from text
pub fn parse_level(text: &str) -> Result<LevelLayout, LevelFormatError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    let mut columns = 0;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split(CELL_SEPARATOR).collect();
        if columns == 0 {
            columns = tokens.len();
        }
        if tokens.len() != columns {
            return Err(LevelFormatError::RaggedRow {
                line: line_no,
                expected: columns,
                found: tokens.len(),
            });
        }

        let mut row = Vec::with_capacity(columns);
        for (column, token) in tokens.iter().enumerate() {
            let token = token.trim();
            let thickness = if token.is_empty() {
                0
            } else {
                token
                    .parse::<u32>()
                    .map_err(|_| LevelFormatError::InvalidCell {
                        line: line_no,
                        column: column + 1,
                        token: token.to_string(),
                    })?
            };
            row.push(thickness);
        }
        rows.push(row);
    }

    LevelLayout::new(rows)
}

/// Ordered, validated levels for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelSet")]
pub struct LevelSet {
    levels: Vec<LevelLayout>,
}

#[derive(Deserialize)]
struct RawLevelSet {
    levels: Vec<LevelLayout>,
}

impl TryFrom<RawLevelSet> for LevelSet {
    type Error = LevelFormatError;

    fn try_from(raw: RawLevelSet) -> Result<Self, Self::Error> {
        if raw.levels.is_empty() {
            return Err(LevelFormatError::EmptySet);
        }
        Ok(Self { levels: raw.levels })
    }
}

impl LevelSet {
    /// Parse every source; fails on the first bad level
    pub fn parse<S: AsRef<str>>(sources: &[S]) -> Result<Self, LevelFormatError> {
        let levels = sources
            .iter()
            .map(|s| parse_level(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if levels.is_empty() {
            return Err(LevelFormatError::EmptySet);
        }
        Ok(Self { levels })
    }

    /// The levels shipped with the game
    pub fn builtin() -> Self {
        let levels = BUILTIN_LEVELS
            .iter()
            .filter_map(|text| match parse_level(text) {
                Ok(layout) => Some(layout),
                Err(e) => {
                    log::warn!("Skipping broken built-in level: {}", e);
                    None
                }
            })
            .collect();
        Self { levels }
    }

    /// Load `level1.csv`, `level2.csv`, ... from a directory until one is missing
    pub fn from_dir(dir: &Path) -> Result<Self, LevelFormatError> {
        let mut sources = Vec::new();
        loop {
            let path = dir.join(format!("level{}.csv", sources.len() + 1));
            if !path.is_file() {
                break;
            }
            sources.push(fs::read_to_string(&path)?);
        }
        if sources.is_empty() {
            log::warn!("No level files in {}", dir.display());
            return Err(LevelFormatError::NoLevels(dir.display().to_string()));
        }
        log::info!("Loaded {} levels from {}", sources.len(), dir.display());
        Self::parse(&sources)
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Layout for a 1-based level number
    pub fn get(&self, level: u32) -> Option<&LevelLayout> {
        (level as usize)
            .checked_sub(1)
            .and_then(|index| self.levels.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_with_gaps() {
        let layout = parse_level("1;;2\n;3;\n").unwrap();
        assert_eq!(layout.rows(), &[vec![1, 0, 2], vec![0, 3, 0]]);
        assert_eq!(layout.column_count(), 3);
        assert_eq!(layout.brick_count(), 3);
    }

    #[test]
    fn test_parse_level_accepts_crlf_and_padding() {
        let layout = parse_level("1 ; 2\r\n 3;\r\n").unwrap();
        assert_eq!(layout.rows(), &[vec![1, 2], vec![3, 0]]);
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let err = parse_level("1;1;1\n1;1\n").unwrap_err();
        assert!(matches!(
            err,
            LevelFormatError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_non_integer_cell_is_rejected() {
        let err = parse_level("1;x;1\n").unwrap_err();
        assert!(matches!(err, LevelFormatError::InvalidCell { line: 1, column: 2, .. }));
        assert!(matches!(
            parse_level("1;-2\n").unwrap_err(),
            LevelFormatError::InvalidCell { .. }
        ));
    }

    #[test]
    fn test_empty_and_brickless_levels_are_rejected() {
        assert!(matches!(parse_level("").unwrap_err(), LevelFormatError::NoRows));
        assert!(matches!(parse_level(";;\n;;\n").unwrap_err(), LevelFormatError::NoBricks));
    }

    #[test]
    fn test_builtin_levels_are_valid() {
        let levels = LevelSet::builtin();
        assert_eq!(levels.len(), BUILTIN_LEVELS.len());
        assert!(levels.get(0).is_none());
        assert!(levels.get(1).is_some());
        assert!(levels.get(4).is_none());
    }

    #[test]
    fn test_level_set_fails_on_any_bad_source() {
        assert!(LevelSet::parse(&["1;1", "1;1\n1"]).is_err());
        assert!(matches!(
            LevelSet::parse::<&str>(&[]).unwrap_err(),
            LevelFormatError::EmptySet
        ));
    }

    #[test]
    fn test_deserialize_validates_layouts() {
        let levels: LevelSet =
            serde_json::from_str(r#"{ "levels": [{ "rows": [[1, 0], [0, 2]] }] }"#).unwrap();
        assert_eq!(levels.get(1).unwrap().brick_count(), 2);

        let json = serde_json::to_string(&levels).unwrap();
        assert_eq!(serde_json::from_str::<LevelSet>(&json).unwrap(), levels);

        for bad in [
            r#"{ "levels": [] }"#,
            r#"{ "levels": [{ "rows": [] }] }"#,
            r#"{ "levels": [{ "rows": [[1, 1], [1]] }] }"#,
            r#"{ "levels": [{ "rows": [[0, 0]] }] }"#,
        ] {
            assert!(serde_json::from_str::<LevelSet>(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_layout_new_reports_ragged_line() {
        let err = LevelLayout::new(vec![vec![1, 1], vec![1, 1], vec![1]]).unwrap_err();
        assert!(matches!(
            err,
            LevelFormatError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_from_missing_dir() {
        let err = LevelSet::from_dir(Path::new("/nonexistent/brickfall-levels")).unwrap_err();
        assert!(matches!(err, LevelFormatError::NoLevels(_)));
    }
}
