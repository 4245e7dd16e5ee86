//! Output shapes returned to callers.
//!
//! | Selector | Shape | Result |
//! |----------|-------|--------|
//! | `None` / `"dict"` | [`OutputShape::Records`] | ordered key/value records |
//! | `"df"` | [`OutputShape::Frame`] | [`DataFrame`] |
//! | `"raw"` | [`OutputShape::Raw`] | parsed JSON, untouched |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Column holding array items that are not JSON objects.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    #[default]
    Records,
    Frame,
    Raw,
}

impl OutputShape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Records => "dict",
            Self::Frame => "df",
            Self::Raw => "raw",
        }
    }

    /// Resolve an optional string selector. Absence means [`OutputShape::Records`].
    pub fn from_selector(selector: Option<&str>) -> Result<Self, ValidationError> {
        selector.map_or(Ok(Self::Records), |value| value.parse())
    }
}

impl FromStr for OutputShape {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dict" => Ok(Self::Records),
            "df" => Ok(Self::Frame),
            "raw" => Ok(Self::Raw),
            other => Err(ValidationError::InvalidOutputShape {
                value: other.to_owned(),
            }),
        }
    }
}

impl Display for OutputShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabular view of a record sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Build a frame whose columns are the union of record keys in first-seen order.
    /// Cells missing from a record are `null`. Items that are not objects land in
    /// [`SCALAR_COLUMN`].
    pub fn from_records(records: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut add_column = |name: &str| {
            if !columns.iter().any(|column| column == name) {
                columns.push(name.to_owned());
            }
        };
        for record in records {
            match record {
                Value::Object(fields) => fields.keys().for_each(|key| add_column(key.as_str())),
                _ => add_column(SCALAR_COLUMN),
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| match record {
                        Value::Object(fields) => fields.get(column).cloned().unwrap_or(Value::Null),
                        scalar if column == SCALAR_COLUMN => scalar.clone(),
                        _ => Value::Null,
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|values| &values[index])
    }
}

/// Normalized response in the caller-selected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Body items in received order; usually JSON objects.
    Records(Vec<Value>),
    Frame(DataFrame),
    Raw(Value),
}

impl Output {
    pub const fn shape(&self) -> OutputShape {
        match self {
            Self::Records(_) => OutputShape::Records,
            Self::Frame(_) => OutputShape::Frame,
            Self::Raw(_) => OutputShape::Raw,
        }
    }

    pub fn into_records(self) -> Option<Vec<Value>> {
        match self {
            Self::Records(records) => Some(records),
            _ => None,
        }
    }

    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn into_raw(self) -> Option<Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }
}

/// Reshape a parsed, non-empty body. Any valid JSON is accepted.
pub fn normalize(body: Value, shape: OutputShape) -> Output {
    match shape {
        OutputShape::Raw => Output::Raw(body),
        OutputShape::Records => Output::Records(into_records(body)),
        OutputShape::Frame => Output::Frame(DataFrame::from_records(&into_records(body))),
    }
}

/// Arrays yield their items; any other value becomes a single record.
fn into_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        other => vec![other],
    }
}
