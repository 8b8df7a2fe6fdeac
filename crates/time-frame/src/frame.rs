//! Time-Indexed Frame

use crate::error::FrameError;
use crate::index::TimeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed column storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
}

impl ColumnData {
    /// Number of values
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer values, if this is an integer column
    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            ColumnData::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Float values, if this is a float column
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// Named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Float(values),
        }
    }

    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Int(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }
}

/// Leading key columns of a panel frame, one key tuple per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupKeys")]
pub struct GroupKeys {
    names: Vec<String>,
    values: Vec<Vec<String>>,
}

impl GroupKeys {
    /// Key columns `names`, with `values[row]` holding one entry per name
    pub fn new(names: Vec<String>, values: Vec<Vec<String>>) -> Result<Self, FrameError> {
        if names.is_empty() {
            return Err(FrameError::EmptyGroupKeys);
        }
        if let Some(row) = values.iter().find(|row| row.len() != names.len()) {
            return Err(FrameError::LengthMismatch {
                name: "group key".to_string(),
                expected: names.len(),
                got: row.len(),
            });
        }
        Ok(Self { names, values })
    }

    /// Single key column
    pub fn single(name: impl Into<String>, values: Vec<String>) -> Result<Self, FrameError> {
        Self::new(vec![name.into()], values.into_iter().map(|v| vec![v]).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Key tuple of `row`
    pub fn row(&self, row: usize) -> &[String] {
        &self.values[row]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Deserialize)]
struct RawGroupKeys {
    names: Vec<String>,
    values: Vec<Vec<String>>,
}

impl TryFrom<RawGroupKeys> for GroupKeys {
    type Error = FrameError;

    fn try_from(raw: RawGroupKeys) -> Result<Self, Self::Error> {
        GroupKeys::new(raw.names, raw.values)
    }
}

/// Rows sharing one group key, in frame order
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: Vec<String>,
    pub rows: Vec<usize>,
}

/// Tabular data with a time-like row index and optional panel keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct TimeIndexedFrame {
    keys: Option<GroupKeys>,
    index: TimeIndex,
    columns: Vec<Column>,
}

/// Unchecked wire form; deserialized frames go through the same validation
/// as constructed ones
#[derive(Deserialize)]
struct RawFrame {
    keys: Option<GroupKeys>,
    index: TimeIndex,
    columns: Vec<Column>,
}

impl TryFrom<RawFrame> for TimeIndexedFrame {
    type Error = FrameError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        TimeIndexedFrame::build(raw.keys, raw.index, raw.columns)
    }
}

impl TimeIndexedFrame {
    /// Flat (single series) frame
    pub fn new(index: TimeIndex, columns: Vec<Column>) -> Result<Self, FrameError> {
        Self::build(None, index, columns)
    }

    /// Panel frame grouped by `keys`
    pub fn panel(
        keys: GroupKeys,
        index: TimeIndex,
        columns: Vec<Column>,
    ) -> Result<Self, FrameError> {
        Self::build(Some(keys), index, columns)
    }

    fn build(
        keys: Option<GroupKeys>,
        index: TimeIndex,
        columns: Vec<Column>,
    ) -> Result<Self, FrameError> {
        let expected = index.len();
        if let Some(keys) = &keys {
            if keys.len() != expected {
                return Err(FrameError::LengthMismatch {
                    name: "group keys".to_string(),
                    expected,
                    got: keys.len(),
                });
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if column.data.len() != expected {
                return Err(FrameError::LengthMismatch {
                    name: column.name.clone(),
                    expected,
                    got: column.data.len(),
                });
            }
            let clashes_with_key = keys
                .as_ref()
                .map(|k| k.names().contains(&column.name))
                .unwrap_or(false);
            if clashes_with_key || columns[..i].iter().any(|c| c.name == column.name) {
                return Err(FrameError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self {
            keys,
            index,
            columns,
        })
    }

    /// Frame with the same index and keys but different columns
    pub fn with_columns(&self, columns: Vec<Column>) -> Result<Self, FrameError> {
        Self::build(self.keys.clone(), self.index.clone(), columns)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn keys(&self) -> Option<&GroupKeys> {
        self.keys.as_ref()
    }

    pub fn is_panel(&self) -> bool {
        self.keys.is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Value column names in order (group keys excluded)
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Row groups in order of first appearance; a flat frame is one group
    pub fn groups(&self) -> Vec<Group> {
        let Some(keys) = &self.keys else {
            return vec![Group {
                key: Vec::new(),
                rows: (0..self.len()).collect(),
            }];
        };

        let mut positions: HashMap<&[String], usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        for row in 0..keys.len() {
            let key = keys.row(row);
            match positions.get(key) {
                Some(&pos) => groups[pos].rows.push(row),
                None => {
                    positions.insert(key, groups.len());
                    groups.push(Group {
                        key: key.to_vec(),
                        rows: vec![row],
                    });
                }
            }
        }
        groups
    }
}
