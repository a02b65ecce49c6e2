//! Level files: JSON descriptions of the playable area.
//!
//! ```json
//! { "name": "notch", "rows": ["......", ".####.", "######"] }
//! ```
//!
//! Each row uses the [`LevelShape::from_rows`] notation: `#` for a cell with
//! a base tile, `.` or space for none.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::LevelShape;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub name: String,
    pub rows: Vec<String>,
}

/// A parsed level, ready to build a board from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub shape: LevelShape,
}

impl Level {
    /// The built-in level used when no file is configured.
    pub fn builtin() -> Self {
        Self {
            name: "default".to_string(),
            shape: LevelShape::default_level(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: LevelFile =
            serde_json::from_str(text).map_err(|e| anyhow!("level: invalid JSON: {}", e))?;
        let shape =
            LevelShape::from_rows(&file.rows).map_err(|e| anyhow!("level: {}", e))?;
        let name = if file.name.is_empty() {
            "unnamed".to_string()
        } else {
            file.name
        };
        Ok(Self { name, shape })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow!("level: cannot read {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    /// Load `path` if given, otherwise the built-in level.
    pub fn load_or_builtin(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }
}
