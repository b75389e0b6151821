use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcTask {
    #[serde(default)]
    pub id: String,
    pub train: Vec<ArcExample>,
    #[serde(default)]
    pub test: Vec<ArcExample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcExample {
    pub input: Grid,
    /// Absent for hidden test pairs.
    #[serde(default)]
    pub output: Option<Grid>,
}

impl ArcTask {
    /// Every input grid, train pairs first.
    pub fn inputs(&self) -> impl Iterator<Item = &Grid> {
        self.train.iter().chain(&self.test).map(|ex| &ex.input)
    }
}

pub fn parse_arc_task(id: &str, json: &str) -> anyhow::Result<ArcTask> {
    let mut task: ArcTask =
        serde_json::from_str(json).with_context(|| format!("parsing ARC task {}", id))?;
    task.id = id.to_string();
    Ok(task)
}

/// Loads one task file; the file stem becomes the task id.
pub fn load_arc_task(path: impl AsRef<Path>) -> anyhow::Result<ArcTask> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    parse_arc_task(id, &content)
}
