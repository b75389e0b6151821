pub mod grid;
pub mod objects;
pub mod separators;
pub mod task;

pub use grid::Grid;
pub use objects::{detect_objects, DetectConfig, DetectedObject};
pub use separators::{find_axis_separator_lines, find_separator_lines, primary_separator, SeparatorLines};
pub use task::{load_arc_task, parse_arc_task, ArcExample, ArcTask};
