#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid level {0}: expected 1, 2 or 3")]
    InvalidLevel(u8),

    #[error("Invalid hidden edge count {0}: expected 0, 1 or 2")]
    InvalidHiddenCount(u8),

    #[error("Unrecognized shape filter {0:?}: expected \"any\", \"polygons\" or \"rectilinear\"")]
    UnknownFilter(String),

    #[error("Unrecognized shape {0:?}")]
    UnknownShape(String),

    #[error("Unparseable measurement {0:?}")]
    BadMeasurement(String),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Page grid needs at least one row and column, got {rows}×{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("Cells are {width:.1}×{height:.1}mm after margins, headers and answer lines; nothing left to draw in")]
    CellTooSmall { width: f64, height: f64 },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogueError {
    #[error("{name}: {sides} sides, expected 3 to 8")]
    SideCount { name: &'static str, sides: usize },

    #[error("{name}: symmetry groups don't partition edges 0..{sides}")]
    NotAPartition { name: &'static str, sides: usize },

    #[error("{name}: {kind:?} shapes take {expected} symmetry groups, found {found}")]
    GroupCount { name: &'static str, kind: crate::catalogue::ShapeKind, expected: usize, found: usize },
}
