pub mod bbox;
pub mod polygon;
pub mod r2;
