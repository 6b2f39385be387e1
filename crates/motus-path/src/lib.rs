//! Polyline paths and arc-length measurement for synthetic input tooling.
//!
//! This crate is intentionally dependency-free so it can be consumed by
//! input-injection tools, recorders, and test harnesses without pulling in
//! any scheduler or logging code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`vec2`] | `Vec2` |
//! | [`rect`] | `Rect` |
//! | [`path`] | `Path`, `Contour` |
//! | [`measure`] | `PathMeasure` |
//!
//! # Quick start
//!
//! ```rust
//! use motus_path::{Path, PathMeasure, Vec2};
//!
//! let mut path = Path::new();
//! path.move_to(Vec2::new(0.0, 0.0)).line_to(Vec2::new(30.0, 40.0));
//!
//! let measure = PathMeasure::new(&path).unwrap();
//! assert_eq!(measure.length(), 50.0);
//! assert_eq!(measure.pos_at(25.0), Vec2::new(15.0, 20.0));
//! ```

pub mod measure;
pub mod path;
pub mod rect;
pub mod vec2;

pub use measure::PathMeasure;
pub use path::{Contour, Path};
pub use rect::Rect;
pub use vec2::Vec2;
