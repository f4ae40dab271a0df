//! Sight module
//!
//! The algorithmic core: precomputed visibility tables, the field-of-view
//! flood that walks them, and the reverse-table tracing behind aiming
//! lines and line-of-sight checks.

pub mod cache;
pub mod fov;
pub mod table;
pub mod trace;

pub use cache::SightCache;
pub use fov::{compute_fov, compute_fov_shaped, FovMap, FovShape};
pub use table::{build_reverse_table, build_table, DirectionalTable, ReverseTable};
pub use trace::{line_of_sight, trace};
