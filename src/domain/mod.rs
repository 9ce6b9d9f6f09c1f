//! Domain layer: the organisation chart and its traversals
//!
//! This layer is independent of external concerns (no config loading, no CLI).

pub mod arena;
pub mod chart;
pub mod error;
pub mod render;
pub mod sample;

pub use arena::{Person, PersonArena};
pub use chart::{OrgChart, PersonId, PersonRef};
pub use error::{DomainError, DomainResult};
pub use render::{RenderOptions, RenderStyle, MAX_INDENT, MAX_TREE_LEVELS};
pub use sample::{sample_chart, DEFAULT_CEO};
