//! MaxRects bin packing for texture atlases, sprite sheets and glyph boxes.
//!
//! - Core: free-rectangle placement (split against every overlapping free
//!   region, containment pruning) with smart bin growth under pot/square/max
//!   constraints and optional 90-degree rotation.
//! - Orchestration: `MaxRectsPacker` spreads rectangles over an ordered set
//!   of bins, routes oversized inputs to dedicated single-item bins, sorts
//!   batch input and supports resumable save/load sessions.
//! - Data model is serde-serializable; JSON helpers live in `snapshot`.
//!
//! Quick example:
//! ```
//! use maxrects_packer::{MaxRectsPacker, PackerOptions, Rectangle};
//! # fn main() -> maxrects_packer::Result<()> {
//! let options = PackerOptions::builder().smart(false).pot(false).square(false).build();
//! let mut packer: MaxRectsPacker = MaxRectsPacker::new(1024, 1024, 2, options)?;
//! let placed = packer.add(Rectangle::new(64, 32));
//! assert_eq!(placed.width(), 64);
//! println!("bins: {}", packer.bins().len());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod packer;
pub mod snapshot;

pub use config::*;
pub use error::*;
pub use geom::*;
pub use packer::*;
pub use snapshot::*;

/// Convenience prelude for common types and functions.
/// Importing `maxrects_packer::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        EDGE_MAX_VALUE, EDGE_MIN_VALUE, PackerOptions, PackerOptionsBuilder, PackingLogic,
    };
    pub use crate::error::{PackerError, Result};
    pub use crate::geom::{Rect, Rectangle};
    pub use crate::packer::{Bin, MaxRectsBin, MaxRectsPacker, OversizedElementBin};
    pub use crate::snapshot::{BinSnapshot, load_from_json, save_to_json};
}
