use crate::error::{PackerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default atlas edge when none is given.
pub const EDGE_MAX_VALUE: u32 = 4096;
/// Smallest edge a caller is expected to size an initial surface to.
pub const EDGE_MIN_VALUE: u32 = 128;

/// Sort/score family used for batch adds and free-rect selection.
///
/// `MaxArea` minimizes leftover area after placement (best-area-fit with a
/// short-side tie-break); `MaxEdge` minimizes the shorter leftover side
/// (best-short-side-fit with a long-side tie-break).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackingLogic {
    MaxArea,
    #[default]
    MaxEdge,
}

impl FromStr for PackingLogic {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area" | "max_area" => Ok(Self::MaxArea),
            "edge" | "max_edge" => Ok(Self::MaxEdge),
            _ => Err(()),
        }
    }
}

/// Packing options shared by the packer and every bin it opens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackerOptions {
    /// Grow bins from empty up to the max dimensions instead of starting at
    /// full size.
    pub smart: bool,
    /// Round grown dimensions up to the next power of two.
    pub pot: bool,
    /// Keep width and height equal while growing.
    pub square: bool,
    /// Permit 90-degree rotation during the placement search.
    pub allow_rotation: bool,
    /// Group rectangles by their tag: one tag per bin.
    pub tag: bool,
    /// Uniform inset reserved at the bin's outer edge.
    pub border: u32,
    /// Sort key for batch adds and placement scoring.
    #[serde(default)]
    pub logic: PackingLogic,
}

impl Default for PackerOptions {
    fn default() -> Self {
        Self {
            smart: true,
            pot: true,
            square: true,
            allow_rotation: false,
            tag: false,
            border: 0,
            logic: PackingLogic::default(),
        }
    }
}

impl PackerOptions {
    /// Create a fluent builder for `PackerOptions`.
    pub fn builder() -> PackerOptionsBuilder {
        PackerOptionsBuilder::new()
    }

    /// Validates the options against the packer's template size.
    ///
    /// Returns an error if the dimensions are zero or the border leaves no
    /// usable placement area.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PackerError::InvalidInput(format!(
                "bin template dimensions must be nonzero, got {}x{}",
                width, height
            )));
        }
        let total_border = self.border.saturating_mul(2);
        if total_border >= width || total_border >= height {
            return Err(PackerError::InvalidInput(format!(
                "border ({}) * 2 leaves no usable space in a {}x{} bin",
                self.border, width, height
            )));
        }
        Ok(())
    }
}

/// Builder for `PackerOptions` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerOptionsBuilder {
    opts: PackerOptions,
}

impl PackerOptionsBuilder {
    pub fn new() -> Self {
        Self {
            opts: PackerOptions::default(),
        }
    }
    pub fn smart(mut self, v: bool) -> Self {
        self.opts.smart = v;
        self
    }
    pub fn pot(mut self, v: bool) -> Self {
        self.opts.pot = v;
        self
    }
    pub fn square(mut self, v: bool) -> Self {
        self.opts.square = v;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.opts.allow_rotation = v;
        self
    }
    pub fn tag(mut self, v: bool) -> Self {
        self.opts.tag = v;
        self
    }
    pub fn border(mut self, v: u32) -> Self {
        self.opts.border = v;
        self
    }
    pub fn logic(mut self, v: PackingLogic) -> Self {
        self.opts.logic = v;
        self
    }
    pub fn build(self) -> PackerOptions {
        self.opts
    }
}
