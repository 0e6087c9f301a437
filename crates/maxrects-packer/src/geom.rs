use serde::{Deserialize, Serialize};

/// Axis-aligned free region (pixels). `x,y` is top-left; `w,h` are sizes.
///
/// Free regions carry no payload; they may transiently overlap each other
/// inside a bin, but never overlap a placed rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "width")]
    pub w: u32,
    #[serde(rename = "height")]
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if `self` and `r` overlap with nonzero area.
    /// Touching edges do not count.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.x + r.w
            || r.x >= self.x + self.w
            || self.y >= r.y + r.h
            || r.y >= self.y + self.h)
    }
}

/// A rectangle flowing through the packer: input dimensions on the way in,
/// position/rotation once placed, plus an opaque payload `D`.
///
/// Geometry is only mutable through setters so that the dirty flag and the
/// rotation width/height swap stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rectangle<D = ()> {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    #[serde(rename = "rotated")]
    rot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_rotation: Option<bool>,
    #[serde(default)]
    oversized: bool,
    #[serde(skip)]
    dirty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    data: D,
}

impl Rectangle<()> {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_data(width, height, ())
    }
}

impl<D> Rectangle<D> {
    pub fn with_data(width: u32, height: u32, data: D) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
            rot: false,
            allow_rotation: None,
            oversized: false,
            dirty: false,
            tag: None,
            key: None,
            data,
        }
    }

    /// Group label; when the packer runs with `options.tag`, rectangles only
    /// share a bin with rectangles carrying the same tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Stable secondary sort key for batch adds (e.g. a content hash).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Per-rectangle rotation override; `None` defers to the bin option.
    pub fn with_allow_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = Some(allow);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn x(&self) -> u32 {
        self.x
    }
    pub fn y(&self) -> u32 {
        self.y
    }
    pub fn is_rotated(&self) -> bool {
        self.rot
    }
    pub fn allow_rotation(&self) -> Option<bool> {
        self.allow_rotation
    }
    pub fn is_oversized(&self) -> bool {
        self.oversized
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
    pub fn data(&self) -> &D {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }
    pub fn into_data(self) -> D {
        self.data
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn set_x(&mut self, x: u32) {
        if x != self.x {
            self.x = x;
            self.dirty = true;
        }
    }

    pub fn set_y(&mut self, y: u32) {
        if y != self.y {
            self.y = y;
            self.dirty = true;
        }
    }

    /// Sets the rotation flag. Postcondition: when the flag changes, `width`
    /// and `height` are swapped so the reported footprint always matches the
    /// current orientation.
    pub fn set_rot(&mut self, rot: bool) {
        if rot != self.rot {
            std::mem::swap(&mut self.width, &mut self.height);
            self.rot = rot;
            self.dirty = true;
        }
    }

    pub fn set_allow_rotation(&mut self, allow: Option<bool>) {
        self.allow_rotation = allow;
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub(crate) fn set_oversized(&mut self, oversized: bool) {
        self.oversized = oversized;
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// The currently occupied footprint as a plain [`Rect`].
    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Returns true if the two rectangles overlap with nonzero area.
    /// Touching edges do not count as collision.
    pub fn collide<E>(&self, other: &Rectangle<E>) -> bool {
        self.footprint().intersects(&other.footprint())
    }

    /// Returns true if `other` lies entirely within this rectangle's bounds
    /// (shared edges included).
    pub fn contain<E>(&self, other: &Rectangle<E>) -> bool {
        self.footprint().contains(&other.footprint())
    }
}
