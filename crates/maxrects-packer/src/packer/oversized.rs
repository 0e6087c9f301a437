use super::Bin;
use crate::config::PackerOptions;
use crate::geom::{Rect, Rectangle};

/// Degenerate bin holding exactly one rectangle that exceeds the packer's
/// template size. It is full from construction: `add` always hands the
/// rectangle back, and the free list stays empty, so oversized inputs never
/// disturb the growth invariants of regular bins.
pub struct OversizedElementBin<D = ()> {
    width: u32,
    height: u32,
    options: PackerOptions,
    rects: Vec<Rectangle<D>>,
    free_rects: Vec<Rect>,
}

impl<D> OversizedElementBin<D> {
    pub fn new(mut rect: Rectangle<D>) -> Self {
        rect.set_oversized(true);
        let options = PackerOptions {
            smart: false,
            pot: false,
            square: false,
            allow_rotation: false,
            tag: false,
            border: 0,
            logic: Default::default(),
        };
        Self {
            width: rect.width(),
            height: rect.height(),
            options,
            rects: vec![rect],
            free_rects: Vec::new(),
        }
    }

    pub fn from_size(width: u32, height: u32, data: D) -> Self {
        Self::new(Rectangle::with_data(width, height, data))
    }
}

impl<D> Bin<D> for OversizedElementBin<D> {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn max_width(&self) -> u32 {
        self.width
    }
    fn max_height(&self) -> u32 {
        self.height
    }
    fn options(&self) -> &PackerOptions {
        &self.options
    }
    fn rects(&self) -> &[Rectangle<D>] {
        &self.rects
    }
    fn free_rects(&self) -> &[Rect] {
        &self.free_rects
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn mark_clean(&mut self) {}

    fn add(&mut self, rect: Rectangle<D>) -> Result<usize, Rectangle<D>> {
        Err(rect)
    }

    fn repack(&mut self) -> Vec<Rectangle<D>> {
        Vec::new()
    }

    fn reset(&mut self, _deep: bool) {}

    fn take_rects(&mut self) -> Vec<Rectangle<D>> {
        std::mem::take(&mut self.rects)
    }
}
