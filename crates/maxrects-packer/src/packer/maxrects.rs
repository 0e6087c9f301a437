use super::Bin;
use crate::config::{PackerOptions, PackingLogic};
use crate::geom::{Rect, Rectangle};

/// The MaxRects placement core for one bounded surface.
///
/// Owns a free-rectangle list and the placed rectangles. A smart bin starts
/// at 0x0 and grows toward `max_width`/`max_height` as content arrives; a
/// non-smart bin occupies the full template from the start.
///
/// Invariant after every `add`: free rectangles and padded placed footprints
/// together cover `[0,width] x [0,height]` (minus the border inset), and no
/// free rectangle overlaps a placed one. Free rectangles may overlap each
/// other; pruning only removes full containment.
pub struct MaxRectsBin<D = ()> {
    max_width: u32,
    max_height: u32,
    padding: u32,
    options: PackerOptions,
    width: u32,
    height: u32,
    border: u32,
    free_rects: Vec<Rect>,
    rects: Vec<Rectangle<D>>,
    /// Grown extent; placements inside it never trigger a resize.
    stage: Rect,
    /// After a placement leaves the bin wider than tall, the next growth
    /// attempt extends downward first.
    vertical_expand: bool,
    tag: Option<String>,
    dirty: bool,
}

impl<D> MaxRectsBin<D> {
    pub fn new(max_width: u32, max_height: u32, padding: u32, options: PackerOptions) -> Self {
        let border = options.border;
        let width = if options.smart { 0 } else { max_width };
        let height = if options.smart { 0 } else { max_height };
        let free = Rect::new(
            border,
            border,
            (max_width + padding).saturating_sub(border * 2),
            (max_height + padding).saturating_sub(border * 2),
        );
        Self {
            max_width,
            max_height,
            padding,
            options,
            width,
            height,
            border,
            free_rects: vec![free],
            rects: Vec::new(),
            stage: Rect::new(0, 0, width, height),
            vertical_expand: false,
            tag: None,
            dirty: false,
        }
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    /// Rebuilds the bin from externally persisted state. The free list is
    /// taken verbatim; nothing is re-derived.
    pub(crate) fn restore(
        &mut self,
        width: u32,
        height: u32,
        free_rects: Vec<Rect>,
        rects: Vec<Rectangle<D>>,
    ) {
        self.width = width;
        self.height = height;
        self.stage = Rect::new(0, 0, width, height);
        self.free_rects = free_rects;
        self.rects = rects;
        self.vertical_expand = self.width > self.height;
        self.dirty = false;
    }

    fn score(&self, fr: &Rect, w: u32, h: u32) -> (i64, i64) {
        let leftover_w = fr.w as i64 - w as i64;
        let leftover_h = fr.h as i64 - h as i64;
        let short_fit = leftover_w.min(leftover_h);
        let long_fit = leftover_w.max(leftover_h);
        let area_fit = fr.area() as i64 - (w as u64 * h as u64) as i64;
        match self.options.logic {
            PackingLogic::MaxArea => (area_fit, short_fit),
            PackingLogic::MaxEdge => (short_fit, long_fit),
        }
    }

    /// Best-fit search over the free list for a `w x h` node (padding already
    /// included). Lower score wins; ties keep the earliest free rectangle in
    /// list order, which makes placement deterministic for a given history.
    fn find_node(&self, w: u32, h: u32, allow_rotation: bool) -> Option<(Rect, bool)> {
        let mut best: Option<(Rect, bool)> = None;
        let mut best_score = (i64::MAX, i64::MAX);
        for fr in &self.free_rects {
            if fr.w >= w && fr.h >= h {
                let s = self.score(fr, w, h);
                if s < best_score {
                    best_score = s;
                    best = Some((Rect::new(fr.x, fr.y, w, h), false));
                }
            }
            if allow_rotation && fr.w >= h && fr.h >= w {
                let s = self.score(fr, h, w);
                if s < best_score {
                    best_score = s;
                    best = Some((Rect::new(fr.x, fr.y, h, w), true));
                }
            }
        }
        best
    }

    /// Splits every free rectangle intersecting `node` into its remainder
    /// strips: left/right span the full free height, top/bottom the full free
    /// width. Strips overlap each other; pruning resolves containment, and
    /// partial overlap is resolved by later splits rather than eagerly.
    fn split_free_rects(&mut self, node: &Rect) {
        let mut next: Vec<Rect> = Vec::with_capacity(self.free_rects.len() + 4);
        for fr in &self.free_rects {
            if !fr.intersects(node) {
                next.push(*fr);
                continue;
            }
            let fr_x2 = fr.x + fr.w;
            let fr_y2 = fr.y + fr.h;
            let n_x2 = node.x + node.w;
            let n_y2 = node.y + node.h;

            // Top
            if node.y > fr.y {
                next.push(Rect::new(fr.x, fr.y, fr.w, node.y - fr.y));
            }
            // Bottom
            if n_y2 < fr_y2 {
                next.push(Rect::new(fr.x, n_y2, fr.w, fr_y2 - n_y2));
            }
            // Left
            if node.x > fr.x {
                next.push(Rect::new(fr.x, fr.y, node.x - fr.x, fr.h));
            }
            // Right
            if n_x2 < fr_x2 {
                next.push(Rect::new(n_x2, fr.y, fr_x2 - n_x2, fr.h));
            }
        }
        self.free_rects = next;
    }

    /// Removes free rectangles fully contained in another free rectangle.
    /// Quadratic pairwise check; bounds free-list growth across splits.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free_rects.len() {
            let mut j = i + 1;
            let a = self.free_rects[i];
            let mut remove_i = false;
            while j < self.free_rects.len() {
                let b = self.free_rects[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free_rects.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free_rects.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Grows the stage so it covers `node` (a padded placement), honoring the
    /// pot/square constraints and the max dimensions. No-op for non-smart
    /// bins or when the node already fits. Returns whether the bin grew.
    fn update_bin_size(&mut self, node: &Rect) -> bool {
        if !self.options.smart {
            return false;
        }
        if self.stage.contains(node) {
            return false;
        }
        let b = self.border;
        let mut tmp_w = self
            .width
            .max((node.x + node.w + b).saturating_sub(self.padding));
        let mut tmp_h = self
            .height
            .max((node.y + node.h + b).saturating_sub(self.padding));
        if self.options.pot {
            tmp_w = tmp_w.next_power_of_two();
            tmp_h = tmp_h.next_power_of_two();
        }
        if self.options.square {
            let side = tmp_w.max(tmp_h);
            tmp_w = side;
            tmp_h = side;
        }
        if tmp_w > self.max_width + self.padding || tmp_h > self.max_height + self.padding {
            return false;
        }
        self.expand_free_rects(tmp_w + self.padding, tmp_h + self.padding);
        self.width = tmp_w;
        self.height = tmp_h;
        self.stage.w = tmp_w;
        self.stage.h = tmp_h;
        true
    }

    /// Extends the free list into newly exposed area after a resize.
    /// `new_w`/`new_h` include the trailing padding. Free rectangles touching
    /// the old edge are stretched to the new one, then the two fresh strips
    /// (right of the old width, below the old height) are appended; the
    /// expanded region may subsume existing free rects, hence the re-prune.
    fn expand_free_rects(&mut self, new_w: u32, new_h: u32) {
        let b = self.border;
        let old_edge_x = (self.width + self.padding).saturating_sub(b).min(new_w);
        let old_edge_y = (self.height + self.padding).saturating_sub(b).min(new_h);
        for fr in &mut self.free_rects {
            if fr.x + fr.w >= old_edge_x {
                fr.w = new_w.saturating_sub(fr.x + b);
            }
            if fr.y + fr.h >= old_edge_y {
                fr.h = new_h.saturating_sub(fr.y + b);
            }
        }
        self.free_rects.push(Rect::new(
            (self.width + self.padding).saturating_sub(b),
            b,
            new_w.saturating_sub(self.width + self.padding),
            new_h.saturating_sub(b * 2),
        ));
        self.free_rects.push(Rect::new(
            b,
            (self.height + self.padding).saturating_sub(b),
            new_w.saturating_sub(b * 2),
            new_h.saturating_sub(self.height + self.padding),
        ));
        self.free_rects
            .retain(|fr| fr.w > 0 && fr.h > 0 && fr.x >= b && fr.y >= b);
        self.prune_free_list();
    }

    /// Tries to enlarge the bin for a pending `need_w x need_h` node by
    /// synthesizing a placement just beside or just below the current stage.
    fn try_expand(&mut self, need_w: u32, need_h: u32) -> bool {
        let b = self.border;
        let beside = Rect::new(
            (self.width + self.padding).saturating_sub(b),
            b,
            need_w,
            need_h,
        );
        let below = Rect::new(
            b,
            (self.height + self.padding).saturating_sub(b),
            need_w,
            need_h,
        );
        if self.vertical_expand {
            self.update_bin_size(&below) || self.update_bin_size(&beside)
        } else {
            self.update_bin_size(&beside) || self.update_bin_size(&below)
        }
    }

    fn place(&mut self, mut rect: Rectangle<D>) -> Result<usize, Rectangle<D>> {
        if self.options.tag && rect.tag() != self.tag.as_deref() {
            return Err(rect);
        }
        loop {
            let allow_rot = rect.allow_rotation().unwrap_or(self.options.allow_rotation);
            let need_w = rect.width() + self.padding;
            let need_h = rect.height() + self.padding;
            if let Some((node, rot)) = self.find_node(need_w, need_h, allow_rot) {
                self.update_bin_size(&node);
                self.split_free_rects(&node);
                self.prune_free_list();
                self.vertical_expand = self.width > self.height;
                rect.set_x(node.x);
                rect.set_y(node.y);
                if rot {
                    let flipped = !rect.is_rotated();
                    rect.set_rot(flipped);
                }
                self.dirty = true;
                self.rects.push(rect);
                return Ok(self.rects.len() - 1);
            }
            if !self.try_expand(need_w, need_h) {
                return Err(rect);
            }
        }
    }
}

impl<D> Bin<D> for MaxRectsBin<D> {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn max_width(&self) -> u32 {
        self.max_width
    }
    fn max_height(&self) -> u32 {
        self.max_height
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
    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.rects.iter().any(|r| r.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for r in &mut self.rects {
            r.set_dirty(false);
        }
    }

    fn add(&mut self, rect: Rectangle<D>) -> Result<usize, Rectangle<D>> {
        self.place(rect)
    }

    fn repack(&mut self) -> Vec<Rectangle<D>> {
        let all = std::mem::take(&mut self.rects);
        self.reset(false);
        let mut unplaced = Vec::new();
        for rect in all {
            if let Err(r) = self.place(rect) {
                unplaced.push(r);
            }
        }
        // The bin is consistent again; repack settles the dirty state.
        self.mark_clean();
        unplaced
    }

    fn reset(&mut self, deep: bool) {
        if deep {
            self.width = if self.options.smart { 0 } else { self.max_width };
            self.height = if self.options.smart { 0 } else { self.max_height };
            self.tag = None;
        }
        // An unplaced smart bin exposes the whole template to the search;
        // the stage catches up as soon as something is placed.
        let (span_w, span_h) = if self.width == 0 || self.height == 0 {
            (self.max_width, self.max_height)
        } else {
            (self.width, self.height)
        };
        let b = self.border;
        self.free_rects.clear();
        self.free_rects.push(Rect::new(
            b,
            b,
            (span_w + self.padding).saturating_sub(b * 2),
            (span_h + self.padding).saturating_sub(b * 2),
        ));
        self.rects.clear();
        self.stage = Rect::new(0, 0, self.width, self.height);
        self.vertical_expand = false;
        self.dirty = false;
    }

    fn take_rects(&mut self) -> Vec<Rectangle<D>> {
        std::mem::take(&mut self.rects)
    }
}
