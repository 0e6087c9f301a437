use crate::config::{EDGE_MAX_VALUE, PackerOptions, PackingLogic};
use crate::error::Result;
use crate::geom::Rectangle;
use crate::snapshot::BinSnapshot;
use tracing::{debug, instrument};

pub mod maxrects;
pub mod oversized;

pub use maxrects::MaxRectsBin;
pub use oversized::OversizedElementBin;

/// A bin places rectangles onto one bounded surface.
///
/// "Does not fit" is a normal outcome, not an error: `add` hands the
/// rectangle back through `Err` so the orchestrator can try the next bin or
/// open a new one.
pub trait Bin<D> {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn max_width(&self) -> u32;
    fn max_height(&self) -> u32;
    fn options(&self) -> &PackerOptions;
    /// Placed rectangles in insertion order.
    fn rects(&self) -> &[Rectangle<D>];
    fn free_rects(&self) -> &[crate::geom::Rect];
    fn tag(&self) -> Option<&str> {
        None
    }

    /// True when the bin or any of its rectangles changed since the last
    /// `mark_clean`; the orchestrator uses this to pick quick over full
    /// repack.
    fn is_dirty(&self) -> bool;
    fn mark_clean(&mut self);

    /// On success returns the index of the placed rectangle in `rects()`.
    fn add(&mut self, rect: Rectangle<D>) -> std::result::Result<usize, Rectangle<D>>;

    /// Re-adds every held rectangle, in insertion order, into a freshly
    /// reset surface; returns the rectangles that no longer fit.
    fn repack(&mut self) -> Vec<Rectangle<D>>;

    /// Clears placements back to a single free region spanning the current
    /// size, or the original template size when `deep`.
    fn reset(&mut self, deep: bool);

    /// Drains the placed rectangles, leaving the bin empty.
    fn take_rects(&mut self) -> Vec<Rectangle<D>>;
}

/// Multi-bin orchestrator: tries existing bins first-fit, opens new bins on
/// demand, sorts batch input and offers save/load/repack across all bins.
pub struct MaxRectsPacker<D = ()> {
    width: u32,
    height: u32,
    padding: u32,
    options: PackerOptions,
    bins: Vec<Box<dyn Bin<D>>>,
    current_bin_index: usize,
}

impl<D> Default for MaxRectsPacker<D> {
    fn default() -> Self {
        Self {
            width: EDGE_MAX_VALUE,
            height: EDGE_MAX_VALUE,
            padding: 0,
            options: PackerOptions::default(),
            bins: Vec::new(),
            current_bin_index: 0,
        }
    }
}

impl<D: 'static> MaxRectsPacker<D> {
    /// Creates a packer whose bins use the `width x height` template,
    /// `padding` pixels between rectangles, and the given options.
    pub fn new(width: u32, height: u32, padding: u32, options: PackerOptions) -> Result<Self> {
        options.validate(width, height)?;
        Ok(Self {
            width,
            height,
            padding,
            options,
            bins: Vec::new(),
            current_bin_index: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn padding(&self) -> u32 {
        self.padding
    }
    pub fn options(&self) -> &PackerOptions {
        &self.options
    }
    pub fn bins(&self) -> &[Box<dyn Bin<D>>] {
        &self.bins
    }

    /// Bins at a lower index no longer accept rectangles; see [`next`].
    ///
    /// [`next`]: MaxRectsPacker::next
    pub fn current_bin_index(&self) -> usize {
        self.current_bin_index
    }

    /// True when any bin changed since the last clean point.
    pub fn dirty(&self) -> bool {
        self.bins.iter().any(|b| b.is_dirty())
    }

    pub fn mark_clean(&mut self) {
        for bin in &mut self.bins {
            bin.mark_clean();
        }
    }

    /// All rectangles across all bins, in bin order.
    pub fn rects(&self) -> Vec<&Rectangle<D>> {
        self.bins.iter().flat_map(|b| b.rects().iter()).collect()
    }

    /// Adds one rectangle, returning a reference to its placed record.
    ///
    /// Inputs larger than the template go straight to a dedicated
    /// [`OversizedElementBin`]; everything else lands in the first open bin
    /// that accepts it, or a freshly opened one.
    pub fn add(&mut self, rect: Rectangle<D>) -> &Rectangle<D> {
        if rect.width() > self.width || rect.height() > self.height {
            debug!(
                w = rect.width(),
                h = rect.height(),
                "input exceeds bin template, opening oversized bin"
            );
            return self.push_oversized(rect);
        }
        let mut pending = rect;
        for i in self.current_bin_index..self.bins.len() {
            match self.bins[i].add(pending) {
                Ok(idx) => return &self.bins[i].rects()[idx],
                Err(back) => pending = back,
            }
        }
        debug!(bin = self.bins.len(), "opening new bin");
        let mut bin = MaxRectsBin::new(self.width, self.height, self.padding, self.options.clone());
        if self.options.tag {
            bin.set_tag(pending.tag().map(str::to_owned));
        }
        match bin.add(pending) {
            Ok(idx) => {
                self.bins.push(Box::new(bin));
                let last = self.bins.len() - 1;
                &self.bins[last].rects()[idx]
            }
            Err(back) => {
                // Border/padding overhead can make even an empty bin too
                // small for an input that passed the template check; route
                // it to an oversized bin rather than dropping it.
                debug!(
                    w = back.width(),
                    h = back.height(),
                    "empty bin rejected input, routing to oversized bin"
                );
                self.push_oversized(back)
            }
        }
    }

    /// Convenience for payload-first call sites.
    pub fn add_with_data(&mut self, width: u32, height: u32, data: D) -> &Rectangle<D> {
        self.add(Rectangle::with_data(width, height, data))
    }

    /// Sorts the batch by the configured logic (larger first packs denser
    /// under the best-fit heuristic) and adds the rectangles one by one.
    #[instrument(skip_all, fields(count = rects.len()))]
    pub fn add_array(&mut self, mut rects: Vec<Rectangle<D>>) {
        self.sort_rects(&mut rects);
        for rect in rects {
            self.add(rect);
        }
    }

    /// Descending by max edge or area; equal keys fall back to the caller's
    /// stable `key` (descending), otherwise insertion order is kept.
    fn sort_rects(&self, rects: &mut [Rectangle<D>]) {
        let logic = self.options.logic;
        let sort_key = |r: &Rectangle<D>| match logic {
            PackingLogic::MaxEdge => r.width().max(r.height()) as u64,
            PackingLogic::MaxArea => r.area(),
        };
        rects.sort_by(|a, b| {
            sort_key(b).cmp(&sort_key(a)).then_with(|| match (a.key(), b.key()) {
                (Some(x), Some(y)) => y.cmp(x),
                _ => std::cmp::Ordering::Equal,
            })
        });
    }

    /// Freezes all current bins against further additions; subsequent `add`
    /// calls only open new bins. Returns the new current index.
    pub fn next(&mut self) -> usize {
        self.current_bin_index = self.bins.len();
        self.current_bin_index
    }

    /// Drops all bins, keeping the template size and options.
    pub fn reset(&mut self) {
        self.bins.clear();
        self.current_bin_index = 0;
    }

    /// Repacks bin contents. `quick` only touches dirty bins and re-adds
    /// whatever falls out; a full repack drains every rectangle and packs
    /// the whole set again from scratch.
    #[instrument(skip(self))]
    pub fn repack(&mut self, quick: bool) {
        if quick {
            let mut unpacked = Vec::new();
            for bin in &mut self.bins {
                if bin.is_dirty() {
                    unpacked.extend(bin.repack());
                }
            }
            self.add_array(unpacked);
            return;
        }
        if !self.dirty() {
            return;
        }
        let mut all = Vec::new();
        for bin in &mut self.bins {
            all.extend(bin.take_rects());
        }
        self.reset();
        self.add_array(all);
    }

    /// Externalizes every bin's geometry and free list; see
    /// [`BinSnapshot`].
    pub fn save(&self) -> Vec<BinSnapshot<D>>
    where
        D: Clone,
    {
        self.bins
            .iter()
            .map(|b| BinSnapshot::capture(b.as_ref()))
            .collect()
    }

    /// Replaces the current bins with the saved set. Geometry and free
    /// lists are restored verbatim, so later `add` calls behave exactly as
    /// they would have on the packer that produced the snapshots. Saved bins
    /// larger than this packer's template come back as oversized bins.
    pub fn load(&mut self, snapshots: Vec<BinSnapshot<D>>) {
        self.bins.clear();
        self.current_bin_index = 0;
        for snap in snapshots {
            if snap.max_width > self.width || snap.max_height > self.height {
                match snap.rects.into_iter().next() {
                    Some(rect) => {
                        self.bins.push(Box::new(OversizedElementBin::new(rect)));
                    }
                    None => {
                        debug!("skipping empty oversized snapshot");
                    }
                }
                continue;
            }
            let mut bin: MaxRectsBin<D> =
                MaxRectsBin::new(self.width, self.height, self.padding, snap.options);
            bin.restore(snap.width, snap.height, snap.free_rects, snap.rects);
            self.bins.push(Box::new(bin));
        }
    }

    fn push_oversized(&mut self, rect: Rectangle<D>) -> &Rectangle<D> {
        self.bins.push(Box::new(OversizedElementBin::new(rect)));
        let last = self.bins.len() - 1;
        &self.bins[last].rects()[0]
    }
}
