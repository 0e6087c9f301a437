use crate::config::PackerOptions;
use crate::error::Result;
use crate::geom::{Rect, Rectangle};
use crate::packer::{Bin, MaxRectsPacker};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Persisted state of one bin: geometry, free list and placed rectangles,
/// captured verbatim so a loaded packer resumes with identical behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinSnapshot<D = ()> {
    pub width: u32,
    pub height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub free_rects: Vec<Rect>,
    pub rects: Vec<Rectangle<D>>,
    pub options: PackerOptions,
}

impl<D: Clone> BinSnapshot<D> {
    /// Captures a bin through the [`Bin`] capability; works for regular and
    /// oversized bins alike.
    pub fn capture(bin: &dyn Bin<D>) -> Self {
        Self {
            width: bin.width(),
            height: bin.height(),
            max_width: bin.max_width(),
            max_height: bin.max_height(),
            free_rects: bin.free_rects().to_vec(),
            rects: bin.rects().to_vec(),
            options: bin.options().clone(),
        }
    }
}

/// Serializes the packer's bins as a JSON array of snapshot records.
pub fn save_to_json<D>(packer: &MaxRectsPacker<D>) -> Result<String>
where
    D: Clone + Serialize + 'static,
{
    Ok(serde_json::to_string(&packer.save())?)
}

/// Restores bins previously written by [`save_to_json`], replacing whatever
/// the packer currently holds.
pub fn load_from_json<D>(packer: &mut MaxRectsPacker<D>, json: &str) -> Result<()>
where
    D: DeserializeOwned + 'static,
{
    let snapshots: Vec<BinSnapshot<D>> = serde_json::from_str(json)?;
    packer.load(snapshots);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackerOptions;

    #[test]
    fn snapshot_json_uses_the_documented_field_names() {
        let opts = PackerOptions::builder().smart(false).build();
        let mut packer: MaxRectsPacker = MaxRectsPacker::new(128, 128, 0, opts).expect("packer");
        packer.add(Rectangle::new(32, 16));
        let json = save_to_json(&packer).expect("json");
        for field in ["maxWidth", "maxHeight", "freeRects", "rects", "options", "rotated"] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }
    }
}
