//! Visible surface of a scroller
//!
//! An ordered stack of layers, bottom first. Slots are attached below the
//! decorative overlay, which always stays on top.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Slot(usize),
    Overlay,
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    layers: Vec<Layer>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers from bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn contains(&self, tag: usize) -> bool {
        self.layers.contains(&Layer::Slot(tag))
    }

    pub fn has_overlay(&self) -> bool {
        self.layers.last() == Some(&Layer::Overlay)
    }

    /// Attached slot tags from bottom to top
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Slot(tag) => Some(*tag),
            Layer::Overlay => None,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }

    /// Attach a slot on top of the other slots; no-op if already attached
    pub fn attach(&mut self, tag: usize) {
        if self.contains(tag) {
            return;
        }
        if self.has_overlay() {
            let below_overlay = self.layers.len() - 1;
            self.layers.insert(below_overlay, Layer::Slot(tag));
        } else {
            self.layers.push(Layer::Slot(tag));
        }
    }

    pub fn detach(&mut self, tag: usize) {
        self.layers.retain(|layer| *layer != Layer::Slot(tag));
    }

    /// Detach every slot except `keep`
    pub fn retain_only(&mut self, keep: usize) {
        self.layers.retain(|layer| match layer {
            Layer::Slot(tag) => *tag == keep,
            Layer::Overlay => true,
        });
    }

    pub fn set_overlay(&mut self, enabled: bool) {
        self.layers.retain(|layer| *layer != Layer::Overlay);
        if enabled {
            self.layers.push(Layer::Overlay);
        }
    }
}
