use serde::Serialize;

/// Bounding box of one slot, in the caller's units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height > 0.0
    }

    pub fn approx_eq(&self, other: &Size) -> bool {
        (self.width - other.width).abs() <= f64::EPSILON * self.width.abs().max(1.0)
            && (self.height - other.height).abs() <= f64::EPSILON * self.height.abs().max(1.0)
    }
}

/// Anything that can be carried by a slot
pub trait SlotItem {
    fn size(&self) -> Size;
}

/// One entry of the circular list
#[derive(Debug, Clone)]
pub struct Slot<T> {
    tag: usize,
    offset: f64,
    item: T,
}

impl<T> Slot<T> {
    pub(crate) fn new(tag: usize, item: T) -> Self {
        Self {
            tag,
            offset: 0.0,
            item,
        }
    }

    /// Stable index of this slot in the circular list
    #[inline]
    pub fn tag(&self) -> usize {
        self.tag
    }

    /// Vertical offset from the resting position; positive is below
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }
}
