use std::num::NonZeroUsize;

use bitvec::{bitbox, boxed::BitBox, slice::BitSlice};

/// Stores which fields of a board are lit.
///
/// Fields are addressed by their flattened index; see [`GridPos`](crate::GridPos) for how that
/// index relates to rows and columns.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct LightMap {
    lights: BitBox,
}

impl AsRef<BitSlice> for LightMap {
    fn as_ref(&self) -> &BitSlice {
        &self.lights
    }
}

impl LightMap {
    /// Creates a new [`LightMap`] with all lights off.
    pub fn new(field_count: NonZeroUsize) -> Self {
        Self {
            lights: bitbox![0; field_count.get()],
        }
    }

    /// The total number of fields.
    pub fn field_count(&self) -> NonZeroUsize {
        self.lights
            .len()
            .try_into()
            .expect("should have at least one field")
    }

    /// Returns whether the given field is lit.
    ///
    /// # Panics
    ///
    /// Panics if `field_index` is out of bounds.
    pub fn is_lit(&self, field_index: usize) -> bool {
        self.lights[field_index]
    }

    /// Returns the total number of lit fields.
    pub fn lit_count(&self) -> usize {
        self.lights.count_ones()
    }

    /// Whether every light is off.
    pub fn is_all_off(&self) -> bool {
        self.lights.not_any()
    }

    /// Turns the given field on or off.
    ///
    /// Does nothing if the state of the field already matches.
    pub fn set_lit(&mut self, field_index: usize, lit: bool) {
        self.lights.set(field_index, lit);
    }

    /// Flips the given field.
    pub fn toggle(&mut self, field_index: usize) {
        let lit = self.lights[field_index];
        self.lights.set(field_index, !lit);
    }

    /// Returns an iterator over the indices of all lit fields in ascending order.
    pub fn lit_fields(&self) -> impl Iterator<Item = usize> + '_ {
        self.lights.iter_ones()
    }

    /// Turns all lights off, leaving the field count unchanged.
    pub fn reset(&mut self) {
        self.lights.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(field_count: usize) -> LightMap {
        LightMap::new(NonZeroUsize::new(field_count).unwrap())
    }

    #[test]
    fn starts_all_off() {
        let lights = map(9);
        assert_eq!(lights.field_count().get(), 9);
        assert_eq!(lights.lit_count(), 0);
        assert!(lights.is_all_off());
    }

    #[test]
    fn toggle_flips_a_single_field() {
        let mut lights = map(4);
        lights.toggle(2);
        assert!(lights.is_lit(2));
        assert_eq!(lights.lit_fields().collect::<Vec<_>>(), [2]);
        lights.toggle(2);
        assert!(lights.is_all_off());
    }

    #[test]
    fn reset_turns_everything_off() {
        let mut lights = map(4);
        lights.set_lit(0, true);
        lights.set_lit(3, true);
        assert_eq!(lights.lit_count(), 2);
        lights.reset();
        assert!(lights.is_all_off());
        assert_eq!(lights.field_count().get(), 4);
    }
}
