//! Entity implementation

use slotmap::{new_key_type, Key};
use std::fmt;

new_key_type! {
    /// Entity identifier
    ///
    /// Generational handle into a [`World`](super::World). A destroyed
    /// entity's handle never becomes valid again, even when its slot is
    /// reused. Handles are only meaningful for the world that created them.
    pub struct Entity;
}

impl Entity {
    /// Raw 64-bit value (generation in the high half, slot in the low half)
    pub fn id(self) -> u64 {
        self.data().as_ffi()
    }

    /// Slot index part of the handle
    pub fn index(self) -> u32 {
        (self.id() & 0xffff_ffff) as u32
    }

    /// Generation part of the handle
    pub fn generation(self) -> u32 {
        (self.id() >> 32) as u32
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.index(), self.generation())
        }
    }
}
