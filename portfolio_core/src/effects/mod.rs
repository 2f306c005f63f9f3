//! Presentation-only page behavior. None of it keeps state that outlives an
//! interaction, apart from the typewriter's position.

pub mod reveal;
pub mod tilt;
pub mod typewriter;

use crate::traits::ElementHandle;

pub use reveal::Reveal;
pub use tilt::{Rect, TiltProfile};
pub use typewriter::{Frame, Typewriter};

/// Write the current year into the footer, if the page has a slot for it.
pub fn stamp_year<E: ElementHandle>(slot: Option<&E>, year: u32) {
    if let Some(slot) = slot {
        slot.set_text(&year.to_string());
    }
}
