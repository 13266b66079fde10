//! Image manifest and load gate
//!
//! The first game starts only once every image in the manifest has reported
//! back. A failed image still reports, so the renderer's fallbacks get a
//! chance instead of the page sitting on the loading screen forever.

use crate::sim::object::{Drawable, SpriteVariant};

/// Every image the game draws, with its path relative to the page
pub const MANIFEST: [(Drawable, &str); 7] = [
    (Drawable::Background, "assets/background.png"),
    (Drawable::Platform, "assets/platform.png"),
    (Drawable::Floor, "assets/floor.png"),
    (Drawable::Player(SpriteVariant::RunRight), "assets/spriteRunRight.png"),
    (Drawable::Player(SpriteVariant::RunLeft), "assets/spriteRunLeft.png"),
    (Drawable::Player(SpriteVariant::StandRight), "assets/spriteStandRight.png"),
    (Drawable::Player(SpriteVariant::StandLeft), "assets/spriteStandLeft.png"),
];

/// Counts image completions until the required number is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGate {
    required: u32,
    loaded: u32,
}

impl AssetGate {
    pub fn new(required: u32) -> Self {
        Self {
            required,
            loaded: 0,
        }
    }

    /// Record one completion. Returns true on the call that opens the gate.
    pub fn mark_loaded(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.loaded += 1;
        self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.loaded >= self.required
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn required(&self) -> u32 {
        self.required
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{ImageSet, load_images};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::HtmlImageElement;

    use super::MANIFEST;
    use crate::sim::object::Drawable;

    pub type ImageSet = HashMap<Drawable, HtmlImageElement>;

    /// Start fetching every manifest image.
    ///
    /// `on_done` runs once per image, whether it loaded or failed.
    pub fn load_images(on_done: Rc<dyn Fn()>) -> Result<ImageSet, JsValue> {
        let mut images = ImageSet::with_capacity(MANIFEST.len());
        for (drawable, src) in MANIFEST {
            let img = HtmlImageElement::new()?;

            let done = on_done.clone();
            let onload = Closure::<dyn FnMut()>::new(move || done());
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let done = on_done.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Failed to load {}", src);
                done();
            });
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            img.set_src(src);
            images.insert(drawable, img);
        }
        log::info!("Requested {} images", images.len());
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::collections::HashSet;

    #[test]
    fn test_gate_opens_once() {
        let mut gate = AssetGate::new(3);
        assert!(!gate.mark_loaded());
        assert!(!gate.mark_loaded());
        assert!(gate.mark_loaded());
        assert!(gate.is_open());
        // Late completions do not reopen it
        assert!(!gate.mark_loaded());
        assert_eq!(gate.loaded(), 3);
    }

    #[test]
    fn test_manifest_matches_asset_count() {
        let tuning = Tuning::default();
        assert_eq!(MANIFEST.len() as u32, tuning.asset_count);
        let unique: HashSet<_> = MANIFEST.iter().map(|(d, _)| *d).collect();
        assert_eq!(unique.len(), MANIFEST.len());
    }

    #[test]
    fn test_zero_required_is_open() {
        let gate = AssetGate::new(0);
        assert!(gate.is_open());
        assert_eq!(gate.required(), 0);
    }
}
