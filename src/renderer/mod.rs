//! Rendering module
//!
//! The simulation produces a `DrawList`; a backend blits it. The browser
//! backend is Canvas 2D over preloaded image elements.

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCommand, DrawList, build as build_draw_list};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::object::Drawable;

/// Pick the image to blit for `drawable`.
///
/// A missing player sprite is replaced by the fallback sprite; a missing world
/// image yields `None` and the blit is skipped.
pub fn resolve_image(drawable: Drawable, available: impl Fn(Drawable) -> bool) -> Option<Drawable> {
    if available(drawable) {
        return Some(drawable);
    }
    match drawable {
        Drawable::Player(_) if available(Drawable::FALLBACK_SPRITE) => {
            Some(Drawable::FALLBACK_SPRITE)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::SpriteVariant;

    #[test]
    fn test_resolve_present_image() {
        assert_eq!(
            resolve_image(Drawable::Floor, |_| true),
            Some(Drawable::Floor)
        );
    }

    #[test]
    fn test_missing_sprite_falls_back() {
        let only_fallback = |d: Drawable| d == Drawable::FALLBACK_SPRITE;
        assert_eq!(
            resolve_image(Drawable::Player(SpriteVariant::RunLeft), only_fallback),
            Some(Drawable::FALLBACK_SPRITE)
        );
        assert_eq!(resolve_image(Drawable::Player(SpriteVariant::RunLeft), |_| false), None);
    }

    #[test]
    fn test_missing_world_image_skipped() {
        let only_fallback = |d: Drawable| d == Drawable::FALLBACK_SPRITE;
        assert_eq!(resolve_image(Drawable::Platform, only_fallback), None);
        assert_eq!(resolve_image(Drawable::Background, only_fallback), None);
    }
}
