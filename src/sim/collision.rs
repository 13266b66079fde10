//! Landing detection
//!
//! Objects are one-way: the player can land on a top edge while falling but
//! passes freely through sides and undersides. There is no general rectangle
//! intersection here.

use super::object::Rect;

/// Whether `player`, moving with vertical velocity `vy`, lands on or rests on `object`.
///
/// True when the player's bottom is at or above the object's top this frame,
/// would reach or cross it next frame, and the player's horizontal centre lies
/// over the object's span.
pub fn is_supported_by(player: &Rect, vy: f32, object: &Rect) -> bool {
    let bottom = player.bottom();
    let top = object.top();
    let center = player.center_x();

    bottom <= top && bottom + vy >= top && center >= object.left() && center <= object.right()
}

/// Whether any rect in `objects` supports the player
pub fn is_supported_by_any(player: &Rect, vy: f32, objects: impl IntoIterator<Item = Rect>) -> bool {
    objects
        .into_iter()
        .any(|obj| is_supported_by(player, vy, &obj))
}
