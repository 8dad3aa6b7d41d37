pub mod animation;
pub mod easing;

pub use animation::{Animation, AnimationState, Direction, Millis};
pub use easing::{Easing, EasingKind};
