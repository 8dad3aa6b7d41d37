//! Time-driven easing for shader and UI parameters.
//!
//! The [`anim`] module holds the engine: easing curves and the [`Animation`]
//! state machine. [`timing`], [`config`] and [`app`] are the caller side,
//! turning input events and a clock into a per-frame uniform block.
//!
//! [`Animation`]: anim::Animation
pub mod anim;
pub mod app;
pub mod config;
pub mod timing;
