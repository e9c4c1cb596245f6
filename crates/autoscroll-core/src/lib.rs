#![forbid(unsafe_code)]

//! Core: pixel geometry, input events, and deterministic scroll stepping.
//!
//! # Role in autoscroll
//! `autoscroll-core` owns the arithmetic of the auto-scrolling list. It has no
//! notion of a DOM, a frame scheduler, or a clock: every function takes the
//! current time and geometry as arguments, so the whole motion model can be
//! exercised from plain unit tests.
//!
//! # Primary responsibilities
//! - **Geometry**: one-copy height, visible window, overflow test, wrap.
//! - **Events**: canonical widget input (frames, pointer, wheel, resize).
//! - **Interaction**: hover pause, suspension window, wheel override.
//! - **Animation**: the pure [`animation::step`] function and the frame loop
//!   bookkeeping that feeds it elapsed time.
//!
//! # How it fits in the system
//! `autoscroll-backend` defines the host capability traits on top of these
//! types, and `autoscroll-widgets` wires them into the `AutoScrollList`
//! widget.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod interaction;
