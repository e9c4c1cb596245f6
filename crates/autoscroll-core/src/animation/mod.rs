#![forbid(unsafe_code)]

//! Animation driver for the auto-scrolling list.
//!
//! The driver is split in two:
//!
//! - [`step`] is a pure function advancing an [`OffsetState`] by an elapsed
//!   duration, given geometry, motion gating and interaction state.
//! - [`FrameLoop`] turns host frame timestamps into elapsed durations and
//!   knows when the loop must start, stop or restart.
//!
//! [`AnimationDriver`] owns both plus the offset, and is what widgets hold.

mod driver;
mod frame_loop;

pub use driver::{AnimationDriver, DriverPhase, Motion, OffsetState, phase, step};
pub use frame_loop::{FrameLoop, LoopChange};
