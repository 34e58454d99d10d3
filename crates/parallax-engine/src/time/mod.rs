//! Time subsystem.
//!
//! Frame timing decoupled from the runtime:
//! - one `FrameClock` per window
//! - `tick()` once per presented frame yields a `FrameTime` carrying both the
//!   delta since the previous frame and the elapsed time since the clock started

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
