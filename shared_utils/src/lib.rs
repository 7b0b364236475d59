//! Small utilities shared across workspace members.

pub mod math;
