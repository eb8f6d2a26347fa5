//! Student association leaders.

pub mod model;

pub use model::{Leader, LeaderPatch, NewLeader};
