//! Replay handlers.
//!
//! ## Queries
//! - Check whether the stored membership may watch a replay

mod check_replay_access;

pub use check_replay_access::{
    CheckReplayAccessHandler, CheckReplayAccessQuery, ReplayAccess, ReplayAccessError,
    ReplayView, REPLAY_TITLE,
};
