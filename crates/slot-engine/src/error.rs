//! Error types for slot-engine operations.
//!
//! The pure computations in this crate (timezone conversion, occupancy,
//! best-slot search) are total and never fail — malformed timezone strings
//! degrade to best-effort defaults instead. Errors exist only at the
//! persistence-orchestration seam, where an operation can target an unknown
//! or immovable post, or the backing store can refuse an update.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Unknown post: {0}")]
    UnknownPost(String),

    #[error("Post cannot be moved: {0}")]
    PostImmovable(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
