//! Core types for orgdesk.
//!
//! This crate provides everything the orgdesk CLI builds on:
//! - `event` types for events, organizers and directory users
//! - `protocol` and `transport` for talking to the event backend
//! - `search`, the incremental cursor-paginated user search
//! - `board` and `admin`, the event list and the mutations that invalidate it

pub mod admin;
pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod invalidation;
pub mod protocol;
pub mod search;
pub mod transport;

pub use error::{OrgDeskError, OrgDeskResult};
pub use event::*;
