//! Data models for the Worship Team Scheduler application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod member;
mod schedule;

pub use member::*;
pub use schedule::*;
