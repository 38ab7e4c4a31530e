//! Per-user dashboard state and the render pipeline that turns a selection
//! into cards, notices and a map description.

pub mod context;
pub mod dashboard;
pub mod error;
pub mod presentation;
pub mod selection;
