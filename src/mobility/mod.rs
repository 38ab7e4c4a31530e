//! Counting-station data: loading counts and station locations, the hourly
//! join with weather, and simple statistics over the joined table.

pub mod analysis;
mod columns;
pub mod counts;
pub mod error;
pub mod join;
pub mod locations;
