//! The discovery queue and the paced driver that drains it

pub mod driver;
pub mod events;
pub mod queue;
