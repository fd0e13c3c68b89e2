//! Storage traits and their in-process implementations.

pub mod users;
