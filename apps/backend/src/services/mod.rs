pub mod games;
pub mod registry;
pub mod users;
