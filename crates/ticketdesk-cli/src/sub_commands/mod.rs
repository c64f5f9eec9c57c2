pub mod fetch;
pub mod tickets;
pub mod token;
