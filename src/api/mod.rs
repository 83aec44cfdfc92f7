pub mod dashboard;
pub mod employee;
pub mod messages;
pub mod station;
pub mod supplies;
