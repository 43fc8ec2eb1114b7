pub mod affordability;
pub mod investment;
pub mod mortgage;
pub mod schedule;
