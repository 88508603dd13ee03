pub mod slot;
pub mod reservation;
pub mod job;
