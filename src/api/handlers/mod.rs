pub mod availability;
pub mod health;
pub mod reservation;
pub mod slot;
