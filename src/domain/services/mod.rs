pub mod clock;
pub mod week_range;
pub mod phone;
