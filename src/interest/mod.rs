pub mod compound;

pub use compound::{annual_percentage_yield, periodic_rate, CompoundingFrequency};
