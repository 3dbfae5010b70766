pub mod point;
pub mod time;
