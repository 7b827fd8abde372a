pub mod number;
pub mod show;
