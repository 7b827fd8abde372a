pub mod queries;
pub mod votes;
