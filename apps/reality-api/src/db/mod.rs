pub mod mongo;
pub mod slot;
pub mod store;
