pub mod log;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod queries;
