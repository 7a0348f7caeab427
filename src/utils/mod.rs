pub mod constants;
pub mod fetch;
pub mod logger;
