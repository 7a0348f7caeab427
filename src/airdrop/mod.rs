pub mod amount;
pub mod association;
pub mod error;
pub mod orchestrator;
pub mod settlement;
pub mod transfer;

#[cfg(test)]
mod fakes;
