pub mod client;
pub mod constants;
pub mod crypto;
pub mod derive;
pub mod ixs;
pub mod tx;
pub mod typedefs;
