//! Records of resources handed to an engine.
//!
//! A [`Manifest`] is the serializable picture of a deployment as the engine
//! saw it: one [`ResourceRecord`] per URN, holding the finished argument
//! record and the options it was registered with.

mod types;

pub use types::*;
