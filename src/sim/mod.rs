//! Simulation module - Field state, transition engine, codec, and session.

pub mod codec;
mod life;
mod session;
pub mod soup;

pub use codec::CodecError;
pub use life::{CellCensus, Field, LifeEngine};
pub use session::{Session, SessionError};
