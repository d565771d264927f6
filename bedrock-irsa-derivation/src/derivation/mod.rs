//! Policy derivation for the model-inference role.

mod engine;

pub use engine::Deriver;
