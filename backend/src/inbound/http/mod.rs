//! HTTP listener binding.

pub mod health;
pub mod lookup;
pub mod schemas;
pub mod state;
