//! Request middleware for the listener binding.

pub mod trace;

pub use trace::Trace;
