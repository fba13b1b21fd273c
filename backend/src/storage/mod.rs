//! # Storage Module
//!
//! Holders for the fee record collection. The domain layer depends only on
//! the [`FeeStorage`] trait.

pub mod memory;
pub mod traits;

pub use memory::InMemoryFeeStore;
pub use traits::FeeStorage;
