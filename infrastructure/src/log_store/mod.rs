//! Protocol log storage.

mod memory;

pub use memory::InMemoryLogStore;
