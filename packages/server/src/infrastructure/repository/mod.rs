//! Repository implementations.

mod inmemory;

pub use inmemory::{InMemoryAssignmentDirectory, InMemoryMessageStore};
