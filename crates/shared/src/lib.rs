mod error;
pub mod memory;
mod page;
mod timer;

pub use error::*;
pub use memory::{ElementSnapshot, ElementSpec, MemoryPage, NodeId, PageSnapshot};
pub use page::*;
pub use timer::*;
