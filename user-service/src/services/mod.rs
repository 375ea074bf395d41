pub mod allocator;
pub mod process;

pub use allocator::CountingAllocator;
pub use process::{MemorySnapshot, ProcessMonitor};
