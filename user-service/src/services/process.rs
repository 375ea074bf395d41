use super::allocator;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Memory held by this process, in bytes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Resident set size.
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
    /// Live heap allocations made through the global allocator.
    #[serde(rename = "heapUsed")]
    pub heap_used: u64,
}

/// Reads resource usage of the running process on demand.
#[derive(Clone)]
pub struct ProcessMonitor {
    system: Arc<Mutex<System>>,
    pid: Pid,
}

impl ProcessMonitor {
    pub fn new() -> anyhow::Result<Self> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| anyhow::anyhow!("Failed to resolve current PID: {}", e))?;

        Ok(Self {
            system: Arc::new(Mutex::new(System::new())),
            pid,
        })
    }

    /// Refreshes only this process's entry and returns its memory figures.
    pub fn memory_snapshot(&self) -> anyhow::Result<MemorySnapshot> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| anyhow::anyhow!("Process monitor lock poisoned"))?;

        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        let process = system
            .process(self.pid)
            .ok_or_else(|| anyhow::anyhow!("Process {} not found", self.pid))?;

        Ok(MemorySnapshot {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
            heap_used: allocator::heap_used(),
        })
    }
}
