// src/backend/storage/memory.rs
use ic_stable_structures::memory_manager::{MemoryId, MemoryManager, VirtualMemory};
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

// Memory IDs for stable structures. Never reuse or renumber an ID once
// deployed; upgrades read the old layout.
const SHIPMENTS_MEM_ID: MemoryId = MemoryId::new(1);
const DRAFTS_MEM_ID: MemoryId = MemoryId::new(2);
const METRICS_MEM_ID: MemoryId = MemoryId::new(8);
// 9-19 reserved; config cells use 25+ (see config.rs)

pub type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

/// Get memory instance for a specific MemoryId.
pub fn get_memory(id: MemoryId) -> Memory {
    MEMORY_MANAGER.with(|m| m.borrow().get(id))
}

pub fn get_shipments_memory() -> Memory {
    get_memory(SHIPMENTS_MEM_ID)
}

pub fn get_drafts_memory() -> Memory {
    get_memory(DRAFTS_MEM_ID)
}

pub fn get_metrics_memory() -> Memory {
    get_memory(METRICS_MEM_ID)
}
