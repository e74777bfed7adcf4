//! Session persistence: the bearer token and cached user info.

pub mod file;
pub mod manager;
pub mod memory;
pub mod store;

pub use file::FileSessionStore;
pub use manager::SessionManager;
pub use memory::MemorySessionStore;
pub use store::SessionStore;
