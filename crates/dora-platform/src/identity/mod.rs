pub mod memory;
pub mod js_bridge;
pub mod auto;

pub use memory::MemoryIdentity;
pub use js_bridge::JsIdentityProvider;
pub use auto::auto_detect_identity;
