//! Pick the identity provider for this page.
//!
//! Priority: page-installed JS provider → in-memory (fallback)

use std::rc::Rc;
use dora_core::ports::IdentityPort;
use super::{JsIdentityProvider, MemoryIdentity};

/// Returns a trait object so callers are provider-agnostic.
pub fn auto_detect_identity() -> Rc<dyn IdentityPort> {
    match JsIdentityProvider::from_window() {
        Ok(provider) => {
            log::info!("Identity provider: JS bridge");
            Rc::new(provider)
        }
        Err(e) => {
            log::warn!("JS identity provider unavailable ({}), falling back to memory", e);
            Rc::new(MemoryIdentity::new())
        }
    }
}
