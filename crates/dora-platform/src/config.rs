//! Client configuration from the host page.
//!
//! The page may define `window.doraConfig` with any subset of
//! [`ClientConfig`]'s fields; missing fields keep their defaults.

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

use dora_types::{ChatError, Result, config::ClientConfig};

const GLOBAL_NAME: &str = "doraConfig";

/// Parse a JS config object. `undefined`/`null` yield the defaults.
pub fn config_from_js(value: &JsValue) -> Result<ClientConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(ClientConfig::default());
    }
    let config: ClientConfig = value
        .into_serde()
        .map_err(|e| ChatError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load from `window.doraConfig`, falling back to defaults on any problem.
pub fn load_config() -> ClientConfig {
    let Some(window) = web_sys::window() else {
        return ClientConfig::default();
    };
    let value = Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME)).unwrap_or(JsValue::UNDEFINED);
    match config_from_js(&value) {
        Ok(config) => {
            log::info!("Config loaded: endpoint {}", config.generation.endpoint);
            config
        }
        Err(e) => {
            log::warn!("Ignoring window.{}: {}", GLOBAL_NAME, e);
            ClientConfig::default()
        }
    }
}
