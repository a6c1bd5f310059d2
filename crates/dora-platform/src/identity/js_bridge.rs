//! Identity adapter over a page-supplied JS provider.
//!
//! The host page installs `window.doraIdentity` (typically a thin wrapper
//! around its auth SDK) with this shape:
//!
//! ```text
//! isReady(): boolean
//! currentUser(): { uid, email?, isAnonymous? } | null
//! onChange(cb: (user | null) => void): () => void   // returns unsubscribe
//! getIdToken(): Promise<string | null>
//! signIn(email, password): Promise<user>
//! signUp(email, password): Promise<user>
//! signInAnonymously(): Promise<user>
//! signOut(): Promise<void>
//! ```

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use dora_core::identity::{IdentityCallback, Subscription};
use dora_core::ports::IdentityPort;
use dora_types::{
    ChatError, Result,
    identity::{Credential, Identity},
};

const GLOBAL_NAME: &str = "doraIdentity";

#[wasm_bindgen]
extern "C" {
    pub type JsIdentity;

    #[wasm_bindgen(method, js_name = isReady)]
    fn is_ready(this: &JsIdentity) -> bool;

    #[wasm_bindgen(method, js_name = currentUser)]
    fn current_user(this: &JsIdentity) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = onChange)]
    fn on_change(this: &JsIdentity, callback: &Closure<dyn FnMut(JsValue)>) -> std::result::Result<Function, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getIdToken)]
    fn get_id_token(this: &JsIdentity) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signIn)]
    fn sign_in(this: &JsIdentity, email: &str, password: &str) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signUp)]
    fn sign_up(this: &JsIdentity, email: &str, password: &str) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signInAnonymously)]
    fn sign_in_anonymously(this: &JsIdentity) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = signOut)]
    fn sign_out(this: &JsIdentity) -> std::result::Result<Promise, JsValue>;
}

pub struct JsIdentityProvider {
    inner: JsIdentity,
}

impl JsIdentityProvider {
    /// Look up `window.doraIdentity`. Fails when the page did not install one.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::JsInterop("No window object".to_string()))?;
        let value = Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME))
            .map_err(|e| ChatError::JsInterop(format!("{:?}", e)))?;
        if !value.is_object() {
            return Err(ChatError::Identity(format!("window.{} is not installed", GLOBAL_NAME)));
        }
        Ok(Self {
            inner: value.unchecked_into(),
        })
    }
}

/// Convert a provider user object; `null`/`undefined` mean signed out.
fn parse_user(value: &JsValue) -> Result<Option<Identity>> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    value
        .into_serde::<Identity>()
        .map(Some)
        .map_err(|e| ChatError::Identity(format!("unrecognised user object: {}", e)))
}

fn js_error(e: JsValue) -> ChatError {
    let message = Reflect::get(&e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    ChatError::Identity(message)
}

async fn settle(promise: std::result::Result<Promise, JsValue>) -> Result<JsValue> {
    JsFuture::from(promise.map_err(js_error)?)
        .await
        .map_err(js_error)
}

async fn settle_user(promise: std::result::Result<Promise, JsValue>) -> Result<Identity> {
    let value = settle(promise).await?;
    parse_user(&value)?
        .ok_or_else(|| ChatError::Identity("provider returned no user".to_string()))
}

#[async_trait(?Send)]
impl IdentityPort for JsIdentityProvider {
    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    fn current_identity(&self) -> Option<Identity> {
        match parse_user(&self.inner.current_user()) {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }

    fn on_identity_change(&self, callback: IdentityCallback) -> Subscription {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            match parse_user(&user) {
                Ok(identity) => callback(identity),
                Err(e) => log::error!("{}", e),
            }
        });
        match self.inner.on_change(&closure) {
            Ok(unsubscribe) => Subscription::new(move || {
                if let Err(e) = unsubscribe.call0(&JsValue::NULL) {
                    log::warn!("Identity unsubscribe failed: {:?}", e);
                }
                drop(closure);
            }),
            Err(e) => {
                log::error!("Identity subscription failed: {:?}", e);
                Subscription::noop()
            }
        }
    }

    async fn fetch_token(&self) -> Result<Option<Credential>> {
        let value = settle(self.inner.get_id_token()).await?;
        Ok(value.as_string().filter(|t| !t.is_empty()).map(Credential::new))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        settle_user(self.inner.sign_in(email, password)).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        settle_user(self.inner.sign_up(email, password)).await
    }

    async fn sign_in_anonymously(&self) -> Result<Identity> {
        settle_user(self.inner.sign_in_anonymously()).await
    }

    async fn sign_out(&self) -> Result<()> {
        settle(self.inner.sign_out()).await.map(|_| ())
    }

    fn provider_name(&self) -> &str {
        "js"
    }
}
