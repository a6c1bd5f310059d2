//! In-memory identity provider.
//! Accounts live only as long as the page; used when no JS provider is
//! installed and in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use dora_core::identity::{IdentityCallback, IdentityListeners, Subscription};
use dora_core::ports::IdentityPort;
use dora_types::{
    ChatError, Result,
    identity::{Credential, Identity},
};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: String,
    password: String,
}

pub struct MemoryIdentity {
    accounts: RefCell<HashMap<String, Account>>,
    current: RefCell<Option<Identity>>,
    listeners: IdentityListeners,
    next_uid: Cell<u64>,
    tokens_minted: Cell<u64>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self {
            accounts: RefCell::new(HashMap::new()),
            current: RefCell::new(None),
            listeners: IdentityListeners::new(),
            next_uid: Cell::new(1),
            tokens_minted: Cell::new(0),
        }
    }

    fn allocate_uid(&self) -> String {
        let n = self.next_uid.get();
        self.next_uid.set(n + 1);
        format!("local-{}", n)
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.borrow_mut() = identity.clone();
        log::info!(
            "Identity changed: {}",
            identity.as_ref().map(|i| i.display_name()).unwrap_or("signed out")
        );
        self.listeners.notify(identity);
    }

    pub fn tokens_minted(&self) -> u64 {
        self.tokens_minted.get()
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl IdentityPort for MemoryIdentity {
    fn is_ready(&self) -> bool {
        true
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    fn on_identity_change(&self, callback: IdentityCallback) -> Subscription {
        self.listeners.subscribe(callback)
    }

    async fn fetch_token(&self) -> Result<Option<Credential>> {
        let uid = match self.current.borrow().as_ref() {
            Some(identity) => identity.uid.clone(),
            None => return Ok(None),
        };
        let n = self.tokens_minted.get() + 1;
        self.tokens_minted.set(n);
        Ok(Some(Credential::new(format!("memory.{}.{}", uid, n))))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let uid = {
            let accounts = self.accounts.borrow();
            match accounts.get(email) {
                Some(account) if account.password == password => account.uid.clone(),
                _ => return Err(ChatError::Identity("invalid email or password".to_string())),
            }
        };
        let identity = Identity {
            uid,
            email: Some(email.to_string()),
            anonymous: false,
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        if !email.contains('@') {
            return Err(ChatError::Identity("invalid email address".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ChatError::Identity("password is too weak".to_string()));
        }
        if self.accounts.borrow().contains_key(email) {
            return Err(ChatError::Identity("email already in use".to_string()));
        }
        let uid = self.allocate_uid();
        self.accounts.borrow_mut().insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        let identity = Identity {
            uid,
            email: Some(email.to_string()),
            anonymous: false,
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_anonymously(&self) -> Result<Identity> {
        let identity = Identity {
            uid: self.allocate_uid(),
            email: None,
            anonymous: true,
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.set_current(None);
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
