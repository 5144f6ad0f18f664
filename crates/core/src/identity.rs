//! Identity contract supplied by the hosting application.

use std::sync::RwLock;

/// Supplies the signed-in owner identifier.
///
/// Every mutating repository operation checks this before any optimistic
/// apply or network call; an absent owner rejects the mutation with
/// [`Error::SignedOut`](crate::Error::SignedOut).
pub trait IdentityProvider: Send + Sync {
    /// Identifier of the signed-in owner, if any.
    fn current_owner(&self) -> Option<String>;

    fn is_signed_in(&self) -> bool {
        self.current_owner().is_some()
    }
}

/// Fixed identity for composition roots and tests.
pub struct StaticIdentity {
    owner: Option<String>,
}

impl StaticIdentity {
    pub fn signed_in(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self { owner: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_owner(&self) -> Option<String> {
        self.owner.clone()
    }
}

/// Mutable identity slot for applications with a sign-in/sign-out flow.
#[derive(Default)]
pub struct SharedIdentity {
    owner: RwLock<Option<String>>,
}

impl SharedIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, owner: impl Into<String>) {
        *self.owner.write().unwrap() = Some(owner.into());
    }

    pub fn sign_out(&self) {
        *self.owner.write().unwrap() = None;
    }
}

impl IdentityProvider for SharedIdentity {
    fn current_owner(&self) -> Option<String> {
        self.owner.read().unwrap().clone()
    }
}
