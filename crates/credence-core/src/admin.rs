use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use crate::error::TrustError;
use crate::types::{Address, CallContext};

/// The single process-wide admin identity.
///
/// Shared by every registry through an `Arc`; transferring it from any
/// component changes it for all of them.
///
/// Lock order: an admin guard from [`AdminAuthority::authorize`] is always
/// taken before a registry's own lock, never while holding one.
#[derive(Debug)]
pub struct AdminAuthority {
    admin: RwLock<Address>,
}

impl AdminAuthority {
    /// Create an authority with `admin` as the initial admin.
    pub fn new(admin: Address) -> Self {
        Self {
            admin: RwLock::new(admin),
        }
    }

    /// Current admin identity.
    pub fn current(&self) -> Address {
        self.admin
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `caller` is the admin right now.
    pub fn is_admin(&self, caller: &Address) -> bool {
        *self.admin.read().unwrap_or_else(PoisonError::into_inner) == *caller
    }

    /// Check that `caller` is the admin and keep the role pinned.
    ///
    /// The returned guard blocks [`AdminAuthority::transfer`] until it is
    /// dropped, so an admin-only mutation performed while holding it cannot
    /// land after the caller lost the role.
    pub fn authorize(&self, caller: &Address) -> Result<RwLockReadGuard<'_, Address>, TrustError> {
        let admin = self.admin.read().unwrap_or_else(PoisonError::into_inner);
        if *admin != *caller {
            tracing::debug!(caller = %caller, "admin check failed");
            return Err(TrustError::unauthorized(caller));
        }
        Ok(admin)
    }

    /// Replace the admin identity. Only the current admin may do this.
    pub fn transfer(&self, ctx: &CallContext, new_admin: Address) -> Result<(), TrustError> {
        let mut admin = self.admin.write().unwrap_or_else(PoisonError::into_inner);
        if *admin != ctx.caller {
            tracing::warn!(caller = %ctx.caller, "admin transfer rejected");
            return Err(TrustError::unauthorized(&ctx.caller));
        }
        tracing::info!(
            from = %admin,
            to = %new_admin,
            height = ctx.height,
            "admin transferred"
        );
        *admin = new_admin;
        Ok(())
    }
}
