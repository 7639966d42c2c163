// SPDX-License-Identifier: MIT OR Apache-2.0
//! Credentials: the master password handed to the envelope codec.
//!
//! The password is zeroized on drop and never printed. The ID exists so
//! higher layers can key credentials in their own stores; the codec
//! itself only consumes the password.

use std::fmt;

use zeroize::Zeroizing;

/// A credentials value identifying a master password.
pub struct Credentials {
    id: String,
    master_password: Zeroizing<String>,
}

impl Credentials {
    /// Credentials with a freshly generated ID.
    pub fn new(master_password: &str) -> Self {
        Self::with_id(&uuid::Uuid::new_v4().to_string(), master_password)
    }

    /// Credentials with an explicit ID.
    pub fn with_id(id: &str, master_password: &str) -> Self {
        Self {
            id: id.to_string(),
            master_password: Zeroizing::new(master_password.to_string()),
        }
    }

    /// The credentials ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The master password.
    pub fn master_password(&self) -> &str {
        &self.master_password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("master_password", &"<redacted>")
            .finish()
    }
}
