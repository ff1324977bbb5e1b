//! Django-compatible password verification
//!
//! The site stores passwords the way Django's auth app does:
//! `<algorithm>$<algorithm-specific fields>`. Two algorithms are understood:
//!
//! - `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>` (Django's default)
//! - `argon2$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>` (a PHC string after
//!   the `argon2` prefix)
//!
//! Anything else, including unusable passwords (leading `!`), never verifies.

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use constant_time_eq::constant_time_eq;
use log::debug;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::core::models::Account;
use crate::core::ports::SecretVerifier;

const PBKDF2_SHA256: &str = "pbkdf2_sha256";
const ARGON2: &str = "argon2";
const KEY_LENGTH: usize = 32;
const EQUALIZE_SALT: &str = "brightmindsequalize";

/// Verifies secrets against Django-encoded password hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DjangoHasher {
    iterations: u32,
}

impl DjangoHasher {
    /// PBKDF2 iteration count used by current Django releases
    pub const DEFAULT_ITERATIONS: u32 = 870_000;

    /// Create a hasher that encodes (and equalizes) with `iterations` rounds
    ///
    /// Verification always uses the iteration count stored in the hash.
    #[must_use]
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Iteration count used for new hashes
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Encode `password` as a `pbkdf2_sha256` hash with the given salt
    #[must_use]
    pub fn encode_pbkdf2(&self, password: &str, salt: &str) -> String {
        let hash = pbkdf2_digest(password, salt, self.iterations);
        format!("{PBKDF2_SHA256}${}${salt}${hash}", self.iterations)
    }

    /// Whether `password` matches the encoded hash
    #[must_use]
    pub fn check_password(&self, password: &str, encoded: &str) -> bool {
        if encoded.is_empty() || encoded.starts_with('!') {
            return false;
        }
        let Some((algorithm, fields)) = encoded.split_once('$') else {
            return false;
        };

        match algorithm {
            PBKDF2_SHA256 => verify_pbkdf2(password, fields),
            ARGON2 => verify_argon2(password, fields),
            other => {
                debug!("unsupported password hasher: {other}");
                false
            },
        }
    }
}

impl Default for DjangoHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

impl SecretVerifier for DjangoHasher {
    fn verify(&self, account: &Account, plaintext: &str) -> bool {
        self.check_password(plaintext, &account.secret_hash)
    }

    fn equalize(&self, plaintext: &str) {
        std::hint::black_box(pbkdf2_digest(plaintext, EQUALIZE_SALT, self.iterations));
    }
}

fn pbkdf2_digest(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    STANDARD.encode(key)
}

fn verify_pbkdf2(password: &str, fields: &str) -> bool {
    let mut parts = fields.splitn(3, '$');
    let (Some(iterations), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 || salt.is_empty() {
        return false;
    }

    let computed = pbkdf2_digest(password, salt, iterations);
    constant_time_eq(computed.as_bytes(), expected.as_bytes())
}

fn verify_argon2(password: &str, fields: &str) -> bool {
    let phc = format!("${fields}");
    let Ok(hash) = PasswordHash::new(&phc) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &hash).is_ok()
}
