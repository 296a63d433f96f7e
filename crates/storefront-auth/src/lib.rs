//! # storefront-auth
//!
//! Stateless authentication primitives for the storefront demo:
//!
//! - [`Claims`] — the session token payload (store binding, role,
//!   validity window).
//! - [`encode_token`] / [`decode_token`] — HS256 JWT signing and
//!   verification against the server-held secret.
//! - [`hash_password`] / [`verify_password`] — Argon2id hashing, plus
//!   [`verify_password_uniform`] for the login path, which takes the
//!   same code path whether or not the user exists.
//!
//! Nothing in this crate touches the database; credential lookup and
//! token issuance against stored users live in `storefront-api`.

mod claims;
mod error;
mod jwt;
mod password;

pub use claims::{Claims, Identity};
pub use error::AuthError;
pub use jwt::{decode_token, encode_token};
pub use password::{hash_password, verify_password, verify_password_uniform};
