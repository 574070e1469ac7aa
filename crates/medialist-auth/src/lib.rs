//! # medialist-auth
//!
//! Authentication building blocks for MediaList.
//!
//! ## Modules
//!
//! - `jwt` — access/refresh token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `session` — session cache mapping access tokens to user ids

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionCache;
