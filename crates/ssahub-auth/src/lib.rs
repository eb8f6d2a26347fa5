//! # ssahub-auth
//!
//! Credentials for the back office.
//!
//! - `jwt`: bearer token issuing and verification (HS256)
//! - `password`: Argon2id hashing and the minimum password policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
