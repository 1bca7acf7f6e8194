pub mod token;

pub use token::{Claims, IssuedToken, TOKEN_LIFETIME_SECS};
