pub mod jwt;
pub mod password;
pub mod validate;

pub use validate::{ValidPath, ValidatedJson};
