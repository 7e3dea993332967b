pub mod errors;
pub mod generator;
pub mod scope;

pub use errors::TokenError;
pub use generator::GeneratedToken;
pub use generator::TokenGenerator;
pub use generator::TokenHash;
pub use scope::TokenScope;
