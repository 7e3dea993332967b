pub mod identity;
pub mod token;
pub mod user;
pub mod validator;
