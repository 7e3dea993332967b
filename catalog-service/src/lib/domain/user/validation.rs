//! Input rules shared by registration and login.

use crate::domain::user::models::NewUser;
use crate::domain::validator::Validator;

pub const NAME_MAX_BYTES: usize = 500;
pub const PASSWORD_MIN_BYTES: usize = 8;
pub const PASSWORD_MAX_BYTES: usize = 72;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "a user with this email address already exists";

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(
        email_address::EmailAddress::is_valid(email),
        "email",
        "must be a valid email address",
    );
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        password.len() >= PASSWORD_MIN_BYTES,
        "password",
        "must be at least 8 bytes long",
    );
    v.check(
        password.len() <= PASSWORD_MAX_BYTES,
        "password",
        "must not be more than 72 bytes long",
    );
}

pub fn validate_user(v: &mut Validator, user: &NewUser) {
    v.check(!user.first_name.is_empty(), "first_name", "must be provided");
    v.check(
        user.first_name.len() <= NAME_MAX_BYTES,
        "first_name",
        "must not be more than 500 bytes long",
    );

    v.check(!user.last_name.is_empty(), "last_name", "must be provided");
    v.check(
        user.last_name.len() <= NAME_MAX_BYTES,
        "last_name",
        "must not be more than 500 bytes long",
    );

    validate_email(v, &user.email);

    if let Some(plaintext) = user.password.plaintext() {
        validate_password_plaintext(v, plaintext);
    }
}
