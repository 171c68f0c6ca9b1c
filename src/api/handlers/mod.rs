pub mod auth;
pub mod health;
pub mod root;
pub mod secret;
pub mod user_login;
pub mod user_register;
