mod fallback;
mod health;
mod helper;
mod user;
