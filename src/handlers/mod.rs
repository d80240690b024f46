// src/handlers/mod.rs

pub mod auth;
pub mod feed;
pub mod messages;
pub mod users;
