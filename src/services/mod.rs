// src/services/mod.rs
//
// Core operations. Each takes the pool and, where an actor matters, an
// explicit `Session`; none reads request state.

pub mod account;
pub mod auth;
pub mod feed;
pub mod graph;
pub mod messages;
pub mod users;
