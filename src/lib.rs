//! Furlough - employee leave/permission service
//!
//! The authoritative records live in a relational store; every committed
//! write is propagated to a search index and announced on an event stream.
//! This library exposes all modules for testing purposes.

pub mod entities;
pub mod errors;
pub mod events;
pub mod orchestrator;
pub mod search;
pub mod settings;
pub mod storage;
pub mod web;
