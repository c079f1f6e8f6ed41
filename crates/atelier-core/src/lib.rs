//! # atelier-core
//!
//! Core types and error types for Atelier.
//!
//! This crate provides the foundational types shared across all Atelier crates:
//! - Entity structs for tasks, checklists, comments, and approval flows
//! - Status, approval, and capability enums
//! - The acting user identity
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
