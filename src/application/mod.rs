//! Application layer - Use cases and orchestration.
//!
//! This module contains the prompt-assembly and chat pipeline. Services
//! depend on domain ports (traits) rather than concrete implementations.

pub mod services;

pub use services::{ChatService, RetrievalService};
