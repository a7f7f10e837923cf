//! Shared utilities: process bootstrap and storage lock-retry.

pub mod bootstrap;
pub mod retry;
