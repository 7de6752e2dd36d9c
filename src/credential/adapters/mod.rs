//! Adapter implementations for credential ports.

pub mod memory;
