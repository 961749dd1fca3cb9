//! Core Kernel - Foundational types for the person registry
//!
//! This crate provides the fundamental building blocks used across all layers:
//! - Strongly-typed entity identifiers
//! - Port infrastructure for swappable storage adapters
//! - Wire date handling (`dd/MM/yyyy`)

pub mod identifiers;
pub mod ports;
pub mod temporal;

pub use identifiers::{AddressId, PersonId};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
pub use temporal::{format_wire_date, parse_wire_date, INVALID_DATE_MESSAGE, WIRE_DATE_FORMAT};
