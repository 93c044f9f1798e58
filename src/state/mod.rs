//! State tracking module for Migration-Audit
//!
//! This module defines the lifecycle every audited page walks through.

mod audit_state;

pub use audit_state::AuditState;
