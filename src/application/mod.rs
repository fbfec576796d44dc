//! Application layer containing the bridge operations.
//!
//! This module defines the `ApplePayPlugin` which acts as the primary entry
//! point for bridge commands, and the `AuthorizationRelay` that resolves the
//! single outstanding payment callback from the sheet's asynchronous events.

pub mod plugin;
