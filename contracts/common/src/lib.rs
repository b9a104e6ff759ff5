//! Shared capabilities for the stake-escrow contract suite.
//!
//! Currently this crate provides a single capability:
//! - [`ownable`] — single-owner access control with one-step transfer.
//!
//! The capability is a plain module over contract storage rather than a base
//! type: contracts compose it by calling its functions inside their own
//! entry points, which keeps the guard substitutable in tests.

#![no_std]

pub mod ownable;
