//! Declarative device-alias, VSAN and zone/zoneset management for Cisco MDS
//! fabric switches.
//!
//! A run reads the switch's current state through `show` commands, compares
//! it with a requested state, and pushes the ordered configuration commands
//! that close the gap. With check mode on, the same commands are reported and
//! nothing is pushed.
//!
//! # Architecture
//!
//! ## Input
//!
//! - [`request`] — Request documents (TOML or JSON) and their typed model
//! - [`validate`] — Batch validation before the switch is contacted
//!
//! ## Reconciliation
//!
//! - [`reconcile`] — Per-family planners producing ordered command lists
//!   - Device-alias distribution, mode and database
//!   - VSAN database entries
//!   - Zoning settings, zones and zonesets per VSAN
//! - [`run`] — Orchestrates read, plan and apply for every family
//!
//! ## Switch Access
//!
//! - [`device`] — The [`device::Device`] seam and a snapshot-backed stand-in
//! - [`facts`] — Read-only collection of the observed fabric state
//!
//! ## Reporting
//!
//! - [`report`] — Terminal-friendly colored output for runs and facts
//! - [`error`] — Errors that abort a run
//!
//! Parsing of `show` output lives in the `fabric-facts` crate.

pub mod device;
pub mod error;
pub mod facts;
pub mod reconcile;
pub mod report;
pub mod request;
pub mod run;
pub mod validate;
