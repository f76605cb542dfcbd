//! wotatoken - JKT48Connect access codes and replay access
//!
//! This crate implements the admin console for access codes managed by the
//! wotatokens API, and the membership policy that gates replay viewing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
