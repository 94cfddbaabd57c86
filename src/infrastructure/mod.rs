//! Infrastructure layer - user-facing integration surface.
//!
//! This layer adapts the permit pool to call sites: wrappers that apply the
//! admission check in front of arbitrary units of work and escalate a
//! denial into a typed error.

pub mod decorate;
