//! The computation core: income → tax → per-category dollars.
//!
//! Everything in here is pure and synchronous. The app recomputes these
//! results in full whenever an input changes; nothing is cached or patched
//! incrementally.

pub mod tax;
pub mod allocation;
