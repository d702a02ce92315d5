//! Progressive-disclosure state for the app: which levels have been
//! unlocked, which level is in view, and what is selected.

pub mod drill;
