//! Label rails: off-chart label columns and their routed connectors.
//!
//! - `router` — the two-phase protocol: rail ordering (pure geometry) and
//!   connector routing from measured label boxes.
//!
//! `RailState` below is the reactive half of the contract: it owns the
//! measured label boxes and the routed connectors for one ring, and
//! re-routes exactly when the slice set, the viewport, or the measured
//! box set changes. It lives as long as its ring view — created with the
//! app, dropped with it.

pub mod router;

use std::collections::HashMap;

use eframe::egui::{Rect, Vec2};
use log::debug;

use crate::chart::radial::Slice;
use crate::rail::router::{route_connectors, ConnectorLine};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x100_0000_01b3;

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Stable fingerprint of a slice set: labels and values. Changes exactly
/// when a ring shows different data (new category, new tax amount).
pub fn ring_signature(slices: &[Slice]) -> u64 {
    let mut hash = FNV_OFFSET;
    for s in slices {
        hash = fnv1a(hash, s.label.as_bytes());
        hash = fnv1a(hash, &[0xff]);
        hash = fnv1a(hash, &s.value.to_bits().to_le_bytes());
    }
    hash
}

/// Per-ring routing cache. Measurements are recorded every frame as the
/// label widgets are laid out; routing re-runs only when an invalidation
/// key changes.
#[derive(Debug, Default)]
pub struct RailState {
    measured: HashMap<String, Rect>,
    connectors: Vec<ConnectorLine>,
    routed_key: Option<(u64, Vec2, u64)>,
}

impl RailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rendered bounding box of one rail label (shared screen
    /// space). Called once per label per frame, after egui places it.
    pub fn record_measurement(&mut self, label: &str, rect: Rect) {
        self.measured.insert(label.to_string(), rect);
    }

    /// Drop measurements for labels no longer in the slice set, so a ring
    /// change cannot route against stale boxes.
    pub fn retain_labels(&mut self, slices: &[Slice]) {
        self.measured
            .retain(|label, _| slices.iter().any(|s| &s.label == label));
    }

    /// Re-route if the slice set, viewport, or measured boxes changed
    /// since the last routing; otherwise keep the cached connectors.
    pub fn route_if_needed(&mut self, slices: &[Slice], viewport: Vec2) -> &[ConnectorLine] {
        let key = (ring_signature(slices), viewport, self.measured_fingerprint());
        if self.routed_key != Some(key) {
            debug!(
                "re-routing {} connectors ({} labels measured)",
                slices.len(),
                self.measured.len()
            );
            self.connectors = route_connectors(slices, &self.measured);
            self.routed_key = Some(key);
        }
        &self.connectors
    }

    pub fn connectors(&self) -> &[ConnectorLine] {
        &self.connectors
    }

    // Order-independent: per-entry hashes combined by wrapping add, since
    // HashMap iteration order is arbitrary.
    fn measured_fingerprint(&self) -> u64 {
        let mut acc: u64 = 0;
        for (label, rect) in &self.measured {
            let mut hash = fnv1a(FNV_OFFSET, label.as_bytes());
            for v in [rect.min.x, rect.min.y, rect.max.x, rect.max.y] {
                hash = fnv1a(hash, &v.to_bits().to_le_bytes());
            }
            acc = acc.wrapping_add(hash);
        }
        acc
    }
}
