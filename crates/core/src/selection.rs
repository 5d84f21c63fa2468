// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cab selection policies.
//!
//! The dispatcher gathers every idle cab in the requested city together with
//! the idle time it has accumulated, and asks a policy to pick one.

use cab_dispatch_domain::CabId;
use rand::RngCore;
use rand::seq::SliceRandom;
use time::Duration;

/// An idle cab offered to a selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleCandidate {
    /// The cab.
    pub cab_id: CabId,
    /// Idle time accumulated since registration, as of the request time.
    pub idle_time: Duration,
}

/// Chooses which idle cab fulfils a dispatch request.
pub trait SelectionPolicy: std::fmt::Debug + Send + Sync {
    /// Picks one cab from `candidates`.
    ///
    /// Returns `None` only when `candidates` is empty. Policies that need to
    /// break ties draw from `rng` so the dispatcher can seed selection.
    fn select(&self, candidates: &[IdleCandidate], rng: &mut dyn RngCore) -> Option<CabId>;
}

/// Picks the cab that has been idle the longest.
///
/// Cabs tied on the maximum idle time are chosen uniformly at random, so
/// equally rested cabs share the work.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestIdle;

impl SelectionPolicy for LongestIdle {
    fn select(&self, candidates: &[IdleCandidate], rng: &mut dyn RngCore) -> Option<CabId> {
        let longest: Duration = candidates.iter().map(|c| c.idle_time).max()?;
        let tied: Vec<CabId> = candidates
            .iter()
            .filter(|c| c.idle_time == longest)
            .map(|c| c.cab_id)
            .collect();
        tied.choose(rng).copied()
    }
}
