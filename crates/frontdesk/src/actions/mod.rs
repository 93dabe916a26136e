//! User-intent operations composed from the screens.
//!
//! Action objects borrow the [`Session`](crate::Session) and own their screen.
//! Transitions return the action object again so calls chain:
//!
//! ```ignore
//! login
//!     .enter_username("frontdesk").await?
//!     .enter_password("secret").await?
//!     .click_login().await?;
//! ```
//!
//! Observations (`is_*_displayed`, `*_text`) have no side effects.

mod home;
mod login;
mod reservation;

pub use home::HomeActions;
pub use login::LoginActions;
pub use reservation::ReservationActions;

use crate::result::{FrontdeskError, FrontdeskResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Uniform index source for "pick any" operations.
///
/// Seeded choosers replay the same sequence of picks, which makes a failing
/// run reproducible.
#[derive(Debug)]
pub struct RandomChooser {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RandomChooser {
    /// Seeded when `seed` is given, entropy-backed otherwise
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
            seed,
        }
    }

    /// Deterministic chooser
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Seed in use, if any
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform index in `[0, count)`
    pub fn pick_index(&self, count: usize, what: &str) -> FrontdeskResult<usize> {
        if count == 0 {
            return Err(FrontdeskError::NoElementsAvailable {
                what: what.to_string(),
            });
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rng.gen_range(0..count))
    }
}
