//! Process-wide numerical settings.
//!
//! [`Settings`] holds the tolerances and iteration caps used by the
//! root-finding kernel and the continued-fraction evaluator. It is stored in
//! a `std::sync::OnceLock`: it may be installed once at process start and is
//! read-only afterwards. Callers that never install a value get
//! [`Settings::default`].

use std::sync::OnceLock;

use crate::errors::{Error, Result};
use crate::Real;

/// Tolerances and iteration caps of the iterative kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Bracket width at which bisection stops.
    pub bisection_precision: Real,
    /// Hard cap on bisection halvings.
    pub bisection_max_iterations: u64,
    /// Relative Newton step size below which the iterate is accepted.
    pub newton_tolerance: Real,
    /// Newton iteration cap.
    pub newton_max_iterations: u64,
    /// Lentz convergence threshold on `|δ − 1|`.
    pub continued_fraction_tolerance: Real,
    /// Lentz / series term cap.
    pub continued_fraction_max_iterations: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bisection_precision: 1e-9,
            bisection_max_iterations: 200,
            newton_tolerance: 1e-4,
            newton_max_iterations: 100,
            continued_fraction_tolerance: 1e-16,
            continued_fraction_max_iterations: 1_000_000_000,
        }
    }
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return the process-wide settings, initialising them to the defaults
    /// on first access.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(Settings::default)
    }

    /// Install `settings` as the process-wide value.
    ///
    /// Fails if the values are not usable or if the settings were already
    /// initialised (explicitly or by an earlier call to [`instance`]).
    ///
    /// [`instance`]: Settings::instance
    pub fn install(settings: Settings) -> Result<()> {
        settings.validate()?;
        INSTANCE
            .set(settings)
            .map_err(|_| Error::Runtime("settings already initialised".into()))
    }

    /// Check that every tolerance is positive and every cap non-zero.
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.bisection_precision > 0.0,
            "bisection precision must be positive, got {}",
            self.bisection_precision
        );
        crate::ensure!(
            self.newton_tolerance > 0.0,
            "newton tolerance must be positive, got {}",
            self.newton_tolerance
        );
        crate::ensure!(
            self.continued_fraction_tolerance > 0.0,
            "continued fraction tolerance must be positive, got {}",
            self.continued_fraction_tolerance
        );
        crate::ensure!(
            self.bisection_max_iterations > 0
                && self.newton_max_iterations > 0
                && self.continued_fraction_max_iterations > 0,
            "iteration caps must be non-zero"
        );
        Ok(())
    }
}
