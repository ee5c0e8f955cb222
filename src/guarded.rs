//! Tagged results for numerically guarded computations.
//!
//! Every physics routine in this crate substitutes a safe fallback when it
//! hits a singular input (zero distance, a point inside the horizon, ...).
//! The plain accessors return that fallback directly. The `Guarded` variants
//! let callers tell a computed zero apart from a guard that fired.
//!
//! ```ignore
//! match black_hole.dilation(position) {
//!     Guarded::Computed(factor) => hud.show(factor),
//!     Guarded::Degenerate(Degeneracy::InsideHorizon) => hud.show_frozen(),
//!     Guarded::Degenerate(_) => {}
//! }
//! ```

use std::fmt;

/// Why a guarded computation fell back to its safe value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    /// The point lies at or inside the event horizon.
    InsideHorizon,
    /// Two positions coincide, so no direction can be formed.
    ZeroDistance,
    /// The ray passes exactly through the body.
    ZeroImpactParameter,
    /// No central body has been configured.
    NoPrimary,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::InsideHorizon => write!(f, "position is inside the event horizon"),
            Degeneracy::ZeroDistance => write!(f, "positions coincide"),
            Degeneracy::ZeroImpactParameter => write!(f, "ray passes through the body"),
            Degeneracy::NoPrimary => write!(f, "no primary body configured"),
        }
    }
}

/// Result of a computation that may have been replaced by a fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guarded<T> {
    /// The formula was evaluated normally.
    Computed(T),
    /// A guard fired; the caller picks the fallback.
    Degenerate(Degeneracy),
}

impl<T> Guarded<T> {
    /// The computed value, or `fallback` if a guard fired.
    #[inline]
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Guarded::Computed(v) => v,
            Guarded::Degenerate(_) => fallback,
        }
    }

    /// Whether the formula was evaluated normally.
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, Guarded::Computed(_))
    }

    /// The reason a guard fired, if any.
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        match self {
            Guarded::Computed(_) => None,
            Guarded::Degenerate(reason) => Some(*reason),
        }
    }
}

impl<T: Default> Guarded<T> {
    /// The computed value, or `T::default()` (zero) if a guard fired.
    #[inline]
    pub fn value_or_default(self) -> T {
        self.value_or(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_or() {
        assert_eq!(Guarded::Computed(0.5).value_or(0.0), 0.5);
        assert_eq!(Guarded::<f64>::Degenerate(Degeneracy::InsideHorizon).value_or(0.0), 0.0);
    }

    #[test]
    fn test_degeneracy_reported() {
        let g: Guarded<f64> = Guarded::Degenerate(Degeneracy::NoPrimary);
        assert!(!g.is_computed());
        assert_eq!(g.degeneracy(), Some(Degeneracy::NoPrimary));
        assert_eq!(Guarded::Computed(1.0).degeneracy(), None);
    }
}
