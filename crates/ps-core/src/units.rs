//! Time and flow-coefficient unit conversions, plus the constants that tie
//! them together.
//!
//! The simulator's clock is an integer microsecond counter (§4.3); PDL and
//! ProcLang both speak in fractional seconds. `FC` ("flow coefficient") is
//! the reciprocal of `teq` ("equilibration time") in seconds: a small `teq`
//! is a wide-open valve, a large `teq` is nearly shut.
//!
//! `teq_to_fc` is deliberately unclamped: a `teq` below `TEQ_MIN_MICROS`
//! yields an `FC` above `FC_MAX`, and it is the caller (component
//! validation, in `ps-components`) that treats `FC > FC_MAX` as invalid.
//! The `open` sentinel bypasses this formula entirely and resolves directly
//! to `FC_MAX`, so a hand-authored "open" state is always valid while a
//! pathologically fast `teq` is not — legal to parse, invalid to solve.

/// Unit string used when reporting pressures; the simulator only ever
/// reasons about one pressure unit, but callers format against it.
pub const ATM: &str = "atm";

/// Flow coefficient of a fully open edge. Any derived `FC` above this is a
/// validation failure rather than a silently-accepted "more open than open".
pub const FC_MAX: f64 = 1.0e6;

/// Smallest `teq` the engine will accept through `set_teq`, in microseconds.
pub const TEQ_MIN_MICROS: u64 = 1;

/// Floor on a component's time resolution, in microseconds.
pub const MIN_TIME_RES_MICROS: u64 = 1;

/// Divisor applied to the fastest edge's equilibration time when deriving a
/// component's time resolution (`_set_time_res` in the original engine).
pub const DEFAULT_RESOLUTION_SCALE: f64 = 10.0;

/// Time resolution assigned to a component with no numeric (non-open,
/// non-closed) edges at all.
pub const DEFAULT_TIME_RESOLUTION_MICROS: u64 = 100_000;

/// Converts fractional seconds to whole microseconds, saturating instead of
/// overflowing or panicking on out-of-range or non-finite input.
pub fn s_to_micros(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    let micros = seconds * 1_000_000.0;
    if micros >= u64::MAX as f64 {
        u64::MAX
    } else {
        micros.round() as u64
    }
}

/// Converts whole microseconds back to fractional seconds.
pub fn micros_to_s(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

/// Converts an equilibration time (microseconds) to a flow coefficient.
///
/// Unclamped: a `teq` of zero is an instantaneous valve and yields
/// `f64::INFINITY`, which [`crate::numeric::ensure_finite`] will reject
/// downstream. A `teq` below [`TEQ_MIN_MICROS`] yields an `FC` above
/// [`FC_MAX`], which component validation rejects rather than this function
/// silently papering over.
pub fn teq_to_fc(teq_micros: u64) -> f64 {
    if teq_micros == 0 {
        return f64::INFINITY;
    }
    1_000_000.0 / teq_micros as f64
}

/// Converts a flow coefficient back to an equilibration time (microseconds),
/// saturating at `u64::MAX` for a closed (`FC <= 0`) edge.
pub fn fc_to_teq(fc: f64) -> u64 {
    if !fc.is_finite() || fc <= 0.0 {
        return u64::MAX;
    }
    let teq = 1_000_000.0 / fc;
    if teq >= u64::MAX as f64 {
        u64::MAX
    } else {
        teq.round() as u64
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_within_tolerance() {
        let fc = teq_to_fc(2_000);
        let back = fc_to_teq(fc);
        assert_eq!(back, 2_000);
    }

    #[test]
    fn teq_below_minimum_exceeds_fc_max() {
        assert!(teq_to_fc(TEQ_MIN_MICROS) <= FC_MAX);
        assert!(teq_to_fc(1) > FC_MAX / 2.0);
    }

    #[test]
    fn zero_teq_is_non_finite() {
        assert!(teq_to_fc(0).is_infinite());
    }

    #[test]
    fn closed_fc_saturates_teq() {
        assert_eq!(fc_to_teq(0.0), u64::MAX);
        assert_eq!(fc_to_teq(-1.0), u64::MAX);
    }

    #[test]
    fn s_to_micros_basic() {
        assert_eq!(s_to_micros(0.001), 1_000);
        assert_eq!(s_to_micros(0.0), 0);
        assert_eq!(s_to_micros(f64::NAN), 0);
    }
}
