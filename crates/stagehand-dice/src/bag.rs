//! The dice bag: integer throws, chance rolls, bell curves and random strings.

use stagehand_core::error::DomainError;
use stagehand_core::rng::DeterministicRng;
use tracing::warn;

use crate::chance::WinChance;

/// Default alphabet for [`DiceBag::random_string`]: digits, lowercase, uppercase.
pub const ALPHANUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper bound on rejection-sampling rounds in [`DiceBag::bell`]. Only a
/// degenerate generator (e.g. one that always yields `0.0`) ever reaches it.
const MAX_BELL_ATTEMPTS: u32 = 10_000;

/// Largest supported `precision` for [`DiceBag::chance`]; `10^(18 + 2)` no
/// longer fits in an `i64`.
const MAX_CHANCE_PRECISION: i32 = 16;

/// A seedable source of game randomness.
///
/// The bag never draws from anywhere but the wrapped generator, so its output
/// is a pure function of the generator's state and the call sequence.
pub struct DiceBag<'r> {
    rng: &'r mut dyn DeterministicRng,
}

impl std::fmt::Debug for DiceBag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceBag").finish_non_exhaustive()
    }
}

impl<'r> DiceBag<'r> {
    /// Wraps a generator.
    pub fn new(rng: &'r mut dyn DeterministicRng) -> Self {
        Self { rng }
    }

    /// Sum of `times` independent uniform draws from `[min, max]`.
    ///
    /// The bounds are swapped if `min > max`. When `min == max` the result is
    /// `min * times` and no randomness is consumed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `times < 1` or the sum
    /// overflows an `i64`.
    pub fn throw(&mut self, max: i64, min: i64, times: i64) -> Result<i64, DomainError> {
        if times < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "times must be at least 1, got {times}"
            )));
        }

        let (low, high) = if min > max { (max, min) } else { (min, max) };
        if low == high {
            return low
                .checked_mul(times)
                .ok_or_else(|| DomainError::InvalidArgument("throw overflowed".to_owned()));
        }

        let mut total: i64 = 0;
        for _ in 0..times {
            let draw = self.rng.next_i64_range(low, high);
            total = total
                .checked_add(draw)
                .ok_or_else(|| DomainError::InvalidArgument("throw overflowed".to_owned()))?;
        }
        Ok(total)
    }

    /// Returns `true` with probability `win_chance`.
    ///
    /// A uniform integer is drawn over `10^(precision + 2)` buckets and the
    /// roll wins when `draw / scale < win_chance`. A chance of `1` (or
    /// `100` percent) or more always wins and a negative chance always loses,
    /// both without consuming randomness.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `precision` is negative or too
    /// large to scale.
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn chance(
        &mut self,
        win_chance: impl Into<WinChance>,
        precision: i32,
    ) -> Result<bool, DomainError> {
        if precision < 0 {
            return Err(DomainError::InvalidArgument(format!(
                "precision must not be negative, got {precision}"
            )));
        }
        if precision > MAX_CHANCE_PRECISION {
            return Err(DomainError::InvalidArgument(format!(
                "precision must be at most {MAX_CHANCE_PRECISION}, got {precision}"
            )));
        }

        let win_chance = win_chance.into().as_fraction();
        if win_chance >= 1.0 {
            return Ok(true);
        }
        if win_chance < 0.0 {
            return Ok(false);
        }

        let scale = 10_i64.pow(precision as u32 + 2);
        let draw = self.rng.next_i64_range(0, scale - 1);
        Ok((draw as f64) / (scale as f64) < win_chance)
    }

    /// Uniform integer jitter: a draw over the 1000× scaled range, divided
    /// back down and rounded. Despite the name the distribution is flat.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if scaling the bounds overflows.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn pseudo_bell(&mut self, min: i64, max: i64) -> Result<i64, DomainError> {
        let scaled_min = min
            .checked_mul(1000)
            .ok_or_else(|| DomainError::InvalidArgument(format!("min {min} out of range")))?;
        let scaled_max = max
            .checked_mul(1000)
            .ok_or_else(|| DomainError::InvalidArgument(format!("max {max} out of range")))?;
        let draw = self.throw(scaled_max, scaled_min, 1)?;
        Ok((draw as f64 / 1000.0).round() as i64)
    }

    /// A Gaussian sample centred on the midpoint of `[min, max]`.
    ///
    /// Standard normals come from the Marsaglia polar method; each is scaled
    /// so the interval spans six standard deviations, and samples outside the
    /// interval are rejected and redrawn.
    pub fn bell(&mut self, min: f64, max: f64) -> f64 {
        let (low, high) = if min > max { (max, min) } else { (min, max) };
        let mean = (low + high) / 2.0;
        if (high - low).abs() < f64::EPSILON {
            return mean;
        }
        let deviation = (high - low) / 6.0;

        for _ in 0..MAX_BELL_ATTEMPTS {
            let Some(z) = self.polar_normal() else {
                continue;
            };
            let sample = mean + z * deviation;
            if (low..=high).contains(&sample) {
                return sample;
            }
        }

        warn!(min = low, max = high, "bell sampling exhausted, using midpoint");
        mean
    }

    /// One Marsaglia polar round. `None` when the pair falls outside the unit
    /// circle (or on its centre) and must be redrawn.
    fn polar_normal(&mut self) -> Option<f64> {
        let u = 2.0 * self.rng.next_f64() - 1.0;
        let v = 2.0 * self.rng.next_f64() - 1.0;
        let s = u * u + v * v;
        if s <= 0.0 || s >= 1.0 {
            return None;
        }
        Some(u * (-2.0 * s.ln() / s).sqrt())
    }

    /// `length` characters drawn uniformly from [`ALPHANUMERIC`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `length` is zero.
    pub fn random_string(&mut self, length: usize) -> Result<String, DomainError> {
        self.random_string_from(length, ALPHANUMERIC)
    }

    /// `length` characters drawn uniformly from `alphabet`, in draw order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `length` is zero or
    /// `alphabet` is empty.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn random_string_from(
        &mut self,
        length: usize,
        alphabet: &str,
    ) -> Result<String, DomainError> {
        if length == 0 {
            return Err(DomainError::InvalidArgument(
                "random string length must be positive".to_owned(),
            ));
        }
        let symbols: Vec<char> = alphabet.chars().collect();
        if symbols.is_empty() {
            return Err(DomainError::InvalidArgument(
                "random string alphabet must not be empty".to_owned(),
            ));
        }

        let last = symbols.len() as i64 - 1;
        let mut out = String::with_capacity(length);
        for _ in 0..length {
            let index = self.throw(last, 0, 1)?;
            out.push(symbols[index as usize]);
        }
        Ok(out)
    }
}
