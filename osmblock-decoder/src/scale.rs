//! Coordinate and timestamp scaling for data blocks.

use chrono::{DateTime, Utc};

use crate::block::PrimitiveBlock;
use crate::error::Violation;

/// Nanodegrees per coordinate unit when a block omits `granularity`.
pub const DEFAULT_GRANULARITY: i32 = 100;

/// Milliseconds per timestamp unit when a block omits `date_granularity`.
pub const DEFAULT_DATE_GRANULARITY: i32 = 1000;

const NANO: f64 = 1.0e-9;

/// Fixed-point parameters of one data block.
///
/// # Examples
/// ```
/// use osmblock_decoder::BlockScale;
///
/// let scale = BlockScale::default();
/// assert!((scale.lat(525_000_000) - 52.5).abs() < 1.0e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockScale {
    /// Nanodegrees per coordinate unit.
    pub granularity: i32,
    /// Latitude offset in nanodegrees.
    pub lat_offset: i64,
    /// Longitude offset in nanodegrees.
    pub lon_offset: i64,
    /// Milliseconds per timestamp unit.
    pub date_granularity: i32,
}

impl Default for BlockScale {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
            lat_offset: 0,
            lon_offset: 0,
            date_granularity: DEFAULT_DATE_GRANULARITY,
        }
    }
}

impl BlockScale {
    /// Read the scale parameters of a block, applying defaults for absent
    /// fields.
    #[must_use]
    pub fn from_block(block: &PrimitiveBlock) -> Self {
        let defaults = Self::default();
        Self {
            granularity: block.granularity.unwrap_or(defaults.granularity),
            lat_offset: block.lat_offset.unwrap_or(defaults.lat_offset),
            lon_offset: block.lon_offset.unwrap_or(defaults.lon_offset),
            date_granularity: block.date_granularity.unwrap_or(defaults.date_granularity),
        }
    }

    /// Latitude in degrees for a raw coordinate.
    #[must_use]
    pub fn lat(&self, raw: i64) -> f64 {
        self.degrees(self.lat_offset, raw)
    }

    /// Longitude in degrees for a raw coordinate.
    #[must_use]
    pub fn lon(&self, raw: i64) -> f64 {
        self.degrees(self.lon_offset, raw)
    }

    /// UTC instant for a raw timestamp.
    ///
    /// # Errors
    /// Returns [`Violation::TimestampOutOfRange`] when the scaled value
    /// overflows or falls outside chrono's range.
    pub fn timestamp(&self, raw: i64) -> Result<DateTime<Utc>, Violation> {
        raw.checked_mul(i64::from(self.date_granularity))
            .and_then(DateTime::from_timestamp_millis)
            .ok_or(Violation::TimestampOutOfRange {
                raw,
                granularity: self.date_granularity,
            })
    }

    // i128 keeps `offset + granularity * raw` exact before the final scaling.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "fixed-point coordinates are converted to floating degrees"
    )]
    fn degrees(&self, offset: i64, raw: i64) -> f64 {
        let nanodegrees = i128::from(offset) + i128::from(self.granularity) * i128::from(raw);
        nanodegrees as f64 * NANO
    }
}
