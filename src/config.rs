/// Layout configuration for the Day/Week time axis.

use crate::error::CalendarError;

pub const DEFAULT_VISIBLE_START_HOUR: u32 = 8;
pub const DEFAULT_VISIBLE_END_HOUR: u32 = 19;

/// Height floor that keeps very short appointments clickable.
pub const MIN_VISIBLE_MINUTES: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarConfig {
    pub visible_start_hour: u32,
    pub visible_end_hour: u32,
    pub min_visible_minutes: i64,
    pub pixels_per_minute: f32,
}

impl CalendarConfig {
    /// Create a configuration with validation.
    pub fn new(
        visible_start_hour: u32,
        visible_end_hour: u32,
        min_visible_minutes: i64,
        pixels_per_minute: f32,
    ) -> Result<Self, CalendarError> {
        if visible_start_hour >= visible_end_hour || visible_end_hour > 24 {
            return Err(CalendarError::InvalidWindow {
                start: visible_start_hour,
                end: visible_end_hour,
            });
        }
        if min_visible_minutes <= 0 {
            return Err(CalendarError::InvalidMinimumHeight(min_visible_minutes));
        }
        if !pixels_per_minute.is_finite() || pixels_per_minute <= 0.0 {
            return Err(CalendarError::InvalidScale(pixels_per_minute));
        }

        Ok(CalendarConfig {
            visible_start_hour,
            visible_end_hour,
            min_visible_minutes,
            pixels_per_minute,
        })
    }

    /// Same as the defaults but with a different visible-hours window.
    pub fn with_window(start_hour: u32, end_hour: u32) -> Result<Self, CalendarError> {
        let defaults = CalendarConfig::default();
        CalendarConfig::new(
            start_hour,
            end_hour,
            defaults.min_visible_minutes,
            defaults.pixels_per_minute,
        )
    }

    /// Height of the scrollable time axis in minutes.
    pub fn visible_height_minutes(&self) -> i64 {
        (self.visible_end_hour as i64 - self.visible_start_hour as i64) * 60
    }

    pub fn visible_start_minutes(&self) -> i64 {
        self.visible_start_hour as i64 * 60
    }

    pub fn visible_end_minutes(&self) -> i64 {
        self.visible_end_hour as i64 * 60
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            visible_start_hour: DEFAULT_VISIBLE_START_HOUR,
            visible_end_hour: DEFAULT_VISIBLE_END_HOUR,
            min_visible_minutes: MIN_VISIBLE_MINUTES,
            pixels_per_minute: 1.0,
        }
    }
}
