use std::time::Duration;

use super::defaults;
use crate::error::SettingsError;

/// What happens to the plane orientation when a new volume is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Orientation returns to identity
    Reset,
    /// Plane keeps its pose across volumes
    Preserve,
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub plane_delay: Duration,
    pub histogram_delay: Duration,
    /// Radians per unit of rotation slider
    pub angle_scale: f32,
    pub histogram_bins: usize,
    pub reset_policy: ResetPolicy,
}

impl EditorSettings {
    pub fn builder() -> EditorSettingsBuilder {
        EditorSettingsBuilder::default()
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            plane_delay: defaults::PLANE_DELAY,
            histogram_delay: defaults::HISTOGRAM_DELAY,
            angle_scale: defaults::ANGLE_SCALE,
            histogram_bins: defaults::HISTOGRAM_BINS,
            reset_policy: defaults::RESET_POLICY,
        }
    }
}

/// Builder of [`EditorSettings`], unset fields use [`defaults`]
#[derive(Debug, Default)]
pub struct EditorSettingsBuilder {
    plane_delay: Option<Duration>,
    histogram_delay: Option<Duration>,
    angle_scale: Option<f32>,
    histogram_bins: Option<usize>,
    reset_policy: Option<ResetPolicy>,
}

impl EditorSettingsBuilder {
    pub fn plane_delay(mut self, delay: Duration) -> Self {
        self.plane_delay = Some(delay);
        self
    }

    pub fn histogram_delay(mut self, delay: Duration) -> Self {
        self.histogram_delay = Some(delay);
        self
    }

    pub fn angle_scale(mut self, scale: f32) -> Self {
        self.angle_scale = Some(scale);
        self
    }

    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    pub fn reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = Some(policy);
        self
    }

    /// Build without validation
    pub fn build_unchecked(self) -> EditorSettings {
        let default = EditorSettings::default();
        EditorSettings {
            plane_delay: self.plane_delay.unwrap_or(default.plane_delay),
            histogram_delay: self.histogram_delay.unwrap_or(default.histogram_delay),
            angle_scale: self.angle_scale.unwrap_or(default.angle_scale),
            histogram_bins: self.histogram_bins.unwrap_or(default.histogram_bins),
            reset_policy: self.reset_policy.unwrap_or(default.reset_policy),
        }
    }

    pub fn build(self) -> Result<EditorSettings, SettingsError> {
        let settings = self.build_unchecked();
        if settings.histogram_bins == 0 {
            return Err(SettingsError::NoBins);
        }
        if !settings.angle_scale.is_finite() || settings.angle_scale == 0.0 {
            return Err(SettingsError::AngleScale);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let settings = EditorSettings::builder()
            .histogram_delay(Duration::from_millis(5))
            .build()
            .unwrap();

        assert_eq!(settings.histogram_delay, Duration::from_millis(5));
        assert_eq!(settings.plane_delay, defaults::PLANE_DELAY);
        assert_eq!(settings.reset_policy, ResetPolicy::Reset);
    }

    #[test]
    fn builder_validates() {
        let res = EditorSettings::builder().histogram_bins(0).build();
        assert_eq!(res, Err(SettingsError::NoBins));

        let res = EditorSettings::builder().angle_scale(f32::NAN).build();
        assert_eq!(res, Err(SettingsError::AngleScale));
    }
}
