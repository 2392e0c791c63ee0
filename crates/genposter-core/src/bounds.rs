//! Bounded integer parameters exposed as sliders in the user interface.

use crate::error::RangeError;

macro_rules! bounded {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, min = $min:literal, max = $max:literal,
        step = $step:literal, default = $default:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const MIN: u32 = $min;
            pub const MAX: u32 = $max;
            pub const STEP: u32 = $step;

            /// Validate `value` against the parameter's bounds.
            pub fn new(value: u32) -> Result<Self, RangeError> {
                if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(RangeError {
                        name: $label,
                        value,
                        min: Self::MIN,
                        max: Self::MAX,
                    })
                }
            }

            pub const fn get(self) -> u32 {
                self.0
            }

            /// One slider step up, saturating at the maximum.
            pub fn increment(self) -> Self {
                Self(self.0.saturating_add(Self::STEP).min(Self::MAX))
            }

            /// One slider step down, saturating at the minimum.
            pub fn decrement(self) -> Self {
                Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = RangeError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.0
            }
        }
    };
}

bounded!(
    /// Number of blob layers on a poster.
    LayerCount, "layer count", min = 5, max = 30, step = 1, default = 10
);

bounded!(
    /// Total number of frames in the exported animation.
    FrameCount, "frame count", min = 10, max = 200, step = 5, default = 75
);

bounded!(
    /// Playback rate of the exported animation in frames per second.
    Fps, "fps", min = 10, max = 30, step = 1, default = 20
);

impl FrameCount {
    /// Playback length in seconds at the given rate.
    pub fn duration_secs(self, fps: Fps) -> f64 {
        self.get() as f64 / fps.get() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_within_bounds() {
        assert_eq!(LayerCount::default().get(), 10);
        assert_eq!(FrameCount::default().get(), 75);
        assert_eq!(Fps::default().get(), 20);
        assert!(LayerCount::new(LayerCount::default().get()).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = LayerCount::new(31).unwrap_err();
        assert_eq!(
            err,
            RangeError {
                name: "layer count",
                value: 31,
                min: 5,
                max: 30
            }
        );
        assert_eq!(err.to_string(), "layer count must be between 5 and 30, got 31");
        assert!(FrameCount::new(9).is_err());
        assert!(Fps::try_from(0).is_err());
    }

    #[test]
    fn test_stepping_saturates() {
        let frames = FrameCount::new(195).unwrap();
        assert_eq!(frames.increment().get(), 200);
        assert_eq!(frames.increment().increment().get(), 200);

        let layers = LayerCount::new(5).unwrap();
        assert_eq!(layers.decrement().get(), 5);
        assert_eq!(layers.increment().get(), 6);

        let frames = FrameCount::new(12).unwrap();
        assert_eq!(frames.decrement().get(), 10);
    }

    #[test]
    fn test_duration() {
        let frames = FrameCount::new(75).unwrap();
        let fps = Fps::new(20).unwrap();
        assert!((frames.duration_secs(fps) - 3.75).abs() < f64::EPSILON);
    }
}
