//! Light/dark themes and the color ranges points are sampled from

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Page color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette::LIGHT,
            Theme::Dark => Palette::DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}` (expected `light` or `dark`)")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// How a single color channel is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Channel {
    /// Always this value
    Fixed(f32),
    /// Uniform in [min, max)
    Uniform { min: f32, max: f32 },
}

impl Channel {
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        match self {
            Channel::Fixed(value) => value,
            Channel::Uniform { min, max } => rng.random_range(min..max),
        }
    }

    /// Whether `value` could have been produced by [`Channel::sample`]
    pub fn contains(self, value: f32) -> bool {
        match self {
            Channel::Fixed(fixed) => value == fixed,
            Channel::Uniform { min, max } => value >= min && value < max,
        }
    }
}

/// Per-channel ranges for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
}

impl Palette {
    /// Bright, blue-leaning points for dark backgrounds
    pub const DARK: Palette = Palette {
        red: Channel::Uniform { min: 0.4, max: 1.0 },
        green: Channel::Uniform { min: 0.5, max: 1.0 },
        blue: Channel::Fixed(0.9),
    };

    /// Darker points for light backgrounds
    pub const LIGHT: Palette = Palette {
        red: Channel::Uniform { min: 0.2, max: 0.6 },
        green: Channel::Uniform { min: 0.3, max: 0.7 },
        blue: Channel::Uniform { min: 0.6, max: 1.0 },
    };

    /// Draw a fresh color; every channel is sampled independently
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 3] {
        [
            self.red.sample(rng),
            self.green.sample(rng),
            self.blue.sample(rng),
        ]
    }

    pub fn contains(&self, color: [f32; 3]) -> bool {
        self.red.contains(color[0]) && self.green.contains(color[1]) && self.blue.contains(color[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(" dark\n".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.to_string().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn test_dark_blue_is_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = Palette::DARK.sample(&mut rng);
            assert_eq!(c[2], 0.9);
            assert!(Palette::DARK.contains(c));
        }
    }

    #[test]
    fn test_light_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let c = Palette::LIGHT.sample(&mut rng);
            assert!((0.2..0.6).contains(&c[0]));
            assert!((0.3..0.7).contains(&c[1]));
            assert!((0.6..1.0).contains(&c[2]));
        }
    }

    #[test]
    fn test_uniform_upper_bound_excluded() {
        let channel = Channel::Uniform { min: 0.2, max: 0.6 };
        assert!(channel.contains(0.2));
        assert!(!channel.contains(0.6));
    }
}
