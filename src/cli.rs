//! Command line options

use std::path::PathBuf;

use clap::Parser;
use particle_field::Theme;

#[derive(Parser, Debug)]
#[command(version, about = "Animated point-cloud backdrop")]
pub struct Args {
    /// Start in this theme, overriding saved and system preferences
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Seed for a reproducible field
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Where the chosen theme is remembered between runs
    #[arg(long)]
    pub theme_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["portfolio-backdrop"]);
        assert_eq!(args.theme, None);
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.height, 800.0);
        assert!(args.theme_file.is_none());
    }

    #[test]
    fn test_theme_and_seed() {
        let args = Args::parse_from(["portfolio-backdrop", "--theme", "light", "--seed", "7"]);
        assert_eq!(args.theme, Some(Theme::Light));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Args::try_parse_from(["portfolio-backdrop", "--theme", "sepia"]).is_err());
    }
}
