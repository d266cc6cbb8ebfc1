//! The fixed-size point cloud and its generation rules

use glam::Vec3;
use rand::Rng;

use crate::constants::*;
use crate::point::Point;
use crate::theme::Theme;

/// Parameters controlling field generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    /// Viewport width (logical px) below which the compact count is used
    pub compact_breakpoint: f32,
    pub compact_point_count: usize,
    pub full_point_count: usize,
    /// Positions are sampled per component from [-extent, extent)
    pub position_extent: f32,
    /// Sizes are sampled from [min_size, max_size)
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            compact_breakpoint: COMPACT_BREAKPOINT,
            compact_point_count: COMPACT_POINT_COUNT,
            full_point_count: FULL_POINT_COUNT,
            position_extent: POSITION_EXTENT,
            min_size: MIN_POINT_SIZE,
            max_size: MAX_POINT_SIZE,
        }
    }
}

impl FieldParams {
    pub fn point_count(&self, viewport_width: f32) -> usize {
        if viewport_width < self.compact_breakpoint {
            self.compact_point_count
        } else {
            self.full_point_count
        }
    }
}

/// A point cloud generated once per initialization.
///
/// Count, positions and sizes never change after [`ParticleField::generate`];
/// only colors are rewritten, by [`ParticleField::recolor`].
#[derive(Clone, Debug)]
pub struct ParticleField {
    points: Vec<Point>,
    theme: Theme,
    colors_dirty: bool,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(
        viewport_width: f32,
        theme: Theme,
        params: &FieldParams,
        rng: &mut R,
    ) -> Self {
        let count = params.point_count(viewport_width);
        let extent = params.position_extent;
        let palette = theme.palette();

        let points = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                );
                let color = palette.sample(rng);
                let size = rng.random_range(params.min_size..params.max_size);
                Point::new(position, size, color)
            })
            .collect();

        log::info!(
            "✓ Generated {} points ({} theme, viewport width {:.0})",
            count,
            theme,
            viewport_width
        );

        Self {
            points,
            theme,
            // Fresh fields still need their first upload
            colors_dirty: true,
        }
    }

    /// Re-sample every point's color for `theme` and mark colors for upload.
    pub fn recolor<R: Rng + ?Sized>(&mut self, theme: Theme, rng: &mut R) {
        let palette = theme.palette();
        for point in &mut self.points {
            point.color = palette.sample(rng);
        }
        self.theme = theme;
        self.colors_dirty = true;
        log::debug!("Recolored {} points for {} theme", self.points.len(), theme);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Called once the current colors have reached the GPU
    pub fn mark_uploaded(&mut self) {
        self.colors_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(width: f32, theme: Theme, seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::generate(width, theme, &FieldParams::default(), &mut rng)
    }

    #[test]
    fn test_count_follows_breakpoint() {
        assert_eq!(field(1024.0, Theme::Dark, 1).len(), 100);
        assert_eq!(field(768.0, Theme::Dark, 1).len(), 100);
        assert_eq!(field(767.9, Theme::Dark, 1).len(), 50);
        assert_eq!(field(375.0, Theme::Light, 1).len(), 50);
    }

    #[test]
    fn test_positions_and_sizes_in_range() {
        for seed in 0..8 {
            let f = field(1920.0, Theme::Dark, seed);
            for p in f.points() {
                for c in p.position {
                    assert!((-5.0..5.0).contains(&c), "component {c} out of range");
                }
                assert!((1.0..4.0).contains(&p.size), "size {} out of range", p.size);
            }
        }
    }

    #[test]
    fn test_initial_colors_follow_theme() {
        let light = field(1024.0, Theme::Light, 3);
        assert!(light.points().iter().all(|p| Palette::LIGHT.contains(p.color)));

        let dark = field(1024.0, Theme::Dark, 3);
        assert!(dark.points().iter().all(|p| p.color[2] == 0.9));
    }

    #[test]
    fn test_recolor_keeps_geometry() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut f = ParticleField::generate(1024.0, Theme::Dark, &FieldParams::default(), &mut rng);
        let before: Vec<_> = f.points().iter().map(|p| (p.position, p.size)).collect();

        f.recolor(Theme::Light, &mut rng);
        f.recolor(Theme::Dark, &mut rng);

        let after: Vec<_> = f.points().iter().map(|p| (p.position, p.size)).collect();
        assert_eq!(before, after);
        assert_eq!(f.theme(), Theme::Dark);
    }

    #[test]
    fn test_recolor_rerandomizes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut f = ParticleField::generate(1024.0, Theme::Light, &FieldParams::default(), &mut rng);
        let first: Vec<_> = f.points().iter().map(|p| p.color).collect();

        f.recolor(Theme::Dark, &mut rng);
        f.recolor(Theme::Light, &mut rng);

        let second: Vec<_> = f.points().iter().map(|p| p.color).collect();
        assert_ne!(first, second);
        assert!(f.points().iter().all(|p| Palette::LIGHT.contains(p.color)));
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut f = ParticleField::generate(500.0, Theme::Dark, &FieldParams::default(), &mut rng);
        assert!(f.colors_dirty());

        f.mark_uploaded();
        assert!(!f.colors_dirty());

        f.recolor(Theme::Light, &mut rng);
        assert!(f.colors_dirty());
    }

    #[test]
    fn test_custom_params() {
        let params = FieldParams {
            compact_point_count: 3,
            full_point_count: 7,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ParticleField::generate(100.0, Theme::Dark, &params, &mut rng).len(), 3);
        assert_eq!(ParticleField::generate(2000.0, Theme::Dark, &params, &mut rng).len(), 7);
    }
}
