//! CPU mirrors of the wave displacement and color-mix math in `water.wgsl`.
//!
//! The shader is the authority at runtime; these functions exist for the
//! panel's live elevation readout and for testing the displacement math
//! without a GPU. Keep them in lockstep with the WGSL.

use crate::params::WaterParams;

/// Vertical displacement of the surface at (x, z) for elapsed time `time_s`.
///
/// Sum of a large-scale wave term (product of two phase-shifted sines) and a
/// small-scale term of sinusoidal octaves, each octave at `i` times the base
/// frequency and attenuated by `1 / i`. With zero iterations the small-scale
/// term vanishes.
pub fn elevation(x: f32, z: f32, time_s: f32, params: &WaterParams) -> f32 {
    let t_big = time_s * params.big_wave_speed;
    let mut elevation = (x * params.big_wave_frequency[0] + t_big).sin()
        * (z * params.big_wave_frequency[1] + t_big).sin()
        * params.big_wave_amplitude;

    let t_small = time_s * params.small_wave_speed;
    for i in 1..=params.small_wave_iterations {
        let freq = params.small_wave_frequency * i as f32;
        elevation -= ((x * freq + t_small).sin() * (z * freq + t_small).sin()).abs()
            * params.small_wave_amplitude
            / i as f32;
    }

    elevation
}

/// Interpolation weight between the depth and surface colors:
/// `clamp((elevation + offset) * multiplier, 0, 1)`
pub fn mix_factor(elevation: f32, offset: f32, multiplier: f32) -> f32 {
    ((elevation + offset) * multiplier).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_deterministic() {
        let params = WaterParams::default();
        let a = elevation(0.3, -0.7, 12.5, &params);
        let b = elevation(0.3, -0.7, 12.5, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_elevation_continuous_in_time() {
        // Sample a fine time grid and bound the per-step change; sinusoidal
        // octaves must not jump, including across the abs() folds.
        let params = WaterParams::default();
        let dt = 1e-4;
        let mut prev = elevation(0.42, 0.17, 0.0, &params);
        for step in 1..20_000 {
            let t = step as f32 * dt;
            let next = elevation(0.42, 0.17, t, &params);
            // Generous Lipschitz-style bound: total phase velocity times dt
            assert!(
                (next - prev).abs() < 0.05,
                "elevation jumped by {} at t={}",
                (next - prev).abs(),
                t
            );
            prev = next;
        }
    }

    #[test]
    fn test_zero_iterations_is_big_wave_only() {
        let mut params = WaterParams::default();
        params.small_wave_iterations = 0;

        for (x, z, t) in [(0.0, 0.0, 0.0), (0.5, -0.5, 3.0), (-1.0, 1.0, 100.0)] {
            let t_big = t * params.big_wave_speed;
            let expected = (x * params.big_wave_frequency[0] + t_big).sin()
                * (z * params.big_wave_frequency[1] + t_big).sin()
                * params.big_wave_amplitude;
            assert_eq!(elevation(x, z, t, &params), expected);
        }
    }

    #[test]
    fn test_small_waves_only_lower_the_surface() {
        // Each octave is subtracted as an absolute value, so adding
        // iterations can only pull the surface down.
        let mut params = WaterParams::default();
        params.small_wave_iterations = 0;
        let base = elevation(0.25, 0.75, 2.0, &params);
        params.small_wave_iterations = 5;
        assert!(elevation(0.25, 0.75, 2.0, &params) <= base);
    }

    #[test]
    fn test_mix_factor_clamped() {
        assert_eq!(mix_factor(10.0, 0.0, 1.0), 1.0);
        assert_eq!(mix_factor(-10.0, 0.0, 1.0), 0.0);
        assert_eq!(mix_factor(0.1, 0.08, 3.5), (0.1 + 0.08) * 3.5);

        // Extreme multiplier saturates, no NaN or overflow artifacts
        let extreme = mix_factor(0.5, 0.5, 1000.0);
        assert_eq!(extreme, 1.0);
        assert!(mix_factor(-0.5, 0.0, 1000.0) == 0.0);
        assert!(mix_factor(f32::MAX, 1.0, f32::MAX).is_finite());
    }

    #[test]
    fn test_elevation_bounded_by_amplitudes() {
        let params = WaterParams::default();
        let max_small: f32 = (1..=params.small_wave_iterations)
            .map(|i| params.small_wave_amplitude / i as f32)
            .sum();
        let bound = params.big_wave_amplitude + max_small;

        for step in 0..1000 {
            let t = step as f32 * 0.1;
            let e = elevation(0.9, -0.3, t, &params);
            assert!(e.abs() <= bound + 1e-6);
        }
    }
}
