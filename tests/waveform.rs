mod tests {
    use myrtio_breath::waveform::{circular, gaussian, phase, triangular};
    use myrtio_breath::{PingPong, Wave};

    const STEPPING: [Wave; 3] = [Wave::Triangular, Wave::Circular, Wave::Gaussian];

    #[test]
    fn test_brightness_stays_normalized() {
        for resolution in [1_u16, 7, 750, 1250] {
            let r = i32::from(resolution);
            for wave in STEPPING {
                for step in -r..=r {
                    let value = wave.brightness(step, resolution, 0.5, 0.15).unwrap();
                    assert!(
                        (0.0..=1.0).contains(&value),
                        "{:?} at {}/{} gave {}",
                        wave,
                        step,
                        resolution,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn test_gaussian_peak_and_tails() {
        let peak = Wave::Gaussian.brightness(375, 750, 0.5, 0.01).unwrap();
        assert_eq!(peak, 1.0);

        let start = Wave::Gaussian.brightness(0, 750, 0.5, 0.01).unwrap();
        let end = Wave::Gaussian.brightness(750, 750, 0.5, 0.01).unwrap();
        assert!(start < 1e-6);
        assert!(end < 1e-6);
    }

    #[test]
    fn test_gaussian_width() {
        let narrow = gaussian(0.4, 0.5, 0.01);
        let wide = gaussian(0.4, 0.5, 0.15);
        assert!(narrow < wide);
        assert!(wide > 0.7);
    }

    #[test]
    fn test_circular_edges_and_midpoint() {
        assert_eq!(Wave::Circular.brightness(0, 750, 0.0, 0.0), Some(0.0));
        assert_eq!(Wave::Circular.brightness(375, 750, 0.0, 0.0), Some(1.0));
        assert_eq!(circular(1.0), 0.0);
    }

    #[test]
    fn test_triangular_ramp() {
        assert_eq!(triangular(0.0), 0.0);
        assert_eq!(triangular(0.25), 0.5);
        assert_eq!(triangular(0.5), 1.0);
        assert_eq!(triangular(0.75), 0.5);
        assert_eq!(triangular(1.0), 0.0);
    }

    #[test]
    fn test_negative_steps_mirror_positive_steps() {
        for wave in STEPPING {
            for step in [1, 100, 374, 600] {
                assert_eq!(
                    wave.brightness(step, 750, 0.3, 0.2),
                    wave.brightness(-step, 750, 0.3, 0.2)
                );
            }
        }
    }

    #[test]
    fn test_phase() {
        assert_eq!(phase(0, 750), 0.0);
        assert_eq!(phase(375, 750), 0.5);
        assert_eq!(phase(-750, 750), 1.0);
        assert_eq!(phase(10, 0), 0.0);
    }

    #[test]
    fn test_non_stepping_waves_have_no_samples() {
        assert_eq!(Wave::Hold.brightness(10, 750, 0.5, 0.1), None);
        assert_eq!(Wave::Stop.brightness(10, 750, 0.5, 0.1), None);
        assert!(!Wave::Hold.is_stepping());
        assert!(!Wave::Stop.is_stepping());
    }

    #[test]
    fn test_ping_pong_is_bounded_oscillation() {
        let resolution = 5;
        let mut counter = PingPong::new(resolution);
        assert_eq!(counter.step(), 0);

        let mut previous = counter.step();
        for _ in 0..100 {
            counter.advance();
            let step = counter.step();
            assert!(step.abs() <= i32::from(resolution));
            if step.signum() == -previous.signum() && previous != 0 {
                assert_eq!(previous, i32::from(resolution) - 1);
                assert_eq!(step, -i32::from(resolution));
            }
            previous = step;
        }
    }

    #[test]
    fn test_ping_pong_sequence() {
        let mut counter = PingPong::new(3);
        let mut steps = Vec::new();
        for _ in 0..8 {
            steps.push(counter.step());
            counter.advance();
        }
        assert_eq!(steps, [0, 1, 2, -3, -2, -1, 0, 1]);
    }

    #[test]
    fn test_ping_pong_resolution_change_clamps_step() {
        let mut counter = PingPong::new(750);
        for _ in 0..600 {
            counter.advance();
        }
        counter.set_resolution(100);
        assert_eq!(counter.step(), 100);
        assert_eq!(counter.resolution(), 100);

        counter.advance();
        assert_eq!(counter.step(), -100);
    }

    #[test]
    fn test_wave_from_raw() {
        assert_eq!(Wave::from_raw(0), Some(Wave::Triangular));
        assert_eq!(Wave::from_raw(2), Some(Wave::Gaussian));
        assert_eq!(Wave::from_raw(4), Some(Wave::Stop));
        assert_eq!(Wave::from_raw(5), None);
        assert_eq!(Wave::Hold.as_raw(), 3);
    }

    #[test]
    fn test_wave_names() {
        assert_eq!(Wave::parse_from_str("circular"), Some(Wave::Circular));
        assert_eq!(Wave::parse_from_str("hold"), Some(Wave::Hold));
        assert_eq!(Wave::parse_from_str("sawtooth"), None);
        assert_eq!(Wave::Gaussian.as_str(), "gaussian");
        assert_eq!(Wave::default(), Wave::Triangular);
    }
}
