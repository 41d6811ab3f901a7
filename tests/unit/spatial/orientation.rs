//! Tests for the twelve-state orientation group

#[cfg(test)]
mod tests {
    use hextile::spatial::Orientation;
    use std::f32::consts::FRAC_PI_3;

    // Tests parts round-trip through construction
    // Verified by ignoring the flip flag in from_parts
    #[test]
    fn test_from_parts() {
        assert_eq!(Orientation::from_parts(0, false), Orientation::Upright0);
        assert_eq!(Orientation::from_parts(7, false), Orientation::Upright60);
        assert_eq!(Orientation::from_parts(-1, false), Orientation::Upright300);
        assert_eq!(Orientation::from_parts(2, true), Orientation::Flipped120);

        for orientation in Orientation::ALL {
            let rebuilt =
                Orientation::from_parts(i32::from(orientation.steps()), orientation.is_flipped());
            assert_eq!(rebuilt, orientation);
        }
    }

    // Tests six single rotations return every orientation to itself
    // Verified by rotating flipped orientations the wrong way
    #[test]
    fn test_rotation_closure() {
        for orientation in Orientation::ALL {
            let mut current = orientation;
            for _ in 0..6 {
                current = current.rotated(1);
            }
            assert_eq!(current, orientation);
            assert_ne!(orientation.rotated(1), orientation);
        }
    }

    // Tests mirroring is an involution that reverses rotation sense
    // Verified by keeping steps unchanged when flipping
    #[test]
    fn test_flip() {
        assert_eq!(Orientation::Upright60.flipped(), Orientation::Flipped300);
        for orientation in Orientation::ALL {
            assert_eq!(orientation.flipped().flipped(), orientation);
            assert_ne!(orientation.flipped().is_flipped(), orientation.is_flipped());
        }
    }

    // Tests composition is closed, associative and has inverses
    // Verified by dropping the rotation sign change under a flip
    #[test]
    fn test_group_laws() {
        for a in Orientation::ALL {
            assert_eq!(a.compose(Orientation::Upright0), a);
            assert_eq!(Orientation::Upright0.compose(a), a);
            assert_eq!(a.compose(a.inverse()), Orientation::Upright0);
            assert_eq!(a.inverse().compose(a), Orientation::Upright0);

            for b in Orientation::ALL {
                for c in Orientation::ALL {
                    assert_eq!(a.compose(b).compose(c), a.compose(b.compose(c)));
                }
            }
        }

        assert_eq!(
            Orientation::Upright60.compose(Orientation::Upright120),
            Orientation::Upright180
        );
        assert_eq!(
            Orientation::Flipped0.compose(Orientation::Upright60),
            Orientation::Flipped300
        );
    }

    // Tests rotation angle sign follows the right-handed convention
    // Verified by returning a positive angle
    #[test]
    fn test_angle() {
        assert!(Orientation::Upright0.angle_radians().abs() < f32::EPSILON);
        assert!((Orientation::Upright120.angle_radians() + 2.0 * FRAC_PI_3).abs() < 1e-6);
    }

    // Tests serde and byte conversion use the table index
    // Verified by serializing variant names
    #[test]
    fn test_serialized_index() {
        assert_eq!(u8::from(Orientation::Flipped60), 7);
        assert_eq!(Orientation::try_from(3).ok(), Some(Orientation::Upright180));
        assert!(Orientation::try_from(12).is_err());

        assert_eq!(serde_json::to_string(&Orientation::Upright240).unwrap(), "4");
        assert!(serde_json::from_str::<Orientation>("13").is_err());
    }

    // Tests human-readable form
    // Verified by printing radians
    #[test]
    fn test_display() {
        assert_eq!(Orientation::Upright60.to_string(), "upright 60°");
        assert_eq!(Orientation::Flipped300.to_string(), "flipped 300°");
    }
}
