//! Square tinting for the threat overlay

use std::fmt;

use square_watch_core::SquareThreat;

/// Attackers beyond this count do not make a square any darker.
const SATURATION: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    /// Opacity of a fully saturated square.
    pub max_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self { max_opacity: 0.6 }
    }
}

/// An RGBA fill, rendered as a CSS `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.2})", self.red, self.green, self.blue, self.alpha)
    }
}

impl OverlayStyle {
    /// Green for white's control, red for black's, mixed on contested squares.
    /// Opacity grows with the number of attackers.
    pub fn tint(&self, threat: &SquareThreat) -> Option<Tint> {
        let total = threat.total();
        if total == 0 {
            return None;
        }
        let share = |count: u32| ((255 * count) / total) as u8;
        Some(Tint {
            red: share(threat.enemy_count),
            green: share(threat.self_count),
            blue: 0,
            alpha: total.min(SATURATION) as f32 / SATURATION as f32 * self.max_opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use square_watch_core::Square;

    fn threat(self_count: u32, enemy_count: u32) -> SquareThreat {
        SquareThreat {
            square: Square::new(4, 4).unwrap(),
            self_count,
            enemy_count,
        }
    }

    #[test]
    fn test_no_attackers_no_tint() {
        assert_eq!(OverlayStyle::default().tint(&threat(0, 0)), None);
    }

    #[test]
    fn test_white_only() {
        let tint = OverlayStyle::default().tint(&threat(1, 0)).unwrap();
        assert_eq!((tint.red, tint.green, tint.blue), (0, 255, 0));
        assert!((tint.alpha - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_contested_and_saturated() {
        let tint = OverlayStyle::default().tint(&threat(3, 3)).unwrap();
        assert_eq!((tint.red, tint.green), (127, 127));
        assert!((tint.alpha - 0.6).abs() < 1e-6);
        assert_eq!(tint.to_string(), "rgba(127, 127, 0, 0.60)");
    }
}
