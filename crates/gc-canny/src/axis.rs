//! Quantization of gradient directions onto four 45-degree axes.

/// One of four orientation axes folded from the eight principal compass
/// directions. Opposite directions map to the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionAxis {
    NorthSouth,
    NwSe,
    EastWest,
    SwNe,
}

/// Quantizes a gradient direction onto the nearest 45-degree axis.
///
/// The angle is in radians, East-counterclockwise (0 = East, `PI/2` =
/// North). The circle is split into eight 45-degree sectors anchored at
/// 22.5 degrees, each half-open `[low, high)` with the sector straddling 0
/// wrapping around, and opposite sectors fold onto the same axis.
/// Non-finite angles quantize to [`DirectionAxis::EastWest`].
pub fn quantize_direction(angle: f32) -> DirectionAxis {
    if !angle.is_finite() {
        return DirectionAxis::EastWest;
    }

    // Normalize to [0, 360) degrees.
    let mut deg = angle.to_degrees() % 360.0;
    if deg < 0.0 {
        deg += 360.0;
    }

    if deg < 22.5 || deg >= 337.5 {
        DirectionAxis::EastWest
    } else if deg < 67.5 {
        DirectionAxis::NwSe
    } else if deg < 112.5 {
        DirectionAxis::NorthSouth
    } else if deg < 157.5 {
        DirectionAxis::SwNe
    } else if deg < 202.5 {
        DirectionAxis::EastWest
    } else if deg < 247.5 {
        DirectionAxis::NwSe
    } else if deg < 292.5 {
        DirectionAxis::NorthSouth
    } else {
        DirectionAxis::SwNe
    }
}
