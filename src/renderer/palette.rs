//! Colors for game elements

/// Linear RGBA, each channel 0-1
pub type Color = [f32; 4];

pub const ROAD: Color = [0.2, 0.2, 0.2, 1.0]; // #333
pub const LANE_DIVIDER: Color = [1.0, 1.0, 1.0, 1.0];
pub const PLAYER_CAR: Color = [0.0, 0.584, 0.867, 1.0]; // #0095DD
pub const SKY: Color = [0.53, 0.81, 0.98, 1.0];
pub const OBSTACLE: Color = [0.18, 0.55, 0.34, 1.0];
pub const BALLOON: Color = [0.91, 0.26, 0.21, 1.0];

/// HSL (hue in degrees, saturation and lightness 0-1) to RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, 1.0]
}

/// Vivid traffic paint (full saturation, half lightness)
pub fn car_color(hue: f32) -> Color {
    hsl_to_rgba(hue, 1.0, 0.5)
}

/// CSS `rgba()` string for a canvas fill style
pub fn css(color: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}
