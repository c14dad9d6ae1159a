/// Normalized RGBA color, every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb_f32(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb_f32(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb_f32(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb_f32(0.0, 0.0, 1.0);

    const CLAMP_MAX: f32 = u8::MAX as f32;

    pub const fn rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn grey(value: f32) -> Self {
        Self::rgb_f32(value, value, value)
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / Color::CLAMP_MAX,
            g: f32::from(g) / Color::CLAMP_MAX,
            b: f32::from(b) / Color::CLAMP_MAX,
            a: f32::from(a) / Color::CLAMP_MAX,
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    /// Scales to 8 bit channels, truncating like the GL upload path expects.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * Color::CLAMP_MAX) as u8;
        [scale(self.r), scale(self.g), scale(self.b), scale(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Color::rgb_f32(rgb[0], rgb[1], rgb[2])
    }
}
