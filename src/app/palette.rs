use ggez::graphics::Color;
use hsl::HSL;

pub struct Palette {
    pub background_color: Color,
    pub grid_color: Color,
    pub grid_thickness: f32,
    pub border_color: Color,
    pub border_thickness: f32,
    pub food_color: Color,
    pub text_color: Color,
    pub overlay_color: Color,

    /// Hue of the head, the tail fades towards `tail_lightness`
    pub eel_hue: f64,
    pub head_lightness: f64,
    pub tail_lightness: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb(0, 0, 139),
            grid_color: Color::from_rgb(169, 169, 169),
            grid_thickness: 1.,
            border_color: Color::RED,
            border_thickness: 3.,
            food_color: Color::RED,
            text_color: Color::WHITE,
            overlay_color: Color::new(0., 0., 0., 0.6),

            eel_hue: 120.,
            head_lightness: 0.2,
            tail_lightness: 0.35,
        }
    }
}

impl Palette {
    pub fn head_color(&self) -> Color {
        self.segment_color(0, 1)
    }

    /// Color of segment `seg` out of `len`, the head counts as segment 0
    pub fn segment_color(&self, seg: usize, len: usize) -> Color {
        let tail_ratio = if len <= 1 { 0. } else { seg as f64 / (len - 1) as f64 };
        let lightness = self.head_lightness + tail_ratio * (self.tail_lightness - self.head_lightness);
        let hsl = HSL { h: self.eel_hue, s: 1., l: lightness };
        Color::from(hsl.to_rgb())
    }
}
