// sRGB <-> linear lookup tables for overlay blending.
// Mixing in linear light keeps the white stroke preview from looking
// muddy over dark source pixels.

const LINEAR_STEPS: usize = 4096;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn linear_to_srgb(l: f32) -> f32 {
    if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 }
}

pub struct GammaLut {
    to_linear: [f32; 256],          // sRGB byte -> linear 0..1
    to_srgb: Box<[u8; LINEAR_STEPS]>, // linear quantized to 4096 steps -> sRGB byte
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaLut {
    /// Build both tables; do this once, not per frame.
    pub fn new() -> Self {
        let to_linear = std::array::from_fn(|v| srgb_to_linear(v as f32 / 255.0));
        let mut to_srgb = Box::new([0u8; LINEAR_STEPS]);
        for (i, out) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / (LINEAR_STEPS - 1) as f32;
            *out = (linear_to_srgb(l) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn to_linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn to_srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb[idx]
    }

    /// Mix channel `src` over `dst` with weight `a` (0..1), in linear light.
    #[inline]
    pub fn mix(&self, dst: u8, src: u8, a: f32) -> u8 {
        let l = a * self.to_linear(src) + (1.0 - a) * self.to_linear(dst);
        self.to_srgb(l)
    }

    /// `mix` applied to each channel of two `0x00RRGGBB` pixels.
    #[inline]
    pub fn mix_rgb(&self, dst: u32, src: u32, a: f32) -> u32 {
        let ch = |px: u32, shift: u32| ((px >> shift) & 0xFF) as u8;
        let r = self.mix(ch(dst, 16), ch(src, 16), a) as u32;
        let g = self.mix(ch(dst, 8), ch(src, 8), a) as u32;
        let b = self.mix(ch(dst, 0), ch(src, 0), a) as u32;
        (r << 16) | (g << 8) | b
    }
}
