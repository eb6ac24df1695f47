use std::ops::Range;

use super::ShaderVariable;
use crate::backend::UniformType;
use crate::semantics::Semantic;

/// Texture units claimed by a program's samplers, per category.
///
/// Categories are laid out contiguously: 2D samplers first, then cube-map
/// samplers, then light-probe samplers. Within a category, units follow
/// declaration order and each sampler claims as many units as its array
/// size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureUnitRanges {
    pub two_d: Range<u32>,
    pub cube: Range<u32>,
    pub light_probe: Range<u32>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextureCategory {
    TwoD,
    Cube,
    LightProbe,
}

fn category_of(uniform: &ShaderVariable) -> Option<TextureCategory> {
    if uniform.semantic() == Semantic::LightProbeTexture {
        return Some(TextureCategory::LightProbe);
    }
    match uniform.ty() {
        UniformType::Sampler2D => Some(TextureCategory::TwoD),
        UniformType::SamplerCube => Some(TextureCategory::Cube),
        _ => None,
    }
}

impl TextureUnitRanges {
    /// Computes the ranges and assigns each sampler its first unit.
    pub fn assign(uniforms: &mut [ShaderVariable]) -> Self {
        let units_in = |category: TextureCategory| -> u32 {
            uniforms
                .iter()
                .filter(|u| category_of(u) == Some(category))
                .map(ShaderVariable::array_size)
                .sum()
        };
        let two_d = units_in(TextureCategory::TwoD);
        let cube = units_in(TextureCategory::Cube);
        let light_probe = units_in(TextureCategory::LightProbe);

        let ranges = Self {
            two_d: 0..two_d,
            cube: two_d..two_d + cube,
            light_probe: two_d + cube..two_d + cube + light_probe,
        };

        let mut next = [ranges.two_d.start, ranges.cube.start, ranges.light_probe.start];
        for uniform in uniforms.iter_mut() {
            let slot = match category_of(uniform) {
                Some(TextureCategory::TwoD) => 0,
                Some(TextureCategory::Cube) => 1,
                Some(TextureCategory::LightProbe) => 2,
                None => continue,
            };
            uniform.set_texture_unit(next[slot]);
            next[slot] += uniform.array_size();
        }
        ranges
    }

    /// Total units claimed.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.light_probe.end
    }
}
