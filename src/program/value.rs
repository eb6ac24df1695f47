//! Uniform Values
//!
//! CPU-side representation of a value written to a uniform location. The
//! last-written cache compares values by their float bit patterns
//! ([`BitwiseEq`]), so a repeated NaN still counts as unchanged.

use glam::{IVec2, IVec3, IVec4, Mat3, Mat4, Vec2, Vec3, Vec4};
use smallvec::SmallVec;

use super::uniform_cache::BitwiseEq;
use crate::backend::UniformType;

/// Texture-unit and small integer arrays rarely exceed four entries.
pub type IntArray = SmallVec<[i32; 4]>;

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Bool(bool),
    Mat3(Mat3),
    Mat4(Mat4),

    FloatArray(Vec<f32>),
    Vec2Array(Vec<Vec2>),
    Vec3Array(Vec<Vec3>),
    Vec4Array(Vec<Vec4>),
    IntArray(IntArray),
    BoolArray(Vec<bool>),
    Mat3Array(Vec<Mat3>),
    Mat4Array(Vec<Mat4>),
}

impl UniformValue {
    /// Type-appropriate neutral value: zero for scalars and vectors, identity
    /// for matrices, `false` for booleans and unit 0 for samplers.
    ///
    /// `size > 1` produces an array value with `size` elements.
    #[must_use]
    pub fn default_for(ty: UniformType, size: u32) -> Self {
        let n = size.max(1) as usize;
        if n == 1 {
            return match ty {
                UniformType::Float => Self::Float(0.0),
                UniformType::Vec2 => Self::Vec2(Vec2::ZERO),
                UniformType::Vec3 => Self::Vec3(Vec3::ZERO),
                UniformType::Vec4 => Self::Vec4(Vec4::ZERO),
                UniformType::Int | UniformType::Sampler2D | UniformType::SamplerCube => {
                    Self::Int(0)
                }
                UniformType::IVec2 => Self::IVec2(IVec2::ZERO),
                UniformType::IVec3 => Self::IVec3(IVec3::ZERO),
                UniformType::IVec4 => Self::IVec4(IVec4::ZERO),
                UniformType::Bool => Self::Bool(false),
                UniformType::Mat3 => Self::Mat3(Mat3::IDENTITY),
                UniformType::Mat4 => Self::Mat4(Mat4::IDENTITY),
            };
        }

        match ty {
            UniformType::Float => Self::FloatArray(vec![0.0; n]),
            UniformType::Vec2 => Self::Vec2Array(vec![Vec2::ZERO; n]),
            UniformType::Vec3 => Self::Vec3Array(vec![Vec3::ZERO; n]),
            UniformType::Vec4 => Self::Vec4Array(vec![Vec4::ZERO; n]),
            UniformType::Int | UniformType::Sampler2D | UniformType::SamplerCube => {
                Self::IntArray(smallvec::smallvec![0; n])
            }
            UniformType::IVec2 => Self::IntArray(smallvec::smallvec![0; n * 2]),
            UniformType::IVec3 => Self::IntArray(smallvec::smallvec![0; n * 3]),
            UniformType::IVec4 => Self::IntArray(smallvec::smallvec![0; n * 4]),
            UniformType::Bool => Self::BoolArray(vec![false; n]),
            UniformType::Mat3 => Self::Mat3Array(vec![Mat3::IDENTITY; n]),
            UniformType::Mat4 => Self::Mat4Array(vec![Mat4::IDENTITY; n]),
        }
    }

    /// Number of logical elements carried by the value.
    #[must_use]
    pub fn element_count(&self) -> usize {
        match self {
            Self::FloatArray(v) => v.len(),
            Self::Vec2Array(v) => v.len(),
            Self::Vec3Array(v) => v.len(),
            Self::Vec4Array(v) => v.len(),
            Self::IntArray(v) => v.len(),
            Self::BoolArray(v) => v.len(),
            Self::Mat3Array(v) => v.len(),
            Self::Mat4Array(v) => v.len(),
            _ => 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::FloatArray(_)
                | Self::Vec2Array(_)
                | Self::Vec3Array(_)
                | Self::Vec4Array(_)
                | Self::IntArray(_)
                | Self::BoolArray(_)
                | Self::Mat3Array(_)
                | Self::Mat4Array(_)
        )
    }
}

impl BitwiseEq for UniformValue {
    fn bitwise_eq(&self, other: &Self) -> bool {
        use bytemuck::{bytes_of, cast_slice};

        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Vec2(a), Self::Vec2(b)) => bytes_of(a) == bytes_of(b),
            (Self::Vec3(a), Self::Vec3(b)) => bytes_of(a) == bytes_of(b),
            (Self::Vec4(a), Self::Vec4(b)) => bytes_of(a) == bytes_of(b),
            (Self::Mat3(a), Self::Mat3(b)) => bytes_of(a) == bytes_of(b),
            (Self::Mat4(a), Self::Mat4(b)) => bytes_of(a) == bytes_of(b),
            (Self::FloatArray(a), Self::FloatArray(b)) => {
                cast_slice::<f32, u8>(a) == cast_slice::<f32, u8>(b)
            }
            (Self::Vec2Array(a), Self::Vec2Array(b)) => {
                cast_slice::<Vec2, u8>(a) == cast_slice::<Vec2, u8>(b)
            }
            (Self::Vec3Array(a), Self::Vec3Array(b)) => {
                cast_slice::<Vec3, u8>(a) == cast_slice::<Vec3, u8>(b)
            }
            (Self::Vec4Array(a), Self::Vec4Array(b)) => {
                cast_slice::<Vec4, u8>(a) == cast_slice::<Vec4, u8>(b)
            }
            (Self::Mat3Array(a), Self::Mat3Array(b)) => {
                cast_slice::<Mat3, u8>(a) == cast_slice::<Mat3, u8>(b)
            }
            (Self::Mat4Array(a), Self::Mat4Array(b)) => {
                cast_slice::<Mat4, u8>(a) == cast_slice::<Mat4, u8>(b)
            }
            // Integer and boolean payloads have no NaN.
            _ => self == other,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(v: Mat3) -> Self {
        Self::Mat3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scalar_values() {
        assert_eq!(
            UniformValue::default_for(UniformType::Mat4, 1),
            UniformValue::Mat4(Mat4::IDENTITY)
        );
        assert_eq!(
            UniformValue::default_for(UniformType::Vec3, 1),
            UniformValue::Vec3(Vec3::ZERO)
        );
        assert_eq!(
            UniformValue::default_for(UniformType::SamplerCube, 1),
            UniformValue::Int(0)
        );
    }

    #[test]
    fn test_bitwise_eq_matches_nan_and_signed_zero() {
        let nan = UniformValue::Vec4Array(vec![Vec4::new(f32::NAN, 0.0, 0.0, 1.0)]);
        assert_ne!(nan, nan.clone());
        assert!(nan.bitwise_eq(&nan.clone()));

        assert_eq!(UniformValue::Float(0.0), UniformValue::Float(-0.0));
        assert!(!UniformValue::Float(0.0).bitwise_eq(&UniformValue::Float(-0.0)));
        assert!(!UniformValue::Int(1).bitwise_eq(&UniformValue::Float(1.0)));
    }

    #[test]
    fn test_default_array_values() {
        let value = UniformValue::default_for(UniformType::Mat3, 4);
        assert!(value.is_array());
        assert_eq!(value.element_count(), 4);

        let value = UniformValue::default_for(UniformType::Bool, 0);
        assert_eq!(value, UniformValue::Bool(false));
    }
}
