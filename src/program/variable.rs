//! Shader Variables
//!
//! A [`ShaderVariable`] is one active attribute or uniform observed when a
//! linked program is introspected. Its semantic, index and scope are filled
//! in by the semantic delegate at link time; its value is staged by the
//! delegate during population and then written through the program's
//! last-written cache.
//!
//! The `set_*` methods conform a value to the declared GLSL type, so a
//! populator can produce a `vec4` color for a uniform declared `vec3`, or a
//! 4×4 transform for a uniform declared `mat3`.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::backend::{ActiveVariable, Location, UniformType};
use crate::program::UniformValue;
use crate::semantics::{Semantic, VariableScope};
use crate::utils::interner::{self, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Attribute,
    Uniform,
}

#[derive(Debug, Clone)]
pub struct ShaderVariable {
    name: String,
    symbol: Symbol,
    kind: VariableKind,
    location: Location,
    ty: UniformType,
    array_size: u32,
    semantic: Semantic,
    semantic_index: u32,
    scope: VariableScope,
    texture_unit: Option<u32>,
    staged: Option<UniformValue>,
}

impl ShaderVariable {
    #[must_use]
    pub fn new(
        name: &str,
        kind: VariableKind,
        location: Location,
        ty: UniformType,
        array_size: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: interner::intern(name),
            kind,
            location,
            ty,
            array_size: array_size.max(1),
            semantic: Semantic::None,
            semantic_index: 0,
            scope: VariableScope::default(),
            texture_unit: None,
            staged: None,
        }
    }

    /// Builds a variable from introspection output.
    ///
    /// A trailing `[0]` on array names is dropped so the name matches the
    /// declaration.
    #[must_use]
    pub fn from_active(active: &ActiveVariable, kind: VariableKind) -> Self {
        let name = active.name.strip_suffix("[0]").unwrap_or(&active.name);
        Self::new(name, kind, active.location, active.ty, active.size)
    }

    // ── Identity ────────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    #[must_use]
    pub fn ty(&self) -> UniformType {
        self.ty
    }

    #[inline]
    #[must_use]
    pub fn array_size(&self) -> u32 {
        self.array_size
    }

    // ── Semantic configuration ──────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn semantic(&self) -> Semantic {
        self.semantic
    }

    #[inline]
    #[must_use]
    pub fn semantic_index(&self) -> u32 {
        self.semantic_index
    }

    #[inline]
    #[must_use]
    pub fn scope(&self) -> VariableScope {
        self.scope
    }

    /// Assigns a semantic and derives the scope from its category.
    pub fn configure(&mut self, semantic: Semantic, semantic_index: u32) {
        self.semantic = semantic;
        self.semantic_index = semantic_index;
        self.scope = semantic.scope();
    }

    /// Overrides the derived scope. Application delegates use this for
    /// semantics in the application range.
    pub fn set_scope(&mut self, scope: VariableScope) {
        self.scope = scope;
    }

    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.semantic != Semantic::None
    }

    /// First texture unit assigned to this sampler at link time.
    #[inline]
    #[must_use]
    pub fn texture_unit(&self) -> Option<u32> {
        self.texture_unit
    }

    pub(crate) fn set_texture_unit(&mut self, unit: u32) {
        self.texture_unit = Some(unit);
    }

    // ── Staged value ────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn staged_value(&self) -> Option<&UniformValue> {
        self.staged.as_ref()
    }

    pub(crate) fn take_staged(&mut self) -> Option<UniformValue> {
        self.staged.take()
    }

    /// Stages a value as-is, without conforming it to the declared type.
    pub fn set_value(&mut self, value: UniformValue) {
        self.staged = Some(value);
    }

    pub fn set_float(&mut self, v: f32) {
        let value = match self.ty {
            UniformType::Int => UniformValue::Int(v.round() as i32),
            UniformType::Bool => UniformValue::Bool(v != 0.0),
            UniformType::Vec2 => UniformValue::Vec2(Vec2::splat(v)),
            UniformType::Vec3 => UniformValue::Vec3(Vec3::splat(v)),
            UniformType::Vec4 => UniformValue::Vec4(Vec4::splat(v)),
            _ => UniformValue::Float(v),
        };
        self.set_value(value);
    }

    pub fn set_int(&mut self, v: i32) {
        let value = match self.ty {
            UniformType::Float => UniformValue::Float(v as f32),
            UniformType::Bool => UniformValue::Bool(v != 0),
            _ => UniformValue::Int(v),
        };
        self.set_value(value);
    }

    pub fn set_bool(&mut self, v: bool) {
        let value = match self.ty {
            UniformType::Int => UniformValue::Int(i32::from(v)),
            UniformType::Float => UniformValue::Float(if v { 1.0 } else { 0.0 }),
            _ => UniformValue::Bool(v),
        };
        self.set_value(value);
    }

    pub fn set_vec2(&mut self, v: Vec2) {
        let value = match self.ty {
            UniformType::Float => UniformValue::Float(v.x),
            UniformType::Vec3 => UniformValue::Vec3(v.extend(0.0)),
            UniformType::Vec4 => UniformValue::Vec4(v.extend(0.0).extend(0.0)),
            _ => UniformValue::Vec2(v),
        };
        self.set_value(value);
    }

    /// Stages a direction-like vector. A `vec4` target receives `w = 0`.
    pub fn set_vec3(&mut self, v: Vec3) {
        self.set_value(conform_vec3(v, 0.0, self.ty));
    }

    /// Stages a position. A `vec4` target receives `w = 1`.
    pub fn set_point(&mut self, v: Vec3) {
        self.set_value(conform_vec3(v, 1.0, self.ty));
    }

    pub fn set_vec4(&mut self, v: Vec4) {
        self.set_value(conform_vec4(v, self.ty));
    }

    pub fn set_mat4(&mut self, m: Mat4) {
        let value = match self.ty {
            UniformType::Mat3 => UniformValue::Mat3(Mat3::from_mat4(m)),
            _ => UniformValue::Mat4(m),
        };
        self.set_value(value);
    }

    pub fn set_mat3(&mut self, m: Mat3) {
        let value = match self.ty {
            UniformType::Mat4 => UniformValue::Mat4(Mat4::from_mat3(m)),
            _ => UniformValue::Mat3(m),
        };
        self.set_value(value);
    }

    // ── Element-wise (array) setters ────────────────────────────────────────
    //
    // A single element stages a scalar value; several stage an array.

    pub fn set_float_elements(&mut self, values: &[f32]) {
        if let [v] = values {
            return self.set_float(*v);
        }
        let value = match self.ty {
            UniformType::Int => UniformValue::IntArray(values.iter().map(|v| v.round() as i32).collect()),
            UniformType::Bool => UniformValue::BoolArray(values.iter().map(|v| *v != 0.0).collect()),
            _ => UniformValue::FloatArray(values.to_vec()),
        };
        self.set_value(value);
    }

    pub fn set_int_elements(&mut self, values: &[i32]) {
        if let [v] = values {
            return self.set_int(*v);
        }
        let value = match self.ty {
            UniformType::Float => UniformValue::FloatArray(values.iter().map(|v| *v as f32).collect()),
            UniformType::Bool => UniformValue::BoolArray(values.iter().map(|v| *v != 0).collect()),
            _ => UniformValue::IntArray(values.iter().copied().collect()),
        };
        self.set_value(value);
    }

    pub fn set_bool_elements(&mut self, values: &[bool]) {
        if let [v] = values {
            return self.set_bool(*v);
        }
        let value = match self.ty {
            UniformType::Int => UniformValue::IntArray(values.iter().map(|v| i32::from(*v)).collect()),
            UniformType::Float => {
                UniformValue::FloatArray(values.iter().map(|v| if *v { 1.0 } else { 0.0 }).collect())
            }
            _ => UniformValue::BoolArray(values.to_vec()),
        };
        self.set_value(value);
    }

    pub fn set_vec3_elements(&mut self, values: &[Vec3]) {
        if let [v] = values {
            return self.set_vec3(*v);
        }
        let value = match self.ty {
            UniformType::Vec4 => UniformValue::Vec4Array(values.iter().map(|v| v.extend(0.0)).collect()),
            _ => UniformValue::Vec3Array(values.to_vec()),
        };
        self.set_value(value);
    }

    pub fn set_vec4_elements(&mut self, values: &[Vec4]) {
        if let [v] = values {
            return self.set_vec4(*v);
        }
        let value = match self.ty {
            UniformType::Vec3 => UniformValue::Vec3Array(values.iter().map(|v| v.truncate()).collect()),
            UniformType::Float => UniformValue::FloatArray(values.iter().map(|v| v.x).collect()),
            _ => UniformValue::Vec4Array(values.to_vec()),
        };
        self.set_value(value);
    }

    pub fn set_mat4_elements(&mut self, values: &[Mat4]) {
        if let [m] = values {
            return self.set_mat4(*m);
        }
        let value = match self.ty {
            UniformType::Mat3 => UniformValue::Mat3Array(values.iter().map(|m| Mat3::from_mat4(*m)).collect()),
            _ => UniformValue::Mat4Array(values.to_vec()),
        };
        self.set_value(value);
    }

    pub fn set_mat3_elements(&mut self, values: &[Mat3]) {
        if let [m] = values {
            return self.set_mat3(*m);
        }
        let value = match self.ty {
            UniformType::Mat4 => UniformValue::Mat4Array(values.iter().map(|m| Mat4::from_mat3(*m)).collect()),
            _ => UniformValue::Mat3Array(values.to_vec()),
        };
        self.set_value(value);
    }
}

fn conform_vec3(v: Vec3, w: f32, ty: UniformType) -> UniformValue {
    match ty {
        UniformType::Float => UniformValue::Float(v.x),
        UniformType::Vec2 => UniformValue::Vec2(v.truncate()),
        UniformType::Vec4 => UniformValue::Vec4(v.extend(w)),
        _ => UniformValue::Vec3(v),
    }
}

fn conform_vec4(v: Vec4, ty: UniformType) -> UniformValue {
    match ty {
        UniformType::Float => UniformValue::Float(v.x),
        UniformType::Vec2 => UniformValue::Vec2(v.truncate().truncate()),
        UniformType::Vec3 => UniformValue::Vec3(v.truncate()),
        _ => UniformValue::Vec4(v),
    }
}
