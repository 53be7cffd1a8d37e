use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Render uniforms. Must match `Uniforms` in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub viewport: [f32; 2],
    pub point_scale: f32,
    pub _pad0: f32,
    pub falloff: [f32; 2],
    pub _pad1: [f32; 2],
}

impl Uniforms {
    pub fn new(
        model_view: Mat4,
        projection: Mat4,
        linear_color: Vec3,
        viewport: Vec2,
        point_scale: f32,
        falloff: Vec2,
    ) -> Self {
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            color: linear_color.extend(1.0).to_array(),
            viewport: viewport.to_array(),
            point_scale,
            _pad0: 0.0,
            falloff: falloff.to_array(),
            _pad1: [0.0; 2],
        }
    }
}
