//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{QuadKind, Stripe};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for road elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.45, 0.73, 0.92, 1.0];
    pub const GRASS_LIGHT: [f32; 4] = [0.06, 0.67, 0.06, 1.0];
    pub const GRASS_DARK: [f32; 4] = [0.0, 0.60, 0.0, 1.0];
    pub const ROAD_LIGHT: [f32; 4] = [0.42, 0.42, 0.42, 1.0];
    pub const ROAD_DARK: [f32; 4] = [0.41, 0.41, 0.41, 1.0];
    pub const RUMBLE_LIGHT: [f32; 4] = [0.33, 0.33, 0.33, 1.0];
    pub const RUMBLE_DARK: [f32; 4] = [0.73, 0.73, 0.73, 1.0];
    pub const LANE: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const PLAYER_BODY: [f32; 4] = [0.85, 0.12, 0.12, 1.0];
    pub const PLAYER_CABIN: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
}

/// Palette lookup for a quad
pub fn color_for(kind: QuadKind) -> [f32; 4] {
    match kind {
        QuadKind::Grass(Stripe::Light) => colors::GRASS_LIGHT,
        QuadKind::Grass(Stripe::Dark) => colors::GRASS_DARK,
        QuadKind::Road(Stripe::Light) => colors::ROAD_LIGHT,
        QuadKind::Road(Stripe::Dark) => colors::ROAD_DARK,
        QuadKind::Rumble(Stripe::Light) => colors::RUMBLE_LIGHT,
        QuadKind::Rumble(Stripe::Dark) => colors::RUMBLE_DARK,
        QuadKind::Lane => colors::LANE,
        QuadKind::PlayerBody => colors::PLAYER_BODY,
        QuadKind::PlayerCabin => colors::PLAYER_CABIN,
    }
}
