//! # Batch Registry
//!
//! Per-frame map from texture identity to its [`GeometryBatch`]. UI code feeds
//! geometry in through [`BatchRegistry::draw`] and the rectangle helpers; at the
//! end of a changed frame [`BatchRegistry::flush_all`] sends one command per
//! texture to the native renderer.

use std::collections::HashMap;

use super::batch::GeometryBatch;
use super::commands::to_command;
use super::vertex::GuiVertex;
use crate::core::config::GuiConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::ui::backend::GuiCommandSink;
use crate::ui::texture::TextureId;

/// Index pattern of a rectangle: two counter-clockwise triangles
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// Batches for the frame being built, keyed by texture
#[derive(Debug, Clone)]
pub struct BatchRegistry {
    batches: HashMap<TextureId, GeometryBatch>,
    /// Pixel to UV factor for pixel-space texture coordinates
    uv_scale: f32,
}

impl BatchRegistry {
    /// Create an empty registry with the default GUI configuration
    pub fn new() -> Self {
        Self::with_config(&GuiConfig::default())
    }

    /// Create an empty registry for the given GUI configuration
    pub fn with_config(config: &GuiConfig) -> Self {
        Self {
            batches: HashMap::new(),
            uv_scale: config.uv_scale(),
        }
    }

    /// Add geometry for a texture
    ///
    /// The texture's batch is created on first use. `indices` refer to the
    /// vertices of this call; `vertices` holds x,y,z,u,v scalars. Invalid input
    /// is rejected and leaves the registry unchanged.
    pub fn draw(&mut self, texture: &TextureId, indices: &[u32], vertices: &[f32]) -> BridgeResult<()> {
        let draw_error = |source| BridgeError::Draw {
            texture: texture.to_string(),
            source,
        };

        match self.batches.get_mut(texture) {
            Some(batch) => {
                batch.add(indices, vertices).map_err(draw_error)?;
            }
            None => {
                let mut batch = GeometryBatch::new();
                batch.add(indices, vertices).map_err(draw_error)?;
                log::trace!("New GUI batch for '{}'", texture);
                self.batches.insert(texture.clone(), batch);
            }
        }

        Ok(())
    }

    /// Add geometry given as vertex values
    pub fn draw_vertices(
        &mut self,
        texture: &TextureId,
        indices: &[u32],
        vertices: &[GuiVertex],
    ) -> BridgeResult<()> {
        self.draw(texture, indices, GuiVertex::flatten(vertices))
    }

    /// Add a textured rectangle
    ///
    /// Position and size are screen pixels. The texture origin and size are
    /// normalized UVs; callers with pixel texture coordinates divide by the
    /// source texture size first, or use [`Self::draw_textured_rect`].
    pub fn draw_rectangle(
        &mut self,
        texture: &TextureId,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        tex_x: f32,
        tex_y: f32,
        tex_width: f32,
        tex_height: f32,
    ) -> BridgeResult<()> {
        // Edges are summed in f64 so rectangles near the i32 limits cannot overflow
        let (left, top) = (x as f32, y as f32);
        let right = (f64::from(x) + f64::from(width)) as f32;
        let bottom = (f64::from(y) + f64::from(height)) as f32;
        let (u0, v0) = (tex_x, tex_y);
        let (u1, v1) = (tex_x + tex_width, tex_y + tex_height);

        let vertices = [
            GuiVertex::new(left, top, u0, v0),
            GuiVertex::new(right, top, u1, v0),
            GuiVertex::new(left, bottom, u0, v1),
            GuiVertex::new(right, bottom, u1, v1),
        ];

        self.draw_vertices(texture, &QUAD_INDICES, &vertices)
    }

    /// Add a textured rectangle whose texture region is given in pixels
    ///
    /// The region has the same size as the rectangle on screen, which is how GUI
    /// sprites are cut out of their source textures.
    pub fn draw_textured_rect(
        &mut self,
        texture: &TextureId,
        x: i32,
        y: i32,
        u: i32,
        v: i32,
        width: i32,
        height: i32,
    ) -> BridgeResult<()> {
        let scale = self.uv_scale;
        self.draw_rectangle(
            texture,
            x,
            y,
            width,
            height,
            u as f32 * scale,
            v as f32 * scale,
            width as f32 * scale,
            height as f32 * scale,
        )
    }

    /// Discard all batches and tell the native side to drop last frame's geometry
    pub fn clear(&mut self, sink: &mut dyn GuiCommandSink) {
        self.batches = HashMap::new();
        sink.clear_gui_buffers();
    }

    /// Send one command per texture and discard the batches
    ///
    /// Every texture is sent exactly once, in no particular order. On the first
    /// failure the remaining batches are dropped unsent and the error returned.
    /// Returns the number of commands sent.
    pub fn flush_all(&mut self, sink: &mut dyn GuiCommandSink) -> BridgeResult<usize> {
        let batches = std::mem::take(&mut self.batches);
        let total = batches.len();
        let mut sent = 0;

        for (texture, batch) in &batches {
            let command = to_command(texture, batch)?;
            sink.send_gui_buffer_command(&command)?;
            sent += 1;
        }

        log::debug!("Flushed {} of {} GUI batches", sent, total);
        Ok(sent)
    }

    /// Batch for a texture, if anything was drawn with it this frame
    pub fn batch(&self, texture: &TextureId) -> Option<&GeometryBatch> {
        self.batches.get(texture)
    }

    /// Textures drawn with this frame
    pub fn textures(&self) -> impl Iterator<Item = &TextureId> {
        self.batches.keys()
    }

    /// Number of textures with a batch
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether no geometry has been drawn
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl Default for BatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::backend::CommandRecorder;
    use approx::assert_relative_eq;

    fn widgets() -> TextureId {
        TextureId::new("minecraft", "textures/gui/widgets.png")
    }

    fn icons() -> TextureId {
        TextureId::new("minecraft", "textures/gui/icons.png")
    }

    #[test]
    fn test_rectangle_geometry() {
        let mut registry = BatchRegistry::new();
        registry
            .draw_rectangle(&widgets(), 10, 20, 200, 20, 0.0, 0.25, 0.78125, 0.078125)
            .unwrap();

        let batch = registry.batch(&widgets()).unwrap();
        assert_eq!(batch.indices(), &QUAD_INDICES);
        assert_eq!(batch.vertex_count(), 4);

        let v = batch.vertices();
        // top-left, top-right, bottom-left, bottom-right
        let expected = [
            [10.0, 20.0, 0.0, 0.0, 0.25],
            [210.0, 20.0, 0.0, 0.78125, 0.25],
            [10.0, 40.0, 0.0, 0.0, 0.328125],
            [210.0, 40.0, 0.0, 0.78125, 0.328125],
        ];
        for (corner, scalars) in expected.iter().enumerate() {
            for (i, &value) in scalars.iter().enumerate() {
                assert_relative_eq!(v[corner * 5 + i], value);
            }
        }
    }

    #[test]
    fn test_same_texture_merges_into_one_batch() {
        let mut registry = BatchRegistry::new();
        registry.draw_rectangle(&widgets(), 0, 0, 10, 10, 0.0, 0.0, 1.0, 1.0).unwrap();
        registry.draw_rectangle(&widgets(), 20, 0, 10, 10, 0.0, 0.0, 1.0, 1.0).unwrap();

        assert_eq!(registry.len(), 1);
        let batch = registry.batch(&widgets()).unwrap();
        assert_eq!(batch.vertex_count(), 8);
        assert_eq!(batch.index_count(), 12);
        assert_eq!(&batch.indices()[6..], &[4, 5, 6, 6, 5, 7]);
    }

    #[test]
    fn test_textured_rect_converts_pixels() {
        let mut registry = BatchRegistry::new();
        registry.draw_textured_rect(&widgets(), 0, 0, 0, 66, 200, 20).unwrap();

        let v = registry.batch(&widgets()).unwrap().vertices();
        assert_relative_eq!(v[4], 66.0 / 256.0);
        assert_relative_eq!(v[5 + 3], 200.0 / 256.0);
        assert_relative_eq!(v[15 + 4], 86.0 / 256.0);
    }

    #[test]
    fn test_rectangle_at_coordinate_limits() {
        let mut registry = BatchRegistry::new();
        registry
            .draw_rectangle(&widgets(), i32::MAX - 5, i32::MIN, 10, -10, 0.0, 0.0, 1.0, 1.0)
            .unwrap();

        let v = registry.batch(&widgets()).unwrap().vertices();
        assert_relative_eq!(v[5], (f64::from(i32::MAX) + 5.0) as f32);
        assert_relative_eq!(v[11], (f64::from(i32::MIN) - 10.0) as f32);
        assert!(v.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_zero_atlas_size_keeps_uvs_finite() {
        let mut registry = BatchRegistry::with_config(&GuiConfig::new().with_atlas_pixel_size(0));
        registry.draw_textured_rect(&widgets(), 0, 0, 0, 66, 200, 20).unwrap();

        let v = registry.batch(&widgets()).unwrap().vertices();
        assert!(v.iter().all(|value| value.is_finite()));
        assert_relative_eq!(v[4], 66.0);
    }

    #[test]
    fn test_invalid_draw_creates_no_batch() {
        let mut registry = BatchRegistry::new();
        let result = registry.draw(&icons(), &[0, 1, 2], &[0.0; 10]);

        assert!(matches!(result, Err(BridgeError::Draw { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_then_flush_sends_nothing() {
        let mut registry = BatchRegistry::new();
        let mut sink = CommandRecorder::new();
        registry.draw_rectangle(&widgets(), 0, 0, 10, 10, 0.0, 0.0, 1.0, 1.0).unwrap();

        registry.clear(&mut sink);
        let sent = registry.flush_all(&mut sink).unwrap();

        assert_eq!(sent, 0);
        assert_eq!(sink.clear_count(), 1);
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_flush_sends_each_texture_once() {
        let mut registry = BatchRegistry::new();
        let mut sink = CommandRecorder::new();
        registry.draw_rectangle(&widgets(), 0, 0, 10, 10, 0.0, 0.0, 1.0, 1.0).unwrap();
        registry.draw_rectangle(&icons(), 0, 0, 9, 9, 0.0, 0.0, 1.0, 1.0).unwrap();
        registry.draw_rectangle(&widgets(), 10, 0, 10, 10, 0.0, 0.0, 1.0, 1.0).unwrap();

        let sent = registry.flush_all(&mut sink).unwrap();
        assert_eq!(sent, 2);
        assert!(registry.is_empty());

        let mut names: Vec<&str> = sink.commands().iter().map(|c| c.texture_name()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["textures/gui/icons.png", "textures/gui/widgets.png"]);

        let widgets_command = sink
            .commands()
            .iter()
            .find(|c| c.texture_name() == "textures/gui/widgets.png")
            .unwrap();
        assert_eq!(widgets_command.index_buffer_size(), 12);
        assert_eq!(widgets_command.vertex_buffer_size(), 40);
    }

    #[test]
    fn test_namespaces_are_separate_batches() {
        let mut registry = BatchRegistry::new();
        let ours = TextureId::new("nova", "textures/gui/widgets.png");
        registry.draw_rectangle(&widgets(), 0, 0, 1, 1, 0.0, 0.0, 1.0, 1.0).unwrap();
        registry.draw_rectangle(&ours, 0, 0, 1, 1, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(registry.len(), 2);
    }
}
