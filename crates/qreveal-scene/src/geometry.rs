//! Retained quad geometry for one code.
//!
//! Vertex layout: the background quad first, then one quad per dot in the
//! code's dot order. Progress updates rewrite the dot quads in place.

use std::sync::Arc;

use engine_core::{
    Brush, ColorLinPremul, DisplayList, Painter, QUAD_VERTICES, Rect, Tessellation, Transform2D,
    Vertex, Viewport,
};
use qreveal_code::{Code, Dot};

use crate::reveal::{DotPose, RevealParams};

/// Colors of the rendered code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryStyle {
    pub dot: ColorLinPremul,
    pub background: ColorLinPremul,
}

impl Default for GeometryStyle {
    fn default() -> Self {
        Self {
            dot: ColorLinPremul::rgba(255, 0, 0, 255),
            background: ColorLinPremul::WHITE,
        }
    }
}

/// Where the code lands on the target, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryLayout {
    pub origin: [f32; 2],
    /// Width the bordered code is scaled to. Height follows width.
    pub width: f32,
}

impl GeometryLayout {
    /// Fit a square of `min(width, height) * fill` centred in a viewport.
    pub fn centered(viewport: Viewport, fill: f32) -> Self {
        let (w, h) = (viewport.width as f32, viewport.height as f32);
        let side = w.min(h) * fill.clamp(0.0, 1.0);
        Self {
            origin: [(w - side) * 0.5, (h - side) * 0.5],
            width: side,
        }
    }
}

pub struct QrGeometry {
    code: Arc<Code>,
    layout: GeometryLayout,
    style: GeometryStyle,
    params: RevealParams,
    transform: Transform2D,
    progress: f32,
    tess: Tessellation,
}

impl QrGeometry {
    /// Tessellate `code` fully at `progress`.
    pub fn build(
        code: Arc<Code>,
        layout: GeometryLayout,
        style: GeometryStyle,
        params: RevealParams,
        progress: f32,
    ) -> Self {
        let transform = grid_transform(&code, layout);
        let mut tess = Tessellation::default();
        if !code.is_empty() {
            tess = Tessellation::with_quad_capacity(code.dots.len() + 1);
            let side = code.bordered_width() as f32;
            tess.push_rect(
                Rect::new(0.0, 0.0, side, side),
                style.background.to_array(),
                transform,
            );
            for dot in &code.dots {
                let (rect, color) = dot_quad(dot, params.pose(dot.surround_count, progress), style.dot);
                tess.push_rect(rect, color, transform);
            }
        }
        Self {
            code,
            layout,
            style,
            params,
            transform,
            progress,
            tess,
        }
    }

    /// Re-pose every dot for `progress`, rewriting vertices in place.
    /// Returns false when nothing changed.
    pub fn apply_progress(&mut self, progress: f32) -> bool {
        if progress == self.progress {
            return false;
        }
        self.progress = progress;
        // Skip the background quad; an empty code has no quads at all.
        let dot_vertices = self.tess.vertices.get_mut(QUAD_VERTICES..).unwrap_or_default();
        for (dot, quad) in self.code.dots.iter().zip(dot_vertices.chunks_exact_mut(QUAD_VERTICES)) {
            let (rect, color) = dot_quad(dot, self.params.pose(dot.surround_count, progress), self.style.dot);
            for (v, corner) in quad.iter_mut().zip(rect.corners()) {
                v.pos = self.transform.apply(corner);
                v.color = color;
            }
        }
        true
    }

    /// The same picture as an immediate-mode display list.
    pub fn display_list(&self, viewport: Viewport) -> DisplayList {
        let mut painter = Painter::begin_frame(viewport);
        if self.code.is_empty() {
            return painter.finish();
        }
        let side = self.code.bordered_width() as f32;
        painter.push_transform(self.transform);
        painter.rect(Rect::new(0.0, 0.0, side, side), Brush::Solid(self.style.background), 0);
        for dot in &self.code.dots {
            let pose = self.params.pose(dot.surround_count, self.progress);
            let (rect, _) = dot_quad(dot, pose, self.style.dot);
            painter.rect(rect, Brush::Solid(self.style.dot.with_opacity(pose.opacity)), 1);
        }
        painter.pop_transform();
        painter.finish()
    }

    pub fn code(&self) -> &Arc<Code> {
        &self.code
    }

    pub fn layout(&self) -> GeometryLayout {
        self.layout
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Pixels per module.
    pub fn scale(&self) -> f32 {
        self.transform.m[0]
    }

    pub fn is_empty(&self) -> bool {
        self.tess.vertices.is_empty()
    }

    pub fn tessellation(&self) -> &Tessellation {
        &self.tess
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.tess.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.tess.indices
    }
}

/// Grid units (one module = 1) to target pixels.
fn grid_transform(code: &Code, layout: GeometryLayout) -> Transform2D {
    let side = code.bordered_width();
    let scale = if side == 0 { 0.0 } else { layout.width / side as f32 };
    Transform2D::translate(layout.origin[0], layout.origin[1]).concat(Transform2D::uniform_scale(scale))
}

// +1 on both axes skips the quiet zone.
fn dot_quad(dot: &Dot, pose: DotPose, color: ColorLinPremul) -> (Rect, [f32; 4]) {
    let rect = Rect::new(dot.x as f32 + 1.0, dot.y as f32 + 1.0 + pose.offset_y, 1.0, 1.0);
    (rect, color.with_opacity(pose.opacity).to_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{QUAD_INDICES, tessellate_display_list};
    use qreveal_code::BitMatrix;

    fn sample_code() -> Arc<Code> {
        let m = BitMatrix::from_rows(&["#..", ".#.", "..#"]).unwrap();
        Arc::new(Code::from_grid(&m))
    }

    fn layout(width: f32) -> GeometryLayout {
        GeometryLayout { origin: [0.0, 0.0], width }
    }

    fn build(progress: f32) -> QrGeometry {
        QrGeometry::build(sample_code(), layout(50.0), GeometryStyle::default(), RevealParams::default(), progress)
    }

    #[test]
    fn background_and_one_quad_per_dot() {
        let g = build(0.0);
        assert_eq!(g.vertices().len(), 4 * QUAD_VERTICES);
        assert_eq!(g.indices().len(), 4 * QUAD_INDICES);
        // 3 modules + 2 quiet-zone modules fill 50px.
        assert_eq!(g.scale(), 10.0);
        assert_eq!(g.vertices()[2].pos, [50.0, 50.0]);
        assert_eq!(g.vertices()[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn dots_sit_inside_the_quiet_zone() {
        let g = build(0.0);
        // First dot is module (0, 0) -> grid (1, 1) -> 10px.
        assert_eq!(g.vertices()[4].pos, [10.0, 10.0]);
        assert_eq!(g.vertices()[6].pos, [20.0, 20.0]);
        // Last dot is module (2, 2).
        assert_eq!(g.vertices()[12].pos, [30.0, 30.0]);
    }

    #[test]
    fn layout_origin_translates_everything() {
        let l = GeometryLayout { origin: [100.0, 40.0], width: 50.0 };
        let g = QrGeometry::build(sample_code(), l, GeometryStyle::default(), RevealParams::default(), 0.0);
        assert_eq!(g.vertices()[0].pos, [100.0, 40.0]);
        assert_eq!(g.vertices()[4].pos, [110.0, 50.0]);
    }

    #[test]
    fn centered_layout_fits_the_short_side() {
        let l = GeometryLayout::centered(Viewport { width: 800, height: 600 }, 0.5);
        assert_eq!(l.width, 300.0);
        assert_eq!(l.origin, [250.0, 150.0]);
    }

    #[test]
    fn full_progress_drops_and_hides_dots() {
        let g = build(1.0);
        let v = g.vertices()[4];
        assert_eq!(v.pos, [10.0, 10.0 + 12.5 * 10.0]);
        assert_eq!(v.color, [0.0, 0.0, 0.0, 0.0]);
        // Background never moves.
        assert_eq!(g.vertices()[0].pos, [0.0, 0.0]);
    }

    #[test]
    fn progress_update_rewrites_in_place() {
        let mut g = build(0.0);
        let vptr = g.vertices().as_ptr();
        let iptr = g.indices().as_ptr();
        let indices = g.indices().to_vec();

        assert!(g.apply_progress(0.6));
        assert!(!g.apply_progress(0.6));
        assert_eq!(g.vertices().as_ptr(), vptr);
        assert_eq!(g.indices().as_ptr(), iptr);
        assert_eq!(g.indices(), indices.as_slice());

        // Same result as building at that progress from scratch.
        assert_eq!(g.vertices(), build(0.6).vertices());
    }

    #[test]
    fn display_list_matches_retained_vertices() {
        let mut g = build(0.0);
        g.apply_progress(0.35);
        let list = g.display_list(Viewport { width: 50, height: 50 });
        assert_eq!(list.draw_count(), 4);
        assert_eq!(tessellate_display_list(&list).vertices, g.vertices());
    }

    #[test]
    fn empty_code_has_no_geometry() {
        let g = QrGeometry::build(
            Arc::new(Code::empty()),
            layout(50.0),
            GeometryStyle::default(),
            RevealParams::default(),
            0.3,
        );
        assert!(g.is_empty());
        assert!(g.indices().is_empty());
        assert_eq!(g.display_list(Viewport::default()).draw_count(), 0);
        let mut g = g;
        assert!(g.apply_progress(0.9));
        assert!(g.is_empty());
    }
}
