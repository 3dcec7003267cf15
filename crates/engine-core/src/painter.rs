use crate::display_list::{Command, DisplayList, Viewport};
use crate::scene::*;

/// Immediate-mode recorder that turns draw calls into a [`DisplayList`].
pub struct Painter {
    list: DisplayList,
    transform_stack: Vec<Transform2D>,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                commands: Vec::new(),
            },
            transform_stack: vec![Transform2D::identity()],
        }
    }

    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    pub fn push_transform(&mut self, t: Transform2D) {
        // Compose with current transform so nested pushes multiply.
        let composed = self.current_transform().concat(t);
        self.list.commands.push(Command::PushTransform(composed));
        self.transform_stack.push(composed);
    }

    pub fn pop_transform(&mut self) {
        // The root identity is never popped.
        if self.transform_stack.len() > 1 {
            self.list.commands.push(Command::PopTransform);
            self.transform_stack.pop();
        }
    }

    pub fn rect(&mut self, rect: Rect, brush: Brush, z: i32) {
        let t = self.current_transform();
        self.list.commands.push(Command::DrawRect {
            rect,
            brush,
            z,
            transform: t,
        });
    }

    pub fn finish(self) -> DisplayList {
        self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_transforms_compose() {
        let mut p = Painter::begin_frame(Viewport { width: 10, height: 10 });
        p.push_transform(Transform2D::uniform_scale(2.0));
        p.push_transform(Transform2D::translate(1.0, 0.0));
        p.rect(Rect::new(0.0, 0.0, 1.0, 1.0), Brush::Solid(ColorLinPremul::WHITE), 0);
        p.pop_transform();
        p.pop_transform();
        p.rect(Rect::new(0.0, 0.0, 1.0, 1.0), Brush::Solid(ColorLinPremul::WHITE), 0);
        let list = p.finish();

        let transforms: Vec<Transform2D> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::DrawRect { transform, .. } => Some(*transform),
                _ => None,
            })
            .collect();
        assert_eq!(transforms[0].apply([0.0, 0.0]), [2.0, 0.0]);
        assert_eq!(transforms[1], Transform2D::identity());
        assert_eq!(list.draw_count(), 2);
    }

    #[test]
    fn popping_past_root_is_ignored() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.pop_transform();
        assert_eq!(p.current_transform(), Transform2D::identity());
        assert!(p.finish().commands.is_empty());
    }
}
