use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

/// Hand-drawn outline in its own view box, stroked progressively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Star,
    Zigzag,
    Crown,
}

impl Shape {
    fn view_box(&self) -> Size {
        match self {
            Shape::Star => Size::new(100.0, 100.0),
            Shape::Zigzag => Size::new(100.0, 20.0),
            Shape::Crown => Size::new(100.0, 60.0),
        }
    }

    fn points(&self) -> &'static [(f32, f32)] {
        match self {
            Shape::Star => &[
                (50.0, 5.0), (61.0, 35.0), (95.0, 35.0), (67.0, 55.0), (78.0, 85.0),
                (50.0, 65.0), (22.0, 85.0), (33.0, 55.0), (5.0, 35.0), (39.0, 35.0),
                (50.0, 5.0),
            ],
            Shape::Zigzag => &[
                (0.0, 10.0), (10.0, 2.0), (20.0, 18.0), (30.0, 2.0), (40.0, 18.0),
                (50.0, 2.0), (60.0, 18.0), (70.0, 2.0), (80.0, 18.0), (90.0, 2.0),
                (100.0, 10.0),
            ],
            Shape::Crown => &[
                (10.0, 50.0), (10.0, 20.0), (30.0, 40.0), (50.0, 10.0), (70.0, 40.0),
                (90.0, 20.0), (90.0, 50.0), (10.0, 50.0),
            ],
        }
    }
}

/// The leading `fraction` of a polyline's length, as a polyline.
pub fn partial_polyline(points: &[(f32, f32)], fraction: f32) -> Vec<(f32, f32)> {
    let fraction = fraction.clamp(0.0, 1.0);
    if points.len() < 2 || fraction <= 0.0 {
        return Vec::new();
    }
    let seg_len = |a: (f32, f32), b: (f32, f32)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    let total: f32 = points.windows(2).map(|w| seg_len(w[0], w[1])).sum();
    let mut budget = total * fraction;

    let mut out = vec![points[0]];
    for w in points.windows(2) {
        let len = seg_len(w[0], w[1]);
        if len >= budget {
            let t = if len > 0.0 { budget / len } else { 0.0 };
            out.push((w[0].0 + (w[1].0 - w[0].0) * t, w[0].1 + (w[1].1 - w[0].1) * t));
            return out;
        }
        budget -= len;
        out.push(w[1]);
    }
    out
}

#[derive(Debug, Clone)]
pub struct Doodle {
    pub shape: Shape,
    /// How much of the outline is drawn, 0.0 – 1.0.
    pub progress: f32,
    pub color: Color,
}

impl<Message: 'static> canvas::Program<Message> for Doodle {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let drawn = partial_polyline(self.shape.points(), self.progress);
        if drawn.len() < 2 {
            return vec![frame.into_geometry()];
        }

        // Fit the view box, preserving aspect ratio, centred.
        let vb = self.shape.view_box();
        let scale = (bounds.width / vb.width).min(bounds.height / vb.height);
        let dx = (bounds.width - vb.width * scale) / 2.0;
        let dy = (bounds.height - vb.height * scale) / 2.0;

        let path = Path::new(|b| {
            for (i, &(x, y)) in drawn.iter().enumerate() {
                let p = Point::new(dx + x * scale, dy + y * scale);
                if i == 0 {
                    b.move_to(p);
                } else {
                    b.line_to(p);
                }
            }
        });
        frame.stroke(
            &path,
            Stroke::default()
                .with_color(self.color)
                .with_width((1.5 * scale).max(1.0))
                .with_line_cap(canvas::LineCap::Round)
                .with_line_join(canvas::LineJoin::Round),
        );

        vec![frame.into_geometry()]
    }
}
