/// RGBA color, 8 bits per channel, straight alpha
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with alpha scaled by `factor`
    pub fn fade(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Scale RGB by `factor`, saturating
    pub fn shade(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        let scale = |c: u8| (c as f32 * f).round().min(255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Source-over blend of `self` on top of `dst`
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let sa = a as f32 / 255.0;
                let da = dst.a as f32 / 255.0;
                let out_a = sa + da * (1.0 - sa);
                let mix = |s: u8, d: u8| {
                    ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
                };
                Rgba::new(
                    mix(self.r, dst.r),
                    mix(self.g, dst.g),
                    mix(self.b, dst.b),
                    (out_a * 255.0).round() as u8,
                )
            }
        }
    }
}

/// 2D drawing operations for the canvas.
/// Coordinates are signed so shapes may hang off any edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Replace every pixel with color (no blending)
    Clear(Rgba),

    /// Blend a single pixel
    Pixel { x: i32, y: i32, color: Rgba },

    /// Filled axis-aligned rectangle
    Rect { x: i32, y: i32, width: u32, height: u32, color: Rgba },

    /// Filled disc
    FilledCircle { cx: i32, cy: i32, radius: u32, color: Rgba },

    /// Circle outline
    Circle { cx: i32, cy: i32, radius: u32, color: Rgba },

    /// One pixel wide line
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba },
}

/// Software RGBA canvas
#[derive(Clone)]
pub struct Canvas {
    pixels: Vec<Rgba>,
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Queue a draw operation (builder style)
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue a draw operation in place
    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    /// Run and drain all queued operations, in order
    pub fn execute(&mut self) {
        let ops = std::mem::take(&mut self.operations);
        for op in &ops {
            self.execute_op(op);
        }
        // hand the allocation back for the next frame
        self.operations = ops;
        self.operations.clear();
    }

    /// Builder-style [`Canvas::execute`]
    pub fn execute_ops(mut self) -> Self {
        self.execute();
        self
    }

    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Reallocate for a new size; contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; (width * height) as usize];
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.pixels.fill(color),
            DrawOp::Pixel { x, y, color } => self.blend(x, y, color),
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(x, y, width, height, color),
            DrawOp::FilledCircle {
                cx,
                cy,
                radius,
                color,
            } => self.fill_circle(cx, cy, radius, color),
            DrawOp::Circle { cx, cy, radius, color } => self.stroke_circle(cx, cy, radius, color),
            DrawOp::Line { x1, y1, x2, y2, color } => self.line(x1, y1, x2, y2, color),
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color.over(self.pixels[idx]);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        // clip once rather than per pixel
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i32).min(self.width as i32);
        let y1 = (y + height as i32).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let r = radius as i32;
        let r_sq = r * r;
        for dy in -r..=r {
            // half-width of this scanline
            let span = ((r_sq - dy * dy) as f32).sqrt() as i32;
            let y = cy + dy;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for x in (cx - span)..=(cx + span) {
                self.blend(x, y, color);
            }
        }
    }

    /// Midpoint circle
    fn stroke_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let (mut x, mut y) = (radius as i32, 0i32);
        let mut p = 1 - radius as i32;

        while x >= y {
            let points = [
                (cx + x, cy + y), (cx - x, cy + y),
                (cx + x, cy - y), (cx - x, cy - y),
                (cx + y, cy + x), (cx - y, cy + x),
                (cx + y, cy - x), (cx - y, cy - x),
            ];
            for (px, py) in points {
                self.blend(px, py, color);
            }

            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    /// Bresenham
    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (mut x, mut y) = (x1, y1);
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel buffer as tightly packed RGBA bytes, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 50);
        assert_eq!(canvas.dimensions(), (100, 50));
        assert_eq!(canvas.as_bytes().len(), 100 * 50 * 4);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn bytes_are_rgba_order() {
        let canvas = Canvas::new(2, 1).draw(DrawOp::Clear(Rgba::new(1, 2, 3, 4))).execute_ops();
        assert_eq!(canvas.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn opaque_over_anything_wins() {
        assert_eq!(RED.over(Rgba::opaque(0, 0, 255)), RED);
        assert_eq!(Rgba::TRANSPARENT.over(RED), RED);
    }

    #[test]
    fn half_alpha_mixes() {
        let out = Rgba::new(255, 255, 255, 128).over(Rgba::BLACK);
        assert_eq!(out.a, 255);
        assert!((126..=130).contains(&out.r));
    }

    #[test]
    fn offscreen_shapes_are_clipped() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::FilledCircle { cx: -3, cy: 5, radius: 5, color: RED })
            .draw(DrawOp::Line { x1: -20, y1: -20, x2: 30, y2: 30, color: RED })
            .draw(DrawOp::Rect { x: 8, y: 8, width: 100, height: 100, color: RED })
            .execute_ops();
        assert_eq!(canvas.pixel(0, 5), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(RED));
        assert_eq!(canvas.pixels().len(), 100);
    }

    #[test]
    fn execute_drains_queue() {
        let mut canvas = Canvas::new(4, 4);
        canvas.push(DrawOp::Clear(RED));
        assert_eq!(canvas.pending(), 1);
        canvas.execute();
        assert_eq!(canvas.pending(), 0);
    }
}
