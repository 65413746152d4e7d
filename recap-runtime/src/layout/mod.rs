/// Position from the top left of the screen.
///
/// Signed so partially visible tiles can hang off the surface edges;
/// the draw handle clips out-of-range pixels.
#[derive(Clone, Copy)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned destination rectangle in surface pixels.
#[derive(Clone, Copy)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn centered_at(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: (center_x - width / 2.0).round() as i32,
            y: (center_y - height / 2.0).round() as i32,
            width: width.round() as u32,
            height: height.round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_straddles_its_midpoint() {
        let rect = Rect::centered_at(100.0, 50.0, 40.0, 20.0);
        assert_eq!(rect.x, 80);
        assert_eq!(rect.y, 40);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 20);
    }

    #[test]
    fn centered_rect_may_start_offscreen() {
        let rect = Rect::centered_at(5.0, 5.0, 40.0, 40.0);
        assert_eq!(rect.x, -15);
        assert_eq!(rect.y, -15);
    }
}
