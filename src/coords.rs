// Scene space (x,y in -1..1, y up) <-> image space (col,row, row down).
// Results are never clamped; a column/row outside the image is the caller's
// signal that the point is off the obstacle field.

#[inline]
pub fn scene_x_to_column(x: f32, width: usize) -> i32 {
    ((x + 1.0) * 0.5 * width as f32).round() as i32
}

#[inline]
pub fn scene_y_to_row(y: f32, height: usize) -> i32 {
    ((1.0 - y) * 0.5 * height as f32).round() as i32
}

#[inline]
pub fn column_to_scene_x(col: i32, width: usize) -> f32 {
    2.0 * col as f32 / width as f32 - 1.0
}

#[inline]
pub fn row_to_scene_y(row: i32, height: usize) -> f32 {
    1.0 - 2.0 * row as f32 / height as f32
}

/// `Some((col,row))` when the scene point lands inside a `width x height` image.
pub fn scene_to_pixel(x: f32, y: f32, width: usize, height: usize) -> Option<(usize, usize)> {
    let col = scene_x_to_column(x, width);
    let row = scene_y_to_row(y, height);
    let inside = col >= 0 && row >= 0 && (col as usize) < width && (row as usize) < height;
    inside.then_some((col as usize, row as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        assert_eq!(scene_x_to_column(-1.0, 640), 0);
        assert_eq!(scene_x_to_column(0.0, 640), 320);
        assert_eq!(scene_x_to_column(1.0, 640), 640); // one past the last column
        assert_eq!(scene_y_to_row(1.0, 480), 0);
        assert_eq!(scene_y_to_row(0.0, 480), 240);
        assert_eq!(scene_y_to_row(-1.0, 480), 480);
        assert_eq!(row_to_scene_y(0, 4), 1.0);
        assert_eq!(column_to_scene_x(0, 4), -1.0);
    }

    #[test]
    fn y_axis_is_inverted() {
        assert!(scene_y_to_row(0.5, 100) < scene_y_to_row(-0.5, 100));
        assert!(row_to_scene_y(10, 100) > row_to_scene_y(90, 100));
    }

    #[test]
    fn out_of_range_input_is_not_rejected() {
        assert_eq!(scene_y_to_row(1.1, 100), -5);
        assert_eq!(scene_x_to_column(-1.5, 100), -25);
        assert_eq!(scene_to_pixel(0.0, 1.1, 100, 100), None);
        assert_eq!(scene_to_pixel(1.0, 0.0, 100, 100), None);
        assert_eq!(scene_to_pixel(0.0, 0.0, 100, 100), Some((50, 50)));
    }

    #[test]
    fn round_trip_within_one_unit() {
        for &(w, h) in &[(4usize, 4usize), (7, 3), (640, 480), (1, 1), (33, 129)] {
            for col in 0..w as i32 {
                let back = scene_x_to_column(column_to_scene_x(col, w), w);
                assert!((back - col).abs() <= 1, "col {col} -> {back} (w={w})");
            }
            for row in 0..h as i32 {
                let back = scene_y_to_row(row_to_scene_y(row, h), h);
                assert!((back - row).abs() <= 1, "row {row} -> {back} (h={h})");
            }
        }
    }
}
