//! Polygon clipping primitives.

pub type Point = [f32; 2];

#[inline]
fn cross(o: Point, a: Point, b: Point) -> f32 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Twice the signed area; positive for counter-clockwise winding.
pub fn signed_area2(polygon: &[Point]) -> f32 {
    let Some(&last) = polygon.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut sum = 0.0;
    for &p in polygon {
        sum += prev[0] * p[1] - p[0] * prev[1];
        prev = p;
    }
    sum
}

pub fn ensure_counter_clockwise(polygon: &mut [Point]) {
    if signed_area2(polygon) < 0.0 {
        polygon.reverse();
    }
}

/// True when no vertex of the counter-clockwise `polygon` turns clockwise.
pub fn is_convex(polygon: &[Point]) -> bool {
    let n = polygon.len();
    (0..n).all(|i| cross(polygon[(i + n - 1) % n], polygon[i], polygon[(i + 1) % n]) >= 0.0)
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Split a simple counter-clockwise polygon into convex pieces.
///
/// Convex input is returned whole. Concave input is ear-clipped into
/// triangles; the pieces do not overlap and together cover the polygon.
pub fn convex_pieces(polygon: &[Point]) -> Vec<Vec<Point>> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    if is_convex(polygon) {
        return vec![polygon.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut remaining = polygon.to_vec();
    while remaining.len() > 3 {
        let n = remaining.len();
        let corner = |i: usize| {
            (
                remaining[(i + n - 1) % n],
                remaining[i],
                remaining[(i + 1) % n],
            )
        };
        let ear = (0..n).find(|&i| {
            let (prev, cur, next) = corner(i);
            cross(prev, cur, next) > 0.0
                && !remaining.iter().enumerate().any(|(j, &p)| {
                    j != i
                        && j != (i + n - 1) % n
                        && j != (i + 1) % n
                        && in_triangle(p, prev, cur, next)
                })
        });
        match ear {
            Some(i) => {
                let (prev, cur, next) = corner(i);
                pieces.push(vec![prev, cur, next]);
                remaining.remove(i);
            }
            None => {
                // Only collinear or self-touching vertices are left.
                let flat = (0..n).find(|&i| {
                    let (prev, cur, next) = corner(i);
                    cross(prev, cur, next) == 0.0
                });
                match flat {
                    Some(i) => {
                        remaining.remove(i);
                    }
                    None => break,
                }
            }
        }
    }
    if remaining.len() >= 3 && signed_area2(&remaining) > 0.0 {
        pieces.push(remaining);
    }
    pieces
}

/// Where segment `s`-`e` crosses the infinite line through `a`-`b`.
fn intersect(a: Point, b: Point, s: Point, e: Point) -> Point {
    let edge = [b[0] - a[0], b[1] - a[1]];
    let dir = [e[0] - s[0], e[1] - s[1]];
    let denom = edge[0] * dir[1] - edge[1] * dir[0];
    if denom == 0.0 {
        return s;
    }
    let t = (edge[0] * (a[1] - s[1]) - edge[1] * (a[0] - s[0])) / denom;
    [s[0] + dir[0] * t, s[1] + dir[1] * t]
}

/// Sutherland-Hodgman: clip the polygon in `input` against the
/// counter-clockwise convex polygon `clip`, leaving the result in `output`.
/// `input` is used as scratch and its contents are unspecified afterwards.
pub fn clip_polygon(clip: &[Point], input: &mut Vec<Point>, output: &mut Vec<Point>) {
    output.clear();
    if clip.len() < 3 {
        return;
    }
    for (i, &a) in clip.iter().enumerate() {
        let b = clip[(i + 1) % clip.len()];
        output.clear();
        let Some(&last) = input.last() else {
            return;
        };
        let mut s = last;
        for &e in input.iter() {
            let s_inside = cross(a, b, s) >= 0.0;
            if cross(a, b, e) >= 0.0 {
                if !s_inside {
                    output.push(intersect(a, b, s, e));
                }
                output.push(e);
            } else if s_inside {
                output.push(intersect(a, b, s, e));
            }
            s = e;
        }
        std::mem::swap(input, output);
    }
    std::mem::swap(input, output);
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_SQUARE: [Point; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    /// L shape covering three unit cells of a 2x2 square.
    const L_SHAPE: [Point; 6] = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];

    #[test]
    fn test_signed_area() {
        assert_eq!(signed_area2(&UNIT_SQUARE), 2.0);
        let mut cw = UNIT_SQUARE;
        cw.reverse();
        assert_eq!(signed_area2(&cw), -2.0);
        ensure_counter_clockwise(&mut cw);
        assert!(signed_area2(&cw) > 0.0);
    }

    #[test]
    fn test_clip_overlapping_square() {
        let mut input = vec![[0.5, 0.5], [1.5, 0.5], [1.5, 1.5], [0.5, 1.5]];
        let mut output = Vec::new();
        clip_polygon(&UNIT_SQUARE, &mut input, &mut output);
        assert_eq!(output.len(), 4);
        assert!((signed_area2(&output) - 0.5).abs() < 1e-5);
        for p in &output {
            assert!(p[0] <= 1.0 && p[1] <= 1.0);
        }
    }

    #[test]
    fn test_clip_tiny_polygon() {
        let size = 1e-4;
        let clip: Vec<Point> = UNIT_SQUARE.iter().map(|p| [p[0] * size, p[1] * size]).collect();
        let mut input = vec![
            [0.5 * size, 0.5 * size],
            [1.5 * size, 0.5 * size],
            [1.5 * size, 1.5 * size],
            [0.5 * size, 1.5 * size],
        ];
        let mut output = Vec::new();
        clip_polygon(&clip, &mut input, &mut output);
        assert_eq!(output.len(), 4);
        for p in &output {
            assert!(p[0] <= size * 1.0001 && p[1] <= size * 1.0001);
            assert!(p[0] >= size * 0.4999 && p[1] >= size * 0.4999);
        }
    }

    #[test]
    fn test_clip_disjoint() {
        let mut input = vec![[2.0, 2.0], [3.0, 2.0], [2.0, 3.0]];
        let mut output = Vec::new();
        clip_polygon(&UNIT_SQUARE, &mut input, &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_degenerate_clip_polygon_removes_everything() {
        let mut input = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut output = vec![[9.0, 9.0]];
        clip_polygon(&[[0.0, 0.0], [1.0, 1.0]], &mut input, &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_convex_polygon_is_one_piece() {
        assert!(is_convex(&UNIT_SQUARE));
        assert_eq!(convex_pieces(&UNIT_SQUARE), vec![UNIT_SQUARE.to_vec()]);
    }

    #[test]
    fn test_concave_polygon_is_split() {
        assert!(!is_convex(&L_SHAPE));
        let pieces = convex_pieces(&L_SHAPE);
        assert!(pieces.len() > 1);
        let area: f32 = pieces.iter().map(|p| signed_area2(p)).sum();
        assert!((area - signed_area2(&L_SHAPE)).abs() < 1e-5);
        for piece in &pieces {
            assert!(is_convex(piece));
            // The notch at (1.5, 1.5) lies outside every piece.
            let n = piece.len();
            let inside = (0..n).all(|i| cross(piece[i], piece[(i + 1) % n], [1.5, 1.5]) >= 0.0);
            assert!(!inside);
        }
    }
}
