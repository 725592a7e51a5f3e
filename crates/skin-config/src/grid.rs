use skin_types::Point2;

/// `n` evenly spaced samples over `[start, stop]`, endpoints included.
///
/// A single sample sits at `start`; zero samples give an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            v[n - 1] = stop;
            v
        }
    }
}

/// `rows × cols` points covering a `length × width` rectangle centered on the
/// origin, inset by `margin` (half on each side).
///
/// Columns run along x, rows along y. Flattened row-major: all points of the
/// first row (lowest y) come first, ordered by increasing x.
pub fn generate_grid(length: f64, width: f64, margin: f64, rows: usize, cols: usize) -> Vec<Point2> {
    let hx = (length - margin) / 2.0;
    let hy = (width - margin) / 2.0;
    let xs = linspace(-hx, hx, cols);
    let ys = linspace(-hy, hy, rows);
    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| [x, y]))
        .collect()
}
