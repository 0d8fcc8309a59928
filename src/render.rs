//! Loading sampled paths and printing redrawn paths as SVG.

use ordered_float::OrderedFloat;
use std::fs::read_to_string;
use std::io::Write;
use svg2polylines::parse as parse_svg;
use svg2polylines::CoordinatePair as Point;
use svg2polylines::Polyline;

/// Return the distance between two points.
pub fn distance(left_point: Point, right_point: Point) -> f64 {
    let delta_x = left_point.x - right_point.x;
    let delta_y = left_point.y - right_point.y;
    delta_x.hypot(delta_y)
}

/// Measure the lengths of each of the segments of a closed polyline.
pub fn lengths(polyline: &[Point]) -> Vec<f64> {
    (0..polyline.len())
        .map(|prev_index| {
            let next_index = (prev_index + 1) % polyline.len();
            distance(polyline[prev_index], polyline[next_index])
        })
        .collect()
}

#[cfg(test)]
#[test]
fn test_lengths() {
    let square = vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 1.0, y: 0.0 },
        Point { x: 1.0, y: 1.0 },
        Point { x: 0.0, y: 1.0 },
    ];
    assert!(lengths(&square).iter().sum::<f64>() == 4.0);
}

/// Load a closed path from an SVG file and convert it to a polyline.
pub fn load_polyline_from_svg_file(path: &str) -> Polyline {
    let string = read_to_string(path).unwrap_or_else(|_| panic!("reading file: {}", path));

    let mut polylines = parse_svg(&string).unwrap_or_else(|_| panic!("parsing file: {}", path));

    if polylines.is_empty() {
        panic!("no SVG paths in file: {}", path);
    }

    if polylines.len() > 1 {
        panic!("too many SVG paths in file: {}", path);
    }

    let polyline = polylines.pop().unwrap();

    if polyline.len() < 2 {
        panic!("too few points in SVG path in file: {}", path);
    }

    if lengths(&polyline).iter().sum::<f64>() == 0.0 {
        panic!("zero length path in file: {}", path);
    }

    polyline
}

/// Load a closed path from a CSV file with one `x,y` pair per line.
pub fn load_polyline_from_csv_file(path: &str) -> Polyline {
    let string = read_to_string(path).unwrap_or_else(|_| panic!("reading file: {}", path));

    let mut polyline: Polyline = Vec::new();
    for (line_index, line) in string.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut coordinates = line.split(',').map(|field| {
            field.trim().parse::<f64>().unwrap_or_else(|error| {
                panic!("{} in file: {} line: {}", error, path, line_index + 1)
            })
        });
        let x = coordinates
            .next()
            .unwrap_or_else(|| panic!("missing X coordinate in file: {} line: {}", path, line_index + 1));
        let y = coordinates
            .next()
            .unwrap_or_else(|| panic!("missing Y coordinate in file: {} line: {}", path, line_index + 1));
        if coordinates.next().is_some() {
            panic!("extra fields in file: {} line: {}", path, line_index + 1);
        }
        polyline.push(Point { x, y });
    }

    if polyline.len() < 2 {
        panic!("too few points in CSV file: {}", path);
    }

    polyline
}

/// How to scale an axis of the output.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// Scale to ensure a given total size.
    Size(f64),

    /// Scale by a fixed factor.
    Factor(f64),

    /// Use the same scale factor as the other axis.
    Same,
}

/// Return the minimal coordinates in some paths.
pub fn minimal_coordinates(polylines: &[Polyline]) -> Point {
    let points = || polylines.iter().flat_map(|polyline| polyline.iter());
    Point {
        x: *points().map(|point| OrderedFloat(point.x)).min().unwrap(),
        y: *points().map(|point| OrderedFloat(point.y)).min().unwrap(),
    }
}

/// Return the maximal coordinates in some paths.
pub fn maximal_coordinates(polylines: &[Polyline]) -> Point {
    let points = || polylines.iter().flat_map(|polyline| polyline.iter());
    Point {
        x: *points().map(|point| OrderedFloat(point.x)).max().unwrap(),
        y: *points().map(|point| OrderedFloat(point.y)).max().unwrap(),
    }
}

/// Scale and move the points to fit in a (0,0) -> (w,h) bounding box.
pub fn fit_polylines(polylines: &mut [Polyline], x_scale: Scale, y_scale: Scale) {
    let minimal_point = minimal_coordinates(polylines);
    let maximal_point = maximal_coordinates(polylines);
    let size = Point {
        x: maximal_point.x - minimal_point.x,
        y: maximal_point.y - minimal_point.y,
    };

    let maybe_x_factor = match x_scale {
        Scale::Size(x_size) => Some(if size.x > 0.0 { x_size / size.x } else { 1.0 }),
        Scale::Factor(factor) => Some(factor),
        Scale::Same => None,
    };

    let maybe_y_factor = match y_scale {
        Scale::Size(y_size) => Some(if size.y > 0.0 { y_size / size.y } else { 1.0 }),
        Scale::Factor(factor) => Some(factor),
        Scale::Same => None,
    };

    let (x_factor, y_factor) = match (maybe_x_factor, maybe_y_factor) {
        (None, None) => (1.0, 1.0),
        (None, Some(y_factor)) => (y_factor, y_factor),
        (Some(x_factor), None) => (x_factor, x_factor),
        (Some(x_factor), Some(y_factor)) => (x_factor, y_factor),
    };

    for polyline in polylines.iter_mut() {
        for point in polyline.iter_mut() {
            point.x = (point.x - minimal_point.x) * x_factor;
            point.y = (point.y - minimal_point.y) * y_factor;
        }
    }
}

#[cfg(test)]
fn assert_point(point: Point, x: f64, y: f64) {
    assert_float_absolute_eq!(point.x, x, 1e-6);
    assert_float_absolute_eq!(point.y, y, 1e-6);
}

#[cfg(test)]
#[test]
fn test_fit_polylines() {
    let mut polylines = vec![vec![
        Point { x: -1.0, y: 0.0 },
        Point { x: 0.0, y: -1.0 },
        Point { x: 1.0, y: 0.0 },
        Point { x: 0.0, y: 1.0 },
    ]];

    fit_polylines(&mut polylines, Scale::Same, Scale::Same);
    assert_point(polylines[0][0], 0.0, 1.0);
    assert_point(polylines[0][1], 1.0, 0.0);
    assert_point(polylines[0][2], 2.0, 1.0);
    assert_point(polylines[0][3], 1.0, 2.0);

    fit_polylines(&mut polylines, Scale::Size(3.0), Scale::Factor(1.0));
    assert_point(polylines[0][0], 0.0, 1.0);
    assert_point(polylines[0][1], 1.5, 0.0);
    assert_point(polylines[0][2], 3.0, 1.0);
    assert_point(polylines[0][3], 1.5, 2.0);

    fit_polylines(&mut polylines, Scale::Factor(1.0), Scale::Size(5.0));
    assert_point(polylines[0][0], 0.0, 2.5);
    assert_point(polylines[0][1], 1.5, 0.0);
    assert_point(polylines[0][2], 3.0, 2.5);
    assert_point(polylines[0][3], 1.5, 5.0);
}

fn print_svg_polyline(polyline: &[Point], output: &mut dyn Write) {
    writeln!(
        output,
        "<path fill='none' stroke='black' stroke-width='0.1' d='"
    )
    .unwrap();
    let mut command = "M";
    for point in polyline {
        writeln!(output, "{} {} {}", command, point.x, point.y).unwrap();
        command = "L";
    }
    writeln!(output, "Z").unwrap();
    writeln!(output, "'/>").unwrap();
}

/// Print a vector of paths as an SVG file.
pub fn print_svg_polylines(polylines: &[Polyline], output: &mut dyn Write) {
    let maximal_point = maximal_coordinates(polylines);
    writeln!(
        output,
        "<svg width='{}pt' height='{}pt' xmlns='http://www.w3.org/2000/svg'>",
        maximal_point.x, maximal_point.y
    )
    .unwrap();

    writeln!(output, "<g transform='scale(1.333333 1.333333)'>").unwrap();

    for polyline in polylines {
        print_svg_polyline(polyline, output);
    }

    writeln!(output, "</g>").unwrap();
    writeln!(output, "</svg>").unwrap();
}
