//! Functions for implementing the executable epipath program.

use crate::epicycles::Animation;
use crate::epicycles::Options;
use crate::epicycles::SystemClock;
use crate::fourier::sort_by_amplitude_descending;
use crate::fourier::transform;
use crate::render::fit_polylines;
use crate::render::lengths;
use crate::render::load_polyline_from_csv_file;
use crate::render::load_polyline_from_svg_file;
use crate::render::print_svg_polylines;
use crate::render::Scale;
use clap::crate_version;
use clap::App;
use clap::Arg;
use clap::ArgMatches;
use std::f64::consts::PI;
use std::fs::File;
use std::io::stdout;
use std::io::BufWriter;
use svg2polylines::CoordinatePair as Point;
use svg2polylines::Polyline;

/// A complete main function for the epipath program.
pub fn main(flags: &[String]) {
    let arg_matches = app().get_matches_from(flags);

    let options = arg_options(&arg_matches);
    options.validate();

    let stride = parse_count(&arg_matches, "stride");
    let polyline = parse_polyline(&arg_matches, "input");
    let (xs, ys) = split_axes(&polyline, stride);

    let mut x_components = transform(&xs);
    let mut y_components = transform(&ys);
    sort_by_amplitude_descending(&mut x_components);
    sort_by_amplitude_descending(&mut y_components);

    if let Some(count) = parse_components(&arg_matches, "components") {
        let count = count.min(x_components.len());
        x_components.truncate(count);
        y_components.truncate(count);
    }

    let mut animation = Animation::new(x_components, y_components, options);
    let clock = SystemClock::new();
    for _ in 0..animation.ticks_per_revolution() {
        animation.tick(&clock);
    }

    let mut polylines: Vec<Polyline> = Vec::new();
    if arg_matches.is_present("include-input") {
        polylines.push(
            xs.iter()
                .zip(ys.iter())
                .map(|(x, y)| Point { x: *x, y: *y })
                .collect(),
        );
    }

    // The trace is kept most-recent-first; reverse it into drawing order.
    let mut redrawn: Polyline = animation.trace().to_vec();
    redrawn.reverse();
    polylines.push(redrawn);

    fit_polylines(
        &mut polylines,
        parse_scale(&arg_matches, "x-scale"),
        parse_scale(&arg_matches, "y-scale"),
    );

    let output_path = arg_matches.value_of("output").unwrap();
    if output_path == "-" {
        print_svg_polylines(&polylines, &mut BufWriter::new(stdout())); // NOT TESTED
    } else {
        print_svg_polylines(
            &polylines,
            &mut BufWriter::new(
                File::create(output_path)
                    .unwrap_or_else(|error| panic!("{} creating output: {}", error, output_path)),
            ),
        );
    };
}

fn app() -> App<'static, 'static> {
    App::new("epipath")
        .about("\nRedraw closed paths as sums of rotating epicycles.")
        .after_help(
            "\
            PROCESS:\n\
            \n\
            - Take as input a closed path: an SVG file, a CSV file of\n  \
              \"x,y\" lines, or a generated radius-100 regular polygon\n  \
              sampled densely along its perimeter.\n\
            \n\
            - Keep every STRIDE-th sample and split the samples into\n  \
              their X and Y coordinate sequences.\n\
            \n\
            - Compute the discrete Fourier transform of each sequence\n  \
              and sort the frequency components by descending amplitude\n  \
              (largest epicycle first).\n\
            \n\
            - Optionally keep only the largest components per axis,\n  \
              approximating the path with fewer epicycles.\n\
            \n\
            - Drive the epicycle animation for one full revolution and\n  \
              collect the traced path.\n\
            \n\
            - Scale the result; coordinates are in SVG \"pt\" units.\n\
            \n\
            - Print this as SVG file.\
            ",
        )
        .version(crate_version!())
        .arg(
            Arg::with_name("input")
                .long("input")
                .short("i")
                .value_name("FILE or COUNT")
                .help(
                    "SVG file containing the path to redraw,\n\
                       CSV file (by .csv suffix) with one \"x,y\" pair per line,\n\
                       or the number of sides for a radius-100 polygon:\n\
                       2 - line, 3 - triangle, 4 - square, etc.\n",
                )
                .default_value("4"),
        )
        .arg(
            Arg::with_name("samples")
                .long("samples")
                .short("n")
                .value_name("COUNT")
                .help("Number of samples taken along a generated polygon's perimeter\n")
                .default_value("240"),
        )
        .arg(
            Arg::with_name("stride")
                .long("stride")
                .short("k")
                .value_name("COUNT")
                .help(
                    "Keep every COUNT-th input sample before transforming;\n\
                      larger strides redraw faster and rougher\n",
                )
                .default_value("5"),
        )
        .arg(
            Arg::with_name("components")
                .long("components")
                .short("c")
                .value_name("COUNT or ALL")
                .help(
                    "Number of largest-amplitude frequency components\n\
                      to keep per axis\n",
                )
                .default_value("ALL"),
        )
        .arg(
            Arg::with_name("pause")
                .long("pause")
                .short("p")
                .value_name("MILLISECONDS")
                .help("How long the animation pauses after each full revolution\n")
                .default_value("1000"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("FILE")
                .help("SVG file to write the redrawn path into;\nspecify \"-\" for STDOUT")
                .default_value("-"),
        )
        .arg(
            Arg::with_name("x-scale")
                .long("x-scale")
                .short("X")
                .value_name("SCALE")
                .help(
                    "Scaling of the output SVG, one of:\n\
                       \"<size>pt\" / \"x<factor>\" / \"same\" as y-scale\n",
                )
                .default_value("x1.0"),
        )
        .arg(
            Arg::with_name("y-scale")
                .long("y-scale")
                .short("Y")
                .value_name("SCALE")
                .help(
                    "Scaling of the output SVG, one of:\n\
                       \"<size>pt\" / \"x<factor>\" / \"same\" as x-scale\n",
                )
                .default_value("x1.0"),
        )
        .arg(
            Arg::with_name("include-input")
                .long("include-input")
                .short("I")
                .help("Include the decimated input path in the output"),
        )
}

fn arg_options(arg_matches: &ArgMatches) -> Options {
    Options {
        pause_millis: parse_value(arg_matches, "pause"),
        ..Options::default()
    }
}

fn parse_count(arg_matches: &ArgMatches, name: &str) -> usize {
    let value = arg_matches
        .value_of(name)
        .unwrap()
        .parse::<usize>()
        .unwrap_or_else(|error| {
            // BEGIN NOT TESTED
            panic!(
                "{} in {}: {}",
                error,
                name,
                arg_matches.value_of(name).unwrap()
            )
            // END NOT TESTED
        });
    if value == 0 {
        panic!("{} is zero", name); // NOT TESTED
    }
    value
}

fn parse_value(arg_matches: &ArgMatches, name: &str) -> f64 {
    arg_matches
        .value_of(name)
        .unwrap()
        .parse::<f64>()
        .unwrap_or_else(|error| {
            // BEGIN NOT TESTED
            panic!(
                "{} in {}: {}",
                error,
                name,
                arg_matches.value_of(name).unwrap()
            )
            // END NOT TESTED
        })
}

fn parse_components(arg_matches: &ArgMatches, name: &str) -> Option<usize> {
    match arg_matches.value_of(name).unwrap() {
        "ALL" => None,
        value => {
            let count = value
                .parse::<usize>()
                .unwrap_or_else(|error| panic!("{} in {}: {}", error, name, value)); // NOT TESTED
            if count == 0 {
                panic!("{} is zero", name); // NOT TESTED
            }
            Some(count)
        }
    }
}

fn parse_scale(arg_matches: &ArgMatches, name: &str) -> Scale {
    match arg_matches.value_of(name).unwrap() {
        "same" => Scale::Same,
        value if value.starts_with('x') => Scale::Factor(
            value[1..]
                .parse::<f64>()
                .unwrap_or_else(|error| panic!("{} in {}: {}", error, name, value)),
        ),
        value if value.ends_with("pt") => Scale::Size(
            value[..(value.len() - 2)]
                .parse::<f64>()
                .unwrap_or_else(|error| panic!("{} in {}: {}", error, name, value)),
        ),
        value => panic!("invalid {}: {}", name, value), // NOT TESTED
    }
}

fn parse_polyline(arg_matches: &ArgMatches, name: &str) -> Polyline {
    let value = arg_matches.value_of(name).unwrap();
    if let Result::Ok(sides) = value.parse::<usize>() {
        if sides < 2 {
            panic!("{} sides: {} are less than 2", name, sides); // NOT TESTED
        }
        let samples_count = parse_count(arg_matches, "samples");
        if samples_count < sides {
            // BEGIN NOT TESTED
            panic!(
                "samples: {} are fewer than {} sides: {}",
                samples_count, name, sides
            );
            // END NOT TESTED
        }
        sampled_polygon(sides, samples_count)
    } else if value.ends_with(".csv") {
        load_polyline_from_csv_file(value)
    } else {
        load_polyline_from_svg_file(value)
    }
}

/// Sample a radius-100 regular polygon at evenly spaced offsets along its
/// perimeter, mimicking a captured drawing of the shape.
fn sampled_polygon(sides: usize, samples_count: usize) -> Polyline {
    let angle = 2.0 * PI / sides as f64;
    let mut vertices = vec![Point { x: 0.0, y: 0.0 }; sides];
    for (side, vertex) in vertices.iter_mut().enumerate() {
        vertex.x = 100.0 * (angle * side as f64).sin();
        vertex.y = 100.0 * (angle * side as f64).cos();
    }

    let segment_lengths = lengths(&vertices);
    let perimeter: f64 = segment_lengths.iter().sum();

    let mut polyline = Vec::with_capacity(samples_count);
    for sample_index in 0..samples_count {
        let mut offset = perimeter * sample_index as f64 / samples_count as f64;
        let mut segment_index = 0;
        while segment_index < sides - 1 && offset > segment_lengths[segment_index] {
            offset -= segment_lengths[segment_index];
            segment_index += 1;
        }
        let from_vertex = vertices[segment_index];
        let to_vertex = vertices[(segment_index + 1) % sides];
        let fraction = offset / segment_lengths[segment_index];
        polyline.push(Point {
            x: from_vertex.x + (to_vertex.x - from_vertex.x) * fraction,
            y: from_vertex.y + (to_vertex.y - from_vertex.y) * fraction,
        });
    }
    polyline
}

fn split_axes(polyline: &[Point], stride: usize) -> (Vec<f64>, Vec<f64>) {
    let xs = polyline
        .iter()
        .step_by(stride)
        .map(|point| point.x)
        .collect();
    let ys = polyline
        .iter()
        .step_by(stride)
        .map(|point| point.y)
        .collect();
    (xs, ys)
}

#[cfg(test)]
#[test]
fn test_sampled_polygon() {
    let square = sampled_polygon(4, 240);
    assert_eq!(square.len(), 240);
    assert_float_absolute_eq!(square[0].x, 0.0, 1e-9);
    assert_float_absolute_eq!(square[0].y, 100.0, 1e-9);
    assert_float_absolute_eq!(square[60].x, 100.0, 1e-9);
    assert_float_absolute_eq!(square[60].y, 0.0, 1e-9);
}

#[cfg(test)]
#[test]
fn test_split_axes() {
    let polyline = vec![
        Point { x: 1.0, y: -1.0 },
        Point { x: 2.0, y: -2.0 },
        Point { x: 3.0, y: -3.0 },
        Point { x: 4.0, y: -4.0 },
        Point { x: 5.0, y: -5.0 },
    ];
    let (xs, ys) = split_axes(&polyline, 2);
    assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    assert_eq!(ys, vec![-1.0, -3.0, -5.0]);
}
