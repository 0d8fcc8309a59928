//! Epicycle reconstruction of a transformed path.

use crate::fourier::FrequencyComponent;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;
use std::time::Instant;
use svg2polylines::CoordinatePair as Point;
use svg2polylines::Polyline;

/// A monotonic source of elapsed milliseconds, used for pause timing.
pub trait Clock {
    /// Milliseconds elapsed since some fixed origin.
    fn now_millis(&self) -> f64;
}

/// A clock backed by the process monotonic clock.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Accumulate the chain of epicycle cursor positions at a given time.
///
/// The cursor is seeded at the origin and advanced once per component, in the
/// component set's current order. The returned polyline holds every cursor
/// position: point `i` is the center of circle `i` (whose radius is that
/// component's amplitude) and the last point is the reconstructed position.
///
/// The final point does not depend on the component order; the intermediate
/// chain does, which is why sets are usually sorted by descending amplitude
/// before drawing.
pub fn epicycle_chain(
    origin: Point,
    components: &[FrequencyComponent],
    rotation: f64,
    time: f64,
) -> Polyline {
    let mut chain = Vec::with_capacity(components.len() + 1);
    let mut cursor = origin;
    chain.push(cursor);
    for component in components.iter() {
        let angle = component.frequency as f64 * time + component.phase + rotation;
        cursor.x += component.amplitude * angle.cos();
        cursor.y += component.amplitude * angle.sin();
        chain.push(cursor);
    }
    chain
}

/// The position reconstructed from a component set at a given time.
pub fn epicycle_position(
    origin: Point,
    components: &[FrequencyComponent],
    rotation: f64,
    time: f64,
) -> Point {
    *epicycle_chain(origin, components, rotation, time).last().unwrap()
}

/// Options for controlling a reconstruction.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// The origin of the chain reconstructing the X coordinate.
    pub x_origin: Point,

    /// The origin of the chain reconstructing the Y coordinate.
    pub y_origin: Point,

    /// The rotation offset (in radians) applied to every X chain component.
    pub x_rotation: f64,

    /// The rotation offset (in radians) applied to every Y chain component.
    pub y_rotation: f64,

    /// How long to pause at the end of each revolution (in milliseconds).
    pub pause_millis: f64,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            x_origin: Point { x: 0.0, y: 0.0 },
            y_origin: Point { x: 0.0, y: 0.0 },
            x_rotation: 0.0,
            y_rotation: FRAC_PI_2,
            pause_millis: 1000.0,
        }
    }
}

impl Options {
    /// Ensure the options are valid.
    pub fn validate(&self) {
        if !self.pause_millis.is_finite() || self.pause_millis < 0.0 {
            panic!("pause-millis {} is not a non-negative duration", self.pause_millis);
        }

        if !self.x_rotation.is_finite() {
            panic!("x-rotation {} is not finite", self.x_rotation);
        }

        if !self.y_rotation.is_finite() {
            panic!("y-rotation {} is not finite", self.y_rotation);
        }
    }
}

/// The geometry emitted by a single animation tick.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The reconstructed path position (the last one while paused).
    pub position: Point,

    /// The cursor chain reconstructing the X coordinate (empty while paused).
    pub x_chain: Polyline,

    /// The cursor chain reconstructing the Y coordinate (empty while paused).
    pub y_chain: Polyline,

    /// Whether the animation is pausing at the end of a revolution.
    pub paused: bool,
}

/// The state of an epicycle animation.
///
/// One `tick` per animation frame advances the phase by `2π / N` so that
/// exactly N ticks complete a revolution. At the end of a revolution the
/// animation pauses, keeps exposing the traced path, and once the pause
/// duration elapses clears the trace and starts the next revolution.
#[derive(Debug)]
pub struct Animation {
    x_components: Vec<FrequencyComponent>,
    y_components: Vec<FrequencyComponent>,
    options: Options,
    time: f64,
    time_step: f64,
    ticks: usize,
    trace: Polyline,
    paused: bool,
    pause_started_at: f64,
}

impl Animation {
    /// Create an animation from one component set per axis.
    ///
    /// The two sets must come from coordinate sequences of the same length,
    /// so they always have the same number of components.
    pub fn new(
        x_components: Vec<FrequencyComponent>,
        y_components: Vec<FrequencyComponent>,
        options: Options,
    ) -> Animation {
        if x_components.is_empty() {
            panic!("no frequency components");
        }

        if x_components.len() != y_components.len() {
            panic!(
                "mismatched component counts: {} X vs {} Y",
                x_components.len(),
                y_components.len()
            );
        }

        options.validate();

        let time_step = 2.0 * PI / x_components.len() as f64;
        Animation {
            x_components,
            y_components,
            options,
            time: 0.0,
            time_step,
            ticks: 0,
            trace: Vec::new(),
            paused: false,
            pause_started_at: 0.0,
        }
    }

    /// The number of ticks in one full revolution.
    pub fn ticks_per_revolution(&self) -> usize {
        self.x_components.len()
    }

    /// The current phase, in radians since the start of the revolution.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether the animation is pausing at the end of a revolution.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The positions traced so far, most recent first.
    pub fn trace(&self) -> &[Point] {
        &self.trace
    }

    /// Advance the animation by one tick and return the frame to draw.
    ///
    /// While paused no new position is computed; the frame repeats the last
    /// traced position and the resume condition is evaluated against the
    /// clock. The tick on which the pause elapses resets the phase and the
    /// trace without emitting a new position.
    pub fn tick(&mut self, clock: &dyn Clock) -> Frame {
        if self.paused {
            let position = self.trace[0];
            if clock.now_millis() - self.pause_started_at > self.options.pause_millis {
                self.paused = false;
                self.time = 0.0;
                self.ticks = 0;
                self.trace.clear();
            }
            return Frame {
                position,
                x_chain: Vec::new(),
                y_chain: Vec::new(),
                paused: self.paused,
            };
        }

        let x_chain = epicycle_chain(
            self.options.x_origin,
            &self.x_components,
            self.options.x_rotation,
            self.time,
        );
        let y_chain = epicycle_chain(
            self.options.y_origin,
            &self.y_components,
            self.options.y_rotation,
            self.time,
        );

        let position = Point {
            x: x_chain.last().unwrap().x,
            y: y_chain.last().unwrap().y,
        };
        self.trace.insert(0, position);

        self.time += self.time_step;
        self.ticks += 1;
        if self.ticks >= self.ticks_per_revolution() {
            self.paused = true;
            self.pause_started_at = clock.now_millis();
        }

        Frame {
            position,
            x_chain,
            y_chain,
            paused: self.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourier::sort_by_amplitude_descending;
    use crate::fourier::transform;
    use std::cell::Cell;
    use std::f64::consts::PI;

    /// A clock advanced by hand, so pause timing needs no wall-clock waits.
    struct ManualClock {
        millis: Cell<f64>,
    }

    impl ManualClock {
        fn new() -> ManualClock {
            ManualClock {
                millis: Cell::new(0.0),
            }
        }

        fn advance_to(&self, millis: f64) {
            self.millis.set(millis);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> f64 {
            self.millis.get()
        }
    }

    fn assert_point(point: Point, x: f64, y: f64) {
        assert_float_absolute_eq!(point.x, x, 1e-9);
        assert_float_absolute_eq!(point.y, y, 1e-9);
    }

    #[test]
    fn test_chain_geometry() {
        let components = transform(&[10.0, -10.0, 10.0, -10.0]);
        let origin = Point { x: 3.0, y: 4.0 };

        let chain = epicycle_chain(origin, &components, 0.0, 0.0);
        assert_eq!(chain.len(), components.len() + 1);
        assert_point(chain[0], origin.x, origin.y);

        let position = epicycle_position(origin, &components, 0.0, 0.0);
        let last = *chain.last().unwrap();
        assert_point(last, position.x, position.y);

        for (index, component) in components.iter().enumerate() {
            let angle = component.phase;
            assert_float_absolute_eq!(
                chain[index + 1].x - chain[index].x,
                component.amplitude * angle.cos(),
                1e-9
            );
            assert_float_absolute_eq!(
                chain[index + 1].y - chain[index].y,
                component.amplitude * angle.sin(),
                1e-9
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let xs = vec![12.0, -3.5, 7.25, 0.5, -9.0, 4.0, 1.0];
        let ys = vec![-2.0, 8.0, 3.0, -6.5, 0.25, 11.0, -4.0];

        let x_components = transform(&xs);
        let y_components = transform(&ys);
        let mut animation = Animation::new(x_components, y_components, Options::default());
        let clock = ManualClock::new();

        for index in 0..xs.len() {
            let frame = animation.tick(&clock);
            assert_point(frame.position, xs[index], ys[index]);
        }
    }

    #[test]
    fn test_round_trip_is_order_independent() {
        let xs = vec![12.0, -3.5, 7.25, 0.5, -9.0, 4.0, 1.0];
        let ys = vec![-2.0, 8.0, 3.0, -6.5, 0.25, 11.0, -4.0];

        let mut x_components = transform(&xs);
        let mut y_components = transform(&ys);
        sort_by_amplitude_descending(&mut x_components);
        sort_by_amplitude_descending(&mut y_components);

        let mut animation = Animation::new(x_components, y_components, Options::default());
        let clock = ManualClock::new();

        for index in 0..xs.len() {
            let frame = animation.tick(&clock);
            assert_point(frame.position, xs[index], ys[index]);
        }
    }

    #[test]
    fn test_cycle_closure() {
        let samples = vec![200.0, 200.0, 200.0, -200.0, -200.0, -200.0];
        let components = transform(&samples);
        let mut animation =
            Animation::new(components.clone(), components, Options::default());
        let clock = ManualClock::new();

        for tick_index in 0..samples.len() {
            assert!(!animation.is_paused());
            let frame = animation.tick(&clock);
            assert_eq!(frame.paused, tick_index == samples.len() - 1);
        }

        assert!(animation.is_paused());
        assert_float_absolute_eq!(animation.time(), 2.0 * PI, 1e-9);
        assert_eq!(animation.trace().len(), samples.len());
    }

    #[test]
    fn test_pause_and_resume() {
        let samples = vec![5.0, -1.0, 2.0, -7.0];
        let components = transform(&samples);
        let mut animation =
            Animation::new(components.clone(), components, Options::default());
        let clock = ManualClock::new();

        for _ in 0..samples.len() {
            animation.tick(&clock);
        }
        assert!(animation.is_paused());
        let paused_time = animation.time();
        let last_position = animation.trace()[0];

        clock.advance_to(999.0);
        let frame = animation.tick(&clock);
        assert!(frame.paused);
        assert!(frame.x_chain.is_empty());
        assert!(frame.y_chain.is_empty());
        assert_point(frame.position, last_position.x, last_position.y);
        assert_float_absolute_eq!(animation.time(), paused_time, 1e-12);
        assert_eq!(animation.trace().len(), samples.len());

        clock.advance_to(1001.0);
        let frame = animation.tick(&clock);
        assert!(!frame.paused);
        assert!(!animation.is_paused());
        assert_eq!(animation.time(), 0.0);
        assert!(animation.trace().is_empty());

        let frame = animation.tick(&clock);
        assert_point(frame.position, samples[0], samples[0]);
        assert_eq!(animation.trace().len(), 1);
    }

    #[test]
    #[should_panic(expected = "no frequency components")]
    fn test_empty_components() {
        Animation::new(Vec::new(), Vec::new(), Options::default());
    }

    #[test]
    #[should_panic(expected = "mismatched component counts: 2 X vs 3 Y")]
    fn test_mismatched_components() {
        let two = transform(&[1.0, 2.0]);
        let three = transform(&[1.0, 2.0, 3.0]);
        Animation::new(two, three, Options::default());
    }

    #[test]
    #[should_panic(expected = "pause-millis")]
    fn test_negative_pause() {
        let components = transform(&[1.0, 2.0]);
        let options = Options {
            pause_millis: -1.0,
            ..Options::default()
        };
        Animation::new(components.clone(), components, options);
    }
}
