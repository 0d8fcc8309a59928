//! Discrete Fourier analysis of sampled coordinate sequences.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::f64::consts::PI;

/// A single frequency component of a discrete Fourier transform.
///
/// The polar fields are derived from the rectangular ones at creation:
/// `amplitude` is `(real² + imaginary²)^½` and `phase` is `atan2(imaginary, real)`.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyComponent {
    /// The frequency index (full rotations per revolution of the animation).
    pub frequency: usize,

    /// The real part of the complex coefficient.
    pub real: f64,

    /// The imaginary part of the complex coefficient.
    pub imaginary: f64,

    /// The magnitude of the coefficient (the radius of the epicycle).
    pub amplitude: f64,

    /// The angle of the coefficient (the starting angle of the epicycle).
    pub phase: f64,
}

/// Compute the discrete Fourier transform of a sequence of samples.
///
/// This is the direct O(N²) transform; the sequence length need not be a power
/// of two. Coefficients are normalized by the sequence length, so the zero
/// frequency component is the arithmetic mean of the samples. The components
/// are returned in ascending frequency order.
///
/// A single-sample sequence is a valid degenerate case (one constant
/// component); an empty sequence or a non-finite sample is a caller bug.
pub fn transform(sequence: &[f64]) -> Vec<FrequencyComponent> {
    if sequence.is_empty() {
        panic!("empty sample sequence");
    }

    for sample in sequence.iter() {
        if !sample.is_finite() {
            panic!("non-finite sample: {}", sample);
        }
    }

    let samples_count = sequence.len() as f64;
    (0..sequence.len())
        .map(|frequency| {
            let mut real = 0.0;
            let mut imaginary = 0.0;
            for (index, sample) in sequence.iter().enumerate() {
                let angle = 2.0 * PI * frequency as f64 * index as f64 / samples_count;
                real += sample * angle.cos();
                imaginary -= sample * angle.sin();
            }
            real /= samples_count;
            imaginary /= samples_count;
            FrequencyComponent {
                frequency,
                real,
                imaginary,
                amplitude: real.hypot(imaginary),
                phase: imaginary.atan2(real),
            }
        })
        .collect()
}

#[cfg(test)]
#[test]
fn test_transform_constant_sequence() {
    let components = transform(&[7.5, 7.5, 7.5, 7.5]);
    assert_eq!(components.len(), 4);

    assert_eq!(components[0].frequency, 0);
    assert_float_absolute_eq!(components[0].amplitude, 7.5, 1e-9);
    assert_float_absolute_eq!(components[0].phase, 0.0, 1e-9);

    for component in components[1..].iter() {
        assert_float_absolute_eq!(component.amplitude, 0.0, 1e-9);
    }
}

#[cfg(test)]
#[test]
fn test_transform_square_wave() {
    // A period-6 square wave concentrates its energy at the odd frequencies;
    // the normalized amplitudes are 400/3 at 1 and 5 and 200/3 at 3.
    let components = transform(&[200.0, 200.0, 200.0, -200.0, -200.0, -200.0]);
    assert_eq!(components.len(), 6);

    assert_float_absolute_eq!(components[0].amplitude, 0.0, 1e-9);
    assert_float_absolute_eq!(components[1].amplitude, 400.0 / 3.0, 1e-9);
    assert_float_absolute_eq!(components[2].amplitude, 0.0, 1e-9);
    assert_float_absolute_eq!(components[3].amplitude, 200.0 / 3.0, 1e-9);
    assert_float_absolute_eq!(components[4].amplitude, 0.0, 1e-9);
    assert_float_absolute_eq!(components[5].amplitude, 400.0 / 3.0, 1e-9);

    assert_float_absolute_eq!(components[1].phase, -PI / 3.0, 1e-9);
    assert_float_absolute_eq!(components[3].phase, 0.0, 1e-9);
    assert_float_absolute_eq!(components[5].phase, PI / 3.0, 1e-9);
}

#[cfg(test)]
#[test]
fn test_transform_single_sample() {
    let components = transform(&[3.0]);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].frequency, 0);
    assert_float_absolute_eq!(components[0].real, 3.0, 1e-9);
    assert_float_absolute_eq!(components[0].imaginary, 0.0, 1e-9);
    assert_float_absolute_eq!(components[0].amplitude, 3.0, 1e-9);
    assert_float_absolute_eq!(components[0].phase, 0.0, 1e-9);
}

#[cfg(test)]
#[test]
fn test_transform_polar_identities() {
    let components = transform(&[1.0, -2.0, 4.0, 8.0, -16.0]);
    for component in components.iter() {
        assert_float_absolute_eq!(
            component.amplitude,
            (component.real * component.real + component.imaginary * component.imaginary).sqrt(),
            1e-12
        );
        assert_float_absolute_eq!(
            component.phase,
            component.imaginary.atan2(component.real),
            1e-12
        );
    }
}

#[cfg(test)]
#[test]
#[should_panic(expected = "empty sample sequence")]
fn test_transform_empty_sequence() {
    transform(&[]);
}

#[cfg(test)]
#[test]
#[should_panic(expected = "non-finite sample")]
fn test_transform_non_finite_sample() {
    transform(&[1.0, f64::NAN, 3.0]);
}

/// Reorder components by descending amplitude, so the largest epicycle comes
/// first in the drawn chain.
///
/// The sort is stable and amplitude ties keep their ascending frequency order.
/// Only the chain visualization depends on the order; the reconstructed sum
/// does not.
pub fn sort_by_amplitude_descending(components: &mut [FrequencyComponent]) {
    components.sort_by_key(|component| Reverse(OrderedFloat(component.amplitude)));
}

#[cfg(test)]
#[test]
fn test_sort_by_amplitude_descending() {
    let mut components = transform(&[200.0, 200.0, 200.0, -200.0, -200.0, -200.0]);
    let amplitudes_sum: f64 = components.iter().map(|component| component.amplitude).sum();

    sort_by_amplitude_descending(&mut components);

    for pair in components.windows(2) {
        assert!(pair[0].amplitude >= pair[1].amplitude);
        if pair[0].amplitude == pair[1].amplitude {
            assert!(pair[0].frequency < pair[1].frequency);
        }
    }

    let mut leading: Vec<usize> = components[..2]
        .iter()
        .map(|component| component.frequency)
        .collect();
    leading.sort_unstable();
    assert_eq!(leading, vec![1, 5]);
    assert_eq!(components[2].frequency, 3);

    let mut frequencies: Vec<usize> = components
        .iter()
        .map(|component| component.frequency)
        .collect();
    frequencies.sort_unstable();
    assert_eq!(frequencies, vec![0, 1, 2, 3, 4, 5]);

    let sorted_amplitudes_sum: f64 = components.iter().map(|component| component.amplitude).sum();
    assert_float_absolute_eq!(sorted_amplitudes_sum, amplitudes_sum, 1e-9);
}
