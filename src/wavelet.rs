//! Source time functions.

use std::f32::consts::PI;

use crate::Error;

/// Generates a Ricker pulse sampled every `dt` over `duration`.
///
/// The returned signal has exactly `floor(duration / dt)` samples. With
/// `T0 = 1 / peak_frequency`, samples at `t0 <= -0.9 T0` or `t0 >= 2.9 T0`
/// are exactly zero.
pub fn ricker(duration: f32, dt: f32, peak_frequency: f32) -> Result<Vec<f32>, Error> {
    if peak_frequency <= 0.0 {
        return Err(Error::NonPositiveParameter {
            name: "peak frequency",
            value: peak_frequency,
        });
    }
    if dt <= 0.0 {
        return Err(Error::NonPositiveParameter {
            name: "time step",
            value: dt,
        });
    }

    let period = 1.0 / peak_frequency;
    let nsamples = (duration / dt).floor() as usize;

    let mut samples = Vec::with_capacity(nsamples);
    for t in 0..nsamples {
        let t0 = dt * (t as f32);

        if t0 <= -0.9 * period || t0 >= 2.9 * period {
            samples.push(0.0);
        } else {
            let tau = peak_frequency * t0 - 1.0;
            let gaussian = f32::exp(-2.0 * (tau * PI) * (tau * PI));
            samples.push(-(t0 - 1.0) * gaussian);
        }
    }

    Ok(samples)
}
