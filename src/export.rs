//! Trace export.

use std::path::Path;

use crate::Error;

/// Receives one shot's recorded traces and persists them.
///
/// The driver hands over the full pressure table, the receiver coordinates
/// of the shot that produced it, the shot index, and the step spacing; the
/// on-disk layout is the sink's business.
pub trait TraceSink {
    fn write_shot(
        &mut self,
        pressures: ndarray::ArrayView2<f32>,
        receivers: &[[f32; 3]],
        shot_index: usize,
        step_spacing: f32,
    ) -> Result<(), Error>;
}

/// Writes each shot's traces into a group of an HDF5 file.
///
/// Group `shot<N>` holds a `pressure` dataset of shape
/// `(steps + 1, receivers)`, a `receivers` coordinate dataset of shape
/// `(receivers, 3)`, and a scalar `step_spacing` attribute.
pub struct Hdf5TraceSink<P: AsRef<Path>> {
    filename: P,
    overwrite: bool,
    created: bool,
}

impl<P: AsRef<Path>> Hdf5TraceSink<P> {
    /// Creates a new `Hdf5TraceSink` instance. The file itself is only
    /// touched on the first write.
    #[inline]
    pub fn new(filename: P, overwrite: bool) -> Self {
        Self {
            filename,
            overwrite,
            created: false,
        }
    }
}

impl<P: AsRef<Path>> TraceSink for Hdf5TraceSink<P> {
    fn write_shot(
        &mut self,
        pressures: ndarray::ArrayView2<f32>,
        receivers: &[[f32; 3]],
        shot_index: usize,
        step_spacing: f32,
    ) -> Result<(), Error> {
        let filename = self.filename.as_ref();
        let file = if !self.created && (self.overwrite || !filename.exists()) {
            hdf5::File::create(filename)?
        } else {
            hdf5::File::open_rw(filename)?
        };
        self.created = true;

        let group = file.create_group(&format!("shot{}", shot_index))?;

        group
            .new_dataset::<f32>()
            .shape(pressures.dim())
            .create("pressure")?
            .write(pressures)?;

        let coords =
            ndarray::Array2::from_shape_fn((receivers.len(), 3), |(n, i)| receivers[n][i]);
        group
            .new_dataset::<f32>()
            .shape(coords.dim())
            .create("receivers")?
            .write(coords.view())?;

        let spacing_attr = group
            .new_attr::<f32>()
            .shape(hdf5::Extents::Scalar)
            .create("step_spacing");
        if let Ok(attr) = spacing_attr {
            attr.write_scalar(&step_spacing)?;
        }

        file.close()?;

        Ok(())
    }
}
