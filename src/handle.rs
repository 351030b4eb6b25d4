//! Stringly-typed access to the external solver process.
//!
//! The real solver exposes its state as named fields addressed by path
//! strings. Everything path-shaped lives in this one module: the driver
//! only ever sees the typed [`WaveSolver`] trait, implemented here by
//! [`NamedFieldSolver`] on top of a raw [`SolverHandle`].

use crate::{Error, StepOutcome, WaveSolver};

/// Field paths understood by the acoustic solver process.
pub mod paths {
    pub const SOURCE_COORDINATES: &str = "Solvers/acousticSolver/sourceCoordinates";
    pub const RECEIVER_COORDINATES: &str = "Solvers/acousticSolver/receiverCoordinates";
    pub const RECEIVER_PRESSURES: &str = "Solvers/acousticSolver/pressureAtReceivers";
    pub const OUTPUT_TRACES: &str = "Solvers/acousticSolver/outputTraces";
    pub const TIME_STEP: &str = "Events/solverApplications/forceDt";
    pub const MAX_TIME: &str = "Events/maxTime";
    pub const CYCLE: &str = "Events/lastCycle";
    pub const TIME: &str = "Events/time";
    pub const PRESSURE_NM1: &str = "domain/nodeManager/pressure_nm1";
    pub const PRESSURE_N: &str = "domain/nodeManager/pressure_n";
    pub const PRESSURE_NP1: &str = "domain/nodeManager/pressure_np1";
}

/// Raw named-field interface of the external solver.
///
/// An unknown or inaccessible path surfaces as [`Error::FieldAccess`].
pub trait SolverHandle {
    fn read_scalar(&self, path: &str) -> Result<f32, Error>;
    fn write_scalar(&mut self, path: &str, value: f32) -> Result<(), Error>;
    /// Reads the current step counter kind of field.
    fn read_index(&self, path: &str) -> Result<usize, Error>;
    fn read_array(&self, path: &str) -> Result<ndarray::Array2<f32>, Error>;
    fn write_array(&mut self, path: &str, values: ndarray::ArrayView2<f32>)
        -> Result<(), Error>;
    /// Resizes a resizable array field to `rows` rows.
    fn resize_rows(&mut self, path: &str, rows: usize) -> Result<(), Error>;
    /// Overwrites every entry of an array field with `value`.
    fn fill_array(&mut self, path: &str, value: f32) -> Result<(), Error>;
    fn advance(&mut self) -> Result<StepOutcome, Error>;
    fn apply_initial_conditions(&mut self) -> Result<(), Error>;
}

/// Adapts a [`SolverHandle`] to the typed [`WaveSolver`] interface.
pub struct NamedFieldSolver<H: SolverHandle> {
    handle: H,
}

impl<H: SolverHandle> NamedFieldSolver<H> {
    /// Creates a new `NamedFieldSolver` instance.
    #[inline]
    pub fn new(handle: H) -> Self {
        Self { handle }
    }

    pub fn into_inner(self) -> H {
        self.handle
    }
}

impl<H: SolverHandle> WaveSolver for NamedFieldSolver<H> {
    fn apply_initial_conditions(&mut self) -> Result<(), Error> {
        self.handle.apply_initial_conditions()
    }

    fn set_time_step(&mut self, dt: f32) -> Result<(), Error> {
        self.handle.write_scalar(paths::TIME_STEP, dt)
    }

    fn set_max_time(&mut self, max_time: f32) -> Result<(), Error> {
        self.handle.write_scalar(paths::MAX_TIME, max_time)
    }

    fn set_source_position(&mut self, position: [f32; 3]) -> Result<(), Error> {
        let coords = ndarray::Array2::from_shape_fn((1, 3), |(_, i)| position[i]);
        self.handle.write_array(paths::SOURCE_COORDINATES, coords.view())
    }

    fn set_receiver_positions(&mut self, positions: &[[f32; 3]]) -> Result<(), Error> {
        self.handle.resize_rows(paths::RECEIVER_COORDINATES, positions.len())?;
        let coords = ndarray::Array2::from_shape_fn((positions.len(), 3), |(n, i)| {
            positions[n][i]
        });
        self.handle.write_array(paths::RECEIVER_COORDINATES, coords.view())
    }

    fn advance(&mut self) -> Result<StepOutcome, Error> {
        self.handle.advance()
    }

    fn cycle(&self) -> Result<usize, Error> {
        self.handle.read_index(paths::CYCLE)
    }

    fn receiver_pressures(&self) -> Result<ndarray::Array1<f32>, Error> {
        // the snapshot field is notionally 1 x N; flatten whatever comes back
        let pressures = self.handle.read_array(paths::RECEIVER_PRESSURES)?;
        Ok(pressures.iter().copied().collect())
    }

    fn trace_output_enabled(&self) -> Result<bool, Error> {
        Ok(self.handle.read_scalar(paths::OUTPUT_TRACES)? != 0.0)
    }

    fn reset_transients(&mut self) -> Result<(), Error> {
        self.handle.write_scalar(paths::TIME, 0.0)?;
        self.handle.fill_array(paths::PRESSURE_NM1, 0.0)?;
        self.handle.fill_array(paths::PRESSURE_N, 0.0)?;
        self.handle.fill_array(paths::PRESSURE_NP1, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory field store with the layout of the real solver process.
    struct MapHandle {
        scalars: HashMap<&'static str, f32>,
        arrays: HashMap<&'static str, ndarray::Array2<f32>>,
        cycle: usize,
        initialized: bool,
    }

    impl MapHandle {
        fn new() -> Self {
            let mut scalars = HashMap::new();
            scalars.insert(paths::TIME_STEP, 0.0);
            scalars.insert(paths::MAX_TIME, 0.0);
            scalars.insert(paths::TIME, 0.0);
            scalars.insert(paths::OUTPUT_TRACES, 1.0);

            let mut arrays = HashMap::new();
            arrays.insert(paths::SOURCE_COORDINATES, ndarray::Array2::zeros((1, 3)));
            arrays.insert(paths::RECEIVER_COORDINATES, ndarray::Array2::zeros((0, 3)));
            arrays.insert(paths::RECEIVER_PRESSURES, ndarray::Array2::zeros((1, 0)));
            arrays.insert(paths::PRESSURE_NM1, ndarray::Array2::ones((16, 1)));
            arrays.insert(paths::PRESSURE_N, ndarray::Array2::ones((16, 1)));
            arrays.insert(paths::PRESSURE_NP1, ndarray::Array2::ones((16, 1)));

            Self {
                scalars,
                arrays,
                cycle: 0,
                initialized: false,
            }
        }

        fn missing(path: &str) -> Error {
            Error::FieldAccess {
                path: path.to_string(),
            }
        }
    }

    impl SolverHandle for MapHandle {
        fn read_scalar(&self, path: &str) -> Result<f32, Error> {
            self.scalars.get(path).copied().ok_or_else(|| Self::missing(path))
        }

        fn write_scalar(&mut self, path: &str, value: f32) -> Result<(), Error> {
            match self.scalars.get_mut(path) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(Self::missing(path)),
            }
        }

        fn read_index(&self, path: &str) -> Result<usize, Error> {
            if path == paths::CYCLE {
                Ok(self.cycle)
            } else {
                Err(Self::missing(path))
            }
        }

        fn read_array(&self, path: &str) -> Result<ndarray::Array2<f32>, Error> {
            self.arrays.get(path).cloned().ok_or_else(|| Self::missing(path))
        }

        fn write_array(
            &mut self,
            path: &str,
            values: ndarray::ArrayView2<f32>,
        ) -> Result<(), Error> {
            match self.arrays.get_mut(path) {
                Some(array) => {
                    *array = values.to_owned();
                    Ok(())
                }
                None => Err(Self::missing(path)),
            }
        }

        fn resize_rows(&mut self, path: &str, rows: usize) -> Result<(), Error> {
            match self.arrays.get_mut(path) {
                Some(array) => {
                    *array = ndarray::Array2::zeros((rows, array.ncols()));
                    Ok(())
                }
                None => Err(Self::missing(path)),
            }
        }

        fn fill_array(&mut self, path: &str, value: f32) -> Result<(), Error> {
            match self.arrays.get_mut(path) {
                Some(array) => {
                    array.fill(value);
                    Ok(())
                }
                None => Err(Self::missing(path)),
            }
        }

        fn advance(&mut self) -> Result<StepOutcome, Error> {
            self.cycle += 1;
            Ok(StepOutcome::Continuing)
        }

        fn apply_initial_conditions(&mut self) -> Result<(), Error> {
            self.initialized = true;
            Ok(())
        }
    }

    #[test]
    fn geometry_writes_land_on_the_right_fields() {
        let mut solver = NamedFieldSolver::new(MapHandle::new());
        solver.set_source_position([1.0, 2.0, 3.0]).unwrap();
        solver
            .set_receiver_positions(&[[0.0, 0.0, 0.5], [10.0, 0.0, 0.5]])
            .unwrap();

        let handle = solver.into_inner();
        assert_eq!(
            handle.arrays[paths::SOURCE_COORDINATES],
            ndarray::arr2(&[[1.0, 2.0, 3.0]]),
        );
        assert_eq!(
            handle.arrays[paths::RECEIVER_COORDINATES],
            ndarray::arr2(&[[0.0, 0.0, 0.5], [10.0, 0.0, 0.5]]),
        );
    }

    #[test]
    fn reset_zeroes_the_three_time_levels_and_the_clock() {
        let mut solver = NamedFieldSolver::new(MapHandle::new());
        solver.apply_initial_conditions().unwrap();
        solver.set_time_step(0.001).unwrap();
        solver.advance().unwrap();
        solver.reset_transients().unwrap();

        assert_eq!(solver.cycle().unwrap(), 1, "the cycle counter must survive");

        let handle = solver.into_inner();
        assert!(handle.initialized);
        assert_eq!(handle.scalars[paths::TIME], 0.0);
        for path in [paths::PRESSURE_NM1, paths::PRESSURE_N, paths::PRESSURE_NP1] {
            assert!(handle.arrays[path].iter().all(|&p| p == 0.0), "{}", path);
        }
    }

    #[test]
    fn the_snapshot_is_flattened_to_one_value_per_receiver() {
        let mut handle = MapHandle::new();
        handle
            .arrays
            .insert(paths::RECEIVER_PRESSURES, ndarray::arr2(&[[4.0, 5.0, 6.0]]));
        let solver = NamedFieldSolver::new(handle);
        assert_eq!(
            solver.receiver_pressures().unwrap(),
            ndarray::arr1(&[4.0, 5.0, 6.0]),
        );
    }

    #[test]
    fn unknown_paths_surface_as_field_access_errors() {
        let mut handle = MapHandle::new();
        handle.scalars.remove(paths::OUTPUT_TRACES);
        let solver = NamedFieldSolver::new(handle);
        assert!(matches!(
            solver.trace_output_enabled(),
            Err(Error::FieldAccess { .. }),
        ));
    }
}
