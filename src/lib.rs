//! A framework for driving multi-shot acoustic seismic surveys against an
//! external wave-propagation solver.
//!
//! The field solve itself is a black box reached through the [`WaveSolver`]
//! trait; this crate owns the acquisition geometry, the source wavelet,
//! the stable time-step estimate, and the shot-by-shot driver loop.
//!
//! To get started, refer to the `\demos` directory in the main repository.

mod survey;

pub mod acquisition;
pub mod export;
pub mod handle;
pub mod prelude;
pub mod stability;
pub mod wavelet;

pub use survey::{RunDescriptor, Survey, SurveyDescriptor};

/// Represents an error in the survey.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{name} must be positive ( {name}: {value} )")]
    NonPositiveParameter { name: &'static str, value: f32 },
    #[error("Mesh does not contain any elements")]
    EmptyMesh,
    #[error("Mesh polynomial order is not supported \
        ( order: {0}, supported orders: 1, 3, 5 )")]
    UnsupportedOrder(u32),
    #[error("Element {index} does not have enough nodes for the mesh order \
        ( node count: {node_count}, required: {required} )")]
    BadElement {
        index: usize,
        node_count: usize,
        required: usize,
    },
    #[error("Survey does not contain any shots")]
    NoShots,
    #[error("Record window is shorter than one time step \
        ( max time: {max_time}, time step: {dt} )")]
    EmptyRecordWindow { max_time: f32, dt: f32 },
    #[error("External solver completed before the survey finished \
        ( finished shots: {finished}, total shots: {total} )")]
    SolverCompletedPrematurely { finished: usize, total: usize },
    #[error("Solver field could not be accessed ( path: {path} )")]
    FieldAccess { path: String },
    #[error("There was an error during computation")]
    ComputationError(i32),
    #[error(transparent)]
    H5Error(#[from] hdf5::Error),
}

/// Outcome of advancing the external solver by one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The solver can keep stepping.
    Continuing,
    /// The solver reached its own termination condition.
    Completed,
}

/// Typed access to the external wave solver.
///
/// The driver only ever talks to the solver through this trait; the
/// stringly-typed field lookup behind it is confined to [`handle`].
/// One solver instance is shared by every shot of a survey, which is why
/// [`reset_transients`](WaveSolver::reset_transients) exists.
pub trait WaveSolver {
    /// Applies the solver's initial conditions. Called once per run.
    fn apply_initial_conditions(&mut self) -> Result<(), Error>;

    fn set_time_step(&mut self, dt: f32) -> Result<(), Error>;

    fn set_max_time(&mut self, max_time: f32) -> Result<(), Error>;

    fn set_source_position(&mut self, position: [f32; 3]) -> Result<(), Error>;

    /// Resizes and overwrites the receiver coordinate table. The receiver
    /// count may change between shots.
    fn set_receiver_positions(&mut self, positions: &[[f32; 3]]) -> Result<(), Error>;

    /// Advances the simulation by a single step, blocking until it returns.
    fn advance(&mut self) -> Result<StepOutcome, Error>;

    /// The global step counter. Monotonically non-decreasing over a run;
    /// it is NOT reset between shots.
    fn cycle(&self) -> Result<usize, Error>;

    /// The current pressure snapshot, one value per receiver.
    fn receiver_pressures(&self) -> Result<ndarray::Array1<f32>, Error>;

    /// Whether the solver configuration asks for traces to be exported.
    fn trace_output_enabled(&self) -> Result<bool, Error>;

    /// Zeroes the transient pressure fields at all three time levels and
    /// the simulation clock. The cycle counter is left untouched.
    fn reset_transients(&mut self) -> Result<(), Error>;
}
