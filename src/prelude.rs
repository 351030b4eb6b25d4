//! Includes commonly used library components.

pub use crate::{
    Error,
    RunDescriptor,
    StepOutcome,
    Survey,
    SurveyDescriptor,
    WaveSolver,
};
pub use crate::acquisition::{DomainBounds, Shot, ShotStatus, Source};
pub use crate::export::TraceSink;
pub use crate::stability::stable_time_step;
pub use crate::wavelet::ricker;
