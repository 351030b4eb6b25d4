use crate::acquisition::{Shot, ShotStatus};
use crate::export::TraceSink;
use crate::{Error, StepOutcome, WaveSolver};

/// Describes a survey.
pub struct SurveyDescriptor<S: WaveSolver> {
    /// The external solver driven shot by shot.
    pub solver: S,
    /// Every shot of the acquisition, in firing order.
    pub shots: Vec<Shot>,
}

/// Describes a survey run.
pub struct RunDescriptor<'a> {
    /// The time increment handed to the solver.
    pub dt: f32,
    /// How long, in temporal units, each shot is recorded.
    pub max_time: f32,
    /// Whether or not to print information to the console.
    pub verbose: bool,
    /// Where, if anywhere, recorded traces are sent.
    pub sink: Option<&'a mut dyn TraceSink>,
}

/// The main `struct` of the framework.
///
/// Owns the shot list and drives the shared solver through every shot in
/// order: configure geometry, step until the shot's budget is exhausted,
/// export the traces, reset the solver's transient state, move on.
pub struct Survey<S: WaveSolver> {
    solver: S,
    shots: Vec<Shot>,
}

impl<S: WaveSolver> Survey<S> {
    /// Creates a new `Survey` instance.
    #[inline]
    pub fn new(desc: SurveyDescriptor<S>) -> Result<Self, Error> {
        if desc.shots.is_empty() {
            return Err(Error::NoShots);
        }

        Ok(Self {
            solver: desc.solver,
            shots: desc.shots,
        })
    }

    /// The shots of the survey with their current lifecycle flags,
    /// inspectable after a run ends either way.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// The underlying solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Runs every shot to completion against the solver.
    ///
    /// Returns `Ok(())` once all shots are `Done`. If the solver reaches
    /// its own termination condition first, the run stops with
    /// [`Error::SolverCompletedPrematurely`] and the shot flags are left
    /// exactly as they were at that point.
    #[inline]
    pub fn run(&mut self, desc: RunDescriptor) -> Result<(), Error> {
        if desc.dt <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "time step",
                value: desc.dt,
            });
        }
        if desc.max_time <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "max time",
                value: desc.max_time,
            });
        }
        let max_steps = (desc.max_time / desc.dt).floor() as usize;
        if max_steps == 0 {
            return Err(Error::EmptyRecordWindow {
                max_time: desc.max_time,
                dt: desc.dt,
            });
        }
        let mut sink = desc.sink;

        self.solver.apply_initial_conditions()?;
        self.solver.set_time_step(desc.dt)?;
        // one step past the budget so the terminal row is always reachable
        self.solver.set_max_time(((max_steps + 1) as f32) * desc.dt)?;

        // setup output if verbose
        let bar = if desc.verbose {
            println!(
                "# of shots: {}\n# of time steps per shot: {}",
                self.shots.len(),
                max_steps,
            );
            Some(indicatif::ProgressBar::new(
                (self.shots.len() * max_steps) as u64,
            ))
        } else {
            None
        };

        let mut ishot = 0;
        let mut pressures = self.configure_shot(ishot, max_steps, desc.verbose)?;

        loop {
            if self.shots.iter().all(|shot| shot.status() == ShotStatus::Done) {
                break;
            }
            if self.solver.advance()? == StepOutcome::Completed {
                let finished = self
                    .shots
                    .iter()
                    .filter(|shot| shot.status() == ShotStatus::Done)
                    .count();
                return Err(Error::SolverCompletedPrematurely {
                    finished,
                    total: self.shots.len(),
                });
            }
            if let Some(ref bar) = bar {
                bar.inc(1);
            }

            let cycle = self.solver.cycle()?;
            if cycle < (ishot + 1) * max_steps {
                // still within this shot's budget
                let snapshot = self.solver.receiver_pressures()?;
                pressures.row_mut(cycle - ishot * max_steps).assign(&snapshot);
            } else {
                // budget exhausted: record the terminal row and flush
                let snapshot = self.solver.receiver_pressures()?;
                pressures.row_mut(max_steps).assign(&snapshot);

                if self.solver.trace_output_enabled()? {
                    if let Some(ref mut sink) = sink {
                        sink.write_shot(
                            pressures.view(),
                            self.shots[ishot].receivers(),
                            ishot,
                            desc.dt,
                        )?;
                    }
                }
                self.shots[ishot].set_status(ShotStatus::Done);

                // the solver is reused, so residual state must not carry over
                self.solver.reset_transients()?;

                ishot += 1;
                if ishot < self.shots.len() {
                    pressures = self.configure_shot(ishot, max_steps, desc.verbose)?;
                }
                if desc.verbose {
                    print_flags(&self.shots);
                }
            }
        }

        if let Some(ref bar) = bar {
            bar.finish();
        }

        Ok(())
    }

    /// Pushes a shot's geometry into the solver, marks it `InProgress`,
    /// and hands back a zeroed trace buffer sized for its receivers.
    fn configure_shot(
        &mut self,
        ishot: usize,
        max_steps: usize,
        verbose: bool,
    ) -> Result<ndarray::Array2<f32>, Error> {
        let shot = &mut self.shots[ishot];

        self.solver.set_source_position(shot.source().position())?;
        self.solver.set_receiver_positions(shot.receivers())?;
        shot.set_status(ShotStatus::InProgress);

        if !shot.source().is_inside_domain() {
            eprintln!(
                "warning: shot {} source at {:?} lies outside the simulation domain",
                ishot,
                shot.source().position(),
            );
        }
        if verbose {
            println!(
                "shot {}: source at {:?}, {} receivers",
                ishot,
                shot.source().position(),
                shot.receiver_count(),
            );
        }

        Ok(ndarray::Array2::zeros((max_steps + 1, shot.receiver_count())))
    }
}

fn print_flags(shots: &[Shot]) {
    let flags = shots
        .iter()
        .map(|shot| match shot.status() {
            ShotStatus::Pending => "pending",
            ShotStatus::InProgress => "in progress",
            ShotStatus::Done => "done",
        })
        .collect::<Vec<_>>();
    println!("shot flags: {:?}", flags);
}
