use seishot::prelude::*;
use seishot::acquisition::receiver_line;
use seishot::export::Hdf5TraceSink;
use seishot::stability::{Element, Mesh};

/// Stand-in for the external solver process: a pulse that reaches each
/// receiver after a distance-dependent delay and decays as it spreads.
struct SyntheticSolver {
    dt: f32,
    time: f32,
    max_time: f32,
    cycle: usize,
    source: [f32; 3],
    receivers: Vec<[f32; 3]>,
    speed: f32,
}

impl SyntheticSolver {
    fn new(speed: f32) -> Self {
        Self {
            dt: 0.0,
            time: 0.0,
            max_time: f32::INFINITY,
            cycle: 0,
            source: [0.0; 3],
            receivers: Vec::new(),
            speed,
        }
    }
}

impl WaveSolver for SyntheticSolver {
    fn apply_initial_conditions(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn set_time_step(&mut self, dt: f32) -> Result<(), Error> {
        self.dt = dt;
        Ok(())
    }

    fn set_max_time(&mut self, max_time: f32) -> Result<(), Error> {
        self.max_time = max_time;
        Ok(())
    }

    fn set_source_position(&mut self, position: [f32; 3]) -> Result<(), Error> {
        self.source = position;
        Ok(())
    }

    fn set_receiver_positions(&mut self, positions: &[[f32; 3]]) -> Result<(), Error> {
        self.receivers = positions.to_vec();
        Ok(())
    }

    fn advance(&mut self) -> Result<StepOutcome, Error> {
        if self.time >= self.max_time {
            return Ok(StepOutcome::Completed);
        }
        self.time += self.dt;
        self.cycle += 1;
        Ok(StepOutcome::Continuing)
    }

    fn cycle(&self) -> Result<usize, Error> {
        Ok(self.cycle)
    }

    fn receiver_pressures(&self) -> Result<ndarray::Array1<f32>, Error> {
        Ok(self
            .receivers
            .iter()
            .map(|r| {
                let dx = r[0] - self.source[0];
                let dy = r[1] - self.source[1];
                let dz = r[2] - self.source[2];
                let distance = f32::sqrt(dx * dx + dy * dy + dz * dz);
                let delay = self.time - distance / self.speed;
                f32::exp(-500.0 * delay * delay) / (1.0 + distance)
            })
            .collect())
    }

    fn trace_output_enabled(&self) -> Result<bool, Error> {
        Ok(true)
    }

    fn reset_transients(&mut self) -> Result<(), Error> {
        self.time = 0.0;
        Ok(())
    }
}

fn cube(origin: [f32; 3], size: f32, speed: f32) -> Element {
    let [x, y, z] = origin;
    Element {
        nodes: vec![
            [x, y, z],
            [x + size, y, z],
            [x, y + size, z],
            [x + size, y + size, z],
            [x, y, z + size],
            [x + size, y, z + size],
            [x, y + size, z + size],
            [x + size, y + size, z + size],
        ],
        speed,
        volume: size * size * size,
    }
}

fn main() {
    let speed = 1500.0; // [m / s]
    let size = 25.0; // [m]

    // a small uniform hexahedral mesh
    let mut elements = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..2 {
                elements.push(cube(
                    [size * (i as f32), size * (j as f32), size * (k as f32)],
                    size,
                    speed,
                ));
            }
        }
    }
    let mesh = Mesh { order: 1, elements };

    let dt = stable_time_step(&mesh).unwrap();
    let wavelet = ricker(0.25, dt, 10.0).unwrap(); // [s], [s], [Hz]

    let bounds = DomainBounds {
        x: [0.0, 100.0],
        y: [0.0, 100.0],
        z: [0.0, 50.0],
    };
    let receivers = receiver_line([5.0, 50.0, 25.0], [95.0, 50.0, 25.0], 24);

    let shots = vec![
        Shot::new(
            Source::new(&bounds, [25.0, 50.0, 25.0], wavelet.clone()),
            receivers.clone(),
        ),
        Shot::new(
            Source::new(&bounds, [75.0, 50.0, 25.0], wavelet.clone()),
            receivers,
        ),
    ];

    let mut survey = Survey::new(SurveyDescriptor {
        solver: SyntheticSolver::new(speed),
        shots,
    })
    .unwrap();

    println!(
        "\n-- General Survey Info --\n\
        # of shots:           {}\n\
        # of wavelet samples: {}\n\
        Δt:                   {:<9.2e} s\n",
        survey.shots().len(),
        wavelet.len(),
        dt,
    );

    let mut sink = Hdf5TraceSink::new("data/two_shot.h5", true);
    survey
        .run(RunDescriptor {
            dt,
            max_time: 0.25, // [s]
            verbose: true,
            sink: Some(&mut sink),
        })
        .unwrap();
}
