//! Sources, receivers, and shots of a seismic acquisition.

/// The simulation domain bounding box as three closed `[min, max]` intervals.
#[derive(Copy, Clone, Debug)]
pub struct DomainBounds {
    pub x: [f32; 2],
    pub y: [f32; 2],
    pub z: [f32; 2],
}

impl DomainBounds {
    /// Checks whether a position lies within the box, bounds included.
    pub fn contains(&self, position: [f32; 3]) -> bool {
        self.x[0] <= position[0]
            && position[0] <= self.x[1]
            && self.y[0] <= position[1]
            && position[1] <= self.y[1]
            && self.z[0] <= position[2]
            && position[2] <= self.z[1]
    }
}

/// A point excitation for one shot.
///
/// Immutable once constructed; the domain flag is computed up front so a
/// misplaced source can be diagnosed before the solver ever steps.
pub struct Source {
    position: [f32; 3],
    wavelet: Vec<f32>,
    inside_domain: bool,
}

impl Source {
    /// Creates a new `Source` instance.
    #[inline]
    pub fn new(bounds: &DomainBounds, position: [f32; 3], wavelet: Vec<f32>) -> Self {
        Self {
            position,
            wavelet,
            inside_domain: bounds.contains(position),
        }
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Whether the source lies within the simulation domain. A source
    /// outside the domain is loaded anyway, but flagged.
    pub fn is_inside_domain(&self) -> bool {
        self.inside_domain
    }

    /// The excitation signal, one amplitude sample per time step.
    pub fn wavelet(&self) -> &[f32] {
        &self.wavelet
    }
}

/// Lifecycle flag of a shot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShotStatus {
    Pending,
    InProgress,
    Done,
}

/// One source paired with the receiver layout that records it.
pub struct Shot {
    source: Source,
    receivers: Vec<[f32; 3]>,
    status: ShotStatus,
}

impl Shot {
    /// Creates a new `Shot` instance, initially `Pending`.
    #[inline]
    pub fn new(source: Source, receivers: Vec<[f32; 3]>) -> Self {
        Self {
            source,
            receivers,
            status: ShotStatus::Pending,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn receivers(&self) -> &[[f32; 3]] {
        &self.receivers
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    pub fn status(&self) -> ShotStatus {
        self.status
    }

    /// Overwrites the lifecycle flag. The driver only ever moves it
    /// forward; that is not enforced here.
    pub fn set_status(&mut self, status: ShotStatus) {
        self.status = status;
    }
}

/// Lays out `count` equispaced receivers on the segment from `start` to
/// `end`. A single receiver is placed at `start`.
pub fn receiver_line(start: [f32; 3], end: [f32; 3], count: usize) -> Vec<[f32; 3]> {
    (0..count)
        .map(|n| {
            let s = if count > 1 {
                (n as f32) / ((count - 1) as f32)
            } else {
                0.0
            };
            [
                start[0] + s * (end[0] - start[0]),
                start[1] + s * (end[1] - start[1]),
                start[2] + s * (end[2] - start[2]),
            ]
        })
        .collect()
}
