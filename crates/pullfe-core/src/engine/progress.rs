/// Events emitted by the workflows while they run.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A batch of `total` trajectories is about to be loaded.
    LoadStart { total: u64 },
    /// The trajectory with this directory index was loaded into `(repeat, slot)`.
    TrajectoryLoaded {
        index: usize,
        repeat: usize,
        slot: usize,
    },
    LoadFinish,

    /// A figure or table was written to disk.
    OutputWritten { path: String },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional front-end callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
