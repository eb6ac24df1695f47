use parking_lot::Mutex;

use crate::backend::GpuProgramId;

/// Tracks the program currently bound on the render context, so binding
/// the same program again issues no GPU call.
#[derive(Debug, Default)]
pub struct BindingState {
    current: Mutex<Option<GpuProgramId>>,
}

impl BindingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `program` as bound. Returns `true` if it was not already.
    pub fn make_current(&self, program: GpuProgramId) -> bool {
        let mut current = self.current.lock();
        if *current == Some(program) {
            return false;
        }
        *current = Some(program);
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<GpuProgramId> {
        *self.current.lock()
    }

    /// Forgets the bound program, e.g. after external code changed it.
    pub fn invalidate(&self) {
        *self.current.lock() = None;
    }

    /// Clears the record if `program` is the one bound.
    pub(crate) fn release(&self, program: GpuProgramId) {
        let mut current = self.current.lock();
        if *current == Some(program) {
            *current = None;
        }
    }
}

/// Population counters of one program since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub scene_populations: u32,
    pub node_populations: u32,
    pub draw_populations: u32,
    /// Uniform writes that reached the backend.
    pub writes_issued: u32,
    /// Uniform writes skipped because the value was unchanged.
    pub writes_suppressed: u32,
    pub defaults_substituted: u32,
}
