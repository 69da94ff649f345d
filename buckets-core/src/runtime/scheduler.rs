//! Round-robin task runner

/// A unit of cooperative work
///
/// `poll` must return promptly: it does one slice of work and yields by
/// returning.
pub trait Task<C> {
    fn name(&self) -> &'static str;

    fn poll(&mut self, ctx: &mut C, now_ms: u32);
}

/// Runs a fixed set of tasks in order, once per turn
///
/// Task order is significant: samplers go before their consumer so that an
/// edge seen in a turn is drained in that same turn.
pub struct Scheduler<'a, C, const N: usize> {
    tasks: [&'a mut dyn Task<C>; N],
    turns: u32,
}

impl<'a, C, const N: usize> Scheduler<'a, C, N> {
    pub fn new(tasks: [&'a mut dyn Task<C>; N]) -> Self {
        Self { tasks, turns: 0 }
    }

    /// Poll every task once
    pub fn run_turn(&mut self, ctx: &mut C, now_ms: u32) {
        for task in self.tasks.iter_mut() {
            task.poll(ctx, now_ms);
        }
        self.turns = self.turns.wrapping_add(1);
    }

    /// Turns completed
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Task names in run order
    pub fn names(&self) -> [&'static str; N] {
        core::array::from_fn(|i| self.tasks[i].name())
    }
}
