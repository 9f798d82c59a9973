use std::time::Duration;

use crate::reactor::Reactor;

/// One pass of a servant's run loop: drain its mailbox, act on whatever
/// arrived, and report how much work was done. Mirrors the teacher's
/// `ServiceEngine::poll` contract so `EventLoopHost` can schedule servants
/// the same way `WorkerRuntime` schedules engines.
pub trait ServantLoop: Send {
    /// Drains pending work and returns how many items were processed.
    /// A `0` return means the servant is idle this tick.
    fn tick(&mut self) -> usize;

    fn name(&self) -> &'static str;
}

/// The event-loop thread a component runs: one `Reactor` for fd/timer
/// readiness shared by every registered `ServantLoop` (FSM, kernel,
/// processor), driven until the caller is satisfied. The core loader
/// thread does not use this — it only ever has a message queue, no
/// fd/timer watchers, so it drains its mailbox directly (see mx-core).
pub struct EventLoopHost {
    reactor: Reactor,
    loops: Vec<Box<dyn ServantLoop>>,
}

impl EventLoopHost {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            reactor: Reactor::new()?,
            loops: Vec::new(),
        })
    }

    pub fn register<L>(&mut self, servant_loop: L)
    where
        L: ServantLoop + 'static,
    {
        self.loops.push(Box::new(servant_loop));
    }

    pub fn reactor_mut(&mut self) -> &mut Reactor {
        &mut self.reactor
    }

    /// Ticks every registered servant once, in registration order, and
    /// returns the total items processed across all of them.
    pub fn run_tick(&mut self) -> usize {
        let mut total = 0;
        for servant_loop in &mut self.loops {
            let processed = servant_loop.tick();
            if processed > 0 {
                tracing::trace!(servant = servant_loop.name(), processed, "servant tick");
            }
            total += processed;
        }
        total
    }

    /// Ticks repeatedly until a full pass produces no work, i.e. every
    /// servant reports idle in the same round.
    pub fn run_until_idle(&mut self) {
        loop {
            if self.run_tick() == 0 {
                break;
            }
        }
    }

    /// Drives the reactor and the servants together forever: waits on the
    /// reactor for up to `budget_per_wait`, then gives every servant a
    /// tick regardless of what woke the reactor (a fd readiness event may
    /// be consumed by servant-internal I/O the `ServantLoop` owns, not by
    /// the host). Runs until the thread is torn down by its owner.
    pub fn run_forever(&mut self, budget_per_wait: Duration) {
        loop {
            if let Err(err) = self.reactor.poll(budget_per_wait) {
                tracing::warn!(%err, "reactor poll failed");
            }
            self.run_until_idle();
        }
    }
}
