use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io;
use std::time::{Duration, Instant};

use mio::{Events, Interest, Poll, Token};

/// Identity of a registered timer, returned by `Reactor::arm_timer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Identity of a registered fd-readiness watcher, the `mio::Token` the
/// caller used at registration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IoToken(pub usize);

/// What woke the reactor on a given `poll` call.
#[derive(Debug)]
pub enum ReadyEvent {
    Io(IoToken),
    Timer(TimerId),
}

struct ArmedTimer {
    deadline: Instant,
    id: TimerId,
}

impl PartialEq for ArmedTimer {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}
impl Eq for ArmedTimer {}
impl PartialOrd for ArmedTimer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ArmedTimer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deadline.cmp(&other.deadline)
    }
}

/// A reactor supporting timers and file-descriptor readiness, the event
/// loop every component thread runs so plugins doing their own I/O (e.g.
/// HTTP sources) can register watchers (§4.2).
pub struct Reactor {
    poll: Poll,
    events: Events,
    timers: BinaryHeap<Reverse<ArmedTimer>>,
    next_timer_id: u64,
}

impl Reactor {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            poll: Poll::new()?,
            events: Events::with_capacity(64),
            timers: BinaryHeap::new(),
            next_timer_id: 0,
        })
    }

    /// Registers an I/O source for readiness notifications under `token`.
    pub fn register_io<S>(&mut self, source: &mut S, token: IoToken, interest: Interest) -> io::Result<()>
    where
        S: mio::event::Source + ?Sized,
    {
        self.poll.registry().register(source, Token(token.0), interest)
    }

    pub fn deregister_io<S>(&mut self, source: &mut S) -> io::Result<()>
    where
        S: mio::event::Source + ?Sized,
    {
        self.poll.registry().deregister(source)
    }

    /// Arms a one-shot timer that fires after `delay`.
    pub fn arm_timer(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timers.push(Reverse(ArmedTimer {
            deadline: Instant::now() + delay,
            id,
        }));
        id
    }

    fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.peek().map(|Reverse(t)| t.deadline)
    }

    /// Blocks until an I/O source becomes ready, a timer expires, or
    /// `budget` elapses, returning the events that fired.
    pub fn poll(&mut self, budget: Duration) -> io::Result<Vec<ReadyEvent>> {
        let now = Instant::now();
        let timeout = match self.next_timer_deadline() {
            Some(deadline) if deadline <= now => Duration::ZERO,
            Some(deadline) => std::cmp::min(deadline - now, budget),
            None => budget,
        };

        self.poll.poll(&mut self.events, Some(timeout))?;

        let mut ready = Vec::new();
        for event in self.events.iter() {
            ready.push(ReadyEvent::Io(IoToken(event.token().0)));
        }

        let now = Instant::now();
        while let Some(Reverse(t)) = self.timers.peek() {
            if t.deadline > now {
                break;
            }
            let Reverse(t) = self.timers.pop().unwrap();
            ready.push(ReadyEvent::Timer(t.id));
        }

        Ok(ready)
    }
}
