use crossbeam_channel::{Receiver, Sender, TryRecvError};
use smallvec::SmallVec;

/// A servant's FIFO message queue. Posting never blocks the sender (§5:
/// "enqueue a message and return immediately"); the servant drains it from
/// its own event-loop thread.
pub struct Mailbox<M> {
    tx: Sender<M>,
    rx: Receiver<M>,
}

impl<M> Mailbox<M> {
    pub fn unbounded() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> MailboxSender<M> {
        MailboxSender {
            tx: self.tx.clone(),
        }
    }

    /// Drains up to `max` queued messages without blocking, preserving
    /// submission order.
    pub fn drain(&self, max: usize) -> SmallVec<[M; 8]> {
        let mut out = SmallVec::new();
        while out.len() < max {
            match self.rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// A cloneable handle used to post messages into a `Mailbox` from any
/// thread, including across component boundaries.
#[derive(Clone)]
pub struct MailboxSender<M> {
    tx: Sender<M>,
}

impl<M> MailboxSender<M> {
    /// Posts a message. Never blocks; fails only if the servant's mailbox
    /// has been torn down (component deinit race), in which case the
    /// caller should treat the command as canceled.
    pub fn post(&self, msg: M) -> Result<(), M> {
        self.tx.send(msg).map_err(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_fifo_order() {
        let mailbox: Mailbox<u32> = Mailbox::unbounded();
        let sender = mailbox.sender();
        for i in 0..5 {
            sender.post(i).unwrap();
        }
        let drained = mailbox.drain(10);
        assert_eq!(drained.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn drain_respects_max() {
        let mailbox: Mailbox<u32> = Mailbox::unbounded();
        let sender = mailbox.sender();
        for i in 0..5 {
            sender.post(i).unwrap();
        }
        let drained = mailbox.drain(2);
        assert_eq!(drained.as_slice(), &[0, 1]);
        let rest = mailbox.drain(10);
        assert_eq!(rest.as_slice(), &[2, 3, 4]);
    }
}
