use mx_abi::{Command, EventType, OmxError, OmxResult, PortIndex, State};
use mx_kernel::{Kernel, KernelCmd};
use mx_servant::{Mailbox, MailboxSender, ServantLoop};

use crate::command::FsmCmd;
use crate::hook::ResourceManagerHook;
use crate::sink::EventSink;

fn transition_legal(from: State, to: State) -> bool {
    use State::*;
    matches!(
        (from, to),
        (Loaded, Idle)
            | (Loaded, WaitForResources)
            | (Idle, Loaded)
            | (Idle, Executing)
            | (Idle, Pause)
            | (Executing, Idle)
            | (Executing, Pause)
            | (Pause, Idle)
            | (Pause, Executing)
            | (WaitForResources, Loaded)
    )
}

/// The FSM servant (§4.2, §7, §8 property 1): owns the component's current
/// `State`, validates every requested transition against the table, drives
/// the kernel's port population/flush/enable/disable and emits exactly one
/// terminal event per command.
pub struct Fsm {
    state: State,
    transitioning_to: Option<State>,
    mailbox: Mailbox<FsmCmd>,
    ports: Vec<PortIndex>,
    kernel_sender: MailboxSender<KernelCmd>,
    sink: Box<dyn EventSink>,
    hook: Option<Box<dyn ResourceManagerHook>>,
}

impl Fsm {
    pub fn new(
        ports: Vec<PortIndex>,
        kernel_sender: MailboxSender<KernelCmd>,
        sink: Box<dyn EventSink>,
        hook: Option<Box<dyn ResourceManagerHook>>,
    ) -> Self {
        Self {
            state: State::Loaded,
            transitioning_to: None,
            mailbox: Mailbox::unbounded(),
            ports,
            kernel_sender,
            sink,
            hook,
        }
    }

    pub fn sender(&self) -> MailboxSender<FsmCmd> {
        self.mailbox.sender()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Validates and begins executing `cmd`, mirroring the OMX
    /// `SendCommand` contract: returns once the command is accepted for
    /// processing, not once it completes (completion is signalled through
    /// the `EventSink` by a later `tick`, but in this in-process runtime
    /// with no cross-thread buffer population latency that happens within
    /// the same call). `kernel` is read synchronously to check transition
    /// preconditions such as port population, since it shares this
    /// component's event-loop thread (§4.2).
    pub fn send_command(&mut self, cmd: Command, kernel: &Kernel) -> OmxResult<()> {
        match cmd {
            Command::StateSet(to) => self.handle_state_set(to, kernel),
            Command::Flush(port) => self.handle_flush(port),
            Command::PortEnable(port) => self.handle_port_enable(port),
            Command::PortDisable(port) => self.handle_port_disable(port),
            Command::MarkBuffer(port, mark) => {
                // The mark attaches to the next header routed through
                // `port`; `EventType::Mark` fires later, once the target
                // component actually processes that buffer.
                let _ = self.kernel_sender.post(KernelCmd::MarkBuffer(port, mark));
                Ok(())
            }
        }
    }

    fn handle_state_set(&mut self, to: State, kernel: &Kernel) -> OmxResult<()> {
        if self.transitioning_to.is_some() {
            let err = OmxError::IncorrectStateOperation;
            self.sink.emit_error(err);
            return Err(err);
        }
        if to == self.state {
            let err = OmxError::SameState;
            self.sink.emit_error(err);
            return Err(err);
        }
        if !transition_legal(self.state, to) {
            let err = OmxError::IncorrectStateTransition;
            self.sink.emit_error(err);
            return Err(err);
        }

        self.transitioning_to = Some(to);
        let outcome = self.drive_transition(to, kernel);
        self.transitioning_to = None;

        match outcome {
            Ok(()) => {
                self.state = to;
                self.sink.emit(EventType::CmdComplete);
                Ok(())
            }
            Err(err) => {
                self.sink.emit_error(err);
                Err(err)
            }
        }
    }

    fn drive_transition(&mut self, to: State, kernel: &Kernel) -> OmxResult<()> {
        use State::*;
        match (self.state, to) {
            (Loaded, Idle) => {
                // §3: the transition to Idle requires every enabled port to
                // have reached populated already (the application drives
                // population via UseBuffer/AllocateBuffer beforehand); this
                // only verifies the precondition, it does not populate.
                for port in &self.ports {
                    let Some(p) = kernel.ports().get(port.0 as usize) else {
                        continue;
                    };
                    if p.is_enabled() && !p.pool().populated() {
                        return Err(OmxError::PortUnpopulated);
                    }
                }
                Ok(())
            }
            (Idle, Loaded) => {
                for port in self.ports.clone() {
                    let _ = self.kernel_sender.post(KernelCmd::Depopulate(port));
                }
                Ok(())
            }
            (_, WaitForResources) => {
                let available = self
                    .hook
                    .as_mut()
                    .map(|h| h.resources_available())
                    .unwrap_or(true);
                if available {
                    Ok(())
                } else {
                    Err(OmxError::InsufficientResources)
                }
            }
            (WaitForResources, resumed) => {
                if let Some(hook) = self.hook.as_mut() {
                    hook.on_resume(resumed);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_flush(&mut self, port: PortIndex) -> OmxResult<()> {
        let _ = self.kernel_sender.post(KernelCmd::Flush(port));
        self.sink.emit(EventType::CmdComplete);
        Ok(())
    }

    fn handle_port_enable(&mut self, port: PortIndex) -> OmxResult<()> {
        let _ = self.kernel_sender.post(KernelCmd::EnablePort(port));
        self.sink.emit(EventType::CmdComplete);
        Ok(())
    }

    /// Disabling a port while `Executing` performs flush-then-stop on that
    /// port, per the cancellation rule.
    fn handle_port_disable(&mut self, port: PortIndex) -> OmxResult<()> {
        if self.state == State::Executing {
            let _ = self.kernel_sender.post(KernelCmd::Flush(port));
        }
        let _ = self.kernel_sender.post(KernelCmd::DisablePort(port));
        self.sink.emit(EventType::CmdComplete);
        Ok(())
    }

    /// Drains commands posted through `Fsm::sender()`'s mailbox rather than
    /// through `ComponentRuntime::send_command`. Nothing in this workspace
    /// posts `Command::StateSet` this way (every caller goes through the
    /// handle, which can hand `send_command` a `&Kernel` synchronously);
    /// a `StateSet` arriving here has no kernel to check port population
    /// against, so it is refused rather than silently skipping the check.
    fn drain_commands(&mut self) -> usize {
        let drained = self.mailbox.drain(32);
        let n = drained.len();
        for fsm_cmd in drained {
            match fsm_cmd.command {
                Command::StateSet(_) => {
                    self.sink.emit_error(OmxError::IncorrectStateOperation);
                }
                Command::Flush(port) => {
                    let _ = self.handle_flush(port);
                }
                Command::PortEnable(port) => {
                    let _ = self.handle_port_enable(port);
                }
                Command::PortDisable(port) => {
                    let _ = self.handle_port_disable(port);
                }
                Command::MarkBuffer(port, mark) => {
                    let _ = self.kernel_sender.post(KernelCmd::MarkBuffer(port, mark));
                }
            }
        }
        n
    }
}

impl ServantLoop for Fsm {
    fn tick(&mut self) -> usize {
        self.drain_commands()
    }

    fn name(&self) -> &'static str {
        "fsm"
    }
}

/// Convenience constructor mirroring `Kernel::new` for tests that only
/// exercise the FSM's own transition logic without a live kernel thread.
pub fn spawn_kernel_for_fsm() -> (Kernel, MailboxSender<KernelCmd>) {
    let kernel = Kernel::new(Vec::new(), mx_port::ConfigPort::new(Box::new(mx_port::other::Binary::new())));
    let sender = kernel.sender();
    (kernel, sender)
}
