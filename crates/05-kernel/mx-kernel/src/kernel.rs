use std::collections::VecDeque;

use mx_abi::{Mark, OmxError, OmxResult, PortIndex};
use mx_buffer::BufferHeader;
use mx_port::{ConfigPort, Port, PortFlags, TunnelStatus};
use mx_servant::{Mailbox, MailboxSender, ServantLoop};

use crate::command::KernelCmd;

/// The kernel servant: owns every port's buffer pool and routes buffer
/// headers between the application, the processor and tunnel peers
/// (§4.2, §4.3, §4.6).
pub struct Kernel {
    ports: Vec<Port>,
    config_port: ConfigPort,
    mailbox: Mailbox<KernelCmd>,
    /// Headers handed to the processor, awaiting `EmptyBufferDone`/
    /// `FillBufferDone`, keyed by port for flush recall (§8 S5).
    in_flight: Vec<VecDeque<(PortIndex, BufferHeader)>>,
    /// For an output port tunnelled to a peer component, the peer kernel's
    /// mailbox sender and the peer's port index (§4.6 steady state).
    /// Registered by `ComponentHandle::setup_tunnel_with` once both sides
    /// are linked; a header this kernel would otherwise hand back to the
    /// application on that port is posted to the peer instead.
    relay_targets: Vec<Option<(MailboxSender<KernelCmd>, PortIndex)>>,
    /// A mark waiting to attach to the next header routed through a port
    /// (§3, §4.4): `SendCommand(MarkBuffer)` only stages it here, the event
    /// fires once the marked header is actually processed.
    pending_marks: Vec<Option<Mark>>,
}

impl Kernel {
    pub fn new(ports: Vec<Port>, config_port: ConfigPort) -> Self {
        let in_flight = ports.iter().map(|_| VecDeque::new()).collect();
        let relay_targets = ports.iter().map(|_| None).collect();
        let pending_marks = ports.iter().map(|_| None).collect();
        Self {
            ports,
            config_port,
            mailbox: Mailbox::unbounded(),
            in_flight,
            relay_targets,
            pending_marks,
        }
    }

    pub fn sender(&self) -> MailboxSender<KernelCmd> {
        self.mailbox.sender()
    }

    /// Registers (`Some`) or clears (`None`) the tunnel relay target for
    /// `index`, an output port whose released buffers should be delivered
    /// across a tunnel rather than back to this component's application.
    pub fn set_relay_target(&mut self, index: PortIndex, target: Option<(MailboxSender<KernelCmd>, PortIndex)>) -> OmxResult<()> {
        let slot = self
            .relay_targets
            .get_mut(index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        *slot = target;
        Ok(())
    }

    /// The registered relay target for `index`, if any.
    pub fn relay_target(&self, index: PortIndex) -> Option<(MailboxSender<KernelCmd>, PortIndex)> {
        self.relay_targets.get(index.0 as usize).and_then(|t| t.clone())
    }

    fn port_mut(&mut self, index: PortIndex) -> OmxResult<&mut Port> {
        self.ports
            .get_mut(index.0 as usize)
            .ok_or(OmxError::BadPortIndex)
    }

    fn port(&self, index: PortIndex) -> OmxResult<&Port> {
        self.ports.get(index.0 as usize).ok_or(OmxError::BadPortIndex)
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut Vec<Port> {
        &mut self.ports
    }

    pub fn config_port(&self) -> &ConfigPort {
        &self.config_port
    }

    pub fn set_config_port_parameter(&mut self, index: mx_abi::IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.config_port.set_parameter(index, bytes)
    }

    /// Admits headers up to `buffer_count_actual`, marking the port
    /// populated once reached — a precondition for Idle (§3).
    pub fn populate(&mut self, index: PortIndex, header: BufferHeader) -> OmxResult<()> {
        let port = self.port_mut(index)?;
        port.pool_mut().admit(header)?;
        if port.pool().populated() {
            port.set_flags(PortFlags::POPULATED, true);
        }
        Ok(())
    }

    /// Releases every header this kernel still holds locally for `index`
    /// and clears the populated flag.
    pub fn depopulate(&mut self, index: PortIndex) -> OmxResult<Vec<BufferHeader>> {
        let port = self.port_mut(index)?;
        let drained = port.pool_mut().drain_all();
        port.pool_mut().reset();
        port.set_flags(PortFlags::POPULATED, false);
        Ok(drained)
    }

    /// Recalls every in-flight header on `index` back into the port's pool,
    /// satisfying §8 S5 (flush during Executing returns every header to
    /// its owning pool within the call).
    pub fn flush(&mut self, index: PortIndex) -> OmxResult<()> {
        let slot = self
            .in_flight
            .get_mut(index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        let recalled: Vec<BufferHeader> = slot.drain(..).map(|(_, hdr)| hdr).collect();
        let port = self.port_mut(index)?;
        for hdr in recalled {
            port.pool_mut().release(hdr);
        }
        Ok(())
    }

    pub fn enable_port(&mut self, index: PortIndex) -> OmxResult<()> {
        self.port_mut(index)?.set_flags(PortFlags::ENABLED, true);
        Ok(())
    }

    pub fn disable_port(&mut self, index: PortIndex) -> OmxResult<()> {
        self.port_mut(index)?.set_flags(PortFlags::ENABLED, false);
        Ok(())
    }

    /// Claims a free header from `index`'s pool for handoff to the
    /// processor or a tunnel peer (`tiz_krn_claim_buffer`).
    pub fn claim_buffer(&mut self, index: PortIndex) -> OmxResult<Option<BufferHeader>> {
        Ok(self.port_mut(index)?.pool_mut().acquire_free())
    }

    /// Returns a header the processor is done with. If `index` is an output
    /// port tunnelled to a peer with a registered relay target, the header
    /// is handed across the tunnel instead of back to this port's own pool
    /// (§4.6 steady state); otherwise it returns to `index`'s pool
    /// (`tiz_krn_release_buffer`).
    pub fn release_buffer(&mut self, index: PortIndex, header: BufferHeader) -> OmxResult<()> {
        if let Some((sender, peer_index)) = self.relay_target(index) {
            let mut header = header;
            header.set_input_port(peer_index);
            let _ = sender.post(KernelCmd::EmptyThisBuffer(header));
            return Ok(());
        }
        self.port_mut(index)?.pool_mut().release(header);
        Ok(())
    }

    /// Routes an `EmptyThisBuffer` call: records the header as in-flight on
    /// the input port so a subsequent flush can recall it, attaching any
    /// mark staged for this port to it first.
    pub fn route_empty_this_buffer(&mut self, index: PortIndex, mut header: BufferHeader) -> OmxResult<()> {
        self.port(index)?;
        self.attach_pending_mark(index, &mut header);
        self.in_flight[index.0 as usize].push_back((index, header));
        Ok(())
    }

    /// Routes a `FillThisBuffer` call onto the output port's in-flight queue,
    /// attaching any mark staged for this port to it first.
    pub fn route_fill_this_buffer(&mut self, index: PortIndex, mut header: BufferHeader) -> OmxResult<()> {
        self.port(index)?;
        self.attach_pending_mark(index, &mut header);
        self.in_flight[index.0 as usize].push_back((index, header));
        Ok(())
    }

    /// Stages `mark` to attach to the next header routed through `index`.
    pub fn mark_buffer(&mut self, index: PortIndex, mark: Mark) -> OmxResult<()> {
        let slot = self
            .pending_marks
            .get_mut(index.0 as usize)
            .ok_or(OmxError::BadPortIndex)?;
        *slot = Some(mark);
        Ok(())
    }

    fn attach_pending_mark(&mut self, index: PortIndex, header: &mut BufferHeader) {
        if header.mark().is_some() {
            return;
        }
        if let Some(slot) = self.pending_marks.get_mut(index.0 as usize) {
            if let Some(mark) = slot.take() {
                header.attach_mark(mark);
            }
        }
    }

    /// Pops the next in-flight header queued for the processor on `index`,
    /// e.g. when it is ready to consume its next input.
    pub fn next_in_flight(&mut self, index: PortIndex) -> Option<BufferHeader> {
        self.in_flight
            .get_mut(index.0 as usize)
            .and_then(|q| q.pop_front())
            .map(|(_, hdr)| hdr)
    }

    /// Drains every header queued on `index` waiting to be handed back to
    /// the application, e.g. after a processor has finished with an output
    /// buffer or a tunnel-free input buffer has been fully consumed. An
    /// unknown port index simply yields nothing rather than erroring, since
    /// the caller iterates every live port without re-checking each index.
    pub fn drain_in_flight_for_app(&mut self, index: PortIndex) -> Vec<BufferHeader> {
        self.in_flight
            .get_mut(index.0 as usize)
            .map(|q| q.drain(..).map(|(_, hdr)| hdr).collect())
            .unwrap_or_default()
    }

    /// Advances a tunnel's accept-bit state and reports whether both sides
    /// are now ready to exchange buffers (§4.6).
    pub fn advance_tunnel_status(&mut self, index: PortIndex, bit: TunnelStatus) -> OmxResult<bool> {
        let port = self.port_mut(index)?;
        port.set_tunnel_status(bit, true);
        Ok(port.tunnel_ready_for_exchange())
    }

    fn handle(&mut self, cmd: KernelCmd) {
        match cmd {
            KernelCmd::Depopulate(index) => {
                let _ = self.depopulate(index);
            }
            KernelCmd::Flush(index) => {
                let _ = self.flush(index);
            }
            KernelCmd::EnablePort(index) => {
                let _ = self.enable_port(index);
            }
            KernelCmd::DisablePort(index) => {
                let _ = self.disable_port(index);
            }
            KernelCmd::EmptyThisBuffer(hdr) => {
                if let Some(index) = hdr.input_port() {
                    let _ = self.route_empty_this_buffer(index, hdr);
                }
            }
            KernelCmd::FillThisBuffer(hdr) => {
                if let Some(index) = hdr.output_port() {
                    let _ = self.route_fill_this_buffer(index, hdr);
                }
            }
            KernelCmd::MarkBuffer(index, mark) => {
                let _ = self.mark_buffer(index, mark);
            }
            KernelCmd::GetParameter(index, idx, reply) | KernelCmd::GetConfig(index, idx, reply) => {
                let result = self.port(index).and_then(|p| p.get_parameter(idx));
                let _ = reply.send(result);
            }
            KernelCmd::SetParameter(index, idx, bytes, reply) | KernelCmd::SetConfig(index, idx, bytes, reply) => {
                let result = self
                    .port_mut(index)
                    .and_then(|p| p.set_parameter(idx, &bytes).map(|_| Vec::new()));
                let _ = reply.send(result);
            }
        }
    }
}

impl ServantLoop for Kernel {
    fn tick(&mut self) -> usize {
        let drained = self.mailbox.drain(64);
        let n = drained.len();
        for cmd in drained {
            self.handle(cmd);
        }
        n
    }

    fn name(&self) -> &'static str {
        "kernel"
    }
}
