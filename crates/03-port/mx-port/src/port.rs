use mx_abi::{ComponentId, IndexType, OmxError, OmxResult, PortIndex};
use mx_buffer::{BufferPool, BufferPoolConfig};

use crate::behaviour::DomainBehaviour;
use crate::definition::PortDefinition;
use crate::flags::{PortFlags, TunnelStatus};

/// A tunnelled port's peer address: the component and port index on the
/// other side of the tunnel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunnelPeer {
    pub component: ComponentId,
    pub port: PortIndex,
}

/// A typed, indexed I/O endpoint on a component. Owns its definition, flags,
/// buffer pool, registered parameter/config indices and a composed
/// `DomainBehaviour` implementing the codec-specific parts.
pub struct Port {
    index: PortIndex,
    definition: PortDefinition,
    flags: PortFlags,
    pool: BufferPool,
    registered: Vec<IndexType>,
    behaviour: Box<dyn DomainBehaviour>,
    tunnel_peer: Option<TunnelPeer>,
    tunnel_status: TunnelStatus,
}

impl Port {
    pub fn new(index: PortIndex, definition: PortDefinition, behaviour: Box<dyn DomainBehaviour>) -> Self {
        let pool = BufferPool::new(BufferPoolConfig {
            buffer_count_actual: definition.buffer_count_actual,
        });
        let mut registered = Vec::new();
        registered.extend_from_slice(behaviour.registered_indices());
        Self {
            index,
            definition,
            // Ports start enabled, matching every OMX component's default
            // operating mode; `PortDisable` is what opts a port out.
            flags: PortFlags::ENABLED,
            pool,
            registered,
            behaviour,
            tunnel_peer: None,
            tunnel_status: TunnelStatus::empty(),
        }
    }

    pub fn index(&self) -> PortIndex {
        self.index
    }

    pub fn definition(&self) -> &PortDefinition {
        &self.definition
    }

    pub fn flags(&self) -> PortFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PortFlags, on: bool) {
        self.flags.set(flags, on);
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(PortFlags::ENABLED)
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut BufferPool {
        &mut self.pool
    }

    pub fn tunnel_peer(&self) -> Option<TunnelPeer> {
        self.tunnel_peer
    }

    pub fn set_tunnel_peer(&mut self, peer: Option<TunnelPeer>) {
        self.tunnel_peer = peer;
        self.flags.set(PortFlags::TUNNELED, peer.is_some());
    }

    pub fn tunnel_status(&self) -> TunnelStatus {
        self.tunnel_status
    }

    pub fn set_tunnel_status(&mut self, bit: TunnelStatus, on: bool) {
        self.tunnel_status.set(bit, on);
    }

    /// Whether both sides of this tunnel have agreed to exchange buffers,
    /// per §4.6 — the kernel must not initiate exchange before this holds.
    pub fn tunnel_ready_for_exchange(&self) -> bool {
        self.tunnel_status
            .contains(TunnelStatus::ACCEPT_USE_BUFFER | TunnelStatus::ACCEPT_BUFFER_EXCHANGE)
    }

    pub fn register_index(&mut self, index: IndexType) {
        if !self.registered.contains(&index) {
            self.registered.push(index);
        }
    }

    fn ensure_registered(&self, index: IndexType) -> OmxResult<()> {
        if self.registered.contains(&index) {
            Ok(())
        } else {
            Err(OmxError::UnsupportedIndex)
        }
    }

    pub fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.ensure_registered(index)?;
        let behaviour = &self.behaviour;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| behaviour.get_parameter(index))).unwrap_or_else(|_| {
            tracing::error!("domain behaviour panicked in get_parameter");
            Err(OmxError::Undefined)
        })
    }

    pub fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.ensure_registered(index)?;
        let behaviour = &mut self.behaviour;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| behaviour.set_parameter(index, bytes))).unwrap_or_else(|_| {
            tracing::error!("domain behaviour panicked in set_parameter");
            Err(OmxError::Undefined)
        })
    }

    /// Config indices are runtime-tunable but route through the same
    /// per-index handlers as structural parameters.
    pub fn get_config(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        self.get_parameter(index)
    }

    pub fn set_config(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        self.set_parameter(index, bytes)
    }

    /// Mandatory domain check followed by the domain behaviour's own
    /// compatibility rules. A cross-domain tunnel is always rejected before
    /// any codec-specific logic can run, closing off the bug the original
    /// implementation had where a codec check compared across domains.
    pub fn check_tunnel_compat(&self, peer: &PortDefinition) -> OmxResult<()> {
        if self.definition.domain != peer.domain {
            return Err(OmxError::PortsNotCompatible);
        }
        let behaviour = &self.behaviour;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| behaviour.check_tunnel_compat(peer))).unwrap_or_else(|_| {
            tracing::error!("domain behaviour panicked in check_tunnel_compat");
            Err(OmxError::Undefined)
        })
    }

    pub fn set_portdef_format(&mut self, format: PortDefinition) -> OmxResult<()> {
        if format.domain != self.definition.domain {
            return Err(OmxError::BadParameter);
        }
        self.definition = format;
        self.pool = BufferPool::new(BufferPoolConfig {
            buffer_count_actual: self.definition.buffer_count_actual,
        });
        Ok(())
    }

    /// Binds an EGL image as this port's buffer storage, delegating to the
    /// domain behaviour's own (defaulted-to-unsupported) implementation.
    pub fn use_egl_image(&mut self, egl_image: &[u8]) -> OmxResult<()> {
        let behaviour = &mut self.behaviour;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| behaviour.use_egl_image(egl_image))).unwrap_or_else(|_| {
            tracing::error!("domain behaviour panicked in use_egl_image");
            Err(OmxError::Undefined)
        })
    }

    /// Applies a master port's parameter change, returning the indices that
    /// actually propagated to this (slave) port.
    pub fn apply_slaving(&mut self, index: IndexType, value: &[u8]) -> smallvec::SmallVec<[IndexType; 4]> {
        let behaviour = &mut self.behaviour;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| behaviour.apply_slaving(index, value))).unwrap_or_else(|_| {
            tracing::error!("domain behaviour panicked in apply_slaving");
            smallvec::SmallVec::new()
        })
    }
}

/// The configuration pseudo-port: carries component-level parameters that
/// lack a real port index. Has no buffer pool.
pub struct ConfigPort {
    registered: Vec<IndexType>,
    behaviour: Box<dyn DomainBehaviour>,
}

impl ConfigPort {
    pub fn new(behaviour: Box<dyn DomainBehaviour>) -> Self {
        let mut registered = Vec::new();
        registered.extend_from_slice(behaviour.registered_indices());
        Self {
            registered,
            behaviour,
        }
    }

    pub fn index(&self) -> PortIndex {
        PortIndex::CONFIG
    }

    pub fn register_index(&mut self, index: IndexType) {
        if !self.registered.contains(&index) {
            self.registered.push(index);
        }
    }

    pub fn get_parameter(&self, index: IndexType) -> OmxResult<Vec<u8>> {
        if !self.registered.contains(&index) {
            return Err(OmxError::UnsupportedIndex);
        }
        self.behaviour.get_parameter(index)
    }

    pub fn set_parameter(&mut self, index: IndexType, bytes: &[u8]) -> OmxResult<()> {
        if !self.registered.contains(&index) {
            return Err(OmxError::UnsupportedIndex);
        }
        self.behaviour.set_parameter(index, bytes)
    }
}
