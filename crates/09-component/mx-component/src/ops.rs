use mx_abi::{Command, ComponentId, IndexType, OmxResult, PortIndex, Role, State};
use mx_buffer::BufferHeader;

/// The public component vtable (§6), the entity every plugin exposes and
/// every caller (core, another component during tunnel setup, the
/// application) drives a component instance through.
pub trait ComponentOps: Send + Sync {
    fn get_component_version(&self) -> (String, u32);
    fn send_command(&self, cmd: Command) -> OmxResult<()>;
    /// `port` is `PortIndex::CONFIG` for component-level parameters,
    /// mirroring the `nPortIndex` field every OMX parameter struct embeds.
    fn get_parameter(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>>;
    fn set_parameter(&self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()>;
    fn get_config(&self, port: PortIndex, index: IndexType) -> OmxResult<Vec<u8>>;
    fn set_config(&self, port: PortIndex, index: IndexType, bytes: &[u8]) -> OmxResult<()>;
    fn get_state(&self) -> State;
    /// Installs the application's callback vtable, replacing whatever was
    /// registered before (including the no-op default every component
    /// starts with). May be called more than once; only the most recent
    /// registration receives events.
    fn set_callbacks(&self, callbacks: Box<dyn ComponentCallbacks>);
    fn component_tunnel_request(
        &self,
        port: PortIndex,
        peer: Option<(ComponentId, PortIndex)>,
    ) -> OmxResult<()>;
    fn use_buffer(&self, port: PortIndex, external: Vec<u8>) -> OmxResult<()>;
    /// Binds an EGL image as a port's buffer storage. No port kind this
    /// crate ships backs onto an EGL surface, so the base port always
    /// rejects this; see `mx_port::DomainBehaviour::use_egl_image`.
    fn use_egl_image(&self, port: PortIndex, egl_image: Vec<u8>) -> OmxResult<()>;
    fn allocate_buffer(&self, port: PortIndex, size_bytes: usize) -> OmxResult<()>;
    fn free_buffer(&self, port: PortIndex) -> OmxResult<()>;
    fn empty_this_buffer(&self, header: BufferHeader) -> OmxResult<()>;
    fn fill_this_buffer(&self, header: BufferHeader) -> OmxResult<()>;
    fn component_role_enum(&self, index: u32) -> OmxResult<Role>;
    fn component_deinit(&self) -> OmxResult<()>;
}

/// The callback vtable (§6) the plugin invokes on the application. Owned
/// by `ComponentRuntime` and driven from the FSM's `EventSink` bridge and
/// the kernel's buffer-done path.
pub trait ComponentCallbacks: Send {
    fn event_handler(&mut self, event: mx_abi::EventType, data1: u32, data2: u32);
    fn empty_buffer_done(&mut self, header: BufferHeader);
    fn fill_buffer_done(&mut self, header: BufferHeader);
}
