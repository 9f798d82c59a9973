use mx_abi::PortIndex;
use mx_kernel::Kernel;
use mx_servant::ServantLoop;

/// Role-specific data-transfer logic a plugin author implements. Invoked by
/// the processor servant once per tick with direct access to the kernel
/// it shares a thread with (§4.2: FSM, kernel and processor cooperate over
/// one event-loop thread per component, so buffer claim/release does not
/// cross a mailbox boundary the way application-facing commands do).
pub trait ProcessorLogic: Send {
    /// Called once per tick. Implementations should claim input buffers
    /// from `input`, produce output into buffers claimed from `output`,
    /// and release both back through `krn` when done. Returns how much
    /// work was performed, so the host's idle detection works the same
    /// way it does for the FSM and kernel.
    fn on_buffers_ready(&mut self, krn: &mut Kernel, input: PortIndex, output: PortIndex) -> usize;
}

/// The processor servant: a thin `ServantLoop` wrapper around role-specific
/// `ProcessorLogic`, the shared kernel it drives, and the input/output
/// ports it operates over.
pub struct Processor {
    logic: Box<dyn ProcessorLogic>,
    input: PortIndex,
    output: PortIndex,
}

impl Processor {
    pub fn new(logic: Box<dyn ProcessorLogic>, input: PortIndex, output: PortIndex) -> Self {
        Self {
            logic,
            input,
            output,
        }
    }

    /// Runs one tick against the given kernel. Kept as an explicit method
    /// (rather than baking `Kernel` into the struct) because `Kernel` is
    /// itself a `ServantLoop` the same `EventLoopHost` drives independently.
    ///
    /// `logic` is plugin-provided and untrusted; a panic inside it is
    /// caught here rather than allowed to unwind across the component
    /// boundary, matching every other `OmxError::Undefined`-on-fault path.
    pub fn drive(&mut self, krn: &mut Kernel) -> usize {
        let logic = &mut self.logic;
        let input = self.input;
        let output = self.output;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| logic.on_buffers_ready(krn, input, output))).unwrap_or_else(
            |_| {
                tracing::error!("processor logic panicked; treating this tick as no work done");
                0
            },
        )
    }
}

/// A no-op `ProcessorLogic` used where a component's processor does no
/// transformation (e.g. a passthrough tunnel stage), grounded on the same
/// "do nothing, report idle" shape the kernel's unhandled command arms use.
pub struct PassthroughLogic;

impl ProcessorLogic for PassthroughLogic {
    fn on_buffers_ready(&mut self, krn: &mut Kernel, input: PortIndex, output: PortIndex) -> usize {
        let mut moved = 0;
        while let Some(hdr) = krn.next_in_flight(input) {
            if krn.route_fill_this_buffer(output, hdr).is_ok() {
                moved += 1;
            }
        }
        moved
    }
}

/// Wraps a `Processor` for use directly as a `ServantLoop`, for the common
/// case where the processor does not need interleaved access to a kernel
/// owned by a different servant. Components that need tighter control
/// call `Processor::drive` from their own loop instead.
pub struct StandaloneProcessor {
    processor: Processor,
    kernel: Kernel,
}

impl StandaloneProcessor {
    pub fn new(processor: Processor, kernel: Kernel) -> Self {
        Self { processor, kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut Kernel {
        &mut self.kernel
    }
}

impl ServantLoop for StandaloneProcessor {
    fn tick(&mut self) -> usize {
        self.processor.drive(&mut self.kernel)
    }

    fn name(&self) -> &'static str {
        "processor"
    }
}
