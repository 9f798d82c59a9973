use mx_abi::{OmxError, OmxResult};

use crate::header::BufferHeader;

/// Configuration for a port's buffer pool: how many headers must be present
/// for the port to be considered populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferPoolConfig {
    pub buffer_count_actual: u32,
}

/// Owns the buffer headers currently held locally by a port (i.e. not
/// currently with the application or a tunnel peer). Grounded on the
/// teacher's fixed-capacity slot pool, adapted from raw shared-memory slots
/// to owned `BufferHeader`s since this runtime is process-local rather than
/// cross-process shared memory.
#[derive(Debug, Default)]
pub struct BufferPool {
    config: BufferPoolConfig,
    held: Vec<BufferHeader>,
    /// Total headers ever admitted to this pool (held + claimed elsewhere),
    /// used to check the populated invariant independent of transient claims.
    admitted: u32,
    eos_pending: bool,
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self {
            buffer_count_actual: 0,
        }
    }
}

impl BufferPool {
    pub fn new(config: BufferPoolConfig) -> Self {
        Self {
            config,
            held: Vec::new(),
            admitted: 0,
            eos_pending: false,
        }
    }

    pub fn config(&self) -> BufferPoolConfig {
        self.config
    }

    /// Admits a freshly allocated or `UseBuffer`-supplied header into the
    /// pool, e.g. during Loaded→Idle population.
    pub fn admit(&mut self, header: BufferHeader) -> OmxResult<()> {
        if self.admitted >= self.config.buffer_count_actual {
            return Err(OmxError::BadParameter);
        }
        self.admitted += 1;
        self.held.push(header);
        Ok(())
    }

    /// True once `buffer_count_actual` headers have been admitted.
    pub fn populated(&self) -> bool {
        self.admitted == self.config.buffer_count_actual && self.config.buffer_count_actual > 0
    }

    /// Number of headers currently held by this pool (not claimed out).
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Total headers admitted over the pool's lifetime (held + claimed).
    pub fn admitted_count(&self) -> u32 {
        self.admitted
    }

    pub fn acquire_free(&mut self) -> Option<BufferHeader> {
        self.held.pop()
    }

    pub fn release(&mut self, header: BufferHeader) {
        self.held.push(header);
    }

    /// Drains every locally held header, e.g. on flush or depopulate. Does
    /// not affect headers currently claimed by the application or a tunnel
    /// peer; the kernel is responsible for recalling those first.
    pub fn drain_all(&mut self) -> Vec<BufferHeader> {
        std::mem::take(&mut self.held)
    }

    /// Resets admission bookkeeping; used once every header has been freed
    /// during Idle→Loaded or a port disable.
    pub fn reset(&mut self) {
        self.admitted = 0;
        self.held.clear();
        self.eos_pending = false;
    }

    /// Marks that an EOS-flagged header is awaiting full consumption before
    /// this port may emit its own EOS-flagged output, per the buffer header
    /// protocol's EOS ordering rule.
    pub fn mark_eos_pending(&mut self) {
        self.eos_pending = true;
    }

    pub fn eos_pending(&self) -> bool {
        self.eos_pending
    }

    pub fn clear_eos_pending(&mut self) {
        self.eos_pending = false;
    }
}
