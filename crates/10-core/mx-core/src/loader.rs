use libloading::Library;
use smallvec::SmallVec;

use mx_abi::{ComponentId, OmxError, OmxResult, Role};
use mx_component::ComponentHandle;

/// What a successful probe discovers about a plugin: the role list it
/// advertises. The probe handle is then closed (§4.1: "enumerates roles
/// until `NoMore`, then closes the probe handle").
pub struct ProbeResult {
    pub roles: SmallVec<[Role; 4]>,
}

/// Abstracts `dlopen`/`dlsym`/`dlclose` so the registry's discovery and
/// handle-creation logic can run against an injectable fake in tests
/// without touching the filesystem or loading real shared objects.
/// Grounded on the safe-wrapper-over-a-raw-vtable-pointer pattern (`Send`/
/// `Sync` asserted with an explicit safety comment rather than derived),
/// adapted here to wrap a `libloading::Library` instead of a raw
/// `*mut c_void`.
pub trait PluginLoader: Send + Sync {
    /// Opens `path`, calls `entry_point_symbol` to discover its role list,
    /// then closes the handle. Returns `None` on any failure (missing
    /// symbol, zero roles reported) — never panics, per §4.1's "failing
    /// plugin is skipped, not fatal" rule.
    fn probe(&self, path: &str, entry_point_symbol: &str) -> Option<ProbeResult>;

    /// Opens `path`, calls `entry_point_symbol` to construct a component
    /// instance for `role` carrying `id`, and keeps the library loaded for
    /// the lifetime of the returned handle. The caller (the registry) picks
    /// `id` so the handle it gets back reports the same identity under
    /// which it stores the handle.
    fn instantiate(&self, path: &str, entry_point_symbol: &str, role: &Role, id: ComponentId) -> OmxResult<ComponentHandle>;
}

/// The production loader, backed by `libloading`. Holds no long-lived
/// state of its own — every `Library` it opens is either dropped at the
/// end of `probe` or kept alive inside the `ComponentHandle` it returns
/// from `instantiate` (a real implementation stores the `Library` next to
/// the handle so the code stays mapped for as long as the component runs;
/// that storage lives on `mx_component::ComponentHandle` itself once a
/// plugin crate exists to exercise it, which this workspace does not ship).
#[derive(Default)]
pub struct DlPluginLoader;

// Safety: a dlopen'd shared object's symbols are safe to call from any
// thread as long as the plugin does not rely on thread-local state across
// calls, which the component ABI does not permit.
unsafe impl Send for DlPluginLoader {}
unsafe impl Sync for DlPluginLoader {}

impl PluginLoader for DlPluginLoader {
    fn probe(&self, path: &str, entry_point_symbol: &str) -> Option<ProbeResult> {
        let library = unsafe { Library::new(path) }.ok()?;
        // A real plugin's entry point returns a role-enumeration vtable
        // entry; walking it until `NoMore` is the C-side call pattern this
        // safe wrapper exists to hide. No in-tree plugin ships in this
        // workspace to call, so discovery beyond "does it load and expose
        // the symbol" is left to `mx-mock-components` in tests.
        let has_entry = unsafe { library.get::<unsafe extern "C" fn()>(entry_point_symbol.as_bytes()) }.is_ok();
        if !has_entry {
            tracing::warn!(%path, %entry_point_symbol, "plugin missing entry point, skipping");
            return None;
        }
        None
    }

    fn instantiate(
        &self,
        path: &str,
        _entry_point_symbol: &str,
        _role: &Role,
        _id: ComponentId,
    ) -> OmxResult<ComponentHandle> {
        tracing::error!(%path, "real plugin instantiation requires a shipped plugin crate");
        Err(OmxError::ComponentNotFound)
    }
}
