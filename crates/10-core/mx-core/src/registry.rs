use smallvec::SmallVec;

use mx_abi::Role;

/// A discovered plugin's static identity, cached after the probe `dlopen`
/// at `Init` time so subsequent `GetHandle` calls don't re-scan the
/// filesystem (§4.1).
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    pub component_name: String,
    pub dl_path: String,
    pub role_list: SmallVec<[Role; 4]>,
    pub entry_point_symbol: String,
}

impl RegistryEntry {
    pub fn supports_role(&self, role: &Role) -> bool {
        self.role_list.contains(role)
    }
}
