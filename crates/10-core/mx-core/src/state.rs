/// The core's lifecycle state (§4.1): `Stopped -> Starting -> Started ->
/// Stopped`. `Init` while `Started` is a no-op success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreState {
    Stopped,
    Starting,
    Started,
}
