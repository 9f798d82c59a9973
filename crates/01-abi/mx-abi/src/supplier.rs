/// A port's preference for which side of a tunnel supplies buffer payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferSupplier {
    Input,
    Output,
    Unspecified,
}

/// Resolves which side of a tunnel supplies buffers, per the election rules:
/// matching preferences agree trivially; on disagreement the input side's
/// preference wins; `Unspecified` defers to the other side; if both sides are
/// `Unspecified` the output side supplies (the convention this runtime
/// adopts where the original left the tie-break unspecified).
pub fn negotiate_supplier(
    output_pref: BufferSupplier,
    input_pref: BufferSupplier,
) -> BufferSupplier {
    use BufferSupplier::*;
    match (output_pref, input_pref) {
        (Unspecified, Unspecified) => Output,
        (a, b) if a == b => a,
        (Unspecified, other) => other,
        (other, Unspecified) => other,
        (_, input_side) => input_side,
    }
}
