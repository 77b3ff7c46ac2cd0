// Caller-owned scratch space for point operations.
//
// Every operation declares the arity it needs in its signature, so passing a
// workspace that is too small fails to compile. Callers that hold a wider
// workspace borrow a prefix with `narrow`.

/// `K` caller-owned temporaries of type `F`.
pub type Workspace<F, const K: usize> = [F; K];

/// A zeroed workspace of arity `K`.
#[inline]
pub fn workspace<F: Default + Copy, const K: usize>() -> Workspace<F, K> {
    [F::default(); K]
}

/// Borrow the first `J` slots of a wider workspace.
///
/// Panics if `J > K`; the conversion is checked once per call, not per slot.
#[inline]
pub fn narrow<F, const K: usize, const J: usize>(ws: &mut Workspace<F, K>) -> &mut Workspace<F, J> {
    (&mut ws[..J])
        .try_into()
        .expect("workspace narrower than requested arity")
}
