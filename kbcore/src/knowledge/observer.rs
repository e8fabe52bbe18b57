/// Callback fired with a theorem the first time it gets proven.
///
/// Observers run synchronously, inside the `add_derivation` call that caused
/// the proof, in the order they were registered.
pub struct ProofObserver<T>(pub Box<dyn FnMut(&T) + Send>);

impl<T> ProofObserver<T> {
    pub fn new(callback: impl FnMut(&T) + Send + 'static) -> Self {
        Self(Box::new(callback))
    }

    pub(crate) fn notify(&mut self, theorem: &T) {
        (self.0)(theorem)
    }
}

impl<T> std::fmt::Debug for ProofObserver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProofObserver(..)")
    }
}
