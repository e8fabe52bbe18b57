//! Required-value contract for theorems and derivation metadata.
//!
//! Rust values cannot be null, but callers frequently use sentinel values
//! (an empty name, `None`, the nil UUID) to mean "nothing here". The knowledge
//! base refuses such values so that a missing theorem can never silently
//! become a real node of the dependency graph.

use std::{rc::Rc, sync::Arc};

use uuid::Uuid;

/// Implemented by every type stored as a theorem or as derivation metadata.
///
/// The default implementation accepts every value, so opaque key types only
/// need an empty `impl RequiredValue for MyTheorem {}`.
pub trait RequiredValue {
    /// Returns `true` if this value stands for "no value".
    fn is_missing(&self) -> bool {
        false
    }
}

macro_rules! impl_never_missing {
    ( $( $ty:ty ),* $(,)? ) => {
        $( impl RequiredValue for $ty {} )*
    };
}

impl_never_missing!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
);

impl RequiredValue for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl RequiredValue for &str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl RequiredValue for Uuid {
    fn is_missing(&self) -> bool {
        self.is_nil()
    }
}

impl<T: RequiredValue> RequiredValue for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().is_none_or(RequiredValue::is_missing)
    }
}

impl<T: RequiredValue + ?Sized> RequiredValue for Box<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: RequiredValue + ?Sized> RequiredValue for Rc<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: RequiredValue + ?Sized> RequiredValue for Arc<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_missing() {
        assert!(String::new().is_missing());
        assert!("".is_missing());
        assert!(Uuid::nil().is_missing());
        assert!(None::<u32>.is_missing());
        assert!(Some(String::new()).is_missing());
        assert!(Arc::new(String::new()).is_missing());
    }

    #[test]
    fn regular_values_are_present() {
        assert!(!"T1".is_missing());
        assert!(!Uuid::new_v4().is_missing());
        assert!(!Some(0u32).is_missing());
        assert!(!0u64.is_missing());
        assert!(!().is_missing());
    }
}
