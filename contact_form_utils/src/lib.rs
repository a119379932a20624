pub use contact_form_utils_derive::trace_instrument;

mod macros;

/// Returns the version string reported by the binaries and sent in the
/// `User-Agent` header of outbound requests.
pub fn contact_form_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` with a mutable reference to `self`.
    fn with<X>(mut self, f: impl FnOnce(&mut Self) -> X) -> Self
    where
        Self: Sized,
    {
        f(&mut self);
        self
    }
}

impl<T> Apply for T {}
