use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display the contained value, or "none"
    ///
    /// Handy for optional run parameters such as a fixed seed or step limit.
    ///
    /// ```rust
    /// # use ntransport_utils::OptionExt;
    /// let seed: Option<u64> = Some(42);
    /// assert_eq!(seed.display(), "42");
    ///
    /// let max_steps: Option<u64> = None;
    /// assert_eq!(max_steps.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
