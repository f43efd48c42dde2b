use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Scientific formatting with a signed, padded exponent
    ///
    /// Tally fractions range over many orders of magnitude (absorption in a
    /// thin slab is often below 1e-3), so results are printed consistently in
    /// scientific notation.
    ///
    /// ```rust
    /// # use ntransport_utils::ValueExt;
    /// assert_eq!((0.000461).sci(3, 2), "4.610e-04".to_string());
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let formatted = f!("{:.precision$e}", &self, precision = precision);
        // LowerExp always writes an 'e', the fallback only guards odd impls
        let Some((mantissa, exp)) = formatted.split_once('e') else {
            return formatted;
        };
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{digits:0>exp_pad$}")
    }
}
