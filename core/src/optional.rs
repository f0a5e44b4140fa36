//! Default-resolving helpers for optional response fields.
//!
//! Absent values resolve to the type's zero value: `""`, `0`, `0.0`, `false`.

/// Present value unchanged, otherwise `T::default()`.
pub fn value_or_default<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Borrowed variant of [`value_or_default`], e.g. for `product.name.as_ref()`.
pub fn cloned_or_default<T: Default + Clone>(value: Option<&T>) -> T {
    value.cloned().unwrap_or_default()
}

/// Widen an optional `f32` to `f64`; absent becomes exactly `0.0`.
pub fn widen_or_zero(value: Option<f32>) -> f64 {
    value.map(f64::from).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_resolve_to_zero() {
        assert_eq!(value_or_default::<String>(None), "");
        assert_eq!(value_or_default::<i32>(None), 0);
        assert_eq!(value_or_default::<i64>(None), 0);
        assert_eq!(value_or_default::<f32>(None), 0.0);
        assert_eq!(value_or_default::<f64>(None), 0.0);
        assert!(!value_or_default::<bool>(None));
    }

    #[test]
    fn present_values_pass_through() {
        assert_eq!(value_or_default(Some("Napa".to_string())), "Napa");
        assert_eq!(value_or_default(Some(-3_i32)), -3);
        assert_eq!(value_or_default(Some(i64::MAX)), i64::MAX);
        assert_eq!(value_or_default(Some(2.5_f32)), 2.5);
        assert_eq!(value_or_default(Some(f64::MIN_POSITIVE)), f64::MIN_POSITIVE);
        assert!(value_or_default(Some(true)));
    }

    #[test]
    fn cloned_or_default_reads_borrowed_fields() {
        let name: Option<String> = Some("Dr. Karim".to_string());
        assert_eq!(cloned_or_default(name.as_ref()), "Dr. Karim");
        let missing: Option<String> = None;
        assert_eq!(cloned_or_default(missing.as_ref()), "");
    }

    #[test]
    fn widen_absent_is_exact_zero() {
        let widened = widen_or_zero(None);
        assert!(!widened.is_nan());
        assert_eq!(widened.to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn widen_present_is_lossless() {
        assert_eq!(widen_or_zero(Some(1.5)), 1.5);
        assert_eq!(widen_or_zero(Some(120.25)), 120.25);
    }
}
