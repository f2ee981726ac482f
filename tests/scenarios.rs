// ============================================================================
// End-to-end Scenarios
// Concrete input/output cases across the real, complex and series layers
// ============================================================================

use scaled_real::prelude::*;

fn cfg(precision: u32) -> PrecisionConfig {
    PrecisionConfig::new(precision, true).unwrap()
}

fn within(a: &Real, b: &Real, places: i64) -> bool {
    (a - b).abs() < Real::from_parts(1, places, a.config())
}

#[test]
fn test_decimal_addition() {
    let a = Real::new("1.5", cfg(50)).unwrap();
    let sum = a.add_with("2.25").unwrap();
    assert_eq!(sum.to_string(), "3.75");
}

#[test]
fn test_division_terminates_exactly() {
    let ten = Real::new(10, cfg(50)).unwrap();
    assert_eq!(ten.div_with(4).unwrap().to_string(), "2.5");
}

#[test]
fn test_division_truncates() {
    let two = Real::new(2, cfg(10)).unwrap();
    let third = two.div_with(3).unwrap();
    assert_eq!(third, Real::new("0.6666666666", cfg(10)).unwrap());
    assert_eq!(third.to_string(), "6.666666666e-1");
}

#[test]
fn test_conjugate_product() {
    let z = Complex::new("1+1i", cfg(50)).unwrap();
    let product = &z * &z.conj();
    assert_eq!(product, Complex::new("2", cfg(50)).unwrap());
    assert_eq!(product.to_string(), "2.0 + 0.0i");
}

#[test]
fn test_pi_fifty_digits() {
    let ctx = MathContext::new();
    let pi = ctx.pi(cfg(50)).unwrap();
    assert_eq!(
        pi.to_string(),
        "3.1415926535897932384626433832795028841971693993751"
    );
}

#[test]
fn test_half_power_matches_square_root() {
    let ctx = MathContext::new();
    let two = Real::new(2, cfg(50)).unwrap();
    let half = Real::new("0.5", cfg(50)).unwrap();
    let by_power = two.powf(&half, &ctx).unwrap();
    let by_root = ctx.sqrt_real(&two).unwrap();
    assert!(within(&by_power, &by_root, 47));
    assert!(within(
        &by_root,
        &Real::new("1.4142135623730950488016887242096980785696718753769", cfg(50)).unwrap(),
        47
    ));
}

#[test]
fn test_log_of_minus_one_is_i_pi() {
    let ctx = MathContext::new();
    let minus_one = Number::Real(Real::new(-1, cfg(50)).unwrap());
    let value = ctx.log(&minus_one).unwrap().into_complex();
    let pi = ctx.pi(cfg(50)).unwrap();
    assert!(value.re().is_zero());
    assert!(within(value.im(), &pi, 48));
}

#[test]
fn test_malformed_text_is_coercion_error() {
    let err = Real::new("1.2.3", cfg(20)).unwrap_err();
    assert!(err.is_coercion());
    assert!(std::error::Error::source(&err).is_some());
    assert!(Complex::new("1+2j", cfg(20)).unwrap_err().is_coercion());
}

#[test]
fn test_zero_shortcuts() {
    let ctx = MathContext::new();
    let zero = Number::Real(Real::zero(cfg(20)));
    assert!(ctx.sqrt(&zero).unwrap().is_zero());
    assert!(matches!(ctx.log(&zero), Err(NumericError::Domain(_))));
}

#[test]
fn test_precision_propagates_from_left_operand() {
    let wide = Real::new("1", cfg(40)).unwrap();
    let narrow = Real::new("3", cfg(5)).unwrap();
    let quotient = wide.checked_div(&narrow).unwrap();
    assert_eq!(quotient.precision(), 40);
    assert_eq!(quotient.mantissa().to_string().len(), 40);
}

#[test]
fn test_shared_context_across_threads() {
    let ctx = std::sync::Arc::new(MathContext::new().with_memo());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = ctx.clone();
            std::thread::spawn(move || ctx.exp(&Real::new("1", cfg(30)).unwrap()).unwrap())
        })
        .collect();
    let results: Vec<Real> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(ctx.memo().map(|m| m.len()), Some(1));
}
