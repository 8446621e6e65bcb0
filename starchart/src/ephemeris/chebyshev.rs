use super::SpkError;

/// Evaluate a Chebyshev series at `t` in [-1, 1] with Clenshaw's recurrence.
pub fn evaluate(coeffs: &[f64], t: f64) -> Result<f64, SpkError> {
    let (first, rest) = coeffs
        .split_first()
        .ok_or_else(|| SpkError::InvalidData("Empty coefficient array".into()))?;
    let two_t = 2.0 * t;
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for &c in rest.iter().rev() {
        let b0 = two_t * b1 - b2 + c;
        b2 = b1;
        b1 = b0;
    }
    Ok(t * b1 - b2 + first)
}

/// Evaluate three interleaved component series (x, y, z blocks of `n` each).
pub fn evaluate_xyz(coeffs: &[f64], n: usize, t: f64) -> Result<[f64; 3], SpkError> {
    if n == 0 || coeffs.len() < 3 * n {
        return Err(SpkError::InvalidData(format!(
            "Expected {} coefficients, found {}",
            3 * n,
            coeffs.len()
        )));
    }
    Ok([
        evaluate(&coeffs[0..n], t)?,
        evaluate(&coeffs[n..2 * n], t)?,
        evaluate(&coeffs[2 * n..3 * n], t)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_series() {
        let coeffs = [5.0, 0.0, 0.0];
        assert!((evaluate(&coeffs, 0.0).unwrap() - 5.0).abs() < 1e-14);
        assert!((evaluate(&coeffs, 0.7).unwrap() - 5.0).abs() < 1e-14);
    }

    #[test]
    fn test_linear_series() {
        let coeffs = [0.0, 1.0];
        assert!((evaluate(&coeffs, 0.5).unwrap() - 0.5).abs() < 1e-14);
        assert!((evaluate(&coeffs, -0.5).unwrap() + 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_second_order_matches_closed_form() {
        // T2(t) = 2t^2 - 1
        let coeffs = [1.0, 2.0, 3.0];
        let t: f64 = 0.3;
        let expected = 1.0 + 2.0 * t + 3.0 * (2.0 * t * t - 1.0);
        assert!((evaluate(&coeffs, t).unwrap() - expected).abs() < 1e-14);
    }

    #[test]
    fn test_empty_series() {
        assert!(evaluate(&[], 0.0).is_err());
    }

    #[test]
    fn test_xyz_blocks() {
        let coeffs = [1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        let xyz = evaluate_xyz(&coeffs, 2, 0.25).unwrap();
        assert_eq!(xyz, [1.0, 2.0, 3.0]);
        assert!(evaluate_xyz(&coeffs, 3, 0.0).is_err());
    }
}
