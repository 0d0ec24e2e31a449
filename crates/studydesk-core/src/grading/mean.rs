use super::outcome::Average;

/// Coefficient-weighted mean shared by the unit, semester and year levels.
///
/// Incomplete when any child is incomplete, when any coefficient is negative
/// or non-finite, or when the coefficients sum to zero (including no children).
pub(crate) fn weighted_mean<I>(entries: I) -> Average
where
    I: IntoIterator<Item = (Average, f64)>,
{
    let mut weighted_sum = 0.0;
    let mut total_coefficient = 0.0;

    for (average, coefficient) in entries {
        let Average::Complete(value) = average else {
            return Average::Incomplete;
        };
        if !coefficient.is_finite() || coefficient < 0.0 {
            return Average::Incomplete;
        }
        weighted_sum += value * coefficient;
        total_coefficient += coefficient;
    }

    if total_coefficient > 0.0 {
        Average::Complete(weighted_sum / total_coefficient)
    } else {
        Average::Incomplete
    }
}
