use std::cmp::Ordering;

/// Orders sibling parameter children, most specific first.
///
/// Constrained before unconstrained, then the longer constraint source, then
/// the parameter name.
pub fn compare_param_priority(
    a_name: &str,
    a_constraint: Option<&str>,
    b_name: &str,
    b_constraint: Option<&str>,
) -> Ordering {
    match (a_constraint, b_constraint) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => b.len().cmp(&a.len()).then_with(|| a_name.cmp(b_name)),
        (None, None) => a_name.cmp(b_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_ranks_above_unconstrained() {
        assert_eq!(
            compare_param_priority("a", Some("\\d+"), "a", None),
            Ordering::Less
        );
        assert_eq!(
            compare_param_priority("a", None, "z", Some("x")),
            Ordering::Greater
        );
    }

    #[test]
    fn longer_source_ranks_first() {
        assert_eq!(
            compare_param_priority("z", Some("[0-9]{3}"), "a", Some("\\d+")),
            Ordering::Less
        );
    }

    #[test]
    fn name_breaks_ties() {
        assert_eq!(
            compare_param_priority("id", Some("\\d+"), "no", Some("\\w+")),
            Ordering::Less
        );
        assert_eq!(compare_param_priority("b", None, "a", None), Ordering::Greater);
    }
}
