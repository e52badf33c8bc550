use carta_types::cartesian::Rect;

use crate::query::Filter;

/// Spatial bound derived from a filter tree by [`extract_envelope`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterEnvelope {
    /// No spatial constraint can be derived: every feature must be checked.
    Any,
    /// Every feature matched by the filter has its bounding rectangle
    /// intersecting the given envelope.
    Within(Rect),
    /// The filter cannot match any feature.
    None,
}

/// Derives the spatial bound of a filter by walking its tree.
///
/// The result is a conservative superset: a store may use it to skip features
/// that cannot match, but features inside the envelope still have to be
/// tested against the filter itself.
pub fn extract_envelope(filter: &Filter) -> FilterEnvelope {
    match bounds(filter) {
        Bounds::Unconstrained | Bounds::NoEval => FilterEnvelope::Any,
        Bounds::Rect(rect) => FilterEnvelope::Within(rect),
        Bounds::Nothing => FilterEnvelope::None,
    }
}

/// Result of evaluating a single node of the filter tree.
///
/// `Unconstrained` and `NoEval` both surface as [`FilterEnvelope::Any`], but
/// they combine differently: a non-evaluable term is neutral in a
/// conjunction (it can only narrow the result further) while it poisons a
/// disjunction (the unbounded branch may match anywhere).
enum Bounds {
    Unconstrained,
    NoEval,
    Rect(Rect),
    Nothing,
}

fn bounds(filter: &Filter) -> Bounds {
    match filter {
        Filter::Include => Bounds::Unconstrained,
        Filter::Exclude => Bounds::Nothing,
        Filter::BBox { extent } => Bounds::Rect(*extent),
        Filter::Compare { .. } | Filter::Between { .. } | Filter::Like { .. } => Bounds::NoEval,
        Filter::Not(_) => Bounds::NoEval,
        Filter::And(inner) => {
            let mut acc: Option<Rect> = None;
            for child in inner {
                match bounds(child) {
                    Bounds::Nothing => return Bounds::Nothing,
                    Bounds::Rect(rect) => {
                        acc = match acc {
                            None => Some(rect),
                            Some(prev) => match prev.intersection(rect) {
                                Some(common) => Some(common),
                                None => return Bounds::Nothing,
                            },
                        };
                    }
                    Bounds::Unconstrained | Bounds::NoEval => {}
                }
            }

            match acc {
                Some(rect) => Bounds::Rect(rect),
                None => Bounds::Unconstrained,
            }
        }
        Filter::Or(inner) => {
            let mut acc: Option<Rect> = None;
            let mut unconstrained = false;
            for child in inner {
                match bounds(child) {
                    Bounds::NoEval => return Bounds::NoEval,
                    Bounds::Unconstrained => unconstrained = true,
                    Bounds::Rect(rect) => {
                        acc = Some(match acc {
                            None => rect,
                            Some(prev) => prev.merge(rect),
                        });
                    }
                    Bounds::Nothing => {}
                }
            }

            if unconstrained {
                Bounds::Unconstrained
            } else {
                match acc {
                    Some(rect) => Bounds::Rect(rect),
                    None => Bounds::Nothing,
                }
            }
        }
    }
}
