//! Capacity limits for the bounded EOG and REF classes.
//!
//! Channels beyond a class's capacity, in input order, are demoted to
//! dropped.  EXTRA capacity is enforced during classification instead.
use crate::classify::ChannelClass;
use crate::error::Diagnostic;
use crate::layout::CanonicalLayout;

/// Surviving EOG and REF rows after the capacity check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundedRows {
    pub eog: Vec<usize>,
    pub reference: Vec<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Enforce EOG and REF capacities in place on `classes`.
pub fn enforce_capacity(
    names: &[String],
    classes: &mut [Option<ChannelClass>],
    layout: &CanonicalLayout,
) -> BoundedRows {
    let mut diagnostics = Vec::new();
    let eog = cap_class(names, classes, ChannelClass::Eog, layout.eog_indices().len(), &mut diagnostics);
    let reference = cap_class(names, classes, ChannelClass::Ref, layout.ref_indices().len(), &mut diagnostics);
    BoundedRows { eog, reference, diagnostics }
}

fn cap_class(
    names: &[String],
    classes: &mut [Option<ChannelClass>],
    class: ChannelClass,
    capacity: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<usize> {
    let mut rows: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Some(class))
        .map(|(i, _)| i)
        .collect();

    for &row in rows.iter().skip(capacity) {
        diagnostics.push(Diagnostic::Overflow { name: names[row].clone(), class }.emit());
        classes[row] = None;
    }
    rows.truncate(capacity);
    rows
}
