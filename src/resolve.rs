//! Heuristic name resolution.
//!
//! Rewrites raw channel names into canonical-looking tokens, one rule per
//! class:
//!
//! ```text
//! eeg   "EEG Fp1-REF"  → upper, drop "EEG"/"REF", keep EEG-label chars  → "FP1"
//! eog   "EOG left"     → upper, keep chars of "VHEOGLR"                  → "EOGLE"
//! ref   "EAR L"        → upper, drop "EAR"/"REF", A1|A2|L|R → A1/A2/REF  → "A1"
//! ```
//!
//! Resolved names must stay unique within one recording.  A name that was
//! already produced earlier gets `-COPY` appended until it is unique.  The
//! suffixed token is never a canonical label, so an EEG channel carrying it
//! is never placed by exact match and its row stays all-zero.
use std::collections::HashSet;

use crate::classify::ChannelClass;
use crate::error::Diagnostic;
use crate::layout::CanonicalLayout;

/// Characters that can occur in a canonical EOG label.
pub const EOG_ALPHABET: &str = "VHEOGLR";

/// Suffix appended to a colliding resolved name.
pub const DUPLICATE_SUFFIX: &str = "-COPY";

/// Keep only the characters of `candidate` (uppercased) accepted by `keep`.
/// `original` is what the diagnostic reports on failure.
fn keep_informative<F>(
    original: &str,
    candidate: &str,
    class: ChannelClass,
    keep: F,
) -> Result<String, Diagnostic>
where
    F: Fn(char) -> bool,
{
    let possible: String = candidate
        .to_uppercase()
        .chars()
        .filter(|&c| keep(c) && c != ' ')
        .collect();
    if possible.is_empty() {
        Err(Diagnostic::Unresolvable { name: original.to_string(), class })
    } else {
        Ok(possible)
    }
}

/// Resolve an EEG channel name.
pub fn resolve_eeg(name: &str, layout: &CanonicalLayout) -> Result<String, Diagnostic> {
    let stripped = name.to_uppercase().replace("EEG", "").replace("REF", "");
    let alphabet = layout.eeg_alphabet();
    keep_informative(name, &stripped, ChannelClass::Eeg, |c| alphabet.contains(&c))
}

/// Resolve an EOG channel name.
pub fn resolve_eog(name: &str) -> Result<String, Diagnostic> {
    keep_informative(name, name, ChannelClass::Eog, |c| EOG_ALPHABET.contains(c))
}

/// Resolve a reference channel name.  Always succeeds.
///
/// An explicit `A1`/`A2` wins; otherwise left laterality (`L`) means `A1`,
/// right (`R`) means `A2`, and anything else is the generic `REF`.
pub fn resolve_ref(name: &str, layout: &CanonicalLayout) -> String {
    let slots = *layout.ref_indices();
    let [a1, a2, generic] = slots.map(|i| layout.name(i));
    let rest = name.to_uppercase().replace("EAR", "").replace("REF", "");

    let label = if rest.contains(a1) {
        a1
    } else if rest.contains(a2) {
        a2
    } else if rest.contains('L') {
        a1
    } else if rest.contains('R') {
        a2
    } else {
        generic
    };
    label.to_string()
}

/// Output of [`resolve_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved (and de-duplicated) name per input row.
    pub names: Vec<String>,
    /// Classes after resolution; failed channels become `None`.
    pub classes: Vec<Option<ChannelClass>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every channel name according to its class.
///
/// Dropped channels and channels whose resolution fails keep their original
/// name.  They still occupy that name, so a later channel resolving to it
/// is suffixed.
pub fn resolve_names(
    names: &[String],
    classes: &[Option<ChannelClass>],
    layout: &CanonicalLayout,
) -> Resolution {
    let mut out_names = Vec::with_capacity(names.len());
    let mut out_classes = Vec::with_capacity(names.len());
    let mut diagnostics = Vec::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());

    for (name, &class) in names.iter().zip(classes) {
        let resolved = match class {
            None => Err(None),
            Some(ChannelClass::Eeg) => resolve_eeg(name, layout).map_err(Some),
            Some(ChannelClass::Eog) => resolve_eog(name).map_err(Some),
            Some(ChannelClass::Ref) => Ok(resolve_ref(name, layout)),
            Some(ChannelClass::Extra) => Ok(name.clone()),
        };

        match resolved {
            Ok(mut new_name) => {
                while taken.contains(&new_name) {
                    let renamed = format!("{new_name}{DUPLICATE_SUFFIX}");
                    diagnostics.push(
                        Diagnostic::Duplicate { name: new_name.clone(), renamed: renamed.clone() }.emit(),
                    );
                    new_name = renamed;
                }
                taken.insert(new_name.clone());
                out_names.push(new_name);
                out_classes.push(class);
            }
            Err(diag) => {
                if let Some(d) = diag {
                    diagnostics.push(d.emit());
                }
                taken.insert(name.clone());
                out_names.push(name.clone());
                out_classes.push(None);
            }
        }
    }

    Resolution { names: out_names, classes: out_classes, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::deep1010;

    #[test]
    fn eeg_strips_markers() {
        let l = deep1010();
        assert_eq!(resolve_eeg("EEG Fp1-REF", l).unwrap(), "FP1");
        assert_eq!(resolve_eeg("eeg cz", l).unwrap(), "CZ");
        assert_eq!(resolve_eeg("T8-LE", l).unwrap(), "T8");
    }

    #[test]
    fn eeg_empty_is_unresolvable() {
        let err = resolve_eeg("EEG-REF", deep1010()).unwrap_err();
        assert_eq!(err, Diagnostic::Unresolvable { name: "EEG-REF".into(), class: ChannelClass::Eeg });
    }

    #[test]
    fn eog_keeps_alphabet() {
        assert_eq!(resolve_eog("veog-l").unwrap(), "VEOGL");
        assert_eq!(resolve_eog("EOG 1").unwrap(), "EOG");
        assert!(resolve_eog("123").is_err());
    }

    #[test]
    fn ref_laterality() {
        let l = deep1010();
        assert_eq!(resolve_ref("EAR L", l), "A1");
        assert_eq!(resolve_ref("EAR-R", l), "A2");
        assert_eq!(resolve_ref("M1-A2", l), "A2");
        assert_eq!(resolve_ref("REF", l), "REF");
        assert_eq!(resolve_ref("Linked EAR", l), "A1");
    }

    #[test]
    fn collisions_are_suffixed() {
        let names: Vec<String> = ["Fp1", "EEG FP1", "FP1 REF"].iter().map(|s| s.to_string()).collect();
        let classes = vec![Some(ChannelClass::Eeg); 3];
        let r = resolve_names(&names, &classes, deep1010());
        assert_eq!(r.names, vec!["FP1", "FP1-COPY", "FP1-COPY-COPY"]);
        assert_eq!(r.diagnostics.len(), 3);
    }

    #[test]
    fn dropped_names_reserve_their_slot() {
        let names: Vec<String> = ["FP1", "fp1"].iter().map(|s| s.to_string()).collect();
        let classes = vec![None, Some(ChannelClass::Eeg)];
        let r = resolve_names(&names, &classes, deep1010());
        assert_eq!(r.names, vec!["FP1", "FP1-COPY"]);
        assert_eq!(r.classes, vec![None, Some(ChannelClass::Eeg)]);
    }

    #[test]
    fn failed_resolution_drops_channel() {
        let names = vec!["EEG".to_string(), "123".to_string()];
        let classes = vec![Some(ChannelClass::Eeg), Some(ChannelClass::Eog)];
        let r = resolve_names(&names, &classes, deep1010());
        assert_eq!(r.classes, vec![None, None]);
        assert_eq!(r.names, names);
        assert_eq!(r.diagnostics.len(), 2);
    }
}
