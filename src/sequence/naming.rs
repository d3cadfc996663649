//! Sequence name derivation
//!
//! Match names usually arrive as `DB:ACCESSION[-ISOFORM][.VERSION]`, for
//! example `SW:P51531-2.2`:
//!
//! | Name | Value |
//! |------|-------|
//! | full name | `SW:P51531-2.2` |
//! | variant name | `P51531-2.2` |
//! | short name | `P51531` |

use crate::feature::FeatureKind;

/// Name without the database prefix (everything up to the last `:`)
pub fn variant_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Variant name without a trailing `.N` version and `-N` isoform number
pub fn short_name(name: &str) -> &str {
    let name = variant_name(name);
    let name = strip_numeric_suffix(name, '.');
    strip_numeric_suffix(name, '-')
}

/// Remove `{sep}{digits}` from the end of `name`, if present
fn strip_numeric_suffix(name: &str, sep: char) -> &str {
    match name.rfind(sep) {
        Some(idx) if idx > 0 => {
            let suffix = &name[idx + 1..];
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                &name[..idx]
            } else {
                name
            }
        }
        _ => name,
    }
}

/// Drop the one-letter exon/intron tag from a fragment name
///
/// Some producers name each fragment of a transcript separately, e.g.
/// `ABC123x` for an exon and `ABC123i` for an intron. Other kinds are
/// returned unchanged, as are names consisting of the tag alone.
pub fn strip_legacy_suffix(name: &str, kind: FeatureKind) -> &str {
    let Some(tag) = kind.legacy_name_suffix() else {
        return name;
    };

    match name.chars().last() {
        Some(last) if name.len() > 1 && last.eq_ignore_ascii_case(&tag) => {
            &name[..name.len() - last.len_utf8()]
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name("SW:P51531-2.2"), "P51531-2.2");
        assert_eq!(variant_name("EM:AB:123"), "123");
        assert_eq!(variant_name("P51531"), "P51531");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("SW:P51531-2.2"), "P51531");
        assert_eq!(short_name("EM:AF123456.1"), "AF123456");
        assert_eq!(short_name("TR:Q9H0H5"), "Q9H0H5");
    }

    #[test]
    fn test_short_name_keeps_non_numeric_suffix() {
        assert_eq!(short_name("ABC-x.v1"), "ABC-x.v1");
        assert_eq!(short_name("gene.a"), "gene.a");
        assert_eq!(short_name(".5"), ".5");
    }

    #[test]
    fn test_strip_legacy_suffix() {
        assert_eq!(strip_legacy_suffix("ABC123x", FeatureKind::Exon), "ABC123");
        assert_eq!(strip_legacy_suffix("ABC123X", FeatureKind::Exon), "ABC123");
        assert_eq!(strip_legacy_suffix("ABC123i", FeatureKind::Intron), "ABC123");
        assert_eq!(strip_legacy_suffix("ABC123I", FeatureKind::Intron), "ABC123");
    }

    #[test]
    fn test_strip_legacy_suffix_other_kinds() {
        assert_eq!(strip_legacy_suffix("ABC123x", FeatureKind::Cds), "ABC123x");
        assert_eq!(strip_legacy_suffix("ABC123i", FeatureKind::Exon), "ABC123i");
        assert_eq!(strip_legacy_suffix("x", FeatureKind::Exon), "x");
    }
}
