//! Prior-balance sort rule
//!
//! Reports carry a pseudo-line for the balance carried over from the previous
//! month ("solde du mois anterieur"). That line must always appear first in
//! any listing or export, ahead of the otherwise-applicable code/label order.

/// Rubrique code of the prior-balance pseudo-line
pub const PRIOR_BALANCE_CODE: &str = "SOLDE-ANT";

/// Label of the prior-balance pseudo-line
pub const PRIOR_BALANCE_LABEL: &str = "SOLDE DU MOIS ANTERIEUR";

/// Accounting imputation reserved for the prior-balance pseudo-line
pub const PRIOR_BALANCE_IMPUTATION: &str = "00.00";

/// View of a report line used by the sort rule.
///
/// Anything with a rubrique code and a label can be sorted; the imputation
/// is optional and only consulted for the prior-balance predicate.
pub trait ReportLine {
    fn code(&self) -> &str;
    fn label(&self) -> &str;

    fn imputation(&self) -> Option<&str> {
        None
    }
}

/// Raw report rows qualify directly: the rubrique code lives under the
/// "rubrique" (or legacy "code") key. Rows without one, like the date-ordered
/// cash-sheet lines, compare equal on code and keep their input order.
impl ReportLine for crate::models::Row {
    fn code(&self) -> &str {
        str_key(self, "rubrique").or_else(|| str_key(self, "code")).unwrap_or("")
    }

    fn label(&self) -> &str {
        str_key(self, "libelle").unwrap_or("")
    }

    fn imputation(&self) -> Option<&str> {
        str_key(self, "imputation")
    }
}

fn str_key<'a>(row: &'a crate::models::Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(|v| v.as_str())
}

/// Whether a line is the designated prior-balance pseudo-entry.
///
/// Matches on any of the fixed code, the fixed label, or the reserved
/// imputation, since legacy data identifies the line inconsistently.
pub fn is_prior_balance<L: ReportLine + ?Sized>(line: &L) -> bool {
    line.code() == PRIOR_BALANCE_CODE
        || line.label().trim().eq_ignore_ascii_case(PRIOR_BALANCE_LABEL)
        || line.imputation() == Some(PRIOR_BALANCE_IMPUTATION)
}

/// Sort lines so the prior-balance entry comes first, then ascending code.
///
/// The sort is stable: multiple prior-balance matches keep their relative
/// order, as do lines sharing a code. Idempotent by construction.
pub fn sort_prior_balance_first<L: ReportLine>(lines: &mut [L]) {
    lines.sort_by(|a, b| {
        let rank_a = !is_prior_balance(a);
        let rank_b = !is_prior_balance(b);
        rank_a.cmp(&rank_b).then_with(|| a.code().cmp(b.code()))
    });
}
