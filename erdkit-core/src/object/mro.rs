//! C3 linearization.

use super::ClassId;

/// Compute the MRO of a new class `id` with the given direct bases.
///
/// `mro_of` returns the already computed MRO of a base. Returns `None` when
/// no consistent order exists.
pub(crate) fn linearize<'a>(
    id: ClassId,
    bases: &[ClassId],
    mro_of: impl Fn(ClassId) -> &'a [ClassId],
) -> Option<Vec<ClassId>> {
    let mut seqs: Vec<Vec<ClassId>> = bases.iter().map(|&b| mro_of(b).to_vec()).collect();
    seqs.push(bases.to_vec());

    let mut out = vec![id];
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Some(out);
        }

        // first head that does not appear in the tail of any sequence
        let head = seqs
            .iter()
            .map(|s| s[0])
            .find(|candidate| !seqs.iter().any(|s| s[1..].contains(candidate)))?;

        out.push(head);
        for seq in &mut seqs {
            if seq[0] == head {
                seq.remove(0);
            }
        }
    }
}
