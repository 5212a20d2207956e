use std::collections::BTreeMap;

use fxhash::FxHashMap;
use log::debug;

use flankfold_core::errors::Result;
use flankfold_core::models::SignatureTable;
use flankfold_core::models::signature::reference_trinucleotide;

const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        _ => b'N',
    }
}

///
/// Reverse complement of a nucleotide sequence. Bases outside `ACGT` become `N`.
///
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .bytes()
        .rev()
        .map(|b| complement(b.to_ascii_uppercase()) as char)
        .collect()
}

///
/// Mutation propensity of each reference trinucleotide under one signature.
///
/// Every context is stored together with its reverse complement, so both
/// strands always resolve to the same value.
///
#[derive(Debug, Clone, Default)]
pub struct TrinucleotideProbabilityMap {
    probabilities: FxHashMap<[u8; 3], f64>,
}

impl TrinucleotideProbabilityMap {
    ///
    /// Build the map from per reference trinucleotide propensities. Values of
    /// repeated trinucleotides are summed before both strands are stored.
    ///
    pub fn from_reference_probabilities<'a, I>(probabilities: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut summed: BTreeMap<[u8; 3], f64> = BTreeMap::new();
        for (trinucleotide, probability) in probabilities {
            if let Some(key) = context_key(trinucleotide.as_bytes()) {
                *summed.entry(key).or_default() += probability;
            }
        }

        let mut map = TrinucleotideProbabilityMap::default();
        for (key, probability) in summed {
            map.insert_both_strands(key, probability);
        }
        map
    }

    ///
    /// Sum the probabilities of the three alternates of each reference
    /// trinucleotide for one signature of an SBS96 table.
    ///
    pub fn from_signature_table(table: &SignatureTable, signature: &str) -> Result<Self> {
        let column = table.column(signature)?;
        let per_reference: Vec<(String, f64)> = column
            .into_iter()
            .filter_map(|(mutation_type, probability)| {
                reference_trinucleotide(mutation_type).map(|tri| (tri, probability))
            })
            .collect();

        let map = TrinucleotideProbabilityMap::from_reference_probabilities(
            per_reference.iter().map(|(tri, p)| (tri.as_str(), *p)),
        );
        debug!(
            "Built trinucleotide map for {} with {} contexts",
            signature,
            map.len()
        );
        Ok(map)
    }

    /// Every one of the 64 contexts with the same propensity.
    pub fn uniform(probability: f64) -> Self {
        let mut map = TrinucleotideProbabilityMap::default();
        for a in NUCLEOTIDES {
            for b in NUCLEOTIDES {
                for c in NUCLEOTIDES {
                    map.probabilities.insert([a, b, c], probability);
                }
            }
        }
        map
    }

    fn insert_both_strands(&mut self, key: [u8; 3], probability: f64) {
        let reverse = [complement(key[2]), complement(key[1]), complement(key[0])];
        self.probabilities.insert(key, probability);
        self.probabilities.insert(reverse, probability);
    }

    /// Propensity of a context, 0 when the context is unknown.
    pub fn get(&self, context: &str) -> f64 {
        context_key(context.as_bytes())
            .and_then(|key| self.probabilities.get(&key).copied())
            .unwrap_or(0.0)
    }

    ///
    /// Unnormalised propensity of every window position. Position `i` takes
    /// the context `sequence[i..i + 3]`, centred on the window position.
    ///
    pub fn position_weights(&self, sequence: &str, window_size: usize) -> Vec<f64> {
        sequence
            .as_bytes()
            .windows(3)
            .take(window_size)
            .map(|context| {
                context_key(context)
                    .and_then(|key| self.probabilities.get(&key).copied())
                    .unwrap_or(0.0)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Contexts and propensities in lexicographic order.
    pub fn to_sorted_map(&self) -> BTreeMap<String, f64> {
        self.probabilities
            .iter()
            .map(|(key, p)| (String::from_utf8_lossy(key).into_owned(), *p))
            .collect()
    }
}

fn context_key(context: &[u8]) -> Option<[u8; 3]> {
    match context {
        [a, b, c] => Some([
            a.to_ascii_uppercase(),
            b.to_ascii_uppercase(),
            c.to_ascii_uppercase(),
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn sbs_table() -> SignatureTable {
        let mutation_types = vec![
            "A[C>A]A", "A[C>G]A", "A[C>T]A", "A[T>A]C", "A[T>C]C", "A[T>G]C", "G[C>T]G",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let probabilities = vec![
            vec![0.01, 0.1],
            vec![0.02, 0.1],
            vec![0.03, 0.1],
            vec![0.001, 0.2],
            vec![0.002, 0.2],
            vec![0.003, 0.2],
            vec![0.5, 0.0],
        ];
        SignatureTable::new(
            mutation_types,
            vec!["SBS1".to_string(), "SBS5".to_string()],
            probabilities,
        )
        .unwrap()
    }

    #[rstest]
    #[case("ACG", "CGT")]
    #[case("TTA", "TAA")]
    #[case("acn", "NGT")]
    fn test_reverse_complement(#[case] sequence: &str, #[case] expected: &str) {
        assert_eq!(reverse_complement(sequence), expected);
    }

    #[rstest]
    fn test_alternates_are_summed(sbs_table: SignatureTable) {
        let map = TrinucleotideProbabilityMap::from_signature_table(&sbs_table, "SBS1").unwrap();
        assert!((map.get("ACA") - 0.06).abs() < 1e-15);
        assert!((map.get("ATC") - 0.006).abs() < 1e-15);
        assert_eq!(map.get("GCG"), 0.5);
        assert_eq!(map.get("AAA"), 0.0);
    }

    #[rstest]
    fn test_strand_symmetry(sbs_table: SignatureTable) {
        for signature in ["SBS1", "SBS5"] {
            let map =
                TrinucleotideProbabilityMap::from_signature_table(&sbs_table, signature).unwrap();
            for context in map.to_sorted_map().keys() {
                assert_eq!(map.get(context), map.get(&reverse_complement(context)));
            }
        }
    }

    #[rstest]
    fn test_unknown_signature(sbs_table: SignatureTable) {
        assert!(TrinucleotideProbabilityMap::from_signature_table(&sbs_table, "SBS40").is_err());
    }

    #[rstest]
    fn test_position_weights_use_centred_context() {
        let map = TrinucleotideProbabilityMap::from_reference_probabilities(vec![
            ("ACG", 1.0),
            ("CGT", 2.0),
        ]);
        // CGT is the reverse complement of ACG; the later reference wins for both strands
        assert_eq!(map.get("ACG"), 2.0);

        let weights = map.position_weights("AACGTN", 4);
        assert_eq!(weights, vec![0.0, 2.0, 2.0, 0.0]);
    }

    #[rstest]
    fn test_lowercase_and_ambiguous_contexts() {
        let map = TrinucleotideProbabilityMap::uniform(1.0);
        assert_eq!(map.len(), 64);
        assert_eq!(map.get("acg"), 1.0);
        assert_eq!(map.get("ANG"), 0.0);
        assert_eq!(map.get("AC"), 0.0);
    }
}
