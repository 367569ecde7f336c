use serde::Serialize;

use crate::spec::model::{AssemblyDef, DomainDef};

const HG38: &[(&str, u64)] = &[
    ("chr1", 248_956_422),
    ("chr2", 242_193_529),
    ("chr3", 198_295_559),
    ("chr4", 190_214_555),
    ("chr5", 181_538_259),
    ("chr6", 170_805_979),
    ("chr7", 159_345_973),
    ("chr8", 145_138_636),
    ("chr9", 138_394_717),
    ("chr10", 133_797_422),
    ("chr11", 135_086_622),
    ("chr12", 133_275_309),
    ("chr13", 114_364_328),
    ("chr14", 107_043_718),
    ("chr15", 101_991_189),
    ("chr16", 90_338_345),
    ("chr17", 83_257_441),
    ("chr18", 80_373_285),
    ("chr19", 58_617_616),
    ("chr20", 64_444_167),
    ("chr21", 46_709_983),
    ("chr22", 50_818_468),
    ("chrX", 156_040_895),
    ("chrY", 57_227_415),
    ("chrM", 16_569),
];

const HG19: &[(&str, u64)] = &[
    ("chr1", 249_250_621),
    ("chr2", 243_199_373),
    ("chr3", 198_022_430),
    ("chr4", 191_154_276),
    ("chr5", 180_915_260),
    ("chr6", 171_115_067),
    ("chr7", 159_138_663),
    ("chr8", 146_364_022),
    ("chr9", 141_213_431),
    ("chr10", 135_534_747),
    ("chr11", 135_006_516),
    ("chr12", 133_851_895),
    ("chr13", 115_169_878),
    ("chr14", 107_349_540),
    ("chr15", 102_531_392),
    ("chr16", 90_354_753),
    ("chr17", 81_195_210),
    ("chr18", 78_077_248),
    ("chr19", 59_128_983),
    ("chr20", 63_025_520),
    ("chr21", 48_129_895),
    ("chr22", 51_304_566),
    ("chrX", 155_270_560),
    ("chrY", 59_373_566),
    ("chrM", 16_571),
];

const MM10: &[(&str, u64)] = &[
    ("chr1", 195_471_971),
    ("chr2", 182_113_224),
    ("chr3", 160_039_680),
    ("chr4", 156_508_116),
    ("chr5", 151_834_684),
    ("chr6", 149_736_546),
    ("chr7", 145_441_459),
    ("chr8", 129_401_213),
    ("chr9", 124_595_110),
    ("chr10", 130_694_993),
    ("chr11", 122_082_543),
    ("chr12", 120_129_022),
    ("chr13", 120_421_639),
    ("chr14", 124_902_244),
    ("chr15", 104_043_685),
    ("chr16", 98_207_768),
    ("chr17", 94_987_271),
    ("chr18", 90_702_639),
    ("chr19", 61_431_566),
    ("chrX", 171_031_299),
    ("chrY", 91_744_698),
    ("chrM", 16_299),
];

/// One chromosome with its absolute start offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chromosome {
    /// Name, e.g. `chr1`.
    pub name: String,
    /// Length in base pairs.
    pub size: u64,
    /// Absolute position of base 0.
    pub offset: u64,
}

/// Chromosome sizes of one assembly, concatenated in genome order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChromSizes {
    chromosomes: Vec<Chromosome>,
    total: u64,
}

impl ChromSizes {
    /// Build from `(name, size)` pairs in genome order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut offset = 0u64;
        let chromosomes = pairs
            .into_iter()
            .map(|(name, size)| {
                let c = Chromosome {
                    name: name.into(),
                    size,
                    offset,
                };
                offset = offset.saturating_add(size);
                c
            })
            .collect();
        Self {
            chromosomes,
            total: offset,
        }
    }

    /// Built-in assembly by name (`hg38`, `hg19`, `mm10`).
    pub fn builtin(name: &str) -> Option<Self> {
        let table = match name {
            "hg38" => HG38,
            "hg19" => HG19,
            "mm10" => MM10,
            _ => return None,
        };
        Some(Self::from_pairs(table.iter().copied()))
    }

    /// Sizes for an assembly definition; `None` for an unknown built-in name.
    pub fn for_assembly(def: &AssemblyDef) -> Option<Self> {
        match def {
            AssemblyDef::Named(name) => Self::builtin(name),
            AssemblyDef::Custom(pairs) => Some(Self::from_pairs(
                pairs.iter().map(|(n, s)| (n.as_str(), *s)),
            )),
        }
    }

    /// Sum of all chromosome sizes.
    pub fn total_size(&self) -> u64 {
        self.total
    }

    /// Chromosomes in genome order.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Look a chromosome up by name; `1` also matches `chr1`.
    pub fn chromosome(&self, name: &str) -> Option<&Chromosome> {
        let exact = self.chromosomes.iter().find(|c| c.name == name);
        if exact.is_some() || name.starts_with("chr") {
            return exact;
        }
        let prefixed = format!("chr{name}");
        self.chromosomes.iter().find(|c| c.name == prefixed)
    }

    /// Absolute position of a chromosome-relative coordinate.
    pub fn absolute(&self, chromosome: &str, position: f64) -> Option<f64> {
        self.chromosome(chromosome)
            .map(|c| c.offset as f64 + position)
    }

    /// Whole genome as `[0, total]`.
    pub fn whole_genome(&self) -> [f64; 2] {
        [0.0, self.total as f64]
    }

    /// Absolute `[start, end]` for a domain; `None` when its chromosome is unknown.
    pub fn absolute_domain(&self, domain: &DomainDef) -> Option<[f64; 2]> {
        match domain {
            DomainDef::Interval { interval } => Some(*interval),
            DomainDef::Chromosome {
                chromosome,
                interval,
            } => {
                let c = self.chromosome(chromosome)?;
                let base = c.offset as f64;
                Some(match interval {
                    Some([s, e]) => [base + s, base + e],
                    None => [base, base + c.size as f64],
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/assembly.rs"]
mod tests;
