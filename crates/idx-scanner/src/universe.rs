//! Scan universe.

use idx_core::types::Symbol;
use rand::seq::SliceRandom;

/// Liquid IDX names: LQ45 constituents plus highly traded second liners.
/// Scanning only liquid stocks keeps a full pass inside the upstream
/// source's patience.
const LIQUID_CODES: &[&str] = &[
    // LQ45
    "BBCA", "BBRI", "BMRI", "BBNI", "TLKM", "ASII", "UNTR", "ICBP", "GOTO", "AMMN",
    "BRPT", "ADRO", "ANTM", "INCO", "MDKA", "PGAS", "PTBA", "UNVR", "CPIN", "KLBF",
    "INDF", "GGRM", "EXCL", "BYAN", "ITMG", "TOWR", "MEDC", "SMGR", "JSMR", "CTRA",
    "BBTN", "INKP", "TKIM", "BUKA", "TPIA", "EMTK", "MAIN", "PWON", "BRIS", "ELSA",
    // Liquid second liners
    "ACES", "AALI", "AKRA", "ARTO", "ASRI", "BSDE", "DSNG", "ERAA", "ESSA", "HRUM",
    "ISAT", "JPFA", "KAEF", "LPPF", "MAPI", "MBMA", "MNCN", "MYOR", "PANI", "PTRO",
    "RALS", "SCMA", "SIDO", "SRTG", "SSIA", "TAPG", "TBIG", "TINS", "ULTJ", "WIKA",
    // Banking
    "BNGA", "BTPS", "MEGA", "NISP", "BJBR", "PNBN", "BJTM", "NOBU", "BNBA", "BBYB",
    // Tech & digital
    "MTEL", "LINK", "WIFI", "DNET",
    // Property
    "SMRA", "APLN", "DILD", "BEST", "MKPI",
    // Commodities & mining
    "INDY", "DOID", "CITA", "ZINC", "GEMS", "PSAB",
    // Consumer goods
    "ROTI",
];

/// A fixed, ordered set of scan symbols.
///
/// Static configuration data: built once at startup and never mutated at
/// runtime. The built-in list mirrors the liquid IDX names; deployments
/// can supply their own codes from config.
#[derive(Debug, Clone)]
pub struct Universe {
    symbols: Vec<Symbol>,
}

impl Universe {
    /// The built-in liquid-stock universe.
    pub fn liquid() -> Self {
        Self::from_codes(LIQUID_CODES.iter().copied())
    }

    /// Build a universe from bare ticker codes; duplicates are dropped,
    /// first occurrence wins, order otherwise preserved.
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut symbols = Vec::new();
        for code in codes {
            let symbol = Symbol::parse(code);
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// A random sample of up to `n` symbols, used by the alert scheduler
    /// to spread scan load across runs.
    pub fn sample(&self, n: usize) -> Vec<Symbol> {
        let mut rng = rand::thread_rng();
        self.symbols
            .choose_multiple(&mut rng, n.min(self.symbols.len()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquid_universe_is_canonical_and_deduped() {
        let universe = Universe::liquid();
        assert!(universe.len() > 80);

        for symbol in universe.symbols() {
            assert!(symbol.as_str().ends_with(".JK"));
        }

        let mut seen = universe.symbols().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), universe.len());
    }

    #[test]
    fn test_from_codes_dedupes_preserving_order() {
        let universe = Universe::from_codes(["BBCA", "goto", "BBCA.JK", "TLKM"]);
        let codes: Vec<&str> = universe.symbols().iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["BBCA", "GOTO", "TLKM"]);
    }

    #[test]
    fn test_sample_bounds() {
        let universe = Universe::from_codes(["A", "B", "C"]);

        let sample = universe.sample(2);
        assert_eq!(sample.len(), 2);
        for symbol in &sample {
            assert!(universe.symbols().contains(symbol));
        }

        // Asking for more than exists returns everything.
        assert_eq!(universe.sample(10).len(), 3);
    }
}
