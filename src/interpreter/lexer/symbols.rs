use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

use tracing::trace;

/// The registered symbol spellings together with a decomposition memo.
///
/// A maximal run of symbol characters such as `*-` has to be split into known
/// spellings (`*` then `-`). The split is a pure function of the run for a
/// fixed set of spellings, so every result is cached, failures included.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashSet<String>,
    cache:   RefCell<HashMap<String, Option<Vec<String>>>>,
}

impl SymbolTable {
    /// Creates a table from symbol spellings.
    pub fn new<I, S>(symbols: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { symbols: symbols.into_iter().map(Into::into).collect(),
               cache:   RefCell::new(HashMap::new()), }
    }

    /// Returns `true` if `symbol` is a registered spelling.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of memoized runs.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Splits `run` into registered spellings.
    ///
    /// The longest matching prefix is tried first; if the remainder cannot be
    /// split, shorter prefixes are tried in turn.
    ///
    /// # Returns
    /// - `Some(parts)`: The spellings in source order. An empty run yields an
    ///   empty list.
    /// - `None`: If no split exists.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::lexer::symbols::SymbolTable;
    ///
    /// let table = SymbolTable::new(["<", "<-", "->", "-"]);
    /// // `<-` leaves `>` behind, so the split backtracks to `<` and `->`.
    /// assert_eq!(table.decompose("<->"), Some(vec!["<".to_string(), "->".to_string()]));
    /// assert_eq!(table.decompose("<<"), Some(vec!["<".to_string(), "<".to_string()]));
    /// assert_eq!(table.decompose("+"), None);
    /// ```
    #[must_use]
    pub fn decompose(&self, run: &str) -> Option<Vec<String>> {
        if run.is_empty() {
            return Some(Vec::new());
        }
        if let Some(hit) = self.cache.borrow().get(run) {
            trace!(run, "symbol run cache hit");
            return hit.clone();
        }
        trace!(run, "symbol run cache miss");

        let mut boundaries: Vec<usize> = run.char_indices().map(|(i, _)| i).skip(1).collect();
        boundaries.push(run.len());

        let mut result = None;
        for &end in boundaries.iter().rev() {
            let prefix = &run[..end];
            if !self.symbols.contains(prefix) {
                continue;
            }
            if let Some(rest) = self.decompose(&run[end..]) {
                let mut parts = Vec::with_capacity(rest.len() + 1);
                parts.push(prefix.to_string());
                parts.extend(rest);
                result = Some(parts);
                break;
            }
        }

        self.cache.borrow_mut().insert(run.to_string(), result.clone());
        result
    }
}
