use super::error::HandError;
use crate::Chips;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Results fixed by [`PotEngine::finalize`].
#[derive(Debug, Clone)]
struct Settled {
    total: Chips,
    returned: BTreeMap<String, Chips>,
    pots: Vec<Chips>,
}

/// End-of-hand accounting: uncalled-bet refund and main/side pot partition.
///
/// Money is fed in as it is committed; folds only remove a player from
/// contention, their chips stay in. [`PotEngine::finalize`] runs once and
/// every query before it fails with [`HandError::NotFinalized`].
#[derive(Debug, Clone, Default)]
pub struct PotEngine {
    committed: Vec<(String, Chips)>,
    folded: BTreeSet<String>,
    settled: Option<Settled>,
}

impl PotEngine {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn seat(&mut self, name: &str) {
        if !self.committed.iter().any(|(n, _)| n == name) {
            self.committed.push((name.to_string(), Chips::ZERO));
        }
    }
    pub fn add(&mut self, name: &str, amount: Chips) {
        match self.committed.iter_mut().find(|(n, _)| n == name) {
            Some((_, committed)) => *committed += amount,
            None => self.committed.push((name.to_string(), amount)),
        }
    }
    pub fn fold(&mut self, name: &str) {
        self.folded.insert(name.to_string());
    }
    pub fn is_contender(&self, name: &str) -> bool {
        !self.folded.contains(name)
    }
    /// cumulative commitment; net of any refund once finalized
    pub fn committed(&self, name: &str) -> Chips {
        self.committed
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or_default()
    }
    pub fn is_finalized(&self) -> bool {
        self.settled.is_some()
    }

    pub fn total(&self) -> Result<Chips, HandError> {
        self.settled().map(|s| s.total)
    }
    /// main pot first, then side pots in order
    pub fn pots(&self) -> Result<&[Chips], HandError> {
        self.settled().map(|s| s.pots.as_slice())
    }
    pub fn returned(&self) -> Result<&BTreeMap<String, Chips>, HandError> {
        self.settled().map(|s| &s.returned)
    }

    pub fn finalize(&mut self) -> Result<(), HandError> {
        if self.is_finalized() {
            log::error!("pot finalized twice");
            return Err(HandError::AlreadyFinalized);
        }
        let mut total = self.committed.iter().map(|(_, c)| *c).sum::<Chips>();
        let mut returned = BTreeMap::new();
        if let Some((name, gap)) = self.uncalled() {
            log::debug!("uncalled bet {} returned to {}", gap, name);
            total -= gap;
            self.add(&name, -gap);
            returned.insert(name, gap);
        }
        let pots = self.partition();
        debug_assert!(pots.iter().sum::<Chips>() == total);
        self.settled = Some(Settled {
            total,
            returned,
            pots,
        });
        Ok(())
    }

    fn settled(&self) -> Result<&Settled, HandError> {
        self.settled.as_ref().ok_or(HandError::NotFinalized)
    }

    /// Highest commitment minus the second highest, if nobody matched it.
    /// A lone forced bet with nothing else in is not an uncalled bet.
    fn uncalled(&self) -> Option<(String, Chips)> {
        let ref mut sorted = self.committed.iter().collect::<Vec<_>>();
        sorted.sort_by(|(a, x), (b, y)| x.cmp(y).then_with(|| a.cmp(b)));
        match sorted.as_slice() {
            [.., (_, second), (name, highest)] if *second > Chips::ZERO && highest > second => {
                Some((name.clone(), *highest - *second))
            }
            _ => None,
        }
    }

    /// Peels one pot per contender threshold, smallest first, until no
    /// commitment is left. Chips left only by folded players are dead money
    /// for the last pot.
    fn partition(&self) -> Vec<Chips> {
        let mut pots = Vec::new();
        let mut remaining = self
            .committed
            .iter()
            .filter(|(_, c)| *c > Chips::ZERO)
            .map(|(n, c)| (n.as_str(), *c))
            .collect::<Vec<_>>();
        remaining.sort_by(|(a, x), (b, y)| x.cmp(y).then_with(|| a.cmp(b)));
        while !remaining.is_empty() {
            let threshold = remaining
                .iter()
                .filter(|(n, _)| self.is_contender(n))
                .map(|(_, c)| *c)
                .min();
            match threshold {
                Some(threshold) => {
                    pots.push(remaining.iter().map(|(_, c)| (*c).min(threshold)).sum());
                    remaining = remaining
                        .into_iter()
                        .map(|(n, c)| (n, c - threshold))
                        .filter(|(_, c)| *c > Chips::ZERO)
                        .collect();
                }
                None => {
                    let dead = remaining.iter().map(|(_, c)| *c).sum::<Chips>();
                    match pots.last_mut() {
                        Some(last) => *last += dead,
                        None => pots.push(dead),
                    }
                    break;
                }
            }
        }
        pots
    }
}
