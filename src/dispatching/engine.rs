//! Rule engine for ordering leveled queues.
//!
//! Composes dispatching rules in sequence: the first rule decides, later
//! rules only break its ties, and a final tie-breaker makes the order total.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::Arc;

use super::{rules, DispatchingRule};
use crate::models::{JobId, JobTable};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Keep the current queue order (stable sort).
    #[default]
    NextRule,
    /// Deterministic by job id (ascending).
    ById,
}

/// A composable rule engine for job ordering.
///
/// # Example
/// ```
/// use u_mlfq::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Srt)
///     .with_tie_breaker(rules::Fifo);
/// assert_eq!(engine.rule_names(), vec!["SRT", "FIFO"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::NextRule,
        }
    }

    /// Shortest remaining time first, ties broken by job id.
    pub fn shortest_remaining() -> Self {
        Self::new()
            .with_rule(rules::Srt)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Compares two jobs; `Less` means `a` runs first.
    pub fn compare(&self, a: JobId, b: JobId, table: &JobTable) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(table.job(a), table.state(a));
            let score_b = rule.evaluate(table.job(b), table.state(b));
            if score_a != score_b {
                return score_a.cmp(&score_b);
            }
        }

        // All rules tied → use final tie-breaker
        match &self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ById => a.cmp(&b),
        }
    }

    /// Re-sorts a queue in place, highest priority at the front.
    pub fn sort_queue(&self, queue: &mut VecDeque<JobId>, table: &JobTable) {
        queue
            .make_contiguous()
            .sort_by(|&a, &b| self.compare(a, b, table));
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::shortest_remaining()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Tick};

    /// Builds a table where job `i` has `remaining[i]` ticks left.
    fn make_table(remaining: &[Tick]) -> JobTable {
        let jobs = remaining
            .iter()
            .enumerate()
            .map(|(id, _)| Job::new(id, format!("J{id}")).with_service(100).with_arrival(10 - id as Tick))
            .collect();
        let mut table = JobTable::new(jobs);
        for (id, &left) in remaining.iter().enumerate() {
            table.state_mut(id).remaining = left;
        }
        table
    }

    #[test]
    fn test_srt_ordering() {
        let table = make_table(&[7, 2, 5]);
        let mut queue: VecDeque<JobId> = VecDeque::from(vec![0, 1, 2]);
        RuleEngine::shortest_remaining().sort_queue(&mut queue, &table);
        assert_eq!(queue, VecDeque::from(vec![1, 2, 0]));
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let table = make_table(&[4, 4, 4]);
        let mut queue: VecDeque<JobId> = VecDeque::from(vec![2, 0, 1]);
        RuleEngine::shortest_remaining().sort_queue(&mut queue, &table);
        // SRT ties → ById → ascending ids
        assert_eq!(queue, VecDeque::from(vec![0, 1, 2]));
    }

    #[test]
    fn test_stable_without_final_tie_breaker() {
        let table = make_table(&[4, 4, 1]);
        let engine = RuleEngine::new().with_rule(rules::Srt);
        let mut queue: VecDeque<JobId> = VecDeque::from(vec![1, 0, 2]);
        engine.sort_queue(&mut queue, &table);
        assert_eq!(queue, VecDeque::from(vec![2, 1, 0]));
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        // Arrival ticks are 10 - id, so higher ids arrived earlier.
        let table = make_table(&[3, 3]);
        let engine = RuleEngine::new()
            .with_rule(rules::Srt)
            .with_tie_breaker(rules::Fifo)
            .with_final_tie_breaker(TieBreaker::ById);
        assert_eq!(engine.compare(0, 1, &table), Ordering::Greater);
    }

    #[test]
    fn test_srt_orders_remaining_beyond_i64() {
        let table = make_table(&[u64::MAX, 3, i64::MAX as Tick + 1]);
        let mut queue: VecDeque<JobId> = VecDeque::from(vec![0, 2, 1]);
        RuleEngine::shortest_remaining().sort_queue(&mut queue, &table);
        assert_eq!(queue, VecDeque::from(vec![1, 2, 0]));
    }

    #[test]
    fn test_debug_lists_rules() {
        let text = format!("{:?}", RuleEngine::default());
        assert!(text.contains("SRT"));
        assert!(text.contains("ById"));
    }
}
