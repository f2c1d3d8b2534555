//! Depth-first branch and bound over binary inclusion decisions.
//!
//! The search drives its own frame stack, so deep instances consume heap
//! rather than native stack.

use std::time::{Duration, Instant};

use siteplan_core::{Limits, SolveError};

/// Improvements smaller than this are treated as ties.
const IMPROVEMENT_EPSILON: f64 = 1e-12;

/// Relative capacity slack applied by the pruning bound only.
///
/// Prefix sums round differently from running totals; widening the
/// relaxation keeps the bound an upper bound.
const BOUND_SLACK: f64 = 1e-9;

/// How often, in nodes, the wall clock is consulted.
const CLOCK_CHECK_INTERVAL: u64 = 256;

/// One binary decision: objective coefficient and resource use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Item {
    pub(crate) value: f64,
    pub(crate) cost: f64,
    pub(crate) teammates: u64,
    /// Position of the item's name in ascending name order.
    pub(crate) name_rank: usize,
}

/// Operational limits for one search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchLimits {
    pub(crate) max_nodes: u64,
    pub(crate) time_limit: Duration,
}

/// Result of an exhausted search.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchOutcome {
    /// Indices into the item slice, ascending.
    pub(crate) selected: Vec<usize>,
    pub(crate) value: f64,
    pub(crate) nodes_explored: u64,
}

/// Finds the highest-value feasible subset of `items`.
///
/// Items are branched in descending value density, ties broken by name, and
/// the inclusion branch is explored first. Among equally valued subsets the
/// first one completed in that order wins, so the answer depends on the
/// candidates and not on their input order.
pub(crate) fn maximise(
    items: &[Item],
    limits: &Limits,
    search_limits: SearchLimits,
) -> Result<SearchOutcome, SolveError> {
    let mut search = Search::new(items, limits, search_limits);
    search.run()?;
    Ok(SearchOutcome {
        selected: search.best,
        value: search.best_value,
        nodes_explored: search.nodes,
    })
}

/// Partial assignment: the first `depth` items of the branching order are
/// decided and these are their totals.
#[derive(Debug, Clone, Copy)]
struct Node {
    depth: usize,
    value: f64,
    cost: f64,
    teammates: u64,
}

impl Node {
    const ROOT: Self = Self {
        depth: 0,
        value: 0.0,
        cost: 0.0,
        teammates: 0,
    };

    const fn skip(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    #[expect(clippy::float_arithmetic, reason = "running totals")]
    fn include(self, item: Item) -> Self {
        Self {
            depth: self.depth + 1,
            value: self.value + item.value,
            cost: self.cost + item.cost,
            teammates: self.teammates + item.teammates,
        }
    }
}

enum Frame {
    /// First visit to a node.
    Enter(Node),
    /// The inclusion subtree below `Node` is exhausted; undo it and try
    /// leaving the item out.
    Exclude(Node),
}

struct Search<'a> {
    items: &'a [Item],
    limits: &'a Limits,
    search_limits: SearchLimits,
    started_at: Instant,
    /// Branching order: item indices by descending value per unit cost.
    order: Vec<usize>,
    /// Depth at which each item is decided.
    depth_of: Vec<usize>,
    /// Item indices by descending value per teammate, for the headcount bound.
    by_teammates: Vec<usize>,
    /// Entry `k` totals the first `k` items of `order`.
    prefix_value: Vec<f64>,
    prefix_cost: Vec<f64>,
    prefix_teammates: Vec<u64>,
    capacity_slack: f64,
    current: Vec<usize>,
    best: Vec<usize>,
    best_value: f64,
    nodes: u64,
}

impl<'a> Search<'a> {
    #[expect(clippy::float_arithmetic, reason = "prefix sums of floats")]
    fn new(items: &'a [Item], limits: &'a Limits, search_limits: SearchLimits) -> Self {
        let order = ranked(items, |item| ratio(item.value, item.cost));
        let by_teammates = ranked(items, |item| teammate_ratio(item.value, item.teammates));
        let mut depth_of = vec![0; items.len()];
        for (depth, &index) in order.iter().enumerate() {
            if let Some(slot) = depth_of.get_mut(index) {
                *slot = depth;
            }
        }

        let mut prefix_value = vec![0.0];
        let mut prefix_cost = vec![0.0];
        let mut prefix_teammates = vec![0];
        let (mut value, mut cost, mut teammates) = (0.0, 0.0, 0);
        for item in order.iter().filter_map(|&index| items.get(index)) {
            value += item.value;
            cost += item.cost;
            teammates += item.teammates;
            prefix_value.push(value);
            prefix_cost.push(cost);
            prefix_teammates.push(teammates);
        }

        Self {
            items,
            limits,
            search_limits,
            started_at: Instant::now(),
            order,
            depth_of,
            by_teammates,
            prefix_value,
            prefix_cost,
            prefix_teammates,
            capacity_slack: BOUND_SLACK * cost.max(1.0),
            current: Vec::new(),
            best: Vec::new(),
            best_value: 0.0,
            nodes: 0,
        }
    }

    fn run(&mut self) -> Result<(), SolveError> {
        let mut stack = vec![Frame::Enter(Node::ROOT)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => self.enter(node, &mut stack)?,
                Frame::Exclude(node) => {
                    self.current.pop();
                    stack.push(Frame::Enter(node.skip()));
                }
            }
        }
        Ok(())
    }

    fn visit(&mut self) -> Result<(), SolveError> {
        self.nodes += 1;
        let out_of_nodes = self.nodes > self.search_limits.max_nodes;
        let out_of_time = self.nodes.is_multiple_of(CLOCK_CHECK_INTERVAL)
            && self.started_at.elapsed() > self.search_limits.time_limit;
        if out_of_nodes || out_of_time {
            return Err(SolveError::Timeout {
                nodes_explored: self.nodes,
                elapsed: self.started_at.elapsed(),
            });
        }
        Ok(())
    }

    #[expect(clippy::float_arithmetic, reason = "objective and cost totals are floating point")]
    fn enter(&mut self, node: Node, stack: &mut Vec<Frame>) -> Result<(), SolveError> {
        self.visit()?;
        let Some(&index) = self.order.get(node.depth) else {
            if node.value > self.best_value + IMPROVEMENT_EPSILON {
                self.record(node.value, node.depth);
            }
            return Ok(());
        };

        let (rest_value, rest_cost, rest_teammates) = self.rest(node.depth);
        if self
            .limits
            .admits(node.cost + rest_cost, node.teammates + rest_teammates)
        {
            // Every undecided item fits, so taking all of them is optimal here.
            let total = node.value + rest_value;
            if total <= self.best_value + IMPROVEMENT_EPSILON || self.record(total, node.depth) {
                return Ok(());
            }
        } else if self.bound(node) <= self.best_value + IMPROVEMENT_EPSILON {
            return Ok(());
        }

        let Some(item) = self.items.get(index).copied() else {
            return Ok(());
        };
        let included = node.include(item);
        if self.limits.admits(included.cost, included.teammates) {
            self.current.push(index);
            stack.push(Frame::Exclude(node));
            stack.push(Frame::Enter(included));
        } else {
            stack.push(Frame::Enter(node.skip()));
        }
        Ok(())
    }

    /// Installs `current` plus every item from `depth` onwards as the
    /// incumbent.
    ///
    /// Totals are re-summed in item order, the order solutions report them
    /// in. Returns `false`, leaving the incumbent alone, when that sum breaks
    /// the limits.
    #[expect(clippy::float_arithmetic, reason = "summing adjusted costs")]
    fn record(&mut self, value: f64, depth: usize) -> bool {
        let mut selection = self.current.clone();
        selection.extend_from_slice(self.order.get(depth..).unwrap_or_default());
        selection.sort_unstable();
        let (cost, teammates) = selection
            .iter()
            .filter_map(|&index| self.items.get(index))
            .fold((0.0, 0), |(cost, team), item| {
                (cost + item.cost, team + item.teammates)
            });
        if !self.limits.admits(cost, teammates) {
            return false;
        }
        self.best = selection;
        self.best_value = value;
        true
    }

    /// Totals of the undecided items from `depth` onwards.
    #[expect(clippy::float_arithmetic, reason = "differences of prefix sums")]
    fn rest(&self, depth: usize) -> (f64, f64, u64) {
        let span = |prefix: &[f64]| {
            let total = prefix.last().copied().unwrap_or_default();
            total - prefix.get(depth).copied().unwrap_or_default()
        };
        let teammates = self
            .prefix_teammates
            .last()
            .copied()
            .unwrap_or_default()
            .saturating_sub(self.prefix_teammates.get(depth).copied().unwrap_or_default());
        (span(&self.prefix_value), span(&self.prefix_cost), teammates)
    }

    /// Upper bound on the value reachable below `node`.
    ///
    /// The budget relaxation is always taken; the headcount relaxation only
    /// when the undecided items could overrun the remaining seats.
    #[expect(clippy::float_arithmetic, reason = "relaxations are floating point")]
    fn bound(&self, node: Node) -> f64 {
        let capacity = (self.limits.budget() - node.cost).max(0.0) + self.capacity_slack;
        let seats = u64::from(self.limits.max_teammates()).saturating_sub(node.teammates);
        let budget_relaxation = self.budget_relaxation(node.depth, capacity);
        let (_, _, rest_teammates) = self.rest(node.depth);
        let relaxation = if rest_teammates <= seats {
            budget_relaxation
        } else {
            budget_relaxation.min(self.seat_relaxation(node.depth, capacity, seats))
        };
        node.value + relaxation
    }

    /// Value of the undecided items that fit `capacity` whole, taken in
    /// branching order, plus the full value of the first one that does not.
    #[expect(clippy::float_arithmetic, reason = "differences of prefix sums")]
    fn budget_relaxation(&self, depth: usize, capacity: f64) -> f64 {
        let base_cost = self.prefix_cost.get(depth).copied().unwrap_or_default();
        let base_value = self.prefix_value.get(depth).copied().unwrap_or_default();
        let tail = self.prefix_cost.get(depth..).unwrap_or_default();
        let whole = tail
            .partition_point(|&total| total - base_cost <= capacity)
            .saturating_sub(1);
        let end = depth + whole;
        let fitted = self
            .prefix_value
            .get(end)
            .map_or(0.0, |&value| value - base_value);
        let breaking = self
            .order
            .get(end)
            .and_then(|&index| self.items.get(index))
            .map_or(0.0, |item| item.value);
        fitted + breaking
    }

    /// Fractional knapsack over undecided items with seats as the weight.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "fractional relaxation over integer headcounts"
    )]
    fn seat_relaxation(&self, depth: usize, capacity: f64, seats: u64) -> f64 {
        let open = self.by_teammates.iter().filter_map(|&index| {
            let decided = self.depth_of.get(index).copied().unwrap_or_default();
            self.items.get(index).filter(|item| {
                decided >= depth && item.teammates <= seats && item.cost <= capacity
            })
        });
        let mut remaining = seats;
        let mut total = 0.0;
        for item in open {
            if item.teammates <= remaining {
                remaining -= item.teammates;
                total += item.value;
            } else {
                total += item.value * remaining as f64 / item.teammates as f64;
                break;
            }
        }
        total
    }
}

fn ranked(items: &[Item], key: impl Fn(&Item) -> f64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by(|&lhs, &rhs| {
        let (lhs_key, lhs_name) = sort_key(items, lhs, &key);
        let (rhs_key, rhs_name) = sort_key(items, rhs, &key);
        rhs_key.total_cmp(&lhs_key).then(lhs_name.cmp(&rhs_name))
    });
    indices
}

fn sort_key(items: &[Item], index: usize, key: impl Fn(&Item) -> f64) -> (f64, usize) {
    items
        .get(index)
        .map_or((0.0, index), |item| (key(item), item.name_rank))
}

#[expect(clippy::float_arithmetic, reason = "value density")]
fn ratio(value: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        value / weight
    } else if value > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

#[expect(clippy::cast_precision_loss, reason = "headcounts are far below 2^52")]
fn teammate_ratio(value: f64, teammates: u64) -> f64 {
    ratio(value, teammates as f64)
}
