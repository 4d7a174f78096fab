//! State-space search over brick positions.
//!
//! Every strategy expands nodes through the same move generator, which tries
//! directions in the configured order and drops moves that leave the brick
//! unsupported. What counts as "already seen" differs per strategy:
//! - BFS and DFS keep one visited set for the whole search.
//! - UCS, A* and Greedy keep the best known cost per state and re-push a state
//!   whenever a strictly cheaper path to it turns up. Superseded heap entries
//!   are discarded when popped.
//!
//! Nodes live in a [`SearchTree`] arena owned by the running search and are
//! dropped once the path has been extracted.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use log::{debug, info, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::brick::{BrickState, Direction, DirectionOrder};
use crate::config::{SearchConfig, Strategy};
use crate::heuristic::CostTable;
use crate::level::Level;
use crate::tree::SearchTree;

/// Progress record for one expanded node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// 0-based expansion counter.
    pub index: usize,
    pub depth: u32,
    /// Key the node was popped with (`g`, `g + h` or `h`); `None` for BFS and DFS.
    pub priority: Option<f64>,
    pub state: BrickState,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Directions from the start to the goal.
    Solved(Vec<Direction>),
    /// Every reachable state was explored without reaching the goal.
    Exhausted,
    /// The configured step limit was hit first.
    StepLimit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Nodes expanded, i.e. number of [`Step`]s reported.
    pub expanded: usize,
    /// Nodes added to the search tree, not counting the root.
    pub generated: usize,
}

impl SearchReport {
    pub fn path(&self) -> Option<&[Direction]> {
        match &self.outcome {
            Outcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved(_))
    }
}

/// Runs the configured search on `level`.
pub fn solve(level: &Level, config: &SearchConfig) -> SearchReport {
    solve_with(level, config, |_| {})
}

/// Runs the configured search, calling `on_step` for every expanded node.
pub fn solve_with(
    level: &Level,
    config: &SearchConfig,
    mut on_step: impl FnMut(&Step),
) -> SearchReport {
    let search = Search {
        level,
        order: config.order,
        step_limit: config.step_limit,
    };

    let report = match config.strategy {
        Strategy::Bfs => search.breadth_first(&mut on_step),
        Strategy::Dfs => search.depth_first(&mut on_step),
        Strategy::Ucs => search.best_first(&Priority::Cost, &mut on_step),
        Strategy::Greedy => {
            let table = CostTable::build(level.grid(), level.target(), config.heuristic);
            search.best_first(&Priority::Estimate(table), &mut on_step)
        }
        Strategy::AStar => {
            let table = CostTable::build(level.grid(), level.target(), config.heuristic);
            search.best_first(&Priority::CostPlusEstimate(table), &mut on_step)
        }
    };

    match &report.outcome {
        Outcome::Solved(path) => info!(
            "{} search completed: {} moves, {} expanded, {} generated",
            config.strategy,
            path.len(),
            report.expanded,
            report.generated
        ),
        Outcome::Exhausted => info!(
            "{} search exhausted the frontier after {} expansions: no solution",
            config.strategy, report.expanded
        ),
        Outcome::StepLimit => info!(
            "{} search stopped at the step limit of {}",
            config.strategy, report.expanded
        ),
    }

    report
}

/// Frontier key for the priority-queue strategies.
enum Priority {
    /// `g`: uniform-cost search.
    Cost,
    /// `h`: greedy best-first.
    Estimate(CostTable),
    /// `g + h`: A*.
    CostPlusEstimate(CostTable),
}

impl Priority {
    fn of(&self, state: &BrickState, cost: u32) -> f64 {
        match self {
            Priority::Cost => f64::from(cost),
            Priority::Estimate(table) => table.estimate(state),
            Priority::CostPlusEstimate(table) => f64::from(cost) + table.estimate(state),
        }
    }
}

/// A node waiting in the priority queue.
#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    /// Insertion counter; equal priorities pop first-in first-out.
    sequence: usize,
    node: usize,
}

impl Ord for FrontierEntry {
    // reversed: BinaryHeap pops the maximum
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Legal moves out of one state, in trial order.
type Moves = std::iter::Flatten<std::array::IntoIter<Option<(Direction, BrickState)>, 4>>;

/// Parameters shared by every strategy for one run.
struct Search<'a> {
    level: &'a Level,
    order: DirectionOrder,
    step_limit: Option<usize>,
}

impl Search<'_> {
    /// Rolls `state` towards `direction`, keeping the result only if it is on
    /// the map and `seen` does not report it.
    fn try_move(
        &self,
        state: BrickState,
        direction: Direction,
        seen: impl FnOnce(&BrickState) -> bool,
    ) -> Option<BrickState> {
        let next = state.roll(direction);
        if self.level.grid().is_off_map(&next) {
            debug!("rejected: invalid move  - {state} -> {direction}");
            None
        } else if seen(&next) {
            debug!("rejected: visited node  - {state} -> {direction}");
            None
        } else {
            Some(next)
        }
    }

    /// All moves `try_move` accepts from `state`.
    fn moves(&self, state: BrickState, seen: impl Fn(&BrickState) -> bool) -> Moves {
        let mut moves = [None; 4];
        for (slot, direction) in moves.iter_mut().zip(self.order.iter()) {
            *slot = self
                .try_move(state, direction, &seen)
                .map(|next| (direction, next));
        }
        moves.into_iter().flatten()
    }

    fn limit_reached(&self, expanded: usize) -> bool {
        self.step_limit.is_some_and(|limit| expanded >= limit)
    }

    fn finish(&self, outcome: Outcome, expanded: usize, tree: &SearchTree) -> SearchReport {
        SearchReport {
            outcome,
            expanded,
            generated: tree.len() - 1,
        }
    }

    /// FIFO frontier; states are marked visited when enqueued.
    fn breadth_first(&self, on_step: &mut impl FnMut(&Step)) -> SearchReport {
        let start = self.level.start();
        let mut tree = SearchTree::new(start);
        let mut visited: FxHashSet<BrickState> = FxHashSet::default();
        visited.insert(start);

        let mut frontier = VecDeque::from([SearchTree::ROOT]);
        let mut expanded = 0;

        while let Some(index) = frontier.pop_front() {
            if self.limit_reached(expanded) {
                return self.finish(Outcome::StepLimit, expanded, &tree);
            }

            let node = *tree.node(index);
            on_step(&Step {
                index: expanded,
                depth: node.depth,
                priority: None,
                state: node.state,
            });
            expanded += 1;

            if self.level.is_goal(&node.state) {
                return self.finish(Outcome::Solved(tree.path_to(index)), expanded, &tree);
            }

            for (direction, next) in self.moves(node.state, |s| visited.contains(s)) {
                visited.insert(next);
                let child = tree.push_child(index, direction, next);
                trace!("added: new node {next} via {direction} (depth {})", node.depth + 1);
                frontier.push_back(child);
            }
        }

        self.finish(Outcome::Exhausted, expanded, &tree)
    }

    /// Depth-first descent with an explicit stack.
    ///
    /// Each frame remembers which direction to try next, so a node resumes its
    /// remaining siblings only after the subtree below the previous one is
    /// exhausted. The visited set spans the whole search, not just the current
    /// branch.
    fn depth_first(&self, on_step: &mut impl FnMut(&Step)) -> SearchReport {
        struct Frame {
            node: usize,
            next_direction: usize,
        }

        let start = self.level.start();
        let mut tree = SearchTree::new(start);
        let mut visited: FxHashSet<BrickState> = FxHashSet::default();
        visited.insert(start);

        let mut stack: Vec<Frame> = Vec::new();
        let mut entering = Some(SearchTree::ROOT);
        let mut expanded = 0;

        loop {
            if let Some(index) = entering.take() {
                if self.limit_reached(expanded) {
                    return self.finish(Outcome::StepLimit, expanded, &tree);
                }

                let node = *tree.node(index);
                on_step(&Step {
                    index: expanded,
                    depth: node.depth,
                    priority: None,
                    state: node.state,
                });
                expanded += 1;

                if self.level.is_goal(&node.state) {
                    return self.finish(Outcome::Solved(tree.path_to(index)), expanded, &tree);
                }

                stack.push(Frame {
                    node: index,
                    next_direction: 0,
                });
            }

            let Some(frame) = stack.last_mut() else {
                break;
            };
            let parent = frame.node;
            let state = tree.node(parent).state;

            let mut descend = None;
            while let Some(direction) = self.order.get(frame.next_direction) {
                frame.next_direction += 1;
                if let Some(next) = self.try_move(state, direction, |s| visited.contains(s)) {
                    descend = Some((direction, next));
                    break;
                }
            }

            match descend {
                Some((direction, next)) => {
                    visited.insert(next);
                    trace!("added: to visit {next} via {direction}");
                    entering = Some(tree.push_child(parent, direction, next));
                }
                // all directions tried: backtrack
                None => {
                    stack.pop();
                }
            }
        }

        self.finish(Outcome::Exhausted, expanded, &tree)
    }

    /// Priority-queue search shared by UCS, A* and Greedy.
    ///
    /// A successor is pushed when it is new or reached strictly cheaper than
    /// before. Older, costlier entries for the same state stay in the heap and
    /// are skipped when popped.
    fn best_first(&self, priority: &Priority, on_step: &mut impl FnMut(&Step)) -> SearchReport {
        let start = self.level.start();
        let mut tree = SearchTree::new(start);

        let mut best_cost: FxHashMap<BrickState, u32> = FxHashMap::default();
        best_cost.insert(start, 0);
        let mut finalized: FxHashSet<BrickState> = FxHashSet::default();

        let mut frontier = BinaryHeap::new();
        let mut sequence = 0;
        frontier.push(FrontierEntry {
            priority: priority.of(&start, 0),
            sequence,
            node: SearchTree::ROOT,
        });
        let mut expanded = 0;

        while let Some(entry) = frontier.pop() {
            let node = *tree.node(entry.node);
            if node.depth > best_cost[&node.state] || !finalized.insert(node.state) {
                debug!("removed: stale frontier node {} (cost {})", node.state, node.depth);
                continue;
            }

            if self.limit_reached(expanded) {
                return self.finish(Outcome::StepLimit, expanded, &tree);
            }

            on_step(&Step {
                index: expanded,
                depth: node.depth,
                priority: Some(entry.priority),
                state: node.state,
            });
            expanded += 1;

            if self.level.is_goal(&node.state) {
                return self.finish(Outcome::Solved(tree.path_to(entry.node)), expanded, &tree);
            }

            let cost = node.depth + 1;
            for (direction, next) in self.moves(node.state, |_| false) {
                if let Some(&known) = best_cost.get(&next) {
                    if known <= cost {
                        debug!(
                            "rejected: visited & costly - {} -> {direction} [cost now: {cost}, earlier: {known}]",
                            node.state
                        );
                        continue;
                    }
                }

                best_cost.insert(next, cost);
                // a cheaper path reopens a state that was already expanded
                finalized.remove(&next);

                let child = tree.push_child(entry.node, direction, next);
                sequence += 1;
                let key = priority.of(&next, cost);
                trace!("added: new | cheaper node {next} via {direction} [priority: {key:.2}]");
                frontier.push(FrontierEntry {
                    priority: key,
                    sequence,
                    node: child,
                });
            }
        }

        self.finish(Outcome::Exhausted, expanded, &tree)
    }
}
