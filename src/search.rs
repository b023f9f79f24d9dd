
use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;

/// A handle to a `SearchTreeNode<St, A, C>` within its `SearchTree`.
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            index: NonMaxUsize::new(index).expect("SearchTree outgrew its index space"),
        }
    }

    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        self.index.get()
    }
}

/// A node in the search tree.
///
/// Nodes are immutable once created. The parent is kept as a handle together
/// with the action that led here, so the whole tree is a flat arena without
/// back-pointers.
///
/// Nodes compare by cost alone, which is what the priority frontiers need.
#[derive(Clone, Debug)]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    pub(crate) g: C,
    pub(crate) depth: usize,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn root(s: St) -> Self {
        Self {
            parent: None,
            state: s,
            g: C::zero(),
            depth: 0,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    /// The action that generated this node. `None` for roots.
    #[inline(always)]
    pub fn action(&self) -> Option<&A> {
        self.parent.as_ref().map(|(_, a)| a)
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent.map(|(p, _)| p)
    }
    #[inline(always)]
    pub fn cost(&self) -> C {
        self.g
    }
    /// Number of actions between the root and this node.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<St: State, A: Action, C: Cost> PartialEq for SearchTreeNode<St, A, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.g.eq(&other.g)
    }
}
impl<St: State, A: Action, C: Cost> Eq for SearchTreeNode<St, A, C> {}

impl<St: State, A: Action, C: Cost> PartialOrd for SearchTreeNode<St, A, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<St: State, A: Action, C: Cost> Ord for SearchTreeNode<St, A, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.g.cmp(&other.g)
    }
}

/// Arena of every node generated by a search.
///
/// Only grows. Nodes that lost their place in the frontier stay around, they
/// are cheap and may still be ancestors of live nodes.
#[derive(Clone)]
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        debug_assert!(
            node.parent().is_none_or(|p| p.as_usize() < self.nodes.len()),
            "Parents must be pushed before their children"
        );
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds the node reached by taking `action` from `parent`.
    ///
    /// The node is not added to the tree.
    pub fn child_node<P: Problem<St, A, C>>(
        &self,
        problem: &P,
        parent: SearchTreeIndex,
        action: A,
    ) -> Result<SearchTreeNode<St, A, C>, SearchError> {
        let p = &self[parent];
        let s = problem
            .result(&p.state, &action)
            .ok_or_else(|| SearchError::undefined_transition(&p.state, &action))?;
        let g = problem.path_cost(p.g, &p.state, &action, &s);
        debug_assert!(g >= p.g, "Step costs must be non-negative");

        Ok(SearchTreeNode {
            parent: Some((parent, action)),
            state: s,
            g,
            depth: p.depth + 1,
        })
    }

    /// Builds a child for every action available at `parent`, in the order
    /// the problem enumerates them.
    pub fn expand<P: Problem<St, A, C>>(
        &self,
        problem: &P,
        parent: SearchTreeIndex,
    ) -> Result<Vec<SearchTreeNode<St, A, C>>, SearchError> {
        problem
            .actions(self[parent].state())
            .into_iter()
            .map(|a| self.child_node(problem, parent, a))
            .collect()
    }

    /// The handles from the root down to `node_index`, both included.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Vec<SearchTreeIndex> {
        let mut path = Vec::with_capacity(self[node_index].depth + 1);
        path.push(node_index);
        while let Some(parent_index) = self[node_index].parent() {
            debug_assert!(node_index != parent_index);
            path.push(parent_index);
            node_index = parent_index;
        }

        path.reverse();
        path
    }

    /// Converts the branch ending at `node_index` into a `Path`.
    #[must_use]
    pub fn build_path(&self, node_index: SearchTreeIndex) -> Path<St, A, C> {
        let mut indices = self.path(node_index).into_iter();
        let root = match indices.next() {
            Some(i) => &self[i],
            None => unreachable!("Paths include at least the node itself"),
        };
        let mut path = Path::<St, A, C>::new_from_start(root.state);

        for i in indices {
            let node = &self[i];
            match node.parent {
                Some((_, a)) => path.append(a, node.state, node.g),
                None => unreachable!("Only the first node of a path is a root"),
            }
        }

        path
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.as_usize()]
    }
}

impl<St, A, C> std::fmt::Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct Counter(u8);
    impl State for Counter {}
    impl Action for Counter {}

    /// Counts up from 0 to 5 by steps of 1 or 2, each costing as much as the
    /// step itself. Stepping past 5 is undefined.
    #[derive(Debug)]
    struct Stairs;

    impl Problem<Counter, Counter, u32> for Stairs {
        fn initial(&self) -> Counter {
            Counter(0)
        }
        fn goal(&self) -> Option<Counter> {
            Some(Counter(5))
        }
        fn actions(&self, _s: &Counter) -> Vec<Counter> {
            vec![Counter(1), Counter(2)]
        }
        fn result(&self, s: &Counter, a: &Counter) -> Option<Counter> {
            let n = s.0 + a.0;
            (n <= 5).then_some(Counter(n))
        }
        fn path_cost(&self, c: u32, _from: &Counter, a: &Counter, _to: &Counter) -> u32 {
            c + a.0 as u32
        }
    }

    #[test]
    fn expand_in_action_order() {
        let mut tree = SearchTree::<Counter, Counter, u32>::new();
        let root = tree.push(SearchTreeNode::root(Stairs.initial()));

        let children = tree.expand(&Stairs, root).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(*children[0].state(), Counter(1));
        assert_eq!(*children[1].state(), Counter(2));
        assert_eq!(children[1].cost(), 2);
        assert_eq!(children[1].action(), Some(&Counter(2)));
        assert_eq!(children[1].parent(), Some(root));
        assert_eq!(children[1].depth(), 1);
    }

    #[test]
    fn undefined_transition() {
        let mut tree = SearchTree::<Counter, Counter, u32>::new();
        let root = tree.push(SearchTreeNode::root(Counter(4)));

        assert!(tree.child_node(&Stairs, root, Counter(1)).is_ok());
        assert_eq!(
            tree.child_node(&Stairs, root, Counter(2)).unwrap_err(),
            SearchError::UndefinedTransition {
                state: "Counter(4)".to_string(),
                action: "Counter(2)".to_string(),
            }
        );
        assert!(tree.expand(&Stairs, root).is_err());
    }

    #[test]
    fn path_from_root() {
        let mut tree = SearchTree::<Counter, Counter, u32>::new();
        let root = tree.push(SearchTreeNode::root(Stairs.initial()));
        let a = tree.push(tree.child_node(&Stairs, root, Counter(2)).unwrap());
        let b = tree.push(tree.child_node(&Stairs, a, Counter(1)).unwrap());
        let c = tree.push(tree.child_node(&Stairs, b, Counter(2)).unwrap());

        assert_eq!(tree.path(c), vec![root, a, b, c]);
        assert_eq!(tree.path(root), vec![root]);

        let path = tree.build_path(c);
        assert_eq!(
            path.states,
            vec![Counter(0), Counter(2), Counter(3), Counter(5)]
        );
        assert_eq!(path.actions, vec![Counter(2), Counter(1), Counter(2)]);
        assert_eq!(path.cost, 5);
        assert_eq!(path.len(), 3);
        assert!(path.is_valid_for(&Stairs));
    }

    #[test]
    fn invalid_paths() {
        let mut path = Path::<Counter, Counter, u32>::new_from_start(Counter(0));
        path.append(Counter(2), Counter(2), 2);
        assert!(path.is_valid_for(&Stairs));

        // Wrong cost
        let mut wrong = path.clone();
        wrong.cost = 3;
        assert!(!wrong.is_valid_for(&Stairs));

        // Wrong destination
        let mut wrong = path.clone();
        wrong.append(Counter(1), Counter(4), 3);
        assert!(!wrong.is_valid_for(&Stairs));

        // Wrong start
        let wrong = Path::<Counter, Counter, u32>::new_from_start(Counter(1));
        assert!(!wrong.is_valid_for(&Stairs));
    }

    #[test]
    fn nodes_order_by_cost() {
        let cheap = SearchTreeNode::<Counter, Counter, u32>::root(Counter(3));
        let mut pricey = SearchTreeNode::<Counter, Counter, u32>::root(Counter(1));
        pricey.g = 4;

        assert!(cheap < pricey);
        assert!(cheap == SearchTreeNode::root(Counter(2)));
    }
}
