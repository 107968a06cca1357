//! Content-model container
//!
//! Every element with element content owns a [`ChildContainer`]: a live
//! mirror of its complex type's particle tree. The container decides, on
//! each add, where a new child may legally attach — or that it may not —
//! and verifies at final check that every required particle is satisfied.
//!
//! Live nodes reference schema particles by `&'static` handle and are
//! stored in an arena. A compositor node (sequence, choice, all, group
//! reference) owns an ordered list of *duplicates*: materialized
//! occurrences of itself, grown on demand while `maxOccurs` permits. A
//! leaf node hosts the attached child elements for one element particle.
//!
//! Attachment is transactional: all mutations made while searching for a
//! placement go through a scratch journal and are rolled back whenever a
//! branch turns out to be infeasible, so a rejected add leaves the
//! container untouched.

use std::cell::RefCell;

use crate::element::XmlElement;
use crate::schema::{schema, Particle, ParticleKind};

/// Index of a live node in the container arena
type NodeId = usize;

/// One occurrence of a compositor particle
#[derive(Debug)]
struct Duplicate {
    /// Live branch nodes, one per schema branch (one for group refs)
    branches: Vec<NodeId>,
    /// For choice nodes: the branch that received the first committed child
    chosen: Option<usize>,
    /// Number of elements attached anywhere beneath this duplicate
    occupied: u32,
}

/// A live mirror of one schema particle
#[derive(Debug)]
struct LiveNode {
    particle: &'static Particle,
    parent: Option<NodeId>,
    /// Occurrences of a compositor; unused for leaves
    duplicates: Vec<Duplicate>,
    /// Children attached to a leaf; unused for compositors
    attached: Vec<XmlElement>,
}

impl LiveNode {
    fn is_leaf(&self) -> bool {
        matches!(self.particle.kind, ParticleKind::Element(_))
    }

    fn is_choice(&self) -> bool {
        matches!(self.particle.kind, ParticleKind::Choice(_))
    }
}

/// Scratch-journal entry for one tentative mutation
#[derive(Debug)]
enum JournalOp {
    /// A duplicate was materialized on `node`; `nodes_len` is the arena
    /// length before its branch nodes were created
    PushedDuplicate { node: NodeId, nodes_len: usize },
    /// A choice duplicate's chosen branch was set
    SetChosen {
        node: NodeId,
        dup: usize,
        prev: Option<usize>,
    },
    /// A child was appended to a leaf (occupied counts were incremented
    /// up the ancestor chain)
    AttachedLeaf { leaf: NodeId },
}

/// The live content-model container of one element instance
#[derive(Debug)]
pub(crate) struct ChildContainer {
    nodes: Vec<LiveNode>,
    root: NodeId,
    epoch: u64,
    leaf_cache: RefCell<Option<(u64, Vec<NodeId>)>>,
}

impl ChildContainer {
    /// Build the live mirror of a content-model root
    pub(crate) fn new(root_particle: &'static Particle) -> Self {
        let mut container = Self {
            nodes: Vec::new(),
            root: 0,
            epoch: 0,
            leaf_cache: RefCell::new(None),
        };
        container.root = container.materialize(root_particle, None);
        container
    }

    // -------------------------------------------------------------------------
    // Materialization
    // -------------------------------------------------------------------------

    fn materialize(&mut self, particle: &'static Particle, parent: Option<NodeId>) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(LiveNode {
            particle,
            parent,
            duplicates: Vec::new(),
            attached: Vec::new(),
        });
        if !self.nodes[idx].is_leaf() {
            self.push_duplicate(idx);
        }
        idx
    }

    /// Materialize one more occurrence of a compositor
    fn push_duplicate(&mut self, idx: NodeId) {
        let particle = self.nodes[idx].particle;
        let branch_particles: Vec<&'static Particle> = match &particle.kind {
            ParticleKind::Sequence(b) | ParticleKind::Choice(b) | ParticleKind::All(b) => {
                b.iter().collect()
            }
            ParticleKind::GroupRef(name) => vec![schema().group(name)],
            ParticleKind::Element(_) => unreachable!("leaves have no duplicates"),
        };
        let branches = branch_particles
            .into_iter()
            .map(|p| self.materialize(p, Some(idx)))
            .collect();
        self.nodes[idx].duplicates.push(Duplicate {
            branches,
            chosen: None,
            occupied: 0,
        });
    }

    // -------------------------------------------------------------------------
    // Attachment
    // -------------------------------------------------------------------------

    /// Find a legal placement for `child` and attach it, or report why not.
    ///
    /// `skip` ignores the first `skip` name-matching leaves in traversal
    /// order, letting callers target a specific slot when the content
    /// model has several leaves for the same element name.
    pub(crate) fn try_attach(&mut self, child: &XmlElement, skip: usize) -> Result<(), String> {
        let name = child.name();
        let possible = self.possible_children_names();
        if !possible.contains(&name) {
            return Err(format!(
                "no '{}' particle in the content model (possible children: {})",
                name,
                possible.join(", ")
            ));
        }

        let mut journal = Vec::new();
        let mut skip = skip;
        let root = self.root;
        if self.attach_node(root, child, &mut skip, &mut journal) {
            self.epoch += 1;
            self.leaf_cache.borrow_mut().take();
            Ok(())
        } else {
            self.rollback_to(&mut journal, 0);
            Err(format!("no legal placement left for '{}'", name))
        }
    }

    fn attach_node(
        &mut self,
        idx: NodeId,
        child: &XmlElement,
        skip: &mut usize,
        journal: &mut Vec<JournalOp>,
    ) -> bool {
        match self.nodes[idx].particle.kind {
            ParticleKind::Element(name) => self.attach_leaf(idx, name, child, skip, journal),
            ParticleKind::Choice(_) => self.attach_choice(idx, child, skip, journal),
            ParticleKind::Sequence(_) | ParticleKind::All(_) | ParticleKind::GroupRef(_) => {
                self.attach_compositor(idx, child, skip, journal)
            }
        }
    }

    fn attach_leaf(
        &mut self,
        idx: NodeId,
        leaf_name: &'static str,
        child: &XmlElement,
        skip: &mut usize,
        journal: &mut Vec<JournalOp>,
    ) -> bool {
        if leaf_name != child.name() {
            return false;
        }
        if *skip > 0 {
            *skip -= 1;
            return false;
        }
        let occurs = self.nodes[idx].particle.occurs;
        if occurs.is_over(self.nodes[idx].attached.len() as u32) {
            return false;
        }
        self.nodes[idx].attached.push(child.clone());
        self.adjust_occupied(idx, 1);
        journal.push(JournalOp::AttachedLeaf { leaf: idx });
        true
    }

    /// Sequences, all-groups and group references: visit branches of each
    /// duplicate left to right, then materialize a fresh duplicate when
    /// the current one is complete and capacity remains.
    ///
    /// For sequences the traversal is exhaustion-gated: a branch that
    /// rejects the child may only be passed over while it is satisfied
    /// (required occurrences met, or nothing required). An unsatisfied
    /// branch blocks everything to its right, which is what forces
    /// children to arrive in content-model order. All-groups match in
    /// any order, so no gate applies there.
    fn attach_compositor(
        &mut self,
        idx: NodeId,
        child: &XmlElement,
        skip: &mut usize,
        journal: &mut Vec<JournalOp>,
    ) -> bool {
        let is_all = matches!(self.nodes[idx].particle.kind, ParticleKind::All(_));
        let ndups = self.nodes[idx].duplicates.len();
        for d in 0..ndups {
            let branches = self.nodes[idx].duplicates[d].branches.clone();
            for branch in branches {
                if self.attach_node(branch, child, skip, journal) {
                    return true;
                }
                if !is_all && !self.is_satisfied(branch) {
                    return false;
                }
            }
        }

        let occurs = self.nodes[idx].particle.occurs;
        if !occurs.is_over(ndups as u32) && self.duplicate_is_complete(idx, ndups - 1) {
            let mark = journal.len();
            let nodes_len = self.nodes.len();
            self.push_duplicate(idx);
            journal.push(JournalOp::PushedDuplicate {
                node: idx,
                nodes_len,
            });
            let branches = self.nodes[idx].duplicates[ndups].branches.clone();
            for branch in branches {
                if self.attach_node(branch, child, skip, journal) {
                    return true;
                }
                if !is_all && !self.is_satisfied(branch) {
                    break;
                }
            }
            self.rollback_to(journal, mark);
        }
        false
    }

    /// Choices: only the chosen branch of a duplicate is live once a child
    /// has been committed under it. While a duplicate is still empty the
    /// other branches may be retried; once it holds children a fresh
    /// duplicate is materialized instead, capacity permitting.
    fn attach_choice(
        &mut self,
        idx: NodeId,
        child: &XmlElement,
        skip: &mut usize,
        journal: &mut Vec<JournalOp>,
    ) -> bool {
        let ndups = self.nodes[idx].duplicates.len();
        for d in 0..ndups {
            let chosen = self.nodes[idx].duplicates[d].chosen;
            let branches = self.nodes[idx].duplicates[d].branches.clone();
            match chosen {
                Some(ci) => {
                    if self.attach_node(branches[ci], child, skip, journal) {
                        return true;
                    }
                    if self.nodes[idx].duplicates[d].occupied == 0 {
                        for (j, &branch) in branches.iter().enumerate() {
                            if j == ci {
                                continue;
                            }
                            if self.attach_node(branch, child, skip, journal) {
                                journal.push(JournalOp::SetChosen {
                                    node: idx,
                                    dup: d,
                                    prev: Some(ci),
                                });
                                self.nodes[idx].duplicates[d].chosen = Some(j);
                                return true;
                            }
                        }
                    }
                }
                None => {
                    for (j, &branch) in branches.iter().enumerate() {
                        if self.attach_node(branch, child, skip, journal) {
                            journal.push(JournalOp::SetChosen {
                                node: idx,
                                dup: d,
                                prev: None,
                            });
                            self.nodes[idx].duplicates[d].chosen = Some(j);
                            return true;
                        }
                    }
                }
            }
        }

        let occurs = self.nodes[idx].particle.occurs;
        if !occurs.is_over(ndups as u32) && self.nodes[idx].duplicates[ndups - 1].occupied > 0 {
            let mark = journal.len();
            let nodes_len = self.nodes.len();
            self.push_duplicate(idx);
            journal.push(JournalOp::PushedDuplicate {
                node: idx,
                nodes_len,
            });
            let branches = self.nodes[idx].duplicates[ndups].branches.clone();
            for (j, &branch) in branches.iter().enumerate() {
                if self.attach_node(branch, child, skip, journal) {
                    journal.push(JournalOp::SetChosen {
                        node: idx,
                        dup: ndups,
                        prev: None,
                    });
                    self.nodes[idx].duplicates[ndups].chosen = Some(j);
                    return true;
                }
            }
            self.rollback_to(journal, mark);
        }
        false
    }

    fn rollback_to(&mut self, journal: &mut Vec<JournalOp>, mark: usize) {
        while journal.len() > mark {
            match journal.pop().expect("journal shorter than mark") {
                JournalOp::PushedDuplicate { node, nodes_len } => {
                    self.nodes[node].duplicates.pop();
                    self.nodes.truncate(nodes_len);
                }
                JournalOp::SetChosen { node, dup, prev } => {
                    self.nodes[node].duplicates[dup].chosen = prev;
                }
                JournalOp::AttachedLeaf { leaf } => {
                    self.nodes[leaf].attached.pop();
                    self.adjust_occupied(leaf, -1);
                }
            }
        }
    }

    /// Add `delta` to the occupied count of every ancestor duplicate of `from`
    fn adjust_occupied(&mut self, from: NodeId, delta: i64) {
        let mut cur = from;
        while let Some(parent) = self.nodes[cur].parent {
            let d = self.duplicate_index(parent, cur);
            let occupied = &mut self.nodes[parent].duplicates[d].occupied;
            *occupied = (*occupied as i64 + delta) as u32;
            cur = parent;
        }
    }

    /// Which duplicate of `parent` holds the branch node `child`
    fn duplicate_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.nodes[parent]
            .duplicates
            .iter()
            .position(|d| d.branches.contains(&child))
            .expect("child node not found in any duplicate of its parent")
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Detach a child from its leaf, decrement counts up the ancestor
    /// chain, and drop emptied non-first duplicates. Returns false when
    /// the child is not attached here.
    pub(crate) fn remove(&mut self, child: &XmlElement) -> bool {
        let leaf = self.leaf_nodes().into_iter().find(|&l| {
            self.nodes[l]
                .attached
                .iter()
                .any(|c| c.same_node(child))
        });
        let leaf = match leaf {
            Some(l) => l,
            None => return false,
        };

        let pos = self.nodes[leaf]
            .attached
            .iter()
            .position(|c| c.same_node(child))
            .expect("attached child vanished");
        self.nodes[leaf].attached.remove(pos);

        let mut cur = leaf;
        while let Some(parent) = self.nodes[cur].parent {
            let d = self.duplicate_index(parent, cur);
            self.nodes[parent].duplicates[d].occupied -= 1;
            if self.nodes[parent].duplicates[d].occupied == 0 {
                if self.nodes[parent].is_choice() {
                    self.nodes[parent].duplicates[d].chosen = None;
                }
                if d > 0 {
                    self.nodes[parent].duplicates.remove(d);
                }
            }
            cur = parent;
        }

        self.epoch += 1;
        self.leaf_cache.borrow_mut().take();
        true
    }

    // -------------------------------------------------------------------------
    // Completion
    // -------------------------------------------------------------------------

    /// Verify that every required particle is satisfied. On failure the
    /// error carries the name of the first missing leaf in tree order.
    pub(crate) fn validate_completion(&self) -> Result<(), String> {
        self.check_node(self.root)
    }

    fn check_node(&self, idx: NodeId) -> Result<(), String> {
        let node = &self.nodes[idx];
        if node.is_leaf() {
            if node.particle.occurs.is_missing(node.attached.len() as u32) {
                return Err(node.particle.tag().to_string());
            }
            return Ok(());
        }

        let mut complete = 0u32;
        for (d, dup) in node.duplicates.iter().enumerate() {
            if self.duplicate_is_complete(idx, d) {
                complete += 1;
            } else if dup.occupied > 0 {
                return Err(self.first_missing_in_duplicate(idx, d));
            }
        }
        if node.particle.occurs.is_missing(complete) {
            for d in 0..node.duplicates.len() {
                if !self.duplicate_is_complete(idx, d) {
                    return Err(self.first_missing_in_duplicate(idx, d));
                }
            }
            // All materialized duplicates are complete but more occurrences
            // are required; name the first leaf of the particle.
            return Err(first_schema_leaf(self.nodes[idx].particle).to_string());
        }
        Ok(())
    }

    fn is_satisfied(&self, idx: NodeId) -> bool {
        self.check_node(idx).is_ok()
    }

    fn duplicate_is_complete(&self, idx: NodeId, d: usize) -> bool {
        let node = &self.nodes[idx];
        let dup = &node.duplicates[d];
        if node.is_choice() {
            match dup.chosen {
                Some(ci) => self.is_satisfied(dup.branches[ci]),
                None => dup.occupied == 0 && dup.branches.iter().any(|&b| self.is_satisfied(b)),
            }
        } else {
            dup.branches.iter().all(|&b| self.is_satisfied(b))
        }
    }

    fn first_missing_in_duplicate(&self, idx: NodeId, d: usize) -> String {
        let node = &self.nodes[idx];
        let dup = &node.duplicates[d];
        let candidates: Vec<NodeId> = if node.is_choice() {
            match dup.chosen {
                Some(ci) => vec![dup.branches[ci]],
                None => dup.branches.clone(),
            }
        } else {
            dup.branches.clone()
        };
        for branch in candidates {
            if let Err(path) = self.check_node(branch) {
                return path;
            }
        }
        first_schema_leaf(node.particle).to_string()
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Attached children in document order: duplicates in order, branches
    /// left to right, leaf attachments in attach order.
    pub(crate) fn ordered_elements(&self) -> Vec<XmlElement> {
        let mut out = Vec::new();
        self.collect_ordered(self.root, &mut out);
        out
    }

    fn collect_ordered(&self, idx: NodeId, out: &mut Vec<XmlElement>) {
        let node = &self.nodes[idx];
        if node.is_leaf() {
            out.extend(node.attached.iter().cloned());
            return;
        }
        for dup in &node.duplicates {
            for &branch in &dup.branches {
                self.collect_ordered(branch, out);
            }
        }
    }

    /// Live leaf nodes in tree order, memoized per mutation epoch
    fn leaf_nodes(&self) -> Vec<NodeId> {
        if let Some((epoch, ref leaves)) = *self.leaf_cache.borrow() {
            if epoch == self.epoch {
                return leaves.clone();
            }
        }
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        *self.leaf_cache.borrow_mut() = Some((self.epoch, leaves.clone()));
        leaves
    }

    fn collect_leaves(&self, idx: NodeId, out: &mut Vec<NodeId>) {
        let node = &self.nodes[idx];
        if node.is_leaf() {
            out.push(idx);
            return;
        }
        for dup in &node.duplicates {
            for &branch in &dup.branches {
                self.collect_leaves(branch, out);
            }
        }
    }

    /// Structural clone for deep copies: same nodes, duplicates, chosen
    /// branches and counts, with every attached child handle replaced
    /// through `map`
    pub(crate) fn clone_mapped(&self, map: &dyn Fn(&XmlElement) -> XmlElement) -> ChildContainer {
        let nodes = self
            .nodes
            .iter()
            .map(|n| LiveNode {
                particle: n.particle,
                parent: n.parent,
                duplicates: n
                    .duplicates
                    .iter()
                    .map(|d| Duplicate {
                        branches: d.branches.clone(),
                        chosen: d.chosen,
                        occupied: d.occupied,
                    })
                    .collect(),
                attached: n.attached.iter().map(map).collect(),
            })
            .collect();
        ChildContainer {
            nodes,
            root: self.root,
            epoch: 0,
            leaf_cache: RefCell::new(None),
        }
    }

    /// Element names this content model can host, in first-appearance order
    pub(crate) fn possible_children_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        collect_schema_leaves(self.nodes[self.root].particle, &mut names);
        names
    }
}

fn collect_schema_leaves(particle: &'static Particle, out: &mut Vec<&'static str>) {
    match &particle.kind {
        ParticleKind::Element(name) => {
            if !out.contains(name) {
                out.push(name);
            }
        }
        ParticleKind::GroupRef(name) => collect_schema_leaves(schema().group(name), out),
        ParticleKind::Sequence(branches)
        | ParticleKind::Choice(branches)
        | ParticleKind::All(branches) => {
            for branch in branches {
                collect_schema_leaves(branch, out);
            }
        }
    }
}

fn first_schema_leaf(particle: &'static Particle) -> &'static str {
    match &particle.kind {
        ParticleKind::Element(name) => name,
        ParticleKind::GroupRef(name) => first_schema_leaf(schema().group(name)),
        ParticleKind::Sequence(branches)
        | ParticleKind::Choice(branches)
        | ParticleKind::All(branches) => branches
            .first()
            .map(first_schema_leaf)
            .unwrap_or(particle.tag()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::XmlElement;
    use crate::schema::Particle;

    fn leak(p: Particle) -> &'static Particle {
        Box::leak(Box::new(p))
    }

    fn elem(name: &str) -> XmlElement {
        XmlElement::new(name).unwrap()
    }

    #[test]
    fn test_sequence_in_order() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step"),
            Particle::element("alter").optional(),
            Particle::element("octave"),
        ])));
        assert!(c.try_attach(&elem("step"), 0).is_ok());
        assert!(c.try_attach(&elem("octave"), 0).is_ok());
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_sequence_rejects_out_of_order() {
        // an unsatisfied required branch blocks everything to its right
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step"),
            Particle::element("octave"),
        ])));
        assert!(c.try_attach(&elem("octave"), 0).is_err());
        c.try_attach(&elem("step"), 0).unwrap();
        c.try_attach(&elem("octave"), 0).unwrap();
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["step", "octave"]);
    }

    #[test]
    fn test_sequence_skips_optional_and_satisfied_branches() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step"),
            Particle::element("alter").optional(),
            Particle::element("octave"),
        ])));
        c.try_attach(&elem("step"), 0).unwrap();
        // optional alter is passed over, satisfied step is passed over
        c.try_attach(&elem("octave"), 0).unwrap();
        // an empty optional slot before satisfied content is still usable
        c.try_attach(&elem("alter"), 0).unwrap();
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["step", "alter", "octave"]);
    }

    #[test]
    fn test_leaf_capacity() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step").with_occurs(0, Some(2)),
        ])));
        assert!(c.try_attach(&elem("step"), 0).is_ok());
        assert!(c.try_attach(&elem("step"), 0).is_ok());
        assert!(c.try_attach(&elem("step"), 0).is_err());
    }

    #[test]
    fn test_unknown_child_reports_possible_names() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![Particle::element("step")])));
        let err = c.try_attach(&elem("octave"), 0).unwrap_err();
        assert!(err.contains("no 'octave' particle"));
        assert!(err.contains("step"));
    }

    #[test]
    fn test_second_slot_binding() {
        // (A, B?, A): the second A must land in the trailing slot
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step"),
            Particle::element("alter").optional(),
            Particle::element("step"),
        ])));
        c.try_attach(&elem("step"), 0).unwrap();
        c.try_attach(&elem("step"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
        assert!(c.try_attach(&elem("step"), 0).is_err());
    }

    #[test]
    fn test_choice_single_occurrence_rejects_second_branch() {
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::element("step"),
            Particle::element("octave"),
        ])));
        c.try_attach(&elem("octave"), 0).unwrap();
        let err = c.try_attach(&elem("step"), 0).unwrap_err();
        assert!(err.contains("no legal placement"));
        // the rejected attach left no trace
        assert_eq!(c.ordered_elements().len(), 1);
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_choice_rechoose_while_empty() {
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::element("step"),
            Particle::element("octave"),
        ])));
        let step = elem("step");
        c.try_attach(&step, 0).unwrap();
        assert!(c.remove(&step));
        // emptied choice forgets its branch
        c.try_attach(&elem("octave"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_choice_duplication_adjacent_groups() {
        let mut c = ChildContainer::new(leak(
            Particle::choice(vec![
                Particle::element("step"),
                Particle::element("octave"),
            ])
            .zero_or_more(),
        ));
        c.try_attach(&elem("step"), 0).unwrap();
        c.try_attach(&elem("octave"), 0).unwrap();
        c.try_attach(&elem("step"), 0).unwrap();
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["step", "octave", "step"]);
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_sequence_duplication() {
        // (beats, beat-type) repeated: 1..unbounded
        let mut c = ChildContainer::new(leak(
            Particle::sequence(vec![
                Particle::element("beats"),
                Particle::element("beat-type"),
            ])
            .one_or_more(),
        ));
        c.try_attach(&elem("beats"), 0).unwrap();
        c.try_attach(&elem("beat-type"), 0).unwrap();
        c.try_attach(&elem("beats"), 0).unwrap();
        // second occurrence incomplete
        assert_eq!(c.validate_completion().unwrap_err(), "beat-type");
        c.try_attach(&elem("beat-type"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["beats", "beat-type", "beats", "beat-type"]);
    }

    #[test]
    fn test_sequence_no_duplication_while_incomplete() {
        let mut c = ChildContainer::new(leak(
            Particle::sequence(vec![
                Particle::element("beats"),
                Particle::element("beat-type"),
            ])
            .one_or_more(),
        ));
        c.try_attach(&elem("beats"), 0).unwrap();
        // current occurrence still misses beat-type, so a second beats
        // cannot open a new occurrence
        assert!(c.try_attach(&elem("beats"), 0).is_err());
    }

    #[test]
    fn test_nested_choice_retry_within_traversal() {
        // choice((step, octave) | alter): attaching alter must back out of
        // the first branch and land in the second
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::sequence(vec![
                Particle::element("step"),
                Particle::element("octave"),
            ]),
            Particle::element("alter"),
        ])));
        c.try_attach(&elem("alter"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_required_choice_unchosen_fails_completion() {
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::element("step"),
            Particle::element("octave"),
        ])));
        assert_eq!(c.validate_completion().unwrap_err(), "step");
    }

    #[test]
    fn test_group_ref_duplication() {
        // the part-list shape: group ref with its own occurrence bounds
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::group_ref("part-group").zero_or_more(),
            Particle::group_ref("score-part"),
        ])));
        c.try_attach(&elem("part-group"), 0).unwrap();
        c.try_attach(&elem("part-group"), 0).unwrap();
        assert_eq!(c.validate_completion().unwrap_err(), "score-part");
        c.try_attach(&elem("score-part"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
    }

    #[test]
    fn test_remove_deduplicates() {
        let mut c = ChildContainer::new(leak(
            Particle::choice(vec![
                Particle::element("step"),
                Particle::element("octave"),
            ])
            .zero_or_more(),
        ));
        let step = elem("step");
        let octave = elem("octave");
        c.try_attach(&step, 0).unwrap();
        c.try_attach(&octave, 0).unwrap();
        assert!(c.remove(&octave));
        assert!(c.validate_completion().is_ok());
        assert_eq!(c.ordered_elements().len(), 1);
        // slot freed by de-duplication is usable again
        c.try_attach(&elem("octave"), 0).unwrap();
        assert_eq!(c.ordered_elements().len(), 2);
    }

    #[test]
    fn test_remove_unattached_child() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![Particle::element("step")])));
        assert!(!c.remove(&elem("step")));
    }

    #[test]
    fn test_skip_targets_later_leaf() {
        let mut c = ChildContainer::new(leak(Particle::sequence(vec![
            Particle::element("step").optional(),
            Particle::element("alter").optional(),
            Particle::element("step").optional(),
        ])));
        c.try_attach(&elem("step"), 1).unwrap();
        c.try_attach(&elem("alter"), 0).unwrap();
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["alter", "step"]);
    }

    #[test]
    fn test_choice_branch_selection_respects_ordering() {
        // the note shape: the grace and cue branches reject pitch at their
        // unsatisfied leading leaf, so pitch lands in the plain branch and
        // duration follows it there
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::sequence(vec![
                Particle::element("grace"),
                Particle::group_ref("full-note"),
            ]),
            Particle::sequence(vec![
                Particle::element("cue"),
                Particle::group_ref("full-note"),
                Particle::group_ref("duration"),
            ]),
            Particle::sequence(vec![
                Particle::group_ref("full-note"),
                Particle::group_ref("duration"),
            ]),
        ])));
        c.try_attach(&elem("pitch"), 0).unwrap();
        c.try_attach(&elem("duration"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["pitch", "duration"]);
    }

    #[test]
    fn test_choice_leading_leaf_picks_branch() {
        // a child matching a branch's first leaf commits that branch
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::sequence(vec![
                Particle::element("cue"),
                Particle::group_ref("full-note"),
                Particle::group_ref("duration"),
            ]),
            Particle::sequence(vec![
                Particle::group_ref("full-note"),
                Particle::group_ref("duration"),
            ]),
        ])));
        c.try_attach(&elem("cue"), 0).unwrap();
        c.try_attach(&elem("rest"), 0).unwrap();
        c.try_attach(&elem("duration"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["cue", "rest", "duration"]);
    }

    #[test]
    fn test_choice_committed_branch_rejects_alternative() {
        // a committed branch is never silently relocated
        let mut c = ChildContainer::new(leak(Particle::choice(vec![
            Particle::element("grace"),
            Particle::element("cue"),
        ])));
        c.try_attach(&elem("grace"), 0).unwrap();
        assert!(c.try_attach(&elem("cue"), 0).is_err());
        let names: Vec<_> = c.ordered_elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["grace"]);
    }

    #[test]
    fn test_all_group_any_order() {
        let mut c = ChildContainer::new(leak(Particle::all(vec![
            Particle::element("step"),
            Particle::element("octave"),
        ])));
        c.try_attach(&elem("octave"), 0).unwrap();
        assert_eq!(c.validate_completion().unwrap_err(), "step");
        c.try_attach(&elem("step"), 0).unwrap();
        assert!(c.validate_completion().is_ok());
        // each all-branch matches at most once
        assert!(c.try_attach(&elem("step"), 0).is_err());
    }

    #[test]
    fn test_possible_children_resolve_groups() {
        let c = ChildContainer::new(leak(Particle::group_ref("full-note")));
        let names = c.possible_children_names();
        assert_eq!(names, vec!["chord", "pitch", "unpitched", "rest"]);
    }
}
