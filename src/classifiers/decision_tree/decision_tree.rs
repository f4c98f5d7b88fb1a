use crate::classifiers::decision_tree::node::{SplitTest, TreeNode};
use crate::classifiers::decision_tree::split_criteria::{InfoGainSplitCriterion, SplitCriterion};
use crate::classifiers::{Classifier, max_index};
use crate::core::attributes::NominalAttribute;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::PipelineError;
use std::fmt;
use std::sync::Arc;

/// Nodes lighter than this stay leaves.
const MIN_SPLIT_WEIGHT: f64 = 2.0;
/// Gains at or below this are treated as noise.
const MERIT_FLOOR: f64 = 1e-10;
/// Confidence factor for the pessimistic error estimate.
const PRUNING_CONFIDENCE: f64 = 0.25;
/// One-sided normal deviate matching `PRUNING_CONFIDENCE`.
const PRUNING_Z: f64 = 0.674_489_750_196_081_7;

/// A batch-grown classification tree: exhaustive information-gain search
/// over binary numeric and multiway nominal splits, then a bottom-up
/// subtree-replacement pass driven by pessimistic error estimates.
#[derive(Debug)]
pub struct DecisionTree {
    header: Arc<InstanceHeader>,
    root: TreeNode,
}

impl DecisionTree {
    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn number_of_leaves(&self) -> usize {
        self.root.number_of_leaves()
    }

    pub fn tree_size(&self) -> usize {
        self.root.number_of_nodes()
    }

    fn distribution_of(dataset: &Dataset, rows: &[usize], num_classes: usize) -> Vec<f64> {
        let mut distribution = vec![0.0; num_classes];
        for &row in rows {
            let instance = &dataset.instances()[row];
            if let Some(class_value) = instance.class_value() {
                let index = class_value as usize;
                if index < distribution.len() {
                    distribution[index] += instance.weight();
                }
            }
        }
        distribution
    }

    fn number_of_represented_classes(distribution: &[f64]) -> usize {
        distribution.iter().filter(|&&weight| weight > 0.0).count()
    }

    fn rows_weight(dataset: &Dataset, rows: &[usize]) -> f64 {
        rows.iter()
            .map(|&row| dataset.instances()[row].weight())
            .sum()
    }

    fn build_node(
        dataset: &Dataset,
        rows: &[usize],
        criterion: &InfoGainSplitCriterion,
        num_classes: usize,
    ) -> TreeNode {
        let distribution = Self::distribution_of(dataset, rows, num_classes);
        let weight: f64 = distribution.iter().sum();
        if weight < MIN_SPLIT_WEIGHT || Self::number_of_represented_classes(&distribution) < 2 {
            return TreeNode::leaf(distribution);
        }

        let Some((test, merit)) = Self::best_split(dataset, rows, criterion, num_classes) else {
            return TreeNode::leaf(distribution);
        };
        if merit <= MERIT_FLOOR {
            return TreeNode::leaf(distribution);
        }

        let branch_rows = Self::partition_rows(dataset, rows, &test);
        let children = branch_rows
            .iter()
            .map(|branch| {
                if branch.is_empty() {
                    // A branch no training row reaches predicts like its parent.
                    TreeNode::leaf(distribution.clone())
                } else {
                    Self::build_node(dataset, branch, criterion, num_classes)
                }
            })
            .collect();
        TreeNode::Split {
            test,
            distribution,
            children,
        }
    }

    /// Scans every non-class attribute and keeps the first test with the
    /// strictly highest merit, so reruns over the same table always grow
    /// the same tree.
    fn best_split(
        dataset: &Dataset,
        rows: &[usize],
        criterion: &InfoGainSplitCriterion,
        num_classes: usize,
    ) -> Option<(SplitTest, f64)> {
        let header = dataset.header();
        let mut best: Option<(SplitTest, f64)> = None;
        for attribute_index in 0..header.number_of_attributes() {
            if attribute_index == header.class_index() {
                continue;
            }
            let Some(attribute) = header.attribute_at_index(attribute_index) else {
                continue;
            };
            let candidate = match attribute.as_any().downcast_ref::<NominalAttribute>() {
                Some(nominal) => Self::best_nominal_split(
                    dataset,
                    rows,
                    criterion,
                    num_classes,
                    attribute_index,
                    nominal.number_of_values(),
                ),
                None => {
                    Self::best_numeric_split(dataset, rows, criterion, num_classes, attribute_index)
                }
            };
            if let Some((test, merit)) = candidate {
                match &best {
                    Some((_, top)) if merit <= *top => {}
                    _ => best = Some((test, merit)),
                }
            }
        }
        best
    }

    fn best_numeric_split(
        dataset: &Dataset,
        rows: &[usize],
        criterion: &InfoGainSplitCriterion,
        num_classes: usize,
        attribute_index: usize,
    ) -> Option<(SplitTest, f64)> {
        let mut samples: Vec<(f64, usize, f64)> = Vec::with_capacity(rows.len());
        for &row in rows {
            let instance = &dataset.instances()[row];
            let value = match instance.value_at_index(attribute_index) {
                Some(v) if !v.is_nan() => v,
                _ => continue,
            };
            let Some(class_value) = instance.class_value() else {
                continue;
            };
            samples.push((value, class_value as usize, instance.weight()));
        }
        if samples.len() < 2 {
            return None;
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut known = vec![0.0; num_classes];
        for &(_, class, weight) in &samples {
            known[class] += weight;
        }

        let mut left = vec![0.0; num_classes];
        let mut best: Option<(f64, f64)> = None;
        for boundary in 0..samples.len() - 1 {
            let (value, class, weight) = samples[boundary];
            left[class] += weight;
            let next_value = samples[boundary + 1].0;
            if value == next_value {
                continue;
            }
            let threshold = (value + next_value) / 2.0;
            if threshold >= next_value {
                // The midpoint of two adjacent representable values can
                // round up and stop separating them.
                continue;
            }
            let right: Vec<f64> = known.iter().zip(&left).map(|(k, l)| k - l).collect();
            let merit = criterion.get_merit_of_split(&known, &[left.clone(), right]);
            match best {
                Some((_, top)) if merit <= top => {}
                _ => best = Some((threshold, merit)),
            }
        }
        best.map(|(threshold, merit)| {
            (
                SplitTest::NumericBinary {
                    attribute_index,
                    threshold,
                },
                merit,
            )
        })
    }

    fn best_nominal_split(
        dataset: &Dataset,
        rows: &[usize],
        criterion: &InfoGainSplitCriterion,
        num_classes: usize,
        attribute_index: usize,
        branches: usize,
    ) -> Option<(SplitTest, f64)> {
        if branches < 2 {
            return None;
        }
        let mut per_branch = vec![vec![0.0; num_classes]; branches];
        let mut known = vec![0.0; num_classes];
        for &row in rows {
            let instance = &dataset.instances()[row];
            let branch = match instance.value_at_index(attribute_index) {
                Some(v) if !v.is_nan() && v >= 0.0 && (v as usize) < branches => v as usize,
                _ => continue,
            };
            let Some(class_value) = instance.class_value() else {
                continue;
            };
            per_branch[branch][class_value as usize] += instance.weight();
            known[class_value as usize] += instance.weight();
        }
        let merit = criterion.get_merit_of_split(&known, &per_branch);
        Some((
            SplitTest::NominalMultiway {
                attribute_index,
                branches,
            },
            merit,
        ))
    }

    /// Rows the test cannot place follow the heaviest branch.
    fn partition_rows(dataset: &Dataset, rows: &[usize], test: &SplitTest) -> Vec<Vec<usize>> {
        let mut branches: Vec<Vec<usize>> = vec![Vec::new(); test.number_of_branches()];
        let mut unplaced = Vec::new();
        for &row in rows {
            match test.branch_for_instance(&dataset.instances()[row]) {
                Some(branch) => branches[branch].push(row),
                None => unplaced.push(row),
            }
        }
        if !unplaced.is_empty() {
            let mut heaviest = 0;
            let mut heaviest_weight = f64::NEG_INFINITY;
            for (index, branch) in branches.iter().enumerate() {
                let branch_weight = Self::rows_weight(dataset, branch);
                if branch_weight > heaviest_weight {
                    heaviest = index;
                    heaviest_weight = branch_weight;
                }
            }
            branches[heaviest].extend_from_slice(&unplaced);
        }
        branches
    }

    /// Bottom-up subtree replacement: a split whose pessimistic error as a
    /// single leaf does not exceed the summed error of its leaves (plus a
    /// small tolerance) collapses.
    fn prune(node: TreeNode) -> TreeNode {
        let TreeNode::Split {
            test,
            distribution,
            children,
        } = node
        else {
            return node;
        };
        let children: Vec<TreeNode> = children.into_iter().map(Self::prune).collect();
        let subtree_error: f64 = children.iter().map(Self::estimated_subtree_error).sum();
        let leaf_error = Self::estimated_leaf_error(&distribution);
        if leaf_error <= subtree_error + 0.1 {
            TreeNode::leaf(distribution)
        } else {
            TreeNode::Split {
                test,
                distribution,
                children,
            }
        }
    }

    fn estimated_subtree_error(node: &TreeNode) -> f64 {
        match node {
            TreeNode::Leaf { distribution } => Self::estimated_leaf_error(distribution),
            TreeNode::Split { children, .. } => {
                children.iter().map(Self::estimated_subtree_error).sum()
            }
        }
    }

    fn estimated_leaf_error(distribution: &[f64]) -> f64 {
        let weight: f64 = distribution.iter().sum();
        let errors = weight - distribution.iter().copied().fold(0.0, f64::max);
        errors + Self::added_pessimistic_errors(weight, errors)
    }

    /// Upper confidence bound on the extra errors a leaf of weight `n` with
    /// `e` observed errors is expected to make on unseen data, using the
    /// normal approximation to the binomial with linear interpolation below
    /// one error and a continuity correction near `n`.
    fn added_pessimistic_errors(n: f64, e: f64) -> f64 {
        if n <= 0.0 {
            return 0.0;
        }
        if e < 1.0 {
            let base = n * (1.0 - PRUNING_CONFIDENCE.powf(1.0 / n));
            if e == 0.0 {
                return base;
            }
            return base + e * (Self::added_pessimistic_errors(n, 1.0) - base);
        }
        if e + 0.5 >= n {
            return (n - e).max(0.0);
        }
        let z = PRUNING_Z;
        let f = (e + 0.5) / n;
        let r = (f
            + z * z / (2.0 * n)
            + z * (f / n - f * f / n + z * z / (4.0 * n * n)).sqrt())
            / (1.0 + z * z / n);
        r * n - e
    }

    fn branch_description(&self, test: &SplitTest, branch: usize) -> String {
        let attribute_name = self
            .header
            .attribute_at_index(test.attribute_index())
            .map(|attribute| attribute.name())
            .unwrap_or_default();
        match test {
            SplitTest::NumericBinary { threshold, .. } => {
                if branch == 0 {
                    format!("{attribute_name} <= {threshold}")
                } else {
                    format!("{attribute_name} > {threshold}")
                }
            }
            SplitTest::NominalMultiway {
                attribute_index, ..
            } => {
                let label = self
                    .header
                    .attribute_at_index(*attribute_index)
                    .and_then(|attribute| {
                        attribute.as_any().downcast_ref::<NominalAttribute>()
                    })
                    .and_then(|nominal| nominal.value_at(branch))
                    .unwrap_or("?")
                    .to_string();
                format!("{attribute_name} = {label}")
            }
        }
    }

    fn leaf_description(&self, node: &TreeNode) -> String {
        let majority = max_index(node.distribution()).unwrap_or(0);
        let label = self
            .header
            .class_labels()
            .and_then(|labels| labels.get(majority).cloned())
            .unwrap_or_else(|| majority.to_string());
        let errors = node.misclassified_weight();
        if errors > 0.0 {
            format!(
                "{} ({}/{})",
                label,
                Self::format_weight(node.weight()),
                Self::format_weight(errors)
            )
        } else {
            format!("{} ({})", label, Self::format_weight(node.weight()))
        }
    }

    fn format_weight(value: f64) -> String {
        let rounded = (value * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 {
            format!("{rounded:.1}")
        } else {
            format!("{rounded}")
        }
    }

    fn write_subtree(&self, f: &mut fmt::Formatter<'_>, node: &TreeNode, depth: usize) -> fmt::Result {
        let TreeNode::Split { test, children, .. } = node else {
            return Ok(());
        };
        for (branch, child) in children.iter().enumerate() {
            writeln!(f)?;
            for _ in 0..depth {
                write!(f, "|   ")?;
            }
            write!(f, "{}", self.branch_description(test, branch))?;
            match child {
                leaf @ TreeNode::Leaf { .. } => {
                    write!(f, ": {}", self.leaf_description(leaf))?;
                }
                split => self.write_subtree(f, split, depth + 1)?,
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn train(dataset: &Dataset) -> Result<Self, PipelineError> {
        let header = Arc::clone(dataset.header());
        let num_classes = header.number_of_classes();
        if num_classes == 0 {
            return Err(PipelineError::schema(format!(
                "relation '{}' needs a nominal class attribute to grow a tree",
                header.relation_name()
            )));
        }
        if dataset.is_empty() {
            return Err(PipelineError::schema(format!(
                "relation '{}' has no instances to train on",
                header.relation_name()
            )));
        }

        let rows: Vec<usize> = (0..dataset.number_of_instances()).collect();
        let criterion = InfoGainSplitCriterion::new();
        let grown = Self::build_node(dataset, &rows, &criterion, num_classes);
        let root = Self::prune(grown);
        Ok(DecisionTree { header, root })
    }

    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        self.root.votes_for_instance(instance)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pruned decision tree")?;
        writeln!(f, "--------------------")?;
        match &self.root {
            leaf @ TreeNode::Leaf { .. } => {
                write!(f, "\n: {}", self.leaf_description(leaf))?;
            }
            split => self.write_subtree(f, split, 0)?,
        }
        write!(f, "\n\nNumber of Leaves  : \t{}\n", self.number_of_leaves())?;
        write!(f, "\nSize of the tree : \t{}\n", self.tree_size())
    }
}
