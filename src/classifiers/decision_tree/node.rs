use crate::core::instances::Instance;

/// Routing test applied at an internal node.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitTest {
    /// Sends values `<= threshold` down branch 0 and the rest down branch 1.
    NumericBinary {
        attribute_index: usize,
        threshold: f64,
    },
    /// One branch per label of a nominal attribute.
    NominalMultiway {
        attribute_index: usize,
        branches: usize,
    },
}

impl SplitTest {
    pub fn attribute_index(&self) -> usize {
        match self {
            SplitTest::NumericBinary {
                attribute_index, ..
            } => *attribute_index,
            SplitTest::NominalMultiway {
                attribute_index, ..
            } => *attribute_index,
        }
    }

    pub fn number_of_branches(&self) -> usize {
        match self {
            SplitTest::NumericBinary { .. } => 2,
            SplitTest::NominalMultiway { branches, .. } => *branches,
        }
    }

    /// Returns the branch the instance follows, or `None` when the tested
    /// value is missing or outside the known domain.
    pub fn branch_for_instance(&self, instance: &dyn Instance) -> Option<usize> {
        match self {
            SplitTest::NumericBinary {
                attribute_index,
                threshold,
            } => {
                if instance.is_missing_at_index(*attribute_index) {
                    return None;
                }
                let value = instance.value_at_index(*attribute_index)?;
                Some(if value <= *threshold { 0 } else { 1 })
            }
            SplitTest::NominalMultiway {
                attribute_index,
                branches,
            } => {
                if instance.is_missing_at_index(*attribute_index) {
                    return None;
                }
                let value = instance.value_at_index(*attribute_index)?;
                if value < 0.0 {
                    return None;
                }
                let branch = value as usize;
                (branch < *branches).then_some(branch)
            }
        }
    }
}

/// A grown tree. Internal nodes keep the class distribution they observed
/// during training so instances that cannot be routed further still vote.
#[derive(Clone, Debug)]
pub enum TreeNode {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        test: SplitTest,
        distribution: Vec<f64>,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(distribution: Vec<f64>) -> Self {
        TreeNode::Leaf { distribution }
    }

    pub fn distribution(&self) -> &[f64] {
        match self {
            TreeNode::Leaf { distribution } => distribution,
            TreeNode::Split { distribution, .. } => distribution,
        }
    }

    /// Total training weight that reached this node.
    pub fn weight(&self) -> f64 {
        self.distribution().iter().sum()
    }

    /// Training weight not covered by the majority class.
    pub fn misclassified_weight(&self) -> f64 {
        let largest = self.distribution().iter().copied().fold(0.0, f64::max);
        self.weight() - largest
    }

    pub fn number_of_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { children, .. } => {
                children.iter().map(TreeNode::number_of_leaves).sum()
            }
        }
    }

    pub fn number_of_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { children, .. } => {
                1 + children.iter().map(TreeNode::number_of_nodes).sum::<usize>()
            }
        }
    }

    /// Routes the instance to a leaf and returns that leaf's distribution.
    /// A node whose test cannot place the instance votes with its own
    /// training distribution instead.
    pub fn votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        match self {
            TreeNode::Leaf { distribution } => distribution.clone(),
            TreeNode::Split {
                test,
                distribution,
                children,
            } => match test.branch_for_instance(instance) {
                Some(branch) if branch < children.len() => {
                    children[branch].votes_for_instance(instance)
                }
                _ => distribution.clone(),
            },
        }
    }
}
