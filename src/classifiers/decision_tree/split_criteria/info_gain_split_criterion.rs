use crate::classifiers::decision_tree::split_criteria::SplitCriterion;

/// Information gain: entropy of the parent distribution minus the weighted
/// entropy of the branches. Splits where fewer than two branches carry at
/// least `min_branch_fraction` of the weight are vetoed.
pub struct InfoGainSplitCriterion {
    min_branch_fraction: f64,
}

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self {
            min_branch_fraction: 0.01,
        }
    }

    pub fn compute_entropy(&self, distribution: &[f64]) -> f64 {
        let total: f64 = distribution.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let mut entropy = 0.0;
        for &weight in distribution {
            if weight > 0.0 {
                let rel_freq = weight / total;
                entropy -= rel_freq * rel_freq.log2();
            }
        }
        entropy
    }

    fn branches_with_enough_weight(
        &self,
        post_split_dists: &[Vec<f64>],
        total_weight: f64,
    ) -> usize {
        post_split_dists
            .iter()
            .filter(|dist| dist.iter().sum::<f64>() / total_weight >= self.min_branch_fraction)
            .count()
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let total_weight: f64 = post_split_dists.iter().flatten().sum();
        if total_weight <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if self.branches_with_enough_weight(post_split_dists, total_weight) < 2 {
            return f64::NEG_INFINITY;
        }

        let mut post_entropy = 0.0;
        for dist in post_split_dists {
            let branch_weight: f64 = dist.iter().sum();
            post_entropy += (branch_weight / total_weight) * self.compute_entropy(dist);
        }

        self.compute_entropy(pre_split_distribution) - post_entropy
    }
}
