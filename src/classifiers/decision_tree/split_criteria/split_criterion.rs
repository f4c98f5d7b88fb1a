/// Scores how much a candidate split improves on a node's class
/// distribution. Higher is better; `f64::NEG_INFINITY` marks a split that
/// must not be taken.
pub trait SplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64;
}
