use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::error::PipelineError;

/// A batch classifier. Training is the only way to obtain a value, so a
/// classifier is always in the trained state; fitting a new table means
/// training a new value.
pub trait Classifier: Sized {
    fn train(dataset: &Dataset) -> Result<Self, PipelineError>;

    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;

    /// Index of the first maximal vote, so repeated calls on the same
    /// instance always agree.
    fn predict(&self, instance: &dyn Instance) -> Option<usize> {
        max_index(&self.get_votes_for_instance(instance))
    }
}

pub fn max_index(votes: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &vote) in votes.iter().enumerate() {
        if vote.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if vote <= top => {}
            _ => best = Some((index, vote)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{training_header, training_instance};

    struct FixedVotes(Vec<f64>);

    impl Classifier for FixedVotes {
        fn train(_dataset: &Dataset) -> Result<Self, PipelineError> {
            Ok(FixedVotes(Vec::new()))
        }

        fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Vec<f64> {
            self.0.clone()
        }
    }

    #[test]
    fn test_max_index_picks_the_largest_vote() {
        assert_eq!(max_index(&[0.5, 3.0, 1.0]), Some(1));
    }

    #[test]
    fn test_max_index_breaks_ties_toward_the_first() {
        assert_eq!(max_index(&[2.0, 2.0, 2.0]), Some(0));
        assert_eq!(max_index(&[0.0, 0.0]), Some(0));
    }

    #[test]
    fn test_max_index_of_empty_votes_is_none() {
        assert_eq!(max_index(&[]), None);
        assert_eq!(max_index(&[f64::NAN]), None);
    }

    #[test]
    fn test_default_predict_uses_the_vote_argmax() {
        let header = training_header();
        let instance = training_instance(&header, [265.0, 470.0, 18.7, 23.5, 220.0], 0);

        let classifier = FixedVotes(vec![0.0, 7.0, 2.0]);
        assert_eq!(classifier.predict(&instance), Some(1));

        let silent = FixedVotes(Vec::new());
        assert_eq!(silent.predict(&instance), None);
    }
}
