use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::error::PipelineError;
use std::fmt;
use std::sync::Arc;

/// One classified candidate: the raw values as given, the label the record
/// carried (if any) and the label the model assigned.
#[derive(Clone, Debug)]
pub struct Prediction {
    pub record: Vec<String>,
    pub actual: Option<String>,
    pub predicted: String,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.record.join(","), self.predicted)
    }
}

/// Builds one instance from raw measurement tokens and runs it through a
/// trained classifier. The candidate may carry a trailing species label
/// (`?` for unknown) or omit it entirely.
pub fn classify_new_record<C: Classifier>(
    classifier: &C,
    header: &Arc<InstanceHeader>,
    raw_values: &[&str],
) -> Result<Prediction, PipelineError> {
    let attribute_count = header.number_of_attributes();
    if raw_values.len() != attribute_count && raw_values.len() + 1 != attribute_count {
        return Err(PipelineError::schema(format!(
            "candidate has {} values but relation '{}' takes {} measurements plus an optional label",
            raw_values.len(),
            header.relation_name(),
            attribute_count - 1
        )));
    }

    let mut values = Vec::with_capacity(attribute_count);
    for (index, raw) in raw_values.iter().enumerate() {
        let token = raw.trim();
        if token == "?" {
            values.push(f64::NAN);
            continue;
        }
        let Some(attribute) = header.attribute_at_index(index) else {
            continue;
        };
        let parsed = attribute.parse_token(token).map_err(PipelineError::schema)?;
        values.push(parsed);
    }
    if values.len() < attribute_count {
        values.push(f64::NAN);
    }

    let labels = header.class_labels().ok_or_else(|| {
        PipelineError::schema(format!(
            "relation '{}' has no nominal class to predict",
            header.relation_name()
        ))
    })?;

    let instance = DenseInstance::new(Arc::clone(header), values, 1.0);
    let predicted_index = classifier
        .predict(&instance)
        .ok_or_else(|| PipelineError::schema("classifier produced no votes for the candidate"))?;
    let predicted = labels.get(predicted_index).cloned().ok_or_else(|| {
        PipelineError::schema(format!(
            "predicted class index {predicted_index} is outside the label domain"
        ))
    })?;
    let actual = instance
        .class_value()
        .and_then(|value| labels.get(value as usize).cloned());

    Ok(Prediction {
        record: raw_values.iter().map(|raw| raw.trim().to_string()).collect(),
        actual,
        predicted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::DecisionTree;
    use crate::testing::separable_table;

    fn trained_tree() -> DecisionTree {
        DecisionTree::train(&separable_table()).unwrap()
    }

    #[test]
    fn test_labeled_candidate_keeps_its_declared_species() {
        let tree = trained_tree();
        let prediction = classify_new_record(
            &tree,
            tree.header(),
            &["265", "470", "18.7", "23.5", "220", "CH"],
        )
        .unwrap();

        assert_eq!(prediction.predicted, "CH");
        assert_eq!(prediction.actual.as_deref(), Some("CH"));
    }

    #[test]
    fn test_unlabeled_candidate_is_still_classified() {
        let tree = trained_tree();
        let prediction =
            classify_new_record(&tree, tree.header(), &["265", "470", "18.7", "23.5", "220"])
                .unwrap();

        assert_eq!(prediction.predicted, "CH");
        assert_eq!(prediction.actual, None);
    }

    #[test]
    fn test_question_mark_label_counts_as_unknown() {
        let tree = trained_tree();
        let prediction = classify_new_record(
            &tree,
            tree.header(),
            &["160", "170", "12.5", "14.3", "151", "?"],
        )
        .unwrap();

        assert_eq!(prediction.predicted, "SS");
        assert_eq!(prediction.actual, None);
    }

    #[test]
    fn test_classifying_twice_gives_the_same_label() {
        let tree = trained_tree();
        let candidate = ["365", "950", "26.0", "30.0", "222", "?"];

        let first = classify_new_record(&tree, tree.header(), &candidate).unwrap();
        let second = classify_new_record(&tree, tree.header(), &candidate).unwrap();
        assert_eq!(first.predicted, second.predicted);
        assert_eq!(first.predicted, "RT");
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let tree = trained_tree();
        let err = classify_new_record(&tree, tree.header(), &["265", "470"]).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
        assert!(err.to_string().contains("5 measurements"));
    }

    #[test]
    fn test_unknown_species_label_is_rejected() {
        let tree = trained_tree();
        let err = classify_new_record(
            &tree,
            tree.header(),
            &["265", "470", "18.7", "23.5", "220", "XX"],
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
    }

    #[test]
    fn test_non_numeric_measurement_is_rejected() {
        let tree = trained_tree();
        let err = classify_new_record(
            &tree,
            tree.header(),
            &["heavy", "470", "18.7", "23.5", "220", "CH"],
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
    }

    #[test]
    fn test_display_joins_record_and_label() {
        let prediction = Prediction {
            record: vec!["265".into(), "470".into()],
            actual: None,
            predicted: "CH".into(),
        };
        assert_eq!(prediction.to_string(), "265,470 -> CH");
    }
}
