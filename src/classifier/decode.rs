use super::error::ClassifierError;
use super::labels::LabelTable;

/// A single classification outcome: the best-guess class and how strongly
/// the model scored it.
///
/// Confidence is the raw quantized score rescaled to `[0.0, 1.0]`. It is a
/// monotonic rescaling of the score space, not a probability; scores
/// across classes are not guaranteed to sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

/// Maps a filled quantized output buffer to the argmax class and its
/// confidence.
///
/// All scores are scanned; ties on the maximum are broken by first
/// occurrence, so the lowest index wins. An empty buffer or a buffer whose
/// length disagrees with the label table indicates a packaging defect and
/// is rejected as a configuration error rather than decoded.
pub fn decode(output: &[u8], labels: &LabelTable) -> Result<Classification, ClassifierError> {
    if output.is_empty() {
        return Err(ClassifierError::Configuration(
            "output buffer is empty".to_string(),
        ));
    }
    if output.len() != labels.len() {
        return Err(ClassifierError::Configuration(format!(
            "output buffer has {} scores but the label table has {} entries",
            output.len(),
            labels.len()
        )));
    }

    let mut max_index = 0;
    let mut max_score = output[0];
    for (index, &score) in output.iter().enumerate().skip(1) {
        if score > max_score {
            max_score = score;
            max_index = index;
        }
    }

    Ok(Classification {
        label: labels.labels()[max_index].clone(),
        confidence: max_score as f32 / 255.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str]) -> LabelTable {
        LabelTable::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_argmax_selects_highest_score() {
        let labels = table(&["cat", "dog"]);
        let result = decode(&[200, 50], &labels).unwrap();
        assert_eq!(result.label, "cat");
        assert_eq!(result.confidence, 200.0 / 255.0);
    }

    #[test]
    fn test_ties_break_to_the_lowest_index() {
        let labels = table(&["cat", "dog", "fox", "owl"]);
        let result = decode(&[10, 255, 255, 0], &labels).unwrap();
        assert_eq!(result.label, "dog");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_confidence_scaling_hits_the_bounds_exactly() {
        let labels = table(&["only"]);
        assert_eq!(decode(&[255], &labels).unwrap().confidence, 1.0);
        assert_eq!(decode(&[0], &labels).unwrap().confidence, 0.0);
    }

    #[test]
    fn test_all_zero_buffer_is_a_defined_result() {
        let labels = table(&["cat", "dog", "fox"]);
        let result = decode(&[0, 0, 0], &labels).unwrap();
        assert_eq!(result.label, "cat");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let labels = table(&["cat", "dog", "fox"]);
        let buffer = [13, 200, 77];
        let first = decode(&buffer, &labels).unwrap();
        let second = decode(&buffer, &labels).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let labels = table(&["cat"]);
        assert!(matches!(
            decode(&[], &labels),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let labels = table(&["cat", "dog"]);
        assert!(matches!(
            decode(&[1, 2, 3], &labels),
            Err(ClassifierError::Configuration(_))
        ));
    }
}
