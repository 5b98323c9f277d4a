//! ONNX inference for the DistilBERT classification head.

use crate::error::{ModelError, Result};
use crate::models::distilbert::core::DistilBertClassifier;
use crate::models::distilbert::labels::LabelMap;
use crate::traits::SentimentModel;
use crate::types::Sentiment;
use ndarray::prelude::*;
use ndarray_stats::QuantileExt;
use ort::{inputs, value::Tensor};

impl DistilBertClassifier {
    /// Run the model on one piece of text and return raw class logits.
    pub(super) fn logits(&mut self, text: &str) -> Result<Array1<f32>> {
        let encoding = self.tokenizer.encode(text, true)?;
        let len = encoding.len();

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();

        let input_ids = Tensor::from_array(Array2::from_shape_vec((1, len), input_ids)?)?;
        let attention_mask =
            Tensor::from_array(Array2::from_shape_vec((1, len), attention_mask)?)?;

        let mut outputs = self.session.run(inputs!(
            "input_ids" => input_ids,
            "attention_mask" => attention_mask,
        ))?;

        let logits = outputs
            .remove("logits")
            .ok_or_else(|| ModelError::MissingOutput {
                name: "logits".to_string(),
            })?;

        let logits: ArrayViewD<f32> = logits.try_extract_array()?;

        Ok(logits.flatten().to_owned())
    }
}

/// Turn class logits into the winning label and its softmax probability.
pub fn predict(logits: ArrayView1<f32>, labels: &LabelMap) -> Result<Sentiment> {
    let index = logits.argmax()?;

    let label = labels.get(index).ok_or(ModelError::UnlabeledClass {
        index,
        labels: labels.len(),
    })?;

    let probs = softmax(logits);

    Ok(Sentiment::new(label, probs[index]))
}

/// Numerically stable softmax.
pub fn softmax(logits: ArrayView1<f32>) -> Array1<f32> {
    let max = logits.fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp = logits.mapv(|x| (x - max).exp());
    let sum = exp.sum();
    exp / sum
}

impl SentimentModel for DistilBertClassifier {
    fn classify(&mut self, text: &str) -> Result<Sentiment> {
        let logits = self.logits(text)?;
        let sentiment = predict(logits.view(), &self.labels)?;

        tracing::trace!(label = %sentiment.label, score = sentiment.score);

        Ok(sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Label;
    use ndarray::array;

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(array![1.0, 2.0, 3.0].view());

        assert!((probs.sum() - 1.0).abs() < 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn softmax_handles_large_logits() {
        let probs = softmax(array![1000.0, 1000.0].view());

        assert!((probs[0] - 0.5).abs() < 1e-6);
        assert!((probs[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn predicts_positive() {
        let sentiment = predict(array![-2.0, 3.0].view(), &LabelMap::sst2()).unwrap();

        assert_eq!(sentiment.label, Label::Positive);
        assert!(sentiment.score > 0.99 && sentiment.score <= 1.0);
    }

    #[test]
    fn predicts_negative() {
        let sentiment = predict(array![4.0, -1.0].view(), &LabelMap::sst2()).unwrap();

        assert_eq!(sentiment.label, Label::Negative);
        assert!(sentiment.score >= 0.5);
    }

    #[test]
    fn rejects_unlabeled_class() {
        let err = predict(array![0.0, 0.0, 5.0].view(), &LabelMap::sst2()).unwrap_err();

        assert!(matches!(
            err,
            Error::Model(ModelError::UnlabeledClass {
                index: 2,
                labels: 2
            })
        ));
    }

    #[test]
    fn rejects_empty_logits() {
        let logits: Array1<f32> = Array1::zeros(0);
        let err = predict(logits.view(), &LabelMap::sst2()).unwrap_err();

        assert!(matches!(err, Error::Model(ModelError::MinMax(_))));
    }
}
