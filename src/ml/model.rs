use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        BiLstm, BiLstmConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::sigmoid,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SentimentModelConfig {
    pub vocab_size: usize,
    #[config(default = 128)]
    pub embedding_dim: usize,
    /// Hidden size of each LSTM direction
    #[config(default = 64)]
    pub lstm_units: usize,
}

impl SentimentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentModel<B> {
        let embedding  = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let bilstm     = BiLstmConfig::new(self.embedding_dim, self.lstm_units, true).init(device);
        let classifier = LinearConfig::new(2 * self.lstm_units, 1).init(device);
        SentimentModel {
            embedding,
            bilstm,
            classifier,
            embedding_dim: self.embedding_dim,
            lstm_units:    self.lstm_units,
        }
    }
}

/// Embedding → bidirectional LSTM → single sigmoid unit.
#[derive(Module, Debug)]
pub struct SentimentModel<B: Backend> {
    pub embedding:  Embedding<B>,
    pub bilstm:     BiLstm<B>,
    pub classifier: Linear<B>,
    pub embedding_dim: usize,
    pub lstm_units:    usize,
}

impl<B: Backend> SentimentModel<B> {
    /// input_ids: [batch, seq_len] → logits: [batch]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, seq_len] = input_ids.dims();
        let units = self.lstm_units;

        let embedded = self.embedding.forward(input_ids); // [batch, seq_len, embedding_dim]
        let (sequence, _) = self.bilstm.forward(embedded, None); // [batch, seq_len, 2 * units]

        // Each direction's final state: the forward pass ends at the last
        // position, the backward pass ends at the first.
        let forward_final = sequence
            .clone()
            .slice([0..batch_size, seq_len - 1..seq_len, 0..units])
            .reshape([batch_size, units]);
        let backward_final = sequence
            .slice([0..batch_size, 0..1, units..2 * units])
            .reshape([batch_size, units]);

        let features = Tensor::cat(vec![forward_final, backward_final], 1);
        self.classifier.forward(features).reshape([batch_size])
    }

    /// Probability that each review is positive: [batch] in (0, 1)
    pub fn forward_probabilities(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        sigmoid(self.forward(input_ids))
    }

    /// Binary cross-entropy on the logits. Returns (mean loss, logits).
    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits = self.forward(input_ids);
        let loss = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }

    /// Per-layer parameter counts, laid out like a Keras summary.
    pub fn summary(&self, max_len: usize) -> ModelSummary {
        let embedding_dim = self.embedding_dim;
        let layers = vec![
            LayerSummary {
                name:         "embedding".into(),
                kind:         "Embedding".into(),
                output_shape: format!("(None, {max_len}, {embedding_dim})"),
                params:       self.embedding.num_params(),
            },
            LayerSummary {
                name:         "bidirectional".into(),
                kind:         "BiLstm".into(),
                output_shape: format!("(None, {})", 2 * self.lstm_units),
                params:       self.bilstm.num_params(),
            },
            LayerSummary {
                name:         "dense".into(),
                kind:         "Linear + sigmoid".into(),
                output_shape: "(None, 1)".into(),
                params:       self.classifier.num_params(),
            },
        ];
        let total_params = layers.iter().map(|l| l.params).sum();
        ModelSummary { layers, total_params }
    }
}

#[derive(Debug, Clone)]
pub struct LayerSummary {
    pub name:         String,
    pub kind:         String,
    pub output_shape: String,
    pub params:       usize,
}

#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub layers:       Vec<LayerSummary>,
    pub total_params: usize,
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "─".repeat(72);
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<32}{:<24}{:>16}", "Layer (type)", "Output Shape", "Param #")?;
        writeln!(f, "{rule}")?;
        for layer in &self.layers {
            writeln!(
                f,
                "{:<32}{:<24}{:>16}",
                format!("{} ({})", layer.name, layer.kind),
                layer.output_shape,
                layer.params,
            )?;
        }
        writeln!(f, "{rule}")?;
        write!(f, "Total params: {}", self.total_params)
    }
}
