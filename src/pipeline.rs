//! End-to-end evaluation driven by an [`EvalSpec`]

use crate::config::EvalSpec;
use crate::data::load_dataset;
use crate::diagnostics::{
    class_gallery, latent_distribution, latent_feature_sweep, learned_modes,
    predicted_label_distribution, reconstruction_example, select_batch, Artifact, ArtifactSink,
    ImageGrid, ImageSlot,
};
use crate::error::{Error, Result};
use crate::eval::{
    classification_accuracy, highest_loss_label, unsupervised_accuracy, AlignmentReport,
    LossRanking,
};
use crate::model::{AffineDecoder, AffineEncoder, Decoder, Encoder};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Headline results of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    /// Supervised accuracy, percent
    pub supervised_percent: f64,
    /// Permutation-invariant accuracy report
    pub alignment: AlignmentReport,
    /// Per-class reconstruction loss ranking
    pub ranking: LossRanking,
    /// Names of the artifacts handed to the sink
    pub artifacts: Vec<String>,
}

fn check_dimensions(spec: &EvalSpec, encoder: &AffineEncoder, decoder: &AffineDecoder) -> Result<()> {
    let model = &spec.model;
    if encoder.n_classes() != model.n_classes || encoder.style_dim() != model.style_dim {
        return Err(Error::Config(format!(
            "encoder has {} classes and style_dim {}, config says {} and {}",
            encoder.n_classes(),
            encoder.style_dim(),
            model.n_classes,
            model.style_dim
        )));
    }
    if encoder.input_size() != model.input_size {
        return Err(Error::Config(format!(
            "encoder expects input_size {}, config says {}",
            encoder.input_size(),
            model.input_size
        )));
    }
    if decoder.latent_size() != model.n_classes + model.style_dim {
        return Err(Error::Config(format!(
            "decoder expects latent width {}, config implies {}",
            decoder.latent_size(),
            model.n_classes + model.style_dim
        )));
    }
    Ok(())
}

/// Load models and data named by `spec`, run every evaluator and diagnostic,
/// and hand the artifacts to `sink`.
pub fn evaluate_from_spec(spec: &EvalSpec, sink: &mut dyn ArtifactSink) -> Result<EvaluationSummary> {
    let ctx = spec.context();
    let n_classes = spec.model.n_classes;
    let settings = &spec.evaluation;

    let mut encoder = AffineEncoder::load(&spec.model.encoder)?;
    let mut decoder = AffineDecoder::load(&spec.model.decoder)?;
    check_dimensions(spec, &encoder, &decoder)?;

    let validation = load_dataset(&spec.data.validation)?;
    let loader = validation.loader(spec.data.batch_size)?;
    tracing::info!(
        samples = validation.len(),
        batches = loader.num_batches(),
        device = %ctx.device(),
        "evaluating"
    );

    let supervised_percent = classification_accuracy(&mut encoder, &loader, &ctx)?;
    let alignment = unsupervised_accuracy(&mut encoder, &loader, n_classes, &ctx)?;
    let ranking = highest_loss_label(&mut encoder, &mut decoder, &loader, n_classes, &ctx)?;

    let mut artifacts = vec![
        Artifact::Accuracy { name: "supervised_accuracy".into(), percent: supervised_percent },
        Artifact::Alignment { name: "label_alignment".into(), report: alignment.clone() },
        Artifact::LossRanking { name: "reconstruction_loss".into(), ranking: ranking.clone() },
        Artifact::LabelCounts {
            name: "predicted_labels".into(),
            counts: predicted_label_distribution(&mut encoder, &loader, n_classes, &ctx)?,
        },
    ];

    let mut rng = settings.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let batch = select_batch(&loader, &mut rng)?;

    let latent = latent_distribution(&mut encoder, &batch, &ctx, settings.histogram_bins)?;
    artifacts.push(Artifact::Histogram {
        name: "y_distribution".into(),
        histogram: latent.highest_probability,
    });
    if let Some(histogram) = latent.first_style {
        artifacts.push(Artifact::Histogram { name: "z_distribution".into(), histogram });
    }

    let gallery = class_gallery(
        &mut encoder,
        &mut decoder,
        &batch,
        &ctx,
        settings.top_samples_per_class,
    )?;
    artifacts.push(Artifact::Images { name: "class_gallery".into(), grid: gallery });

    let example = reconstruction_example(&mut encoder, &mut decoder, &batch, &ctx)?;
    let mut pair = ImageGrid::new(format!("reconstruction (cluster {})", example.predicted), 1, 2);
    pair.set(0, 0, ImageSlot::Present(example.original));
    pair.set(0, 1, ImageSlot::Present(example.reconstruction));
    artifacts.push(Artifact::Images { name: "reconstruction".into(), grid: pair });

    if spec.model.style_dim > 0 {
        let sweep = latent_feature_sweep(
            &mut decoder,
            n_classes,
            spec.model.style_dim,
            settings.feature_sweep_steps,
            &ctx,
        )?;
        artifacts.push(Artifact::Images { name: "latent_features".into(), grid: sweep });
    }

    if let Some(path) = &spec.model.mode_decoder {
        let mut mode_decoder = AffineDecoder::load(path)?;
        let modes = learned_modes(&mut mode_decoder, n_classes, &ctx)?;
        artifacts.push(Artifact::Images { name: "learned_modes".into(), grid: modes });
    }

    let names = artifacts.iter().map(|a| a.name().to_string()).collect();
    for artifact in artifacts {
        sink.emit(artifact)?;
    }

    Ok(EvaluationSummary { supervised_percent, alignment, ranking, artifacts: names })
}
