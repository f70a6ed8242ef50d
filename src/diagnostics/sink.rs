//! Artifact sinks: where finalized metrics and image data go for rendering

use super::grid::ImageGrid;
use super::histogram::Histogram;
use crate::error::{Error, Result};
use crate::eval::{AlignmentReport, LossRanking};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named result ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    /// Supervised accuracy percentage
    Accuracy { name: String, percent: f64 },
    /// Label-alignment report
    Alignment { name: String, report: AlignmentReport },
    /// Reconstruction-loss ranking
    LossRanking { name: String, ranking: LossRanking },
    /// Predicted-cluster counts, indexed by cluster
    LabelCounts { name: String, counts: Vec<usize> },
    /// Histogram of some scalar
    Histogram { name: String, histogram: Histogram },
    /// Grid of images
    Images { name: String, grid: ImageGrid },
}

impl Artifact {
    /// Artifact name, used as the file stem by file-backed sinks
    pub fn name(&self) -> &str {
        match self {
            Self::Accuracy { name, .. }
            | Self::Alignment { name, .. }
            | Self::LossRanking { name, .. }
            | Self::LabelCounts { name, .. }
            | Self::Histogram { name, .. }
            | Self::Images { name, .. } => name,
        }
    }
}

/// Receives artifacts from an evaluation run.
pub trait ArtifactSink {
    /// Take ownership of one artifact
    fn emit(&mut self, artifact: Artifact) -> Result<()>;
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Look up an artifact by name
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name() == name)
    }
}

impl ArtifactSink for MemorySink {
    fn emit(&mut self, artifact: Artifact) -> Result<()> {
        self.artifacts.push(artifact);
        Ok(())
    }
}

/// Writes each artifact to `<dir>/<name>.json`.
#[derive(Debug)]
pub struct JsonArtifactSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonArtifactSink {
    /// Sink writing into `dir`, created if missing
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;
        Ok(Self { dir, written: Vec::new() })
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for JsonArtifactSink {
    fn emit(&mut self, artifact: Artifact) -> Result<()> {
        let path = self.dir.join(format!("{}.json", artifact.name()));
        let json = serde_json::to_string_pretty(&artifact)?;
        fs::write(&path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_lookup() {
        let mut sink = MemorySink::new();
        sink.emit(Artifact::Accuracy { name: "valid".into(), percent: 91.5 }).unwrap();
        sink.emit(Artifact::LabelCounts { name: "predicted".into(), counts: vec![1, 2] })
            .unwrap();

        assert_eq!(sink.artifacts().len(), 2);
        assert!(matches!(sink.get("predicted"), Some(Artifact::LabelCounts { .. })));
        assert!(sink.get("missing").is_none());
    }

    #[test]
    fn test_json_sink_writes_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonArtifactSink::new(dir.path().join("out")).unwrap();
        sink.emit(Artifact::Histogram {
            name: "y_distribution".into(),
            histogram: Histogram::from_values(&[0.1, 0.9], 2),
        })
        .unwrap();

        let path = dir.path().join("out").join("y_distribution.json");
        assert_eq!(sink.written(), &[path.clone()]);
        let back: Artifact =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back.name(), "y_distribution");
    }
}
