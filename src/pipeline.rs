//! End-to-end contour generation
//!
//! normalize -> triangulate -> trace thresholds -> merge -> simplify -> smooth -> encode
//!
//! Thresholds are traced in parallel, each into its own slot. Merged lines
//! are then simplified and smoothed in parallel. Any failure trips the shared
//! cancel token so outstanding work stops, and no partial output is returned.

use geo::LineString;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::cancel::CancelToken;
use crate::config::{ContourConfig, ShortLinePolicy};
use crate::contour::{build_raw_contours, dedup_thresholds};
use crate::domain::{ContourLine, Point3D, RawContours};
use crate::error::{ContourError, Result};
use crate::geojson::{FeatureCollection, Normalizer, encode_features, parse_points};
use crate::geometry::{CurveSmoother, LineMerger, NodedLineMerger, Simplifier, TopologyPreserving};
use crate::mesh::{DelaunayTriangulator, Triangulator};

/// Counts gathered while running the pipeline
#[derive(Debug, Clone, Default)]
pub struct ContourStats {
    pub points: usize,
    pub triangles: usize,
    pub thresholds: usize,
    pub segments: usize,
    pub merged_lines: usize,
    pub lines: usize,
}

/// Lines produced by one pipeline run
#[derive(Debug, Clone, Default)]
pub struct ContourOutput {
    pub lines: Vec<ContourLine>,
    pub stats: ContourStats,
}

/// Contour pipeline with pluggable triangulation, merging and simplification
pub struct ContourPipeline {
    config: ContourConfig,
    triangulator: Box<dyn Triangulator>,
    merger: Box<dyn LineMerger>,
    simplifier: Box<dyn Simplifier>,
    cancel: CancelToken,
}

impl Default for ContourPipeline {
    fn default() -> Self {
        Self::new(ContourConfig::default())
    }
}

impl ContourPipeline {
    pub fn new(config: ContourConfig) -> Self {
        Self {
            config,
            triangulator: Box::new(DelaunayTriangulator),
            merger: Box::new(NodedLineMerger),
            simplifier: Box::new(TopologyPreserving),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_triangulator(mut self, triangulator: impl Triangulator + 'static) -> Self {
        self.triangulator = Box::new(triangulator);
        self
    }

    pub fn with_merger(mut self, merger: impl LineMerger + 'static) -> Self {
        self.merger = Box::new(merger);
        self
    }

    /// Simplifier applied to merged lines before smoothing
    pub fn with_simplifier(mut self, simplifier: impl Simplifier + 'static) -> Self {
        self.simplifier = Box::new(simplifier);
        self
    }

    /// Share a cancel token with the caller so it can stop a running build
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Contour a GeoJSON MultiPoint document straight to a FeatureCollection
    pub fn run_geojson(
        &self,
        json: &str,
        thresholds: &[f64],
    ) -> Result<(FeatureCollection, ContourStats)> {
        let points = parse_points(json, &Normalizer::from_config(&self.config))?;
        let output = self.run(points, thresholds)?;
        let collection = encode_features(&output.lines, self.config.threshold_property);
        Ok((collection, output.stats))
    }

    /// Contour already-normalized points into a FeatureCollection
    pub fn build_contours(
        &self,
        points: &[Point3D],
        thresholds: &[f64],
    ) -> Result<FeatureCollection> {
        let output = self.run(points.to_vec(), thresholds)?;
        Ok(encode_features(&output.lines, self.config.threshold_property))
    }

    /// Contour already-normalized points into smoothed lines
    #[instrument(skip_all, fields(points = points.len(), thresholds = thresholds.len()))]
    pub fn run(&self, points: Vec<Point3D>, thresholds: &[f64]) -> Result<ContourOutput> {
        if let Some(&bad) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(ContourError::ThresholdParse {
                token: bad.to_string(),
            });
        }
        let thresholds = dedup_thresholds(thresholds);

        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ContourError::Unclassified(e.to_string()))?;
                pool.install(|| self.run_stages(points, &thresholds))
            }
            None => self.run_stages(points, &thresholds),
        }
    }

    fn run_stages(&self, points: Vec<Point3D>, thresholds: &[f64]) -> Result<ContourOutput> {
        let mut stats = ContourStats {
            points: points.len(),
            thresholds: thresholds.len(),
            ..Default::default()
        };

        self.cancel.check()?;
        let mesh = self.cancel.guard(self.triangulator.triangulate(points))?;
        stats.triangles = mesh.triangle_count();

        let raw = build_raw_contours(&mesh, thresholds, &self.config.quantizer(), &self.cancel)?;
        stats.segments = raw.iter().map(|r| r.segments.len()).sum();

        let assembled: Vec<(usize, Vec<ContourLine>)> = raw
            .par_iter()
            .map(|contours| self.cancel.guard(self.assemble(contours)))
            .collect::<Result<_>>()?;

        stats.merged_lines = assembled.iter().map(|(merged, _)| merged).sum();
        let lines: Vec<ContourLine> = assembled.into_iter().flat_map(|(_, l)| l).collect();
        stats.lines = lines.len();

        debug!(?stats, "contours assembled");
        Ok(ContourOutput { lines, stats })
    }

    /// Merge one threshold's segments, then simplify and smooth each line.
    /// Returns the merged line count alongside the finished lines.
    fn assemble(&self, contours: &RawContours) -> Result<(usize, Vec<ContourLine>)> {
        self.cancel.check()?;
        let merged = self.merger.merge(&contours.segments)?;
        let smoother = CurveSmoother::new(self.config.smooth_tolerance);

        let lines: Vec<Option<ContourLine>> = merged
            .par_iter()
            .map(|line| -> Result<Option<ContourLine>> {
                self.cancel.check()?;
                Ok(self
                    .finish_line(line, &smoother)
                    .map(|l| ContourLine::new(contours.threshold, l)))
            })
            .collect::<Result<_>>()?;

        Ok((merged.len(), lines.into_iter().flatten().collect()))
    }

    fn finish_line(
        &self,
        line: &LineString<f64>,
        smoother: &CurveSmoother,
    ) -> Option<LineString<f64>> {
        if line.0.len() < 2 {
            return None;
        }
        if line.0.len() < self.config.min_smooth_len {
            return match self.config.short_lines {
                ShortLinePolicy::Keep => Some(line.clone()),
                ShortLinePolicy::Drop => None,
            };
        }

        let simplified = self.simplifier.simplify(line, self.config.merge_tolerance);
        Some(smoother.smooth(&simplified))
    }
}

/// Contour points at the given thresholds with the default configuration
pub fn build_contours(points: &[Point3D], thresholds: &[f64]) -> Result<FeatureCollection> {
    ContourPipeline::default().build_contours(points, thresholds)
}
