use std::sync::Arc;
use std::time::Instant;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Configuration;
use crate::error::{AppError, RasterError};
use crate::pipeline::services::image::analysis::{
    Classification, ClassificationRule, HeuristicRegionClassifier, RegionClassifier,
};
use crate::pipeline::services::image::{extract_region_stats, Composite, Compositor, RegionStats};
use crate::pipeline::services::style::{StyleCatalog, StyleResolver};
use crate::pipeline::types::{Mask, Resolution};
use crate::segmentation::Segmenter;

/// Everything decided for one mask
#[derive(Debug, Clone, Serialize)]
pub struct RegionDesign {
    pub index: usize,
    pub rule: ClassificationRule,
    pub stats: Option<RegionStats>,
    pub resolution: Resolution,
}

/// Result of styling one image
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub run_id: Uuid,
    pub style: String,
    pub regions: Vec<RegionDesign>,
    pub composite: Composite,
}

/// Classify -> resolve -> composite for every mask of an image.
///
/// Measuring and classifying masks is independent per mask and may run in
/// parallel. Resolution and painting run in mask order.
pub struct DesignPipeline<R: Rng = StdRng> {
    classifier: Box<dyn RegionClassifier>,
    resolver: StyleResolver<R>,
    compositor: Compositor,
    parallel_classification: bool,
}

impl<R: Rng> DesignPipeline<R> {
    pub fn new(
        classifier: Box<dyn RegionClassifier>,
        resolver: StyleResolver<R>,
        compositor: Compositor,
    ) -> Self {
        Self {
            classifier,
            resolver,
            compositor,
            parallel_classification: true,
        }
    }

    pub fn with_parallel_classification(mut self, enabled: bool) -> Self {
        self.parallel_classification = enabled;
        self
    }

    pub fn catalog(&self) -> &StyleCatalog {
        self.resolver.catalog()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Segments `image` and styles the resulting masks.
    pub fn process(
        &mut self,
        segmenter: &dyn Segmenter,
        image: &RgbImage,
        style: &str,
    ) -> Result<DesignOutcome, AppError> {
        let start = Instant::now();
        let masks = segmenter.segment(image)?;
        debug!(
            "{} produced {} masks in {}us",
            segmenter.name(),
            masks.len(),
            start.elapsed().as_micros()
        );
        self.run(image, &masks, style)
    }

    pub fn run(
        &mut self,
        image: &RgbImage,
        masks: &[Mask],
        style: &str,
    ) -> Result<DesignOutcome, AppError> {
        let run_id = Uuid::new_v4();
        let start = Instant::now();
        info!(%run_id, "Applying '{}' style to {} regions", style, masks.len());

        let classified = self.classify_all(image, masks)?;
        let classify_time = start.elapsed().as_micros();

        let mut regions = Vec::with_capacity(classified.len());
        for (index, (stats, classification)) in classified.into_iter().enumerate() {
            let resolution = self.resolver.resolve(classification.label, style)?;
            let option = &resolution.option;
            info!(
                "[Region {}] {} | Color: {} | Texture: {} | Material: {} | Finish: {} | Rating: {} | Keywords: {:?}",
                index,
                resolution.label.as_str().to_uppercase(),
                option.color,
                option.texture,
                option.material,
                option.finish,
                option.rating,
                option.keywords
            );
            regions.push(RegionDesign {
                index,
                rule: classification.rule,
                stats,
                resolution,
            });
        }

        let composite = self.compositor.compose(
            image,
            masks.iter().zip(regions.iter().map(|r| &r.resolution)),
        )?;

        info!(
            %run_id,
            "Design completed in {}us (classification {}us)",
            start.elapsed().as_micros(),
            classify_time
        );

        Ok(DesignOutcome {
            run_id,
            style: style.to_string(),
            regions,
            composite,
        })
    }

    fn classify_all(
        &self,
        image: &RgbImage,
        masks: &[Mask],
    ) -> Result<Vec<(Option<RegionStats>, Classification)>, RasterError> {
        let classifier = self.classifier.as_ref();
        let classify = |mask: &Mask| -> Result<(Option<RegionStats>, Classification), RasterError> {
            let stats = extract_region_stats(mask, image)?;
            let classification = classifier.classify(stats.as_ref());
            Ok((stats, classification))
        };

        if self.parallel_classification {
            masks.par_iter().map(classify).collect()
        } else {
            masks.iter().map(classify).collect()
        }
    }
}

pub struct DesignPipelineBuilder {
    configuration: Configuration,
    catalog: Option<Arc<StyleCatalog>>,
    classifier: Option<Box<dyn RegionClassifier>>,
}

impl DesignPipelineBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            catalog: None,
            classifier: None,
        }
    }

    pub fn catalog(mut self, catalog: Arc<StyleCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    // Replaces the heuristic classifier built from the configured thresholds.
    pub fn classifier(mut self, classifier: Box<dyn RegionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    // Overrides the configured blend factor.
    pub fn blend_alpha(mut self, blend_alpha: f32) -> Self {
        self.configuration.blend_alpha = blend_alpha;
        self
    }

    // Overrides the configured seed.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.configuration.seed = seed;
        self
    }

    pub fn build(self) -> Result<DesignPipeline<StdRng>, AppError> {
        let catalog = self
            .catalog
            .ok_or(AppError::Pipeline("Style catalog not set".to_string()))?;

        let classifier: Box<dyn RegionClassifier> = match self.classifier {
            Some(classifier) => classifier,
            None => {
                let thresholds = self.configuration.classifier.clone();
                thresholds
                    .validate()
                    .map_err(|e| AppError::Pipeline(format!("Invalid classifier config: {}", e)))?;
                Box::new(HeuristicRegionClassifier::with_thresholds(thresholds))
            }
        };

        let compositor = Compositor::new(self.configuration.blend_alpha)?;
        let resolver = StyleResolver::from_seed(catalog, self.configuration.seed);

        Ok(DesignPipeline::new(classifier, resolver, compositor)
            .with_parallel_classification(self.configuration.parallel_classification))
    }
}
