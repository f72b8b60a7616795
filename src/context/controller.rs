use futures::stream::{FuturesUnordered, TryStreamExt};
use tracing::{debug, info, warn};

use crate::catalog::features::FeatureStore;
use crate::catalog::store::GenomeCatalog;
use crate::catalog::synteny::SyntenyTranslator;
use crate::context::config::{ContextConfig, StripOrder};
use crate::context::mode::NavigationMode;
use crate::context::notify::{ChangeReason, ContextChange, ContextListener};
use crate::context::serialize::{
    parse_regions, serialize_strips, strips_to_bed, ContextSnapshot, ExportKind,
};
use crate::core::error::ContextError;
use crate::core::feature::Feature;
use crate::core::landmark::LandmarkSpec;
use crate::core::region::{Region, RegionFactory, RegionSpec, Strip};
use crate::core::types::RegionId;
use crate::layout::border::BorderResizer;
use crate::layout::engine::LayoutEngine;
use crate::mapping::landmark::{compute_landmark_regions, landmark_spec_for_feature};
use crate::mapping::synteny::{map_region_to_genome, map_regions};
use crate::navigation::transform::{self, validate_factors};
use crate::utils::validation::{default_window, ClampToChromosome, CoordinateValidator};

/// Owns the displayed strips and applies every navigation command to them.
///
/// Commands take `&mut self`, so one command always completes (including its
/// awaited collaborator calls) before the next begins. Collaborator results are
/// gathered first and applied in one synchronous step.
pub struct StripController<F: FeatureStore, T: SyntenyTranslator> {
    catalog: GenomeCatalog,
    features: F,
    translator: T,
    validator: Box<dyn CoordinateValidator>,
    config: ContextConfig,
    layout: LayoutEngine,
    resizer: BorderResizer,
    factory: RegionFactory,
    strips: Vec<Strip>,
    mode: NavigationMode,
    selection: Option<Feature>,
    listeners: Vec<Box<dyn ContextListener>>,
}

impl<F: FeatureStore, T: SyntenyTranslator> StripController<F, T> {
    pub fn new(catalog: GenomeCatalog, features: F, translator: T, config: ContextConfig) -> Self {
        Self {
            catalog,
            features,
            translator,
            validator: Box::new(ClampToChromosome),
            layout: LayoutEngine::new(config.layout.clone()),
            resizer: BorderResizer::new(config.min_border_width),
            config,
            factory: RegionFactory::new(),
            strips: Vec::new(),
            mode: NavigationMode::Free,
            selection: None,
            listeners: Vec::new(),
        }
    }

    /// Replace the validator applied to caller-supplied regions
    #[must_use]
    pub fn with_validator(mut self, validator: Box<dyn CoordinateValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn ContextListener>) {
        self.listeners.push(listener);
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn mode(&self) -> &NavigationMode {
        &self.mode
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn catalog(&self) -> &GenomeCatalog {
        &self.catalog
    }

    pub fn features(&self) -> &F {
        &self.features
    }

    /// Feature most recently aligned on
    pub fn selection(&self) -> Option<&Feature> {
        self.selection.as_ref()
    }

    /// Displayed genomes, in strip order
    pub fn genome_names(&self) -> Vec<String> {
        self.strips.iter().map(|s| s.genome.clone()).collect()
    }

    pub fn reference_region(&self) -> Option<&Region> {
        self.mode.reference().and_then(|id| self.region(id))
    }

    fn notify(&self, reason: ChangeReason) {
        let change = ContextChange::new(reason);
        for listener in &self.listeners {
            listener.context_changed(&change);
        }
    }

    /// The only place the navigation mode changes
    fn set_mode(&mut self, mode: NavigationMode) {
        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "navigation mode changed");
            self.mode = mode;
        }
    }

    // ---- Region model ----

    /// Create a region with a fresh id; location fields are taken unchanged
    pub fn make_region(&mut self, spec: RegionSpec) -> Region {
        self.factory.make_region(spec)
    }

    /// Index of the strip showing `genome`
    pub fn find_strip(&self, genome: &str) -> Option<usize> {
        self.strips.iter().position(|s| s.genome == genome)
    }

    /// `(strip index, region index)` of the region with handle `id`
    pub fn find_region(&self, id: RegionId) -> Option<(usize, usize)> {
        self.strips
            .iter()
            .enumerate()
            .find_map(|(si, s)| s.position_of(id).map(|ri| (si, ri)))
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        let (si, ri) = self.find_region(id)?;
        Some(&self.strips[si].regions[ri])
    }

    fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        let (si, ri) = self.find_region(id)?;
        Some(&mut self.strips[si].regions[ri])
    }

    /// Every region of `genome`, optionally restricted to one chromosome
    pub fn get_regions(&self, genome: &str, chr: Option<&str>) -> Vec<&Region> {
        self.strips
            .iter()
            .filter(|s| s.genome == genome)
            .flat_map(|s| s.regions.iter())
            .filter(|r| chr.map_or(true, |c| r.chr == c))
            .collect()
    }

    // ---- Layout ----

    /// Lay out the strips at `which`, or every strip
    pub fn layout(&mut self, which: Option<&[usize]>) {
        self.layout.layout(&mut self.strips, which);
    }

    /// Change the pixel width of every strip and lay out again
    pub fn set_strip_width(&mut self, width: f64) -> Result<(), ContextError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ContextError::InvalidParameter(format!(
                "strip width must be > 0 (got {width})"
            )));
        }
        self.layout.set_strip_width(width);
        self.config.layout.strip_width = width;
        self.layout(None);
        self.notify(ChangeReason::Regions);
        Ok(())
    }

    fn relayout_strip(&mut self, index: usize) {
        self.layout.layout(&mut self.strips, Some(&[index]));
    }

    // ---- Strip set ----

    /// Region specs for a newly displayed genome.
    ///
    /// Tried in order until one yields regions: landmark windows, synteny
    /// mapping of `reference`, the explicit region, a default window.
    async fn initial_regions(
        &self,
        genome: &str,
        reference: Option<&RegionSpec>,
        explicit: Option<&RegionSpec>,
    ) -> Result<Vec<RegionSpec>, ContextError> {
        if let Some(spec) = self.mode.landmark() {
            let found =
                compute_landmark_regions(&self.features, spec, &[genome.to_string()]).await?;
            if let Some((_, specs)) = found.into_iter().next().filter(|(_, s)| !s.is_empty()) {
                return Ok(specs);
            }
            debug!(genome, "no landmark window, falling through");
        }

        if let Some(reference) = reference {
            let specs = map_region_to_genome(&self.translator, reference, genome).await?;
            if !specs.is_empty() {
                return Ok(specs);
            }
            debug!(genome, "reference region does not map, falling through");
        }

        let Some(target) = self.catalog.get(genome) else {
            return Err(ContextError::UnknownGenome(genome.to_string()));
        };

        if let Some(spec) = explicit {
            match self
                .validator
                .validate(target, &spec.chr, spec.start, spec.end)
            {
                Some(coords) => {
                    let mut accepted = RegionSpec::new(genome, coords.chr, coords.start, coords.end);
                    accepted.width = spec.width;
                    accepted.reversed = spec.reversed;
                    return Ok(vec![accepted]);
                }
                None => debug!(genome, "rejected explicit region {}:{}..{}", spec.chr, spec.start, spec.end),
            }
        }

        Ok(default_window(target, self.config.default_window)
            .map(|c| RegionSpec::new(genome, c.chr, c.start, c.end))
            .into_iter()
            .collect())
    }

    fn build_strip(&mut self, genome: String, specs: Vec<RegionSpec>) -> Strip {
        let regions = specs
            .into_iter()
            .map(|spec| {
                let reversed = spec.reversed.unwrap_or(false);
                let mut region = self.factory.make_region(spec);
                region.reversed = reversed;
                region
            })
            .collect();
        Strip::new(genome, regions, self.strips.len())
    }

    fn renumber(&mut self) {
        for (order, strip) in self.strips.iter_mut().enumerate() {
            strip.order = order;
        }
    }

    /// Display exactly `genomes`: strips not requested are removed, missing
    /// ones are computed concurrently and appended once all are ready.
    ///
    /// Nothing changes until every new strip has been computed.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnknownGenome` if a requested genome is not in
    /// the catalog, or the first collaborator error. The strips are then
    /// unchanged.
    pub async fn set_strips(&mut self, genomes: &[String]) -> Result<(), ContextError> {
        if let Some(unknown) = genomes.iter().find(|g| self.catalog.get(g).is_none()) {
            return Err(ContextError::UnknownGenome(unknown.clone()));
        }

        let to_remove: Vec<String> = self
            .genome_names()
            .into_iter()
            .filter(|g| !genomes.contains(g))
            .collect();

        let mut to_add: Vec<String> = Vec::new();
        for genome in genomes {
            if self.find_strip(genome).is_none() && !to_add.contains(genome) {
                to_add.push(genome.clone());
            }
        }

        // A reference whose strip is about to go no longer drives new strips
        let reference = self
            .reference_region()
            .filter(|r| !to_remove.contains(&r.genome))
            .map(Region::to_spec);

        let this = &*self;
        let reference = reference.as_ref();
        let pending: FuturesUnordered<_> = to_add
            .into_iter()
            .enumerate()
            .map(|(rank, genome)| async move {
                let specs = this.initial_regions(&genome, reference, None).await?;
                Ok::<_, ContextError>((rank, genome, specs))
            })
            .collect();
        let mut computed: Vec<(usize, String, Vec<RegionSpec>)> = pending.try_collect().await?;
        if self.config.strip_order == StripOrder::Requested {
            computed.sort_by_key(|(rank, _, _)| *rank);
        }

        for genome in &to_remove {
            self.delete_strip(genome, true);
        }
        for (_, genome, specs) in computed {
            if specs.is_empty() {
                warn!(genome = %genome, "no region to display");
                continue;
            }
            let strip = self.build_strip(genome, specs);
            info!(genome = %strip.genome, regions = strip.regions.len(), "strip added");
            self.strips.push(strip);
        }

        self.layout(None);
        self.notify(ChangeReason::Strips);
        Ok(())
    }

    /// Add a strip for `genome`, optionally opening on `region`.
    ///
    /// Returns the strip's index; an already displayed genome is left as is.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnknownGenome` for a genome not in the catalog,
    /// or a collaborator error.
    pub async fn add_strip(
        &mut self,
        genome: &str,
        region: Option<RegionSpec>,
    ) -> Result<Option<usize>, ContextError> {
        if self.catalog.get(genome).is_none() {
            return Err(ContextError::UnknownGenome(genome.to_string()));
        }
        if let Some(index) = self.find_strip(genome) {
            debug!(genome, "strip already displayed");
            return Ok(Some(index));
        }

        let reference = self.reference_region().map(Region::to_spec);
        let specs = self
            .initial_regions(genome, reference.as_ref(), region.as_ref())
            .await?;
        if specs.is_empty() {
            warn!(genome, "no region to display");
            return Ok(None);
        }
        let strip = self.build_strip(genome.to_string(), specs);
        info!(genome, regions = strip.regions.len(), "strip added");
        self.strips.push(strip);

        let index = self.strips.len() - 1;
        self.relayout_strip(index);
        self.notify(ChangeReason::Strips);
        Ok(Some(index))
    }

    /// Show `spec` in its genome's strip, replacing the regions there, or open
    /// a strip on it if the genome is not displayed.
    ///
    /// The region goes through the validator in both cases.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnknownGenome` for a genome not in the catalog,
    /// `ContextError::InvalidParameter` if the validator rejects the region
    /// for a displayed genome, or a collaborator error.
    pub async fn goto(&mut self, spec: RegionSpec) -> Result<(), ContextError> {
        if self.find_strip(&spec.genome).is_none() {
            let genome = spec.genome.clone();
            self.add_strip(&genome, Some(spec)).await?;
            return Ok(());
        }

        let Some(target) = self.catalog.get(&spec.genome) else {
            return Err(ContextError::UnknownGenome(spec.genome));
        };
        let Some(coords) = self
            .validator
            .validate(target, &spec.chr, spec.start, spec.end)
        else {
            return Err(ContextError::InvalidParameter(format!(
                "{}:{}..{} is not a valid region of {}",
                spec.chr, spec.start, spec.end, spec.genome
            )));
        };
        let mut accepted = RegionSpec::new(&spec.genome, coords.chr, coords.start, coords.end);
        accepted.width = spec.width;
        accepted.reversed = spec.reversed;
        self.merge_update(vec![(spec.genome, vec![accepted])]);
        Ok(())
    }

    /// Remove the strip showing `genome` and release its feature data.
    ///
    /// Returns false if the genome is not displayed.
    pub fn delete_strip(&mut self, genome: &str, quiet: bool) -> bool {
        let Some(index) = self.find_strip(genome) else {
            debug!(genome, "delete of undisplayed genome ignored");
            return false;
        };

        if let Some(id) = self.mode.reference() {
            if self.strips[index].contains(id) {
                self.set_mode(NavigationMode::Free);
            }
        }
        self.strips.remove(index);
        self.renumber();
        self.features.flush_genome(genome);
        info!(genome, "strip deleted");

        if !quiet {
            self.notify(ChangeReason::Strips);
        }
        true
    }

    /// Move the strip showing `genome` to `position` (clamped to the end)
    pub fn move_strip(&mut self, genome: &str, position: usize) -> bool {
        let Some(index) = self.find_strip(genome) else {
            return false;
        };
        let strip = self.strips.remove(index);
        let position = position.min(self.strips.len());
        self.strips.insert(position, strip);
        self.renumber();
        self.notify(ChangeReason::Strips);
        true
    }

    /// Reconcile computed regions into the strips, returning touched strip indices.
    ///
    /// Regions are matched by position and updated in place, so their ids and
    /// orientation survive. Only the tail is added or removed.
    fn apply_updates(&mut self, updates: Vec<(String, Vec<RegionSpec>)>) -> Vec<usize> {
        let mut touched = Vec::new();
        for (genome, specs) in updates {
            if specs.is_empty() {
                debug!(genome = %genome, "empty update leaves strip untouched");
                continue;
            }
            match self.find_strip(&genome) {
                Some(index) => {
                    let existing = self.strips[index].regions.len();
                    self.strips[index].regions.truncate(specs.len());
                    for (i, spec) in specs.into_iter().enumerate() {
                        if i < existing {
                            self.strips[index].regions[i].merge_from(&spec);
                        } else {
                            let region = self.factory.make_region(spec);
                            self.strips[index].regions.push(region);
                        }
                    }
                    touched.push(index);
                }
                None => {
                    let strip = self.build_strip(genome, specs);
                    info!(genome = %strip.genome, "strip added by update");
                    self.strips.push(strip);
                    touched.push(self.strips.len() - 1);
                }
            }
        }
        touched
    }

    /// Apply per-genome region updates, lay out what changed and notify
    pub fn merge_update(&mut self, updates: Vec<(String, Vec<RegionSpec>)>) {
        let touched = self.apply_updates(updates);
        if touched.is_empty() {
            return;
        }
        self.layout(Some(&touched));
        self.notify(ChangeReason::Regions);
    }

    // ---- Borders ----

    /// Drag the right border of region `id` by `amount` pixels.
    ///
    /// Returns the distance actually moved.
    pub fn move_border(&mut self, id: RegionId, amount: f64) -> f64 {
        let Some((si, _)) = self.find_region(id) else {
            debug!(%id, "border move on stale region ignored");
            return 0.0;
        };
        let moved = self.resizer.move_border(&mut self.strips[si], id, amount);
        if moved != 0.0 {
            self.relayout_strip(si);
            self.notify(ChangeReason::Regions);
        }
        moved
    }

    /// Exchange region `id` with its right neighbour
    pub fn swap(&mut self, id: RegionId) -> bool {
        let Some((si, _)) = self.find_region(id) else {
            debug!(%id, "swap on stale region ignored");
            return false;
        };
        let swapped = self.resizer.swap(&mut self.strips[si], id);
        if swapped {
            self.relayout_strip(si);
            self.notify(ChangeReason::Regions);
        }
        swapped
    }

    // ---- Navigation ----

    /// Zoom and scroll region `id`, propagating as the navigation mode requires.
    ///
    /// | Mode                       | Effect                                  |
    /// |----------------------------|-----------------------------------------|
    /// | locked, landmark           | every region                            |
    /// | reference, on the reference| the reference, then the others remapped |
    /// | otherwise                  | region `id` only                        |
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidParameter` for bad factors before anything
    /// changes, or a collaborator error while remapping.
    pub async fn zoom_scroll(
        &mut self,
        id: RegionId,
        zoom: f64,
        scroll: f64,
    ) -> Result<(), ContextError> {
        validate_factors(zoom, scroll)?;

        if self.mode.zooms_all() {
            return self.zoom_scroll_all(zoom, scroll);
        }

        let Some((si, ri)) = self.find_region(id) else {
            debug!(%id, "zoom on stale region ignored");
            return Ok(());
        };
        let mut zoomed = self.strips[si].regions[ri].clone();
        transform::zoom_scroll_region(&mut zoomed, zoom, scroll)?;

        if self.mode.reference() == Some(id) {
            // Remap from the zoomed copy; the reference moves only if that succeeds
            let mapped = self.map_reference(&zoomed, None).await?;
            self.strips[si].regions[ri] = zoomed;
            self.apply_mapping(id, mapped, ChangeReason::Regions);
            return Ok(());
        }

        self.strips[si].regions[ri] = zoomed;
        self.relayout_strip(si);
        self.notify(ChangeReason::Regions);
        Ok(())
    }

    /// Zoom and scroll every region; an active landmark window follows along
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidParameter` for bad factors; nothing changes.
    pub fn zoom_scroll_all(&mut self, zoom: f64, scroll: f64) -> Result<(), ContextError> {
        transform::zoom_scroll_all(&mut self.strips, zoom, scroll)?;
        if let Some(spec) = self.mode.landmark_mut() {
            transform::rescale_landmark(spec, zoom, scroll);
        }
        self.layout(None);
        self.notify(ChangeReason::Regions);
        Ok(())
    }

    /// Split region `id` at `fraction`; returns the new sibling's id
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidParameter` if `fraction` is outside `0..=1`.
    pub fn split_region(
        &mut self,
        id: RegionId,
        fraction: f64,
    ) -> Result<Option<RegionId>, ContextError> {
        let Some((si, ri)) = self.find_region(id) else {
            debug!(%id, "split on stale region ignored");
            return Ok(None);
        };
        let sibling =
            transform::split_region(&mut self.strips[si], ri, fraction, &mut self.factory)?;
        if sibling.is_some() {
            self.relayout_strip(si);
            self.notify(ChangeReason::Regions);
        }
        Ok(sibling)
    }

    /// Flip the display orientation of region `id`
    pub fn reverse_region(&mut self, id: RegionId) -> bool {
        let Some(region) = self.region_mut(id) else {
            debug!(%id, "reverse on stale region ignored");
            return false;
        };
        transform::reverse_region(region);
        self.notify(ChangeReason::Regions);
        true
    }

    /// Remove region `id`; a strip left empty is deleted
    pub fn remove_region(&mut self, id: RegionId) -> bool {
        let Some((si, ri)) = self.find_region(id) else {
            debug!(%id, "remove of stale region ignored");
            return false;
        };
        if self.mode.reference() == Some(id) {
            self.set_mode(NavigationMode::Free);
        }

        if self.strips[si].regions.len() == 1 {
            let genome = self.strips[si].genome.clone();
            return self.delete_strip(&genome, false);
        }
        self.strips[si].regions.remove(ri);
        self.relayout_strip(si);
        self.notify(ChangeReason::Regions);
        true
    }

    /// Turn locked scrolling on or off.
    ///
    /// Turning it on leaves reference or landmark mode. Turning it off only
    /// has an effect while locked.
    pub fn set_scroll_lock(&mut self, on: bool) {
        if on {
            self.set_mode(NavigationMode::Locked);
        } else if self.mode.is_locked() {
            self.set_mode(NavigationMode::Free);
        } else {
            return;
        }
        self.notify(ChangeReason::Mode);
    }

    // ---- Reference mode ----

    /// Make region `id` the reference and map it into `genomes` (default:
    /// every displayed genome).
    ///
    /// All genomes are mapped before anything changes. The reference's own
    /// strip is narrowed to the reference region.
    ///
    /// # Errors
    ///
    /// Returns the first collaborator error; the strips are then unchanged.
    pub async fn compute_mapped_regions(
        &mut self,
        id: RegionId,
        genomes: Option<&[String]>,
    ) -> Result<(), ContextError> {
        let Some(reference) = self.region(id).cloned() else {
            debug!(%id, "mapping from stale region ignored");
            return Ok(());
        };
        let mapped = self.map_reference(&reference, genomes).await?;
        self.apply_mapping(id, mapped, ChangeReason::Mode);
        Ok(())
    }

    /// Map `reference` into `genomes` (default: every displayed genome but its own)
    async fn map_reference(
        &self,
        reference: &Region,
        genomes: Option<&[String]>,
    ) -> Result<Vec<(String, Vec<RegionSpec>)>, ContextError> {
        let targets: Vec<String> = genomes
            .map_or_else(|| self.genome_names(), <[String]>::to_vec)
            .into_iter()
            .filter(|g| *g != reference.genome)
            .collect();
        Ok(map_regions(&self.translator, &reference.to_spec(), &targets).await?)
    }

    /// Enter reference mode on `id` and apply regions mapped from it
    fn apply_mapping(
        &mut self,
        id: RegionId,
        mapped: Vec<(String, Vec<RegionSpec>)>,
        reason: ChangeReason,
    ) {
        self.set_mode(NavigationMode::Reference(id));
        if let Some((si, _)) = self.find_region(id) {
            self.strips[si].regions.retain(|r| r.id == id);
        }
        self.apply_updates(mapped);
        self.layout(None);
        self.notify(reason);
    }

    // ---- Landmark mode ----

    /// Align every genome in `genomes` (default: every displayed genome) on
    /// the landmark described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns the first collaborator error; the strips are then unchanged.
    pub async fn align_on_landmark(
        &mut self,
        spec: LandmarkSpec,
        genomes: Option<&[String]>,
        quiet: bool,
    ) -> Result<(), ContextError> {
        let targets = genomes.map_or_else(|| self.genome_names(), <[String]>::to_vec);
        let windows = compute_landmark_regions(&self.features, &spec, &targets).await?;

        let missing = windows.iter().filter(|(_, specs)| specs.is_empty()).count();
        if missing > 0 {
            debug!(landmark = %spec.landmark.label(), missing, "genomes without a landmark window");
        }

        self.apply_updates(windows);
        self.layout(None);
        self.selection = Some(spec.landmark.clone());
        self.set_mode(NavigationMode::Landmark(spec));
        if !quiet {
            self.notify(ChangeReason::Mode);
        }
        Ok(())
    }

    /// Align on `feature`, anchored at `clicked_base` if given, keeping the
    /// length of region `current` if given.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::InvalidParameter` if `clicked_base` lies outside
    /// the feature, or a collaborator error.
    pub async fn feature_align(
        &mut self,
        feature: &Feature,
        clicked_base: Option<i64>,
        current: Option<RegionId>,
    ) -> Result<(), ContextError> {
        if let Some(base) = clicked_base {
            if base < feature.start || base > feature.end {
                return Err(ContextError::InvalidParameter(format!(
                    "base {base} is outside {}",
                    feature.label()
                )));
            }
        }
        let current_length = current.and_then(|id| self.region(id)).map(Region::bp_length);
        let spec = landmark_spec_for_feature(feature, clicked_base, current_length);
        self.align_on_landmark(spec, None, false).await
    }

    // ---- Serialization ----

    /// Canonical regions string
    pub fn serialize(&self) -> String {
        serialize_strips(&self.strips)
    }

    /// Replace every strip with those described by a canonical regions string.
    ///
    /// Regions the validator rejects are dropped; genomes left without regions
    /// are not displayed. Navigation returns to free mode.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Parse` for a malformed string or
    /// `ContextError::UnknownGenome`; the strips are then unchanged.
    pub fn restore_regions(&mut self, text: &str) -> Result<(), ContextError> {
        let parsed = parse_regions(text)?;

        let mut accepted: Vec<(String, Vec<RegionSpec>)> = Vec::with_capacity(parsed.len());
        for (genome, specs) in parsed {
            let Some(target) = self.catalog.get(&genome) else {
                return Err(ContextError::UnknownGenome(genome));
            };
            let valid: Vec<RegionSpec> = specs
                .into_iter()
                .filter_map(|spec| {
                    let coords = self
                        .validator
                        .validate(target, &spec.chr, spec.start, spec.end)?;
                    let mut region = RegionSpec::new(&genome, coords.chr, coords.start, coords.end);
                    region.width = spec.width;
                    Some(region)
                })
                .collect();
            accepted.push((genome, valid));
        }

        for genome in self.genome_names() {
            if !accepted.iter().any(|(g, _)| *g == genome) {
                self.features.flush_genome(&genome);
            }
        }
        self.strips.clear();
        self.set_mode(NavigationMode::Free);
        for (genome, specs) in accepted {
            if specs.is_empty() {
                warn!(genome = %genome, "no valid region to restore");
                continue;
            }
            let strip = self.build_strip(genome, specs);
            self.strips.push(strip);
        }

        self.layout(None);
        self.notify(ChangeReason::Restore);
        Ok(())
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot::new(self.mode.clone(), self.selection.clone(), self.strips.clone())
    }

    /// Render the current state as `regions`, `json` or `bed`
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnsupportedType` for any other kind.
    pub fn export(&self, kind: &str) -> Result<String, ContextError> {
        match kind.parse::<ExportKind>()? {
            ExportKind::Regions => Ok(self.serialize()),
            ExportKind::Json => Ok(serde_json::to_string_pretty(&self.snapshot())?),
            ExportKind::Bed => Ok(strips_to_bed(&self.strips)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::features::InMemoryFeatureStore;
    use crate::catalog::synteny::BlockTableTranslator;
    use crate::core::genome::{Chromosome, Genome};

    fn controller() -> StripController<InMemoryFeatureStore, BlockTableTranslator> {
        let catalog: GenomeCatalog = ["A", "B", "C"]
            .into_iter()
            .map(|name| {
                Genome::new(name).with_chromosomes(vec![
                    Chromosome::new("1", 50_000_000),
                    Chromosome::new("2", 2_000_000),
                ])
            })
            .collect();
        StripController::new(
            catalog,
            InMemoryFeatureStore::default(),
            BlockTableTranslator::default(),
            ContextConfig::default(),
        )
    }

    fn names(genomes: &[&str]) -> Vec<String> {
        genomes.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_set_strips_adds_and_removes() {
        let mut c = controller();
        c.set_strips(&names(&["A", "B"])).await.unwrap();
        assert_eq!(c.genome_names(), vec!["A", "B"]);
        let a_region = c.strips()[0].regions[0].id;
        assert_eq!(c.strips()[0].regions[0].start, 1);
        assert_eq!(c.strips()[0].regions[0].end, 10_000_000);

        c.set_strips(&names(&["C", "A"])).await.unwrap();
        assert_eq!(c.genome_names(), vec!["A", "C"]);
        // A was kept, not recreated
        assert_eq!(c.strips()[0].regions[0].id, a_region);
        assert_eq!(c.strips()[1].order, 1);
    }

    #[tokio::test]
    async fn test_set_strips_unknown_genome_changes_nothing() {
        let mut c = controller();
        c.set_strips(&names(&["A"])).await.unwrap();
        let err = c.set_strips(&names(&["B", "Z"])).await.unwrap_err();
        assert!(matches!(err, ContextError::UnknownGenome(g) if g == "Z"));
        assert_eq!(c.genome_names(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_add_strip_explicit_region_is_validated() {
        let mut c = controller();
        c.add_strip("A", Some(RegionSpec::new("A", "2", 1_500_000, 3_000_000)))
            .await
            .unwrap();
        let r = &c.strips()[0].regions[0];
        assert_eq!((r.chr.as_str(), r.start, r.end), ("2", 1_500_000, 2_000_000));

        // Unknown chromosome falls through to the default window
        c.add_strip("B", Some(RegionSpec::new("B", "9", 1, 100)))
            .await
            .unwrap();
        let r = &c.strips()[1].regions[0];
        assert_eq!((r.chr.as_str(), r.start, r.end), ("1", 1, 10_000_000));
    }

    #[tokio::test]
    async fn test_merge_update_keeps_identity() {
        let mut c = controller();
        c.set_strips(&names(&["A"])).await.unwrap();
        let id = c.strips()[0].regions[0].id;
        c.reverse_region(id);

        c.merge_update(vec![(
            "A".to_string(),
            vec![RegionSpec::new("A", "2", 10, 20), RegionSpec::new("A", "2", 30, 40)],
        )]);
        let strip = &c.strips()[0];
        assert_eq!(strip.regions.len(), 2);
        assert_eq!(strip.regions[0].id, id);
        assert!(strip.regions[0].reversed);
        assert_eq!((strip.regions[0].start, strip.regions[0].end), (10, 20));

        c.merge_update(vec![("A".to_string(), Vec::new())]);
        assert_eq!(c.strips()[0].regions.len(), 2);

        c.merge_update(vec![("A".to_string(), vec![RegionSpec::new("A", "1", 5, 6)])]);
        assert_eq!(c.strips()[0].regions.len(), 1);
        assert_eq!(c.strips()[0].regions[0].id, id);
    }

    #[tokio::test]
    async fn test_goto_validates_region() {
        let mut c = controller();
        c.set_strips(&names(&["A"])).await.unwrap();
        let id = c.strips()[0].regions[0].id;

        c.goto(RegionSpec::new("A", "2", 1_900_000, 2_500_000))
            .await
            .unwrap();
        let r = &c.strips()[0].regions[0];
        assert_eq!(r.id, id);
        assert_eq!((r.chr.as_str(), r.start, r.end), ("2", 1_900_000, 2_000_000));

        let err = c.goto(RegionSpec::new("A", "9", 1, 100)).await.unwrap_err();
        assert!(matches!(err, ContextError::InvalidParameter(_)));
        assert_eq!(c.strips()[0].regions[0].chr, "2");

        // Undisplayed genome opens a strip on the clamped region
        c.goto(RegionSpec::new("B", "2", -50, 100)).await.unwrap();
        let r = &c.strips()[1].regions[0];
        assert_eq!((r.genome.as_str(), r.start, r.end), ("B", 1, 100));
    }

    #[tokio::test]
    async fn test_stale_handles_are_noops() {
        let mut c = controller();
        c.set_strips(&names(&["A"])).await.unwrap();
        let stale = RegionId(999);
        assert!(!c.reverse_region(stale));
        assert!(!c.remove_region(stale));
        assert!(!c.swap(stale));
        assert!(c.move_border(stale, 10.0).abs() < f64::EPSILON);
        assert_eq!(c.split_region(stale, 0.5).unwrap(), None);
        c.zoom_scroll(stale, 0.5, 0.0).await.unwrap();
        assert_eq!(c.strips()[0].regions[0].end, 10_000_000);
    }

    #[tokio::test]
    async fn test_move_strip() {
        let mut c = controller();
        c.set_strips(&names(&["A", "B", "C"])).await.unwrap();
        assert!(c.move_strip("C", 0));
        assert_eq!(c.genome_names(), vec!["C", "A", "B"]);
        assert!(c.serialize().starts_with("regions=C::"));
        assert!(c.move_strip("C", 99));
        assert_eq!(c.genome_names(), vec!["A", "B", "C"]);
        assert!(!c.move_strip("Z", 0));
    }

    #[tokio::test]
    async fn test_scroll_lock_transitions() {
        let mut c = controller();
        c.set_strips(&names(&["A", "B"])).await.unwrap();
        let id = c.strips()[0].regions[0].id;

        c.set_scroll_lock(true);
        assert_eq!(c.mode(), &NavigationMode::Locked);
        c.zoom_scroll(id, 0.5, 0.0).await.unwrap();
        assert_eq!(c.strips()[1].regions[0].bp_length(), 5_000_000);

        c.compute_mapped_regions(id, None).await.unwrap();
        assert_eq!(c.mode(), &NavigationMode::Reference(id));
        c.set_scroll_lock(false);
        assert_eq!(c.mode(), &NavigationMode::Reference(id));
        c.set_scroll_lock(true);
        c.set_scroll_lock(false);
        assert_eq!(c.mode(), &NavigationMode::Free);
    }
}
