//! The editor session - the owner of all live editing state.
//!
//! One `EditorSession` owns the live mods (offset, size, crop region,
//! rotation, filters, strokes), one snapshot history, and one object
//! registry, and is passed by reference to the pointer handlers. Every
//! state setter mirrors the live value into the active object's mods, and
//! every history push/undo/redo re-persists the resulting present, so an
//! object's mods always reflect its latest applied snapshot.
//!
//! ## Modules
//!
//! - `objects` - Object registry and per-object mods

pub mod objects;

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::animation::ResizeAnimation;
use crate::constants::{
    DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE, DEFAULT_ERASER_SIZE, DEFAULT_IMAGE_ERASER_SIZE,
    DEFAULT_VIEW_SIZE, RESIZE_ANIMATION_MS,
};
use crate::error::{EditorError, EditorResult};
use crate::filters::FiltersState;
use crate::geometry::{Bounds, Point, Region, Size};
use crate::history::{FilterCommitDebouncer, Snapshot, SnapshotHistory};
use crate::input::{GestureState, PointerAccuracy};
use crate::raster::{CropRequest, DecodedBitmap, Rasterizer, SoftwareRasterizer};
use crate::strokes::{Stroke, StrokeTool, backfill_base_sizes};

use self::objects::{ObjectMods, ObjectRegistry};

/// The active editing tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    /// Move/resize/rotate the image via its selection overlay
    #[default]
    Pan,
    /// Define and adjust the crop rectangle
    Crop,
    Brush,
    Eraser,
    ImageEraser,
}

impl Tool {
    /// The stroke this tool records, if it is a drawing tool.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Tool::Brush => Some(StrokeTool::Brush),
            Tool::Eraser => Some(StrokeTool::Eraser),
            Tool::ImageEraser => Some(StrokeTool::ImageEraser),
            Tool::Pan | Tool::Crop => None,
        }
    }
}

/// The editing session: live state, history, objects, and the in-flight
/// interaction. See the module docs for the mirroring rules.
pub struct EditorSession {
    // Live editing state (mirrors of the present snapshot)
    pub(crate) view_size: Size,
    pub(crate) image_src: Option<String>,
    pub(crate) offset: Point,
    pub(crate) img_size: Option<Size>,
    pub(crate) region: Option<Region>,
    pub(crate) rotation: i32,
    pub(crate) filters: FiltersState,
    pub(crate) strokes: Vec<Stroke>,

    // Tool state
    pub(crate) tool: Tool,
    pub(crate) brush_color: String,
    pub(crate) brush_size: f32,
    pub(crate) eraser_size: f32,
    pub(crate) image_eraser_size: f32,
    pub(crate) pointer_accuracy: PointerAccuracy,

    // Interaction
    pub(crate) gesture: GestureState,
    pub(crate) show_region_ui: bool,

    // History and objects
    pub(crate) history: SnapshotHistory,
    pub(crate) objects: ObjectRegistry,

    // Clock-driven state machines
    pub(crate) filter_debounce: FilterCommitDebouncer,
    pub(crate) fit_animation: Option<ResizeAnimation>,

    // Crop bookkeeping
    pub(crate) region_on_crop_entry: Option<Region>,
    pub(crate) pending_placement: Option<Region>,
    pub(crate) last_sized_src: Option<String>,
    pub(crate) last_pushed_src: Option<String>,

    rasterizer: Box<dyn Rasterizer>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_rasterizer(Box::new(SoftwareRasterizer))
    }

    pub fn with_rasterizer(rasterizer: Box<dyn Rasterizer>) -> Self {
        let (w, h) = DEFAULT_VIEW_SIZE;
        Self {
            view_size: Size::new(w, h),
            image_src: None,
            offset: Point::default(),
            img_size: None,
            region: None,
            rotation: 0,
            filters: FiltersState::default(),
            strokes: Vec::new(),
            tool: Tool::default(),
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
            image_eraser_size: DEFAULT_IMAGE_ERASER_SIZE,
            pointer_accuracy: PointerAccuracy::default(),
            gesture: GestureState::default(),
            show_region_ui: true,
            history: SnapshotHistory::default(),
            objects: ObjectRegistry::default(),
            filter_debounce: FilterCommitDebouncer::default(),
            fit_animation: None,
            region_on_crop_entry: None,
            pending_placement: None,
            last_sized_src: None,
            last_pushed_src: None,
            rasterizer,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn img_size(&self) -> Option<Size> {
        self.img_size
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn filters(&self) -> &FiltersState {
        &self.filters
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn show_region_ui(&self) -> bool {
        self.show_region_ui
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn brush_color(&self) -> &str {
        &self.brush_color
    }

    pub fn is_animating(&self) -> bool {
        self.fit_animation.is_some()
    }

    /// The rotation the stage presents. Crop and image-eraser modes show
    /// the image un-rotated so their axis-aligned math holds.
    pub fn display_rotation(&self) -> i32 {
        match self.tool {
            Tool::Crop | Tool::ImageEraser => 0,
            _ => self.rotation,
        }
    }

    /// The image's un-rotated bounding box in stage space.
    pub fn image_bounds(&self) -> Option<Bounds> {
        self.img_size
            .map(|size| Bounds::from_placement(self.offset, size))
    }

    /// Center of the image's un-rotated box; the pivot for all rotation.
    pub fn image_center(&self) -> Point {
        let size = self.img_size.unwrap_or(Size::new(0.0, 0.0));
        Point::new(self.offset.x + size.w / 2.0, self.offset.y + size.h / 2.0)
    }

    // ------------------------------------------------------------------
    // Live-state setters (each mirrors into the active object's mods)
    // ------------------------------------------------------------------

    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    pub fn set_pointer_accuracy(&mut self, accuracy: PointerAccuracy) {
        self.pointer_accuracy = accuracy;
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
        self.persist_mods();
    }

    pub fn set_img_size(&mut self, size: Option<Size>) {
        self.img_size = size;
        if let Some(size) = size {
            backfill_base_sizes(&mut self.strokes, size);
        }
        self.persist_mods();
    }

    pub fn set_region(&mut self, region: Option<Region>) {
        self.region = region;
        self.persist_mods();
    }

    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = rotation;
        self.persist_mods();
    }

    /// Replace the filter configuration and schedule a debounced history
    /// commit. Continuous slider edits within the window coalesce into a
    /// single entry; the commit fires from [`EditorSession::tick`].
    pub fn set_filters(&mut self, filters: FiltersState, now: Instant) {
        self.filters = filters;
        self.persist_mods();
        if self.image_src.is_some() {
            self.filter_debounce.arm(now);
        }
    }

    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.persist_mods();
    }

    pub fn set_brush_color(&mut self, color: impl Into<String>) {
        self.brush_color = color.into();
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size;
    }

    pub fn set_eraser_size(&mut self, size: f32) {
        self.eraser_size = size;
    }

    pub fn set_image_eraser_size(&mut self, size: f32) {
        self.image_eraser_size = size;
    }

    fn set_image_src(&mut self, src: Option<String>) {
        self.image_src = src.clone();
        self.objects.set_current_src(src);
    }

    pub(crate) fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.persist_mods();
    }

    pub(crate) fn extend_last_stroke(&mut self, point: Point) {
        if let Some(last) = self.strokes.last_mut() {
            last.points.push(point);
            self.persist_mods();
        }
    }

    // ------------------------------------------------------------------
    // Tool switching
    // ------------------------------------------------------------------

    /// Switch tools. Leaving crop mode commits the crop if the region
    /// changed since entry; entering crop mode selects the full image;
    /// the image eraser refuses to activate without an image.
    pub fn set_tool(&mut self, next: Tool) {
        if next == self.tool {
            return;
        }
        if next == Tool::ImageEraser && self.img_size.is_none() {
            return;
        }
        if self.tool == Tool::Crop {
            let changed = match (self.region, self.region_on_crop_entry) {
                (Some(current), Some(entry)) => current != entry,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if changed {
                self.apply_crop();
            }
        }
        self.tool = next;
        match next {
            Tool::Crop => {
                if let Some(size) = self.img_size {
                    let full = Region {
                        x: self.offset.x,
                        y: self.offset.y,
                        w: size.w,
                        h: size.h,
                    };
                    self.set_region(Some(full));
                    self.show_region_ui = true;
                    self.region_on_crop_entry = Some(full);
                }
            }
            Tool::Pan => {
                self.region_on_crop_entry = None;
                self.show_region_ui = self.region.is_some();
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Crop commit
    // ------------------------------------------------------------------

    /// Materialize the current region as a new bitmap via the rasterizer,
    /// replacing the tracked source. The rounded placement is remembered so
    /// the new bitmap keeps the region's exact on-stage position and size
    /// once it reports its natural dimensions (no re-fit to the viewport).
    /// Aborts silently on rasterization failure, leaving state intact.
    pub fn apply_crop(&mut self) {
        if let Err(error) = self.try_apply_crop() {
            warn!(%error, "Crop rasterization failed; keeping previous state");
        }
    }

    /// Fallible form of [`EditorSession::apply_crop`] for hosts that want
    /// to surface the failure. Missing region/image/source is still a
    /// silent no-op, not an error.
    pub fn try_apply_crop(&mut self) -> EditorResult<()> {
        let (Some(region), Some(img_size), Some(src)) =
            (self.region, self.img_size, self.image_src.clone())
        else {
            return Ok(());
        };
        let rounded = region.rounded();
        let request = CropRequest {
            src,
            image_offset: self.offset,
            image_size: img_size,
            region: rounded,
        };
        let url = self
            .rasterizer
            .crop_to_data_url(&request)
            .map_err(EditorError::Rasterization)?;
        debug!(
            w = rounded.w,
            h = rounded.h,
            "Crop committed, awaiting new bitmap"
        );
        self.pending_placement = Some(rounded);
        self.set_image_src(Some(url));
        self.set_region(None);
        Ok(())
    }

    /// Reset the region to the full image placement and record it.
    pub fn reset_region_to_image(&mut self) {
        let next = self.img_size.map(|size| Region {
            x: self.offset.x,
            y: self.offset.y,
            w: size.w,
            h: size.h,
        });
        self.set_region(next);
        let snapshot = self.snapshot_live();
        self.push_snapshot(snapshot);
    }

    pub fn clear_region(&mut self) {
        self.set_region(None);
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    /// Create the object on first reference (capturing the current live
    /// mods as its baseline) or select an existing one, optionally updating
    /// its source. Mirrors the selected object's mods into the live state.
    /// Object switches are not undoable: past/future are left untouched;
    /// the image-load completion pushes the baseline snapshot for new
    /// sources.
    pub fn create_or_select_object(&mut self, id: &str, src: Option<String>) {
        let baseline = self.live_mods();
        let obj = self.objects.create_or_select(id, src, baseline);
        let mods = obj.mods.clone();
        self.image_src = obj.src.clone();
        self.offset = mods.offset;
        self.img_size = mods.img_size;
        self.region = mods.crop;
        self.rotation = mods.rotation;
        self.filters = mods.filters;
        self.strokes = mods.strokes;
    }

    /// Copy the live editing state into the active object's mods.
    pub fn save_current_mods(&mut self) {
        self.persist_mods();
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Called when the bitmap behind the current source reports its natural
    /// dimensions. Restores a pending crop placement exactly, or fits the
    /// image to the viewport (width-first, never upscaling) with an eased
    /// resize; pushes the baseline snapshot once per source.
    pub fn image_loaded(&mut self, bitmap: DecodedBitmap, now: Instant) {
        let Some(src) = self.image_src.clone() else {
            return;
        };

        if let Some(placement) = self.pending_placement.take() {
            self.set_offset(Point::new(placement.x, placement.y));
            self.set_img_size(Some(Size::new(placement.w, placement.h)));
            self.set_region(Some(placement));
            self.show_region_ui = true;
            self.last_sized_src = Some(src.clone());
            if self.last_pushed_src.as_deref() != Some(src.as_str()) {
                let snapshot = Snapshot {
                    src: Some(src.clone()),
                    offset: self.offset,
                    img_size: self.img_size,
                    crop: Some(placement),
                    rotation: self.rotation,
                    filters: self.filters.clone(),
                    strokes: self.strokes.clone(),
                };
                self.push_snapshot(snapshot);
                self.last_pushed_src = Some(src);
            }
            return;
        }

        let nw = bitmap.width as f32;
        let nh = bitmap.height as f32;
        if nw < 1.0 || nh < 1.0 {
            return;
        }

        let mut snapshot_size = self.img_size;
        if self.last_sized_src.as_deref() != Some(src.as_str()) {
            let avail = self.view_size;
            // Fit to width first; fall back to the full fit when the
            // width-fit height overflows. Never upscale.
            let scale_w = (avail.w / nw).min(1.0);
            let w_fit = (nw * scale_w).round();
            let mut final_w = avail.w.min(w_fit);
            let mut final_h = (nh * (final_w / nw)).round();
            if final_h > avail.h {
                let scale = (avail.w / nw).min(avail.h / nh).min(1.0);
                final_w = (nw * scale).round();
                final_h = (nh * scale).round();
            }
            let fitted = Size::new(final_w, final_h);

            self.set_offset(Point::default());
            self.show_region_ui = true;
            self.fit_animation = Some(ResizeAnimation::new(
                self.view_size,
                fitted,
                now,
                Duration::from_millis(RESIZE_ANIMATION_MS),
            ));
            self.last_sized_src = Some(src.clone());
            snapshot_size = Some(fitted);
        }

        if self.last_pushed_src.as_deref() != Some(src.as_str()) {
            let size = snapshot_size.unwrap_or(Size::new(nw.round(), nh.round()));
            let snapshot = Snapshot {
                src: Some(src.clone()),
                offset: Point::default(),
                img_size: Some(size),
                crop: Some(Region { x: 0.0, y: 0.0, w: size.w, h: size.h }),
                rotation: self.rotation,
                filters: self.filters.clone(),
                strokes: self.strokes.clone(),
            };
            self.push_snapshot(snapshot);
            self.last_pushed_src = Some(src);
        }
    }

    /// Load failure means "no image": image-dependent state is cleared.
    pub fn image_failed(&mut self) {
        self.fit_animation = None;
        self.set_img_size(None);
        self.set_region(None);
        self.show_region_ui = false;
    }

    /// Drop the current source and all image-dependent state.
    pub fn clear_image(&mut self) {
        self.set_image_src(None);
        self.image_failed();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Build a snapshot of the current live state.
    pub fn snapshot_live(&self) -> Snapshot {
        Snapshot {
            src: self.image_src.clone(),
            offset: self.offset,
            img_size: self.img_size,
            crop: self.region,
            rotation: self.rotation,
            filters: self.filters.clone(),
            strokes: self.strokes.clone(),
        }
    }

    /// Push a snapshot, mirror it out as the live state, and persist it
    /// into the active object's mods.
    pub fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.image_src = snapshot.src.clone();
        self.offset = snapshot.offset;
        self.img_size = snapshot.img_size;
        self.region = snapshot.crop;
        self.rotation = snapshot.rotation;
        self.filters = snapshot.filters.clone();
        self.strokes = snapshot.strokes.clone();
        self.history.push(snapshot);
        self.persist_mods();
    }

    /// Step back one history entry. Safe to call with empty past.
    pub fn undo(&mut self) -> bool {
        self.filter_debounce.cancel();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward one history entry. Safe to call with empty future.
    pub fn redo(&mut self) -> bool {
        self.filter_debounce.cancel();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Mirror a restored snapshot out as the live state and re-persist it
    /// into the active object's mods, so switching objects and back lands
    /// on the exact edit point.
    fn restore(&mut self, snapshot: Snapshot) {
        self.image_src = snapshot.src.clone();
        self.offset = snapshot.offset;
        self.img_size = snapshot.img_size;
        self.region = snapshot.crop;
        self.rotation = snapshot.rotation;
        self.filters = snapshot.filters;
        self.strokes = snapshot.strokes;
        // A restored source was already sized and pushed; a host re-reporting
        // its bitmap must not re-fit or re-push over the restored state.
        self.last_sized_src = self.image_src.clone();
        self.last_pushed_src = self.image_src.clone();
        self.persist_mods();
    }

    // ------------------------------------------------------------------
    // Clock tick
    // ------------------------------------------------------------------

    /// Advance the clock-driven state machines: fire a due filter commit
    /// and sample the fit animation. Hosts call this from their frame/timer
    /// callback; the engine never spawns timers of its own.
    pub fn tick(&mut self, now: Instant) {
        if self.filter_debounce.fire(now) && self.image_src.is_some() {
            let snapshot = self.snapshot_live();
            self.push_snapshot(snapshot);
        }
        if let Some(animation) = self.fit_animation {
            let size = animation.sample(now);
            self.view_size = size;
            self.set_img_size(Some(size));
            self.set_region(Some(Region { x: 0.0, y: 0.0, w: size.w, h: size.h }));
            if animation.is_finished(now) {
                self.fit_animation = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Session reset
    // ------------------------------------------------------------------

    /// Return to the empty-session state, dropping history and objects.
    pub fn reset(&mut self) {
        let (w, h) = DEFAULT_VIEW_SIZE;
        self.view_size = Size::new(w, h);
        self.image_src = None;
        self.offset = Point::default();
        self.img_size = None;
        self.region = None;
        self.rotation = 0;
        self.filters = FiltersState::default();
        self.strokes = Vec::new();
        self.tool = Tool::Pan;
        self.gesture.reset();
        self.show_region_ui = true;
        self.history.reset(Snapshot::default());
        self.objects.clear();
        self.filter_debounce.cancel();
        self.fit_animation = None;
        self.region_on_crop_entry = None;
        self.pending_placement = None;
        self.last_sized_src = None;
        self.last_pushed_src = None;
    }

    fn persist_mods(&mut self) {
        let mods = self.live_mods();
        self.objects.save_mods(mods);
    }

    fn live_mods(&self) -> ObjectMods {
        ObjectMods {
            offset: self.offset,
            img_size: self.img_size,
            crop: self.region,
            rotation: self.rotation,
            filters: self.filters.clone(),
            strokes: self.strokes.clone(),
        }
    }
}
