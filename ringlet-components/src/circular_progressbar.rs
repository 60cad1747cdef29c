//! Circular progress ring.
//!
//! ## Usage
//!
//! Show how far a task has progressed as a ring that fills clockwise from 12
//! o'clock, with a text label in the middle.
//!
//! The rendered tree is an SVG document in a fixed `0 0 100 100` view box
//! holding four shapes, each tagged with a stable class for styling hooks:
//!
//! | Shape | Class |
//! |---|---|
//! | root `<svg>` | `CircularProgressbar` plus caller classes |
//! | background disc | `CircularProgressbar-background` |
//! | trail ring | `CircularProgressbar-trail` |
//! | progress arc | `CircularProgressbar-path` |
//! | label | `CircularProgressbar-text` |
//!
//! Transitions of the progress arc are left to the styling layer. With
//! [`CircularProgressbarArgs::initial_animation`] set, the ring first renders
//! empty and switches to the real percentage one frame after mount, giving the
//! styling layer a starting frame to animate from.
use std::{
    fmt,
    sync::{Arc, Weak},
    time::Duration,
};

use derive_setters::Setters;
use parking_lot::Mutex;
use ringlet_ui::{Component, Element, Scheduler, Tag, TaskHandle, format_number};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

mod geometry;
mod style;

pub use geometry::{CENTER, PathCommand, RingPath, VIEW_BOX_SIZE, path_radius};
pub use style::{MAX_PERCENTAGE, MIN_PERCENTAGE, ProgressStyle, progress_style};

/// Class on the root element.
pub const ROOT_CLASS: &str = "CircularProgressbar";
/// Class on the background disc.
pub const BACKGROUND_CLASS: &str = "CircularProgressbar-background";
/// Class on the trail ring.
pub const TRAIL_CLASS: &str = "CircularProgressbar-trail";
/// Class on the progress arc.
pub const PATH_CLASS: &str = "CircularProgressbar-path";
/// Class on the text label.
pub const TEXT_CLASS: &str = "CircularProgressbar-text";

/// Default values for [`CircularProgressbarArgs`].
pub struct CircularProgressbarDefaults;

impl CircularProgressbarDefaults {
    /// Default ring thickness, in view box units.
    pub const STROKE_WIDTH: f64 = 8.0;
    /// Default inset between the view box edge and the ring.
    pub const BACKGROUND_GUTTER: f64 = 0.0;
}

/// A function of the configured percentage, such as a label formatter.
#[derive(Clone)]
pub struct PercentageCallback(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl PercentageCallback {
    pub fn new(callback: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self, percentage: f64) -> String {
        (self.0)(percentage)
    }
}

impl fmt::Debug for PercentageCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PercentageCallback(..)")
    }
}

/// Default label: the percentage followed by `%`, e.g. `75%`.
pub fn default_text_for_percentage(percentage: f64) -> String {
    format!("{}%", format_number(percentage))
}

/// Arguments for configuring a [`CircularProgressbar`].
#[derive(Clone, Debug, Setters)]
pub struct CircularProgressbarArgs {
    /// Target fill, intended in `0..=100`.
    ///
    /// Values outside the range are clamped for the stroke but reach the label
    /// and class callbacks unchanged.
    pub percentage: f64,

    /// Ring thickness. Must stay below 100 for the ring to have a positive
    /// radius.
    pub stroke_width: f64,

    /// Extra inset subtracted from the ring radius.
    pub background_gutter: f64,

    /// Extra classes for the root element.
    #[setters(into)]
    pub class_name: String,

    /// Render an empty ring on mount and fill it one frame later.
    pub initial_animation: bool,

    /// Optional class derived from the configured percentage.
    #[setters(skip)]
    pub class_for_percentage: Option<PercentageCallback>,

    /// Label derived from the configured percentage.
    #[setters(skip)]
    pub text_for_percentage: PercentageCallback,
}

impl CircularProgressbarArgs {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            stroke_width: CircularProgressbarDefaults::STROKE_WIDTH,
            background_gutter: CircularProgressbarDefaults::BACKGROUND_GUTTER,
            class_name: String::new(),
            initial_animation: false,
            class_for_percentage: None,
            text_for_percentage: PercentageCallback::new(default_text_for_percentage),
        }
    }

    /// Derives an extra root class from the configured percentage.
    pub fn class_for_percentage(
        mut self,
        callback: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.class_for_percentage = Some(PercentageCallback::new(callback));
        self
    }

    /// Replaces the default `N%` label.
    pub fn text_for_percentage(
        mut self,
        callback: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.text_for_percentage = PercentageCallback::new(callback);
        self
    }

    /// Radius of the ring's center line for this configuration.
    pub fn radius(&self) -> f64 {
        path_radius(self.stroke_width, self.background_gutter)
    }

    /// Root class list: the fixed class, then the caller's classes, then the
    /// class derived from the configured percentage. Empty parts are skipped.
    pub fn root_class(&self) -> String {
        let dynamic_class = self
            .class_for_percentage
            .as_ref()
            .map(|callback| callback.call(self.percentage))
            .unwrap_or_default();

        let mut parts: SmallVec<[&str; 3]> = SmallVec::new();
        parts.push(ROOT_CLASS);
        for part in [self.class_name.trim(), dynamic_class.trim()] {
            if !part.is_empty() {
                parts.push(part);
            }
        }
        parts.join(" ")
    }
}

impl From<f64> for CircularProgressbarArgs {
    fn from(percentage: f64) -> Self {
        Self::new(percentage)
    }
}

/// Renders the ring for `args` with the arc filled to `displayed_percentage`.
///
/// Pure: the same inputs always produce the same tree. The class and label
/// callbacks receive the configured percentage from `args`, not the displayed
/// one.
pub fn render_ring(args: &CircularProgressbarArgs, displayed_percentage: f64) -> Element {
    let radius = args.radius();
    let path_description = RingPath::new(radius).to_string();
    let style = progress_style(displayed_percentage, radius);
    trace!(displayed_percentage, radius, "rendering progress ring");

    Element::new(Tag::Svg)
        .attr("class", args.root_class())
        .attr("viewBox", "0 0 100 100")
        .child(
            Element::new(Tag::Circle)
                .attr("class", BACKGROUND_CLASS)
                .attr("cx", CENTER)
                .attr("cy", CENTER)
                .attr("r", CENTER),
        )
        .child(
            Element::new(Tag::Path)
                .attr("class", TRAIL_CLASS)
                .attr("d", path_description.clone())
                .attr("stroke-width", args.stroke_width)
                .attr("fill-opacity", 0.0),
        )
        .child(
            Element::new(Tag::Path)
                .attr("class", PATH_CLASS)
                .attr("d", path_description)
                .attr("stroke-width", args.stroke_width)
                .attr("fill-opacity", 0.0)
                .attr("style", style.to_css()),
        )
        .child(
            Element::new(Tag::Text)
                .attr("class", TEXT_CLASS)
                .attr("x", CENTER)
                .attr("y", CENTER)
                .text(args.text_for_percentage.call(args.percentage)),
        )
}

/// Where a [`CircularProgressbar`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingPhase {
    /// Constructed, not yet mounted.
    Mounting,
    /// Mounted with the entry transition still pending.
    AnimatingIn,
    /// Mounted and showing the configured percentage.
    Steady,
    /// Torn down.
    Unmounted,
}

struct RingState {
    configured_percentage: f64,
    displayed_percentage: f64,
    phase: RingPhase,
    initial_timeout: Option<TaskHandle>,
    animation_frame: Option<TaskHandle>,
}

impl RingState {
    fn is_mounted(&self) -> bool {
        matches!(self.phase, RingPhase::AnimatingIn | RingPhase::Steady)
    }
}

/// A circular progress ring with an optional entry animation.
///
/// Drive it through [`ringlet_ui::ComponentHost`] or call the [`Component`]
/// hooks directly.
///
/// ```
/// use std::sync::Arc;
/// use ringlet_components::circular_progressbar::{
///     CircularProgressbar, CircularProgressbarArgs, RingPhase,
/// };
/// use ringlet_ui::{ComponentHost, ManualScheduler};
///
/// let scheduler = Arc::new(ManualScheduler::new());
/// let ring = CircularProgressbar::new(
///     CircularProgressbarArgs::new(40.0).initial_animation(true),
///     scheduler.clone(),
/// );
/// let mut host = ComponentHost::new(ring);
/// host.mount().unwrap();
/// assert_eq!(host.component().displayed_percentage(), 0.0);
///
/// scheduler.run_until_idle();
/// assert_eq!(host.component().displayed_percentage(), 40.0);
/// assert_eq!(host.component().phase(), RingPhase::Steady);
/// ```
pub struct CircularProgressbar {
    args: CircularProgressbarArgs,
    scheduler: Arc<dyn Scheduler>,
    state: Arc<Mutex<RingState>>,
}

impl CircularProgressbar {
    pub fn new(args: impl Into<CircularProgressbarArgs>, scheduler: Arc<dyn Scheduler>) -> Self {
        let args: CircularProgressbarArgs = args.into();
        warn_on_degenerate_geometry(&args);
        let displayed_percentage = if args.initial_animation {
            0.0
        } else {
            args.percentage
        };
        let state = RingState {
            configured_percentage: args.percentage,
            displayed_percentage,
            phase: RingPhase::Mounting,
            initial_timeout: None,
            animation_frame: None,
        };
        Self {
            args,
            scheduler,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn args(&self) -> &CircularProgressbarArgs {
        &self.args
    }

    /// The percentage currently driving the arc.
    pub fn displayed_percentage(&self) -> f64 {
        self.state.lock().displayed_percentage
    }

    pub fn phase(&self) -> RingPhase {
        self.state.lock().phase
    }

    fn schedule_initial_animation(&self) {
        let state = Arc::downgrade(&self.state);
        let scheduler = Arc::clone(&self.scheduler);
        let timeout = self.scheduler.set_timeout(
            Duration::ZERO,
            Box::new(move || request_initial_frame(state, scheduler)),
        );
        self.state.lock().initial_timeout = Some(timeout);
        debug!(task = timeout.id(), "initial animation scheduled");
    }
}

/// First step of the entry animation: runs after the empty ring had a chance
/// to be painted and asks for the frame that fills it.
fn request_initial_frame(state: Weak<Mutex<RingState>>, scheduler: Arc<dyn Scheduler>) {
    let Some(shared) = state.upgrade() else {
        return;
    };
    {
        let mut guard = shared.lock();
        guard.initial_timeout = None;
        if !guard.is_mounted() {
            return;
        }
    }

    let frame =
        scheduler.request_animation_frame(Box::new(move || finish_initial_animation(state)));

    let mut guard = shared.lock();
    if guard.is_mounted() {
        guard.animation_frame = Some(frame);
    } else {
        drop(guard);
        scheduler.cancel_animation_frame(frame);
    }
}

/// Second step of the entry animation: shows the configured percentage.
fn finish_initial_animation(state: Weak<Mutex<RingState>>) {
    let Some(shared) = state.upgrade() else {
        return;
    };
    let mut guard = shared.lock();
    guard.animation_frame = None;
    if !guard.is_mounted() {
        return;
    }
    guard.displayed_percentage = guard.configured_percentage;
    guard.phase = RingPhase::Steady;
    trace!(
        percentage = guard.displayed_percentage,
        "initial animation applied"
    );
}

fn warn_on_degenerate_geometry(args: &CircularProgressbarArgs) {
    let radius = args.radius();
    if !(radius.is_finite() && radius > 0.0) {
        warn!(
            radius,
            stroke_width = args.stroke_width,
            background_gutter = args.background_gutter,
            "progress ring radius is not positive; geometry will be degenerate"
        );
    }
}

impl Component for CircularProgressbar {
    type Args = CircularProgressbarArgs;

    fn on_mount(&mut self) {
        let animate = {
            let mut state = self.state.lock();
            if state.phase != RingPhase::Mounting {
                return;
            }
            state.phase = if self.args.initial_animation {
                RingPhase::AnimatingIn
            } else {
                RingPhase::Steady
            };
            self.args.initial_animation
        };
        debug!(animate, "progress ring mounted");
        if animate {
            self.schedule_initial_animation();
        }
    }

    fn on_update(&mut self, args: CircularProgressbarArgs) {
        warn_on_degenerate_geometry(&args);
        {
            let mut state = self.state.lock();
            if !state.is_mounted() {
                debug!(
                    phase = ?state.phase,
                    percentage = args.percentage,
                    "ignoring update for a ring that is not mounted"
                );
                return;
            }
            state.configured_percentage = args.percentage;
            state.displayed_percentage = args.percentage;
        }
        self.args = args;
    }

    fn on_unmount(&mut self) {
        let (initial_timeout, animation_frame) = {
            let mut state = self.state.lock();
            state.phase = RingPhase::Unmounted;
            (state.initial_timeout.take(), state.animation_frame.take())
        };
        if let Some(handle) = initial_timeout {
            self.scheduler.clear_timeout(handle);
        }
        if let Some(handle) = animation_frame {
            self.scheduler.cancel_animation_frame(handle);
        }
        debug!("progress ring unmounted");
    }

    fn render(&self) -> Element {
        render_ring(&self.args, self.displayed_percentage())
    }
}

#[cfg(test)]
mod tests {
    use ringlet_ui::{AttributeValue, ComponentHost, LifecyclePhase, ManualScheduler};

    use super::*;

    fn manual() -> Arc<ManualScheduler> {
        Arc::new(ManualScheduler::new())
    }

    fn text_attr<'a>(element: &'a Element, name: &str) -> &'a str {
        element
            .attribute(name)
            .and_then(AttributeValue::as_text)
            .unwrap_or_default()
    }

    fn dash_offset(tree: &Element) -> String {
        let style = tree
            .find_by_class(PATH_CLASS)
            .map(|path| text_attr(path, "style").to_string())
            .expect("progress path is always rendered");
        style
            .split("stroke-dashoffset: ")
            .nth(1)
            .map(|value| value.trim_end_matches("px").to_string())
            .expect("style carries a dash offset")
    }

    fn expected_offset(percentage: f64, radius: f64) -> String {
        format_number(progress_style(percentage, radius).dash_offset)
    }

    #[test]
    fn args_defaults() {
        let args = CircularProgressbarArgs::new(75.0);
        assert_eq!(args.stroke_width, 8.0);
        assert_eq!(args.background_gutter, 0.0);
        assert_eq!(args.class_name, "");
        assert!(!args.initial_animation);
        assert!(args.class_for_percentage.is_none());
        assert_eq!(args.text_for_percentage.call(75.0), "75%");
        assert_eq!(args.radius(), 46.0);
    }

    #[test]
    fn setters_chain() {
        let args = CircularProgressbarArgs::from(10.0)
            .stroke_width(4.0)
            .background_gutter(2.0)
            .class_name("upload")
            .initial_animation(true)
            .text_for_percentage(|p| format!("{p} done"));
        assert_eq!(args.radius(), 46.0);
        assert_eq!(args.class_name, "upload");
        assert!(args.initial_animation);
        assert_eq!(args.text_for_percentage.call(10.0), "10 done");
    }

    #[test]
    fn tree_has_four_classed_shapes() {
        let tree = render_ring(&CircularProgressbarArgs::new(75.0), 75.0);
        assert_eq!(tree.tag(), Tag::Svg);
        assert_eq!(text_attr(&tree, "viewBox"), "0 0 100 100");
        assert_eq!(text_attr(&tree, "class"), ROOT_CLASS);

        let tags: Vec<_> = tree.children().iter().map(Element::tag).collect();
        assert_eq!(tags, [Tag::Circle, Tag::Path, Tag::Path, Tag::Text]);

        let background = tree.find_by_class(BACKGROUND_CLASS).expect("background");
        assert_eq!(background.attribute("r"), Some(&AttributeValue::Number(50.0)));

        let trail = tree.find_by_class(TRAIL_CLASS).expect("trail");
        assert!(trail.attribute("style").is_none());
        assert_eq!(
            text_attr(trail, "d"),
            "M 50,50 m 0,-46 a 46,46 0 1 1 0,92 a 46,46 0 1 1 0,-92"
        );
        assert_eq!(trail.attribute("fill-opacity"), Some(&AttributeValue::Number(0.0)));

        let path = tree.find_by_class(PATH_CLASS).expect("progress path");
        assert_eq!(text_attr(path, "d"), text_attr(trail, "d"));
        assert_eq!(path.attribute("stroke-width"), Some(&AttributeValue::Number(8.0)));

        let text = tree.find_by_class(TEXT_CLASS).expect("label");
        assert_eq!(text.text_content(), Some("75%"));
        assert_eq!(text.attribute("x"), Some(&AttributeValue::Number(50.0)));
        assert_eq!(text.attribute("y"), Some(&AttributeValue::Number(50.0)));
    }

    #[test]
    fn progress_style_reaches_the_arc() {
        let tree = render_ring(&CircularProgressbarArgs::new(75.0), 75.0);
        let offset: f64 = dash_offset(&tree).parse().expect("numeric offset");
        assert!((offset - 72.26).abs() < 0.01);
    }

    #[test]
    fn root_class_combines_all_sources() {
        let args = CircularProgressbarArgs::new(55.0)
            .class_name("my-ring")
            .class_for_percentage(|p| if p > 50.0 { "high".into() } else { "low".into() });
        let tree = render_ring(&args, 55.0);
        let classes: Vec<_> = tree.class_list().collect();
        assert_eq!(classes, [ROOT_CLASS, "my-ring", "high"]);
    }

    #[test]
    fn empty_dynamic_class_is_skipped() {
        let args = CircularProgressbarArgs::new(5.0).class_for_percentage(|_| String::new());
        assert_eq!(args.root_class(), ROOT_CLASS);
    }

    #[test]
    fn label_and_class_see_the_unclamped_configured_value() {
        let args = CircularProgressbarArgs::new(140.0).class_for_percentage(|p| format!("at-{p}"));
        let tree = render_ring(&args, 0.0);
        assert!(tree.has_class("at-140"));
        let text = tree.find_by_class(TEXT_CLASS).and_then(Element::text_content);
        assert_eq!(text, Some("140%"));
        assert_eq!(dash_offset(&tree), expected_offset(0.0, 46.0));
    }

    #[test]
    fn serialized_ring_is_valid_svg() {
        let args = CircularProgressbarArgs::new(75.0).class_name("download");
        let markup = render_ring(&args, 75.0).to_svg_string();
        let tree = usvg::Tree::from_str(&markup, &usvg::Options::default())
            .expect("ring markup should parse");
        assert_eq!(tree.size().width(), VIEW_BOX_SIZE as f32);
        assert!(markup.contains("stroke-dashoffset"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let args = CircularProgressbarArgs::new(33.3).stroke_width(6.0).class_name("a b");
        assert_eq!(render_ring(&args, 12.5), render_ring(&args, 12.5));
    }

    #[test]
    fn without_animation_mount_shows_the_value_immediately() {
        let scheduler = manual();
        let ring = CircularProgressbar::new(60.0, scheduler.clone());
        let mut host = ComponentHost::new(ring);
        let first = host.mount().expect("mount");

        assert_eq!(host.component().phase(), RingPhase::Steady);
        assert_eq!(dash_offset(&first), expected_offset(60.0, 46.0));
        assert_eq!(scheduler.timers_scheduled(), 0);
        assert_eq!(scheduler.frames_scheduled(), 0);
    }

    #[test]
    fn initial_animation_starts_empty_then_fills_once() {
        let scheduler = manual();
        let ring = CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        );
        let mut host = ComponentHost::new(ring);

        let first = host.mount().expect("mount");
        assert_eq!(dash_offset(&first), expected_offset(0.0, 46.0));
        assert_eq!(host.component().phase(), RingPhase::AnimatingIn);
        // The label always shows the configured value.
        assert_eq!(
            first.find_by_class(TEXT_CLASS).and_then(Element::text_content),
            Some("40%")
        );

        assert_eq!(scheduler.run_timers(), 1);
        assert_eq!(host.component().displayed_percentage(), 0.0);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(host.component().displayed_percentage(), 40.0);
        assert_eq!(host.component().phase(), RingPhase::Steady);

        let settled = host.render().expect("render while mounted");
        assert_eq!(dash_offset(&settled), expected_offset(40.0, 46.0));

        assert_eq!(scheduler.run_until_idle(), 0);
        assert_eq!(scheduler.timers_scheduled(), 1);
        assert_eq!(scheduler.frames_scheduled(), 1);
    }

    #[test]
    fn unmount_before_timeout_cancels_everything() {
        let scheduler = manual();
        let ring = CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        );
        let mut host = ComponentHost::new(ring);
        host.mount().expect("mount");
        host.unmount().expect("unmount");

        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(scheduler.run_until_idle(), 0);
        assert_eq!(host.component().displayed_percentage(), 0.0);
        assert_eq!(host.component().phase(), RingPhase::Unmounted);
        assert_eq!(host.phase(), LifecyclePhase::Unmounted);
    }

    #[test]
    fn unmount_between_timeout_and_frame_cancels_the_frame() {
        let scheduler = manual();
        let ring = CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        );
        let mut host = ComponentHost::new(ring);
        host.mount().expect("mount");
        assert_eq!(scheduler.run_timers(), 1);
        assert_eq!(scheduler.pending_frames(), 1);

        host.unmount().expect("unmount");
        assert_eq!(scheduler.pending_frames(), 0);
        assert_eq!(scheduler.run_until_idle(), 0);
        assert_eq!(host.component().displayed_percentage(), 0.0);
    }

    #[test]
    fn unmount_without_pending_work_is_harmless() {
        let scheduler = manual();
        let mut ring = CircularProgressbar::new(25.0, scheduler.clone());
        ring.on_mount();
        ring.on_unmount();
        ring.on_unmount();
        assert_eq!(ring.phase(), RingPhase::Unmounted);
        assert_eq!(ring.displayed_percentage(), 25.0);
    }

    #[test]
    fn update_outside_mount_keeps_previous_configuration() {
        let scheduler = manual();
        let mut ring = CircularProgressbar::new(25.0, scheduler.clone());
        ring.on_update(CircularProgressbarArgs::new(80.0));
        assert_eq!(ring.args().percentage, 25.0);
        assert_eq!(ring.displayed_percentage(), 25.0);
        assert_eq!(ring.phase(), RingPhase::Mounting);

        ring.on_mount();
        ring.on_unmount();
        ring.on_update(CircularProgressbarArgs::new(80.0));
        assert_eq!(ring.args().percentage, 25.0);
        assert_eq!(ring.displayed_percentage(), 25.0);
    }

    #[test]
    fn default_label_uses_exponent_notation_at_the_extremes() {
        let label = |percentage: f64| {
            render_ring(&CircularProgressbarArgs::new(percentage), percentage)
                .find_by_class(TEXT_CLASS)
                .and_then(Element::text_content)
                .map(str::to_string)
        };
        assert_eq!(label(1e-7).as_deref(), Some("1e-7%"));
        assert_eq!(label(0.000001).as_deref(), Some("0.000001%"));
        assert_eq!(label(1e21).as_deref(), Some("1e+21%"));
    }

    #[test]
    fn updates_apply_synchronously() {
        let scheduler = manual();
        let mut host = ComponentHost::new(CircularProgressbar::new(10.0, scheduler.clone()));
        host.mount().expect("mount");

        let tree = host
            .update(CircularProgressbarArgs::new(90.0))
            .expect("update");
        assert_eq!(host.component().displayed_percentage(), 90.0);
        assert_eq!(dash_offset(&tree), expected_offset(90.0, 46.0));
        assert_eq!(
            tree.find_by_class(TEXT_CLASS).and_then(Element::text_content),
            Some("90%")
        );
        assert_eq!(scheduler.timers_scheduled(), 0);
    }

    #[test]
    fn update_during_entry_animation_settles_on_latest_value() {
        let scheduler = manual();
        let mut host = ComponentHost::new(CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        ));
        host.mount().expect("mount");

        host.update(CircularProgressbarArgs::new(70.0).initial_animation(true))
            .expect("update");
        assert_eq!(host.component().displayed_percentage(), 70.0);
        assert_eq!(host.component().phase(), RingPhase::AnimatingIn);

        scheduler.run_until_idle();
        assert_eq!(host.component().displayed_percentage(), 70.0);
        assert_eq!(host.component().phase(), RingPhase::Steady);
        assert_eq!(scheduler.timers_scheduled(), 1);
    }

    #[test]
    fn dropping_the_component_disarms_pending_callbacks() {
        let scheduler = manual();
        let mut ring = CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        );
        ring.on_mount();
        drop(ring);
        // The timer still fires, but finds no state to touch.
        assert_eq!(scheduler.run_until_idle(), 1);
        assert_eq!(scheduler.frames_scheduled(), 0);
    }

    #[test]
    fn degenerate_geometry_renders_without_panicking() {
        let scheduler = manual();
        let mut host = ComponentHost::new(CircularProgressbar::new(
            CircularProgressbarArgs::new(f64::NAN).stroke_width(120.0),
            scheduler,
        ));
        let tree = host.mount().expect("mount");
        assert_eq!(dash_offset(&tree), "NaN");
        assert_eq!(
            tree.find_by_class(TEXT_CLASS).and_then(Element::text_content),
            Some("NaN%")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn entry_animation_on_tokio_scheduler() {
        let scheduler = Arc::new(ringlet_ui::TokioScheduler::current());
        let mut host = ComponentHost::new(CircularProgressbar::new(
            CircularProgressbarArgs::new(40.0).initial_animation(true),
            scheduler.clone(),
        ));
        host.mount().expect("mount");
        assert_eq!(host.component().displayed_percentage(), 0.0);

        tokio::time::sleep(ringlet_ui::FRAME_INTERVAL * 3).await;
        assert_eq!(host.component().displayed_percentage(), 40.0);
        assert_eq!(scheduler.pending(), 0);
    }
}
