use std::{
    sync::Arc,
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{CuttingPlaneEditor, PlaneUniforms, Slider};
use crate::{
    color::RGB,
    common::{HalfSpace, PlaneIndicator},
    histogram::Histogram,
    volumetric::LinearGrid,
};

/// Messages to editor thread
///
/// Plane parameters are debounced, see [`EditorSettings`](super::EditorSettings).
#[derive(Debug, Clone)]
pub enum EditorMessage {
    Slider(Slider, f32),
    SetHalfSpace(HalfSpace),
    SetColor(RGB),
    ShowIndicator(bool),
    /// Applied immediately, histogram follows without delay
    SetVolume(Arc<LinearGrid>),
    /// Orientation back to identity, pending changes are applied first
    Reset,
    /// Apply pending changes now
    Flush,
    /// Apply pending plane changes and shut down, thread will get ready to be joined
    ShutDown,
}

/// Messages from editor thread
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    PlaneUpdated {
        uniforms: PlaneUniforms,
        indicator: Option<PlaneIndicator>,
    },
    HistogramUpdated(Histogram),
}

/// Changes received during quiescence window
#[derive(Debug, Default)]
struct Pending {
    // arrival order, consecutive readings of one slider are merged
    sliders: Vec<(Slider, f32)>,
    side: Option<HalfSpace>,
    color: Option<RGB>,
    indicator: Option<bool>,
}

impl Pending {
    fn push_slider(&mut self, slider: Slider, value: f32) {
        // rotations do not commute, only the newest entry may absorb the reading
        match self.sliders.last_mut() {
            Some(entry) if entry.0 == slider => entry.1 = value,
            _ => self.sliders.push((slider, value)),
        }
    }

    fn is_empty(&self) -> bool {
        self.sliders.is_empty()
            && self.side.is_none()
            && self.color.is_none()
            && self.indicator.is_none()
    }

    fn apply(&mut self, editor: &mut CuttingPlaneEditor) {
        for (slider, value) in self.sliders.drain(..) {
            editor.slider_event(slider, value);
        }
        if let Some(side) = self.side.take() {
            editor.set_half_space(side);
        }
        if let Some(color) = self.color.take() {
            editor.set_color(color);
        }
        if let Some(visible) = self.indicator.take() {
            editor.set_indicator_visible(visible);
        }
    }
}

/// Debouncing loop running in editor thread
struct EditorWorker {
    editor: Arc<Mutex<CuttingPlaneEditor>>,
    receiver: Receiver<EditorMessage>,
    sender: Sender<EditorEvent>,
    plane_delay: Duration,
    histogram_delay: Duration,
    pending: Pending,
    plane_deadline: Option<Instant>,
    histogram_deadline: Option<Instant>,
}

impl EditorWorker {
    fn new(
        editor: Arc<Mutex<CuttingPlaneEditor>>,
        communication: (Sender<EditorEvent>, Receiver<EditorMessage>),
    ) -> EditorWorker {
        let (plane_delay, histogram_delay) = {
            let guard = editor.lock();
            let settings = guard.settings();
            (settings.plane_delay, settings.histogram_delay)
        };
        EditorWorker {
            editor,
            receiver: communication.1,
            sender: communication.0,
            plane_delay,
            histogram_delay,
            pending: Pending::default(),
            plane_deadline: None,
            histogram_deadline: None,
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.plane_deadline, self.histogram_deadline) {
            (Some(p), Some(h)) => Some(p.min(h)),
            (p, h) => p.or(h),
        }
    }

    /// Every change restarts both windows
    fn schedule(&mut self) {
        let now = Instant::now();
        self.plane_deadline = Some(now + self.plane_delay);
        self.histogram_deadline = Some(now + self.histogram_delay);
    }

    fn run(mut self) {
        loop {
            let msg = match self.next_deadline() {
                Some(deadline) => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match self.receiver.recv_timeout(timeout) {
                        Ok(msg) => Some(msg),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.receiver.recv() {
                    Ok(msg) => Some(msg),
                    Err(_) => break,
                },
            };

            match msg {
                Some(EditorMessage::Slider(slider, value)) => {
                    self.pending.push_slider(slider, value);
                    self.schedule();
                }
                Some(EditorMessage::SetHalfSpace(side)) => {
                    self.pending.side = Some(side);
                    self.schedule();
                }
                Some(EditorMessage::SetColor(color)) => {
                    self.pending.color = Some(color);
                    self.schedule();
                }
                Some(EditorMessage::ShowIndicator(visible)) => {
                    self.pending.indicator = Some(visible);
                    self.schedule();
                }
                Some(EditorMessage::SetVolume(volume)) => {
                    {
                        let mut editor = self.editor.lock();
                        self.pending.apply(&mut editor);
                        editor.set_volume(volume);
                    }
                    self.plane_deadline = None;
                    self.emit_plane();
                    self.histogram_deadline = Some(Instant::now());
                }
                Some(EditorMessage::Reset) => {
                    {
                        let mut editor = self.editor.lock();
                        self.pending.apply(&mut editor);
                        editor.reset_orientation();
                    }
                    self.plane_deadline = None;
                    self.emit_plane();
                    self.histogram_deadline = Some(Instant::now() + self.histogram_delay);
                }
                Some(EditorMessage::Flush) => {
                    self.flush_plane();
                    self.flush_histogram();
                }
                Some(EditorMessage::ShutDown) => {
                    self.flush_plane();
                    break;
                }
                None => {
                    let now = Instant::now();
                    if self.plane_deadline.map_or(false, |d| d <= now) {
                        self.flush_plane();
                    }
                    if self.histogram_deadline.map_or(false, |d| d <= now) {
                        // histogram must see the latest plane
                        if !self.pending.is_empty() {
                            self.flush_plane();
                        }
                        self.flush_histogram();
                    }
                }
            }
        }
        info!("Editor thread shutting down");
    }

    fn flush_plane(&mut self) {
        self.plane_deadline = None;
        if self.pending.is_empty() {
            return;
        }
        self.pending.apply(&mut self.editor.lock());
        self.emit_plane();
    }

    fn flush_histogram(&mut self) {
        self.histogram_deadline = None;
        let histogram = self.editor.lock().histogram();
        match histogram {
            Some(histogram) => {
                debug!(total = histogram.total(), "Histogram ready");
                self.send(EditorEvent::HistogramUpdated(histogram));
            }
            None => debug!("No volume, histogram skipped"),
        }
    }

    fn emit_plane(&self) {
        let event = {
            let editor = self.editor.lock();
            EditorEvent::PlaneUpdated {
                uniforms: editor.uniforms(),
                indicator: editor.indicator(),
            }
        };
        self.send(event);
    }

    fn send(&self, event: EditorEvent) {
        if self.sender.send(event).is_err() {
            debug!("Nobody listens to editor events");
        }
    }
}

/// Communicating with editor running in its own thread
///
/// Can be active or inactive.
pub struct EditorFront {
    handle: Option<JoinHandle<()>>,
    editor: Arc<Mutex<CuttingPlaneEditor>>,
    communication_in: (Sender<EditorMessage>, Receiver<EditorMessage>),
    communication_out: (Sender<EditorEvent>, Receiver<EditorEvent>),
}

impl EditorFront {
    /// Create inactive front
    pub fn new(editor: CuttingPlaneEditor) -> Self {
        let communication_in = crossbeam::channel::unbounded(); // main -> editor
        let communication_out = crossbeam::channel::unbounded(); // editor -> main
        Self {
            handle: None,
            editor: Arc::new(Mutex::new(editor)),
            communication_in,
            communication_out,
        }
    }

    /// Spawn editor thread.
    /// If front was already active, previous thread gets shut down first.
    pub fn start(&mut self) {
        self.finish();

        let communication = (
            self.communication_out.0.clone(),
            self.communication_in.1.clone(),
        );
        let worker = EditorWorker::new(self.editor.clone(), communication);
        self.handle = Some(std::thread::spawn(move || worker.run()));
        info!("Editor thread started");
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Getter for sender, see `send_message()`
    pub fn get_sender(&self) -> Sender<EditorMessage> {
        self.communication_in.0.clone()
    }

    pub fn send_message(&self, msg: EditorMessage) {
        // Front holds the receiving end too, send cannot fail
        if let Err(e) = self.communication_in.0.send(msg) {
            warn!("Editor message lost: {:?}", e.into_inner());
        }
    }

    pub fn get_receiver(&self) -> Receiver<EditorEvent> {
        self.communication_out.1.clone()
    }

    /// Blocking call
    pub fn receive_event(&self) -> Option<EditorEvent> {
        self.communication_out.1.recv().ok()
    }

    pub fn receive_event_timeout(&self, timeout: Duration) -> Option<EditorEvent> {
        self.communication_out.1.recv_timeout(timeout).ok()
    }

    /// Shared editor, lock it to read current state
    pub fn get_editor_handle(&self) -> Arc<Mutex<CuttingPlaneEditor>> {
        self.editor.clone()
    }

    /// Send `ShutDown` and join the thread.
    /// Pending plane changes reach the shared editor, histogram is skipped.
    /// Front goes into inactive state.
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.send_message(EditorMessage::ShutDown);
            if handle.join().is_err() {
                warn!("Editor thread panicked");
            }
        }
    }
}

impl Drop for EditorFront {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod test {

    use approx::assert_abs_diff_eq;
    use nalgebra::vector;

    use super::*;
    use crate::{
        editor::EditorSettings,
        test_helpers::{counting_grid, eight_voxels},
    };

    const WAIT: Duration = Duration::from_secs(5);

    fn front(plane_ms: u64, histogram_ms: u64) -> EditorFront {
        let settings = EditorSettings::builder()
            .plane_delay(Duration::from_millis(plane_ms))
            .histogram_delay(Duration::from_millis(histogram_ms))
            .build()
            .unwrap();
        let mut front = EditorFront::new(CuttingPlaneEditor::new(settings));
        front.start();
        front
    }

    fn next_plane(front: &EditorFront) -> PlaneUniforms {
        loop {
            match front.receive_event_timeout(WAIT) {
                Some(EditorEvent::PlaneUpdated { uniforms, .. }) => return uniforms,
                Some(EditorEvent::HistogramUpdated(_)) => continue,
                None => panic!("no plane update"),
            }
        }
    }

    fn next_histogram(front: &EditorFront) -> Histogram {
        loop {
            match front.receive_event_timeout(WAIT) {
                Some(EditorEvent::HistogramUpdated(h)) => return h,
                Some(EditorEvent::PlaneUpdated { .. }) => continue,
                None => panic!("no histogram update"),
            }
        }
    }

    #[test]
    fn burst_is_coalesced() {
        let mut front = front(50, 10_000);

        for i in 1..10 {
            front.send_message(EditorMessage::Slider(Slider::Translate, i as f32 * 0.01));
        }
        front.send_message(EditorMessage::Slider(Slider::Translate, 0.1));

        let uniforms = next_plane(&front);
        assert_eq!(uniforms.plane.w, -0.1);

        // single update for the whole burst
        assert!(front
            .receive_event_timeout(Duration::from_millis(200))
            .is_none());
        front.finish();
    }

    #[test]
    fn pending_sliders_do_not_override_each_other() {
        let mut front = front(50, 10_000);

        front.send_message(EditorMessage::Slider(Slider::X, 0.5));
        front.send_message(EditorMessage::Slider(Slider::Y, 0.0));
        front.send_message(EditorMessage::Slider(Slider::Translate, 0.1));
        next_plane(&front);

        let editor = front.get_editor_handle();
        let normal = editor.lock().plane().normal;
        // X rotation survived, normal left the z axis
        assert!(normal.z.abs() < 1e-5, "{normal:?}");
        assert_eq!(editor.lock().translation(), 0.1);
        front.finish();
    }

    #[test]
    fn pending_rotations_keep_arrival_order() {
        let mut front = front(10_000, 10_000);
        let readings = [(Slider::Y, 0.5), (Slider::X, 0.5), (Slider::Y, 0.0)];

        for (slider, value) in readings {
            front.send_message(EditorMessage::Slider(slider, value));
        }
        front.send_message(EditorMessage::Flush);
        next_plane(&front);

        let mut direct = CuttingPlaneEditor::default();
        for (slider, value) in readings {
            direct.slider_event(slider, value);
        }

        let editor = front.get_editor_handle();
        let buffered = editor.lock().plane().normal.into_inner();
        assert_abs_diff_eq!(buffered, direct.plane().normal.into_inner(), epsilon = 1e-5);
        assert_abs_diff_eq!(buffered, vector![0.0, 0.0, 1.0], epsilon = 1e-5);
        front.finish();
    }

    #[test]
    fn finish_applies_pending_changes() {
        let mut front = front(10_000, 10_000);
        front.send_message(EditorMessage::Slider(Slider::Translate, 0.3));
        front.send_message(EditorMessage::SetHalfSpace(HalfSpace::Below));
        front.finish();

        let editor = front.get_editor_handle();
        assert_eq!(editor.lock().translation(), 0.3);
        assert_eq!(editor.lock().half_space(), HalfSpace::Below);
    }

    #[test]
    fn volume_triggers_histogram() {
        let mut front = front(10, 10_000);

        front.send_message(EditorMessage::SetVolume(Arc::new(counting_grid(vector![
            4, 4, 4
        ]))));

        let uniforms = next_plane(&front);
        assert_eq!(uniforms.plane, vector![0.0, 0.0, 1.0, 0.0]);
        let histogram = next_histogram(&front);
        assert_eq!(histogram.total(), 16);
        front.finish();
    }

    #[test]
    fn histogram_follows_plane() {
        let mut front = front(10, 100);
        front.send_message(EditorMessage::SetVolume(Arc::new(eight_voxels())));
        next_histogram(&front);

        front.send_message(EditorMessage::Slider(Slider::Translate, -0.25));
        front.send_message(EditorMessage::SetHalfSpace(HalfSpace::Below));

        let uniforms = next_plane(&front);
        assert_eq!(uniforms.render_above, 0.0);

        let histogram = next_histogram(&front);
        // values 1..=8 are outside <0;1>, domain follows data
        assert_eq!(histogram.total(), 4);
        front.finish();
    }

    #[test]
    fn flush_skips_waiting() {
        let mut front = front(10_000, 10_000);
        front.send_message(EditorMessage::SetColor(vector![0.0, 0.0, 1.0]));
        front.send_message(EditorMessage::Flush);

        let uniforms = next_plane(&front);
        assert_eq!(uniforms.color, vector![0.0, 0.0, 1.0]);
        front.finish();
    }

    #[test]
    fn reset_emits_identity_plane() {
        let mut front = front(10_000, 10_000);
        front.send_message(EditorMessage::Slider(Slider::X, 0.3));
        front.send_message(EditorMessage::Slider(Slider::Translate, 0.2));
        front.send_message(EditorMessage::Reset);

        let uniforms = next_plane(&front);
        // translation survives, rotation does not
        assert_eq!(uniforms.plane, vector![0.0, 0.0, 1.0, -0.2]);
        front.finish();
    }

    #[test]
    fn restart_and_finish() {
        let mut front = front(10, 10);
        assert!(front.is_active());
        front.start();
        assert!(front.is_active());
        front.finish();
        assert!(!front.is_active());
    }
}
