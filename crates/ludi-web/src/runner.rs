use std::sync::Arc;
use ludi_gesture::{
    CaptureSession, Classifier, EngineConfig, InputEvent, InputQueue, Recognition,
    SessionState, SimpleSession, SplitSession, TemplateFile, TemplateStore,
};

/// Generic session runner that wires host input into a capture session.
///
/// The host pushes pointer events as they arrive and calls `tick` once per
/// frame. A concrete runner lives in a `thread_local!` in `lib.rs`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SessionRunner<S: CaptureSession> {
    session: S,
    input: InputQueue,
}

impl<S: CaptureSession> SessionRunner<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            input: InputQueue::new(),
        }
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: queued events, then timers. Drains input afterwards.
    pub fn tick(&mut self, dt: f32) -> Option<Recognition> {
        let result = self.session.step(dt, &self.input);
        self.input.drain();
        result
    }

    /// Drop queued input and anything the session has buffered.
    pub fn clear(&mut self) {
        self.input.clear();
        self.session.clear();
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        if suspended {
            self.input.clear();
        }
        self.session.set_suspended(suspended);
    }

    pub fn set_expected_answer(&mut self, answer: Option<i64>) {
        self.session.set_expected_answer(answer);
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }
}

/// The runner installed by `recognizer_init`, one of the two session kinds.
pub enum ActiveRunner {
    Simple(SessionRunner<SimpleSession>),
    Split(SessionRunner<SplitSession>),
}

macro_rules! dispatch {
    ($runner:expr, $r:ident => $body:expr) => {
        match $runner {
            ActiveRunner::Simple($r) => $body,
            ActiveRunner::Split($r) => $body,
        }
    };
}

impl ActiveRunner {
    /// Build a runner from host-supplied JSON.
    ///
    /// An empty or malformed `config_json` falls back to defaults. User
    /// templates are a JSON array of `{ "name", "strokes" }` objects appended
    /// after the bundled digits; bad entries are skipped.
    pub fn from_json(config_json: &str, user_templates_json: &str, split: bool, surface_width: f32) -> Self {
        let config = load_config(config_json);
        let mut store = TemplateStore::bundled_digits();
        let added = load_user_templates(&mut store, user_templates_json);
        if added > 0 {
            log::info!("Loaded {} user templates", added);
        }

        let classifier = Arc::new(Classifier::new(config.classifier, &store));
        if split {
            Self::Split(SessionRunner::new(SplitSession::new(config.split, classifier, surface_width)))
        } else {
            Self::Simple(SessionRunner::new(SimpleSession::new(config.simple, classifier)))
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        dispatch!(self, r => r.push_input(event))
    }

    pub fn tick(&mut self, dt: f32) -> Option<Recognition> {
        dispatch!(self, r => r.tick(dt))
    }

    pub fn clear(&mut self) {
        dispatch!(self, r => r.clear())
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        dispatch!(self, r => r.set_suspended(suspended))
    }

    pub fn set_expected_answer(&mut self, answer: Option<i64>) {
        dispatch!(self, r => r.set_expected_answer(answer))
    }

    pub fn state(&self) -> SessionState {
        dispatch!(self, r => r.state())
    }

    /// Resize the split surface. No effect on a single-zone runner.
    pub fn set_surface_width(&mut self, width: f32) {
        if let Self::Split(r) = self {
            r.session_mut().set_surface_width(width);
        }
    }
}

fn load_config(json: &str) -> EngineConfig {
    if json.trim().is_empty() {
        return EngineConfig::default();
    }
    match EngineConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid recognizer config, using defaults: {}", e);
            EngineConfig::default()
        }
    }
}

fn load_user_templates(store: &mut TemplateStore, json: &str) -> usize {
    if json.trim().is_empty() {
        return 0;
    }
    let files: Vec<TemplateFile> = match serde_json::from_str(json) {
        Ok(files) => files,
        Err(e) => {
            log::warn!("Ignoring user templates: {}", e);
            return 0;
        }
    };
    // Inline entries have no file name; their position stands in for it
    store.load_files(
        files
            .into_iter()
            .enumerate()
            .map(|(i, file)| (format!("user-{}", i), file)),
    )
}
