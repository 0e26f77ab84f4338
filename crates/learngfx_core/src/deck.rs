//! Slide sequencing
//!
//! The SlideDeck owns every slide and tracks which one is current:
//! - All slides are initialized up front, in order
//! - Navigation is clamped to the first and last slide (no wrap-around)
//! - Only the current slide is updated, drawn and given input
//! - Every initialized slide is closed exactly once
//!
//! # Example
//! ```ignore
//! let mut deck = SlideDeck::new(slides);
//! deck.apply_gradient(Color::MAGENTA, Color::BLACK);
//! deck.init_all(&gpu)?;
//!
//! // Frame loop
//! deck.update(&time);
//! deck.draw(&gpu, &mut frame);
//!
//! // Key press
//! deck.next();
//! ```

use std::fmt;
use crate::{Color, FrameTime, Slide, SlideError};
use learngfx_input::SketchEvent;

/// Navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
}

/// Ordered slides plus the current-slide state machine
pub struct SlideDeck<G, F> {
    slides: Vec<Box<dyn Slide<Gpu = G, Frame = F>>>,
    current: usize,
    /// Number of leading slides whose `init` succeeded and that still need
    /// `close`
    initialized: usize,
}

impl<G, F> SlideDeck<G, F> {
    /// Create a deck; the first slide is current
    pub fn new(slides: Vec<Box<dyn Slide<Gpu = G, Frame = F>>>) -> Self {
        Self {
            slides,
            current: 0,
            initialized: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current slide, `None` for an empty deck
    pub fn current(&self) -> Option<&dyn Slide<Gpu = G, Frame = F>> {
        self.slides.get(self.current).map(|s| s.as_ref())
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Slide<Gpu = G, Frame = F> + 'static)> {
        self.slides.get_mut(self.current).map(|s| s.as_mut())
    }

    /// Headers of all slides in order
    pub fn headers(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.header()).collect()
    }

    pub fn is_initialized(&self) -> bool {
        !self.slides.is_empty() && self.initialized == self.slides.len()
    }

    /// Color every slide along a gradient from `start` to `end`
    pub fn apply_gradient(&mut self, start: Color, end: Color) {
        let total = self.slides.len();
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.set_color(Color::step(start, end, total, i));
        }
    }

    // --- Lifecycle ---

    /// Initialize every slide in order
    ///
    /// Stops at the first failure. Slides initialized before the failure are
    /// still closed by [`close_all`](Self::close_all).
    pub fn init_all(&mut self, gpu: &G) -> Result<(), DeckError> {
        for index in self.initialized..self.slides.len() {
            let slide = &mut self.slides[index];
            log::debug!("Initializing slide {}: {}", index, slide.header());
            slide.init(gpu).map_err(|source| DeckError::Init {
                index,
                header: slide.header().to_string(),
                source,
            })?;
            self.initialized = index + 1;
        }
        log::info!("Initialized {} slides", self.slides.len());
        Ok(())
    }

    /// Close every initialized slide (idempotent)
    pub fn close_all(&mut self) {
        for slide in self.slides.iter_mut().take(self.initialized) {
            slide.close();
        }
        if self.initialized > 0 {
            log::debug!("Closed {} slides", self.initialized);
        }
        self.initialized = 0;
    }

    // --- Navigation ---

    /// Advance to the next slide. Returns true if the current slide changed.
    pub fn next(&mut self) -> bool {
        let target = self.current + 1;
        target < self.slides.len() && self.switch(target)
    }

    /// Go back one slide. Returns true if the current slide changed.
    pub fn previous(&mut self) -> bool {
        self.current > 0 && self.switch(self.current - 1)
    }

    pub fn first(&mut self) -> bool {
        !self.slides.is_empty() && self.switch(0)
    }

    pub fn last(&mut self) -> bool {
        !self.slides.is_empty() && self.switch(self.slides.len() - 1)
    }

    /// Jump to `index`. Returns whether the current slide changed.
    pub fn go_to(&mut self, index: usize) -> Result<bool, DeckError> {
        if index >= self.slides.len() {
            return Err(DeckError::OutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        Ok(self.switch(index))
    }

    /// Apply a navigation command. Returns true if the current slide changed.
    pub fn apply(&mut self, command: DeckCommand) -> bool {
        match command {
            DeckCommand::Next => self.next(),
            DeckCommand::Previous => self.previous(),
            DeckCommand::First => self.first(),
            DeckCommand::Last => self.last(),
            DeckCommand::GoTo(index) => match self.go_to(index) {
                Ok(changed) => changed,
                Err(e) => {
                    log::warn!("{}", e);
                    false
                }
            },
        }
    }

    fn switch(&mut self, target: usize) -> bool {
        if target == self.current {
            return false;
        }
        self.slides[self.current].on_exit();
        self.current = target;
        log::info!(
            "Slide {}/{}: {}",
            self.current + 1,
            self.slides.len(),
            self.slides[self.current].header()
        );
        true
    }

    // --- Per-frame forwarding ---

    pub fn update(&mut self, time: &FrameTime) {
        if let Some(slide) = self.slides.get_mut(self.current) {
            slide.update(time);
        }
    }

    pub fn draw(&mut self, gpu: &G, frame: &mut F) {
        if let Some(slide) = self.slides.get_mut(self.current) {
            slide.draw(gpu, frame);
        }
    }

    /// Give an input event to the current slide. Returns true if it was used.
    pub fn handle_event(&mut self, event: &SketchEvent) -> bool {
        self.slides
            .get_mut(self.current)
            .map(|slide| slide.handle_event(event))
            .unwrap_or(false)
    }

    /// Forwarded to every initialized slide, not just the current one
    pub fn resize(&mut self, gpu: &G, width: u32, height: u32) {
        for slide in self.slides.iter_mut().take(self.initialized) {
            slide.resize(gpu, width, height);
        }
    }
}

impl<G, F> Drop for SlideDeck<G, F> {
    fn drop(&mut self) {
        self.close_all();
    }
}

/// Errors from deck operations
#[derive(Debug)]
pub enum DeckError {
    /// A slide failed to initialize
    Init {
        index: usize,
        header: String,
        source: SlideError,
    },
    /// Requested slide index does not exist
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Init { index, header, source } => {
                write!(f, "Failed to initialize slide {} ({}): {}", index, header, source)
            }
            DeckError::OutOfRange { index, len } => {
                write!(f, "Slide index {} out of range (deck has {} slides)", index, len)
            }
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Init { source, .. } => Some(source),
            DeckError::OutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlideBase;
    use std::cell::RefCell;
    use std::rc::Rc;
    use learngfx_input::SketchEvent;

    type Log = Rc<RefCell<Vec<String>>>;

    struct TestSlide {
        base: SlideBase,
        log: Log,
        fail_init: bool,
        sketch: bool,
    }

    impl TestSlide {
        fn boxed(name: &str, log: &Log) -> Box<dyn Slide<Gpu = (), Frame = Vec<String>>> {
            Box::new(Self {
                base: SlideBase::new(name),
                log: log.clone(),
                fail_init: false,
                sketch: false,
            })
        }

        fn failing(name: &str, log: &Log) -> Box<dyn Slide<Gpu = (), Frame = Vec<String>>> {
            Box::new(Self {
                base: SlideBase::new(name),
                log: log.clone(),
                fail_init: true,
                sketch: false,
            })
        }

        fn sketch(name: &str, log: &Log) -> Box<dyn Slide<Gpu = (), Frame = Vec<String>>> {
            Box::new(Self {
                base: SlideBase::new(name),
                log: log.clone(),
                fail_init: false,
                sketch: true,
            })
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{}", what, self.base.header));
        }
    }

    impl Slide for TestSlide {
        type Gpu = ();
        type Frame = Vec<String>;

        fn base(&self) -> &SlideBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut SlideBase {
            &mut self.base
        }
        fn init(&mut self, _gpu: &()) -> Result<(), SlideError> {
            self.record("init");
            if self.fail_init {
                return Err(SlideError::Shader("boom".to_string()));
            }
            Ok(())
        }
        fn update(&mut self, _time: &FrameTime) {
            self.record("update");
        }
        fn draw(&mut self, _gpu: &(), frame: &mut Vec<String>) {
            frame.push(self.base.header.clone());
        }
        fn close(&mut self) {
            self.record("close");
        }
        fn handle_event(&mut self, _event: &SketchEvent) -> bool {
            self.sketch
        }
        fn is_sketch(&self) -> bool {
            self.sketch
        }
        fn on_exit(&mut self) {
            self.record("exit");
        }
    }

    fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn deck_of(names: &[&str], log: &Log) -> SlideDeck<(), Vec<String>> {
        SlideDeck::new(names.iter().map(|n| TestSlide::boxed(n, log)).collect())
    }

    #[test]
    fn test_new_starts_at_first_slide() {
        let log = new_log();
        let deck = deck_of(&["a", "b", "c"], &log);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.current().map(|s| s.header()), Some("a"));
        assert_eq!(deck.headers(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_next_and_previous_are_clamped() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b", "c"], &log);

        assert!(!deck.previous(), "previous on the first slide is a no-op");
        assert!(deck.next());
        assert!(deck.next());
        assert_eq!(deck.current_index(), 2);
        assert!(!deck.next(), "next on the last slide is a no-op");
        assert_eq!(deck.current_index(), 2);
        assert!(deck.previous());
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_first_last_go_to() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b", "c", "d"], &log);

        assert!(deck.last());
        assert_eq!(deck.current_index(), 3);
        assert!(!deck.last());
        assert!(deck.first());
        assert_eq!(deck.current_index(), 0);

        assert!(deck.go_to(2).unwrap());
        assert!(!deck.go_to(2).unwrap());
        assert!(matches!(deck.go_to(4), Err(DeckError::OutOfRange { index: 4, len: 4 })));
        assert_eq!(deck.current_index(), 2);
    }

    #[test]
    fn test_apply_commands() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b", "c"], &log);

        assert!(deck.apply(DeckCommand::Last));
        assert!(deck.apply(DeckCommand::Previous));
        assert_eq!(deck.current_index(), 1);
        assert!(!deck.apply(DeckCommand::GoTo(99)));
        assert_eq!(deck.current_index(), 1);
        assert!(deck.apply(DeckCommand::First));
        assert!(deck.apply(DeckCommand::Next));
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_on_exit_runs_for_left_slide() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b"], &log);

        deck.next();
        deck.next(); // clamped, no exit
        deck.previous();
        assert_eq!(*log.borrow(), vec!["exit:a", "exit:b"]);
    }

    #[test]
    fn test_update_and_draw_only_current() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b"], &log);
        deck.init_all(&()).unwrap();
        log.borrow_mut().clear();

        deck.next();
        deck.update(&FrameTime::at(1.0, 0.016));
        let mut frame = Vec::new();
        deck.draw(&(), &mut frame);

        assert_eq!(*log.borrow(), vec!["exit:a", "update:b"]);
        assert_eq!(frame, vec!["b"]);
    }

    #[test]
    fn test_init_all_in_order() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b", "c"], &log);
        deck.init_all(&()).unwrap();
        assert!(deck.is_initialized());
        assert_eq!(*log.borrow(), vec!["init:a", "init:b", "init:c"]);
    }

    #[test]
    fn test_init_failure_reports_slide_and_closes_earlier() {
        let log = new_log();
        let mut deck = SlideDeck::new(vec![
            TestSlide::boxed("a", &log),
            TestSlide::failing("b", &log),
            TestSlide::boxed("c", &log),
        ]);

        let err = deck.init_all(&()).unwrap_err();
        match &err {
            DeckError::Init { index, header, source } => {
                assert_eq!(*index, 1);
                assert_eq!(header, "b");
                assert!(matches!(source, SlideError::Shader(_)));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().contains("slide 1 (b)"));
        assert!(!deck.is_initialized());

        deck.close_all();
        assert_eq!(*log.borrow(), vec!["init:a", "init:b", "close:a"]);
    }

    #[test]
    fn test_close_all_once() {
        let log = new_log();
        {
            let mut deck = deck_of(&["a", "b"], &log);
            deck.init_all(&()).unwrap();
            deck.close_all();
            deck.close_all();
        } // drop must not close again
        let closes = log.borrow().iter().filter(|l| l.starts_with("close")).count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn test_drop_closes_initialized_slides() {
        let log = new_log();
        {
            let mut deck = deck_of(&["a"], &log);
            deck.init_all(&()).unwrap();
        }
        assert_eq!(log.borrow().last().map(String::as_str), Some("close:a"));
    }

    #[test]
    fn test_uninitialized_deck_is_not_closed() {
        let log = new_log();
        drop(deck_of(&["a"], &log));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_events_go_to_current_sketch_only() {
        let log = new_log();
        let mut deck = SlideDeck::new(vec![
            TestSlide::boxed("slide", &log),
            TestSlide::sketch("sketch", &log),
        ]);
        let event = SketchEvent::Scroll { dx: 0.0, dy: 1.0 };

        assert!(!deck.handle_event(&event));
        assert!(!deck.current().unwrap().is_sketch());
        deck.next();
        assert!(deck.handle_event(&event));
        assert!(deck.current().unwrap().is_sketch());
    }

    #[test]
    fn test_gradient_colors() {
        let log = new_log();
        let mut deck = deck_of(&["a", "b", "c"], &log);
        deck.apply_gradient(Color::WHITE, Color::BLACK);

        deck.first();
        assert_eq!(deck.current().unwrap().color(), Color::WHITE);
        deck.next();
        assert_eq!(deck.current().unwrap().color(), Color::rgb(0.5, 0.5, 0.5));
        deck.last();
        assert_eq!(deck.current().unwrap().color(), Color::BLACK);
    }

    #[test]
    fn test_empty_deck() {
        let mut deck: SlideDeck<(), Vec<String>> = SlideDeck::new(Vec::new());
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        assert!(!deck.next());
        assert!(!deck.previous());
        assert!(!deck.first());
        assert!(!deck.last());
        assert!(deck.go_to(0).is_err());
        assert!(!deck.handle_event(&SketchEvent::Scroll { dx: 0.0, dy: 1.0 }));
        assert!(deck.init_all(&()).is_ok());

        let mut frame = Vec::new();
        deck.update(&FrameTime::at(0.0, 0.0));
        deck.draw(&(), &mut frame);
        assert!(frame.is_empty());
    }
}
