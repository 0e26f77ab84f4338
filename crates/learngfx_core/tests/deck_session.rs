//! A full presentation session driven through the public deck API

use std::cell::RefCell;
use std::rc::Rc;

use learngfx_core::{
    Color, DeckCommand, FrameClock, FrameTime, SketchEvent, Slide, SlideBase, SlideDeck,
    SlideError,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every lifecycle call as "<header>:<call>"
struct Recorder {
    base: SlideBase,
    sketch: bool,
    log: Log,
}

impl Recorder {
    fn boxed(header: &str, sketch: bool, log: &Log) -> Box<dyn Slide<Gpu = (), Frame = Vec<String>>> {
        Box::new(Self {
            base: SlideBase::new(header),
            sketch,
            log: Rc::clone(log),
        })
    }

    fn record(&self, call: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.base.header, call));
    }
}

impl Slide for Recorder {
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

    fn handle_event(&mut self, event: &SketchEvent) -> bool {
        if !self.sketch {
            return false;
        }
        if let SketchEvent::Scroll { .. } = event {
            self.record("scroll");
        }
        true
    }

    fn is_sketch(&self) -> bool {
        self.sketch
    }

    fn on_exit(&mut self) {
        self.record("exit");
    }
}

fn session_deck(log: &Log) -> SlideDeck<(), Vec<String>> {
    SlideDeck::new(vec![
        Recorder::boxed("Title", false, log),
        Recorder::boxed("Camera", true, log),
        Recorder::boxed("Outro", false, log),
    ])
}

#[test]
fn test_presentation_session() {
    let log: Log = Rc::default();
    let mut deck = session_deck(&log);
    deck.apply_gradient(Color::MAGENTA, Color::BLACK);
    deck.init_all(&()).unwrap();

    let mut clock = FrameClock::new();
    let mut frames = Vec::new();

    deck.update(&clock.tick());
    deck.draw(&(), &mut frames);
    assert!(!deck.handle_event(&SketchEvent::Scroll { dx: 0.0, dy: 1.0 }));

    assert!(deck.apply(DeckCommand::Next));
    deck.update(&clock.tick());
    deck.draw(&(), &mut frames);
    assert!(deck.handle_event(&SketchEvent::Scroll { dx: 0.0, dy: 1.0 }));

    assert!(deck.apply(DeckCommand::Last));
    assert!(!deck.apply(DeckCommand::Next));
    deck.draw(&(), &mut frames);

    deck.close_all();

    assert_eq!(frames, ["Title", "Camera", "Outro"]);
    assert_eq!(
        *log.borrow(),
        [
            "Title:init",
            "Camera:init",
            "Outro:init",
            "Title:update",
            "Title:exit",
            "Camera:update",
            "Camera:scroll",
            "Camera:exit",
            "Title:close",
            "Camera:close",
            "Outro:close",
        ]
    );
}

#[test]
fn test_gradient_runs_first_to_last() {
    let log: Log = Rc::default();
    let mut deck = session_deck(&log);
    deck.apply_gradient(Color::MAGENTA, Color::BLACK);

    assert_eq!(deck.current().unwrap().color(), Color::MAGENTA);
    deck.apply(DeckCommand::Last);
    assert_eq!(deck.current().unwrap().color(), Color::BLACK);
}

#[test]
fn test_go_to_out_of_range_keeps_current() {
    let log: Log = Rc::default();
    let mut deck = session_deck(&log);
    deck.apply(DeckCommand::GoTo(1));

    assert!(deck.go_to(3).is_err());
    assert!(!deck.apply(DeckCommand::GoTo(7)));
    assert_eq!(deck.current_index(), 1);
    assert_eq!(deck.current().unwrap().header(), "Camera");
}
